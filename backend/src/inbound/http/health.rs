//! Health endpoints.
//!
//! `/health` performs a store round-trip and reports the outcome as JSON.
//! `/health/live` and `/health/ready` are bodyless probes for orchestrators
//! and load balancers.

use std::sync::atomic::{AtomicBool, Ordering};

use actix_web::{HttpResponse, get, http::header, web};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::warn;
use utoipa::ToSchema;

use crate::inbound::http::state::HttpState;

/// Shared health state for readiness and liveness checks.
pub struct HealthState {
    ready: AtomicBool,
    live: AtomicBool,
}

impl Default for HealthState {
    fn default() -> Self {
        Self {
            ready: AtomicBool::new(false),
            live: AtomicBool::new(true),
        }
    }
}

impl HealthState {
    /// Create a new health state starting as not ready but live.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the service as ready.
    pub fn mark_ready(&self) {
        self.ready.store(true, Ordering::Release);
    }

    /// Flag the service as unhealthy so liveness checks fail fast during shutdown.
    pub fn mark_unhealthy(&self) {
        self.live.store(false, Ordering::Release);
    }

    /// Return readiness state.
    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    /// Return liveness state.
    pub fn is_alive(&self) -> bool {
        self.live.load(Ordering::Acquire)
    }

    fn probe_response(probe_ok: bool) -> HttpResponse {
        let mut response = if probe_ok {
            HttpResponse::Ok()
        } else {
            HttpResponse::ServiceUnavailable()
        };

        response
            .insert_header((header::CACHE_CONTROL, "no-store"))
            .finish()
    }
}

/// Outcome of the store round-trip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct StoreHealthBody {
    /// `ok` or `error`.
    #[schema(example = "ok")]
    pub status: String,
    /// `connected` or `disconnected`.
    #[schema(example = "connected")]
    pub database: String,
    /// When the check ran.
    #[schema(format = "date-time")]
    pub timestamp: String,
}

/// Store health check. Returns 200 when the store answers and 500 otherwise.
#[utoipa::path(
    get,
    path = "/health",
    tags = ["health"],
    responses(
        (status = 200, description = "Store reachable", body = StoreHealthBody),
        (status = 500, description = "Store unreachable", body = StoreHealthBody)
    )
)]
#[get("/health")]
pub async fn store_health(state: web::Data<HttpState>) -> HttpResponse {
    let outcome = state.store_health.check_store().await;
    let timestamp = Utc::now().to_rfc3339();
    if let Err(error) = &outcome {
        warn!(code = ?error.code(), message = error.message(), "store health check failed");
    }
    let connected = outcome.is_ok();
    let mut response = if connected {
        HttpResponse::Ok()
    } else {
        HttpResponse::InternalServerError()
    };
    response
        .insert_header((header::CACHE_CONTROL, "no-store"))
        .json(StoreHealthBody {
            status: if connected { "ok" } else { "error" }.to_owned(),
            database: if connected { "connected" } else { "disconnected" }.to_owned(),
            timestamp,
        })
}

/// Readiness probe. Return 200 when dependencies are initialised and the server can handle traffic; return 503 otherwise.
#[utoipa::path(
    get,
    path = "/health/ready",
    tags = ["health"],
    responses(
        (status = 200, description = "Server is ready to handle traffic"),
        (status = 503, description = "Server is not ready")
    )
)]
#[get("/health/ready")]
pub async fn ready(state: web::Data<HealthState>) -> HttpResponse {
    HealthState::probe_response(state.is_ready())
}

/// Liveness probe. Return 200 while the process is marked alive and 503 once draining.
#[utoipa::path(
    get,
    path = "/health/live",
    tags = ["health"],
    responses(
        (status = 200, description = "Server is alive"),
        (status = 503, description = "Server is shutting down")
    )
)]
#[get("/health/live")]
pub async fn live(state: web::Data<HealthState>) -> HttpResponse {
    HealthState::probe_response(state.is_alive())
}
