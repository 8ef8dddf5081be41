//! HTTP inbound adapter exposing REST endpoints.

use actix_web::{HttpRequest, ResponseError, error::InternalError, web};

use crate::domain::Error;

pub mod error;
pub mod health;
pub mod patients;
pub mod patients_dto;
pub mod schemas;
pub mod state;
pub mod validation;

pub use error::ApiResult;

fn reject_payload<E>(err: E, context: &str) -> actix_web::Error
where
    E: std::fmt::Display + std::fmt::Debug + 'static,
{
    let error = Error::invalid_request(format!("{context}: {err}"));
    let response = error.error_response();
    InternalError::from_response(err, response).into()
}

/// Register the patient API, the store health check and the extractor
/// configuration that turns decoding failures into `invalid_request`
/// envelopes.
///
/// Callers provide `web::Data<HttpState>` and `web::Data<HealthState>`.
///
/// # Examples
/// ```
/// use std::sync::Arc;
///
/// use actix_web::{App, web};
/// use mockable::DefaultClock;
/// use pet_clinic::domain::PatientService;
/// use pet_clinic::inbound::http::state::HttpState;
/// use pet_clinic::inbound::http::{configure, health::HealthState};
/// use pet_clinic::outbound::memory::InMemoryPatientRepository;
///
/// let service = PatientService::new(
///     Arc::new(InMemoryPatientRepository::default()),
///     Arc::new(DefaultClock),
/// );
/// let state = HttpState::from_service(Arc::new(service));
/// let _app = App::new()
///     .app_data(web::Data::new(state))
///     .app_data(web::Data::new(HealthState::new()))
///     .configure(configure);
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .error_handler(|err, _req: &HttpRequest| reject_payload(err, "invalid JSON body")),
    )
    .app_data(
        web::QueryConfig::default()
            .error_handler(|err, _req: &HttpRequest| reject_payload(err, "invalid query string")),
    )
    .service(health::store_health)
    .service(health::ready)
    .service(health::live)
    .service(
        web::scope("/api/v1")
            .service(patients::list_patients)
            .service(patients::get_patient)
            .service(patients::create_patient)
            .service(patients::update_patient)
            .service(patients::delete_patient),
    );
}
