//! Backend entry-point: loads settings, prepares the patient store and
//! serves the REST API.

mod server;

use actix_web::web;
use color_eyre::eyre::{Result, WrapErr, eyre};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use pet_clinic::inbound::http::health::HealthState;
use pet_clinic::outbound::persistence::{DbPool, run_pending_migrations};
use server::{AppSettings, ServerConfig, build_http_state, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings =
        AppSettings::load().map_err(|err| eyre!("failed to load configuration: {err}"))?;
    let bind_addr = settings
        .bind_addr()
        .wrap_err("invalid PET_CLINIC_BIND_ADDR")?;

    let mut config = ServerConfig::new(bind_addr).with_example_data(settings.seed_example_data);
    match settings.database_url() {
        Some(url) => {
            if settings.run_migrations() {
                let applied = run_pending_migrations(url)
                    .await
                    .wrap_err("applying database migrations")?;
                info!(applied, "migrations complete");
            }
            config = config.with_db_pool(DbPool::new(&settings.pool_config(url)));
        }
        None => {
            warn!("no database URL configured; patients are kept in memory");
        }
    }

    let http_state = build_http_state(&config)
        .await
        .wrap_err("preparing the patient store")?;
    let health_state = web::Data::new(HealthState::new());
    info!(%bind_addr, "starting pet clinic server");
    create_server(health_state, http_state, config)?.await?;
    Ok(())
}
