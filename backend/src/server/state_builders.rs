//! Builders for the HTTP state: picks the repository adapter and seeds
//! example data when asked to.

use std::sync::Arc;

use mockable::DefaultClock;
use tracing::info;

use pet_clinic::domain::ports::PatientRepository;
use pet_clinic::domain::{
    ExampleDataSeedOutcome, ExampleDataSeeder, ExampleDataSeedingError, PatientService,
};
use pet_clinic::inbound::http::state::HttpState;
use pet_clinic::outbound::memory::InMemoryPatientRepository;
use pet_clinic::outbound::persistence::DieselPatientRepository;

use super::ServerConfig;

async fn seed<R>(repo: &Arc<R>) -> Result<(), ExampleDataSeedingError>
where
    R: PatientRepository + 'static,
{
    let seeder = ExampleDataSeeder::new(repo.clone(), Arc::new(DefaultClock));
    match seeder.seed_if_empty().await? {
        ExampleDataSeedOutcome::Seeded { count } => {
            info!(count, "example patients seeded");
        }
        ExampleDataSeedOutcome::AlreadyPopulated { existing } => {
            info!(existing, "store already populated; example data skipped");
        }
    }
    Ok(())
}

async fn assemble<R>(repo: R, seed_example_data: bool) -> Result<HttpState, ExampleDataSeedingError>
where
    R: PatientRepository + 'static,
{
    let repo = Arc::new(repo);
    if seed_example_data {
        seed(&repo).await?;
    }
    let service = PatientService::new(repo, Arc::new(DefaultClock));
    Ok(HttpState::from_service(Arc::new(service)))
}

/// Build the HTTP state over PostgreSQL when a pool is configured, otherwise
/// over the in-memory store.
///
/// # Errors
///
/// Returns [`ExampleDataSeedingError`] when seeding was requested and failed.
pub async fn build_http_state(config: &ServerConfig) -> Result<HttpState, ExampleDataSeedingError> {
    match &config.db_pool {
        Some(pool) => {
            info!(store = "postgres", "patient store selected");
            assemble(DieselPatientRepository::new(pool.clone()), config.seed_example_data).await
        }
        None => {
            info!(store = "memory", "patient store selected");
            assemble(InMemoryPatientRepository::default(), config.seed_example_data).await
        }
    }
}

#[cfg(test)]
mod tests {
    use pet_clinic::domain::PatientListQuery;
    use pet_clinic::domain::ports::PatientsQuery;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(false, 0)]
    #[case(true, 3)]
    #[tokio::test]
    async fn memory_store_is_seeded_on_request(#[case] seed: bool, #[case] expected: u64) {
        let config = ServerConfig::new("127.0.0.1:0".parse().expect("valid address"))
            .with_example_data(seed);

        let state = build_http_state(&config).await.expect("state builds");
        let page = state
            .patients
            .list_patients(PatientListQuery::default())
            .await
            .expect("list succeeds");
        assert_eq!(page.total(), expected);
    }
}
