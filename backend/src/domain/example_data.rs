//! Example data seeding.
//!
//! Seeds the three demonstration patients into an empty store so a fresh
//! deployment has something to list, search and filter.

use std::sync::Arc;

use chrono::Duration;
use mockable::Clock;
use thiserror::Error;
use tracing::info;

use crate::domain::ports::{PatientRepository, PatientRepositoryError};
use crate::domain::{
    Patient, PatientDraft, PatientId, PatientInput, PatientListQuery, PatientValidationErrors,
    PetId,
};

const EXAMPLE_PATIENTS: [(&str, &str, &str, &str, &str); 3] = [
    ("Alice", "+44 1234567", "Rex", "2020-01-01", "dog"),
    ("Bob", "+44 7654321", "Mia", "2021-06-15", "cat"),
    ("Alice Two", "+44 1112223", "Rex Two", "2019-03-10", "parrot"),
];

/// Raw inputs for the demonstration patients, oldest first.
#[must_use]
pub fn example_patient_inputs() -> Vec<PatientInput> {
    EXAMPLE_PATIENTS
        .iter()
        .map(|(name, phone, pet_name, date_of_birth, pet_type)| PatientInput {
            name: (*name).to_owned(),
            phone: (*phone).to_owned(),
            pet_name: (*pet_name).to_owned(),
            date_of_birth: (*date_of_birth).to_owned(),
            pet_type: (*pet_type).to_owned(),
        })
        .collect()
}

/// Result of attempting to seed example data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExampleDataSeedOutcome {
    /// The store was empty and `count` patients were written.
    Seeded { count: usize },
    /// The store already held `existing` patients; nothing was written.
    AlreadyPopulated { existing: u64 },
}

/// Errors raised while seeding example data.
#[derive(Debug, Error)]
pub enum ExampleDataSeedingError {
    /// A demonstration record failed validation.
    #[error("example patient failed validation: {0}")]
    Validation(#[from] PatientValidationErrors),
    /// Persistence adapter failed while seeding.
    #[error("example data persistence error: {0}")]
    Persistence(#[from] PatientRepositoryError),
}

/// Service that seeds demonstration patients into an empty store.
#[derive(Clone)]
pub struct ExampleDataSeeder<R> {
    repository: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> ExampleDataSeeder<R>
where
    R: PatientRepository,
{
    /// Create a seeder writing through `repository`.
    pub fn new(repository: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    /// Seed the demonstration patients unless the store already holds data.
    ///
    /// Creation timestamps are one second apart so the listing order is
    /// deterministic: the last example is the newest.
    ///
    /// # Errors
    ///
    /// Returns [`ExampleDataSeedingError`] when validation or persistence
    /// fails.
    pub async fn seed_if_empty(&self) -> Result<ExampleDataSeedOutcome, ExampleDataSeedingError> {
        let existing = self
            .repository
            .list(&PatientListQuery::default())
            .await?
            .total;
        if existing > 0 {
            info!(existing, "example data seeding skipped; store not empty");
            return Ok(ExampleDataSeedOutcome::AlreadyPopulated { existing });
        }

        let now = self.clock.utc();
        let today = now.date_naive();
        let inputs = example_patient_inputs();
        let count = inputs.len();
        let mut created_at = now - Duration::seconds(i64::try_from(count).unwrap_or_default());
        for input in &inputs {
            let draft = PatientDraft::validate(input, today)?;
            created_at += Duration::seconds(1);
            let patient =
                Patient::from_draft(PatientId::random(), PetId::random(), &draft, created_at);
            self.repository.create(&patient).await?;
        }
        info!(count, "example data seeded");
        Ok(ExampleDataSeedOutcome::Seeded { count })
    }
}
