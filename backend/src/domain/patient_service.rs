//! Patient domain service.
//!
//! Implements the patient driving ports on top of a [`PatientRepository`]:
//! validates input, generates identifiers and timestamps, and maps repository
//! failures onto the domain error taxonomy.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use pagination::Page;
use serde_json::json;
use tracing::info;

use crate::domain::ports::{
    PatientRepository, PatientRepositoryError, PatientsCommand, PatientsQuery, StoreHealth,
};
use crate::domain::{
    Error, Patient, PatientDraft, PatientId, PatientInput, PatientListQuery,
    PatientValidationErrors, PetId,
};

fn map_repository_error(error: PatientRepositoryError) -> Error {
    match error {
        PatientRepositoryError::Connection { message } => {
            Error::internal(format!("patient repository unavailable: {message}"))
        }
        PatientRepositoryError::Query { message } => {
            Error::internal(format!("patient repository error: {message}"))
        }
    }
}

fn map_validation_errors(errors: PatientValidationErrors) -> Error {
    let message = errors.to_string();
    Error::invalid_request(message).with_details(json!({ "errors": errors.into_violations() }))
}

fn not_found(id: PatientId) -> Error {
    Error::not_found(format!("patient {id} not found"))
}

/// Service implementing [`PatientsQuery`], [`PatientsCommand`] and
/// [`StoreHealth`].
#[derive(Clone)]
pub struct PatientService<R> {
    repo: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> PatientService<R> {
    /// Create a service over `repo`, reading "now" from `clock`.
    ///
    /// ```
    /// # use std::sync::Arc;
    /// # use mockable::DefaultClock;
    /// use pet_clinic::domain::PatientService;
    /// use pet_clinic::outbound::memory::InMemoryPatientRepository;
    ///
    /// let service = PatientService::new(
    ///     Arc::new(InMemoryPatientRepository::default()),
    ///     Arc::new(DefaultClock),
    /// );
    /// # let _ = service;
    /// ```
    pub fn new(repo: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { repo, clock }
    }
}

impl<R> PatientService<R>
where
    R: PatientRepository,
{
    fn validate(&self, input: &PatientInput) -> Result<PatientDraft, Error> {
        let today = self.clock.utc().date_naive();
        PatientDraft::validate(input, today).map_err(map_validation_errors)
    }
}

#[async_trait]
impl<R> PatientsQuery for PatientService<R>
where
    R: PatientRepository,
{
    async fn list_patients(&self, query: PatientListQuery) -> Result<Page<Patient>, Error> {
        let listing = self
            .repo
            .list(&query)
            .await
            .map_err(map_repository_error)?;
        Ok(Page::new(listing.rows, query.page, listing.total))
    }

    async fn get_patient(&self, id: PatientId) -> Result<Patient, Error> {
        self.repo
            .find_by_id(&id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| not_found(id))
    }
}

#[async_trait]
impl<R> PatientsCommand for PatientService<R>
where
    R: PatientRepository,
{
    async fn create_patient(&self, input: PatientInput) -> Result<Patient, Error> {
        let draft = self.validate(&input)?;
        let patient = Patient::from_draft(
            PatientId::random(),
            PetId::random(),
            &draft,
            self.clock.utc(),
        );
        self.repo
            .create(&patient)
            .await
            .map_err(map_repository_error)?;
        info!(patient_id = %patient.id, pet_id = %patient.pet.id, "patient created");
        Ok(patient)
    }

    async fn update_patient(&self, id: PatientId, input: PatientInput) -> Result<Patient, Error> {
        let draft = self.validate(&input)?;
        let patient = self
            .repo
            .update(&id, &draft, self.clock.utc())
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| not_found(id))?;
        info!(patient_id = %id, "patient updated");
        Ok(patient)
    }

    async fn delete_patient(&self, id: PatientId) -> Result<(), Error> {
        let deleted = self
            .repo
            .delete(&id)
            .await
            .map_err(map_repository_error)?;
        if !deleted {
            return Err(not_found(id));
        }
        info!(patient_id = %id, "patient deleted");
        Ok(())
    }
}

#[async_trait]
impl<R> StoreHealth for PatientService<R>
where
    R: PatientRepository,
{
    async fn check_store(&self) -> Result<(), Error> {
        self.repo.ping().await.map_err(map_repository_error)
    }
}

#[cfg(test)]
#[path = "patient_service_tests.rs"]
mod tests;
