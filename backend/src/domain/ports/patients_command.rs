//! Driving port for patient mutations.

use async_trait::async_trait;

use crate::domain::{Error, Patient, PatientId, PatientInput};

/// Driving port for creating, updating and deleting patients.
///
/// Inputs arrive unvalidated; implementations validate them and report every
/// violation as an `invalid_request` error.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PatientsCommand: Send + Sync {
    /// Validate and persist a new owner with its pet.
    async fn create_patient(&self, input: PatientInput) -> Result<Patient, Error>;

    /// Validate and overwrite an existing patient.
    async fn update_patient(&self, id: PatientId, input: PatientInput) -> Result<Patient, Error>;

    /// Remove a patient together with its pet.
    async fn delete_patient(&self, id: PatientId) -> Result<(), Error>;
}
