//! Driving port for patient reads.
//!
//! Inbound adapters use this port to run the list query and fetch single
//! patients without depending on repository details.

use async_trait::async_trait;
use pagination::Page;

use crate::domain::{Error, Patient, PatientId, PatientListQuery};

/// Driving port for patient read operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PatientsQuery: Send + Sync {
    /// Filtered, paginated list of joined patients, newest first.
    async fn list_patients(&self, query: PatientListQuery) -> Result<Page<Patient>, Error>;

    /// One patient by owner identifier; `not_found` when absent.
    async fn get_patient(&self, id: PatientId) -> Result<Patient, Error>;
}
