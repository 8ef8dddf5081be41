//! Driven port for patient persistence.
//!
//! Adapters store the owner and pet halves of a patient however they like but
//! must honour the query contract: one predicate shared by the count and the
//! page, rows ordered by `created_at` descending then id ascending.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{Patient, PatientDraft, PatientId, PatientListQuery};

use super::define_port_error;

define_port_error! {
    /// Errors raised by patient repository adapters.
    pub enum PatientRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "patient repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "patient repository query failed: {message}",
    }
}

/// One page of joined rows plus the unpaginated match count.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatientListing {
    pub rows: Vec<Patient>,
    pub total: u64,
}

/// Port for reading and writing patients.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PatientRepository: Send + Sync {
    /// Run a filtered, paginated read over the joined owners and pets.
    async fn list(&self, query: &PatientListQuery)
    -> Result<PatientListing, PatientRepositoryError>;

    /// Find one patient by owner identifier.
    async fn find_by_id(&self, id: &PatientId) -> Result<Option<Patient>, PatientRepositoryError>;

    /// Persist both halves of a new patient atomically.
    async fn create(&self, patient: &Patient) -> Result<(), PatientRepositoryError>;

    /// Overwrite owner and pet fields; `None` when the owner does not exist.
    async fn update(
        &self,
        id: &PatientId,
        draft: &PatientDraft,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<Patient>, PatientRepositoryError>;

    /// Delete the pet then the owner; `false` when the owner does not exist.
    async fn delete(&self, id: &PatientId) -> Result<bool, PatientRepositoryError>;

    /// Trivial round-trip proving the store is reachable.
    async fn ping(&self) -> Result<(), PatientRepositoryError>;
}
