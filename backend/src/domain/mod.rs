//! Domain primitives, aggregates and services.
//!
//! Purpose: define the patient aggregate, its validation rules and the list
//! query model, plus the ports through which adapters drive and are driven by
//! the domain. Nothing in here knows about HTTP or SQL.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic error payload.
//! - Patient, Pet, PatientDraft, PatientInput: the aggregate and its input.
//! - PatientFilter, PatientListQuery: the list query model.
//! - PatientService: implementation of the patient driving ports.

pub mod error;
pub mod example_data;
pub mod patient;
pub mod patient_query;
pub mod patient_service;
pub mod ports;
pub mod trace_id;

pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::example_data::{
    ExampleDataSeedOutcome, ExampleDataSeeder, ExampleDataSeedingError, example_patient_inputs,
};
pub use self::patient::{
    DateOfBirth, FieldViolation, OwnerName, Patient, PatientDraft, PatientField, PatientId,
    PatientInput, PatientValidationErrors, Pet, PetId, PetName, PetType, Phone, UnknownPetType,
    ViolationCode,
};
pub use self::patient_query::{PatientFilter, PatientListQuery, PetTypeFilter};
pub use self::patient_service::PatientService;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use pet_clinic::domain::{ApiResult, Error};
///
/// fn lookup() -> ApiResult<()> {
///     Err(Error::not_found("patient not found"))
/// }
/// assert!(lookup().is_err());
/// ```
pub type ApiResult<T> = Result<T, Error>;
