//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driving ports (`PatientsQuery`, `PatientsCommand`, `StoreHealth`) are what
//! inbound adapters call. The driven port (`PatientRepository`) is what
//! storage adapters implement.

mod macros;
pub(crate) use macros::define_port_error;

mod patient_repository;
mod patients_command;
mod patients_query;
mod store_health;

#[cfg(test)]
pub use patient_repository::MockPatientRepository;
pub use patient_repository::{PatientListing, PatientRepository, PatientRepositoryError};
#[cfg(test)]
pub use patients_command::MockPatientsCommand;
pub use patients_command::PatientsCommand;
#[cfg(test)]
pub use patients_query::MockPatientsQuery;
pub use patients_query::PatientsQuery;
#[cfg(test)]
pub use store_health::MockStoreHealth;
pub use store_health::StoreHealth;
