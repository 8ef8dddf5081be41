//! Client side of the patients API.
//!
//! `PatientsClient` is a typed reqwest wrapper over the REST endpoints.
//! `PatientFilterState` holds the table's filter and paging state and
//! debounces text input before it changes the effective query.

mod filter_state;
mod params;
mod patients_client;

pub use filter_state::{DEFAULT_DEBOUNCE, PatientFilterState};
pub use params::PatientListParams;
pub use patients_client::{ClientError, PatientsClient};
