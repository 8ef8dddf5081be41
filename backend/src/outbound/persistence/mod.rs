//! PostgreSQL persistence adapter using Diesel ORM.
//!
//! Implements the patient repository port on top of PostgreSQL via Diesel
//! with async support through `diesel-async` and `bb8` connection pooling.
//!
//! - **Thin adapter**: the repository only translates between Diesel rows
//!   and domain types; validation and identifiers belong to the domain.
//! - **Internal models**: row structs (`models.rs`) and schema definitions
//!   (`schema.rs`) never leave this module.
//! - **Strongly typed errors**: pool and Diesel failures are mapped onto
//!   `PatientRepositoryError` variants.
//!
//! # Example
//!
//! ```no_run
//! use pet_clinic::outbound::persistence::{DbPool, DieselPatientRepository, PoolConfig};
//!
//! let pool = DbPool::new(&PoolConfig::new("postgres://localhost/clinic"));
//! let repo = DieselPatientRepository::new(pool);
//! # let _ = repo;
//! ```

mod diesel_helpers;
mod diesel_patient_repository;
mod migrations;
mod models;
mod patient_filter;
mod pool;
mod schema;

pub use diesel_patient_repository::DieselPatientRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
