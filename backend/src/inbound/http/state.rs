//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{PatientsCommand, PatientsQuery, StoreHealth};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub patients: Arc<dyn PatientsQuery>,
    pub patient_commands: Arc<dyn PatientsCommand>,
    pub store_health: Arc<dyn StoreHealth>,
}

impl HttpState {
    /// Build state from a single service implementing every patient port.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use mockable::DefaultClock;
    /// use pet_clinic::domain::PatientService;
    /// use pet_clinic::inbound::http::state::HttpState;
    /// use pet_clinic::outbound::memory::InMemoryPatientRepository;
    ///
    /// let service = PatientService::new(
    ///     Arc::new(InMemoryPatientRepository::default()),
    ///     Arc::new(DefaultClock),
    /// );
    /// let state = HttpState::from_service(Arc::new(service));
    /// let _patients = state.patients.clone();
    /// ```
    pub fn from_service<S>(service: Arc<S>) -> Self
    where
        S: PatientsQuery + PatientsCommand + StoreHealth + 'static,
    {
        Self {
            patients: service.clone(),
            patient_commands: service.clone(),
            store_health: service,
        }
    }
}
