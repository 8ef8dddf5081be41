//! Test utilities for the backend crate.
//!
//! Shared by unit tests (in `src/`) and integration tests (in `tests/`).
//! Compiled for tests and when the `test-support` feature is enabled.

use std::sync::Arc;

use chrono::{DateTime, Duration, Local, NaiveDate, TimeZone, Utc};
use mockable::Clock;

use crate::domain::{Patient, PatientId, PatientService, Pet, PetId, PetType};
use crate::inbound::http::state::HttpState;
use crate::outbound::memory::InMemoryPatientRepository;

/// Clock frozen at a single instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(DateTime<Utc>);

impl FixedClock {
    /// Freeze the clock at `now`.
    pub const fn new(now: DateTime<Utc>) -> Self {
        Self(now)
    }
}

impl Default for FixedClock {
    fn default() -> Self {
        Self(fixed_now())
    }
}

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

/// The instant [`FixedClock::default`] reports: 2024-06-15T09:30:00Z.
pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 15, 9, 30, 0)
        .single()
        .unwrap_or_default()
}

/// Build a stored patient directly, bypassing input validation.
///
/// `age_rank` staggers `created_at` backwards from [`fixed_now`] by whole
/// seconds, so a higher rank sorts later in the newest-first listing.
pub fn stored_patient(owner: &str, pet: &str, pet_type: PetType, age_rank: i64) -> Patient {
    let created_at = fixed_now() - Duration::seconds(age_rank);
    Patient {
        id: PatientId::random(),
        name: owner.to_owned(),
        phone: "+44 1234567".to_owned(),
        pet: Pet {
            id: PetId::random(),
            name: pet.to_owned(),
            date_of_birth: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap_or_default(),
            pet_type,
            created_at,
            updated_at: created_at,
        },
        created_at,
        updated_at: created_at,
    }
}

/// HTTP state backed by an in-memory repository and a [`FixedClock`].
pub fn in_memory_state(repo: Arc<InMemoryPatientRepository>) -> HttpState {
    let service = PatientService::new(repo, Arc::new(FixedClock::default()));
    HttpState::from_service(Arc::new(service))
}
