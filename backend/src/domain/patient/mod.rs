//! Patient aggregate: an owner record joined with its single pet record.
//!
//! The store keeps owners and pets as two related records. Reads always
//! return them joined as a [`Patient`]; writes always go through a validated
//! [`PatientDraft`] so both halves are created, updated and deleted together.

mod validation;

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

pub use validation::{
    DateOfBirth, FieldViolation, OwnerName, PatientDraft, PatientField, PatientInput,
    PatientValidationErrors, PetName, Phone, ViolationCode,
};

macro_rules! uuid_identifier {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(Uuid);

        impl $name {
            /// Generate a new random identifier.
            #[must_use]
            pub fn random() -> Self {
                Self(Uuid::new_v4())
            }

            /// Wrap an existing UUID.
            #[must_use]
            pub const fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Access the underlying UUID.
            #[must_use]
            pub const fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(&self.0, f)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Uuid::parse_str(s).map(Self)
            }
        }
    };
}

uuid_identifier!(
    /// Server-generated identifier of an owner record. Patients are addressed
    /// by their owner identifier.
    PatientId
);

uuid_identifier!(
    /// Server-generated identifier of a pet record.
    PetId
);

/// Closed set of species the clinic treats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PetType {
    /// Dogs.
    Dog,
    /// Cats.
    Cat,
    /// Parrots.
    Parrot,
}

/// Raised when a string does not name a [`PetType`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown pet type: {0}")]
pub struct UnknownPetType(pub String);

impl PetType {
    /// Every variant, in display order.
    pub const ALL: [Self; 3] = [Self::Dog, Self::Cat, Self::Parrot];

    /// Canonical lower-case token stored and exchanged on the wire.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Dog => "dog",
            Self::Cat => "cat",
            Self::Parrot => "parrot",
        }
    }
}

impl fmt::Display for PetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PetType {
    type Err = UnknownPetType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| UnknownPetType(s.to_owned()))
    }
}

/// Pet half of a patient.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pet {
    pub id: PetId,
    pub name: String,
    pub date_of_birth: NaiveDate,
    pub pet_type: PetType,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Owner record joined with its pet; the row shape returned by every read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Patient {
    pub id: PatientId,
    pub name: String,
    pub phone: String,
    pub pet: Pet,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Patient {
    /// Materialise a freshly created patient from its draft.
    #[must_use]
    pub fn from_draft(
        id: PatientId,
        pet_id: PetId,
        draft: &PatientDraft,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name: draft.name.as_ref().to_owned(),
            phone: draft.phone.as_ref().to_owned(),
            pet: Pet {
                id: pet_id,
                name: draft.pet_name.as_ref().to_owned(),
                date_of_birth: draft.date_of_birth.date(),
                pet_type: draft.pet_type,
                created_at: now,
                updated_at: now,
            },
            created_at: now,
            updated_at: now,
        }
    }

    /// Overwrite owner and pet fields from `draft`, keeping identities and
    /// creation timestamps.
    pub fn apply(&mut self, draft: &PatientDraft, now: DateTime<Utc>) {
        self.name = draft.name.as_ref().to_owned();
        self.phone = draft.phone.as_ref().to_owned();
        self.updated_at = now;
        self.pet.name = draft.pet_name.as_ref().to_owned();
        self.pet.date_of_birth = draft.date_of_birth.date();
        self.pet.pet_type = draft.pet_type;
        self.pet.updated_at = now;
    }
}
