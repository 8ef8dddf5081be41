//! Shared helpers for the Diesel patient adapter: error mapping and row
//! conversion.

use tracing::debug;

use crate::domain::ports::PatientRepositoryError;
use crate::domain::{Patient, PatientId, Pet, PetId, PetType};

use super::models::{OwnerRow, PetRow};
use super::pool::PoolError;

/// Map pool errors to repository connection errors.
pub(crate) fn map_pool_error(error: PoolError) -> PatientRepositoryError {
    match error {
        PoolError::Checkout { message } => PatientRepositoryError::connection(message),
    }
}

/// Map Diesel errors to repository errors, logging the underlying cause.
pub(crate) fn map_diesel_error(error: diesel::result::Error) -> PatientRepositoryError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::NotFound => PatientRepositoryError::query("record not found"),
        DieselError::QueryBuilderError(_) => PatientRepositoryError::query("database query error"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            PatientRepositoryError::connection("database connection error")
        }
        DieselError::DatabaseError(DatabaseErrorKind::CheckViolation, _) => {
            PatientRepositoryError::query("check constraint violated")
        }
        _ => PatientRepositoryError::query("database error"),
    }
}

/// Join an owner row and its pet row into the domain aggregate.
pub(crate) fn rows_to_patient(
    owner: OwnerRow,
    pet: PetRow,
) -> Result<Patient, PatientRepositoryError> {
    let pet_type = pet.pet_type.parse::<PetType>().map_err(|err| {
        PatientRepositoryError::query(format!("stored pet {}: {err}", pet.id))
    })?;
    Ok(Patient {
        id: PatientId::from_uuid(owner.id),
        name: owner.name,
        phone: owner.phone,
        pet: Pet {
            id: PetId::from_uuid(pet.id),
            name: pet.name,
            date_of_birth: pet.date_of_birth,
            pet_type,
            created_at: pet.created_at,
            updated_at: pet.updated_at,
        },
        created_at: owner.created_at,
        updated_at: owner.updated_at,
    })
}
