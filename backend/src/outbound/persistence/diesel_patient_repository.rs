//! PostgreSQL-backed `PatientRepository` implementation using Diesel ORM.
//!
//! Owners and pets live in separate tables joined by `owners.pet_id`. Reads
//! run the count and the page inside one repeatable-read transaction so both
//! observe the same snapshot. Creates insert the pet then the owner in one
//! transaction; deletes remove the pet then the owner.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::AsyncConnection as _;
use diesel_async::scoped_futures::ScopedFutureExt as _;
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use uuid::Uuid;

use crate::domain::ports::{PatientListing, PatientRepository, PatientRepositoryError};
use crate::domain::{Patient, PatientDraft, PatientId, PatientListQuery};

use super::diesel_helpers::{map_diesel_error, map_pool_error, rows_to_patient};
use super::models::{NewOwnerRow, NewPetRow, OwnerRow, OwnerUpdate, PetRow, PetUpdate};
use super::patient_filter::patient_predicate;
use super::pool::DbPool;
use super::schema::{owners, pets};

/// Diesel-backed implementation of the patient repository port.
#[derive(Clone)]
pub struct DieselPatientRepository {
    pool: DbPool,
}

impl DieselPatientRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn to_i64(value: u64, what: &str) -> Result<i64, PatientRepositoryError> {
    i64::try_from(value)
        .map_err(|_| PatientRepositoryError::query(format!("{what} exceeds i64 range")))
}

async fn load_joined(
    conn: &mut AsyncPgConnection,
    id: Uuid,
) -> Result<Option<(OwnerRow, PetRow)>, diesel::result::Error> {
    owners::table
        .inner_join(pets::table)
        .filter(owners::id.eq(id))
        .select((OwnerRow::as_select(), PetRow::as_select()))
        .first(conn)
        .await
        .optional()
}

#[async_trait]
impl PatientRepository for DieselPatientRepository {
    async fn list(
        &self,
        query: &PatientListQuery,
    ) -> Result<PatientListing, PatientRepositoryError> {
        let limit = to_i64(query.page.limit(), "page size")?;
        let offset = to_i64(query.page.offset(), "page offset")?;
        let filter = &query.filter;
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let (total, rows) = conn
            .build_transaction()
            .read_only()
            .repeatable_read()
            .run(|conn| {
                async move {
                    let total: i64 = owners::table
                        .inner_join(pets::table)
                        .select(diesel::dsl::count_star())
                        .into_boxed()
                        .filter(patient_predicate(filter))
                        .get_result(conn)
                        .await?;
                    let rows: Vec<(OwnerRow, PetRow)> = owners::table
                        .inner_join(pets::table)
                        .select((OwnerRow::as_select(), PetRow::as_select()))
                        .into_boxed()
                        .filter(patient_predicate(filter))
                        .order((owners::created_at.desc(), owners::id.asc()))
                        .limit(limit)
                        .offset(offset)
                        .load(conn)
                        .await?;
                    Ok::<_, diesel::result::Error>((total, rows))
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        let rows = rows
            .into_iter()
            .map(|(owner, pet)| rows_to_patient(owner, pet))
            .collect::<Result<Vec<_>, _>>()?;
        let total = u64::try_from(total)
            .map_err(|_| PatientRepositoryError::query("negative row count"))?;
        Ok(PatientListing { rows, total })
    }

    async fn find_by_id(&self, id: &PatientId) -> Result<Option<Patient>, PatientRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        load_joined(&mut conn, *id.as_uuid())
            .await
            .map_err(map_diesel_error)?
            .map(|(owner, pet)| rows_to_patient(owner, pet))
            .transpose()
    }

    async fn create(&self, patient: &Patient) -> Result<(), PatientRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let new_pet = NewPetRow {
            id: *patient.pet.id.as_uuid(),
            name: &patient.pet.name,
            date_of_birth: patient.pet.date_of_birth,
            pet_type: patient.pet.pet_type.as_str(),
            created_at: patient.pet.created_at,
            updated_at: patient.pet.updated_at,
        };
        let new_owner = NewOwnerRow {
            id: *patient.id.as_uuid(),
            name: &patient.name,
            phone: &patient.phone,
            pet_id: *patient.pet.id.as_uuid(),
            created_at: patient.created_at,
            updated_at: patient.updated_at,
        };

        conn.transaction(|conn| {
            async move {
                diesel::insert_into(pets::table)
                    .values(&new_pet)
                    .execute(conn)
                    .await?;
                diesel::insert_into(owners::table)
                    .values(&new_owner)
                    .execute(conn)
                    .await?;
                Ok::<_, diesel::result::Error>(())
            }
            .scope_boxed()
        })
        .await
        .map_err(map_diesel_error)
    }

    async fn update(
        &self,
        id: &PatientId,
        draft: &PatientDraft,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<Patient>, PatientRepositoryError> {
        let owner_id = *id.as_uuid();
        let owner_changes = OwnerUpdate {
            name: draft.name.as_ref(),
            phone: draft.phone.as_ref(),
            updated_at,
        };
        let pet_changes = PetUpdate {
            name: draft.pet_name.as_ref(),
            date_of_birth: draft.date_of_birth.date(),
            pet_type: draft.pet_type.as_str(),
            updated_at,
        };
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let joined = conn
            .transaction(|conn| {
                async move {
                    let pet_id: Option<Uuid> = owners::table
                        .filter(owners::id.eq(owner_id))
                        .select(owners::pet_id)
                        .first(conn)
                        .await
                        .optional()?;
                    let Some(pet_id) = pet_id else {
                        return Ok(None);
                    };
                    diesel::update(owners::table.filter(owners::id.eq(owner_id)))
                        .set(&owner_changes)
                        .execute(conn)
                        .await?;
                    diesel::update(pets::table.filter(pets::id.eq(pet_id)))
                        .set(&pet_changes)
                        .execute(conn)
                        .await?;
                    load_joined(conn, owner_id).await
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        joined
            .map(|(owner, pet)| rows_to_patient(owner, pet))
            .transpose()
    }

    async fn delete(&self, id: &PatientId) -> Result<bool, PatientRepositoryError> {
        let owner_id = *id.as_uuid();
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        conn.transaction(|conn| {
            async move {
                let pet_id: Option<Uuid> = owners::table
                    .filter(owners::id.eq(owner_id))
                    .select(owners::pet_id)
                    .first(conn)
                    .await
                    .optional()?;
                let Some(pet_id) = pet_id else {
                    return Ok(false);
                };
                diesel::delete(pets::table.filter(pets::id.eq(pet_id)))
                    .execute(conn)
                    .await?;
                // The foreign key cascade normally removed the owner already.
                diesel::delete(owners::table.filter(owners::id.eq(owner_id)))
                    .execute(conn)
                    .await?;
                Ok::<_, diesel::result::Error>(true)
            }
            .scope_boxed()
        })
        .await
        .map_err(map_diesel_error)
    }

    async fn ping(&self) -> Result<(), PatientRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::sql_query("SELECT 1")
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }
}
