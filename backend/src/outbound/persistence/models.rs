//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain.

use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{owners, pets};

/// Row struct for reading from the owners table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = owners)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct OwnerRow {
    pub id: Uuid,
    pub name: String,
    pub phone: String,
    pub pet_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Row struct for reading from the pets table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = pets)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct PetRow {
    pub id: Uuid,
    pub name: String,
    pub date_of_birth: NaiveDate,
    pub pet_type: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insertable struct for creating owner records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = owners)]
pub(crate) struct NewOwnerRow<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub phone: &'a str,
    pub pet_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insertable struct for creating pet records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = pets)]
pub(crate) struct NewPetRow<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub date_of_birth: NaiveDate,
    pub pet_type: &'a str,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Changeset for overwriting owner fields.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = owners)]
pub(crate) struct OwnerUpdate<'a> {
    pub name: &'a str,
    pub phone: &'a str,
    pub updated_at: DateTime<Utc>,
}

/// Changeset for overwriting pet fields.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = pets)]
pub(crate) struct PetUpdate<'a> {
    pub name: &'a str,
    pub date_of_birth: NaiveDate,
    pub pet_type: &'a str,
    pub updated_at: DateTime<Utc>,
}
