//! Request and response payloads for the patient endpoints.
//!
//! The list query string is decoded into plain optional strings so that
//! malformed paging values fall back to defaults instead of rejecting the
//! request.

use pagination::{Page, PageRequest};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Patient, PatientFilter, PatientInput, PatientListQuery, Pet};

/// Pet half of a patient row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PetBody {
    #[schema(format = "uuid")]
    pub id: String,
    #[schema(example = "Rex")]
    pub name: String,
    #[schema(format = "date", example = "2020-01-01")]
    pub date_of_birth: String,
    #[serde(rename = "type")]
    #[schema(example = "dog")]
    pub pet_type: String,
    #[schema(format = "date-time")]
    pub created_at: String,
    #[schema(format = "date-time")]
    pub updated_at: String,
}

impl From<Pet> for PetBody {
    fn from(value: Pet) -> Self {
        Self {
            id: value.id.to_string(),
            name: value.name,
            date_of_birth: value.date_of_birth.format("%Y-%m-%d").to_string(),
            pet_type: value.pet_type.as_str().to_owned(),
            created_at: value.created_at.to_rfc3339(),
            updated_at: value.updated_at.to_rfc3339(),
        }
    }
}

/// Owner joined with their pet, as returned by every patient endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PatientBody {
    #[schema(format = "uuid")]
    pub id: String,
    #[schema(example = "Alice")]
    pub name: String,
    #[schema(example = "+44 1234567")]
    pub phone: String,
    pub pet: PetBody,
    #[schema(format = "date-time")]
    pub created_at: String,
    #[schema(format = "date-time")]
    pub updated_at: String,
}

impl From<Patient> for PatientBody {
    fn from(value: Patient) -> Self {
        Self {
            id: value.id.to_string(),
            name: value.name,
            phone: value.phone,
            pet: PetBody::from(value.pet),
            created_at: value.created_at.to_rfc3339(),
            updated_at: value.updated_at.to_rfc3339(),
        }
    }
}

/// One page of patient rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PatientPageBody {
    pub data: Vec<PatientBody>,
    #[schema(example = 1)]
    pub page: u32,
    #[schema(example = 3)]
    pub total: u64,
    #[schema(example = 1)]
    pub total_pages: u64,
}

impl From<Page<Patient>> for PatientPageBody {
    fn from(value: Page<Patient>) -> Self {
        let page = value.page();
        let total = value.total();
        let total_pages = value.total_pages();
        Self {
            data: value.into_data().into_iter().map(PatientBody::from).collect(),
            page,
            total,
            total_pages,
        }
    }
}

/// Create and update payload. Missing fields decode as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct PatientRequestBody {
    #[schema(example = "Alice")]
    pub name: String,
    #[schema(example = "+44 1234567")]
    pub phone: String,
    #[schema(example = "Rex")]
    pub pet_name: String,
    #[schema(example = "2020-01-01")]
    pub date_of_birth: String,
    #[schema(example = "dog")]
    pub pet_type: String,
}

impl From<PatientRequestBody> for PatientInput {
    fn from(value: PatientRequestBody) -> Self {
        Self {
            name: value.name,
            phone: value.phone,
            pet_name: value.pet_name,
            date_of_birth: value.date_of_birth,
            pet_type: value.pet_type,
        }
    }
}

impl From<PatientInput> for PatientRequestBody {
    fn from(value: PatientInput) -> Self {
        Self {
            name: value.name,
            phone: value.phone,
            pet_name: value.pet_name,
            date_of_birth: value.date_of_birth,
            pet_type: value.pet_type,
        }
    }
}

pub(crate) const DELETED_MESSAGE: &str = "Patient and pet deleted successfully";

/// Confirmation returned by the delete endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DeleteResponseBody {
    #[schema(example = "Patient and pet deleted successfully")]
    pub message: String,
}

impl DeleteResponseBody {
    pub(crate) fn deleted() -> Self {
        Self {
            message: DELETED_MESSAGE.to_owned(),
        }
    }
}

/// Raw list query string.
///
/// `limit` and `pageSize` both set the page size; `limit` wins when both
/// are present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListPatientsParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pet_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub types: Option<String>,
}

impl ListPatientsParams {
    /// Normalise the raw parameters into a list query.
    ///
    /// Never fails: bad paging values fall back to defaults and unknown pet
    /// types become filters that match nothing.
    pub fn into_query(self) -> PatientListQuery {
        let page = PageRequest::from_query(
            self.page.as_deref(),
            self.limit.as_deref().or(self.page_size.as_deref()),
        );
        let mut filter = PatientFilter::default();
        if let Some(search) = self.search {
            filter = filter.with_search(search);
        }
        if let Some(owner_name) = self.owner_name {
            filter = filter.with_owner_name(owner_name);
        }
        if let Some(pet_name) = self.pet_name {
            filter = filter.with_pet_name(pet_name);
        }
        if let Some(types) = self.types.as_deref() {
            filter = filter.with_pet_types_csv(types);
        }
        PatientListQuery::new(filter, page)
    }
}
