//! Patient HTTP handlers.
//!
//! ```text
//! GET    /api/v1/patients?page&limit&pageSize&search&ownerName&petName&types
//! GET    /api/v1/patients/{id}
//! POST   /api/v1/patients
//! PUT    /api/v1/patients/{id}
//! DELETE /api/v1/patients/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};

use crate::domain::PatientInput;
use crate::inbound::http::ApiResult;
use crate::inbound::http::patients_dto::{
    DeleteResponseBody, ListPatientsParams, PatientBody, PatientPageBody, PatientRequestBody,
};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_patient_id};

const ID_FIELD: FieldName = FieldName::new("id");

/// List patients matching the filters, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/patients",
    params(
        ("page" = Option<u32>, Query, description = "One-based page number, default 1"),
        ("limit" = Option<u32>, Query, description = "Page size, default 10, max 100"),
        ("pageSize" = Option<u32>, Query, description = "Alias for limit"),
        ("search" = Option<String>, Query, description = "Case-insensitive text matched against owner name and pet name"),
        ("ownerName" = Option<String>, Query, description = "Case-insensitive owner name fragment"),
        ("petName" = Option<String>, Query, description = "Case-insensitive pet name fragment"),
        ("types" = Option<String>, Query, description = "Comma-separated pet types, e.g. dog,parrot")
    ),
    responses(
        (status = 200, description = "Page of patients", body = PatientPageBody),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["patients"],
    operation_id = "listPatients"
)]
#[get("/patients")]
pub async fn list_patients(
    state: web::Data<HttpState>,
    query: web::Query<ListPatientsParams>,
) -> ApiResult<web::Json<PatientPageBody>> {
    let page = state
        .patients
        .list_patients(query.into_inner().into_query())
        .await?;
    Ok(web::Json(PatientPageBody::from(page)))
}

/// Fetch one patient by owner identifier.
#[utoipa::path(
    get,
    path = "/api/v1/patients/{id}",
    params(("id" = String, Path, description = "Owner identifier (UUID)")),
    responses(
        (status = 200, description = "Patient", body = PatientBody),
        (status = 400, description = "Invalid identifier", body = ErrorSchema),
        (status = 404, description = "Patient not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["patients"],
    operation_id = "getPatient"
)]
#[get("/patients/{id}")]
pub async fn get_patient(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<PatientBody>> {
    let id = parse_patient_id(&path.into_inner(), ID_FIELD)?;
    let patient = state.patients.get_patient(id).await?;
    Ok(web::Json(PatientBody::from(patient)))
}

/// Create an owner and their pet.
#[utoipa::path(
    post,
    path = "/api/v1/patients",
    request_body = PatientRequestBody,
    responses(
        (status = 201, description = "Patient created", body = PatientBody),
        (status = 400, description = "Validation failed", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["patients"],
    operation_id = "createPatient"
)]
#[post("/patients")]
pub async fn create_patient(
    state: web::Data<HttpState>,
    payload: web::Json<PatientRequestBody>,
) -> ApiResult<HttpResponse> {
    let input = PatientInput::from(payload.into_inner());
    let patient = state.patient_commands.create_patient(input).await?;
    Ok(HttpResponse::Created().json(PatientBody::from(patient)))
}

/// Replace the owner and pet fields of an existing patient.
#[utoipa::path(
    put,
    path = "/api/v1/patients/{id}",
    params(("id" = String, Path, description = "Owner identifier (UUID)")),
    request_body = PatientRequestBody,
    responses(
        (status = 200, description = "Patient updated", body = PatientBody),
        (status = 400, description = "Validation failed", body = ErrorSchema),
        (status = 404, description = "Patient not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["patients"],
    operation_id = "updatePatient"
)]
#[put("/patients/{id}")]
pub async fn update_patient(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<PatientRequestBody>,
) -> ApiResult<web::Json<PatientBody>> {
    let id = parse_patient_id(&path.into_inner(), ID_FIELD)?;
    let input = PatientInput::from(payload.into_inner());
    let patient = state.patient_commands.update_patient(id, input).await?;
    Ok(web::Json(PatientBody::from(patient)))
}

/// Delete a patient's pet and then the owner.
#[utoipa::path(
    delete,
    path = "/api/v1/patients/{id}",
    params(("id" = String, Path, description = "Owner identifier (UUID)")),
    responses(
        (status = 200, description = "Patient deleted", body = DeleteResponseBody),
        (status = 400, description = "Invalid identifier", body = ErrorSchema),
        (status = 404, description = "Patient not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["patients"],
    operation_id = "deletePatient"
)]
#[delete("/patients/{id}")]
pub async fn delete_patient(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<DeleteResponseBody>> {
    let id = parse_patient_id(&path.into_inner(), ID_FIELD)?;
    state.patient_commands.delete_patient(id).await?;
    Ok(web::Json(DeleteResponseBody::deleted()))
}

#[cfg(test)]
#[path = "patients_tests.rs"]
mod tests;
