//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! specification for the REST API. It registers:
//!
//! - **Paths**: the patient endpoints and the health checks
//! - **Schemas**: HTTP DTOs plus domain type wrappers ([`ErrorSchema`],
//!   [`ErrorCodeSchema`], [`FieldViolationSchema`]) that provide OpenAPI
//!   definitions without coupling domain types to the utoipa framework
//!
//! The generated specification is used by Swagger UI (debug builds) and
//! exported via `cargo run --bin openapi-dump` for external tooling.

use crate::inbound::http::health::StoreHealthBody;
use crate::inbound::http::patients_dto::{
    DeleteResponseBody, PatientBody, PatientPageBody, PatientRequestBody, PetBody,
};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema, FieldViolationSchema};
use utoipa::OpenApi;

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Pet clinic API",
        description = "Create, search, update and delete pet clinic patients (an owner with their pet)."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::patients::list_patients,
        crate::inbound::http::patients::get_patient,
        crate::inbound::http::patients::create_patient,
        crate::inbound::http::patients::update_patient,
        crate::inbound::http::patients::delete_patient,
        crate::inbound::http::health::store_health,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        PatientBody,
        PetBody,
        PatientPageBody,
        PatientRequestBody,
        DeleteResponseBody,
        StoreHealthBody,
        ErrorSchema,
        ErrorCodeSchema,
        FieldViolationSchema
    )),
    tags(
        (name = "patients", description = "Owners and their pets"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
