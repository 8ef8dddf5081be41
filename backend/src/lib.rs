//! Pet clinic backend library.
//!
//! A hexagonal layout: `domain` holds the patient aggregate, validation, the
//! list query model and the ports; `inbound` adapts HTTP onto the driving
//! ports; `outbound` implements the repository port over PostgreSQL or
//! memory; `client` talks to the API from the other side.

pub mod client;
pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
