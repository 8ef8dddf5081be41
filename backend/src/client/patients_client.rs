//! Reqwest-backed client for the patients API.
//!
//! Owns transport details only: URL building, JSON encoding and mapping of
//! non-success statuses onto [`ClientError`].

use std::time::Duration;

use reqwest::{Client, Method, StatusCode, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

use super::PatientListParams;
use crate::domain::{Error, ErrorCode, PatientId, PatientInput};
use crate::inbound::http::patients_dto::{
    DeleteResponseBody, PatientBody, PatientPageBody, PatientRequestBody,
};

/// Failures surfaced by [`PatientsClient`].
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request never produced a response.
    #[error("transport failure: {message}")]
    Transport { message: String },
    /// The server answered with a non-success status.
    #[error("server returned {status}: {}", .error.message())]
    Api { status: u16, error: Error },
    /// A success response could not be decoded.
    #[error("undecodable response: {message}")]
    Decode { message: String },
    /// The endpoint URL could not be built.
    #[error("invalid URL: {message}")]
    Url { message: String },
}

impl ClientError {
    /// The decoded error envelope, for [`ClientError::Api`].
    pub fn api_error(&self) -> Option<&Error> {
        match self {
            Self::Api { error, .. } => Some(error),
            _ => None,
        }
    }
}

/// Typed client for `/api/v1/patients`.
#[derive(Debug, Clone)]
pub struct PatientsClient {
    client: Client,
    base: Url,
}

impl PatientsClient {
    /// Build a client for the server at `base` (for example
    /// `http://localhost:8080/`) with a per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(base: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, base })
    }

    /// Fetch one page of patients.
    pub async fn list(&self, params: &PatientListParams) -> Result<PatientPageBody, ClientError> {
        let url = self.endpoint(None)?;
        let request = self.client.get(url).query(&params.query_pairs());
        send(request).await
    }

    /// Fetch one patient.
    pub async fn get(&self, id: PatientId) -> Result<PatientBody, ClientError> {
        self.call::<(), _>(Method::GET, Some(id), None).await
    }

    /// Create a patient.
    pub async fn create(&self, input: &PatientInput) -> Result<PatientBody, ClientError> {
        let body = PatientRequestBody::from(input.clone());
        self.call(Method::POST, None, Some(&body)).await
    }

    /// Replace a patient's fields.
    pub async fn update(
        &self,
        id: PatientId,
        input: &PatientInput,
    ) -> Result<PatientBody, ClientError> {
        let body = PatientRequestBody::from(input.clone());
        self.call(Method::PUT, Some(id), Some(&body)).await
    }

    /// Delete a patient and their pet, returning the confirmation message.
    pub async fn delete(&self, id: PatientId) -> Result<String, ClientError> {
        let response: DeleteResponseBody =
            self.call::<(), _>(Method::DELETE, Some(id), None).await?;
        Ok(response.message)
    }

    async fn call<B, T>(
        &self,
        method: Method,
        id: Option<PatientId>,
        body: Option<&B>,
    ) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.endpoint(id)?;
        let mut request = self.client.request(method, url);
        if let Some(body) = body {
            request = request.json(body);
        }
        send(request).await
    }

    fn endpoint(&self, id: Option<PatientId>) -> Result<Url, ClientError> {
        let path = match id {
            Some(id) => format!("api/v1/patients/{id}"),
            None => "api/v1/patients".to_owned(),
        };
        self.base.join(&path).map_err(|error| ClientError::Url {
            message: error.to_string(),
        })
    }
}

async fn send<T: DeserializeOwned>(request: reqwest::RequestBuilder) -> Result<T, ClientError> {
    let response = request.send().await.map_err(map_transport_error)?;
    let status = response.status();
    let body = response.bytes().await.map_err(map_transport_error)?;
    if !status.is_success() {
        return Err(map_status_error(status, body.as_ref()));
    }
    serde_json::from_slice(body.as_ref()).map_err(|error| ClientError::Decode {
        message: error.to_string(),
    })
}

fn map_transport_error(error: reqwest::Error) -> ClientError {
    ClientError::Transport {
        message: error.to_string(),
    }
}

fn fallback_code(status: StatusCode) -> ErrorCode {
    match status {
        StatusCode::NOT_FOUND => ErrorCode::NotFound,
        _ if status.is_client_error() => ErrorCode::InvalidRequest,
        _ => ErrorCode::InternalError,
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> ClientError {
    let error = serde_json::from_slice::<Error>(body).unwrap_or_else(|_| {
        let preview = String::from_utf8_lossy(body);
        let message = if preview.trim().is_empty() {
            format!("status {}", status.as_u16())
        } else {
            format!("status {}: {}", status.as_u16(), preview.trim())
        };
        Error::new(fallback_code(status), message)
    });
    ClientError::Api {
        status: status.as_u16(),
        error,
    }
}
