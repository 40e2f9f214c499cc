//! Request-level errors and their HTTP rendering.
//!
//! Every error is sent to the client as a bare JSON string describing the
//! problem. None of them affect other requests or the process.

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};

pub const MALFORMED_BODY_MESSAGE: &str = "Could not unmarshal JSON, invalid request";
pub const NOT_FOUND_MESSAGE: &str = "Could not find object";
pub const ENCODING_MESSAGE: &str = "Error encoding JSON";

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request body was not a JSON record.
    #[error("malformed request body: {0}")]
    MalformedBody(#[source] serde_json::Error),

    /// No record with the requested id.
    #[error("no record with id {0}")]
    NotFound(i64),

    /// The response payload could not be serialized.
    #[error("failed to encode response: {0}")]
    Encoding(#[source] serde_json::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MalformedBody(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Encoding(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> &'static str {
        match self {
            ApiError::MalformedBody(_) => MALFORMED_BODY_MESSAGE,
            ApiError::NotFound(_) => NOT_FOUND_MESSAGE,
            ApiError::Encoding(_) => ENCODING_MESSAGE,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::MalformedBody(err) => tracing::warn!(error = %err, "unable to decode JSON"),
            ApiError::NotFound(id) => tracing::debug!(id, "record not found"),
            ApiError::Encoding(err) => tracing::error!(error = %err, "error encoding JSON"),
        }

        // Encoding a plain &str cannot fail.
        let body = serde_json::to_vec(self.message())
            .unwrap_or_else(|_| format!("\"{}\"", ENCODING_MESSAGE).into_bytes());

        (
            self.status(),
            [(header::CONTENT_TYPE, HeaderValue::from_static("application/json"))],
            body,
        )
            .into_response()
    }
}
