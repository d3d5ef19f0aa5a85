use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Error taxonomy of the API surface. Every variant renders as a JSON
/// `{error}` body with the matching status code.
#[derive(Debug, Error)]
pub enum ApiError {
    /// A required field is missing or empty. No partial write happens.
    #[error("{0}")]
    Validation(String),

    /// No record matches the requested id.
    #[error("{0} not found")]
    NotFound(&'static str),

    /// The backing collection file could not be read or written. There
    /// is no recovery path; the request fails.
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Storage(err) => {
                error!("Storage failure: {:#}", err);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
