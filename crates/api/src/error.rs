//! Request-boundary error mapping

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use inference_engine::InferenceError;
use serde::Serialize;
use thiserror::Error;
use tracing::warn;
use trip_validator::ValidationError;

/// Errors surfaced to API clients.
///
/// Every prediction failure is converted to a JSON body here; nothing is
/// allowed to crash the long-lived process.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Input rejected before the transform ran
    #[error("invalid input: {0}")]
    Validation(String),
    /// The model refused or failed the prediction
    #[error("prediction failed: {0}")]
    Inference(#[from] InferenceError),
}

impl From<Vec<ValidationError>> for ApiError {
    fn from(errors: Vec<ValidationError>) -> Self {
        let message = errors
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        Self::Validation(message)
    }
}

/// JSON error body
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Inference(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        warn!(status = %status, "request failed: {self}");

        (status, Json(ErrorBody { error: self.to_string() })).into_response()
    }
}
