//! HTTP error responses.
//!
//! Every failure leaves the service as `{"status":"error","message":...}`
//! with a non-2xx status, and is logged exactly once here.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::classifier::ModelError;
use crate::validation::{AssemblyError, ValidationError};

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug)]
pub enum ApiError {
    // Body could not be read as JSON (syntax, content type)
    Malformed { status: StatusCode, message: String },

    // Missing or wrongly typed sensor channel
    Validation(ValidationError),

    // No model was loaded at startup
    ModelUnavailable,

    // Assembly or inference failure; detail stays server-side
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // ---
        let (status, message) = match self {
            ApiError::Malformed { status, message } => {
                tracing::warn!("Malformed request ({}): {}", status, message);
                (status, message)
            }
            ApiError::Validation(err) => {
                tracing::warn!("Rejected sensor data: {}", err);
                (StatusCode::BAD_REQUEST, err.to_string())
            }
            ApiError::ModelUnavailable => {
                tracing::warn!("Request refused: model not loaded");
                (StatusCode::SERVICE_UNAVAILABLE, "Model not loaded".to_string())
            }
            ApiError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(json!({
            "status": "error",
            "message": message,
        }));

        (status, body).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Malformed {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::Validation(err)
    }
}

impl From<AssemblyError> for ApiError {
    fn from(err: AssemblyError) -> Self {
        ApiError::Internal(format!("feature assembly failed: {err}"))
    }
}

impl From<ModelError> for ApiError {
    fn from(err: ModelError) -> Self {
        ApiError::Internal(format!("inference failed: {err}"))
    }
}
