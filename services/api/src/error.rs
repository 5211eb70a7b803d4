//! Error taxonomy for the API service
//!
//! Every business failure is one of these typed variants; the
//! `IntoResponse` impl is the single place they become the
//! `{message, errors?}` wire shape.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use common::error::StoreError;
use serde_json::json;
use thiserror::Error;

/// Typed failure kinds with their HTTP status mapping
#[derive(Error, Debug)]
pub enum ApiError {
    /// Validation failure, uniqueness violation, or business-rule
    /// violation (400)
    #[error("{0}")]
    BadRequest(String),

    /// Validation failure carrying every field violation at once (400)
    #[error("{message}")]
    Validation {
        message: String,
        errors: Vec<String>,
    },

    /// Missing or invalid credentials or token (401)
    #[error("{0}")]
    Unauthorized(String),

    /// Authenticated but insufficient privilege or ownership (403)
    #[error("{0}")]
    Forbidden(String),

    /// Missing record (404)
    #[error("{0}")]
    NotFound(String),

    /// Unexpected failure (500)
    #[error("Internal Server Error")]
    Internal,
}

impl ApiError {
    /// Validation failure with the canonical "Invalid Data" message
    pub fn invalid_data(errors: Vec<String>) -> Self {
        ApiError::Validation {
            message: "Invalid Data".to_string(),
            errors,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::BadRequest(message) => {
                (StatusCode::BAD_REQUEST, json!({ "message": message }))
            }
            ApiError::Validation { message, errors } => (
                StatusCode::BAD_REQUEST,
                json!({ "message": message, "errors": errors }),
            ),
            ApiError::Unauthorized(message) => {
                (StatusCode::UNAUTHORIZED, json!({ "message": message }))
            }
            ApiError::Forbidden(message) => (StatusCode::FORBIDDEN, json!({ "message": message })),
            ApiError::NotFound(message) => (StatusCode::NOT_FOUND, json!({ "message": message })),
            ApiError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "message": "Internal Server Error" }),
            ),
        };

        (status, Json(body)).into_response()
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound => ApiError::NotFound("Record not found".to_string()),
            StoreError::UniqueViolation { fields } => ApiError::BadRequest(format!(
                "Unique constraint failed on the field(s): {fields}"
            )),
            StoreError::ForeignKeyViolation { constraint } => {
                tracing::warn!("foreign key violation on {constraint}");
                ApiError::BadRequest("Invalid reference between records".to_string())
            }
            StoreError::Connection(err) | StoreError::Query(err) => {
                tracing::error!("store failure: {err}");
                ApiError::Internal
            }
            StoreError::Internal(message) => {
                tracing::error!("store internal failure: {message}");
                ApiError::Internal
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::invalid_data(vec![rejection.body_text()])
    }
}

/// Type alias for API results
pub type ApiResult<T> = Result<T, ApiError>;
