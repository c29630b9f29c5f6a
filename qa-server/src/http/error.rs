//! API error types with IntoResponse
//!
//! Client errors carry `{"detail": ...}`, storage faults carry
//! `{"status": 500, "message": ...}`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use utoipa::ToSchema;

use crate::db::DbError;
use crate::models::ValidationError;

/// Detail returned when a question id does not resolve
pub const QUESTION_NOT_FOUND: &str = "question not found";

/// Detail returned when an answer id does not resolve
pub const ANSWER_NOT_FOUND: &str = "answer not found";

/// Client error body (404, 422)
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorDetail {
    pub detail: String,
}

/// Storage fault body (500)
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorStatus {
    pub status: u16,
    pub message: String,
}

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Malformed or invalid input (422)
    Validation(String),

    /// Resource not found (404)
    NotFound(&'static str),

    /// Storage fault (500, logged)
    Database(DbError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::Validation(detail) => {
                (StatusCode::UNPROCESSABLE_ENTITY, Json(ErrorDetail { detail })).into_response()
            }
            Self::NotFound(detail) => (
                StatusCode::NOT_FOUND,
                Json(ErrorDetail {
                    detail: detail.to_string(),
                }),
            )
                .into_response(),
            Self::Database(e) => {
                tracing::error!(error = %e, "storage operation failed");
                let status = StatusCode::INTERNAL_SERVER_ERROR;
                (
                    status,
                    Json(ErrorStatus {
                        status: status.as_u16(),
                        message: e.to_string(),
                    }),
                )
                    .into_response()
            }
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e.to_string())
    }
}

impl From<DbError> for ApiError {
    fn from(e: DbError) -> Self {
        Self::Database(e)
    }
}
