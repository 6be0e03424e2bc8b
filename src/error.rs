//! Error handling for the application

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::booking::{BookingError, StoreError};

/// Application error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Not found")]
    NotFound,

    #[error("{message}")]
    Validation { message: String, errors: Vec<String> },

    #[error("Booking store error: {0}")]
    Store(#[from] StoreError),
}

impl From<BookingError> for AppError {
    fn from(err: BookingError) -> Self {
        match err {
            BookingError::Validation { message, errors } => AppError::Validation { message, errors },
            BookingError::NotFound(_) => AppError::NotFound,
            BookingError::Store(e) => AppError::Store(e),
        }
    }
}

impl AppError {
    fn bad_request(message: &str, detail: String) -> Self {
        AppError::Validation {
            message: message.to_string(),
            errors: vec![detail],
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::bad_request("Invalid request body", rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::bad_request("Invalid query string", rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::bad_request("Invalid path parameter", rejection.body_text())
    }
}

/// JSON error body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error_type: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_type, message, errors) = match self {
            AppError::NotFound => (StatusCode::NOT_FOUND, "not_found", "Not found".to_string(), vec![]),
            AppError::Validation { message, errors } => {
                (StatusCode::BAD_REQUEST, "validation", message, errors)
            }
            AppError::Store(e) => {
                tracing::error!("Booking store error: {}", e);
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "store",
                    "Booking store unavailable".to_string(),
                    vec![],
                )
            }
        };

        let body = ErrorResponse {
            error_type,
            message,
            errors,
        };

        (status, Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
