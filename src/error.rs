use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

use crate::validation::{ErrorResponse, ValidationError};

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Invalid JSON in request body")]
    InvalidBody,

    #[error("Validation failed: {0:?}")]
    Validation(ErrorResponse),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, ApiError>;

impl From<ErrorResponse> for ApiError {
    fn from(errors: ErrorResponse) -> Self {
        ApiError::Validation(errors)
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::Validation(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::InvalidBody => (
                StatusCode::BAD_REQUEST,
                ErrorResponse::single("body", "Invalid JSON in request body"),
            ),
            ApiError::Validation(errors) => {
                tracing::warn!(fields = ?errors.errors.keys().collect::<Vec<_>>(), "rejected request");
                (StatusCode::BAD_REQUEST, errors)
            }
            ApiError::Internal(e) => {
                tracing::error!(error = %e, "unexpected server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::single("server", "An unexpected error occurred"),
                )
            }
        };
        (status, Json(body)).into_response()
    }
}
