//! # REST API Errors
//!
//! Error types for the course request pipeline and their HTTP mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::auth::AuthError;
use crate::course::ValidationError;
use crate::store::StoreError;

/// Result type for REST operations
pub type ApiResult<T> = Result<T, ApiError>;

/// Course request errors
#[derive(Debug, Error)]
pub enum ApiError {
    // ==================
    // Client Errors (4xx)
    // ==================
    /// Missing or wrong shared key
    #[error("{0}")]
    Auth(#[from] AuthError),

    /// Path id fails the course id grammar
    #[error("Incorrect format for Course ID")]
    InvalidCourseId,

    /// Payload incomplete or failing a field grammar
    #[error("{0}")]
    Unprocessable(ValidationError),

    /// Body is not a JSON course payload
    #[error("Please supply course information in JSON format")]
    InvalidBody,

    /// No record with this id
    #[error("No course found")]
    NotFound(String),

    /// A record with this id already exists
    #[error("Duplicate course ID")]
    Conflict(String),

    // ==================
    // Server Errors (5xx)
    // ==================
    /// Datastore failure, fatal for this request only
    #[error("Storage error: {0}")]
    Store(StoreError),
}

impl ApiError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            // 400 Bad Request
            ApiError::InvalidCourseId => StatusCode::BAD_REQUEST,

            // 401 from auth
            ApiError::Auth(auth_err) => {
                StatusCode::from_u16(auth_err.status_code()).unwrap_or(StatusCode::UNAUTHORIZED)
            }

            // 404 Not Found
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,

            // 409 Conflict
            ApiError::Conflict(_) => StatusCode::CONFLICT,

            // 422 Unprocessable Entity
            ApiError::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::InvalidBody => StatusCode::UNPROCESSABLE_ENTITY,

            // 500 Internal Server Error
            ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to return to the caller. Store details stay in the log.
    pub fn public_message(&self) -> String {
        match self {
            ApiError::Store(_) => "Internal error".to_string(),
            other => other.to_string(),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        if err.is_course_id() {
            ApiError::InvalidCourseId
        } else {
            ApiError::Unprocessable(err)
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Duplicate(id) => ApiError::Conflict(id),
            StoreError::Missing(id) => ApiError::NotFound(id),
            other => ApiError::Store(other),
        }
    }
}

/// Error response body
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

impl From<&ApiError> for ErrorResponse {
    fn from(err: &ApiError) -> Self {
        Self {
            code: err.status_code().as_u16(),
            error: err.public_message(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        // A malformed id gets a bare status; the diagnostic is server-side only.
        if matches!(self, ApiError::InvalidCourseId) {
            return status.into_response();
        }
        let body = Json(ErrorResponse::from(&self));
        (status, body).into_response()
    }
}
