//! # Response Formatting
//!
//! Outcomes of successful mutations and their response bodies.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

/// Result of a successful create, upsert, or delete
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Created(String),
    Updated(String),
    Deleted(String),
}

impl Outcome {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Outcome::Created(_) => StatusCode::CREATED,
            Outcome::Updated(_) => StatusCode::ACCEPTED,
            Outcome::Deleted(_) => StatusCode::ACCEPTED,
        }
    }

    pub fn message(&self) -> String {
        match self {
            Outcome::Created(id) => format!("Course added: {}", id),
            Outcome::Updated(id) => format!("Course updated: {}", id),
            Outcome::Deleted(id) => format!("Course deleted: {}", id),
        }
    }
}

/// Message response body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
    pub code: u16,
}

impl From<&Outcome> for MessageResponse {
    fn from(outcome: &Outcome) -> Self {
        Self {
            message: outcome.message(),
            code: outcome.status_code().as_u16(),
        }
    }
}

impl IntoResponse for Outcome {
    fn into_response(self) -> Response {
        (self.status_code(), Json(MessageResponse::from(&self))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_status_codes() {
        assert_eq!(
            Outcome::Created("CSE1001".to_string()).status_code(),
            StatusCode::CREATED
        );
        assert_eq!(
            Outcome::Updated("CSE1001".to_string()).status_code(),
            StatusCode::ACCEPTED
        );
        assert_eq!(
            Outcome::Deleted("CSE1001".to_string()).status_code(),
            StatusCode::ACCEPTED
        );
    }

    #[test]
    fn test_message_response_serialization() {
        let outcome = Outcome::Deleted("CSE1001".to_string());
        let json = serde_json::to_value(MessageResponse::from(&outcome)).unwrap();

        assert_eq!(json["message"], "Course deleted: CSE1001");
        assert_eq!(json["code"], 202);
    }
}
