//! # Course REST API Module
//!
//! The request pipeline for course records: shared-key check, input
//! validation, existence probe, mutation. `service` holds the decisions;
//! `server` is the axum adapter mapping them to HTTP.

pub mod errors;
pub mod response;
pub mod server;
pub mod service;

pub use errors::{ApiError, ApiResult, ErrorResponse};
pub use response::{MessageResponse, Outcome};
pub use server::RestServer;
pub use service::CourseService;
