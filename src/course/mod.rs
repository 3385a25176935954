//! # Course Module
//!
//! The course record, its wire payload, and the input grammars every
//! course field must satisfy before it reaches a store.
//!
//! The same validators run on the console client (pre-flight) and on the
//! server (authoritative).

pub mod errors;
pub mod model;
pub mod sanitize;
pub mod validator;

pub use errors::{TextField, ValidationError, ValidationResult};
pub use model::{Course, CoursePayload};
pub use sanitize::{MarkupSanitizer, Sanitizer};
pub use validator::{
    check_class_size, check_complete, validate_class_size, validate_course_id, validate_payload,
    validate_text,
};
