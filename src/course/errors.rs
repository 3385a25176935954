//! # Validation Errors
//!
//! Error types for course field grammars.

use std::fmt;

use thiserror::Error;

/// Result type for validation
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Free-text course fields sharing one grammar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextField {
    Title,
    Lecturer,
}

impl TextField {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextField::Title => "Course Title",
            TextField::Lecturer => "Course Lecturer",
        }
    }
}

impl fmt::Display for TextField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Course input rejected by a grammar or completeness rule
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Id is not three uppercase letters followed by four digits
    #[error("Incorrect format for Course ID")]
    CourseId,

    /// Title or lecturer outside 3-30 word/space characters
    #[error("Incorrect format for {0}")]
    Text(TextField),

    /// Class size is not one to four digits
    #[error("Incorrect format for Class Size")]
    ClassSizeFormat,

    /// Class size parsed but is zero or negative
    #[error("Class Size must be greater than zero")]
    ClassSizeNotPositive,

    /// A required payload field is empty or zero
    #[error("Information supplied not complete. Please supply course information in JSON format.")]
    Incomplete,
}

impl ValidationError {
    /// Whether this error concerns the course id rather than the payload
    pub fn is_course_id(&self) -> bool {
        matches!(self, ValidationError::CourseId)
    }
}
