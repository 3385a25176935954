//! # Course Validator
//!
//! Pure grammar checks for course input. Each check trims, sanitizes, then
//! matches a fixed pattern, returning the cleaned value on success.
//!
//! Character classes are ASCII-only: `\w` means `[A-Za-z0-9_]` and `\s`
//! means `[\t\n\x0C\r ]`.

use std::sync::OnceLock;

use regex::Regex;

use super::errors::{TextField, ValidationError, ValidationResult};
use super::model::{Course, CoursePayload};
use super::sanitize::Sanitizer;

/// Largest class size the four-digit grammar admits
pub const MAX_CLASS_SIZE: u16 = 9999;

fn course_id_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Z]{3}[0-9]{4}$").expect("course id pattern is valid"))
}

fn text_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9_\t\n\x0C\r ]{3,30}$").expect("text pattern is valid")
    })
}

fn class_size_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[0-9]{1,4}$").expect("class size pattern is valid"))
}

fn clean(raw: &str, sanitizer: &dyn Sanitizer) -> String {
    sanitizer.sanitize(raw.trim())
}

/// Validate a course id: exactly three uppercase letters then four digits
pub fn validate_course_id(raw: &str, sanitizer: &dyn Sanitizer) -> ValidationResult<String> {
    let id = clean(raw, sanitizer);
    if course_id_pattern().is_match(&id) {
        Ok(id)
    } else {
        Err(ValidationError::CourseId)
    }
}

/// Validate a title or lecturer name: 3 to 30 word or space characters
pub fn validate_text(
    field: TextField,
    raw: &str,
    sanitizer: &dyn Sanitizer,
) -> ValidationResult<String> {
    let text = clean(raw, sanitizer);
    if text_pattern().is_match(&text) {
        Ok(text)
    } else {
        Err(ValidationError::Text(field))
    }
}

/// Validate a class size typed as text: one to four digits, greater than zero
pub fn validate_class_size(raw: &str, sanitizer: &dyn Sanitizer) -> ValidationResult<u16> {
    let digits = clean(raw, sanitizer);
    if !class_size_pattern().is_match(&digits) {
        return Err(ValidationError::ClassSizeFormat);
    }
    let value: i64 = digits
        .parse()
        .map_err(|_| ValidationError::ClassSizeFormat)?;
    check_class_size(value)
}

/// Range check for a class size that arrived already numeric
pub fn check_class_size(value: i64) -> ValidationResult<u16> {
    if value <= 0 {
        return Err(ValidationError::ClassSizeNotPositive);
    }
    match u16::try_from(value) {
        Ok(size) if size <= MAX_CLASS_SIZE => Ok(size),
        _ => Err(ValidationError::ClassSizeFormat),
    }
}

/// Reject payloads with an empty title or lecturer or a non-positive size
pub fn check_complete(payload: &CoursePayload) -> ValidationResult<()> {
    if payload.title.is_empty() || payload.lecturer.is_empty() || payload.class_size <= 0 {
        return Err(ValidationError::Incomplete);
    }
    Ok(())
}

/// Validate a whole create/upsert payload for an already-validated id.
///
/// Completeness is checked first so that an empty field reports as
/// incomplete rather than as a grammar failure.
pub fn validate_payload(
    id: &str,
    payload: &CoursePayload,
    sanitizer: &dyn Sanitizer,
) -> ValidationResult<Course> {
    check_complete(payload)?;

    let title = validate_text(TextField::Title, &payload.title, sanitizer)?;
    let lecturer = validate_text(TextField::Lecturer, &payload.lecturer, sanitizer)?;
    let class_size = check_class_size(payload.class_size)?;

    Ok(Course::new(id, title, lecturer, class_size))
}
