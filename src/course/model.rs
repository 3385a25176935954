//! Course record and request payload.
//!
//! JSON field names follow the wire format the console client and any
//! existing consumers already speak: `CourseID`, `Title`, `Lecturer`,
//! `ClassSize`.

use serde::{Deserialize, Serialize};

/// A persisted course record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    #[serde(rename = "CourseID")]
    pub id: String,

    #[serde(rename = "Title")]
    pub title: String,

    #[serde(rename = "Lecturer")]
    pub lecturer: String,

    #[serde(rename = "ClassSize")]
    pub class_size: u16,
}

impl Course {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        lecturer: impl Into<String>,
        class_size: u16,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            lecturer: lecturer.into(),
            class_size,
        }
    }

    /// Payload carrying this record's fields, as sent on POST/PUT
    pub fn to_payload(&self) -> CoursePayload {
        CoursePayload {
            title: self.title.clone(),
            lecturer: self.lecturer.clone(),
            class_size: i64::from(self.class_size),
        }
    }
}

/// Body of a create or upsert request.
///
/// Every field defaults so that an incomplete body still deserializes and
/// is rejected by the completeness check rather than by the JSON decoder.
/// A `CourseID` key in the body is ignored; the path id is authoritative.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoursePayload {
    #[serde(rename = "Title", default)]
    pub title: String,

    #[serde(rename = "Lecturer", default)]
    pub lecturer: String,

    #[serde(rename = "ClassSize", default)]
    pub class_size: i64,
}
