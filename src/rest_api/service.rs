//! # Course Request Service
//!
//! Decides the outcome of one course request. Every operation runs the
//! same prefix before touching the store:
//!
//! 1. shared-key check (nothing else runs on failure)
//! 2. course id grammar
//! 3. payload completeness, then field grammars (create/upsert only)
//!
//! Only then is existence probed and the mutation applied. Validation
//! failures never reach the store, so no record is partially written.

use std::sync::Arc;

use tracing::{error, info, warn};

use crate::auth::ApiKey;
use crate::course::{
    validate_course_id, validate_payload, Course, CoursePayload, MarkupSanitizer, Sanitizer,
};
use crate::store::{CourseStore, StoreError, StoreResult};

use super::errors::{ApiError, ApiResult};
use super::response::Outcome;

/// Greeting returned by the API root
pub const HOME_MESSAGE: &str = "Welcome to the REST API!";

/// Stateless request handler over a shared course store
#[derive(Clone)]
pub struct CourseService {
    store: Arc<dyn CourseStore>,
    sanitizer: Arc<dyn Sanitizer>,
    api_key: ApiKey,
}

impl CourseService {
    /// Create a service using the default markup sanitizer
    pub fn new(store: Arc<dyn CourseStore>, api_key: ApiKey) -> Self {
        Self {
            store,
            sanitizer: Arc::new(MarkupSanitizer::new()),
            api_key,
        }
    }

    /// Replace the sanitizer applied before every grammar check
    pub fn with_sanitizer(mut self, sanitizer: Arc<dyn Sanitizer>) -> Self {
        self.sanitizer = sanitizer;
        self
    }

    /// Reject the request unless it carries the shared key
    pub fn authenticate(&self, key: Option<&str>) -> ApiResult<()> {
        self.api_key.verify(key).map_err(|e| {
            warn!(reason = %e, "Fail attempt in providing API key");
            ApiError::Auth(e)
        })
    }

    /// API root
    pub fn home(&self, key: Option<&str>) -> ApiResult<&'static str> {
        self.authenticate(key)?;
        Ok(HOME_MESSAGE)
    }

    /// All courses, ordered by id
    pub fn list(&self, key: Option<&str>) -> ApiResult<Vec<Course>> {
        self.authenticate(key)?;
        self.checked(self.store.list_all())
    }

    /// A single course
    pub fn get(&self, key: Option<&str>, raw_id: &str) -> ApiResult<Course> {
        self.authenticate(key)?;
        let id = self.course_id(raw_id, "get")?;

        match self.checked(self.store.get(&id))? {
            Some(course) => Ok(course),
            None => {
                warn!(course_id = %id, "Fail attempt to get record: no course found");
                Err(ApiError::NotFound(id))
            }
        }
    }

    /// Create a course that must not exist yet
    pub fn create(&self, key: Option<&str>, raw_id: &str, body: &[u8]) -> ApiResult<Outcome> {
        self.authenticate(key)?;
        let id = self.course_id(raw_id, "insert")?;
        let course = self.course_payload(&id, body, "insert")?;

        if self.checked(self.store.exists(&id))? {
            warn!(course_id = %id, "Fail attempt to insert record: duplicate course ID");
            return Err(ApiError::Conflict(id));
        }

        match self.store.insert(&course) {
            Ok(()) => {
                info!(course_id = %id, "Course added");
                Ok(Outcome::Created(id))
            }
            Err(StoreError::Duplicate(_)) => {
                warn!(course_id = %id, "Concurrent insert won the race for course ID");
                Err(ApiError::Conflict(id))
            }
            Err(e) => Err(self.store_failure(e)),
        }
    }

    /// Update the course if it exists, otherwise create it.
    ///
    /// A write that loses a second race after its fallback is a store
    /// failure, so PUT never answers 404 or 409.
    pub fn upsert(&self, key: Option<&str>, raw_id: &str, body: &[u8]) -> ApiResult<Outcome> {
        self.authenticate(key)?;
        let id = self.course_id(raw_id, "edit")?;
        let course = self.course_payload(&id, body, "edit")?;

        if self.checked(self.store.exists(&id))? {
            match self.store.update(&id, &course) {
                Ok(()) => {
                    info!(course_id = %id, "Course updated");
                    Ok(Outcome::Updated(id))
                }
                // Deleted between probe and update.
                Err(StoreError::Missing(_)) => {
                    self.store
                        .insert(&course)
                        .map_err(|e| self.lost_race(e))?;
                    info!(course_id = %id, "Course added");
                    Ok(Outcome::Created(id))
                }
                Err(e) => Err(self.store_failure(e)),
            }
        } else {
            match self.store.insert(&course) {
                Ok(()) => {
                    info!(course_id = %id, "Course added");
                    Ok(Outcome::Created(id))
                }
                // Created between probe and insert.
                Err(StoreError::Duplicate(_)) => {
                    self.store
                        .update(&id, &course)
                        .map_err(|e| self.lost_race(e))?;
                    info!(course_id = %id, "Course updated");
                    Ok(Outcome::Updated(id))
                }
                Err(e) => Err(self.store_failure(e)),
            }
        }
    }

    /// Delete a course that must exist
    pub fn delete(&self, key: Option<&str>, raw_id: &str) -> ApiResult<Outcome> {
        self.authenticate(key)?;
        let id = self.course_id(raw_id, "delete")?;

        if !self.checked(self.store.exists(&id))? {
            warn!(course_id = %id, "Fail attempt to delete record: no course found");
            return Err(ApiError::NotFound(id));
        }

        self.checked(self.store.delete(&id))?;
        info!(course_id = %id, "Course deleted");
        Ok(Outcome::Deleted(id))
    }

    fn course_id(&self, raw_id: &str, operation: &'static str) -> ApiResult<String> {
        validate_course_id(raw_id, self.sanitizer.as_ref()).map_err(|e| {
            error!(operation = operation, "Incorrect format for Course ID detected");
            ApiError::from(e)
        })
    }

    fn course_payload(
        &self,
        id: &str,
        body: &[u8],
        operation: &'static str,
    ) -> ApiResult<Course> {
        let payload: CoursePayload = serde_json::from_slice(body).map_err(|e| {
            warn!(operation = operation, course_id = %id, reason = %e, "Course information not in JSON format");
            ApiError::InvalidBody
        })?;

        validate_payload(id, &payload, self.sanitizer.as_ref()).map_err(|e| {
            warn!(operation = operation, course_id = %id, reason = %e, "Course information rejected");
            ApiError::from(e)
        })
    }

    /// Convert a store result, logging failures that are not plain
    /// duplicate/missing outcomes
    fn checked<T>(&self, result: StoreResult<T>) -> ApiResult<T> {
        result.map_err(|e| match e {
            StoreError::Duplicate(_) | StoreError::Missing(_) => ApiError::from(e),
            other => self.store_failure(other),
        })
    }

    /// Any failure of an upsert fallback write, including a repeated
    /// duplicate/missing outcome
    fn lost_race(&self, err: StoreError) -> ApiError {
        error!(error = %err, "Upsert fallback write failed");
        ApiError::Store(err)
    }

    fn store_failure(&self, err: StoreError) -> ApiError {
        error!(error = %err, "Datastore failure");
        ApiError::from(err)
    }
}
