//! # Course Store
//!
//! The datastore contract the request pipeline consumes. The store owns
//! uniqueness of the course id: `insert` refuses an id that already
//! exists even if the caller's existence probe raced with another writer.

pub mod errors;
pub mod memory;
pub mod sqlite;

pub use errors::{StoreError, StoreResult};
pub use memory::InMemoryCourseStore;
pub use sqlite::SqliteCourseStore;

use crate::course::Course;

/// Persistence operations on course records, keyed by course id
pub trait CourseStore: Send + Sync {
    /// Whether a record with this id exists
    fn exists(&self, id: &str) -> StoreResult<bool>;

    /// Fetch a record, `None` if absent
    fn get(&self, id: &str) -> StoreResult<Option<Course>>;

    /// Insert a new record. Fails with `Duplicate` if the id is taken.
    fn insert(&self, course: &Course) -> StoreResult<()>;

    /// Replace the fields of an existing record. Fails with `Missing` if absent.
    fn update(&self, id: &str, course: &Course) -> StoreResult<()>;

    /// Remove a record. Fails with `Missing` if absent.
    fn delete(&self, id: &str) -> StoreResult<()>;

    /// All records, ordered by course id
    fn list_all(&self) -> StoreResult<Vec<Course>>;
}
