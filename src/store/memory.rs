//! In-memory course store, used by tests and `serve --store memory`.

use std::collections::BTreeMap;
use std::sync::RwLock;

use crate::course::Course;

use super::errors::{StoreError, StoreResult};
use super::CourseStore;

/// Course records held in an ordered map behind a lock
#[derive(Debug, Default)]
pub struct InMemoryCourseStore {
    data: RwLock<BTreeMap<String, Course>>,
}

impl InMemoryCourseStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with records
    pub fn with_courses(courses: impl IntoIterator<Item = Course>) -> Self {
        let data = courses
            .into_iter()
            .map(|course| (course.id.clone(), course))
            .collect();
        Self {
            data: RwLock::new(data),
        }
    }
}

impl CourseStore for InMemoryCourseStore {
    fn exists(&self, id: &str) -> StoreResult<bool> {
        let data = self.data.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(data.contains_key(id))
    }

    fn get(&self, id: &str) -> StoreResult<Option<Course>> {
        let data = self.data.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(data.get(id).cloned())
    }

    fn insert(&self, course: &Course) -> StoreResult<()> {
        let mut data = self.data.write().map_err(|_| StoreError::LockPoisoned)?;
        if data.contains_key(&course.id) {
            return Err(StoreError::Duplicate(course.id.clone()));
        }
        data.insert(course.id.clone(), course.clone());
        Ok(())
    }

    fn update(&self, id: &str, course: &Course) -> StoreResult<()> {
        let mut data = self.data.write().map_err(|_| StoreError::LockPoisoned)?;
        let record = data
            .get_mut(id)
            .ok_or_else(|| StoreError::Missing(id.to_string()))?;

        record.title = course.title.clone();
        record.lecturer = course.lecturer.clone();
        record.class_size = course.class_size;
        Ok(())
    }

    fn delete(&self, id: &str) -> StoreResult<()> {
        let mut data = self.data.write().map_err(|_| StoreError::LockPoisoned)?;
        data.remove(id)
            .map(|_| ())
            .ok_or_else(|| StoreError::Missing(id.to_string()))
    }

    fn list_all(&self) -> StoreResult<Vec<Course>> {
        let data = self.data.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(data.values().cloned().collect())
    }
}
