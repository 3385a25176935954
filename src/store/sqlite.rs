//! # SQLite Course Store
//!
//! One table keyed by course id. The `PRIMARY KEY` constraint is the
//! storage-level guard against two creates racing past the existence probe.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use rusqlite::{params, Connection, ErrorCode, OptionalExtension, Row};

use crate::course::Course;

use super::errors::{StoreError, StoreResult};
use super::CourseStore;

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS course (
    course_id  TEXT PRIMARY KEY NOT NULL,
    title      TEXT NOT NULL,
    lecturer   TEXT NOT NULL,
    class_size INTEGER NOT NULL
);
";

/// Course table in a SQLite database
pub struct SqliteCourseStore {
    conn: Mutex<Connection>,
}

impl SqliteCourseStore {
    /// Open (creating if needed) the database file and ensure the table exists
    pub fn open(path: &Path) -> StoreResult<Self> {
        Self::with_connection(Connection::open(path)?)
    }

    /// Private in-memory database, mainly for tests
    pub fn open_in_memory() -> StoreResult<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> StoreResult<Self> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> StoreResult<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| StoreError::LockPoisoned)
    }

    fn course_from_row(row: &Row<'_>) -> rusqlite::Result<Course> {
        Ok(Course {
            id: row.get(0)?,
            title: row.get(1)?,
            lecturer: row.get(2)?,
            class_size: row.get(3)?,
        })
    }
}

fn is_constraint_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _) if e.code == ErrorCode::ConstraintViolation
    )
}

impl CourseStore for SqliteCourseStore {
    fn exists(&self, id: &str) -> StoreResult<bool> {
        let conn = self.conn()?;
        let exists = conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM course WHERE course_id = ?1)",
            params![id],
            |row| row.get(0),
        )?;
        Ok(exists)
    }

    fn get(&self, id: &str) -> StoreResult<Option<Course>> {
        let conn = self.conn()?;
        let course = conn
            .query_row(
                "SELECT course_id, title, lecturer, class_size FROM course WHERE course_id = ?1",
                params![id],
                Self::course_from_row,
            )
            .optional()?;
        Ok(course)
    }

    fn insert(&self, course: &Course) -> StoreResult<()> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO course (course_id, title, lecturer, class_size) VALUES (?1, ?2, ?3, ?4)",
            params![course.id, course.title, course.lecturer, course.class_size],
        )
        .map_err(|e| {
            if is_constraint_violation(&e) {
                StoreError::Duplicate(course.id.clone())
            } else {
                StoreError::Sqlite(e)
            }
        })?;
        Ok(())
    }

    fn update(&self, id: &str, course: &Course) -> StoreResult<()> {
        let conn = self.conn()?;
        let changed = conn.execute(
            "UPDATE course SET title = ?1, lecturer = ?2, class_size = ?3 WHERE course_id = ?4",
            params![course.title, course.lecturer, course.class_size, id],
        )?;
        if changed == 0 {
            return Err(StoreError::Missing(id.to_string()));
        }
        Ok(())
    }

    fn delete(&self, id: &str) -> StoreResult<()> {
        let conn = self.conn()?;
        let changed = conn.execute("DELETE FROM course WHERE course_id = ?1", params![id])?;
        if changed == 0 {
            return Err(StoreError::Missing(id.to_string()));
        }
        Ok(())
    }

    fn list_all(&self) -> StoreResult<Vec<Course>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT course_id, title, lecturer, class_size FROM course ORDER BY course_id",
        )?;
        let courses = stmt
            .query_map([], Self::course_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(courses)
    }
}
