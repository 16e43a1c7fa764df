//! Shared error types for the services crate.

use thiserror::Error;

use course_core::model::CourseId;
use storage::StorageError;
use storage::sqlite::SqliteInitError;

/// Errors emitted by `CourseController`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ControllerError {
    #[error("unknown course: {0}")]
    UnknownCourse(CourseId),
    /// The transition was applied in memory but the snapshot was not saved.
    #[error("failed to save course state: {0}")]
    Storage(#[from] StorageError),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
}
