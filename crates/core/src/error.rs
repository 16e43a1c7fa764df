use thiserror::Error;

use crate::catalog::CatalogError;
use crate::model::{CourseIdError, GradeError};

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    CourseId(#[from] CourseIdError),
    #[error(transparent)]
    Grade(#[from] GradeError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}
