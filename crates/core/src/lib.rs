#![forbid(unsafe_code)]

pub mod board;
pub mod catalog;
pub mod error;
pub mod model;

pub use board::CourseBoard;
pub use catalog::{Catalog, CatalogEntry, CatalogError};
pub use error::Error;
