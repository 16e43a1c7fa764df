mod course;
mod grade;
mod ids;
mod record;

pub use course::{Course, CourseStatus};
pub use grade::{Grade, GradeError, GradeInput};
pub use ids::{CourseId, CourseIdError};
pub use record::{CourseRecord, PersistedState};
