use crate::model::{CourseId, Grade};

/// Approval state of a single course.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CourseStatus {
    #[default]
    Unapproved,
    Approved { grade: Option<Grade> },
}

/// A catalog course together with its current approval state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Course {
    id: CourseId,
    name: String,
    term: u8,
    status: CourseStatus,
}

impl Course {
    #[must_use]
    pub fn new(id: CourseId, name: impl Into<String>, term: u8) -> Self {
        Self {
            id,
            name: name.into(),
            term,
            status: CourseStatus::Unapproved,
        }
    }

    #[must_use]
    pub fn id(&self) -> &CourseId {
        &self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn term(&self) -> u8 {
        self.term
    }

    #[must_use]
    pub fn status(&self) -> &CourseStatus {
        &self.status
    }

    #[must_use]
    pub fn is_approved(&self) -> bool {
        matches!(self.status, CourseStatus::Approved { .. })
    }

    #[must_use]
    pub fn grade(&self) -> Option<&Grade> {
        match &self.status {
            CourseStatus::Approved { grade } => grade.as_ref(),
            CourseStatus::Unapproved => None,
        }
    }

    /// Marks the course approved with an optional grade.
    pub fn approve(&mut self, grade: Option<Grade>) {
        self.status = CourseStatus::Approved { grade };
    }

    /// Marks the course approved, keeping any grade it already shows unless a
    /// new one is given.
    pub fn restore(&mut self, grade: Option<Grade>) {
        let grade = grade.or_else(|| self.grade().cloned());
        self.approve(grade);
    }

    /// Clears approval and any grade.
    pub fn revoke(&mut self) {
        self.status = CourseStatus::Unapproved;
    }
}
