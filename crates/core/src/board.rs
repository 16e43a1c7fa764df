use std::collections::HashMap;

use tracing::debug;

use crate::catalog::Catalog;
use crate::model::{Course, CourseId, Grade, PersistedState};

/// In-memory collection of every catalog course and its approval state.
///
/// This is the source of truth the controller mutates; persisted snapshots
/// and rendered views are both derived from it.
#[derive(Debug, Clone, PartialEq)]
pub struct CourseBoard {
    courses: Vec<Course>,
    index: HashMap<CourseId, usize>,
}

impl CourseBoard {
    /// Build a board with every course unapproved.
    #[must_use]
    pub fn from_catalog(catalog: &Catalog) -> Self {
        let courses: Vec<Course> = catalog
            .entries()
            .iter()
            .map(|entry| Course::new(entry.id.clone(), entry.name.clone(), entry.term))
            .collect();
        let index = courses
            .iter()
            .enumerate()
            .map(|(pos, course)| (course.id().clone(), pos))
            .collect();
        Self { courses, index }
    }

    #[must_use]
    pub fn get(&self, id: &CourseId) -> Option<&Course> {
        self.index.get(id).map(|&pos| &self.courses[pos])
    }

    pub fn get_mut(&mut self, id: &CourseId) -> Option<&mut Course> {
        self.index.get(id).map(|&pos| &mut self.courses[pos])
    }

    /// Courses in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &Course> {
        self.courses.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.courses.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    /// Apply a loaded snapshot and return how many courses were restored.
    ///
    /// Every known id in `state` becomes approved and takes the recorded grade
    /// when there is one. Ids outside the catalog are ignored. Courses absent
    /// from `state` are left as they are, so applying the same snapshot twice
    /// has the same effect as applying it once.
    pub fn apply(&mut self, state: &PersistedState) -> usize {
        let mut restored = 0;
        for (id, record) in state.iter() {
            match self.get_mut(id) {
                Some(course) => {
                    course.restore(record.grade().cloned());
                    restored += 1;
                }
                None => debug!(course = %id, "ignoring stored course outside catalog"),
            }
        }
        restored
    }

    /// Rebuild the full persisted snapshot from current state.
    #[must_use]
    pub fn snapshot(&self) -> PersistedState {
        self.courses
            .iter()
            .filter(|course| course.is_approved())
            .map(|course| (course.id().clone(), course.grade().cloned()))
            .collect()
    }

    #[must_use]
    pub fn approved_count(&self) -> usize {
        self.courses.iter().filter(|course| course.is_approved()).count()
    }

    /// Mean of all recorded grades, `None` when no approved course has one.
    #[must_use]
    pub fn average_grade(&self) -> Option<f64> {
        let grades: Vec<f64> = self
            .courses
            .iter()
            .filter_map(Course::grade)
            .map(Grade::value)
            .collect();
        if grades.is_empty() {
            return None;
        }
        #[allow(clippy::cast_precision_loss)]
        let count = grades.len() as f64;
        Some(grades.iter().sum::<f64>() / count)
    }
}
