use std::collections::BTreeMap;

use course_core::CourseBoard;
use course_core::model::{Course, CourseId, Grade};

/// UI-ready representation of one course tile.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CourseTileVm {
    pub id: CourseId,
    pub name: String,
    pub approved: bool,
    pub grade: Option<String>,
}

impl CourseTileVm {
    #[must_use]
    pub fn from_course(course: &Course) -> Self {
        Self {
            id: course.id().clone(),
            name: course.name().to_owned(),
            approved: course.is_approved(),
            grade: course.grade().map(|grade| grade.as_str().to_owned()),
        }
    }

    #[must_use]
    pub fn class(&self, pending: bool) -> &'static str {
        match (self.approved, pending) {
            (true, _) => "course approved",
            (false, true) => "course pending",
            (false, false) => "course",
        }
    }
}

/// Courses of one term, in catalog order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TermColumnVm {
    pub term: u8,
    pub title: String,
    pub tiles: Vec<CourseTileVm>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProgressVm {
    pub approved: usize,
    pub total: usize,
    pub percent: usize,
    pub average: String,
}

/// Group board courses into term columns, ordered by term.
#[must_use]
pub fn map_term_columns(board: &CourseBoard) -> Vec<TermColumnVm> {
    let mut terms: BTreeMap<u8, Vec<CourseTileVm>> = BTreeMap::new();
    for course in board.iter() {
        terms
            .entry(course.term())
            .or_default()
            .push(CourseTileVm::from_course(course));
    }
    terms
        .into_iter()
        .map(|(term, tiles)| TermColumnVm {
            term,
            title: format!("Term {term}"),
            tiles,
        })
        .collect()
}

#[must_use]
pub fn map_progress(board: &CourseBoard) -> ProgressVm {
    let approved = board.approved_count();
    let total = board.len();
    let percent = if total == 0 {
        0
    } else {
        approved * 100 / total
    };
    let average = board
        .average_grade()
        .and_then(|average| Grade::parse(&average.to_string()).ok())
        .map_or_else(|| "-".to_owned(), |grade| grade.as_str().to_owned());
    ProgressVm {
        approved,
        total,
        percent,
        average,
    }
}
