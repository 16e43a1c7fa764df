use std::sync::Arc;

use tracing::{debug, info};

use course_core::model::{CourseId, Grade, GradeInput, PersistedState};
use course_core::{Catalog, CourseBoard};
use storage::StateStore;

use crate::error::ControllerError;
use crate::prompt::GradePrompt;

/// What a toggle ended up doing to the course.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToggleOutcome {
    Approved { grade: Grade },
    /// An approved course was switched back to unapproved.
    Revoked,
    /// The grade prompt was dismissed or left blank.
    Cancelled,
    /// The grade was not a number; the course stays unapproved.
    InvalidGrade { input: String },
}

/// Drives approval toggles for a board and keeps the store in sync.
///
/// Every toggle, whatever branch it takes, finishes by saving a snapshot
/// rebuilt from the whole board.
pub struct CourseController {
    board: CourseBoard,
    store: Arc<dyn StateStore>,
    prompt: Arc<dyn GradePrompt>,
}

impl CourseController {
    #[must_use]
    pub fn new(
        catalog: &Catalog,
        store: Arc<dyn StateStore>,
        prompt: Arc<dyn GradePrompt>,
    ) -> Self {
        Self {
            board: CourseBoard::from_catalog(catalog),
            store,
            prompt,
        }
    }

    /// Load the stored snapshot and apply it to the board.
    ///
    /// Returns how many courses were restored.
    pub async fn initialize(&mut self) -> usize {
        let state = self.store.load().await;
        let restored = self.board.apply(&state);
        info!(
            restored,
            total = self.board.len(),
            "restored course state"
        );
        restored
    }

    /// Toggle approval of `id`.
    ///
    /// An approved course is revoked without prompting. An unapproved course
    /// asks for a grade and is approved only when the answer is a number.
    ///
    /// # Errors
    ///
    /// Returns `ControllerError::UnknownCourse` for ids outside the catalog,
    /// and `ControllerError::Storage` if the snapshot cannot be saved. In the
    /// latter case the board keeps the new state.
    pub async fn toggle(&mut self, id: &CourseId) -> Result<ToggleOutcome, ControllerError> {
        let course = self
            .board
            .get(id)
            .cloned()
            .ok_or_else(|| ControllerError::UnknownCourse(id.clone()))?;

        let outcome = if course.is_approved() {
            self.set_unapproved(id);
            ToggleOutcome::Revoked
        } else {
            let response = self.prompt.request_grade(&course).await;
            match GradeInput::classify(response.as_deref()) {
                GradeInput::Valid(grade) => {
                    if let Some(course) = self.board.get_mut(id) {
                        course.approve(Some(grade.clone()));
                    }
                    ToggleOutcome::Approved { grade }
                }
                GradeInput::Invalid(input) => {
                    self.prompt.notify_invalid_grade(&course, &input).await;
                    self.set_unapproved(id);
                    ToggleOutcome::InvalidGrade { input }
                }
                GradeInput::Cancelled => {
                    self.set_unapproved(id);
                    ToggleOutcome::Cancelled
                }
            }
        };
        debug!(course = %id, ?outcome, "toggled course");

        self.persist().await?;
        Ok(outcome)
    }

    #[must_use]
    pub fn board(&self) -> &CourseBoard {
        &self.board
    }

    /// Snapshot of the current board, as it would be saved.
    #[must_use]
    pub fn persisted(&self) -> PersistedState {
        self.board.snapshot()
    }

    fn set_unapproved(&mut self, id: &CourseId) {
        if let Some(course) = self.board.get_mut(id) {
            course.revoke();
        }
    }

    async fn persist(&self) -> Result<(), ControllerError> {
        let snapshot = self.board.snapshot();
        self.store.save(&snapshot).await?;
        Ok(())
    }
}
