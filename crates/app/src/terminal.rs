use std::io::{BufRead, Write};
use std::sync::Mutex;

use async_trait::async_trait;
use course_core::CourseBoard;
use course_core::model::Course;
use services::{GradePrompt, ToggleOutcome};
use tracing::warn;

/// Blocking line-based prompt over a reader/writer pair (stdin/stderr in the binary).
pub struct TerminalPrompt<R, W> {
    input: Mutex<R>,
    output: Mutex<W>,
}

impl<R, W> TerminalPrompt<R, W>
where
    R: BufRead + Send,
    W: Write + Send,
{
    pub fn new(input: R, output: W) -> Self {
        Self {
            input: Mutex::new(input),
            output: Mutex::new(output),
        }
    }

    fn say(&self, text: &str) {
        let Ok(mut output) = self.output.lock() else {
            return;
        };
        if let Err(error) = output.write_all(text.as_bytes()).and_then(|()| output.flush()) {
            warn!(%error, "failed to write prompt");
        }
    }

    fn read_line(&self) -> Option<String> {
        let mut input = self.input.lock().ok()?;
        let mut line = String::new();
        match input.read_line(&mut line) {
            Ok(0) => None,
            Ok(_) => Some(line.trim_end_matches(['\r', '\n']).to_owned()),
            Err(error) => {
                warn!(%error, "failed to read prompt answer");
                None
            }
        }
    }
}

#[async_trait]
impl<R, W> GradePrompt for TerminalPrompt<R, W>
where
    R: BufRead + Send,
    W: Write + Send,
{
    async fn request_grade(&self, course: &Course) -> Option<String> {
        self.say(&format!(
            "Approved {}! Enter your final grade (blank to cancel): ",
            course.name()
        ));
        self.read_line()
    }

    async fn notify_invalid_grade(&self, course: &Course, input: &str) {
        self.say(&format!(
            "\"{input}\" is not a valid grade; {} stays unapproved.\n",
            course.name()
        ));
    }
}

/// One line per course, grouped by term.
pub fn render_board(board: &CourseBoard) -> String {
    let mut out = String::new();
    let mut term = None;
    for course in board.iter() {
        if term != Some(course.term()) {
            term = Some(course.term());
            out.push_str(&format!("Term {}\n", course.term()));
        }
        let mark = if course.is_approved() { 'x' } else { ' ' };
        let grade = course.grade().map(|grade| grade.as_str()).unwrap_or("");
        out.push_str(&format!(
            "  [{mark}] {:<28} {:<36} {grade}\n",
            course.id().as_str(),
            course.name()
        ));
    }
    let average = board
        .average_grade()
        .map_or_else(|| "-".to_owned(), |average| format!("{average:.2}"));
    out.push_str(&format!(
        "{} / {} approved, average {average}\n",
        board.approved_count(),
        board.len()
    ));
    out
}

pub fn describe_outcome(course: &Course, outcome: &ToggleOutcome) -> String {
    match outcome {
        ToggleOutcome::Approved { grade } => format!("{} approved with {grade}", course.name()),
        ToggleOutcome::Revoked => format!("{} is no longer approved", course.name()),
        ToggleOutcome::Cancelled => format!("{} left unapproved", course.name()),
        ToggleOutcome::InvalidGrade { input } => {
            format!("{} left unapproved (invalid grade {input:?})", course.name())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use course_core::model::{CourseId, Grade};
    use course_core::{Catalog, CatalogEntry};
    use std::io::Cursor;

    fn course() -> Course {
        Course::new(CourseId::new("algebra").unwrap(), "Algebra", 1)
    }

    #[tokio::test]
    async fn reads_one_answer_per_request() {
        let prompt = TerminalPrompt::new(Cursor::new("6.5\r\n\n"), Vec::new());
        assert_eq!(prompt.request_grade(&course()).await.as_deref(), Some("6.5"));
        assert_eq!(prompt.request_grade(&course()).await.as_deref(), Some(""));
        // End of input is a dismissal.
        assert_eq!(prompt.request_grade(&course()).await, None);

        let output = prompt.output.into_inner().unwrap();
        let text = String::from_utf8(output).unwrap();
        assert_eq!(text.matches("Enter your final grade").count(), 3);
    }

    #[tokio::test]
    async fn writes_invalid_notice() {
        let prompt = TerminalPrompt::new(Cursor::new(""), Vec::new());
        prompt.notify_invalid_grade(&course(), "seven").await;
        let text = String::from_utf8(prompt.output.into_inner().unwrap()).unwrap();
        assert!(text.contains("\"seven\" is not a valid grade"));
    }

    #[test]
    fn renders_board_with_progress() {
        let entries = vec![
            CatalogEntry {
                id: CourseId::new("algebra").unwrap(),
                name: "Algebra".to_owned(),
                term: 1,
            },
            CatalogEntry {
                id: CourseId::new("fisica").unwrap(),
                name: "Fisica".to_owned(),
                term: 2,
            },
        ];
        let mut board = CourseBoard::from_catalog(&Catalog::new(entries).unwrap());
        board
            .get_mut(&CourseId::new("algebra").unwrap())
            .unwrap()
            .approve(Some(Grade::parse("6.5").unwrap()));

        let text = render_board(&board);
        assert!(text.contains("Term 1\n"));
        assert!(text.contains("Term 2\n"));
        assert!(text.contains("[x] algebra"));
        assert!(text.contains("[ ] fisica"));
        assert!(text.ends_with("1 / 2 approved, average 6.50\n"));
    }

    #[test]
    fn describes_outcomes() {
        let course = course();
        let approved = ToggleOutcome::Approved {
            grade: Grade::parse("6").unwrap(),
        };
        assert_eq!(describe_outcome(&course, &approved), "Algebra approved with 6.0");
        assert_eq!(
            describe_outcome(&course, &ToggleOutcome::Revoked),
            "Algebra is no longer approved"
        );
    }
}
