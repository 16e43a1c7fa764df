//! User-facing prompts the controller suspends on.
//!
//! A toggle that approves a course asks for a grade and may have to tell the
//! user the grade was rejected. Both are modelled as async calls so the same
//! controller runs against a blocking terminal, a UI dialog, or a script.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;
use tokio::sync::{mpsc, oneshot};
use tracing::warn;

use course_core::model::{Course, CourseId};

#[async_trait]
pub trait GradePrompt: Send + Sync {
    /// Ask for the final grade of `course`. `None` means the prompt was dismissed.
    async fn request_grade(&self, course: &Course) -> Option<String>;

    /// Tell the user `input` is not a valid grade. Returns once acknowledged.
    async fn notify_invalid_grade(&self, course: &Course, input: &str);
}

//
// ─── SCRIPTED ──────────────────────────────────────────────────────────────────
//

/// Answers prompts from a fixed queue and records what it was asked.
///
/// Once the queue runs out every request is answered as dismissed.
#[derive(Debug, Default)]
pub struct ScriptedPrompt {
    responses: Mutex<VecDeque<Option<String>>>,
    requested: Mutex<Vec<CourseId>>,
    notified: Mutex<Vec<(CourseId, String)>>,
}

impl ScriptedPrompt {
    #[must_use]
    pub fn new<I, S>(responses: I) -> Self
    where
        I: IntoIterator<Item = Option<S>>,
        S: Into<String>,
    {
        Self {
            responses: Mutex::new(
                responses
                    .into_iter()
                    .map(|response| response.map(Into::into))
                    .collect(),
            ),
            requested: Mutex::new(Vec::new()),
            notified: Mutex::new(Vec::new()),
        }
    }

    /// Queue another response.
    pub fn push(&self, response: Option<&str>) {
        if let Ok(mut queue) = self.responses.lock() {
            queue.push_back(response.map(str::to_owned));
        }
    }

    /// Courses a grade was requested for, in order.
    #[must_use]
    pub fn requested(&self) -> Vec<CourseId> {
        self.requested
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }

    /// Invalid-grade notifications shown, in order.
    #[must_use]
    pub fn notified(&self) -> Vec<(CourseId, String)> {
        self.notified
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl GradePrompt for ScriptedPrompt {
    async fn request_grade(&self, course: &Course) -> Option<String> {
        if let Ok(mut requested) = self.requested.lock() {
            requested.push(course.id().clone());
        }
        self.responses
            .lock()
            .ok()
            .and_then(|mut queue| queue.pop_front())
            .flatten()
    }

    async fn notify_invalid_grade(&self, course: &Course, input: &str) {
        if let Ok(mut notified) = self.notified.lock() {
            notified.push((course.id().clone(), input.to_owned()));
        }
    }
}

//
// ─── CHANNEL ───────────────────────────────────────────────────────────────────
//

/// A prompt waiting to be answered by whoever owns the receiving end.
#[derive(Debug)]
pub enum PromptRequest {
    Grade {
        course: CourseId,
        name: String,
        reply: oneshot::Sender<Option<String>>,
    },
    InvalidGrade {
        course: CourseId,
        name: String,
        input: String,
        ack: oneshot::Sender<()>,
    },
}

/// Forwards prompts over a channel and waits for the reply.
///
/// Dropping a reply sender, or having no receiver at all, counts as a
/// dismissed prompt.
#[derive(Debug, Clone)]
pub struct ChannelPrompt {
    requests: mpsc::UnboundedSender<PromptRequest>,
}

impl ChannelPrompt {
    #[must_use]
    pub fn new() -> (Self, mpsc::UnboundedReceiver<PromptRequest>) {
        let (requests, receiver) = mpsc::unbounded_channel();
        (Self { requests }, receiver)
    }
}

#[async_trait]
impl GradePrompt for ChannelPrompt {
    async fn request_grade(&self, course: &Course) -> Option<String> {
        let (reply, response) = oneshot::channel();
        let request = PromptRequest::Grade {
            course: course.id().clone(),
            name: course.name().to_owned(),
            reply,
        };
        if self.requests.send(request).is_err() {
            warn!(course = %course.id(), "no prompt receiver; treating grade request as dismissed");
            return None;
        }
        response.await.ok().flatten()
    }

    async fn notify_invalid_grade(&self, course: &Course, input: &str) {
        let (ack, acked) = oneshot::channel();
        let request = PromptRequest::InvalidGrade {
            course: course.id().clone(),
            name: course.name().to_owned(),
            input: input.to_owned(),
            ack,
        };
        if self.requests.send(request).is_err() {
            warn!(course = %course.id(), "no prompt receiver; invalid grade notice not shown");
            return;
        }
        let _ = acked.await;
    }
}
