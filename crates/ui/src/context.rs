use std::sync::{Arc, Mutex as StdMutex};

use services::{CourseController, PromptRequest};
use tokio::sync::Mutex;
use tokio::sync::mpsc::UnboundedReceiver;

pub trait UiApp: Send + Sync {
    fn title(&self) -> String;

    /// The controller every toggle goes through. Locking it serializes toggles,
    /// so a second click waits until the pending prompt is answered.
    fn controller(&self) -> Arc<Mutex<CourseController>>;

    /// Receiving end of the controller's prompt channel. Handed out once.
    fn take_prompt_requests(&self) -> Option<UnboundedReceiver<PromptRequest>>;
}

type PromptSlot = Arc<StdMutex<Option<UnboundedReceiver<PromptRequest>>>>;

#[derive(Clone)]
pub struct AppContext {
    title: String,
    controller: Arc<Mutex<CourseController>>,
    prompt_requests: PromptSlot,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            title: app.title(),
            controller: app.controller(),
            prompt_requests: Arc::new(StdMutex::new(app.take_prompt_requests())),
        }
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn controller(&self) -> Arc<Mutex<CourseController>> {
        Arc::clone(&self.controller)
    }

    /// Take the prompt receiver. Only the first caller gets it.
    #[must_use]
    pub fn take_prompt_requests(&self) -> Option<UnboundedReceiver<PromptRequest>> {
        self.prompt_requests
            .lock()
            .ok()
            .and_then(|mut slot| slot.take())
    }
}

// This context is provided by the application composition root (e.g. `crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
