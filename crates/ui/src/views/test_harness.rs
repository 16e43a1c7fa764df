use std::sync::{Arc, Mutex as StdMutex};

use course_core::model::CourseId;
use course_core::{Catalog, CatalogEntry};
use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use services::{ChannelPrompt, CourseController, GradePrompt, PromptRequest, ScriptedPrompt};
use storage::{InMemoryKeyValueStore, LocalStateStore, STORAGE_KEY};
use tokio::sync::Mutex;
use tokio::sync::mpsc::UnboundedReceiver;

use crate::context::{UiApp, build_app_context};
use crate::views::CourseBoardView;

struct TestApp {
    controller: Arc<Mutex<CourseController>>,
    requests: StdMutex<Option<UnboundedReceiver<PromptRequest>>>,
}

impl UiApp for TestApp {
    fn title(&self) -> String {
        "Courses".to_string()
    }

    fn controller(&self) -> Arc<Mutex<CourseController>> {
        Arc::clone(&self.controller)
    }

    fn take_prompt_requests(&self) -> Option<UnboundedReceiver<PromptRequest>> {
        self.requests.lock().ok().and_then(|mut slot| slot.take())
    }
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn BoardHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    rsx! { CourseBoardView {} }
}

pub fn test_catalog() -> Catalog {
    let entries = [("algebra", "Algebra", 1), ("calculo", "Calculo", 1), ("fisica", "Fisica", 2)]
        .into_iter()
        .map(|(id, name, term)| CatalogEntry {
            id: CourseId::new(id).unwrap(),
            name: name.to_string(),
            term,
        })
        .collect();
    Catalog::new(entries).unwrap()
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub slots: Arc<InMemoryKeyValueStore>,
    pub controller: Arc<Mutex<CourseController>>,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

/// Board harness whose prompts are answered from a script.
pub async fn setup_board_harness(stored: Option<&str>, responses: &[Option<&str>]) -> ViewHarness {
    let prompt = Arc::new(ScriptedPrompt::new(responses.iter().copied()));
    setup_board_harness_with_prompt(stored, prompt, None).await
}

/// Board harness whose prompts go through a channel the view listens on.
pub async fn setup_channel_harness(stored: Option<&str>) -> (ViewHarness, ChannelPrompt) {
    let (prompt, requests) = ChannelPrompt::new();
    let harness =
        setup_board_harness_with_prompt(stored, Arc::new(prompt.clone()), Some(requests)).await;
    (harness, prompt)
}

async fn setup_board_harness_with_prompt(
    stored: Option<&str>,
    prompt: Arc<dyn GradePrompt>,
    requests: Option<UnboundedReceiver<PromptRequest>>,
) -> ViewHarness {
    let slots = Arc::new(match stored {
        Some(raw) => InMemoryKeyValueStore::with_item(STORAGE_KEY, raw),
        None => InMemoryKeyValueStore::new(),
    });
    let store = Arc::new(LocalStateStore::new(slots.clone()));
    let mut controller = CourseController::new(&test_catalog(), store, prompt);
    controller.initialize().await;
    let controller = Arc::new(Mutex::new(controller));

    let app = Arc::new(TestApp {
        controller: Arc::clone(&controller),
        requests: StdMutex::new(requests),
    });
    let dom = VirtualDom::new_with_props(BoardHarness, ViewHarnessProps { app });

    ViewHarness {
        dom,
        slots,
        controller,
    }
}
