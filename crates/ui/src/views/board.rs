use std::sync::Arc;

use course_core::model::CourseId;
use dioxus::prelude::*;
use services::PromptRequest;
use tracing::{debug, warn};

use crate::context::AppContext;
use crate::views::{GradeDialog, InvalidGradeDialog, ViewState, view_state_from_resource};
use crate::vm::{CourseTileVm, ProgressVm, TermColumnVm, map_progress, map_term_columns};

#[derive(Clone, Debug, PartialEq)]
struct BoardData {
    columns: Vec<TermColumnVm>,
    progress: ProgressVm,
}

#[component]
pub fn CourseBoardView() -> Element {
    let ctx = use_context::<AppContext>();
    let controller = ctx.controller();

    let mut resource = use_resource(move || {
        let controller = Arc::clone(&controller);
        async move {
            let guard = controller.lock().await;
            let board = guard.board();
            BoardData {
                columns: map_term_columns(board),
                progress: map_progress(board),
            }
        }
    });
    let state = view_state_from_resource(&resource);

    let mut pending = use_signal(|| None::<PromptRequest>);
    let mut notice = use_signal(|| None::<String>);

    let prompt_ctx = ctx.clone();
    use_future(move || {
        let receiver = prompt_ctx.take_prompt_requests();
        async move {
            let Some(mut receiver) = receiver else {
                return;
            };
            while let Some(request) = receiver.recv().await {
                pending.set(Some(request));
            }
        }
    });

    let toggle_ctx = ctx.clone();
    let on_toggle = use_callback(move |id: CourseId| {
        let controller = toggle_ctx.controller();
        spawn(async move {
            let result = controller.lock().await.toggle(&id).await;
            match result {
                Ok(outcome) => {
                    debug!(course = %id, ?outcome, "course toggled from board");
                    notice.set(None);
                }
                Err(error) => {
                    warn!(course = %id, %error, "course toggle failed");
                    notice.set(Some(format!("Could not save progress: {error}")));
                }
            }
            resource.restart();
        });
    });

    let submit_grade = use_callback(move |grade: String| {
        if let Some(PromptRequest::Grade { reply, .. }) = Option::take(&mut *pending.write()) {
            let _ = reply.send(Some(grade));
        }
    });
    let cancel_grade = use_callback(move |()| {
        if let Some(PromptRequest::Grade { reply, .. }) = Option::take(&mut *pending.write()) {
            let _ = reply.send(None);
        }
    });
    let ack_invalid = use_callback(move |()| {
        if let Some(PromptRequest::InvalidGrade { ack, .. }) = Option::take(&mut *pending.write()) {
            let _ = ack.send(());
        }
    });

    let (pending_course, dialog) = match &*pending.read() {
        Some(PromptRequest::Grade { course, name, .. }) => (
            Some(course.clone()),
            rsx! {
                GradeDialog {
                    course_name: name.clone(),
                    on_submit: submit_grade,
                    on_cancel: cancel_grade,
                }
            },
        ),
        Some(PromptRequest::InvalidGrade {
            course,
            name,
            input,
            ..
        }) => (
            Some(course.clone()),
            rsx! {
                InvalidGradeDialog {
                    course_name: name.clone(),
                    input: input.clone(),
                    on_ack: ack_invalid,
                }
            },
        ),
        None => (None, rsx! {}),
    };

    rsx! {
        div { class: "page",
            match state {
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Ready(data) => rsx! {
                    ProgressBar { progress: data.progress }
                    if let Some(message) = notice() {
                        p { class: "notice", "{message}" }
                    }
                    div { class: "board",
                        for column in data.columns {
                            section { key: "{column.term}", class: "term",
                                h3 { class: "term-title", "{column.title}" }
                                for tile in column.tiles {
                                    CourseTile {
                                        key: "{tile.id}",
                                        pending_course: pending_course.clone(),
                                        tile,
                                        on_toggle,
                                    }
                                }
                            }
                        }
                    }
                },
            }
            {dialog}
        }
    }
}

#[component]
fn ProgressBar(progress: ProgressVm) -> Element {
    rsx! {
        header { class: "progress",
            span { class: "progress-count", "{progress.approved} / {progress.total} approved" }
            span { class: "progress-percent", "{progress.percent}%" }
            span { class: "progress-average", "Average: {progress.average}" }
        }
    }
}

#[component]
fn CourseTile(
    tile: CourseTileVm,
    pending_course: Option<CourseId>,
    on_toggle: Callback<CourseId>,
) -> Element {
    let class = tile.class(pending_course.as_ref() == Some(&tile.id));
    let id = tile.id.clone();

    rsx! {
        div {
            class: "{class}",
            "data-course": "{tile.id}",
            onclick: move |_| on_toggle.call(id.clone()),
            span { class: "course-name", "{tile.name}" }
            if let Some(grade) = tile.grade.as_ref() {
                span { class: "grade", "{grade}" }
            }
        }
    }
}
