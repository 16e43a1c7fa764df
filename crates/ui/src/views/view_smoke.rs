use std::sync::Arc;

use course_core::model::CourseId;
use dioxus::prelude::*;
use storage::{KeyValueStore, STORAGE_KEY};

use super::test_harness::{drive_dom, setup_board_harness, setup_channel_harness};
use crate::views::{GradeDialog, InvalidGradeDialog};

#[tokio::test(flavor = "current_thread")]
async fn board_view_smoke_renders_empty_catalog() {
    let mut harness = setup_board_harness(None, &[]).await;
    harness.rebuild();
    harness.drive_async().await;

    let html = harness.render();
    assert!(html.contains("Algebra"), "missing course in {html}");
    assert!(html.contains("Term 2"), "missing term column in {html}");
    assert!(html.contains("0 / 3 approved"), "missing progress in {html}");
    assert!(html.contains("Average: -"), "missing average in {html}");
    assert!(!html.contains("course approved"), "unexpected approval in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn board_view_smoke_renders_stored_state() {
    let mut harness = setup_board_harness(
        Some(r#"{"algebra":{"approved":true,"grade":"6.5"},"fisica":{"approved":true}}"#),
        &[],
    )
    .await;
    harness.rebuild();
    harness.drive_async().await;

    let html = harness.render();
    assert!(html.contains("course approved"), "missing approved tile in {html}");
    assert!(html.contains("6.5"), "missing grade in {html}");
    assert!(html.contains("2 / 3 approved"), "missing progress in {html}");
    assert!(html.contains("Average: 6.5"), "missing average in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn board_view_smoke_shows_loading_until_controller_is_free() {
    let mut harness = setup_board_harness(None, &[]).await;
    let controller = Arc::clone(&harness.controller);
    let guard = controller.lock().await;
    harness.rebuild();
    harness.drive_async().await;

    let html = harness.render();
    assert!(html.contains("Loading..."), "missing placeholder in {html}");
    assert!(!html.contains("approved"), "unexpected board in {html}");

    drop(guard);
    for _ in 0..3 {
        harness.drive_async().await;
    }
    let html = harness.render();
    assert!(html.contains("0 / 3 approved"), "missing progress in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn board_view_smoke_keeps_valid_records_next_to_malformed_ones() {
    let mut harness = setup_board_harness(
        Some(r#"{"algebra":{"approved":true,"grade":"6.5"},"calculo":{"approved":1}}"#),
        &[],
    )
    .await;
    harness.rebuild();
    harness.drive_async().await;

    let html = harness.render();
    assert!(html.contains("1 / 3 approved"), "missing progress in {html}");
    assert!(html.contains("Average: 6.5"), "missing average in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn board_view_smoke_ignores_corrupt_storage() {
    let mut harness = setup_board_harness(Some("not json"), &[]).await;
    harness.rebuild();
    harness.drive_async().await;

    let html = harness.render();
    assert!(html.contains("0 / 3 approved"), "missing progress in {html}");
    // Nothing is written until the first toggle.
    let raw = harness.slots.get_item(STORAGE_KEY).await.unwrap();
    assert_eq!(raw.as_deref(), Some("not json"));
}

#[tokio::test(flavor = "current_thread")]
async fn board_view_smoke_shows_grade_dialog_for_pending_toggle() {
    let (mut harness, _prompt) = setup_channel_harness(None).await;
    harness.rebuild();
    harness.drive_async().await;

    let controller = Arc::clone(&harness.controller);
    let toggle = tokio::spawn(async move {
        let id = CourseId::new("algebra").unwrap();
        controller.lock().await.toggle(&id).await
    });
    for _ in 0..3 {
        harness.drive_async().await;
    }

    let html = harness.render();
    assert!(html.contains("Enter your final grade"), "missing dialog in {html}");
    assert!(html.contains("Approved Algebra"), "missing course name in {html}");
    assert!(html.contains("course pending"), "missing pending tile in {html}");
    toggle.abort();
}

#[component]
fn GradeDialogHarness() -> Element {
    rsx! {
        GradeDialog {
            course_name: "Algebra".to_string(),
            on_submit: move |_grade: String| {},
            on_cancel: move |()| {},
        }
    }
}

#[component]
fn InvalidGradeDialogHarness() -> Element {
    rsx! {
        InvalidGradeDialog {
            course_name: "Algebra".to_string(),
            input: "seven".to_string(),
            on_ack: move |()| {},
        }
    }
}

#[test]
fn grade_dialog_smoke_renders_actions() {
    let mut dom = VirtualDom::new(GradeDialogHarness);
    dom.rebuild_in_place();
    drive_dom(&mut dom);

    let html = dioxus_ssr::render(&dom);
    assert!(html.contains("Approved Algebra"), "missing title in {html}");
    assert!(html.contains("Cancel"), "missing cancel in {html}");
    assert!(html.contains("Save"), "missing save in {html}");
}

#[test]
fn invalid_grade_dialog_smoke_renders_input() {
    let mut dom = VirtualDom::new(InvalidGradeDialogHarness);
    dom.rebuild_in_place();
    drive_dom(&mut dom);

    let html = dioxus_ssr::render(&dom);
    assert!(html.contains("Invalid grade"), "missing title in {html}");
    assert!(html.contains("seven"), "missing input in {html}");
    assert!(html.contains("stays unapproved"), "missing body in {html}");
}
