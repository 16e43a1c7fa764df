use dioxus::prelude::*;

/// Modal asking for the final grade of a course that is being approved.
#[component]
pub fn GradeDialog(
    course_name: String,
    on_submit: Callback<String>,
    on_cancel: Callback<()>,
) -> Element {
    let mut value = use_signal(String::new);

    let mut submit = move || {
        let grade = value.read().clone();
        value.set(String::new());
        on_submit.call(grade);
    };
    let mut cancel = move || {
        value.set(String::new());
        on_cancel.call(());
    };

    rsx! {
        div {
            class: "modal-overlay",
            onclick: move |_| cancel(),
            div {
                class: "modal",
                onclick: move |evt| evt.stop_propagation(),
                h3 { class: "modal-title", "Approved {course_name}" }
                p { class: "modal-body", "Enter your final grade:" }
                input {
                    class: "modal-input",
                    r#type: "text",
                    autofocus: true,
                    value: "{value}",
                    oninput: move |evt| value.set(evt.value()),
                    onkeydown: move |evt| {
                        if evt.key() == Key::Enter {
                            submit();
                        } else if evt.key() == Key::Escape {
                            cancel();
                        }
                    },
                }
                div { class: "modal-actions",
                    button {
                        class: "btn modal-cancel",
                        r#type: "button",
                        onclick: move |_| cancel(),
                        "Cancel"
                    }
                    button {
                        class: "btn btn-primary",
                        r#type: "button",
                        onclick: move |_| submit(),
                        "Save"
                    }
                }
            }
        }
    }
}

/// Blocking notice shown when the entered grade is not a number.
#[component]
pub fn InvalidGradeDialog(course_name: String, input: String, on_ack: Callback<()>) -> Element {
    rsx! {
        div {
            class: "modal-overlay",
            onclick: move |_| on_ack.call(()),
            div {
                class: "modal",
                onclick: move |evt| evt.stop_propagation(),
                h3 { class: "modal-title", "Invalid grade" }
                p { class: "modal-body",
                    "\"{input}\" is not a number. {course_name} stays unapproved."
                }
                div { class: "modal-actions",
                    button {
                        class: "btn btn-primary",
                        r#type: "button",
                        onclick: move |_| on_ack.call(()),
                        "OK"
                    }
                }
            }
        }
    }
}
