use dioxus::prelude::*;

use crate::context::AppContext;
use crate::views::CourseBoardView;

#[component]
pub fn App() -> Element {
    let ctx = use_context::<AppContext>();
    let title = ctx.title().to_owned();

    rsx! {
        document::Stylesheet { href: asset!("/assets/style.css") }
        document::Title { "{title}" }

        main { class: "app-root",
            h1 { class: "app-title", "{title}" }
            ErrorBoundary {
                handle_error: |errors: ErrorContext| rsx! {
                    div { class: "fatal",
                        h2 { "The course board failed to render" }
                        pre { "{errors:?}" }
                    }
                },
                CourseBoardView {}
            }
        }
    }
}
