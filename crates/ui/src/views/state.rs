use dioxus::prelude::*;

/// What a resource-backed view should render this frame.
#[derive(Clone, Debug, PartialEq)]
pub enum ViewState<T> {
    /// The loader has not produced a value yet, or is being rerun.
    Loading,
    Ready(T),
}

/// Project a loader resource onto a `ViewState`.
///
/// While a restarted resource is pending the previous value is kept on screen,
/// so a toggle does not flash the loading placeholder.
#[must_use]
pub fn view_state_from_resource<T: Clone>(resource: &Resource<T>) -> ViewState<T> {
    match resource.value().read().as_ref() {
        Some(data) => ViewState::Ready(data.clone()),
        None => ViewState::Loading,
    }
}
