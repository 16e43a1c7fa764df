mod board;
mod dialogs;
mod state;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use board::CourseBoardView;
pub use dialogs::{GradeDialog, InvalidGradeDialog};
pub use state::{ViewState, view_state_from_resource};
