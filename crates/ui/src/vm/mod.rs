mod board_vm;

pub use board_vm::{CourseTileVm, ProgressVm, TermColumnVm, map_progress, map_term_columns};
