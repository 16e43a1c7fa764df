#![forbid(unsafe_code)]

pub mod app_services;
pub mod controller;
pub mod error;
pub mod prompt;

pub use app_services::AppServices;
pub use controller::{CourseController, ToggleOutcome};
pub use error::{AppServicesError, ControllerError};
pub use prompt::{ChannelPrompt, GradePrompt, PromptRequest, ScriptedPrompt};
