pub const PROJECT_NAME: &str = "quill";

pub mod config;
pub mod editor;
pub mod error;
pub mod note;
