//! Email template rendering (Jinja syntax, files under `templates/`).

pub mod engine;

pub use engine::{TemplateError, TemplateRenderer};
