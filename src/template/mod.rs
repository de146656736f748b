// ABOUTME: Template module for rendering path expressions in nested structures
// ABOUTME: Provides the template engine, missing-value policies and render helpers

pub mod engine;
pub mod error;

pub use engine::{apply_path_map, render_template, MissingPolicy, TemplateEngine};
pub use error::{Result, TemplateError};
