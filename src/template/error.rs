// ABOUTME: Error types for template rendering operations
// ABOUTME: Covers unresolved paths under the error policy and non-mapping path maps

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    #[error("Path not found: {path}")]
    PathNotFound { path: String },

    #[error("path_map must resolve to a map, got {found}")]
    NotAMapping { found: &'static str },

    #[error("Invalid missing-value policy '{0}': on_missing must be one of: none, keep, error")]
    InvalidPolicy(String),
}

pub type Result<T> = std::result::Result<T, TemplateError>;
