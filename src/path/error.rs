// ABOUTME: Error types for path expression resolution
// ABOUTME: Separates malformed expressions from paths that do not resolve

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    #[error("Path expressions must start with '$': {path}")]
    InvalidExpression { path: String },

    #[error("Path not found: {path}")]
    NotFound { path: String },
}

pub type Result<T> = std::result::Result<T, PathError>;
