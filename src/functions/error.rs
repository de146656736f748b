// ABOUTME: Error types for function invocation and registry lookups
// ABOUTME: Covers result-contract violations and unregistered implementation classes

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FunctionError {
    #[error("run() must return a mapping or a response, got: {found}")]
    InvalidOutput { found: &'static str },

    #[error("Implementation class not registered: {class}")]
    UnknownClass { class: String },
}

pub type Result<T> = std::result::Result<T, FunctionError>;
