// ABOUTME: Error types for configured function lookup and invocation
// ABOUTME: Wraps configuration and contract failures raised while running a function

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RuntimeError {
    #[error("Function '{name}' not found in configuration")]
    FunctionNotFound { name: String },

    #[error("Function '{name}' is disabled")]
    FunctionDisabled { name: String },

    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    #[error("Function error: {0}")]
    Function(#[from] crate::functions::FunctionError),
}

pub type Result<T> = std::result::Result<T, RuntimeError>;
