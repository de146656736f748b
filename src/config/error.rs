// ABOUTME: Error types for function configuration loading and validation
// ABOUTME: Defines loader failures and the per-entry validation findings

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read functions configuration: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Invalid functions configuration: {0}")]
    InvalidFormat(String),

    #[error("configFunctions.yaml not found in {searched} or any parent directory")]
    NotFound { searched: String },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Function '{function}' has an empty implementation class")]
    MissingClass { function: String },

    #[error("Function '{function}' uses unknown class '{class}'. Registered classes: {registered:?}")]
    UnknownClass {
        function: String,
        class: String,
        registered: Vec<String>,
    },
}

pub type Result<T> = std::result::Result<T, ConfigError>;
