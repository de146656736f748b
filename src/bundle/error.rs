// ABOUTME: Error types for loading parameter bundles
// ABOUTME: Wraps IO and YAML/JSON parse failures raised while reading bundle files

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BundleError {
    #[error("Failed to read bundle file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse bundle YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Failed to parse bundle JSON: {0}")]
    JsonError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, BundleError>;
