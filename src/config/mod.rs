// ABOUTME: Function configuration module mapping logical names to implementations
// ABOUTME: Exports the configuration loader, its entries and the configuration validator

pub mod error;
pub mod functions;
pub mod validation;

pub use error::{ConfigError, Result, ValidationError};
pub use functions::{FunctionEntry, FunctionsConfig, FUNCTIONS_FILE, FUNCTIONS_FILE_ENV};
pub use validation::{ConfigValidator, ValidationReport};
