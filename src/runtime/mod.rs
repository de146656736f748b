// ABOUTME: Runtime module binding configured names to function instances
// ABOUTME: Exports the function runtime and its error type

pub mod error;
pub mod executor;

pub use error::{Result, RuntimeError};
pub use executor::{FunctionRuntime, FunctionSummary};
