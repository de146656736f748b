// ABOUTME: Main library module for the elementals function framework
// ABOUTME: Exports path resolution, template rendering, functions and the CLI

pub mod bundle;
pub mod cli;
pub mod config;
pub mod functions;
pub mod path;
pub mod runtime;
pub mod template;

// Re-export commonly used types
pub use bundle::{ElementalParams, Environment, Map, Meta, ProcessInfo, Value};
pub use cli::{App, Args};
pub use config::{FunctionEntry, FunctionsConfig};
pub use functions::{ElementalFunction, ElementalResponse, FunctionOutput, FunctionRegistry};
pub use path::{resolve_lenient, resolve_path, ResolveOptions};
pub use runtime::FunctionRuntime;
pub use template::{apply_path_map, render_template, MissingPolicy, TemplateEngine};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
