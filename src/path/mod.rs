// ABOUTME: Path expression module for addressing nested bundle fields
// ABOUTME: Exports the tokenizer and the strict and lenient resolvers

pub mod error;
pub mod resolver;
pub mod token;

pub use error::{PathError, Result};
pub use resolver::{lookup, resolve_lenient, resolve_path, resolve_value, ResolveOptions};
pub use token::{is_path_expr, tokenize, Token};
