// ABOUTME: Path resolver walking tokens through records, mappings and sequences
// ABOUTME: Provides the strict `$`-enforcing entry point and the lenient template-friendly one

use std::borrow::Cow;

use super::error::{PathError, Result};
use super::token::{is_path_expr, tokenize, Token};
use crate::bundle::{Node, Record, Value};

/// Options for strict resolution.
#[derive(Debug, Clone)]
pub struct ResolveOptions {
    /// Returned instead of failing when the path cannot be resolved.
    pub default: Option<Value>,
    /// Convert a record result into a plain map of its fields.
    pub flatten_records: bool,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            default: None,
            flatten_records: true,
        }
    }
}

impl ResolveOptions {
    pub fn with_default(mut self, default: Value) -> Self {
        self.default = Some(default);
        self
    }

    pub fn with_record_flattening(mut self, flatten: bool) -> Self {
        self.flatten_records = flatten;
        self
    }
}

/// Walk `tokens` from `root`. `None` is the missing outcome and stops the walk.
pub fn lookup<'a>(root: Node<'a>, tokens: &[Token]) -> Option<Node<'a>> {
    tokens.iter().try_fold(root, step)
}

fn step<'a>(current: Node<'a>, token: &Token) -> Option<Node<'a>> {
    match current {
        Node::Record(record) => match token {
            Token::Key(name) => record.field(name),
            Token::Index(_) => None,
        },
        Node::Mapping(map) => match token {
            Token::Key(key) => map.get(key).map(Node::borrowed),
            Token::Index(_) => None,
        },
        Node::Value(Cow::Borrowed(value)) => child(value, token).map(Node::Value),
        Node::Value(Cow::Owned(value)) => {
            child(&value, token).map(|c| Node::owned(c.into_owned()))
        }
    }
}

fn child<'v>(value: &'v Value, token: &Token) -> Option<Cow<'v, Value>> {
    match (value, token) {
        (Value::Null, _) => None,
        (Value::Record(record), Token::Key(name)) => record.fields.get(name).map(Cow::Borrowed),
        (Value::Map(map), Token::Key(key)) => map.get(key).map(Cow::Borrowed),
        (Value::List(items) | Value::Tuple(items), Token::Index(index)) => {
            signed_index(items.len(), *index).map(|i| Cow::Borrowed(&items[i]))
        }
        // Strings are item-indexable by character
        (Value::String(text), Token::Index(index)) => {
            let count = text.chars().count();
            signed_index(count, *index)
                .and_then(|i| text.chars().nth(i))
                .map(|c| Cow::Owned(Value::String(c.to_string())))
        }
        _ => None,
    }
}

/// Map a possibly negative index onto `0..len`.
fn signed_index(len: usize, index: i64) -> Option<usize> {
    let len = i64::try_from(len).ok()?;
    let resolved = if index < 0 { len + index } else { index };
    if (0..len).contains(&resolved) {
        usize::try_from(resolved).ok()
    } else {
        None
    }
}

/// Strict resolution against a record root.
///
/// The path must start with `$`. A miss returns the configured default, or
/// `PathError::NotFound` carrying the original path when there is none.
pub fn resolve_path<'a>(
    root: &'a dyn Record,
    path: &str,
    options: ResolveOptions,
) -> Result<Node<'a>> {
    if !is_path_expr(path) {
        return Err(PathError::InvalidExpression {
            path: path.to_string(),
        });
    }

    match lookup(Node::Record(root), &tokenize(path)) {
        Some(node) if options.flatten_records && node.is_record() => {
            Ok(Node::owned(node.into_value(true)))
        }
        Some(node) => Ok(node),
        None => options
            .default
            .map(Node::owned)
            .ok_or_else(|| PathError::NotFound {
                path: path.to_string(),
            }),
    }
}

/// Strict resolution producing an owned value.
pub fn resolve_value(root: &dyn Record, path: &str, options: ResolveOptions) -> Result<Value> {
    let flatten = options.flatten_records;
    resolve_path(root, path, options).map(|node| node.into_value(flatten))
}

/// Lenient resolution: the `$` is optional and any miss yields `Value::Null`.
pub fn resolve_lenient(root: &dyn Record, path: &str) -> Value {
    lookup(Node::Record(root), &tokenize(path))
        .map(|node| node.into_value(true))
        .unwrap_or(Value::Null)
}
