// ABOUTME: Template renderer substituting path expressions inside nested structures
// ABOUTME: Applies the missing-value policy and record flattening while preserving shape

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

use super::error::{Result, TemplateError};
use crate::bundle::{Map, Node, Record, Value};
use crate::path::{is_path_expr, lookup, tokenize};

/// What to substitute for a path expression that does not resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingPolicy {
    /// Substitute null
    #[default]
    None,
    /// Keep the original expression string
    Keep,
    /// Abort the whole render
    Error,
}

impl FromStr for MissingPolicy {
    type Err = TemplateError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "none" => Ok(MissingPolicy::None),
            "keep" => Ok(MissingPolicy::Keep),
            "error" => Ok(MissingPolicy::Error),
            other => Err(TemplateError::InvalidPolicy(other.to_string())),
        }
    }
}

impl fmt::Display for MissingPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MissingPolicy::None => write!(f, "none"),
            MissingPolicy::Keep => write!(f, "keep"),
            MissingPolicy::Error => write!(f, "error"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct TemplateEngine {
    on_missing: MissingPolicy,
    flatten_records: bool,
}

impl TemplateEngine {
    /// Engine substituting null for misses and flattening records
    pub fn new() -> Self {
        Self {
            on_missing: MissingPolicy::None,
            flatten_records: true,
        }
    }

    pub fn with_missing_policy(mut self, on_missing: MissingPolicy) -> Self {
        self.on_missing = on_missing;
        self
    }

    pub fn with_record_flattening(mut self, flatten: bool) -> Self {
        self.flatten_records = flatten;
        self
    }

    pub fn missing_policy(&self) -> MissingPolicy {
        self.on_missing
    }

    /// Render a template, replacing every path expression with its value.
    ///
    /// Maps keep their keys and order, lists and tuples keep their length,
    /// and any other value is returned as-is.
    pub fn render(&self, template: &Value, root: &dyn Record) -> Result<Value> {
        match template {
            Value::Map(map) => {
                let mut rendered = Map::with_capacity(map.len());
                for (key, value) in map {
                    rendered.insert(key.clone(), self.render(value, root)?);
                }
                Ok(Value::Map(rendered))
            }
            Value::List(items) => Ok(Value::List(self.render_items(items, root)?)),
            Value::Tuple(items) => Ok(Value::Tuple(self.render_items(items, root)?)),
            Value::String(text) if is_path_expr(text) => self.resolve_expression(text, root),
            other => Ok(other.clone()),
        }
    }

    fn render_items(&self, items: &[Value], root: &dyn Record) -> Result<Vec<Value>> {
        items.iter().map(|item| self.render(item, root)).collect()
    }

    /// Render a template whose result must be a mapping.
    pub fn apply_path_map(&self, path_map: &Value, root: &dyn Record) -> Result<Map> {
        match self.render(path_map, root)? {
            Value::Map(map) => Ok(map),
            other => Err(TemplateError::NotAMapping {
                found: other.type_name(),
            }),
        }
    }

    /// Resolve a single expression under this engine's policy
    pub fn resolve_expression(&self, expression: &str, root: &dyn Record) -> Result<Value> {
        match lookup(Node::Record(root), &tokenize(expression)) {
            Some(node) => Ok(node.into_value(self.flatten_records)),
            None => {
                debug!(
                    "Unresolved path expression '{}' (on_missing={})",
                    expression, self.on_missing
                );
                match self.on_missing {
                    MissingPolicy::None => Ok(Value::Null),
                    MissingPolicy::Keep => Ok(Value::String(expression.to_string())),
                    MissingPolicy::Error => Err(TemplateError::PathNotFound {
                        path: expression.to_string(),
                    }),
                }
            }
        }
    }

    /// Check whether a template contains any path expressions
    pub fn has_path_expressions(&self, template: &Value) -> bool {
        match template {
            Value::Map(map) => map.values().any(|v| self.has_path_expressions(v)),
            Value::List(items) | Value::Tuple(items) => {
                items.iter().any(|v| self.has_path_expressions(v))
            }
            Value::String(text) => is_path_expr(text),
            _ => false,
        }
    }

    /// Path expressions in `template` that do not resolve, in traversal order
    pub fn unresolved_paths(&self, template: &Value, root: &dyn Record) -> Vec<String> {
        let mut missing = Vec::new();
        collect_unresolved(template, root, &mut missing);
        missing
    }
}

fn collect_unresolved(template: &Value, root: &dyn Record, missing: &mut Vec<String>) {
    match template {
        Value::Map(map) => {
            for value in map.values() {
                collect_unresolved(value, root, missing);
            }
        }
        Value::List(items) | Value::Tuple(items) => {
            for item in items {
                collect_unresolved(item, root, missing);
            }
        }
        Value::String(text) if is_path_expr(text) => {
            if lookup(Node::Record(root), &tokenize(text)).is_none() {
                missing.push(text.clone());
            }
        }
        _ => {}
    }
}

impl Default for TemplateEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Render a template with the given missing-value policy
pub fn render_template(
    template: &Value,
    root: &dyn Record,
    on_missing: MissingPolicy,
) -> Result<Value> {
    TemplateEngine::new()
        .with_missing_policy(on_missing)
        .render(template, root)
}

/// Render a path map whose result must be a mapping
pub fn apply_path_map(path_map: &Value, root: &dyn Record, on_missing: MissingPolicy) -> Result<Map> {
    TemplateEngine::new()
        .with_missing_policy(on_missing)
        .apply_path_map(path_map, root)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundle::{ElementalParams, Environment, Meta, ProcessInfo};
    use serde_json::json;
    use std::num::NonZeroU32;

    fn sample_params() -> ElementalParams {
        ElementalParams::from_json(
            &json!({
                "params": {"a": 2, "b": 5, "items": [{"val": 10}, {"val": 20}]},
                "savepoint": {"last": {"product": 40}},
            })
            .to_string(),
        )
        .unwrap()
        .with_process(
            ProcessInfo::new("proc-123")
                .with_version(NonZeroU32::new(2).unwrap())
                .with_run_id("run-9"),
        )
        .with_environment(Environment {
            name: "qa".to_string(),
            debug: true,
            region: Some("eu".to_string()),
            max_retries: 3,
        })
        .with_meta(Meta::new().with_call_id("cid-1"))
    }

    #[test]
    fn test_missing_modes() {
        let p = sample_params();
        let template = Value::from(json!({"x": "$params.nope"}));

        let none = render_template(&template, &p, MissingPolicy::None).unwrap();
        assert_eq!(none, Value::from(json!({"x": null})));

        let keep = render_template(&template, &p, MissingPolicy::Keep).unwrap();
        assert_eq!(keep, Value::from(json!({"x": "$params.nope"})));

        let err = render_template(&template, &p, MissingPolicy::Error).unwrap_err();
        assert!(matches!(err, TemplateError::PathNotFound { ref path } if path == "$params.nope"));
    }

    #[test]
    fn test_nested_template_with_tuple() {
        let p = sample_params();
        let mut template = Map::new();
        template.insert("product".to_string(), "$savepoint.last.product".into());
        template.insert(
            "inputs".to_string(),
            Value::from(json!({"a": "$params.a", "b": "$params.b"})),
        );
        template.insert(
            "pair".to_string(),
            Value::Tuple(vec!["static".into(), "$process.run_id".into()]),
        );
        template.insert(
            "list".to_string(),
            Value::from(json!(["$params.items[0].val", "$params.items[1].val"])),
        );

        let out = TemplateEngine::new()
            .render(&Value::Map(template), &p)
            .unwrap();

        let mut expected = Map::new();
        expected.insert("product".to_string(), Value::Int(40));
        expected.insert("inputs".to_string(), Value::from(json!({"a": 2, "b": 5})));
        expected.insert(
            "pair".to_string(),
            Value::Tuple(vec!["static".into(), "run-9".into()]),
        );
        expected.insert("list".to_string(), Value::from(json!([10, 20])));
        assert_eq!(out, Value::Map(expected));
    }

    #[test]
    fn test_error_policy_aborts_on_first_miss() {
        let p = sample_params();
        let template = Value::from(json!({
            "ok": "$params.a",
            "first": ["$params.missing_one"],
            "second": "$params.missing_two",
        }));

        let engine = TemplateEngine::new().with_missing_policy(MissingPolicy::Error);
        let err = engine.render(&template, &p).unwrap_err();
        assert!(matches!(err, TemplateError::PathNotFound { ref path } if path == "$params.missing_one"));
    }

    #[test]
    fn test_literals_pass_through() {
        let p = sample_params();
        let template = Value::from(json!({
            "n": 42,
            "s": "plain text",
            "f": 1.5,
            "b": false,
            "z": null,
            "l": ["params.a", "x$y"],
        }));
        let out = TemplateEngine::new().render(&template, &p).unwrap();
        assert_eq!(out, template);
    }

    #[test]
    fn test_map_keys_are_not_rendered() {
        let p = sample_params();
        let template = Value::from(json!({"$params.a": "$params.b"}));
        let out = TemplateEngine::new().render(&template, &p).unwrap();
        assert_eq!(out, Value::from(json!({"$params.a": 5})));
    }

    #[test]
    fn test_apply_path_map_flattens_models() {
        let p = sample_params();
        let path_map = Value::from(json!({"sum": "$params.a", "env": "$environment"}));

        let out = apply_path_map(&path_map, &p, MissingPolicy::None).unwrap();
        assert_eq!(out["sum"], Value::Int(2));
        assert_eq!(out["env"].type_name(), "map");
        assert_eq!(out["env"].get("name"), Some(&Value::from("qa")));
    }

    #[test]
    fn test_record_flattening_disabled() {
        let p = sample_params();
        let engine = TemplateEngine::new().with_record_flattening(false);
        let out = engine
            .render(&Value::from(json!({"env": "$environment"})), &p)
            .unwrap();

        match out.get("env") {
            Some(Value::Record(record)) => {
                assert_eq!(record.kind, "Environment");
                assert_eq!(record.fields["region"], Value::from("eu"));
            }
            other => panic!("expected record, got {:?}", other),
        }
    }

    #[test]
    fn test_apply_path_map_requires_mapping() {
        let p = sample_params();
        let err = apply_path_map(&Value::from("$params.a"), &p, MissingPolicy::None).unwrap_err();
        assert!(matches!(err, TemplateError::NotAMapping { found: "int" }));

        let err = apply_path_map(&Value::from(json!(["$params.a"])), &p, MissingPolicy::None)
            .unwrap_err();
        assert!(matches!(err, TemplateError::NotAMapping { found: "list" }));
    }

    #[test]
    fn test_scalar_template_root() {
        let p = sample_params();
        let out = TemplateEngine::new()
            .render(&Value::from("$process.process_id"), &p)
            .unwrap();
        assert_eq!(out, Value::from("proc-123"));
    }

    #[test]
    fn test_policy_parsing() {
        assert_eq!("keep".parse::<MissingPolicy>().unwrap(), MissingPolicy::Keep);
        assert_eq!("none".parse::<MissingPolicy>().unwrap(), MissingPolicy::None);
        assert_eq!("error".parse::<MissingPolicy>().unwrap(), MissingPolicy::Error);

        let err = "ignore".parse::<MissingPolicy>().unwrap_err();
        assert!(err.to_string().contains("none, keep, error"));
    }

    #[test]
    fn test_has_path_expressions() {
        let engine = TemplateEngine::new();
        assert!(engine.has_path_expressions(&Value::from(json!({"a": ["x", "$params.a"]}))));
        assert!(engine.has_path_expressions(&Value::Tuple(vec!["$meta".into()])));
        assert!(!engine.has_path_expressions(&Value::from(json!({"a": ["x", 1]}))));
    }

    #[test]
    fn test_unresolved_paths_in_order() {
        let p = sample_params();
        let template = Value::from(json!({
            "a": "$params.a",
            "b": ["$params.nope", {"c": "$process.hostname"}],
        }));
        let missing = TemplateEngine::new().unresolved_paths(&template, &p);
        assert_eq!(missing, vec!["$params.nope", "$process.hostname"]);
    }
}
