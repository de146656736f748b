// ABOUTME: Parameter bundle handed to every function invocation
// ABOUTME: Defines params, savepoint and the optional process, environment and meta records

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::num::NonZeroU32;
use std::path::Path;

use super::error::{BundleError, Result};
use super::record::{Node, Record};
use super::value::{Map, Value};
use crate::path::{self, PathError};
use crate::template::{MissingPolicy, TemplateEngine, TemplateError};

const BUNDLE_FIELDS: &[&str] = &["params", "savepoint", "process", "environment", "meta"];
const PROCESS_FIELDS: &[&str] = &["process_id", "version", "run_id", "source_system"];
const ENVIRONMENT_FIELDS: &[&str] = &["name", "debug", "region", "max_retries"];
const META_FIELDS: &[&str] = &["call_id", "timestamp", "config"];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ElementalParams {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub params: Map,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub savepoint: Map,
    #[serde(default)]
    pub process: Option<ProcessInfo>,
    #[serde(default)]
    pub environment: Option<Environment>,
    #[serde(default)]
    pub meta: Option<Meta>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessInfo {
    pub process_id: String,
    #[serde(default = "default_version")]
    pub version: NonZeroU32,
    #[serde(default)]
    pub run_id: Option<String>,
    #[serde(default)]
    pub source_system: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Environment {
    #[serde(default = "default_environment_name")]
    pub name: String,
    #[serde(default)]
    pub debug: bool,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub max_retries: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meta {
    #[serde(default)]
    pub call_id: Option<String>,
    #[serde(default = "Utc::now")]
    pub timestamp: DateTime<Utc>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub config: Map,
}

fn default_version() -> NonZeroU32 {
    NonZeroU32::MIN
}

fn default_environment_name() -> String {
    "dev".to_string()
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<Map, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Map>::deserialize(deserializer)?.unwrap_or_default())
}

impl ElementalParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_params(mut self, params: Map) -> Self {
        self.params = params;
        self
    }

    pub fn with_savepoint(mut self, savepoint: Map) -> Self {
        self.savepoint = savepoint;
        self
    }

    pub fn with_process(mut self, process: ProcessInfo) -> Self {
        self.process = Some(process);
        self
    }

    pub fn with_environment(mut self, environment: Environment) -> Self {
        self.environment = Some(environment);
        self
    }

    pub fn with_meta(mut self, meta: Meta) -> Self {
        self.meta = Some(meta);
        self
    }

    /// Parse a bundle from a YAML or JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(BundleError::IoError)?;
        Self::from_yaml(&content)
    }

    /// Parse a bundle from a YAML string (JSON documents are valid YAML)
    pub fn from_yaml(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).map_err(BundleError::YamlError)
    }

    /// Parse a bundle from a JSON string
    pub fn from_json(content: &str) -> Result<Self> {
        serde_json::from_str(content).map_err(BundleError::JsonError)
    }

    /// Look up a single parameter, treating explicit nulls as absent
    pub fn param(&self, key: &str) -> Option<&Value> {
        self.params.get(key).filter(|v| !v.is_null())
    }

    /// Flattened meta record, as carried on every function response
    pub fn meta_value(&self) -> Option<Value> {
        self.meta.as_ref().map(|m| Value::Map(m.to_map()))
    }

    /// Strict resolution of a `$`-prefixed path, records flattened
    pub fn resolve(&self, path: &str) -> std::result::Result<Value, PathError> {
        path::resolve_value(self, path, path::ResolveOptions::default())
    }

    /// Lenient resolution: optional `$`, null on any miss
    pub fn lookup(&self, path: &str) -> Value {
        path::resolve_lenient(self, path)
    }

    /// Render a template against this bundle
    pub fn render(
        &self,
        template: &Value,
        on_missing: MissingPolicy,
    ) -> std::result::Result<Value, TemplateError> {
        TemplateEngine::new()
            .with_missing_policy(on_missing)
            .render(template, self)
    }
}

impl ProcessInfo {
    pub fn new(process_id: impl Into<String>) -> Self {
        Self {
            process_id: process_id.into(),
            version: default_version(),
            run_id: None,
            source_system: None,
        }
    }

    pub fn with_version(mut self, version: NonZeroU32) -> Self {
        self.version = version;
        self
    }

    pub fn with_run_id(mut self, run_id: impl Into<String>) -> Self {
        self.run_id = Some(run_id.into());
        self
    }

    pub fn with_source_system(mut self, source_system: impl Into<String>) -> Self {
        self.source_system = Some(source_system.into());
        self
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self {
            name: default_environment_name(),
            debug: false,
            region: None,
            max_retries: 0,
        }
    }
}

impl Meta {
    pub fn new() -> Self {
        Self {
            call_id: None,
            timestamp: Utc::now(),
            config: Map::new(),
        }
    }

    pub fn with_call_id(mut self, call_id: impl Into<String>) -> Self {
        self.call_id = Some(call_id.into());
        self
    }

    pub fn with_config(mut self, config: Map) -> Self {
        self.config = config;
        self
    }
}

impl Default for Meta {
    fn default() -> Self {
        Self::new()
    }
}

fn optional_record<'a, R: Record>(record: &'a Option<R>) -> Node<'a> {
    match record {
        Some(r) => Node::Record(r),
        None => Node::owned(Value::Null),
    }
}

impl Record for ElementalParams {
    fn kind(&self) -> &'static str {
        "ElementalParams"
    }

    fn field_names(&self) -> &'static [&'static str] {
        BUNDLE_FIELDS
    }

    fn field(&self, name: &str) -> Option<Node<'_>> {
        match name {
            "params" => Some(Node::Mapping(&self.params)),
            "savepoint" => Some(Node::Mapping(&self.savepoint)),
            "process" => Some(optional_record(&self.process)),
            "environment" => Some(optional_record(&self.environment)),
            "meta" => Some(optional_record(&self.meta)),
            _ => None,
        }
    }
}

impl Record for ProcessInfo {
    fn kind(&self) -> &'static str {
        "ProcessInfo"
    }

    fn field_names(&self) -> &'static [&'static str] {
        PROCESS_FIELDS
    }

    fn field(&self, name: &str) -> Option<Node<'_>> {
        let value = match name {
            "process_id" => Value::from(self.process_id.as_str()),
            "version" => Value::from(self.version.get()),
            "run_id" => Value::from(self.run_id.clone()),
            "source_system" => Value::from(self.source_system.clone()),
            _ => return None,
        };
        Some(Node::owned(value))
    }
}

impl Record for Environment {
    fn kind(&self) -> &'static str {
        "Environment"
    }

    fn field_names(&self) -> &'static [&'static str] {
        ENVIRONMENT_FIELDS
    }

    fn field(&self, name: &str) -> Option<Node<'_>> {
        let value = match name {
            "name" => Value::from(self.name.as_str()),
            "debug" => Value::Bool(self.debug),
            "region" => Value::from(self.region.clone()),
            "max_retries" => Value::from(self.max_retries),
            _ => return None,
        };
        Some(Node::owned(value))
    }
}

impl Record for Meta {
    fn kind(&self) -> &'static str {
        "Meta"
    }

    fn field_names(&self) -> &'static [&'static str] {
        META_FIELDS
    }

    fn field(&self, name: &str) -> Option<Node<'_>> {
        match name {
            "call_id" => Some(Node::owned(Value::from(self.call_id.clone()))),
            "timestamp" => Some(Node::owned(Value::String(
                self.timestamp.to_rfc3339_opts(SecondsFormat::Micros, true),
            ))),
            "config" => Some(Node::Mapping(&self.config)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_fields_absent() {
        let bundle = ElementalParams::from_yaml("{}").unwrap();
        assert!(bundle.params.is_empty());
        assert!(bundle.savepoint.is_empty());
        assert!(bundle.process.is_none());
        assert!(bundle.environment.is_none());
        assert!(bundle.meta.is_none());
    }

    #[test]
    fn test_null_params_become_empty() {
        let bundle = ElementalParams::from_json(r#"{"params": null, "savepoint": null}"#).unwrap();
        assert!(bundle.params.is_empty());
        assert!(bundle.savepoint.is_empty());
    }

    #[test]
    fn test_partial_records_are_fully_populated() {
        let yaml = r#"
process:
  process_id: proc-1
environment: {}
meta:
  call_id: cid-1
"#;
        let bundle = ElementalParams::from_yaml(yaml).unwrap();

        let process = bundle.process.unwrap();
        assert_eq!(process.version.get(), 1);
        assert_eq!(process.run_id, None);

        let environment = bundle.environment.unwrap();
        assert_eq!(environment, Environment::default());
        assert_eq!(environment.name, "dev");

        let meta = bundle.meta.unwrap();
        assert_eq!(meta.call_id.as_deref(), Some("cid-1"));
        assert!(meta.config.is_empty());
    }

    #[test]
    fn test_zero_version_rejected() {
        let result = ElementalParams::from_yaml("process:\n  process_id: p\n  version: 0\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_process_requires_id() {
        let result = ElementalParams::from_yaml("process:\n  version: 2\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_record_to_map_follows_field_order() {
        let process = ProcessInfo::new("proc-123").with_run_id("run-9");
        let map = process.to_map();
        let keys: Vec<&str> = map.keys().map(|k| k.as_str()).collect();
        assert_eq!(keys, PROCESS_FIELDS.to_vec());
        assert_eq!(map["version"], Value::Int(1));
        assert_eq!(map["source_system"], Value::Null);
    }

    #[test]
    fn test_bundle_to_map_flattens_nested_records() {
        let bundle = ElementalParams::new().with_environment(Environment::default());
        let map = bundle.to_map();
        assert_eq!(map["process"], Value::Null);
        assert_eq!(map["environment"].get("name"), Some(&Value::from("dev")));
        assert_eq!(map["environment"].type_name(), "map");
    }

    #[test]
    fn test_unknown_field_is_not_defined() {
        let environment = Environment::default();
        assert!(environment.field("name").is_some());
        assert!(environment.field("hostname").is_none());
    }

    #[test]
    fn test_param_treats_null_as_absent() {
        let bundle = ElementalParams::from_json(r#"{"params": {"a": null, "b": 0}}"#).unwrap();
        assert!(bundle.param("a").is_none());
        assert_eq!(bundle.param("b"), Some(&Value::Int(0)));
        assert!(bundle.param("c").is_none());
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bundle.json");
        std::fs::write(&path, r#"{"params": {"a": 3, "b": 4}}"#).unwrap();

        let bundle = ElementalParams::from_file(&path).unwrap();
        assert_eq!(bundle.param("a"), Some(&Value::Int(3)));
    }

    #[test]
    fn test_negative_max_retries() {
        let bundle = ElementalParams::from_yaml("environment:\n  max_retries: -1\n").unwrap();
        assert_eq!(bundle.environment.as_ref().map(|e| e.max_retries), Some(-1));
        assert_eq!(bundle.resolve("$environment.max_retries").unwrap(), Value::Int(-1));
    }
}
