// ABOUTME: Common utilities and helpers for integration tests
// ABOUTME: Provides bundle builders, sample configurations and temporary test environments

#![allow(dead_code)]

use serde_json::json;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use elementals::bundle::{ElementalParams, Map, Meta, ProcessInfo, Value};

pub const FUNCTIONS_YAML: &str = r#"
Multiply:
  name: Multiply
  module: elementals::functions::builtin::multiply
  class: MultiplyFunction
Echo:
  class: EchoFunction
Concat:
  class: ConcatFunction
  description: Joins two texts
LCM:
  class: LcmFunction
  role: business_rule_validation
  duration: medium
Legacy:
  class: EchoFunction
  enabled: false
"#;

pub fn map(value: serde_json::Value) -> Map {
    Value::from(value)
        .into_map()
        .expect("test value must be a JSON object")
}

pub struct TestBundleBuilder {
    params: Map,
    savepoint: Map,
    process: Option<ProcessInfo>,
    meta: Option<Meta>,
}

impl TestBundleBuilder {
    pub fn new() -> Self {
        Self {
            params: Map::new(),
            savepoint: Map::new(),
            process: None,
            meta: None,
        }
    }

    pub fn with_params(mut self, params: serde_json::Value) -> Self {
        self.params = map(params);
        self
    }

    pub fn with_savepoint(mut self, savepoint: serde_json::Value) -> Self {
        self.savepoint = map(savepoint);
        self
    }

    pub fn with_run_id(mut self, run_id: &str) -> Self {
        self.process = Some(ProcessInfo::new("proc-test").with_run_id(run_id));
        self
    }

    pub fn with_call_id(mut self, call_id: &str) -> Self {
        self.meta = Some(Meta::new().with_call_id(call_id));
        self
    }

    pub fn build(self) -> ElementalParams {
        let mut bundle = ElementalParams::new()
            .with_params(self.params)
            .with_savepoint(self.savepoint);
        if let Some(process) = self.process {
            bundle = bundle.with_process(process);
        }
        if let Some(meta) = self.meta {
            bundle = bundle.with_meta(meta);
        }
        bundle
    }
}

impl Default for TestBundleBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Bundle used by the nested-template scenarios
pub fn scenario_bundle() -> ElementalParams {
    TestBundleBuilder::new()
        .with_params(json!({"items": [{"val": 10}, {"val": 20}]}))
        .with_savepoint(json!({"last": {"product": 40}}))
        .with_run_id("run-9")
        .build()
}

pub struct TestEnvironment {
    pub temp_dir: TempDir,
}

impl TestEnvironment {
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn write_file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.path().join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&path, content).expect("Failed to write test file");
        path
    }

    pub fn functions_file(&self) -> PathBuf {
        self.write_file("customerfunctions/configFunctions.yaml", FUNCTIONS_YAML)
    }

    pub fn bundle_file(&self, name: &str, bundle: &serde_json::Value) -> PathBuf {
        let content = serde_json::to_string_pretty(bundle).expect("Failed to serialize bundle");
        self.write_file(&format!("{}.json", name), &content)
    }

    pub fn output_file(&self, name: &str) -> PathBuf {
        self.path().join(format!("{}_output.json", name))
    }
}

impl Default for TestEnvironment {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_creation() {
        let env = TestEnvironment::new();
        assert!(env.path().exists());

        let functions = env.functions_file();
        assert!(functions.ends_with("customerfunctions/configFunctions.yaml"));
        assert!(functions.exists());
    }

    #[test]
    fn test_bundle_builder() {
        let bundle = TestBundleBuilder::new()
            .with_params(json!({"a": 1}))
            .with_call_id("c-1")
            .build();
        assert_eq!(bundle.param("a"), Some(&Value::Int(1)));
        assert!(bundle.process.is_none());
        assert!(bundle.meta.is_some());
    }
}
