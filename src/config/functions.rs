// ABOUTME: Loader for configFunctions.yaml, the logical-name to implementation mapping
// ABOUTME: Handles discovery, parsing, scaffolding of new entries and saving

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use super::error::{ConfigError, Result};
use crate::functions::{DurationClass, ResourceType, RoleInProcess, SyncType};

pub const FUNCTIONS_FILE: &str = "configFunctions.yaml";
pub const FUNCTIONS_DIR: &str = "customerfunctions";
pub const FUNCTIONS_FILE_ENV: &str = "ELEMENTALS_FUNCTIONS_FILE";

const SCAFFOLD_CLASS: &str = "PlaceholderFunction";
const SCAFFOLD_MODULE: &str = "elementals::functions::builtin::placeholder";

fn default_enabled() -> bool {
    true
}

/// One configured function
///
/// ```yaml
/// Multiply:
///   name: Multiply
///   module: elementals::functions::builtin::multiply
///   class: MultiplyFunction
///   role: business_action
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Informational only; the class name alone selects the implementation.
    #[serde(default, alias = "classModule", skip_serializing_if = "Option::is_none")]
    pub module: Option<String>,
    pub class: String,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<RoleInProcess>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sync: Option<SyncType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<ResourceType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<DurationClass>,
}

impl FunctionEntry {
    pub fn new(class: impl Into<String>) -> Self {
        Self {
            name: None,
            description: None,
            module: None,
            class: class.into(),
            enabled: true,
            role: None,
            sync: None,
            resource_type: None,
            duration: None,
        }
    }

    /// Entry written by `init`: every characteristic spelled out, bound to the placeholder
    pub fn scaffold(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            description: Some(description.into()),
            module: Some(SCAFFOLD_MODULE.to_string()),
            class: SCAFFOLD_CLASS.to_string(),
            enabled: true,
            role: Some(RoleInProcess::BusinessAction),
            sync: Some(SyncType::Sync),
            resource_type: Some(ResourceType::Cpu),
            duration: Some(DurationClass::Short),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FunctionsConfig {
    entries: IndexMap<String, FunctionEntry>,
}

impl FunctionsConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::IoError)?;
        Self::from_yaml(&content)
    }

    /// Parse from YAML. An empty document is an empty configuration.
    pub fn from_yaml(content: &str) -> Result<Self> {
        let document: serde_yaml::Value = serde_yaml::from_str(content)?;
        match document {
            serde_yaml::Value::Null => Ok(Self::default()),
            serde_yaml::Value::Mapping(_) => Ok(serde_yaml::from_value(document)?),
            _ => Err(ConfigError::InvalidFormat(format!(
                "{} must contain a mapping at the top level",
                FUNCTIONS_FILE
            ))),
        }
    }

    /// Locate the configuration: `ELEMENTALS_FUNCTIONS_FILE` first, then the
    /// current directory and its ancestors.
    pub fn discover() -> Result<PathBuf> {
        if let Ok(path) = std::env::var(FUNCTIONS_FILE_ENV) {
            return Ok(PathBuf::from(path));
        }
        let cwd = std::env::current_dir()?;
        Self::find_from(&cwd).ok_or_else(|| ConfigError::NotFound {
            searched: cwd.display().to_string(),
        })
    }

    /// Walk up from `start` looking for `configFunctions.yaml` or
    /// `customerfunctions/configFunctions.yaml`
    pub fn find_from(start: &Path) -> Option<PathBuf> {
        start.ancestors().find_map(|dir| {
            [
                dir.join(FUNCTIONS_FILE),
                dir.join(FUNCTIONS_DIR).join(FUNCTIONS_FILE),
            ]
            .into_iter()
            .find(|candidate| candidate.is_file())
        })
    }

    pub fn load() -> Result<Self> {
        Self::from_file(Self::discover()?)
    }

    pub fn get(&self, name: &str) -> Option<&FunctionEntry> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn names(&self) -> Vec<&str> {
        self.entries.keys().map(|k| k.as_str()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &FunctionEntry)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn insert(&mut self, name: impl Into<String>, entry: FunctionEntry) -> Option<FunctionEntry> {
        self.entries.insert(name.into(), entry)
    }

    /// Add a placeholder entry keyed by the PascalCase form of `name`.
    /// Returns the key used.
    pub fn insert_scaffold(&mut self, name: &str, description: &str) -> String {
        let key = to_pascal(name);
        self.entries
            .insert(key.clone(), FunctionEntry::scaffold(key.as_str(), description));
        key
    }

    /// Write the configuration with its function names sorted
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let sorted: BTreeMap<&String, &FunctionEntry> = self.entries.iter().collect();
        let content = serde_yaml::to_string(&sorted)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

/// "sum_two", "sum-two" and "sum two" all become "SumTwo".
///
/// Each part is capitalized: first letter upper, the rest lower.
pub fn to_pascal(name: &str) -> String {
    name.split(|c: char| c == '_' || c == '-' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect::<String>(),
                None => String::new(),
            }
        })
        .collect()
}
