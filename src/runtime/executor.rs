// ABOUTME: Function runtime resolving configured names through the registry
// ABOUTME: Instantiates functions on demand and returns normalised result mappings

use std::path::Path;
use tracing::{debug, info, instrument, warn};

use super::error::{Result, RuntimeError};
use crate::bundle::{ElementalParams, Value};
use crate::config::FunctionsConfig;
use crate::functions::{ElementalFunction, FunctionCharacteristics, FunctionRegistry};

/// A configured function as shown by `list`
#[derive(Debug, Clone)]
pub struct FunctionSummary {
    pub name: String,
    pub class: String,
    pub enabled: bool,
    /// `None` when the class is not registered.
    pub characteristics: Option<FunctionCharacteristics>,
}

pub struct FunctionRuntime {
    config: FunctionsConfig,
    registry: FunctionRegistry,
}

impl FunctionRuntime {
    pub fn new(config: FunctionsConfig) -> Self {
        Self {
            config,
            registry: FunctionRegistry::new(),
        }
    }

    pub fn with_registry(mut self, registry: FunctionRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self::new(FunctionsConfig::from_file(path)?))
    }

    /// Runtime over the discovered `configFunctions.yaml`
    pub fn discover() -> Result<Self> {
        let path = FunctionsConfig::discover()?;
        debug!("Using functions configuration: {}", path.display());
        Self::from_file(path)
    }

    pub fn config(&self) -> &FunctionsConfig {
        &self.config
    }

    pub fn registry(&self) -> &FunctionRegistry {
        &self.registry
    }

    /// Instantiate the function configured under `name`
    pub fn get_function_instance(&self, name: &str) -> Result<Box<dyn ElementalFunction>> {
        let entry = self
            .config
            .get(name)
            .ok_or_else(|| RuntimeError::FunctionNotFound {
                name: name.to_string(),
            })?;

        if !entry.enabled {
            warn!("Refusing to instantiate disabled function '{}'", name);
            return Err(RuntimeError::FunctionDisabled {
                name: name.to_string(),
            });
        }

        debug!("Instantiating '{}' as {}", name, entry.class);
        Ok(self.registry.create(&entry.class, Some(entry))?)
    }

    /// Run a configured function and return its result mapping
    #[instrument(skip(self, params))]
    pub fn run_function(&self, name: &str, params: &ElementalParams) -> Result<Value> {
        let function = self.get_function_instance(name)?;
        info!(
            "Running function '{}' ({})",
            name,
            function.characteristics().name
        );

        let result = function.run_dict(params)?;

        match result.get("status").and_then(Value::as_str) {
            Some("success") => info!("Function '{}' succeeded", name),
            _ => {
                let code = result
                    .get("error")
                    .and_then(|e| e.get("code"))
                    .and_then(Value::as_str)
                    .unwrap_or("unknown");
                warn!("Function '{}' returned an error result: {}", name, code);
            }
        }

        Ok(result)
    }

    /// Every configured function, in configuration order
    pub fn list_functions(&self) -> Vec<FunctionSummary> {
        self.config
            .iter()
            .map(|(name, entry)| FunctionSummary {
                name: name.clone(),
                class: entry.class.clone(),
                enabled: entry.enabled,
                characteristics: self
                    .registry
                    .create(&entry.class, Some(entry))
                    .ok()
                    .map(|function| function.characteristics().clone()),
            })
            .collect()
    }
}
