// ABOUTME: Elemental function contract and the registry of implementation classes
// ABOUTME: Contains the invocation trait, result normalisation and the built-in functions

pub mod builtin;
pub mod characteristics;
pub mod error;
pub mod response;

pub use characteristics::{
    DurationClass, FunctionCharacteristics, ResourceType, RoleInProcess, SyncType,
};
pub use error::{FunctionError, Result};
pub use response::{ElementalResponse, ErrorItem, FunctionOutput, ResponseStatus};

use std::collections::HashMap;

use crate::bundle::{ElementalParams, Value};
use crate::config::FunctionEntry;

pub trait ElementalFunction: Send + Sync {
    fn characteristics(&self) -> &FunctionCharacteristics;

    fn run(&self, params: &ElementalParams) -> FunctionOutput;

    /// Run and normalise the output to the plain result mapping.
    fn run_dict(&self, params: &ElementalParams) -> Result<Value> {
        match self.run(params) {
            FunctionOutput::Response(response) => Ok(response.to_value()),
            FunctionOutput::Raw(value @ Value::Map(_)) => Ok(value),
            FunctionOutput::Raw(value @ Value::Record(_)) => Ok(value.flatten_records()),
            FunctionOutput::Raw(other) => Err(FunctionError::InvalidOutput {
                found: other.type_name(),
            }),
        }
    }
}

/// Builds a function instance, handing it the configuration entry it was bound from.
pub type FunctionFactory = fn(Option<&FunctionEntry>) -> Box<dyn ElementalFunction>;

pub struct FunctionRegistry {
    factories: HashMap<String, FunctionFactory>,
}

impl FunctionRegistry {
    pub fn new() -> Self {
        let mut registry = Self::empty();

        registry.register(builtin::MultiplyFunction::CLASS, builtin::MultiplyFunction::create);
        registry.register(builtin::EchoFunction::CLASS, builtin::EchoFunction::create);
        registry.register(builtin::ConcatFunction::CLASS, builtin::ConcatFunction::create);
        registry.register(builtin::LcmFunction::CLASS, builtin::LcmFunction::create);
        registry.register(
            builtin::PlaceholderFunction::CLASS,
            builtin::PlaceholderFunction::create,
        );

        registry
    }

    pub fn empty() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    pub fn register(&mut self, class: impl Into<String>, factory: FunctionFactory) {
        self.factories.insert(class.into(), factory);
    }

    pub fn get_factory(&self, class: &str) -> Option<FunctionFactory> {
        self.factories.get(class).copied()
    }

    pub fn contains(&self, class: &str) -> bool {
        self.factories.contains_key(class)
    }

    pub fn create(
        &self,
        class: &str,
        entry: Option<&FunctionEntry>,
    ) -> Result<Box<dyn ElementalFunction>> {
        self.get_factory(class)
            .map(|factory| factory(entry))
            .ok_or_else(|| FunctionError::UnknownClass {
                class: class.to_string(),
            })
    }

    /// Registered class names, sorted.
    pub fn list(&self) -> Vec<&str> {
        let mut classes: Vec<&str> = self.factories.keys().map(|k| k.as_str()).collect();
        classes.sort_unstable();
        classes
    }
}

impl Default for FunctionRegistry {
    fn default() -> Self {
        Self::new()
    }
}
