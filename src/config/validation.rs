// ABOUTME: Validation of function configuration against the registered implementations
// ABOUTME: Reports unknown classes as errors and suspicious entries as warnings

use super::error::ValidationError;
use super::functions::FunctionsConfig;
use crate::functions::FunctionRegistry;

#[derive(Debug, Clone)]
pub struct ValidationReport {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<String>,
    pub is_valid: bool,
}

pub struct ConfigValidator {
    registry: FunctionRegistry,
}

impl ConfigValidator {
    pub fn new() -> Self {
        Self {
            registry: FunctionRegistry::new(),
        }
    }

    pub fn with_registry(mut self, registry: FunctionRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn validate(&self, config: &FunctionsConfig) -> ValidationReport {
        let mut report = ValidationReport::new();

        if config.is_empty() {
            report.warnings.push("No functions configured".to_string());
        }

        for (function, entry) in config.iter() {
            if entry.class.trim().is_empty() {
                report.errors.push(ValidationError::MissingClass {
                    function: function.clone(),
                });
            } else if !self.registry.contains(&entry.class) {
                report.errors.push(ValidationError::UnknownClass {
                    function: function.clone(),
                    class: entry.class.clone(),
                    registered: self.registry.list().into_iter().map(String::from).collect(),
                });
            }

            if !entry.enabled {
                report
                    .warnings
                    .push(format!("Function '{}' is disabled", function));
            }

            if let Some(ref name) = entry.name {
                if name != function {
                    report.warnings.push(format!(
                        "Function '{}' declares a different name '{}'",
                        function, name
                    ));
                }
            }
        }

        report.is_valid = report.errors.is_empty();
        report
    }
}

impl Default for ConfigValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self::new()
    }
}

impl ValidationReport {
    pub fn new() -> Self {
        Self {
            errors: Vec::new(),
            warnings: Vec::new(),
            is_valid: true,
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}
