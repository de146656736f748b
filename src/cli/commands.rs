// ABOUTME: Command implementations for the elementals CLI
// ABOUTME: Handles run, list, validate, render, resolve and init commands

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use super::args::{parse_json_or_string, Args};
use super::config::Config;
use crate::bundle::{ElementalParams, Map, Value};
use crate::config::functions::{to_pascal, FUNCTIONS_DIR};
use crate::config::{ConfigError, ConfigValidator, FunctionsConfig, FUNCTIONS_FILE};
use crate::path::{self, ResolveOptions};
use crate::runtime::FunctionRuntime;
use crate::template::{MissingPolicy, TemplateEngine};

/// Options of the `run` command
pub struct RunOptions {
    pub bundle: Option<PathBuf>,
    pub params: Vec<String>,
    pub params_json: Option<String>,
    pub savepoint: Option<String>,
    pub output: Option<PathBuf>,
}

/// Execute a configured function
pub fn run_function(name: String, options: RunOptions, config: &Config) -> Result<()> {
    let runtime = load_runtime(config)?;

    let mut bundle = load_bundle(options.bundle.as_deref())?;
    if let Some(ref json) = options.params_json {
        bundle.params.extend(parse_object(json, "--params")?);
    }
    bundle.params.extend(Args::parse_params(&options.params)?);
    if let Some(ref json) = options.savepoint {
        bundle.savepoint.extend(parse_object(json, "--savepoint")?);
    }
    info!(
        "Invoking '{}' with {} parameters",
        name,
        bundle.params.len()
    );

    let result = runtime
        .run_function(&name, &bundle)
        .map_err(|e| anyhow::anyhow!("Function run failed: {}", e))?;
    write_json(&result, options.output.as_deref())?;

    // Return error if the function failed to ensure proper exit code
    match result.get("status").and_then(Value::as_str) {
        Some("success") => Ok(()),
        _ => Err(anyhow::anyhow!(
            "Function '{}' returned status: error",
            name
        )),
    }
}

/// List configured functions
pub fn list_functions(config: &Config) -> Result<()> {
    let runtime = load_runtime(config)?;
    let summaries = runtime.list_functions();

    println!("Configured functions ({}):", summaries.len());
    for summary in &summaries {
        let mut flags = Vec::new();
        if !summary.enabled {
            flags.push("disabled");
        }
        if summary.characteristics.is_none() {
            flags.push("unregistered class");
        }
        let flags = if flags.is_empty() {
            String::new()
        } else {
            format!(" ({})", flags.join(", "))
        };

        println!("  {} [{}]{}", summary.name, summary.class, flags);
        if let Some(ref c) = summary.characteristics {
            println!("    {}", c.description);
            println!(
                "    role: {}, sync: {}, resource: {}, duration: {}",
                c.role, c.sync, c.resource_type, c.duration
            );
        }
    }

    Ok(())
}

/// Validate the functions configuration
pub fn validate_functions(config: &Config) -> Result<()> {
    let path = functions_path(config)?;
    info!("Validating functions configuration: {}", path.display());

    let functions = FunctionsConfig::from_file(&path)
        .map_err(|e| anyhow::anyhow!("Configuration validation failed: {}", e))?;
    let report = ConfigValidator::new().validate(&functions);

    for warning in &report.warnings {
        warn!("{}", warning);
        println!("  warning: {}", warning);
    }

    if !report.is_valid {
        for error in &report.errors {
            println!("  error: {}", error);
        }
        return Err(anyhow::anyhow!(
            "Configuration validation failed with {} error(s)",
            report.errors.len()
        ));
    }

    println!("✓ Functions configuration '{}' is valid", path.display());
    println!("  Functions: {}", functions.len());

    info!("Configuration validation completed successfully");

    Ok(())
}

/// Render a template file against a bundle
pub fn render_template(
    template_path: PathBuf,
    bundle: Option<PathBuf>,
    on_missing: Option<MissingPolicy>,
    no_flatten: bool,
    config: &Config,
) -> Result<()> {
    let bundle = load_bundle(bundle.as_deref())?;
    let content = std::fs::read_to_string(&template_path)
        .with_context(|| format!("Failed to read template '{}'", template_path.display()))?;
    let template: Value = serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse template '{}'", template_path.display()))?;

    let engine = TemplateEngine::new()
        .with_missing_policy(on_missing.unwrap_or(config.on_missing))
        .with_record_flattening(config.flatten_records && !no_flatten);
    debug!(
        "Rendering {} with policy '{}'",
        template_path.display(),
        engine.missing_policy()
    );

    for path in engine.unresolved_paths(&template, &bundle) {
        debug!("Unresolved path in template: {}", path);
    }

    let rendered = engine
        .render(&template, &bundle)
        .map_err(|e| anyhow::anyhow!("Template rendering failed: {}", e))?;
    write_json(&rendered, None)
}

/// Resolve one path expression against a bundle
pub fn resolve_path(path_expr: String, bundle: Option<PathBuf>, default: Option<String>) -> Result<()> {
    let bundle = load_bundle(bundle.as_deref())?;

    let mut options = ResolveOptions::default();
    if let Some(ref default) = default {
        options = options.with_default(parse_json_or_string(default));
    }

    let value = path::resolve_value(&bundle, &path_expr, options)
        .map_err(|e| anyhow::anyhow!("Resolution failed: {}", e))?;
    write_json(&value, None)
}

/// Scaffold a configuration entry bound to the placeholder function
pub fn init_function(name: String, description: String, force: bool, config: &Config) -> Result<()> {
    let key = to_pascal(&name);
    if key.is_empty() {
        return Err(anyhow::anyhow!("Invalid function name '{}'", name));
    }

    let path = match functions_path(config) {
        Ok(path) => path,
        Err(_) => PathBuf::from(FUNCTIONS_DIR).join(FUNCTIONS_FILE),
    };
    info!("Initializing function '{}' in {}", key, path.display());

    let mut functions = if path.exists() {
        FunctionsConfig::from_file(&path)
            .map_err(|e| anyhow::anyhow!("Failed to load '{}': {}", path.display(), e))?
    } else {
        FunctionsConfig::new()
    };

    if functions.contains(&key) && !force {
        return Err(anyhow::anyhow!(
            "Function '{}' already exists in {}. Use --force to overwrite",
            key,
            path.display()
        ));
    }

    functions.insert_scaffold(&name, &description);
    functions
        .save(&path)
        .map_err(|e| anyhow::anyhow!("Failed to write '{}': {}", path.display(), e))?;

    println!("✓ Created function entry '{}' in {}", key, path.display());
    println!("  Bound to PlaceholderFunction; register an implementation to replace it");

    Ok(())
}

fn functions_path(config: &Config) -> Result<PathBuf> {
    match config.functions_file {
        Some(ref path) => Ok(path.clone()),
        None => FunctionsConfig::discover().map_err(|e| {
            if matches!(e, ConfigError::NotFound { .. }) {
                anyhow::anyhow!("{}. Pass --functions or set ELEMENTALS_FUNCTIONS_FILE", e)
            } else {
                anyhow::Error::new(e)
            }
        }),
    }
}

fn load_runtime(config: &Config) -> Result<FunctionRuntime> {
    let path = functions_path(config)?;
    debug!("Loading functions configuration: {}", path.display());
    FunctionRuntime::from_file(&path)
        .map_err(|e| anyhow::anyhow!("Failed to load '{}': {}", path.display(), e))
}

fn load_bundle(path: Option<&Path>) -> Result<ElementalParams> {
    match path {
        Some(path) => ElementalParams::from_file(path)
            .with_context(|| format!("Failed to load bundle '{}'", path.display())),
        None => Ok(ElementalParams::new()),
    }
}

fn parse_object(json: &str, flag: &str) -> Result<Map> {
    let value: Value =
        serde_json::from_str(json).with_context(|| format!("{} is not valid JSON", flag))?;
    match value {
        Value::Map(map) => Ok(map),
        other => Err(anyhow::anyhow!(
            "{} must be a JSON object, got {}",
            flag,
            other.type_name()
        )),
    }
}

fn write_json(value: &Value, output: Option<&Path>) -> Result<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| anyhow::anyhow!("Failed to serialize result to JSON: {}", e))?;

    match output {
        Some(path) => {
            std::fs::write(path, &json).map_err(|e| {
                anyhow::anyhow!("Failed to write output file '{}': {}", path.display(), e)
            })?;
            info!("Result written to: {}", path.display());
        }
        None => println!("{}", json),
    }

    Ok(())
}
