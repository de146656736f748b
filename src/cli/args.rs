// ABOUTME: Command line argument definitions and parsing using Clap
// ABOUTME: Defines the main CLI structure and subcommands for elementals

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::bundle::{Map, Value};
use crate::template::MissingPolicy;

#[derive(Parser)]
#[command(name = "elementals")]
#[command(about = "Run configured elemental functions and render path templates against bundles")]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(short, long, global = true, help = "Path to configuration file")]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, help = "Disable colored output")]
    pub no_color: bool,

    #[arg(
        short,
        long,
        global = true,
        help = "Path to configFunctions.yaml (overrides discovery)"
    )]
    pub functions: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run a configured function and print its result mapping
    Run {
        #[arg(help = "Configured function name")]
        name: String,

        #[arg(short, long, help = "Bundle file (YAML or JSON)")]
        bundle: Option<PathBuf>,

        #[arg(
            short = 'P',
            long = "param",
            help = "Set a parameter (key=value, value parsed as JSON when possible)"
        )]
        params: Vec<String>,

        #[arg(long = "params", help = "Parameters as a JSON object")]
        params_json: Option<String>,

        #[arg(long, help = "Savepoint as a JSON object")]
        savepoint: Option<String>,

        #[arg(short, long, help = "Write the result to a file instead of stdout")]
        output: Option<PathBuf>,
    },

    /// List configured functions and their characteristics
    List,

    /// Validate the functions configuration
    Validate,

    /// Render a JSON or YAML template against a bundle
    Render {
        #[arg(help = "Template file (YAML or JSON)")]
        template: PathBuf,

        #[arg(short, long, help = "Bundle file (YAML or JSON)")]
        bundle: Option<PathBuf>,

        #[arg(long, help = "Missing-value policy: none, keep or error")]
        on_missing: Option<MissingPolicy>,

        #[arg(long, help = "Keep structured records instead of flattening them")]
        no_flatten: bool,
    },

    /// Resolve a single path expression against a bundle
    Resolve {
        #[arg(help = "Path expression, e.g. '$params.items[0]'")]
        path: String,

        #[arg(short, long, help = "Bundle file (YAML or JSON)")]
        bundle: Option<PathBuf>,

        #[arg(long, help = "JSON value returned when the path is missing")]
        default: Option<String>,
    },

    /// Scaffold a new configuration entry bound to the placeholder function
    Init {
        #[arg(help = "Name of the function to create")]
        name: String,

        #[arg(short, long, help = "Human description")]
        description: String,

        #[arg(long, help = "Overwrite an existing entry")]
        force: bool,
    },
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parse parameters from key=value format
    pub fn parse_params(params: &[String]) -> anyhow::Result<Map> {
        let mut parsed = Map::new();

        for param in params {
            if let Some((key, value)) = param.split_once('=') {
                parsed.insert(key.to_string(), parse_json_or_string(value));
            } else {
                return Err(anyhow::anyhow!(
                    "Invalid parameter format '{}'. Expected 'key=value'",
                    param
                ));
            }
        }

        Ok(parsed)
    }
}

/// JSON when it parses, otherwise the raw text
pub fn parse_json_or_string(text: &str) -> Value {
    serde_json::from_str::<Value>(text).unwrap_or_else(|_| Value::from(text))
}
