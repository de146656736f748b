// ABOUTME: Main application orchestration for the elementals CLI
// ABOUTME: Coordinates between CLI arguments, configuration, and command execution

use anyhow::Result;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use super::commands::{self, RunOptions};
use super::{Args, Commands, Config};

pub struct App {
    config: Config,
}

impl App {
    /// Create a new application instance
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Initialize logging based on configuration
    pub fn init_logging(&self, verbose: bool, no_color: bool) -> Result<()> {
        let log_level = if verbose {
            "debug"
        } else {
            &self.config.logging.level
        };

        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

        // Logs go to stderr so command output stays machine-readable
        match self.config.logging.format.as_str() {
            "compact" => {
                tracing_subscriber::fmt()
                    .compact()
                    .with_env_filter(env_filter)
                    .with_ansi(!no_color)
                    .with_target(false)
                    .with_writer(std::io::stderr)
                    .try_init()
                    .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;
            }
            "json" => {
                tracing_subscriber::fmt()
                    .json()
                    .with_env_filter(env_filter)
                    .with_target(false)
                    .with_writer(std::io::stderr)
                    .try_init()
                    .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;
            }
            _ => {
                tracing_subscriber::fmt()
                    .with_env_filter(env_filter)
                    .with_ansi(!no_color)
                    .with_target(false)
                    .with_writer(std::io::stderr)
                    .try_init()
                    .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;
            }
        }

        debug!("Logging initialized with level: {}", log_level);
        Ok(())
    }

    /// Run the application with parsed arguments
    pub fn run(&mut self, args: Args) -> Result<()> {
        // Initialize logging
        self.init_logging(args.verbose, args.no_color)?;

        info!("Starting elementals v{}", crate::VERSION);
        debug!("Configuration loaded from: {:?}", args.config);

        if let Some(functions) = args.functions {
            self.config.functions_file = Some(functions);
        }

        // Execute the appropriate command
        match args.command {
            Commands::Run {
                name,
                bundle,
                params,
                params_json,
                savepoint,
                output,
            } => commands::run_function(
                name,
                RunOptions {
                    bundle,
                    params,
                    params_json,
                    savepoint,
                    output,
                },
                &self.config,
            ),

            Commands::List => commands::list_functions(&self.config),

            Commands::Validate => commands::validate_functions(&self.config),

            Commands::Render {
                template,
                bundle,
                on_missing,
                no_flatten,
            } => commands::render_template(template, bundle, on_missing, no_flatten, &self.config),

            Commands::Resolve {
                path,
                bundle,
                default,
            } => commands::resolve_path(path, bundle, default),

            Commands::Init {
                name,
                description,
                force,
            } => commands::init_function(name, description, force, &self.config),
        }
    }

    /// Create application from command line arguments
    pub fn from_args(args: &Args) -> Result<Self> {
        let config = Config::load(args.config.clone())?;
        Ok(Self::new(config))
    }
}
