//! CLI runner for common setup and operations.
//!
//! Encapsulates config loading, logging initialization, runtime and service
//! creation to reduce duplication across command handlers.

use std::future::Future;

use tokio::runtime::Runtime;
use tracing::info;

use geohashing::config::ConfigFile;
use geohashing::logging::{init_logging, LoggingGuard};
use geohashing::service::{GeohashConfig, HttpGeohashService};

use crate::error::CliError;

/// Runner that manages CLI lifecycle and common operations.
pub struct CliRunner {
    /// Logging guard - keeps logging active while runner exists
    #[allow(dead_code)]
    logging_guard: LoggingGuard,
    /// Loaded configuration file
    config: ConfigFile,
    runtime: Runtime,
}

impl CliRunner {
    /// Create a new CLI runner, loading config and initializing logging.
    ///
    /// # Arguments
    ///
    /// * `verbose` - Mirror all log output to stderr, not only warnings
    pub fn new(verbose: bool) -> Result<Self, CliError> {
        // Load config file (or use defaults if not present)
        let config = ConfigFile::load()?;

        let logging_guard = init_logging(&config.logging.file, verbose)
            .map_err(|e| CliError::LoggingInit(e.to_string()))?;

        let runtime = Runtime::new().map_err(|e| CliError::Runtime(e.to_string()))?;

        Ok(Self {
            logging_guard,
            config,
            runtime,
        })
    }

    /// Get the loaded configuration.
    pub fn config(&self) -> &ConfigFile {
        &self.config
    }

    /// Log startup information for a command.
    pub fn log_startup(&self, command: &str) {
        info!("geohashing v{}", geohashing::VERSION);
        info!("geohashing CLI: {} command", command);
    }

    /// Create the geohash service from the loaded configuration.
    pub fn create_service(&self) -> Result<HttpGeohashService, CliError> {
        let config = GeohashConfig::from_config_file(&self.config);
        HttpGeohashService::from_config(&config)
            .map_err(CliError::ServiceCreation)
            .inspect(|_| info!("Service created successfully"))
    }

    /// Run a future to completion on the CLI's runtime.
    pub fn block_on<F: Future>(&self, future: F) -> F::Output {
        self.runtime.block_on(future)
    }
}
