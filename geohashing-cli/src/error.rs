//! CLI error handling with user-friendly messages.
//!
//! Centralizes error handling for the CLI, providing consistent formatting
//! and appropriate exit codes.

use std::fmt;
use std::process;

use geohashing::config::ConfigFileError;
use geohashing::djia::DjiaError;
use geohashing::service::ServiceError;

/// CLI-specific errors with user-friendly messages.
#[derive(Debug)]
pub enum CliError {
    /// Failed to initialize logging
    LoggingInit(String),
    /// Configuration error
    Config(String),
    /// Invalid command-line argument
    InvalidArgument(String),
    /// Failed to start the async runtime
    Runtime(String),
    /// Failed to create the geohash service
    ServiceCreation(ServiceError),
    /// A geohash or DJIA lookup failed
    Lookup(ServiceError),
}

impl CliError {
    /// Exit the process with an appropriate error message and code.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {}", self);

        // Print additional help for specific errors
        match self {
            CliError::Lookup(ServiceError::Djia(DjiaError::Network(_))) => {
                eprintln!();
                eprintln!("The DJIA value could not be fetched. Check that:");
                eprintln!("  1. You are connected to the internet");
                eprintln!("  2. djia.url points at a working service (geohashing config get djia.url)");
                eprintln!("  3. djia.timeout is long enough for your connection");
            }
            CliError::Lookup(ServiceError::Djia(DjiaError::DataUnavailable(_))) => {
                eprintln!();
                eprintln!("The DJIA opening value for this date has not been published yet.");
                eprintln!("East of 30W, tomorrow's hash is usually available once today's");
                eprintln!("market has opened; elsewhere, wait for the opening on the day.");
            }
            CliError::ServiceCreation(ServiceError::Store(_)) => {
                eprintln!();
                eprintln!("The DJIA cache file could not be read.");
                eprintln!("Run 'geohashing cache clear' or delete the file named above.");
            }
            _ => {}
        }

        process::exit(1)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::LoggingInit(msg) => write!(f, "Failed to initialize logging: {}", msg),
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
            CliError::Runtime(msg) => write!(f, "Failed to start runtime: {}", msg),
            CliError::ServiceCreation(e) => write!(f, "Failed to create service: {}", e),
            CliError::Lookup(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::ServiceCreation(e) => Some(e),
            CliError::Lookup(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ServiceError> for CliError {
    fn from(e: ServiceError) -> Self {
        CliError::Lookup(e)
    }
}

impl From<ConfigFileError> for CliError {
    fn from(e: ConfigFileError) -> Self {
        CliError::Config(e.to_string())
    }
}
