//! CLI error handling with user-friendly messages.
//!
//! Centralizes error handling for the CLI, providing consistent formatting
//! and exit codes.

use std::fmt;
use std::process;

use mapsource::config::ConfigFileError;
use mapsource::error::MapSourceError;
use mapsource::fetch::FetchError;

/// CLI-specific errors.
#[derive(Debug)]
pub enum CliError {
    /// Failed to initialize logging
    LoggingInit(String),
    /// Configuration file could not be loaded
    Config(ConfigFileError),
    /// Source lookup or coordinate mapping failed
    Source(MapSourceError),
    /// Failed to set up the HTTP client
    HttpClient(FetchError),
    /// Failed to fetch a tile
    Fetch(FetchError),
    /// Argument combination that clap cannot check
    InvalidArgument(String),
}

impl CliError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::InvalidArgument(_) | CliError::Source(_) => 2,
            _ => 1,
        }
    }

    /// Exit the process with an error message and code.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {}", self);

        match self {
            CliError::Source(MapSourceError::UnknownSource(_)) => {
                eprintln!();
                eprintln!("Run `mapsource sources` to list available map sources.");
            }
            CliError::Source(MapSourceError::UnsupportedResolution { .. }) => {
                eprintln!();
                eprintln!("Supported resolutions are powers of two from 0.25 to 512 m/px;");
                eprintln!("`mapsource sources` shows the range for each source.");
            }
            CliError::Fetch(FetchError::ValidationFailed { .. }) => {
                eprintln!();
                eprintln!("The server answered but did not return a usable tile.");
                eprintln!("The location may be outside the source's coverage.");
            }
            _ => {}
        }

        process::exit(self.exit_code())
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::LoggingInit(msg) => write!(f, "Failed to initialize logging: {}", msg),
            CliError::Config(e) => write!(f, "Configuration error: {}", e),
            CliError::Source(e) => write!(f, "{}", e),
            CliError::HttpClient(e) => write!(f, "HTTP setup error: {}", e),
            CliError::Fetch(e) => write!(f, "Failed to fetch tile: {}", e),
            CliError::InvalidArgument(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Config(e) => Some(e),
            CliError::Source(e) => Some(e),
            CliError::HttpClient(e) | CliError::Fetch(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConfigFileError> for CliError {
    fn from(e: ConfigFileError) -> Self {
        CliError::Config(e)
    }
}

impl From<MapSourceError> for CliError {
    fn from(e: MapSourceError) -> Self {
        CliError::Source(e)
    }
}
