//! User configuration stored in ~/.mapsource/config.ini.
//!
//! # Example
//!
//! ```no_run
//! use mapsource::config::ConfigFile;
//!
//! let config = ConfigFile::load()?;
//! println!("cache: {}", config.download.cache_dir.display());
//! # Ok::<(), mapsource::config::ConfigFileError>(())
//! ```

mod defaults;
mod file;
mod parser;
mod settings;
mod writer;

pub use defaults::{
    default_cache_dir, default_log_dir, DEFAULT_LOG_FILE, DEFAULT_SOURCE,
};
pub use file::{config_directory, config_file_path, ConfigFileError};
pub use settings::{ConfigFile, DownloadSettings, LoggingSettings, SourceSettings};
