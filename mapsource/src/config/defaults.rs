//! Default values for every configuration setting.

use std::path::PathBuf;

use super::file::config_directory;
use super::settings::*;
use crate::fetch::{DEFAULT_SCHEME, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT};
use crate::source::MapSourceConfig;

/// Default source when none is configured.
pub const DEFAULT_SOURCE: MapSourceConfig = MapSourceConfig::TerraserverAerial;

/// Default log file name.
pub const DEFAULT_LOG_FILE: &str = "mapsource.log";

/// Default tile cache root (~/.mapsource/tiles).
pub fn default_cache_dir() -> PathBuf {
    config_directory().join("tiles")
}

/// Default log directory (~/.mapsource/logs).
pub fn default_log_dir() -> PathBuf {
    config_directory().join("logs")
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            source: SourceSettings {
                default: DEFAULT_SOURCE.name().to_string(),
                scheme: DEFAULT_SCHEME.to_string(),
                host: None,
            },
            download: DownloadSettings {
                timeout: DEFAULT_TIMEOUT_SECS,
                user_agent: DEFAULT_USER_AGENT.to_string(),
                refresh: false,
                cache_dir: default_cache_dir(),
            },
            logging: LoggingSettings {
                directory: default_log_dir(),
                file: DEFAULT_LOG_FILE.to_string(),
            },
        }
    }
}
