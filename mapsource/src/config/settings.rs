//! Settings structs, one per `[section]` of config.ini.

use std::path::PathBuf;

/// Complete configuration loaded from config.ini.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigFile {
    pub source: SourceSettings,
    pub download: DownloadSettings,
    pub logging: LoggingSettings,
}

/// `[source]` section.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceSettings {
    /// Source name or numeric id used when none is given on the command line.
    pub default: String,
    /// URL scheme, `http` or `https`.
    pub scheme: String,
    /// Overrides the provider host when set.
    pub host: Option<String>,
}

/// `[download]` section.
#[derive(Debug, Clone, PartialEq)]
pub struct DownloadSettings {
    /// Request timeout in seconds
    pub timeout: u64,
    pub user_agent: String,
    /// Re-download tiles that are already cached
    pub refresh: bool,
    /// Root of the tile cache
    pub cache_dir: PathBuf,
}

/// `[logging]` section.
#[derive(Debug, Clone, PartialEq)]
pub struct LoggingSettings {
    pub directory: PathBuf,
    pub file: String,
}
