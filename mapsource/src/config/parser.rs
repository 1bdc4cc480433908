//! INI parsing: `Ini` → `ConfigFile`.
//!
//! This is the one place INI key names are mapped onto struct fields.

use std::path::PathBuf;

use ini::Ini;

use super::file::ConfigFileError;
use super::settings::ConfigFile;
use crate::source::MapSourceConfig;

/// Parse an `Ini` object into a `ConfigFile`.
///
/// Starts from `ConfigFile::default()` and overlays any values found.
pub(super) fn parse_ini(ini: &Ini) -> Result<ConfigFile, ConfigFileError> {
    let mut config = ConfigFile::default();

    // [source]
    if let Some(section) = ini.section(Some("source")) {
        if let Some(v) = section.get("default") {
            let v = v.trim();
            if !is_known_source(v) {
                return Err(invalid(
                    "source",
                    "default",
                    v,
                    "must be a built-in source name or id (see `mapsource sources`)",
                ));
            }
            config.source.default = v.to_string();
        }
        if let Some(v) = section.get("scheme") {
            let v = v.trim().to_lowercase();
            if v != "http" && v != "https" {
                return Err(invalid("source", "scheme", &v, "must be http or https"));
            }
            config.source.scheme = v;
        }
        if let Some(v) = section.get("host") {
            let v = v.trim();
            config.source.host = if v.is_empty() {
                None
            } else {
                Some(v.to_string())
            };
        }
    }

    // [download]
    if let Some(section) = ini.section(Some("download")) {
        if let Some(v) = section.get("timeout") {
            config.download.timeout = match v.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                _ => {
                    return Err(invalid(
                        "download",
                        "timeout",
                        v,
                        "must be a positive number of seconds",
                    ))
                }
            };
        }
        if let Some(v) = section.get("user_agent") {
            let v = v.trim();
            if !v.is_empty() {
                config.download.user_agent = v.to_string();
            }
        }
        if let Some(v) = section.get("refresh") {
            config.download.refresh = parse_bool(v)
                .ok_or_else(|| invalid("download", "refresh", v, "must be true or false"))?;
        }
        if let Some(v) = section.get("cache_dir") {
            let v = v.trim();
            if !v.is_empty() {
                config.download.cache_dir = expand_tilde(v);
            }
        }
    }

    // [logging]
    if let Some(section) = ini.section(Some("logging")) {
        if let Some(v) = section.get("directory") {
            let v = v.trim();
            if !v.is_empty() {
                config.logging.directory = expand_tilde(v);
            }
        }
        if let Some(v) = section.get("file") {
            let v = v.trim();
            if !v.is_empty() {
                config.logging.file = v.to_string();
            }
        }
    }

    Ok(config)
}

fn invalid(section: &str, key: &str, value: &str, reason: &str) -> ConfigFileError {
    ConfigFileError::InvalidValue {
        section: section.to_string(),
        key: key.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

fn is_known_source(value: &str) -> bool {
    MapSourceConfig::from_name(value).is_some()
        || value
            .parse::<u8>()
            .map(|id| MapSourceConfig::all().iter().any(|c| c.unique_id() == id))
            .unwrap_or(false)
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Some(true),
        "false" | "no" | "off" | "0" => Some(false),
        _ => None,
    }
}

/// Expand a leading `~/` to the home directory.
pub(super) fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}
