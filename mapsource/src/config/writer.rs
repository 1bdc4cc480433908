//! INI serialization: `ConfigFile` → commented INI string.

use std::path::Path;

use super::settings::ConfigFile;

/// Convert a `ConfigFile` to the commented INI text written to config.ini.
pub(super) fn to_config_string(config: &ConfigFile) -> String {
    let host = config.source.host.as_deref().unwrap_or("");
    let refresh = if config.download.refresh { "true" } else { "false" };

    format!(
        r#"[source]
; Default map source, by name or id:
;   terraserver-aerial (1) - USGS aerial photography
;   terraserver-topo   (2) - USGS topographic maps
;   terraserver-urban  (4) - USGS urban area imagery
default = {}
; URL scheme: http or https
scheme = {}
; Override the tile server host (leave empty for the provider default)
host = {}

[download]
; Request timeout in seconds
timeout = {}
user_agent = {}
; Re-download tiles that are already cached
refresh = {}
cache_dir = {}

[logging]
directory = {}
file = {}
"#,
        config.source.default,
        config.source.scheme,
        host,
        config.download.timeout,
        config.download.user_agent,
        refresh,
        path_to_string(&config.download.cache_dir),
        path_to_string(&config.logging.directory),
        config.logging.file,
    )
}

/// Paths under the home directory are written with a `~/` prefix.
fn path_to_string(path: &Path) -> String {
    if let Some(home) = dirs::home_dir() {
        if let Ok(stripped) = path.strip_prefix(&home) {
            return format!("~/{}", stripped.display());
        }
    }
    path.display().to_string()
}
