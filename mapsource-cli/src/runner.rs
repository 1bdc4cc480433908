//! CLI runner for common setup.
//!
//! Loads configuration, optionally starts logging, and resolves map sources
//! and fetchers from CLI arguments layered over the config file.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::info;

use mapsource::config::{ConfigFile, LoggingSettings};
use mapsource::fetch::{HttpTileFetcher, ReqwestClient};
use mapsource::logging::{init_logging, LoggingGuard};
use mapsource::error::MapSourceError;
use mapsource::source::{MapSource, MapSourceConfig, MapSourceRegistry};
use mapsource::tile::IndexRounding;

use crate::error::CliError;

/// Shared state for one CLI invocation.
pub struct CliRunner {
    config: ConfigFile,
    registry: MapSourceRegistry,
    logging_guard: Option<LoggingGuard>,
}

impl CliRunner {
    /// Load config from `config_path` or the default location. Logging is
    /// only started for commands that do network or disk work.
    pub fn new(config_path: Option<&Path>, with_logging: bool) -> Result<Self, CliError> {
        let config = match config_path {
            Some(path) => ConfigFile::load_from(path)?,
            None => ConfigFile::load()?,
        };
        let logging_guard = if with_logging {
            Some(start_logging(&config.logging)?)
        } else {
            None
        };
        Ok(Self::with_config(config, logging_guard))
    }

    fn with_config(config: ConfigFile, logging_guard: Option<LoggingGuard>) -> Self {
        let registry = MapSourceRegistry::builtin_with_host(config.source.host.as_deref());
        Self {
            config,
            registry,
            logging_guard,
        }
    }

    pub fn config(&self) -> &ConfigFile {
        &self.config
    }

    pub fn registry(&self) -> &MapSourceRegistry {
        &self.registry
    }

    /// Log startup information for a command.
    pub fn log_startup(&self, command: &str) {
        info!("mapsource v{}: {} command", env!("CARGO_PKG_VERSION"), command);
        if let Some(guard) = &self.logging_guard {
            info!(path = %guard.path().display(), "Logging to file");
        }
    }

    /// Resolve a source from the CLI, falling back to the configured default.
    pub fn resolve_source(&self, cli_source: Option<&str>) -> Result<Arc<dyn MapSource>, CliError> {
        self.resolve_source_with(cli_source, IndexRounding::default())
    }

    /// Like [`resolve_source`](Self::resolve_source) with an explicit tile
    /// index rounding policy.
    pub fn resolve_source_with(
        &self,
        cli_source: Option<&str>,
        rounding: IndexRounding,
    ) -> Result<Arc<dyn MapSource>, CliError> {
        let key = cli_source.unwrap_or(&self.config.source.default);
        if rounding == IndexRounding::default() {
            return Ok(self.registry.find(key)?);
        }
        let config = MapSourceConfig::from_key(key)
            .ok_or_else(|| MapSourceError::UnknownSource(key.trim().to_string()))?;
        Ok(config.build_with(self.config.source.host.as_deref(), rounding))
    }

    /// HTTP fetcher built from the `[download]` and `[source]` settings.
    pub fn fetcher(&self, refresh: bool) -> Result<HttpTileFetcher<ReqwestClient>, CliError> {
        let download = &self.config.download;
        let client = ReqwestClient::with_settings(download.timeout, &download.user_agent)
            .map_err(CliError::HttpClient)?;
        Ok(HttpTileFetcher::new(client)
            .with_scheme(self.config.source.scheme.clone())
            .with_refresh(refresh || download.refresh))
    }

    /// Root of the tile cache.
    pub fn cache_dir(&self) -> &PathBuf {
        &self.config.download.cache_dir
    }
}

fn start_logging(settings: &LoggingSettings) -> Result<LoggingGuard, CliError> {
    init_logging(&settings.directory, &settings.file)
        .map_err(|e| CliError::LoggingInit(e.to_string()))
}
