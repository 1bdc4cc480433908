//! HTTP tile fetcher with a local cache check.
//!
//! Downloads are written to a sibling `.part` file, validated, and only then
//! renamed over the destination. A failed or invalid download therefore never
//! replaces a tile already on disk.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::http::HttpClient;
use super::types::{FetchError, FetchOutcome, FetchResult, TileFetchRequest, TileFetcher};

/// Default URL scheme for tile requests.
pub const DEFAULT_SCHEME: &str = "http";

/// Tile fetcher backed by an [`HttpClient`].
pub struct HttpTileFetcher<C: HttpClient> {
    client: C,
    scheme: String,
    refresh: bool,
}

impl<C: HttpClient> HttpTileFetcher<C> {
    /// Creates a fetcher using plain HTTP that reuses valid cached tiles.
    pub fn new(client: C) -> Self {
        Self {
            client,
            scheme: DEFAULT_SCHEME.to_string(),
            refresh: false,
        }
    }

    /// Set the URL scheme (`http` or `https`).
    pub fn with_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.scheme = scheme.into();
        self
    }

    /// Always download, even when a valid tile is already cached.
    pub fn with_refresh(mut self, refresh: bool) -> Self {
        self.refresh = refresh;
        self
    }

    /// The URL scheme in use.
    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// Get a reference to the underlying HTTP client.
    pub fn client(&self) -> &C {
        &self.client
    }

    fn store(&self, url: &str, bytes: &[u8], dest: &Path, request: &TileFetchRequest) -> FetchResult {
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent).map_err(|e| FetchError::io(parent, e))?;
        }

        let part = part_path(dest)?;
        fs::write(&part, bytes).map_err(|e| FetchError::io(&part, e))?;

        if !request.options.validity.check(&part) {
            fs::remove_file(&part).ok();
            warn!(url = url, dest = %dest.display(), "Downloaded tile failed validation");
            return Err(FetchError::ValidationFailed {
                url: url.to_string(),
                path: dest.to_path_buf(),
            });
        }

        fs::rename(&part, dest).map_err(|e| {
            fs::remove_file(&part).ok();
            FetchError::io(dest, e)
        })?;

        debug!(url = url, dest = %dest.display(), bytes = bytes.len(), "Tile stored");
        Ok(FetchOutcome::Downloaded {
            bytes: bytes.len() as u64,
        })
    }
}

impl<C: HttpClient> TileFetcher for HttpTileFetcher<C> {
    fn fetch(&self, request: &TileFetchRequest, dest: &Path) -> FetchResult {
        if !self.refresh && dest.is_file() && request.options.validity.check(dest) {
            debug!(dest = %dest.display(), "Tile already cached");
            return Ok(FetchOutcome::Cached);
        }

        let url = request.url(&self.scheme);
        let bytes = self.client.get(&url, &request.options).inspect_err(|e| {
            warn!(url = %url, error = %e, "Tile download failed");
        })?;

        self.store(&url, &bytes, dest, request)
    }
}

fn part_path(dest: &Path) -> Result<PathBuf, FetchError> {
    let name = dest.file_name().ok_or_else(|| {
        FetchError::io(
            dest,
            io::Error::new(io::ErrorKind::InvalidInput, "destination has no file name"),
        )
    })?;
    let mut part = name.to_os_string();
    part.push(".part");
    Ok(dest.with_file_name(part))
}
