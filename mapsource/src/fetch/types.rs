//! Fetch request, outcome and error types.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::validity::ValidityPolicy;

/// Result of a single tile fetch.
pub type FetchResult = Result<FetchOutcome, FetchError>;

/// Per-request download options.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DownloadOptions {
    /// Value for the `Referer` header, if the server wants one.
    pub referer: Option<String>,
    /// Maximum number of HTTP redirects to follow. Zero disables redirects.
    pub follow_location: u32,
    /// Check applied to the downloaded file before it is accepted.
    pub validity: ValidityPolicy,
}

impl DownloadOptions {
    /// Options with the given validity policy and no referer or redirects.
    pub fn with_validity(validity: ValidityPolicy) -> Self {
        Self {
            validity,
            ..Self::default()
        }
    }
}

/// A fully composed tile request, ready to hand to a [`TileFetcher`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileFetchRequest {
    /// Server hostname, without scheme.
    pub host: String,
    /// Path and query, starting with `/`.
    pub uri_path: String,
    pub options: DownloadOptions,
}

impl TileFetchRequest {
    /// Full URL for this request under the given scheme.
    pub fn url(&self, scheme: &str) -> String {
        format!("{}://{}{}", scheme, self.host, self.uri_path)
    }
}

/// Successful fetch outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The tile was downloaded and written to the destination.
    Downloaded { bytes: u64 },
    /// A valid tile was already present at the destination.
    Cached,
}

/// Errors reported by a tile fetch.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The transfer itself failed (connection, HTTP status, redirect budget).
    #[error("download of {url} failed: {reason}")]
    Network { url: String, reason: String },

    /// The server answered, but the content is not a valid tile.
    #[error("downloaded file for {url} failed validation: {}", path.display())]
    ValidationFailed { url: String, path: PathBuf },

    /// Local filesystem error while storing the tile.
    #[error("I/O error at {}: {source}", path.display())]
    Io { path: PathBuf, source: io::Error },

    /// The HTTP client could not be constructed.
    #[error("failed to create HTTP client: {0}")]
    Client(String),
}

impl FetchError {
    pub(crate) fn io(path: &Path, source: io::Error) -> Self {
        FetchError::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Returns true for failures worth retrying later.
    pub fn is_transient(&self) -> bool {
        matches!(self, FetchError::Network { .. })
    }
}

/// The tile fetch orchestrator contract.
///
/// Implementations perform the transfer and validation; callers compose the
/// request. No retries are expected at this level.
pub trait TileFetcher: Send + Sync {
    /// Fetches the tile described by `request` into `dest`.
    fn fetch(&self, request: &TileFetchRequest, dest: &Path) -> FetchResult;
}
