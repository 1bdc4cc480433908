//! Tile fetching.
//!
//! A [`MapSource`](crate::source::MapSource) composes a [`TileFetchRequest`];
//! a [`TileFetcher`] performs the transfer and validates the result. The
//! bundled [`HttpTileFetcher`] covers the common case:
//!
//! ```text
//! TileFetchRequest ──► HttpTileFetcher
//!                        │
//!                        ├── cached & valid? ──► Cached
//!                        ├── HttpClient::get (ReqwestClient / mock)
//!                        ├── write <dest>.part
//!                        ├── ValidityPolicy::check
//!                        └── rename ──► Downloaded
//! ```
//!
//! Retries and backoff are left to callers.

mod batch;
mod downloader;
mod http;
mod types;

pub use batch::{fetch_batch, FetchJob, FetchReport};
pub use downloader::{HttpTileFetcher, DEFAULT_SCHEME};
pub use http::{HttpClient, ReqwestClient, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT};
pub use types::{
    DownloadOptions, FetchError, FetchOutcome, FetchResult, TileFetchRequest, TileFetcher,
};

#[cfg(test)]
pub use http::tests::MockHttpClient;
