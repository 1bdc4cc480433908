//! HTTP client abstraction for testability

use std::time::Duration;

use reqwest::header::{LOCATION, REFERER};
use reqwest::Url;
use tracing::{debug, trace, warn};

use super::types::{DownloadOptions, FetchError};

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default `User-Agent` header.
pub const DEFAULT_USER_AGENT: &str = concat!("mapsource/", env!("CARGO_PKG_VERSION"));

/// Trait for HTTP client operations.
///
/// This abstraction allows for dependency injection and easier testing
/// by enabling mock HTTP clients in tests.
pub trait HttpClient: Send + Sync {
    /// Performs an HTTP GET request.
    ///
    /// # Arguments
    ///
    /// * `url` - The URL to request
    /// * `options` - Referer and redirect settings for this request
    ///
    /// # Returns
    ///
    /// The response body as bytes or an error.
    fn get(&self, url: &str, options: &DownloadOptions) -> Result<Vec<u8>, FetchError>;
}

/// Real HTTP client implementation using reqwest.
///
/// Redirects are followed manually so each request can carry its own
/// redirect budget.
pub struct ReqwestClient {
    client: reqwest::blocking::Client,
}

impl ReqwestClient {
    /// Creates a new ReqwestClient with default configuration.
    pub fn new() -> Result<Self, FetchError> {
        Self::with_settings(DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT)
    }

    /// Creates a new ReqwestClient with custom timeout and user agent.
    pub fn with_settings(timeout_secs: u64, user_agent: &str) -> Result<Self, FetchError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(user_agent)
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| FetchError::Client(e.to_string()))?;

        Ok(Self { client })
    }
}

fn network_error(url: &Url, reason: impl Into<String>) -> FetchError {
    FetchError::Network {
        url: url.to_string(),
        reason: reason.into(),
    }
}

impl HttpClient for ReqwestClient {
    fn get(&self, url: &str, options: &DownloadOptions) -> Result<Vec<u8>, FetchError> {
        let mut current = Url::parse(url).map_err(|e| FetchError::Network {
            url: url.to_string(),
            reason: format!("invalid URL: {}", e),
        })?;
        let mut redirects = 0;

        loop {
            trace!(url = %current, "HTTP GET request starting");

            let mut request = self.client.get(current.clone());
            if let Some(referer) = &options.referer {
                request = request.header(REFERER, referer.as_str());
            }

            let response = request.send().map_err(|e| {
                warn!(
                    url = %current,
                    error = %e,
                    is_connect = e.is_connect(),
                    is_timeout = e.is_timeout(),
                    "HTTP request failed"
                );
                network_error(&current, format!("request failed: {}", e))
            })?;

            let status = response.status();
            debug!(url = %current, status = status.as_u16(), "HTTP response received");

            if status.is_redirection() {
                if redirects >= options.follow_location {
                    return Err(network_error(
                        &current,
                        format!("HTTP {} after {} redirect(s)", status, redirects),
                    ));
                }
                let location = response
                    .headers()
                    .get(LOCATION)
                    .and_then(|v| v.to_str().ok())
                    .ok_or_else(|| {
                        network_error(&current, format!("HTTP {} without Location", status))
                    })?;
                let next = current
                    .join(location)
                    .map_err(|e| network_error(&current, format!("bad redirect: {}", e)))?;
                debug!(from = %current, to = %next, "Following redirect");
                current = next;
                redirects += 1;
                continue;
            }

            if !status.is_success() {
                warn!(url = %current, status = status.as_u16(), "HTTP error status");
                return Err(network_error(&current, format!("HTTP {}", status)));
            }

            return response
                .bytes()
                .map(|b| b.to_vec())
                .map_err(|e| network_error(&current, format!("failed to read response: {}", e)));
        }
    }
}
