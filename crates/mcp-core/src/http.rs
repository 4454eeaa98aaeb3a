//! HTTP client construction and status checks shared by every crate that
//! talks to the network.

use crate::{Error, Result};
use std::time::Duration;

/// User agent sent with every request; the GitHub API rejects requests
/// without one.
pub const USER_AGENT: &str = concat!("shadcn-mcp/", env!("CARGO_PKG_VERSION"));

/// Builds a client with the user agent and a per-request timeout.
///
/// # Errors
///
/// Returns [`Error::ConfigError`] if the TLS backend cannot be initialized.
pub fn build_client(timeout: Duration) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .build()
        .map_err(|e| Error::ConfigError {
            message: format!("failed to build HTTP client: {e}"),
        })
}

/// Turns a non-success status into [`Error::Fetch`].
///
/// # Errors
///
/// Returns [`Error::Fetch`] carrying the status when it is not 2xx.
pub fn ensure_success(url: &str, response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(Error::Fetch {
            url: url.to_string(),
            message: format!("HTTP {status}"),
            source: None,
        })
    }
}
