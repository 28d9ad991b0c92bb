// crates/docbridge-discovery/src/http.rs
// ============================================================================
// Module: Discovery HTTP Plumbing
// Description: Shared bounded HTTP fetch for directory and dataset lookups.
// Purpose: One strict client/fetch path for both resolvers.
// Dependencies: reqwest, url
// ============================================================================

//! ## Overview
//! Directory and dataset resolvers share one bounded blocking fetch path:
//! redirects disabled, request timeout from configuration, response bodies
//! read under a hard byte limit. HTTP 404 is surfaced as a distinct
//! not-found outcome because both protocols treat it as a normal result.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Read;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::redirect::Policy;
use url::Url;

// ============================================================================
// SECTION: Lookup Configuration
// ============================================================================

/// Default request timeout in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 5_000;
/// Default maximum response size in bytes.
pub const DEFAULT_MAX_RESPONSE_BYTES: usize = 1024 * 1024;
/// Default user agent for lookup requests.
pub const DEFAULT_USER_AGENT: &str = "docbridge/0.1";

/// Configuration shared by the directory and dataset lookup clients.
///
/// # Invariants
/// - `max_response_bytes` is a hard upper bound on response bodies.
/// - `timeout_ms` applies to the full request lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupConfig {
    /// Base URL of the lookup service.
    pub base_url: Url,
    /// Request timeout in milliseconds.
    pub timeout_ms: u64,
    /// Maximum response size allowed, in bytes.
    pub max_response_bytes: usize,
    /// User agent string for outbound requests.
    pub user_agent: String,
}

impl LookupConfig {
    /// Creates a configuration with default limits.
    #[must_use]
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            timeout_ms: DEFAULT_TIMEOUT_MS,
            max_response_bytes: DEFAULT_MAX_RESPONSE_BYTES,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

// ============================================================================
// SECTION: Fetch Outcome
// ============================================================================

/// Low-level fetch failure shared by both resolvers.
///
/// Each resolver converts these into its own error taxonomy so callers see
/// directory and dataset failures as distinct kinds.
#[derive(Debug)]
pub(crate) enum HttpFailure {
    /// HTTP client construction failed.
    Client(reqwest::Error),
    /// The request itself failed (DNS, connect, timeout).
    Request {
        /// Requested URL.
        url: String,
        /// Underlying transport error.
        source: reqwest::Error,
    },
    /// The server answered with an unexpected status.
    Status {
        /// Requested URL.
        url: String,
        /// Status code received.
        status: u16,
    },
    /// The response body exceeded the configured limit.
    TooLarge {
        /// Requested URL.
        url: String,
        /// Configured byte limit.
        limit: usize,
    },
    /// Reading the response body failed.
    Read {
        /// Requested URL.
        url: String,
        /// Rendered read error.
        message: String,
    },
}

/// Result of one bounded GET: distinct not-found versus body.
pub(crate) enum Fetched {
    /// Server answered 404; a normal outcome for lookup protocols.
    NotFound,
    /// Server answered 2xx with the limited body bytes.
    Body(Vec<u8>),
}

// ============================================================================
// SECTION: Client & Fetch
// ============================================================================

/// Builds the bounded blocking client for a lookup configuration.
pub(crate) fn build_client(config: &LookupConfig) -> Result<Client, HttpFailure> {
    Client::builder()
        .timeout(Duration::from_millis(config.timeout_ms))
        .user_agent(config.user_agent.clone())
        .redirect(Policy::none())
        .build()
        .map_err(HttpFailure::Client)
}

/// Performs one bounded GET against `url`.
pub(crate) fn get(
    client: &Client,
    url: &Url,
    max_response_bytes: usize,
) -> Result<Fetched, HttpFailure> {
    let response = client.get(url.as_str()).send().map_err(|source| HttpFailure::Request {
        url: url.to_string(),
        source,
    })?;
    let status = response.status();
    if status.as_u16() == 404 {
        return Ok(Fetched::NotFound);
    }
    if !status.is_success() {
        return Err(HttpFailure::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }
    let limit = u64::try_from(max_response_bytes).unwrap_or(u64::MAX).saturating_add(1);
    let mut body = Vec::new();
    let mut handle = response.take(limit);
    handle.read_to_end(&mut body).map_err(|err| HttpFailure::Read {
        url: url.to_string(),
        message: err.to_string(),
    })?;
    if body.len() > max_response_bytes {
        return Err(HttpFailure::TooLarge {
            url: url.to_string(),
            limit: max_response_bytes,
        });
    }
    Ok(Fetched::Body(body))
}
