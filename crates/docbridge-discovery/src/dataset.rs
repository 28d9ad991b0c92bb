// crates/docbridge-discovery/src/dataset.rs
// ============================================================================
// Module: Dataset Resolver
// Description: Dataset discovery (DSD) lookups by dataset type and country.
// Purpose: Resolve participants and dataset records for a dataset type.
// Dependencies: docbridge-core, reqwest, serde_json, url
// ============================================================================

//! ## Overview
//! The dataset resolver answers "who offers this dataset type, optionally in
//! this country" at two granularities: the set of participant identifiers,
//! and full denormalized [`DatasetResponse`] records. Empty result sets are
//! normal outcomes; network/protocol failures are [`DatasetError`] values.
//! Malformed individual records go to the supplied [`ErrorSink`] and never
//! void the rest of the result set. The `log_context` argument is carried
//! into sink messages for diagnostic correlation only.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;

use docbridge_core::DatasetResponse;
use docbridge_core::DatasetTypeId;
use docbridge_core::ErrorEvent;
use docbridge_core::ErrorSeverity;
use docbridge_core::ErrorSink;
use docbridge_core::ParticipantId;
use reqwest::blocking::Client;
use thiserror::Error;
use url::Url;

use crate::http::Fetched;
use crate::http::HttpFailure;
use crate::http::LookupConfig;
use crate::http::build_client;
use crate::http::get;
use crate::wire::WireDatasetList;
use crate::wire::WireDatasetMatch;

// ============================================================================
// SECTION: Dataset Errors
// ============================================================================

/// Fatal dataset lookup failures, distinct from empty result sets.
#[derive(Debug, Error)]
pub enum DatasetError {
    /// HTTP client construction failed.
    #[error("dataset client construction failed")]
    Client(#[source] reqwest::Error),
    /// The request itself failed (DNS, connect, timeout).
    #[error("dataset request failed: {url}")]
    Request {
        /// Requested URL.
        url: String,
        /// Underlying transport error.
        #[source]
        source: reqwest::Error,
    },
    /// The dataset service answered with an unexpected status.
    #[error("dataset service returned status {status}: {url}")]
    Status {
        /// Requested URL.
        url: String,
        /// Status code received.
        status: u16,
    },
    /// The response body exceeded the configured limit.
    #[error("dataset response exceeds {limit} bytes: {url}")]
    ResponseTooLarge {
        /// Requested URL.
        url: String,
        /// Configured byte limit.
        limit: usize,
    },
    /// Reading the response body failed.
    #[error("dataset response read failed: {url}: {message}")]
    Read {
        /// Requested URL.
        url: String,
        /// Rendered read error.
        message: String,
    },
    /// The response body was not valid JSON for the wire contract.
    #[error("dataset response is not valid JSON: {url}")]
    InvalidResponse {
        /// Requested URL.
        url: String,
        /// Underlying parse error.
        #[source]
        source: serde_json::Error,
    },
    /// The country filter is not a two-letter uppercase code.
    #[error("country filter must be two uppercase ASCII letters: {0:?}")]
    InvalidCountry(String),
    /// Lookup URL construction failed.
    #[error("dataset lookup url construction failed: {0}")]
    LookupUrl(String),
}

impl From<HttpFailure> for DatasetError {
    fn from(failure: HttpFailure) -> Self {
        match failure {
            HttpFailure::Client(source) => Self::Client(source),
            HttpFailure::Request {
                url,
                source,
            } => Self::Request {
                url,
                source,
            },
            HttpFailure::Status {
                url,
                status,
            } => Self::Status {
                url,
                status,
            },
            HttpFailure::TooLarge {
                url,
                limit,
            } => Self::ResponseTooLarge {
                url,
                limit,
            },
            HttpFailure::Read {
                url,
                message,
            } => Self::Read {
                url,
                message,
            },
        }
    }
}

// ============================================================================
// SECTION: Dataset Client
// ============================================================================

/// Blocking dataset discovery (DSD) lookup client.
pub struct DatasetClient {
    /// Lookup configuration (base URL and limits).
    config: LookupConfig,
    /// Bounded blocking HTTP client.
    client: Client,
}

impl DatasetClient {
    /// Creates a dataset client for the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError::Client`] when the HTTP client cannot be
    /// constructed.
    pub fn new(config: LookupConfig) -> Result<Self, DatasetError> {
        let client = build_client(&config).map_err(DatasetError::from)?;
        Ok(Self {
            config,
            client,
        })
    }

    /// Resolves every participant publishing the given dataset type.
    ///
    /// `country` optionally narrows to a two-letter uppercase country code;
    /// `scheme` optionally narrows to participants with a matching
    /// identifier scheme. Duplicates collapse by identifier equality.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError`] for network/protocol failures and an
    /// invalid country filter. Nothing matching is `Ok` with an empty set.
    pub fn all_participant_ids(
        &self,
        log_context: &str,
        dataset_type: &DatasetTypeId,
        country: Option<&str>,
        scheme: Option<&str>,
        sink: &dyn ErrorSink,
    ) -> Result<BTreeSet<ParticipantId>, DatasetError> {
        let responses = self.fetch_matches(log_context, dataset_type, country, sink)?;
        let mut participants = BTreeSet::new();
        for response in responses {
            if let Some(scheme) = scheme
                && response.participant().scheme() != scheme
            {
                continue;
            }
            participants.insert(response.participant().clone());
        }
        Ok(participants)
    }

    /// Resolves full dataset records for the given dataset type.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError`] for network/protocol failures and an
    /// invalid country filter. Nothing matching is `Ok` with an empty set.
    pub fn all_dataset_responses(
        &self,
        log_context: &str,
        dataset_type: &DatasetTypeId,
        country: Option<&str>,
        sink: &dyn ErrorSink,
    ) -> Result<BTreeSet<DatasetResponse>, DatasetError> {
        let responses = self.fetch_matches(log_context, dataset_type, country, sink)?;
        Ok(responses.into_iter().collect())
    }

    /// Fetches and converts the raw match list for one query.
    fn fetch_matches(
        &self,
        log_context: &str,
        dataset_type: &DatasetTypeId,
        country: Option<&str>,
        sink: &dyn ErrorSink,
    ) -> Result<Vec<DatasetResponse>, DatasetError> {
        let url = self.dataset_url(dataset_type, country)?;
        let body = match get(&self.client, &url, self.config.max_response_bytes)? {
            Fetched::NotFound => return Ok(Vec::new()),
            Fetched::Body(body) => body,
        };
        if body.is_empty() || body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Vec::new());
        }
        let list: WireDatasetList =
            serde_json::from_slice(&body).map_err(|source| DatasetError::InvalidResponse {
                url: url.to_string(),
                source,
            })?;
        let mut responses = Vec::with_capacity(list.matches.len());
        for entry in list.matches {
            let wire: WireDatasetMatch = match serde_json::from_value(entry) {
                Ok(wire) => wire,
                Err(err) => {
                    sink.report(
                        ErrorEvent::new(
                            ErrorSeverity::Warning,
                            format!("[{log_context}] skipping malformed dataset record"),
                        )
                        .with_cause(err.to_string()),
                    );
                    continue;
                }
            };
            match wire.into_response() {
                Ok(response) => responses.push(response),
                Err(detail) => {
                    sink.report(
                        ErrorEvent::new(
                            ErrorSeverity::Warning,
                            format!("[{log_context}] skipping invalid dataset record"),
                        )
                        .with_cause(detail),
                    );
                }
            }
        }
        Ok(responses)
    }

    /// Builds the lookup URL for one dataset query.
    fn dataset_url(
        &self,
        dataset_type: &DatasetTypeId,
        country: Option<&str>,
    ) -> Result<Url, DatasetError> {
        let mut url = self.config.base_url.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|()| DatasetError::LookupUrl("base url cannot be a base".to_string()))?;
            segments.pop_if_empty();
            segments.push("datasets");
            segments.push(dataset_type.as_str());
        }
        if let Some(country) = country {
            check_country(country)?;
            url.query_pairs_mut().append_pair("country", country);
        }
        Ok(url)
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Validates a two-letter uppercase country filter.
fn check_country(country: &str) -> Result<(), DatasetError> {
    let valid =
        country.len() == 2 && country.bytes().all(|byte| byte.is_ascii_uppercase());
    if valid {
        Ok(())
    } else {
        Err(DatasetError::InvalidCountry(country.to_string()))
    }
}
