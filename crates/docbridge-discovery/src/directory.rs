// crates/docbridge-discovery/src/directory.rs
// ============================================================================
// Module: Directory Resolver
// Description: Participant service-group and service-metadata lookup (SMP).
// Purpose: Resolve directory publications with strict not-found semantics.
// Dependencies: docbridge-core, reqwest, serde_json, url
// ============================================================================

//! ## Overview
//! The directory resolver performs the two lookup operations of the
//! discovery protocol's first stage: every service group a participant
//! publishes, and signed service metadata for one (participant,
//! document-type) pair. "Not found" is a normal outcome (empty mapping or
//! `Ok(None)`), strictly distinct from network/protocol failure, which is a
//! [`DirectoryError`] carrying the underlying cause. Recoverable per-record
//! problems are routed to the supplied [`ErrorSink`] without aborting the
//! enclosing lookup.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use docbridge_core::DocumentTypeId;
use docbridge_core::ErrorEvent;
use docbridge_core::ErrorSeverity;
use docbridge_core::ErrorSink;
use docbridge_core::ParticipantId;
use docbridge_core::ProcessEndpoints;
use docbridge_core::ServiceMetadata;
use reqwest::blocking::Client;
use thiserror::Error;
use url::Url;

use crate::http::Fetched;
use crate::http::HttpFailure;
use crate::http::LookupConfig;
use crate::http::build_client;
use crate::http::get;
use crate::wire::WireEndpoint;
use crate::wire::WireProcess;
use crate::wire::WireServiceGroup;
use crate::wire::WireServiceGroupList;
use crate::wire::WireServiceMetadata;

// ============================================================================
// SECTION: Directory Errors
// ============================================================================

/// Fatal directory lookup failures, distinct from not-found outcomes.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
/// - The underlying cause stays attached for diagnostics.
#[derive(Debug, Error)]
pub enum DirectoryError {
    /// HTTP client construction failed.
    #[error("directory client construction failed")]
    Client(#[source] reqwest::Error),
    /// The request itself failed (DNS, connect, timeout).
    #[error("directory request failed: {url}")]
    Request {
        /// Requested URL.
        url: String,
        /// Underlying transport error.
        #[source]
        source: reqwest::Error,
    },
    /// The directory answered with an unexpected status.
    #[error("directory returned status {status}: {url}")]
    Status {
        /// Requested URL.
        url: String,
        /// Status code received.
        status: u16,
    },
    /// The response body exceeded the configured limit.
    #[error("directory response exceeds {limit} bytes: {url}")]
    ResponseTooLarge {
        /// Requested URL.
        url: String,
        /// Configured byte limit.
        limit: usize,
    },
    /// Reading the response body failed.
    #[error("directory response read failed: {url}: {message}")]
    Read {
        /// Requested URL.
        url: String,
        /// Rendered read error.
        message: String,
    },
    /// The response body was not valid JSON for the wire contract.
    #[error("directory response is not valid JSON: {url}")]
    InvalidResponse {
        /// Requested URL.
        url: String,
        /// Underlying parse error.
        #[source]
        source: serde_json::Error,
    },
    /// The response violated the lookup contract.
    #[error("directory response violates the lookup contract: {url}: {detail}")]
    Contract {
        /// Requested URL.
        url: String,
        /// Contract violation detail.
        detail: String,
    },
    /// Lookup URL construction failed.
    #[error("directory lookup url construction failed: {0}")]
    LookupUrl(String),
}

impl From<HttpFailure> for DirectoryError {
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
// SECTION: Directory Client
// ============================================================================

/// Blocking directory (SMP) lookup client.
pub struct DirectoryClient {
    /// Lookup configuration (base URL and limits).
    config: LookupConfig,
    /// Bounded blocking HTTP client.
    client: Client,
}

impl DirectoryClient {
    /// Creates a directory client for the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::Client`] when the HTTP client cannot be
    /// constructed.
    pub fn new(config: LookupConfig) -> Result<Self, DirectoryError> {
        let client = build_client(&config).map_err(DirectoryError::from)?;
        Ok(Self {
            config,
            client,
        })
    }

    /// Resolves every service-group reference a participant publishes.
    ///
    /// The result maps the URL-decoded href key to the verbatim href as
    /// published. Participants that publish nothing yield an empty map.
    /// Per-record decode problems and duplicate decoded keys are reported
    /// to `sink`; the first occurrence of a key wins.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError`] for network/protocol failures only.
    pub fn service_group_hrefs(
        &self,
        participant: &ParticipantId,
        sink: &dyn ErrorSink,
    ) -> Result<BTreeMap<String, String>, DirectoryError> {
        let url = self.participant_url(participant, &[])?;
        let body = match get(&self.client, &url, self.config.max_response_bytes)? {
            Fetched::NotFound => return Ok(BTreeMap::new()),
            Fetched::Body(body) => body,
        };
        if body_is_absent(&body) {
            return Ok(BTreeMap::new());
        }
        let list: WireServiceGroupList =
            serde_json::from_slice(&body).map_err(|source| DirectoryError::InvalidResponse {
                url: url.to_string(),
                source,
            })?;
        let mut hrefs = BTreeMap::new();
        for entry in list.service_groups {
            let group: WireServiceGroup = match serde_json::from_value(entry) {
                Ok(group) => group,
                Err(err) => {
                    sink.report(
                        ErrorEvent::new(
                            ErrorSeverity::Warning,
                            format!("skipping malformed service-group entry for {participant}"),
                        )
                        .with_cause(err.to_string()),
                    );
                    continue;
                }
            };
            let key = match decode_href(&group.href) {
                Ok(key) => key,
                Err(detail) => {
                    sink.report(
                        ErrorEvent::new(
                            ErrorSeverity::Warning,
                            format!("skipping undecodable service-group href for {participant}"),
                        )
                        .with_cause(detail),
                    );
                    continue;
                }
            };
            if hrefs.contains_key(&key) {
                sink.report(ErrorEvent::new(
                    ErrorSeverity::Warning,
                    format!("duplicate service-group href key for {participant}: {key}"),
                ));
                continue;
            }
            hrefs.insert(key, group.href);
        }
        Ok(hrefs)
    }

    /// Resolves signed service metadata for one (participant, doc-type) pair.
    ///
    /// A resolvable-but-empty response is `Ok(None)`, distinct from a
    /// network/protocol failure. Malformed individual process or endpoint
    /// records are reported to `sink` while the remaining records are kept.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError`] for network/protocol failures and for
    /// responses that violate the lookup contract (metadata published for a
    /// different participant or document-type than requested).
    pub fn service_metadata(
        &self,
        participant: &ParticipantId,
        document_type: &DocumentTypeId,
        sink: &dyn ErrorSink,
    ) -> Result<Option<ServiceMetadata>, DirectoryError> {
        let url =
            self.participant_url(participant, &["services", &document_type.to_string()])?;
        let body = match get(&self.client, &url, self.config.max_response_bytes)? {
            Fetched::NotFound => return Ok(None),
            Fetched::Body(body) => body,
        };
        if body_is_absent(&body) {
            return Ok(None);
        }
        let wire: WireServiceMetadata =
            serde_json::from_slice(&body).map_err(|source| DirectoryError::InvalidResponse {
                url: url.to_string(),
                source,
            })?;
        if wire.participant.scheme != participant.scheme()
            || wire.participant.value != participant.value()
        {
            return Err(DirectoryError::Contract {
                url: url.to_string(),
                detail: "metadata participant does not match the requested participant"
                    .to_string(),
            });
        }
        if wire.document_type.scheme != document_type.scheme()
            || wire.document_type.value != document_type.value()
        {
            return Err(DirectoryError::Contract {
                url: url.to_string(),
                detail: "metadata document-type does not match the requested document-type"
                    .to_string(),
            });
        }
        let mut processes = Vec::new();
        for entry in wire.processes {
            let wire_process: WireProcess = match serde_json::from_value(entry) {
                Ok(process) => process,
                Err(err) => {
                    sink.report(
                        ErrorEvent::new(
                            ErrorSeverity::Warning,
                            format!("skipping malformed process entry for {participant}"),
                        )
                        .with_cause(err.to_string()),
                    );
                    continue;
                }
            };
            let process_id = match wire_process.process_id() {
                Ok(process_id) => process_id,
                Err(detail) => {
                    sink.report(
                        ErrorEvent::new(
                            ErrorSeverity::Warning,
                            format!("skipping process with invalid identifier for {participant}"),
                        )
                        .with_cause(detail),
                    );
                    continue;
                }
            };
            let mut endpoints = Vec::new();
            for endpoint_entry in wire_process.endpoints {
                let wire_endpoint: WireEndpoint = match serde_json::from_value(endpoint_entry) {
                    Ok(endpoint) => endpoint,
                    Err(err) => {
                        sink.report(
                            ErrorEvent::new(
                                ErrorSeverity::Warning,
                                format!("skipping malformed endpoint entry for {participant}"),
                            )
                            .with_cause(err.to_string()),
                        );
                        continue;
                    }
                };
                match wire_endpoint.into_record() {
                    Ok(record) => endpoints.push(record),
                    Err(detail) => {
                        sink.report(
                            ErrorEvent::new(
                                ErrorSeverity::Warning,
                                format!("skipping invalid endpoint record for {participant}"),
                            )
                            .with_cause(detail),
                        );
                    }
                }
            }
            processes.push(ProcessEndpoints::new(process_id, endpoints));
        }
        Ok(Some(ServiceMetadata::new(
            participant.clone(),
            document_type.clone(),
            processes,
            body,
        )))
    }

    /// Builds the lookup URL for a participant plus trailing segments.
    fn participant_url(
        &self,
        participant: &ParticipantId,
        rest: &[&str],
    ) -> Result<Url, DirectoryError> {
        let mut url = self.config.base_url.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|()| DirectoryError::LookupUrl("base url cannot be a base".to_string()))?;
            segments.pop_if_empty();
            segments.push("participants");
            segments.push(&participant.to_string());
            for segment in rest {
                segments.push(segment);
            }
        }
        Ok(url)
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Returns true when a 2xx body denotes an absent document.
fn body_is_absent(body: &[u8]) -> bool {
    body.is_empty() || body == b"null" || body.iter().all(u8::is_ascii_whitespace)
}

/// URL-decodes one href key (percent sequences plus `+` as space).
///
/// Hand-rolled so the wire crate set stays aligned with the rest of the
/// workspace; hrefs are short and decoded once per lookup.
fn decode_href(raw: &str) -> Result<String, String> {
    let bytes = raw.as_bytes();
    let mut decoded = Vec::with_capacity(bytes.len());
    let mut index = 0;
    while index < bytes.len() {
        match bytes[index] {
            b'%' => {
                let high = bytes.get(index + 1).copied();
                let low = bytes.get(index + 2).copied();
                let (Some(high), Some(low)) = (high, low) else {
                    return Err(format!("truncated percent sequence in href: {raw}"));
                };
                let (Some(high), Some(low)) =
                    ((high as char).to_digit(16), (low as char).to_digit(16))
                else {
                    return Err(format!("invalid percent sequence in href: {raw}"));
                };
                let byte = u8::try_from(high * 16 + low)
                    .map_err(|_| format!("invalid percent sequence in href: {raw}"))?;
                decoded.push(byte);
                index += 3;
            }
            b'+' => {
                decoded.push(b' ');
                index += 1;
            }
            byte => {
                decoded.push(byte);
                index += 1;
            }
        }
    }
    String::from_utf8(decoded).map_err(|_| format!("href does not decode to UTF-8: {raw}"))
}

#[cfg(test)]
mod tests {
    use super::decode_href;

    #[test]
    fn decode_href_passes_plain_input_through() {
        assert_eq!(decode_href("services/doc-type-1").as_deref(), Ok("services/doc-type-1"));
    }

    #[test]
    fn decode_href_decodes_percent_sequences_and_plus() {
        assert_eq!(
            decode_href("iso6523%3A%3A0088+extra").as_deref(),
            Ok("iso6523::0088 extra")
        );
    }

    #[test]
    fn decode_href_rejects_truncated_sequences() {
        assert!(decode_href("broken%2").is_err());
        assert!(decode_href("broken%zz").is_err());
    }
}
