// crates/docbridge-discovery/src/wire.rs
// ============================================================================
// Module: Discovery Wire Records
// Description: JSON wire structs for directory and dataset responses.
// Purpose: Separate the lookup wire contract from core domain types.
// Dependencies: docbridge-core, serde, serde_json, base64, url
// ============================================================================

//! ## Overview
//! The connector consumes a JSON projection of directory (SMP) and dataset
//! (DSD) responses; the underlying BDXR wire protocol is out of scope at
//! this layer. Wire structs parse tolerantly: containers must parse, while
//! individual records convert to core types one by one so a single
//! malformed record never voids a multi-record result.

// ============================================================================
// SECTION: Imports
// ============================================================================

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use docbridge_core::DatasetResponse;
use docbridge_core::DocumentTypeId;
use docbridge_core::EndpointRecord;
use docbridge_core::ParticipantId;
use docbridge_core::ProcessId;
use docbridge_core::TransportProfileId;
use rustls_pki_types::CertificateDer;
use serde::Deserialize;
use serde_json::Value;
use url::Url;

// ============================================================================
// SECTION: Shared Wire Types
// ============================================================================

/// Scheme + value identifier as it appears on the wire.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct WireIdentifier {
    /// Identifier scheme.
    pub scheme: String,
    /// Identifier value.
    pub value: String,
}

// ============================================================================
// SECTION: Service Group Wire Types
// ============================================================================

/// Container of service-group references published by one participant.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct WireServiceGroupList {
    /// Raw per-record entries; parsed individually for tolerance.
    #[serde(default)]
    pub service_groups: Vec<Value>,
}

/// One service-group reference entry.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct WireServiceGroup {
    /// Href exactly as published by the directory.
    pub href: String,
}

// ============================================================================
// SECTION: Service Metadata Wire Types
// ============================================================================

/// Signed service-metadata document as it appears on the wire.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct WireServiceMetadata {
    /// Participant the metadata was published for.
    pub participant: WireIdentifier,
    /// Document-type the metadata is scoped to.
    pub document_type: WireIdentifier,
    /// Raw per-process entries; parsed individually for tolerance.
    #[serde(default)]
    pub processes: Vec<Value>,
}

/// One per-process endpoint group entry.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct WireProcess {
    /// Business process identifier.
    pub process: WireIdentifier,
    /// Raw endpoint entries; parsed individually for tolerance.
    #[serde(default)]
    pub endpoints: Vec<Value>,
}

/// One endpoint record entry.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct WireEndpoint {
    /// Transport profile identifier.
    pub transport_profile: String,
    /// Endpoint address.
    pub url: String,
    /// Base64-encoded DER certificate.
    pub certificate_b64: String,
    /// Optional human-readable service description.
    #[serde(default)]
    pub service_description: Option<String>,
}

impl WireEndpoint {
    /// Converts one wire endpoint into a core endpoint record.
    pub(crate) fn into_record(self) -> Result<EndpointRecord, String> {
        if self.transport_profile.is_empty() {
            return Err("endpoint transport_profile is empty".to_string());
        }
        let url = Url::parse(&self.url)
            .map_err(|err| format!("endpoint url is invalid: {err}"))?;
        let der = BASE64
            .decode(&self.certificate_b64)
            .map_err(|err| format!("endpoint certificate is not valid base64: {err}"))?;
        if der.is_empty() {
            return Err("endpoint certificate is empty".to_string());
        }
        Ok(EndpointRecord::new(
            TransportProfileId::new(self.transport_profile),
            url,
            CertificateDer::from(der),
            self.service_description,
        ))
    }
}

impl WireProcess {
    /// Converts the process identifier part of one wire process entry.
    pub(crate) fn process_id(&self) -> Result<ProcessId, String> {
        ProcessId::new(self.process.scheme.clone(), self.process.value.clone())
            .map_err(|err| format!("process identifier is invalid: {err}"))
    }
}

// ============================================================================
// SECTION: Dataset Wire Types
// ============================================================================

/// Container of dataset-discovery matches.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct WireDatasetList {
    /// Raw per-record entries; parsed individually for tolerance.
    #[serde(default)]
    pub matches: Vec<Value>,
}

/// Distribution attributes of one dataset match.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct WireDistribution {
    /// Distribution format label.
    pub format: String,
    /// Optional conformance reference.
    #[serde(default)]
    pub conformance: Option<String>,
    /// Optional media type.
    #[serde(default)]
    pub media_type: Option<String>,
}

/// One dataset-discovery match entry.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct WireDatasetMatch {
    /// Participant offering the dataset.
    pub participant: WireIdentifier,
    /// Dataset identifier as published.
    pub dataset_id: String,
    /// Distribution attributes.
    pub distribution: WireDistribution,
    /// Optional access-service conformance reference.
    #[serde(default)]
    pub access_service_conformance: Option<String>,
    /// Document-type identifier backing the dataset.
    pub document_type: WireIdentifier,
}

impl WireDatasetMatch {
    /// Converts one wire match into a core dataset record.
    pub(crate) fn into_response(self) -> Result<DatasetResponse, String> {
        let participant =
            ParticipantId::new(self.participant.scheme, self.participant.value)
                .map_err(|err| format!("participant identifier is invalid: {err}"))?;
        let document_type =
            DocumentTypeId::new(self.document_type.scheme, self.document_type.value)
                .map_err(|err| format!("document-type identifier is invalid: {err}"))?;
        if self.dataset_id.is_empty() {
            return Err("dataset_id is empty".to_string());
        }
        Ok(DatasetResponse::new(
            participant,
            self.dataset_id,
            self.distribution.format,
            self.distribution.conformance,
            self.distribution.media_type,
            self.access_service_conformance,
            document_type,
        ))
    }
}
