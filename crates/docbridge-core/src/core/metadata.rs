// crates/docbridge-core/src/core/metadata.rs
// ============================================================================
// Module: Docbridge Service Metadata
// Description: Signed service metadata scoped to (participant, document-type).
// Purpose: Carry directory lookup output into endpoint selection.
// Dependencies: rustls-pki-types, url
// ============================================================================

//! ## Overview
//! [`ServiceMetadata`] is the structured form of one signed service-metadata
//! document obtained from the directory for a (participant, document-type)
//! pair. Absence of metadata is a normal outcome and is represented by the
//! resolver as `Ok(None)`, never by an empty placeholder value.

// ============================================================================
// SECTION: Imports
// ============================================================================

use rustls_pki_types::CertificateDer;
use url::Url;

use crate::core::identifiers::DocumentTypeId;
use crate::core::identifiers::ParticipantId;
use crate::core::identifiers::ProcessId;
use crate::core::identifiers::TransportProfileId;

// ============================================================================
// SECTION: Endpoint Records
// ============================================================================

/// One endpoint record published for a process within service metadata.
///
/// # Invariants
/// - `certificate` is the DER-encoded certificate published for the endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointRecord {
    /// Transport profile the endpoint serves.
    transport_profile: TransportProfileId,
    /// Endpoint address.
    url: Url,
    /// DER-encoded endpoint certificate.
    certificate: CertificateDer<'static>,
    /// Optional human-readable service description.
    service_description: Option<String>,
}

impl EndpointRecord {
    /// Creates an endpoint record from parsed metadata.
    #[must_use]
    pub fn new(
        transport_profile: TransportProfileId,
        url: Url,
        certificate: CertificateDer<'static>,
        service_description: Option<String>,
    ) -> Self {
        Self {
            transport_profile,
            url,
            certificate,
            service_description,
        }
    }

    /// Returns the transport profile.
    #[must_use]
    pub fn transport_profile(&self) -> &TransportProfileId {
        &self.transport_profile
    }

    /// Returns the endpoint URL.
    #[must_use]
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Returns the DER-encoded endpoint certificate.
    #[must_use]
    pub fn certificate(&self) -> &CertificateDer<'static> {
        &self.certificate
    }

    /// Returns the optional service description.
    #[must_use]
    pub fn service_description(&self) -> Option<&str> {
        self.service_description.as_deref()
    }
}

/// Endpoint records grouped under one business process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessEndpoints {
    /// Business process the endpoints belong to.
    process: ProcessId,
    /// Published endpoint records, in document order.
    endpoints: Vec<EndpointRecord>,
}

impl ProcessEndpoints {
    /// Creates a process endpoint group.
    #[must_use]
    pub fn new(process: ProcessId, endpoints: Vec<EndpointRecord>) -> Self {
        Self {
            process,
            endpoints,
        }
    }

    /// Returns the business process.
    #[must_use]
    pub fn process(&self) -> &ProcessId {
        &self.process
    }

    /// Returns the published endpoint records.
    #[must_use]
    pub fn endpoints(&self) -> &[EndpointRecord] {
        &self.endpoints
    }
}

// ============================================================================
// SECTION: Service Metadata
// ============================================================================

/// Signed service metadata for one (participant, document-type) pair.
///
/// # Invariants
/// - `signed_bytes` preserves the raw signed document for diagnostics and
///   later signature verification; this layer does not verify signatures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceMetadata {
    /// Participant the metadata was published for.
    participant: ParticipantId,
    /// Document-type the metadata is scoped to.
    document_type: DocumentTypeId,
    /// Per-process endpoint groups, in document order.
    processes: Vec<ProcessEndpoints>,
    /// Raw signed metadata document as fetched.
    signed_bytes: Vec<u8>,
}

impl ServiceMetadata {
    /// Creates service metadata from parsed directory output.
    #[must_use]
    pub fn new(
        participant: ParticipantId,
        document_type: DocumentTypeId,
        processes: Vec<ProcessEndpoints>,
        signed_bytes: Vec<u8>,
    ) -> Self {
        Self {
            participant,
            document_type,
            processes,
            signed_bytes,
        }
    }

    /// Returns the participant the metadata was published for.
    #[must_use]
    pub fn participant(&self) -> &ParticipantId {
        &self.participant
    }

    /// Returns the document-type the metadata is scoped to.
    #[must_use]
    pub fn document_type(&self) -> &DocumentTypeId {
        &self.document_type
    }

    /// Returns the per-process endpoint groups.
    #[must_use]
    pub fn processes(&self) -> &[ProcessEndpoints] {
        &self.processes
    }

    /// Returns the raw signed metadata document.
    #[must_use]
    pub fn signed_bytes(&self) -> &[u8] {
        &self.signed_bytes
    }
}
