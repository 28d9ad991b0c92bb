// crates/docbridge-core/src/core/routing.rs
// ============================================================================
// Module: Docbridge Routing Model
// Description: Resolved endpoint and routing-information value types.
// Purpose: Guarantee complete addressing + security data before dispatch.
// Dependencies: rustls-pki-types, url, thiserror
// ============================================================================

//! ## Overview
//! [`Endpoint`] is the output of endpoint selection: transport profile, URL,
//! and X.509 certificate. [`RoutingInformation`] is the full routing contract
//! a message needs before dispatch; its builder fails closed when any field
//! is unset, so the dispatcher never has to re-check completeness.

// ============================================================================
// SECTION: Imports
// ============================================================================

use rustls_pki_types::CertificateDer;
use thiserror::Error;
use url::Url;

use crate::core::identifiers::DocumentTypeId;
use crate::core::identifiers::ParticipantId;
use crate::core::identifiers::ProcessId;
use crate::core::identifiers::TransportProfileId;

// ============================================================================
// SECTION: Routing Errors
// ============================================================================

/// Errors produced when assembling routing information.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoutingError {
    /// A required routing field was not supplied.
    #[error("routing information is missing required field: {0}")]
    MissingField(&'static str),
}

// ============================================================================
// SECTION: Endpoint
// ============================================================================

/// A resolved receiving endpoint for one transport profile.
///
/// Endpoints are produced by endpoint selection over signed service
/// metadata; code that intends to dispatch must not construct them ad hoc.
///
/// # Invariants
/// - `certificate` is the DER-encoded X.509 certificate of the endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    /// Transport profile the endpoint serves.
    transport_profile: TransportProfileId,
    /// Endpoint address.
    url: Url,
    /// DER-encoded endpoint certificate.
    certificate: CertificateDer<'static>,
    /// Optional human-readable service description.
    service_description: Option<String>,
}

impl Endpoint {
    /// Creates an endpoint from selection output.
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

// ============================================================================
// SECTION: Routing Information
// ============================================================================

/// Complete routing contract for one outgoing message.
///
/// # Invariants
/// - Every field is present; the builder rejects partial routing data.
/// - Instances are owned by the dispatching call and discarded afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutingInformation {
    /// Sending participant.
    sender: ParticipantId,
    /// Receiving participant.
    receiver: ParticipantId,
    /// Document-type of the exchange.
    document_type: DocumentTypeId,
    /// Business process of the exchange.
    process: ProcessId,
    /// Transport profile agreed with the endpoint.
    transport_profile: TransportProfileId,
    /// Resolved endpoint URL.
    endpoint_url: Url,
    /// DER-encoded endpoint certificate.
    certificate: CertificateDer<'static>,
}

impl RoutingInformation {
    /// Starts a routing-information builder.
    #[must_use]
    pub fn builder() -> RoutingInformationBuilder {
        RoutingInformationBuilder::default()
    }

    /// Builds routing information directly from a selected endpoint.
    #[must_use]
    pub fn from_endpoint(
        sender: ParticipantId,
        receiver: ParticipantId,
        document_type: DocumentTypeId,
        process: ProcessId,
        endpoint: &Endpoint,
    ) -> Self {
        Self {
            sender,
            receiver,
            document_type,
            process,
            transport_profile: endpoint.transport_profile().clone(),
            endpoint_url: endpoint.url().clone(),
            certificate: endpoint.certificate().clone(),
        }
    }

    /// Returns the sending participant.
    #[must_use]
    pub fn sender(&self) -> &ParticipantId {
        &self.sender
    }

    /// Returns the receiving participant.
    #[must_use]
    pub fn receiver(&self) -> &ParticipantId {
        &self.receiver
    }

    /// Returns the document-type of the exchange.
    #[must_use]
    pub fn document_type(&self) -> &DocumentTypeId {
        &self.document_type
    }

    /// Returns the business process of the exchange.
    #[must_use]
    pub fn process(&self) -> &ProcessId {
        &self.process
    }

    /// Returns the transport profile.
    #[must_use]
    pub fn transport_profile(&self) -> &TransportProfileId {
        &self.transport_profile
    }

    /// Returns the resolved endpoint URL.
    #[must_use]
    pub fn endpoint_url(&self) -> &Url {
        &self.endpoint_url
    }

    /// Returns the DER-encoded endpoint certificate.
    #[must_use]
    pub fn certificate(&self) -> &CertificateDer<'static> {
        &self.certificate
    }
}

/// Builder collecting routing fields; `build` fails on any unset field.
///
/// # Invariants
/// - `build` succeeds only when every field has been supplied.
#[derive(Debug, Default, Clone)]
pub struct RoutingInformationBuilder {
    /// Sending participant, required.
    sender: Option<ParticipantId>,
    /// Receiving participant, required.
    receiver: Option<ParticipantId>,
    /// Document-type, required.
    document_type: Option<DocumentTypeId>,
    /// Business process, required.
    process: Option<ProcessId>,
    /// Transport profile, required.
    transport_profile: Option<TransportProfileId>,
    /// Endpoint URL, required.
    endpoint_url: Option<Url>,
    /// Endpoint certificate, required.
    certificate: Option<CertificateDer<'static>>,
}

impl RoutingInformationBuilder {
    /// Sets the sending participant.
    #[must_use]
    pub fn sender(mut self, sender: ParticipantId) -> Self {
        self.sender = Some(sender);
        self
    }

    /// Sets the receiving participant.
    #[must_use]
    pub fn receiver(mut self, receiver: ParticipantId) -> Self {
        self.receiver = Some(receiver);
        self
    }

    /// Sets the document-type.
    #[must_use]
    pub fn document_type(mut self, document_type: DocumentTypeId) -> Self {
        self.document_type = Some(document_type);
        self
    }

    /// Sets the business process.
    #[must_use]
    pub fn process(mut self, process: ProcessId) -> Self {
        self.process = Some(process);
        self
    }

    /// Sets the transport profile.
    #[must_use]
    pub fn transport_profile(mut self, transport_profile: TransportProfileId) -> Self {
        self.transport_profile = Some(transport_profile);
        self
    }

    /// Sets the endpoint URL.
    #[must_use]
    pub fn endpoint_url(mut self, endpoint_url: Url) -> Self {
        self.endpoint_url = Some(endpoint_url);
        self
    }

    /// Sets the endpoint certificate.
    #[must_use]
    pub fn certificate(mut self, certificate: CertificateDer<'static>) -> Self {
        self.certificate = Some(certificate);
        self
    }

    /// Validates completeness and produces routing information.
    ///
    /// # Errors
    ///
    /// Returns [`RoutingError::MissingField`] naming the first unset field.
    pub fn build(self) -> Result<RoutingInformation, RoutingError> {
        Ok(RoutingInformation {
            sender: self.sender.ok_or(RoutingError::MissingField("sender"))?,
            receiver: self.receiver.ok_or(RoutingError::MissingField("receiver"))?,
            document_type: self
                .document_type
                .ok_or(RoutingError::MissingField("document_type"))?,
            process: self.process.ok_or(RoutingError::MissingField("process"))?,
            transport_profile: self
                .transport_profile
                .ok_or(RoutingError::MissingField("transport_profile"))?,
            endpoint_url: self.endpoint_url.ok_or(RoutingError::MissingField("endpoint_url"))?,
            certificate: self.certificate.ok_or(RoutingError::MissingField("certificate"))?,
        })
    }
}
