// crates/docbridge-discovery/src/endpoint.rs
// ============================================================================
// Module: Endpoint Selector
// Description: Narrow resolved service metadata to a single endpoint.
// Purpose: Select the one endpoint matching process and transport profile.
// Dependencies: docbridge-core
// ============================================================================

//! ## Overview
//! The endpoint selector is the final narrowing step of discovery: given
//! signed service metadata, a recipient, a document type, a process, and a
//! required transport profile, it yields at most one [`Endpoint`]. "Service
//! exists but not on this profile" is `None`, never an error; callers treat
//! an absent endpoint as a normal no-route outcome.

// ============================================================================
// SECTION: Imports
// ============================================================================

use docbridge_core::DocumentTypeId;
use docbridge_core::Endpoint;
use docbridge_core::ParticipantId;
use docbridge_core::ProcessId;
use docbridge_core::ServiceMetadata;
use docbridge_core::TransportProfileId;

// ============================================================================
// SECTION: Selector Seam
// ============================================================================

/// Selects one endpoint out of resolved service metadata.
pub trait EndpointSelector: Send + Sync {
    /// Picks the endpoint serving `recipient` for the given document type,
    /// process, and transport profile, or `None` when no endpoint matches.
    fn select(
        &self,
        recipient: &ParticipantId,
        document_type: &DocumentTypeId,
        process: &ProcessId,
        transport_profile: &TransportProfileId,
        metadata: &ServiceMetadata,
    ) -> Option<Endpoint>;
}

// ============================================================================
// SECTION: Directory-Backed Selector
// ============================================================================

/// Production selector over directory-resolved service metadata.
///
/// Returns `None` when the metadata is scoped to a different participant or
/// document type than requested, when the metadata carries no group for the
/// requested process, or when the matching group has no endpoint on the
/// requested transport profile. The first matching endpoint record wins.
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectoryEndpointSelector;

impl DirectoryEndpointSelector {
    /// Creates the directory-backed selector.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl EndpointSelector for DirectoryEndpointSelector {
    fn select(
        &self,
        recipient: &ParticipantId,
        document_type: &DocumentTypeId,
        process: &ProcessId,
        transport_profile: &TransportProfileId,
        metadata: &ServiceMetadata,
    ) -> Option<Endpoint> {
        if metadata.participant() != recipient || metadata.document_type() != document_type {
            return None;
        }
        let group = metadata
            .processes()
            .iter()
            .find(|group| group.process() == process)?;
        let record = group
            .endpoints()
            .iter()
            .find(|record| record.transport_profile() == transport_profile)?;
        Some(Endpoint::new(
            record.transport_profile().clone(),
            record.url().clone(),
            record.certificate().clone(),
            record.service_description().map(str::to_string),
        ))
    }
}

// ============================================================================
// SECTION: Static Selector
// ============================================================================

/// Test-only selector that returns one preconfigured endpoint for any input.
///
/// Never wire this into production configuration; the configuration layer
/// refuses a static selector unless an explicit opt-in flag is set.
#[derive(Debug, Clone)]
pub struct StaticEndpointSelector {
    /// The endpoint returned for every selection.
    endpoint: Endpoint,
}

impl StaticEndpointSelector {
    /// Creates a selector that always yields `endpoint`.
    #[must_use]
    pub fn new(endpoint: Endpoint) -> Self {
        Self {
            endpoint,
        }
    }
}

impl EndpointSelector for StaticEndpointSelector {
    fn select(
        &self,
        _recipient: &ParticipantId,
        _document_type: &DocumentTypeId,
        _process: &ProcessId,
        _transport_profile: &TransportProfileId,
        _metadata: &ServiceMetadata,
    ) -> Option<Endpoint> {
        Some(self.endpoint.clone())
    }
}
