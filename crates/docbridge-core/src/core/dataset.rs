// crates/docbridge-core/src/core/dataset.rs
// ============================================================================
// Module: Docbridge Dataset Records
// Description: Denormalized dataset-discovery result records.
// Purpose: Carry DSD lookup output as ordered, deduplicatable values.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! [`DatasetResponse`] is one denormalized dataset-discovery record: a
//! (participant, dataset) pair plus distribution and access-service
//! attributes. Records are totally ordered so multi-record results can be
//! collected into `BTreeSet` containers with duplicates collapsed.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Serialize;

use crate::core::identifiers::DocumentTypeId;
use crate::core::identifiers::ParticipantId;

// ============================================================================
// SECTION: Dataset Response
// ============================================================================

/// One dataset-discovery record for a (participant, dataset) pair.
///
/// # Invariants
/// - Equality and ordering cover all fields; identical records collapse when
///   collected into ordered sets.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct DatasetResponse {
    /// Participant offering the dataset.
    participant: ParticipantId,
    /// Dataset identifier as published.
    dataset_id: String,
    /// Distribution format label.
    distribution_format: String,
    /// Optional distribution conformance reference.
    distribution_conformance: Option<String>,
    /// Optional distribution media type.
    media_type: Option<String>,
    /// Optional access-service conformance reference.
    access_service_conformance: Option<String>,
    /// Document-type identifier backing the dataset.
    document_type: DocumentTypeId,
}

impl DatasetResponse {
    /// Creates a dataset-discovery record.
    #[must_use]
    pub fn new(
        participant: ParticipantId,
        dataset_id: impl Into<String>,
        distribution_format: impl Into<String>,
        distribution_conformance: Option<String>,
        media_type: Option<String>,
        access_service_conformance: Option<String>,
        document_type: DocumentTypeId,
    ) -> Self {
        Self {
            participant,
            dataset_id: dataset_id.into(),
            distribution_format: distribution_format.into(),
            distribution_conformance,
            media_type,
            access_service_conformance,
            document_type,
        }
    }

    /// Returns the participant offering the dataset.
    #[must_use]
    pub fn participant(&self) -> &ParticipantId {
        &self.participant
    }

    /// Returns the dataset identifier.
    #[must_use]
    pub fn dataset_id(&self) -> &str {
        &self.dataset_id
    }

    /// Returns the distribution format label.
    #[must_use]
    pub fn distribution_format(&self) -> &str {
        &self.distribution_format
    }

    /// Returns the optional distribution conformance reference.
    #[must_use]
    pub fn distribution_conformance(&self) -> Option<&str> {
        self.distribution_conformance.as_deref()
    }

    /// Returns the optional distribution media type.
    #[must_use]
    pub fn media_type(&self) -> Option<&str> {
        self.media_type.as_deref()
    }

    /// Returns the optional access-service conformance reference.
    #[must_use]
    pub fn access_service_conformance(&self) -> Option<&str> {
        self.access_service_conformance.as_deref()
    }

    /// Returns the document-type identifier backing the dataset.
    #[must_use]
    pub fn document_type(&self) -> &DocumentTypeId {
        &self.document_type
    }
}
