// crates/docbridge-core/src/core/mod.rs
// ============================================================================
// Module: Docbridge Core Types
// Description: Value types shared across discovery, validation, and dispatch.
// Purpose: Group identifier, message, routing, metadata, and result models.
// Dependencies: crate-internal submodules
// ============================================================================

//! ## Overview
//! Core value types of the connector. Everything here is an immutable value
//! owned by the call that created it; the only shared mutable state in the
//! system lives in the runtime transport registry.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod dataset;
pub mod identifiers;
pub mod message;
pub mod metadata;
pub mod routing;
pub mod validation;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use dataset::DatasetResponse;
pub use identifiers::DatasetTypeId;
pub use identifiers::DefaultIdentifierFactory;
pub use identifiers::DocumentTypeId;
pub use identifiers::IdentifierError;
pub use identifiers::IdentifierFactory;
pub use identifiers::MAX_SCHEME_LENGTH;
pub use identifiers::MAX_VALUE_LENGTH;
pub use identifiers::ParticipantId;
pub use identifiers::ProcessId;
pub use identifiers::RulesetId;
pub use identifiers::TransportId;
pub use identifiers::TransportProfileId;
pub use message::Message;
pub use message::MessageBuilder;
pub use message::MessageError;
pub use message::Payload;
pub use metadata::EndpointRecord;
pub use metadata::ProcessEndpoints;
pub use metadata::ServiceMetadata;
pub use routing::Endpoint;
pub use routing::RoutingError;
pub use routing::RoutingInformation;
pub use routing::RoutingInformationBuilder;
pub use validation::Finding;
pub use validation::FindingSeverity;
pub use validation::SourceLocation;
pub use validation::ValidationResult;
