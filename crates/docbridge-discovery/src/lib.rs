// crates/docbridge-discovery/src/lib.rs
// ============================================================================
// Module: Docbridge Discovery Library
// Description: Directory (SMP) and dataset (DSD) lookup clients.
// Purpose: Resolve participants, metadata, and endpoints over the network.
// Dependencies: docbridge-core, reqwest, serde_json, url
// ============================================================================

//! ## Overview
//! Network-facing discovery for the connector: the directory resolver maps a
//! participant to its published service groups and a (participant,
//! document-type) pair to signed service metadata; the endpoint selector
//! narrows metadata to one dispatchable endpoint; the dataset resolver
//! answers dataset-type/country queries. All lookups share one bounded
//! blocking HTTP path with redirects disabled and hard response-size limits.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod dataset;
pub mod directory;
pub mod endpoint;
mod http;
mod wire;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use dataset::DatasetClient;
pub use dataset::DatasetError;
pub use directory::DirectoryClient;
pub use directory::DirectoryError;
pub use endpoint::DirectoryEndpointSelector;
pub use endpoint::EndpointSelector;
pub use endpoint::StaticEndpointSelector;
pub use http::DEFAULT_MAX_RESPONSE_BYTES;
pub use http::DEFAULT_TIMEOUT_MS;
pub use http::DEFAULT_USER_AGENT;
pub use http::LookupConfig;
