// crates/docbridge-config/src/lib.rs
// ============================================================================
// Module: Docbridge Config Library
// Description: Strict TOML configuration for the connector.
// Purpose: Load, bound, and validate connector configuration fail-closed.
// Dependencies: docbridge-core, docbridge-discovery, serde, toml
// ============================================================================

//! ## Overview
//! Connector configuration: the outgoing transport implementation, the
//! directory and dataset lookup services with bounded timeouts and response
//! sizes, endpoint selection (with a guarded test-only static mode), and
//! the optional diagnostic dump directory. All parsing is strict and all
//! validation fails closed.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::ConfigError;
pub use config::ConnectorConfig;
pub use config::DumpConfig;
pub use config::EndpointSelectionConfig;
pub use config::LookupSectionConfig;
pub use config::SelectorMode;
pub use config::StaticEndpointConfig;
pub use config::TransportConfig;
