// crates/docbridge-core/src/lib.rs
// ============================================================================
// Module: Docbridge Core Library
// Description: Public API surface for the Docbridge connector core.
// Purpose: Expose core types, interfaces, and runtime helpers.
// Dependencies: crate::{core, interfaces, runtime}
// ============================================================================

//! ## Overview
//! Docbridge core is the Discovery & Dispatch Resolution Layer of a
//! cross-border document-exchange connector: identifier and message value
//! types, the interface seams to transport implementations and error
//! reporting, the concurrency-safe transport registry, and the dispatcher
//! that ties discovery, validation, and dispatch together. Network-facing
//! resolvers and the validator live in sibling crates and depend on the
//! types defined here.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod core;
pub mod interfaces;
pub mod runtime;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use core::*;

pub use interfaces::CollectingErrorSink;
pub use interfaces::DumpError;
pub use interfaces::ErrorCode;
pub use interfaces::ErrorEvent;
pub use interfaces::ErrorSeverity;
pub use interfaces::ErrorSink;
pub use interfaces::LogErrorSink;
pub use interfaces::MessageDump;
pub use interfaces::OutgoingError;
pub use interfaces::StaticTransportDiscovery;
pub use interfaces::TransportDiscovery;
pub use interfaces::TransportDiscoveryError;
pub use interfaces::TransportDriver;
pub use runtime::DispatchError;
pub use runtime::Dispatcher;
pub use runtime::FileMessageDump;
pub use runtime::Outbound;
pub use runtime::OutboundState;
pub use runtime::RegistryError;
pub use runtime::TransportRegistry;
