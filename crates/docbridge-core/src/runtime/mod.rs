// crates/docbridge-core/src/runtime/mod.rs
// ============================================================================
// Module: Docbridge Runtime
// Description: Transport registry, dispatcher, and diagnostic dump.
// Purpose: Group the stateful runtime pieces of the connector core.
// Dependencies: crate-internal submodules
// ============================================================================

//! ## Overview
//! Runtime pieces of the connector core: the process-wide transport
//! registry, the dispatcher with its outbound state machine, and the
//! filesystem diagnostic dump.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod dispatcher;
pub mod dump;
pub mod registry;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use dispatcher::DispatchError;
pub use dispatcher::Dispatcher;
pub use dispatcher::Outbound;
pub use dispatcher::OutboundState;
pub use dump::FileMessageDump;
pub use registry::RegistryError;
pub use registry::TransportRegistry;
