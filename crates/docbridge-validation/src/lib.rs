// crates/docbridge-validation/src/lib.rs
// ============================================================================
// Module: Docbridge Validation Library
// Description: Named-ruleset payload validation for the connector.
// Purpose: Gate outgoing payloads on deterministic rule findings.
// Dependencies: docbridge-core, serde_json
// ============================================================================

//! ## Overview
//! Payload validation for outgoing dispatch: rulesets are registered under
//! stable identifiers and applied to raw payload bytes, producing ordered
//! findings classified ERROR, WARNING, or NOTE. Only ERROR findings block
//! dispatch. Unknown ruleset identifiers fail closed.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod registry;
pub mod ruleset;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use registry::ValidationError;
pub use registry::ValidatorRegistry;
pub use ruleset::JSON_STRUCTURE_RULESET_ID;
pub use ruleset::JsonStructureRuleset;
pub use ruleset::Ruleset;
