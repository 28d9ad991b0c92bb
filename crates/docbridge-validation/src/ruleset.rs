// crates/docbridge-validation/src/ruleset.rs
// ============================================================================
// Module: Validation Rulesets
// Description: Ruleset seam and the built-in structural JSON ruleset.
// Purpose: Define how named rule bundles examine a raw payload.
// Dependencies: docbridge-core, serde_json
// ============================================================================

//! ## Overview
//! A [`Ruleset`] is a named, versioned bundle of validation rules applied to
//! a raw payload. Rulesets are pure: identical inputs yield identical
//! findings, the payload is neither mutated nor retained, and severity
//! classification is fixed per rule. The crate ships one built-in structural
//! JSON ruleset so registry wiring can be exercised without external rule
//! content.

// ============================================================================
// SECTION: Imports
// ============================================================================

use docbridge_core::Finding;
use docbridge_core::FindingSeverity;
use docbridge_core::RulesetId;
use docbridge_core::SourceLocation;
use serde_json::Value;

// ============================================================================
// SECTION: Ruleset Seam
// ============================================================================

/// One named, versioned bundle of validation rules.
///
/// # Invariants
/// - `apply` is deterministic for identical `(payload, locale)` inputs.
/// - Implementations must not retain the payload after returning.
pub trait Ruleset: Send + Sync {
    /// Returns the stable identifier of this ruleset.
    fn id(&self) -> RulesetId;

    /// Applies the rules to `payload`, localizing messages for `locale`
    /// where the ruleset supports it.
    fn apply(&self, payload: &[u8], locale: &str) -> Vec<Finding>;
}

// ============================================================================
// SECTION: Built-In JSON Structure Ruleset
// ============================================================================

/// Identifier of the built-in structural JSON ruleset.
pub const JSON_STRUCTURE_RULESET_ID: &str = "docbridge:json-structure:1";

/// Built-in ruleset checking that a payload is well-formed JSON.
///
/// Empty payloads and parse failures are ERROR findings carrying the parse
/// location; a top-level JSON `null` is a WARNING. Messages are not
/// localized; the locale argument is ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonStructureRuleset;

impl JsonStructureRuleset {
    /// Creates the built-in structural JSON ruleset.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Ruleset for JsonStructureRuleset {
    fn id(&self) -> RulesetId {
        RulesetId::new(JSON_STRUCTURE_RULESET_ID)
    }

    fn apply(&self, payload: &[u8], _locale: &str) -> Vec<Finding> {
        if payload.is_empty() {
            return vec![Finding::new(
                SourceLocation::default(),
                FindingSeverity::Error,
                "payload is empty",
            )];
        }
        match serde_json::from_slice::<Value>(payload) {
            Ok(Value::Null) => vec![Finding::new(
                SourceLocation::at(1, 1),
                FindingSeverity::Warning,
                "payload is JSON null",
            )],
            Ok(_) => Vec::new(),
            Err(err) => {
                let line = u64::try_from(err.line()).unwrap_or(0);
                let column = u64::try_from(err.column()).unwrap_or(0);
                vec![Finding::new(
                    SourceLocation::at(line, column),
                    FindingSeverity::Error,
                    format!("payload is not well-formed JSON: {err}"),
                )]
            }
        }
    }
}
