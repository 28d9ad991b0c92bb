// crates/docbridge-validation/src/registry.rs
// ============================================================================
// Module: Validator Registry
// Description: Named ruleset catalogue and validation entry point.
// Purpose: Resolve ruleset identifiers and run validation fail-closed.
// Dependencies: docbridge-core
// ============================================================================

//! ## Overview
//! The validator registry maps [`RulesetId`] values to registered rulesets
//! and exposes the single validation entry point. An unknown identifier is
//! an error rather than a silent fallback to any default ruleset: a payload
//! is never validated against rules the caller did not name.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::sync::Arc;

use docbridge_core::RulesetId;
use docbridge_core::ValidationResult;
use thiserror::Error;

use crate::ruleset::Ruleset;

// ============================================================================
// SECTION: Validation Errors
// ============================================================================

/// Fatal validation failures.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// Validation was requested against an unregistered ruleset.
    #[error("unknown ruleset: {0}")]
    UnknownRuleset(RulesetId),
    /// A ruleset was registered twice under the same identifier.
    #[error("duplicate ruleset registration: {0}")]
    DuplicateRuleset(RulesetId),
}

// ============================================================================
// SECTION: Validator Registry
// ============================================================================

/// Catalogue of named rulesets keyed by identifier.
///
/// # Invariants
/// - At most one ruleset per identifier; duplicates are rejected at
///   registration time.
/// - Validation against an unknown identifier fails, never falls back.
#[derive(Default)]
pub struct ValidatorRegistry {
    /// Registered rulesets in identifier order.
    rulesets: BTreeMap<RulesetId, Arc<dyn Ruleset>>,
}

impl ValidatorRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            rulesets: BTreeMap::new(),
        }
    }

    /// Registers one ruleset under its own identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::DuplicateRuleset`] when the identifier is
    /// already registered; the existing registration is kept.
    pub fn register(&mut self, ruleset: Arc<dyn Ruleset>) -> Result<(), ValidationError> {
        let id = ruleset.id();
        if self.rulesets.contains_key(&id) {
            return Err(ValidationError::DuplicateRuleset(id));
        }
        self.rulesets.insert(id, ruleset);
        Ok(())
    }

    /// Returns the registered ruleset identifiers in order.
    #[must_use]
    pub fn ruleset_ids(&self) -> Vec<RulesetId> {
        self.rulesets.keys().cloned().collect()
    }

    /// Returns the number of registered rulesets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rulesets.len()
    }

    /// Returns true when no ruleset is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rulesets.is_empty()
    }

    /// Validates a payload against the named ruleset.
    ///
    /// Deterministic for identical inputs; the payload is neither mutated
    /// nor retained. Findings in the result are ordered by location.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::UnknownRuleset`] when `ruleset_id` does
    /// not name a registered ruleset.
    pub fn validate(
        &self,
        ruleset_id: &RulesetId,
        payload: &[u8],
        locale: &str,
    ) -> Result<ValidationResult, ValidationError> {
        let ruleset = self
            .rulesets
            .get(ruleset_id)
            .ok_or_else(|| ValidationError::UnknownRuleset(ruleset_id.clone()))?;
        let findings = ruleset.apply(payload, locale);
        Ok(ValidationResult::new(ruleset_id.clone(), findings))
    }
}
