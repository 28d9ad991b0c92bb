// crates/docbridge-core/src/core/validation.rs
// ============================================================================
// Module: Docbridge Validation Results
// Description: Structured findings produced by payload validation.
// Purpose: Represent pass/fail/warning outcomes with stable ordering.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Validation of a payload against a named ruleset yields a
//! [`ValidationResult`]: the ruleset identifier plus an ordered list of
//! [`Finding`] values tagged ERROR, WARNING, or NOTE. Success is defined as
//! the absence of ERROR findings; warnings and notes never block dispatch
//! but are surfaced to the caller.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Serialize;

use crate::core::identifiers::RulesetId;

// ============================================================================
// SECTION: Findings
// ============================================================================

/// Severity classification of one validation finding.
///
/// Classification is fixed per rule and not caller-configurable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FindingSeverity {
    /// Informational note; never blocks dispatch.
    Note,
    /// Non-fatal warning; never blocks dispatch.
    Warning,
    /// Fatal finding; any occurrence makes the result unsuccessful.
    Error,
}

impl fmt::Display for FindingSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Note => f.write_str("NOTE"),
            Self::Warning => f.write_str("WARNING"),
            Self::Error => f.write_str("ERROR"),
        }
    }
}

/// Source location a finding refers to within the validated payload.
///
/// # Invariants
/// - Ordering is (resource, line, column) so findings sort by location.
#[derive(Debug, Default, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct SourceLocation {
    /// Optional resource label (for multi-part payloads).
    pub resource: Option<String>,
    /// One-based line number when known.
    pub line: Option<u64>,
    /// One-based column number when known.
    pub column: Option<u64>,
}

impl SourceLocation {
    /// Creates a location with line and column only.
    #[must_use]
    pub const fn at(line: u64, column: u64) -> Self {
        Self {
            resource: None,
            line: Some(line),
            column: Some(column),
        }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let resource = self.resource.as_deref().unwrap_or("payload");
        match (self.line, self.column) {
            (Some(line), Some(column)) => write!(f, "{resource}:{line}:{column}"),
            (Some(line), None) => write!(f, "{resource}:{line}"),
            _ => f.write_str(resource),
        }
    }
}

/// One validation finding.
///
/// # Invariants
/// - Ordering is location-first so result lists sort by location.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Finding {
    /// Location the finding refers to.
    pub location: SourceLocation,
    /// Severity classification, fixed per rule.
    pub severity: FindingSeverity,
    /// Human-readable finding message.
    pub message: String,
}

impl Finding {
    /// Creates a finding.
    #[must_use]
    pub fn new(
        location: SourceLocation,
        severity: FindingSeverity,
        message: impl Into<String>,
    ) -> Self {
        Self {
            location,
            severity,
            message: message.into(),
        }
    }
}

// ============================================================================
// SECTION: Validation Result
// ============================================================================

/// Outcome of validating one payload against a named ruleset.
///
/// # Invariants
/// - `findings` is ordered by location.
/// - Success is equivalent to zero [`FindingSeverity::Error`] findings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    /// Ruleset the payload was validated against.
    ruleset: RulesetId,
    /// Findings ordered by location.
    findings: Vec<Finding>,
}

impl ValidationResult {
    /// Creates a result, sorting the findings by location.
    #[must_use]
    pub fn new(ruleset: RulesetId, mut findings: Vec<Finding>) -> Self {
        findings.sort();
        Self {
            ruleset,
            findings,
        }
    }

    /// Returns the ruleset the payload was validated against.
    #[must_use]
    pub fn ruleset(&self) -> &RulesetId {
        &self.ruleset
    }

    /// Returns the findings ordered by location.
    #[must_use]
    pub fn findings(&self) -> &[Finding] {
        &self.findings
    }

    /// Returns true when no ERROR finding is present.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.error_count() == 0
    }

    /// Returns the number of ERROR findings.
    #[must_use]
    pub fn error_count(&self) -> usize {
        self.findings
            .iter()
            .filter(|finding| finding.severity == FindingSeverity::Error)
            .count()
    }

    /// Returns the number of WARNING findings.
    #[must_use]
    pub fn warning_count(&self) -> usize {
        self.findings
            .iter()
            .filter(|finding| finding.severity == FindingSeverity::Warning)
            .count()
    }
}
