// crates/docbridge-core/src/core/identifiers.rs
// ============================================================================
// Module: Docbridge Identifiers
// Description: Scheme-qualified and opaque identifiers for document exchange.
// Purpose: Provide strongly typed, immutable identifier value types.
// Dependencies: serde, thiserror
// ============================================================================

//! ## Overview
//! This module defines the identifier value types used throughout the
//! connector. Participant, document-type, and process identifiers are
//! scheme-qualified (scheme + value) with equality by the pair; they are
//! constructed through an [`IdentifierFactory`] that applies minimal,
//! fail-closed validation. Transport, ruleset, and dataset-type identifiers
//! are opaque string newtypes with no normalization.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Maximum length of an identifier scheme in bytes.
pub const MAX_SCHEME_LENGTH: usize = 128;
/// Maximum length of an identifier value in bytes.
pub const MAX_VALUE_LENGTH: usize = 512;
/// Separator between scheme and value in display form.
const SCHEME_VALUE_SEPARATOR: &str = "::";

// ============================================================================
// SECTION: Identifier Errors
// ============================================================================

/// Errors produced when constructing scheme-qualified identifiers.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentifierError {
    /// Scheme was empty.
    #[error("identifier scheme must not be empty")]
    EmptyScheme,
    /// Value was empty.
    #[error("identifier value must not be empty")]
    EmptyValue,
    /// Scheme exceeded the allowed length.
    #[error("identifier scheme exceeds {MAX_SCHEME_LENGTH} bytes")]
    SchemeTooLong,
    /// Value exceeded the allowed length.
    #[error("identifier value exceeds {MAX_VALUE_LENGTH} bytes")]
    ValueTooLong,
    /// Scheme contained whitespace or non-printable characters.
    #[error("identifier scheme contains illegal characters: {0}")]
    IllegalScheme(String),
    /// Value contained non-printable characters.
    #[error("identifier value contains illegal characters")]
    IllegalValue,
}

/// Validates a scheme string against the shared identifier rules.
fn check_scheme(scheme: &str) -> Result<(), IdentifierError> {
    if scheme.is_empty() {
        return Err(IdentifierError::EmptyScheme);
    }
    if scheme.len() > MAX_SCHEME_LENGTH {
        return Err(IdentifierError::SchemeTooLong);
    }
    if !scheme.chars().all(|ch| ch.is_ascii_graphic()) {
        return Err(IdentifierError::IllegalScheme(scheme.to_string()));
    }
    Ok(())
}

/// Validates a value string against the shared identifier rules.
fn check_value(value: &str) -> Result<(), IdentifierError> {
    if value.is_empty() {
        return Err(IdentifierError::EmptyValue);
    }
    if value.len() > MAX_VALUE_LENGTH {
        return Err(IdentifierError::ValueTooLong);
    }
    if value.chars().any(char::is_control) {
        return Err(IdentifierError::IllegalValue);
    }
    Ok(())
}

// ============================================================================
// SECTION: Scheme-Qualified Identifiers
// ============================================================================

/// Participant identifier for a legal party (data consumer or provider).
///
/// # Invariants
/// - Immutable; equality and ordering are by (scheme, value).
/// - Scheme and value satisfy the factory validation rules.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct ParticipantId {
    /// Identifier scheme (for example an actor-ID scheme).
    scheme: String,
    /// Identifier value within the scheme.
    value: String,
}

impl ParticipantId {
    /// Creates a participant identifier after validating scheme and value.
    ///
    /// # Errors
    ///
    /// Returns [`IdentifierError`] when either part violates the rules.
    pub fn new(
        scheme: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<Self, IdentifierError> {
        let scheme = scheme.into();
        let value = value.into();
        check_scheme(&scheme)?;
        check_value(&value)?;
        Ok(Self {
            scheme,
            value,
        })
    }

    /// Returns the identifier scheme.
    #[must_use]
    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// Returns the identifier value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{SCHEME_VALUE_SEPARATOR}{}", self.scheme, self.value)
    }
}

/// Document-type identifier for the document exchange contract.
///
/// # Invariants
/// - Immutable; equality and ordering are by (scheme, value).
/// - Scheme and value satisfy the factory validation rules.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct DocumentTypeId {
    /// Identifier scheme.
    scheme: String,
    /// Identifier value within the scheme.
    value: String,
}

impl DocumentTypeId {
    /// Creates a document-type identifier after validating scheme and value.
    ///
    /// # Errors
    ///
    /// Returns [`IdentifierError`] when either part violates the rules.
    pub fn new(
        scheme: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<Self, IdentifierError> {
        let scheme = scheme.into();
        let value = value.into();
        check_scheme(&scheme)?;
        check_value(&value)?;
        Ok(Self {
            scheme,
            value,
        })
    }

    /// Returns the identifier scheme.
    #[must_use]
    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// Returns the identifier value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for DocumentTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{SCHEME_VALUE_SEPARATOR}{}", self.scheme, self.value)
    }
}

/// Process identifier for the business process of an exchange.
///
/// # Invariants
/// - Immutable; equality and ordering are by (scheme, value).
/// - Scheme and value satisfy the factory validation rules.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct ProcessId {
    /// Identifier scheme.
    scheme: String,
    /// Identifier value within the scheme.
    value: String,
}

impl ProcessId {
    /// Creates a process identifier after validating scheme and value.
    ///
    /// # Errors
    ///
    /// Returns [`IdentifierError`] when either part violates the rules.
    pub fn new(
        scheme: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<Self, IdentifierError> {
        let scheme = scheme.into();
        let value = value.into();
        check_scheme(&scheme)?;
        check_value(&value)?;
        Ok(Self {
            scheme,
            value,
        })
    }

    /// Returns the identifier scheme.
    #[must_use]
    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// Returns the identifier value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for ProcessId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{SCHEME_VALUE_SEPARATOR}{}", self.scheme, self.value)
    }
}

// ============================================================================
// SECTION: Identifier Factory
// ============================================================================

/// Factory for scheme-qualified identifiers.
///
/// Implementations may apply stricter scheme registries; the rules enforced
/// by [`DefaultIdentifierFactory`] are the minimal shared contract.
pub trait IdentifierFactory {
    /// Builds a participant identifier from scheme and value.
    ///
    /// # Errors
    ///
    /// Returns [`IdentifierError`] when either part violates the rules.
    fn participant(&self, scheme: &str, value: &str) -> Result<ParticipantId, IdentifierError>;

    /// Builds a document-type identifier from scheme and value.
    ///
    /// # Errors
    ///
    /// Returns [`IdentifierError`] when either part violates the rules.
    fn document_type(&self, scheme: &str, value: &str) -> Result<DocumentTypeId, IdentifierError>;

    /// Builds a process identifier from scheme and value.
    ///
    /// # Errors
    ///
    /// Returns [`IdentifierError`] when either part violates the rules.
    fn process(&self, scheme: &str, value: &str) -> Result<ProcessId, IdentifierError>;
}

/// Default identifier factory applying the shared validation rules only.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultIdentifierFactory;

impl IdentifierFactory for DefaultIdentifierFactory {
    fn participant(&self, scheme: &str, value: &str) -> Result<ParticipantId, IdentifierError> {
        ParticipantId::new(scheme, value)
    }

    fn document_type(&self, scheme: &str, value: &str) -> Result<DocumentTypeId, IdentifierError> {
        DocumentTypeId::new(scheme, value)
    }

    fn process(&self, scheme: &str, value: &str) -> Result<ProcessId, IdentifierError> {
        ProcessId::new(scheme, value)
    }
}

// ============================================================================
// SECTION: Opaque Identifiers
// ============================================================================

/// Transport-profile identifier naming a wire protocol/version.
///
/// # Invariants
/// - Opaque UTF-8 string; no normalization or validation is applied by this type.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransportProfileId(String);

impl TransportProfileId {
    /// Creates a new transport-profile identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TransportProfileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for TransportProfileId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for TransportProfileId {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

/// Transport implementation identifier used by the transport registry.
///
/// # Invariants
/// - Opaque UTF-8 string; no normalization or validation is applied by this type.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransportId(String);

impl TransportId {
    /// Creates a new transport implementation identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TransportId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for TransportId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for TransportId {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

/// Ruleset identifier (VESID-like `namespace:name:version`).
///
/// # Invariants
/// - Opaque UTF-8 string; no normalization or validation is applied by this type.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RulesetId(String);

impl RulesetId {
    /// Creates a new ruleset identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RulesetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for RulesetId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for RulesetId {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

/// Dataset-type identifier used by dataset discovery.
///
/// # Invariants
/// - Opaque UTF-8 string; no normalization or validation is applied by this type.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DatasetTypeId(String);

impl DatasetTypeId {
    /// Creates a new dataset-type identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DatasetTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for DatasetTypeId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for DatasetTypeId {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}
