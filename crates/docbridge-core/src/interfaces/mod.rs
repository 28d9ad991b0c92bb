// crates/docbridge-core/src/interfaces/mod.rs
// ============================================================================
// Module: Docbridge Interfaces
// Description: Backend-agnostic interfaces for transport, dump, and errors.
// Purpose: Define the contract surfaces the connector runtime consumes.
// Dependencies: crate::core, thiserror, log
// ============================================================================

//! ## Overview
//! Interfaces define how the connector integrates with transport
//! implementations, plugin discovery, diagnostic dumping, and error
//! reporting without embedding backend-specific details. Discovery and
//! validation operations accept an [`ErrorSink`] for non-fatal conditions
//! instead of aborting on the first recoverable problem; fatal conditions
//! propagate as `Result::Err` values.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::PoisonError;

use serde::Serialize;
use thiserror::Error;

use crate::core::identifiers::TransportId;
use crate::core::message::Message;
use crate::core::routing::RoutingInformation;

// ============================================================================
// SECTION: Error Channel
// ============================================================================

/// Severity classification of one reported error event.
///
/// # Invariants
/// - Variants are stable and ordered by increasing severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ErrorSeverity {
    /// Informational note.
    Note,
    /// Recoverable problem; the enclosing operation continued.
    Warning,
    /// Error condition reported without aborting the enclosing operation.
    Error,
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Note => f.write_str("NOTE"),
            Self::Warning => f.write_str("WARNING"),
            Self::Error => f.write_str("ERROR"),
        }
    }
}

/// Classified error code attached to events and outgoing failures.
///
/// # Invariants
/// - Opaque UTF-8 string; code tables are owned by transports and callers.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct ErrorCode(String);

impl ErrorCode {
    /// Creates a new error code.
    #[must_use]
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// Returns the code as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for ErrorCode {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// One classified error event routed through an [`ErrorSink`].
///
/// # Invariants
/// - `cause` is a rendered diagnostic, never relied on for control flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorEvent {
    /// Severity classification.
    pub severity: ErrorSeverity,
    /// Optional classified error code.
    pub code: Option<ErrorCode>,
    /// Human-readable message.
    pub message: String,
    /// Optional rendered underlying cause.
    pub cause: Option<String>,
}

impl ErrorEvent {
    /// Creates an event without code or cause.
    #[must_use]
    pub fn new(severity: ErrorSeverity, message: impl Into<String>) -> Self {
        Self {
            severity,
            code: None,
            message: message.into(),
            cause: None,
        }
    }

    /// Attaches a classified error code.
    #[must_use]
    pub fn with_code(mut self, code: ErrorCode) -> Self {
        self.code = Some(code);
        self
    }

    /// Attaches a rendered underlying cause.
    #[must_use]
    pub fn with_cause(mut self, cause: impl Into<String>) -> Self {
        self.cause = Some(cause.into());
        self
    }
}

/// Sink accepting classified error events during discovery and validation.
///
/// Implementations must not panic; reporting is best effort and must never
/// influence the control flow of the reporting operation.
pub trait ErrorSink: Send + Sync {
    /// Records one classified error event.
    fn report(&self, event: ErrorEvent);
}

/// Error sink collecting events in memory for post-call inspection.
#[derive(Debug, Default)]
pub struct CollectingErrorSink {
    /// Recorded events in report order.
    events: Mutex<Vec<ErrorEvent>>,
}

impl CollectingErrorSink {
    /// Creates an empty collecting sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of all events recorded so far.
    #[must_use]
    pub fn snapshot(&self) -> Vec<ErrorEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns the number of events recorded so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Returns true when no event has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ErrorSink for CollectingErrorSink {
    fn report(&self, event: ErrorEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
    }
}

/// Error sink forwarding events to the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogErrorSink;

impl ErrorSink for LogErrorSink {
    fn report(&self, event: ErrorEvent) {
        let code = event.code.as_ref().map_or("-", ErrorCode::as_str);
        let cause = event.cause.as_deref().unwrap_or("-");
        match event.severity {
            ErrorSeverity::Note => {
                log::info!("[{code}] {} (cause: {cause})", event.message);
            }
            ErrorSeverity::Warning => {
                log::warn!("[{code}] {} (cause: {cause})", event.message);
            }
            ErrorSeverity::Error => {
                log::error!("[{code}] {} (cause: {cause})", event.message);
            }
        }
    }
}

// ============================================================================
// SECTION: Transport Driver
// ============================================================================

/// Failure reported by a transport implementation for one outgoing message.
///
/// # Invariants
/// - `source` preserves the underlying cause for diagnostics.
#[derive(Debug, Error)]
#[error("outgoing transport failure: {message}")]
pub struct OutgoingError {
    /// Optional classified error code.
    pub code: Option<ErrorCode>,
    /// Human-readable failure message.
    pub message: String,
    /// Optional underlying cause.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl OutgoingError {
    /// Creates a failure without code or cause.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            code: None,
            message: message.into(),
            source: None,
        }
    }

    /// Attaches a classified error code.
    #[must_use]
    pub fn with_code(mut self, code: ErrorCode) -> Self {
        self.code = Some(code);
        self
    }

    /// Attaches the underlying cause.
    #[must_use]
    pub fn with_source(mut self, source: Box<dyn std::error::Error + Send + Sync>) -> Self {
        self.source = Some(source);
        self
    }
}

/// Transport implementation (SPI) consumed by the dispatcher.
///
/// Implementations are identified by a stable string ID and registered with
/// the transport registry through a [`TransportDiscovery`] collaborator.
pub trait TransportDriver: Send + Sync {
    /// Returns the stable implementation identifier.
    fn id(&self) -> TransportId;

    /// Sends one outgoing message with its routing information.
    ///
    /// # Errors
    ///
    /// Returns [`OutgoingError`] when the transport reports failure; in that
    /// case the message must not have been partially delivered in an
    /// unobservable state.
    fn send_outgoing(
        &self,
        routing: &RoutingInformation,
        message: &Message,
    ) -> Result<(), OutgoingError>;
}

impl fmt::Debug for dyn TransportDriver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransportDriver")
            .field("id", &self.id())
            .finish_non_exhaustive()
    }
}

// ============================================================================
// SECTION: Transport Discovery
// ============================================================================

/// Failure scanning the hosting environment for transport implementations.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error)]
pub enum TransportDiscoveryError {
    /// The hosting environment's plugin scan failed.
    #[error("transport discovery failed: {0}")]
    ScanFailed(String),
}

/// Collaborator discovering transport implementations at startup.
///
/// The registry itself is discovery-agnostic; the hosting environment
/// injects whatever plugin mechanism it uses behind this trait.
pub trait TransportDiscovery: Send + Sync {
    /// Discovers all available transport implementations.
    ///
    /// # Errors
    ///
    /// Returns [`TransportDiscoveryError`] when the scan itself fails; an
    /// empty result is returned as `Ok` and rejected by the registry.
    fn discover(&self) -> Result<Vec<Arc<dyn TransportDriver>>, TransportDiscoveryError>;
}

/// Discovery collaborator serving a fixed list of drivers.
///
/// Suitable for static wiring and tests; production environments typically
/// provide a scanning implementation.
#[derive(Default, Clone)]
pub struct StaticTransportDiscovery {
    /// Drivers to hand to the registry, in registration order.
    drivers: Vec<Arc<dyn TransportDriver>>,
}

impl StaticTransportDiscovery {
    /// Creates a discovery collaborator over a fixed driver list.
    #[must_use]
    pub fn new(drivers: Vec<Arc<dyn TransportDriver>>) -> Self {
        Self {
            drivers,
        }
    }
}

impl TransportDiscovery for StaticTransportDiscovery {
    fn discover(&self) -> Result<Vec<Arc<dyn TransportDriver>>, TransportDiscoveryError> {
        Ok(self.drivers.clone())
    }
}

// ============================================================================
// SECTION: Diagnostic Dump
// ============================================================================

/// Errors produced while dumping an outgoing message for audit.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error)]
pub enum DumpError {
    /// Writing the dump record failed.
    #[error("dump write failed: {path}")]
    Io {
        /// Target path of the failed write.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// Serializing the dump record failed.
    #[error("dump serialization failed: {0}")]
    Serialize(String),
}

/// Diagnostic dump collaborator serializing outgoing messages for audit.
///
/// The dispatcher invokes the dump immediately before handing a message to
/// the transport implementation; a dump failure is logged and never blocks
/// dispatch.
pub trait MessageDump: Send + Sync {
    /// Serializes one outgoing routing + message pair.
    ///
    /// # Errors
    ///
    /// Returns [`DumpError`] when the record cannot be written.
    fn dump(&self, routing: &RoutingInformation, message: &Message) -> Result<(), DumpError>;
}
