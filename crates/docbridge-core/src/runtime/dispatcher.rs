// crates/docbridge-core/src/runtime/dispatcher.rs
// ============================================================================
// Module: Docbridge Dispatcher
// Description: Outbound state machine and transport handoff.
// Purpose: Tie discovery, validation, and dispatch into one checked flow.
// Dependencies: crate::{core, interfaces, runtime::registry}, log, thiserror
// ============================================================================

//! ## Overview
//! One outgoing message advances through the states ASSEMBLING → VALIDATED →
//! ROUTED → DISPATCHED, enforced at runtime by [`Outbound`]. Every missing
//! precondition is a fatal, non-retryable error for that message instance.
//! [`Dispatcher::send`] performs the final handoff: resolve the configured
//! transport implementation, run the optional diagnostic dump, invoke the
//! driver, and classify any failure. The dispatcher never retries; an error
//! always means the driver was never invoked or itself reported failure.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::sync::Arc;

use thiserror::Error;

use crate::core::identifiers::RulesetId;
use crate::core::identifiers::TransportId;
use crate::core::message::Message;
use crate::core::message::MessageBuilder;
use crate::core::message::MessageError;
use crate::core::message::Payload;
use crate::core::routing::RoutingInformation;
use crate::core::validation::ValidationResult;
use crate::interfaces::ErrorCode;
use crate::interfaces::MessageDump;
use crate::runtime::registry::RegistryError;
use crate::runtime::registry::TransportRegistry;

// ============================================================================
// SECTION: Dispatch Errors
// ============================================================================

/// Errors produced while advancing or dispatching an outbound message.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
/// - `Outgoing` preserves the transport's optional code and cause.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// Message payload invariants failed.
    #[error(transparent)]
    Message(#[from] MessageError),
    /// Validation reported ERROR findings.
    #[error("validation against {ruleset} reported {error_count} error finding(s)")]
    ValidationFailed {
        /// Ruleset the payload was validated against.
        ruleset: RulesetId,
        /// Number of ERROR findings.
        error_count: usize,
    },
    /// A state transition was attempted out of order.
    #[error("outbound message is in state {actual}, expected {expected}")]
    InvalidState {
        /// State required by the attempted transition.
        expected: OutboundState,
        /// Actual state of the message instance.
        actual: OutboundState,
    },
    /// Registry resolution failed.
    #[error(transparent)]
    Registry(#[from] RegistryError),
    /// The transport implementation reported failure.
    #[error("transport rejected outgoing message: {message}")]
    Outgoing {
        /// Optional classified error code from the transport.
        code: Option<ErrorCode>,
        /// Human-readable failure message.
        message: String,
        /// Underlying cause reported by the transport.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

// ============================================================================
// SECTION: Dispatcher
// ============================================================================

/// Final-handoff dispatcher for outgoing messages.
///
/// # Invariants
/// - No internal retry; retry policy belongs to the caller.
/// - A returned error means the driver was never invoked, or was invoked and
///   itself reported failure; never an unknown in-between state.
pub struct Dispatcher {
    /// Registry resolving transport implementations.
    registry: Arc<TransportRegistry>,
    /// Configured transport implementation ID.
    configured: TransportId,
    /// Optional diagnostic dump collaborator.
    dump: Option<Arc<dyn MessageDump>>,
}

impl Dispatcher {
    /// Creates a dispatcher for the configured transport implementation.
    #[must_use]
    pub fn new(registry: Arc<TransportRegistry>, configured: TransportId) -> Self {
        Self {
            registry,
            configured,
            dump: None,
        }
    }

    /// Attaches a diagnostic dump collaborator.
    #[must_use]
    pub fn with_dump(mut self, dump: Arc<dyn MessageDump>) -> Self {
        self.dump = Some(dump);
        self
    }

    /// Sends one routed message through the configured transport.
    ///
    /// The diagnostic dump runs immediately before handoff; a dump failure
    /// is logged and never blocks dispatch.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::Registry`] when the configured
    /// implementation does not resolve and [`DispatchError::Outgoing`] when
    /// the transport reports failure.
    pub fn send(
        &self,
        routing: &RoutingInformation,
        message: &Message,
    ) -> Result<(), DispatchError> {
        let driver = self.registry.get_configured(&self.configured)?;
        if let Some(dump) = &self.dump
            && let Err(err) = dump.dump(routing, message)
        {
            log::warn!("diagnostic dump failed before dispatch to {}: {err}", routing.receiver());
        }
        driver.send_outgoing(routing, message).map_err(|err| DispatchError::Outgoing {
            code: err.code,
            message: err.message,
            source: err.source,
        })
    }
}

// ============================================================================
// SECTION: Outbound State Machine
// ============================================================================

/// Lifecycle state of one outbound message instance.
///
/// # Invariants
/// - States advance strictly forward; `Dispatched` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutboundState {
    /// Payloads being added.
    Assembling,
    /// Payload invariants hold and validation reported no ERROR findings.
    Validated,
    /// Routing information is fully populated.
    Routed,
    /// The configured transport accepted the message. Terminal.
    Dispatched,
}

impl fmt::Display for OutboundState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Assembling => f.write_str("ASSEMBLING"),
            Self::Validated => f.write_str("VALIDATED"),
            Self::Routed => f.write_str("ROUTED"),
            Self::Dispatched => f.write_str("DISPATCHED"),
        }
    }
}

/// One outbound message advancing through the dispatch lifecycle.
///
/// # Invariants
/// - Transitions are checked; a failed precondition is fatal for this
///   instance (callers assemble a fresh instance rather than retrying).
/// - A message with zero payloads can never leave ASSEMBLING; routing
///   information missing any field can never be attached (its builder
///   rejects partial data).
pub struct Outbound {
    /// Builder collecting headers and payloads while ASSEMBLING.
    builder: MessageBuilder,
    /// Built message, present from VALIDATED onwards.
    message: Option<Message>,
    /// Validation outcome recorded at the VALIDATED transition.
    validation: Option<ValidationResult>,
    /// Routing information, present from ROUTED onwards.
    routing: Option<RoutingInformation>,
    /// Current lifecycle state.
    state: OutboundState,
}

impl Outbound {
    /// Creates a new instance in ASSEMBLING state.
    #[must_use]
    pub fn new(builder: MessageBuilder) -> Self {
        Self {
            builder,
            message: None,
            validation: None,
            routing: None,
            state: OutboundState::Assembling,
        }
    }

    /// Returns the current lifecycle state.
    #[must_use]
    pub const fn state(&self) -> OutboundState {
        self.state
    }

    /// Returns the built message from VALIDATED onwards.
    #[must_use]
    pub fn message(&self) -> Option<&Message> {
        self.message.as_ref()
    }

    /// Returns the validation outcome from VALIDATED onwards.
    #[must_use]
    pub fn validation(&self) -> Option<&ValidationResult> {
        self.validation.as_ref()
    }

    /// Returns the routing information from ROUTED onwards.
    #[must_use]
    pub fn routing(&self) -> Option<&RoutingInformation> {
        self.routing.as_ref()
    }

    /// Checks that the instance is in `expected` state.
    fn require_state(&self, expected: OutboundState) -> Result<(), DispatchError> {
        if self.state == expected {
            Ok(())
        } else {
            Err(DispatchError::InvalidState {
                expected,
                actual: self.state,
            })
        }
    }

    /// Appends a payload while ASSEMBLING.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::InvalidState`] outside ASSEMBLING.
    pub fn add_payload(&mut self, payload: Payload) -> Result<(), DispatchError> {
        self.require_state(OutboundState::Assembling)?;
        let builder = std::mem::take(&mut self.builder);
        self.builder = builder.payload(payload);
        Ok(())
    }

    /// Advances ASSEMBLING → VALIDATED.
    ///
    /// Builds the message (enforcing the payload invariants) and records the
    /// validation outcome, which must contain zero ERROR findings.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::Message`] when payload invariants fail,
    /// [`DispatchError::ValidationFailed`] when ERROR findings are present,
    /// and [`DispatchError::InvalidState`] outside ASSEMBLING.
    pub fn mark_validated(&mut self, validation: ValidationResult) -> Result<(), DispatchError> {
        self.require_state(OutboundState::Assembling)?;
        let message = std::mem::take(&mut self.builder).build()?;
        if !validation.is_success() {
            return Err(DispatchError::ValidationFailed {
                ruleset: validation.ruleset().clone(),
                error_count: validation.error_count(),
            });
        }
        self.message = Some(message);
        self.validation = Some(validation);
        self.state = OutboundState::Validated;
        Ok(())
    }

    /// Advances VALIDATED → ROUTED.
    ///
    /// Routing information is complete by construction; attaching it outside
    /// VALIDATED is rejected.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::InvalidState`] outside VALIDATED.
    pub fn mark_routed(&mut self, routing: RoutingInformation) -> Result<(), DispatchError> {
        self.require_state(OutboundState::Validated)?;
        self.routing = Some(routing);
        self.state = OutboundState::Routed;
        Ok(())
    }

    /// Advances ROUTED → DISPATCHED through the given dispatcher.
    ///
    /// On failure the instance stays in ROUTED but is fatal for this
    /// message; callers must not retry the same instance.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::InvalidState`] outside ROUTED and any error
    /// from [`Dispatcher::send`].
    pub fn dispatch(&mut self, dispatcher: &Dispatcher) -> Result<(), DispatchError> {
        self.require_state(OutboundState::Routed)?;
        let routing = self.routing.as_ref().ok_or(DispatchError::InvalidState {
            expected: OutboundState::Routed,
            actual: self.state,
        })?;
        let message = self.message.as_ref().ok_or(DispatchError::InvalidState {
            expected: OutboundState::Routed,
            actual: self.state,
        })?;
        dispatcher.send(routing, message)?;
        self.state = OutboundState::Dispatched;
        Ok(())
    }
}
