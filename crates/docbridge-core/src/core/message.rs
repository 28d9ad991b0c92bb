// crates/docbridge-core/src/core/message.rs
// ============================================================================
// Module: Docbridge Message Model
// Description: Outgoing message and payload value types.
// Purpose: Enforce payload invariants before a message can be dispatched.
// Dependencies: rand, thiserror
// ============================================================================

//! ## Overview
//! A [`Message`] carries optional addressing headers plus an ordered,
//! non-empty sequence of [`Payload`] values. Payload content IDs are unique
//! within one message; the [`MessageBuilder`] enforces this at `build` time
//! so an invalid message can never leave the builder.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

use crate::core::identifiers::DocumentTypeId;
use crate::core::identifiers::ParticipantId;
use crate::core::identifiers::ProcessId;

// ============================================================================
// SECTION: Message Errors
// ============================================================================

/// Errors produced when assembling a message.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessageError {
    /// Message contained no payloads.
    #[error("message must carry at least one payload")]
    NoPayloads,
    /// A payload content ID was empty.
    #[error("payload content id must not be empty")]
    EmptyContentId,
    /// A payload mime type was empty.
    #[error("payload mime type must not be empty")]
    EmptyMimeType,
    /// Two payloads shared the same content ID.
    #[error("duplicate payload content id: {0}")]
    DuplicateContentId(String),
}

// ============================================================================
// SECTION: Payload
// ============================================================================

/// One binary payload of an outgoing message.
///
/// # Invariants
/// - `content_id` is unique within the owning message (enforced at build).
/// - Content bytes are opaque to this layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payload {
    /// Payload mime type.
    mime_type: String,
    /// Content ID, unique within one message.
    content_id: String,
    /// Opaque payload bytes.
    content: Vec<u8>,
}

impl Payload {
    /// Creates a payload with a randomly generated content ID.
    #[must_use]
    pub fn new(mime_type: impl Into<String>, content: Vec<u8>) -> Self {
        Self {
            mime_type: mime_type.into(),
            content_id: random_content_id(),
            content,
        }
    }

    /// Creates a payload with an explicit content ID.
    #[must_use]
    pub fn with_content_id(
        mime_type: impl Into<String>,
        content_id: impl Into<String>,
        content: Vec<u8>,
    ) -> Self {
        Self {
            mime_type: mime_type.into(),
            content_id: content_id.into(),
            content,
        }
    }

    /// Returns the payload mime type.
    #[must_use]
    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    /// Returns the payload content ID.
    #[must_use]
    pub fn content_id(&self) -> &str {
        &self.content_id
    }

    /// Returns the payload bytes.
    #[must_use]
    pub fn content(&self) -> &[u8] {
        &self.content
    }
}

/// Generates a random content ID for payloads created without one.
fn random_content_id() -> String {
    let token: u128 = rand::random();
    format!("{token:032x}@docbridge")
}

// ============================================================================
// SECTION: Message
// ============================================================================

/// Outgoing message: optional addressing headers plus ordered payloads.
///
/// # Invariants
/// - Payload list is non-empty with unique, non-empty content IDs.
/// - Addressing headers may be absent; the dispatcher re-derives them from
///   routing information when needed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// Optional sender participant.
    sender: Option<ParticipantId>,
    /// Optional receiver participant.
    receiver: Option<ParticipantId>,
    /// Optional document-type header.
    document_type: Option<DocumentTypeId>,
    /// Optional process header.
    process: Option<ProcessId>,
    /// Ordered payload sequence.
    payloads: Vec<Payload>,
}

impl Message {
    /// Starts a new message builder.
    #[must_use]
    pub fn builder() -> MessageBuilder {
        MessageBuilder::new()
    }

    /// Returns the optional sender header.
    #[must_use]
    pub fn sender(&self) -> Option<&ParticipantId> {
        self.sender.as_ref()
    }

    /// Returns the optional receiver header.
    #[must_use]
    pub fn receiver(&self) -> Option<&ParticipantId> {
        self.receiver.as_ref()
    }

    /// Returns the optional document-type header.
    #[must_use]
    pub fn document_type(&self) -> Option<&DocumentTypeId> {
        self.document_type.as_ref()
    }

    /// Returns the optional process header.
    #[must_use]
    pub fn process(&self) -> Option<&ProcessId> {
        self.process.as_ref()
    }

    /// Returns the ordered payload sequence.
    #[must_use]
    pub fn payloads(&self) -> &[Payload] {
        &self.payloads
    }
}

// ============================================================================
// SECTION: Message Builder
// ============================================================================

/// Builder assembling a [`Message`] payload by payload.
///
/// # Invariants
/// - `build` succeeds only when the payload invariants hold.
#[derive(Debug, Default, Clone)]
pub struct MessageBuilder {
    /// Optional sender participant.
    sender: Option<ParticipantId>,
    /// Optional receiver participant.
    receiver: Option<ParticipantId>,
    /// Optional document-type header.
    document_type: Option<DocumentTypeId>,
    /// Optional process header.
    process: Option<ProcessId>,
    /// Payloads collected so far, in insertion order.
    payloads: Vec<Payload>,
}

impl MessageBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the sender header.
    #[must_use]
    pub fn sender(mut self, sender: ParticipantId) -> Self {
        self.sender = Some(sender);
        self
    }

    /// Sets the receiver header.
    #[must_use]
    pub fn receiver(mut self, receiver: ParticipantId) -> Self {
        self.receiver = Some(receiver);
        self
    }

    /// Sets the document-type header.
    #[must_use]
    pub fn document_type(mut self, document_type: DocumentTypeId) -> Self {
        self.document_type = Some(document_type);
        self
    }

    /// Sets the process header.
    #[must_use]
    pub fn process(mut self, process: ProcessId) -> Self {
        self.process = Some(process);
        self
    }

    /// Appends a payload, preserving insertion order.
    #[must_use]
    pub fn payload(mut self, payload: Payload) -> Self {
        self.payloads.push(payload);
        self
    }

    /// Validates the collected payloads and produces a message.
    ///
    /// # Errors
    ///
    /// Returns [`MessageError`] when the payload list is empty, a content ID
    /// or mime type is empty, or two payloads share a content ID.
    pub fn build(self) -> Result<Message, MessageError> {
        if self.payloads.is_empty() {
            return Err(MessageError::NoPayloads);
        }
        let mut seen: Vec<&str> = Vec::with_capacity(self.payloads.len());
        for payload in &self.payloads {
            if payload.content_id().is_empty() {
                return Err(MessageError::EmptyContentId);
            }
            if payload.mime_type().is_empty() {
                return Err(MessageError::EmptyMimeType);
            }
            if seen.contains(&payload.content_id()) {
                return Err(MessageError::DuplicateContentId(payload.content_id().to_string()));
            }
            seen.push(payload.content_id());
        }
        Ok(Message {
            sender: self.sender,
            receiver: self.receiver,
            document_type: self.document_type,
            process: self.process,
            payloads: self.payloads,
        })
    }
}
