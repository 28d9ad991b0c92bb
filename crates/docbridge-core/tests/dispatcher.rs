// crates/docbridge-core/tests/dispatcher.rs
// ============================================================================
// Module: Dispatcher Tests
// Description: Outbound state machine and transport handoff behavior.
// Purpose: Verify dispatch preconditions and failure classification.
// ============================================================================

//! ## Overview
//! Covers the outbound lifecycle ASSEMBLING → VALIDATED → ROUTED →
//! DISPATCHED: payload and validation preconditions, routing completeness,
//! error-code preservation on transport failure, and the non-fatal
//! diagnostic dump contract.

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use std::sync::Arc;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;

use docbridge_core::DispatchError;
use docbridge_core::Dispatcher;
use docbridge_core::DocumentTypeId;
use docbridge_core::DumpError;
use docbridge_core::Endpoint;
use docbridge_core::ErrorCode;
use docbridge_core::Finding;
use docbridge_core::FindingSeverity;
use docbridge_core::Message;
use docbridge_core::MessageDump;
use docbridge_core::MessageError;
use docbridge_core::Outbound;
use docbridge_core::OutboundState;
use docbridge_core::OutgoingError;
use docbridge_core::ParticipantId;
use docbridge_core::Payload;
use docbridge_core::ProcessId;
use docbridge_core::RoutingError;
use docbridge_core::RoutingInformation;
use docbridge_core::RulesetId;
use docbridge_core::SourceLocation;
use docbridge_core::StaticTransportDiscovery;
use docbridge_core::TransportDriver;
use docbridge_core::TransportId;
use docbridge_core::TransportProfileId;
use docbridge_core::TransportRegistry;
use docbridge_core::ValidationResult;
use rcgen::generate_simple_self_signed;
use rustls_pki_types::CertificateDer;
use url::Url;

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Driver recording invocations and optionally failing.
struct RecordingDriver {
    id: TransportId,
    calls: AtomicUsize,
    fail_with_code: Option<ErrorCode>,
}

impl RecordingDriver {
    fn accepting(id: &str) -> Arc<Self> {
        Arc::new(Self {
            id: TransportId::new(id),
            calls: AtomicUsize::new(0),
            fail_with_code: None,
        })
    }

    fn failing(id: &str, code: &str) -> Arc<Self> {
        Arc::new(Self {
            id: TransportId::new(id),
            calls: AtomicUsize::new(0),
            fail_with_code: Some(ErrorCode::new(code)),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl TransportDriver for RecordingDriver {
    fn id(&self) -> TransportId {
        self.id.clone()
    }

    fn send_outgoing(
        &self,
        _routing: &RoutingInformation,
        _message: &Message,
    ) -> Result<(), OutgoingError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.fail_with_code {
            Some(code) => Err(OutgoingError::new("endpoint rejected the message")
                .with_code(code.clone())
                .with_source("connection reset by peer".into())),
            None => Ok(()),
        }
    }
}

/// Dump collaborator that always fails.
struct FailingDump;

impl MessageDump for FailingDump {
    fn dump(&self, _routing: &RoutingInformation, _message: &Message) -> Result<(), DumpError> {
        Err(DumpError::Serialize("record rendering failed".to_string()))
    }
}

fn test_certificate() -> CertificateDer<'static> {
    let rcgen::CertifiedKey {
        cert,
        signing_key: _,
    } = generate_simple_self_signed(vec!["localhost".to_string()]).unwrap();
    CertificateDer::from(cert)
}

fn sample_routing() -> RoutingInformation {
    let endpoint = Endpoint::new(
        TransportProfileId::new("bdxr-as4-v1"),
        Url::parse("https://receiver.example.org/as4").unwrap(),
        test_certificate(),
        None,
    );
    RoutingInformation::from_endpoint(
        ParticipantId::new("iso6523", "0088:sender").unwrap(),
        ParticipantId::new("iso6523", "0088:receiver").unwrap(),
        DocumentTypeId::new("bdx-docid-qns", "registered-organization").unwrap(),
        ProcessId::new("cenbii-procid-ubl", "request-response").unwrap(),
        &endpoint,
    )
}

fn success_result() -> ValidationResult {
    ValidationResult::new(RulesetId::new("docbridge:json-structure:1"), Vec::new())
}

fn dispatcher_for(
    driver: Arc<RecordingDriver>,
    configured: &str,
) -> (Arc<TransportRegistry>, Dispatcher) {
    let registry = Arc::new(TransportRegistry::new());
    let discovery = StaticTransportDiscovery::new(vec![driver as Arc<dyn TransportDriver>]);
    registry.reinitialize(&discovery).unwrap();
    let dispatcher = Dispatcher::new(Arc::clone(&registry), TransportId::new(configured));
    (registry, dispatcher)
}

// ============================================================================
// SECTION: Assembly Preconditions
// ============================================================================

#[test]
fn zero_payloads_cannot_leave_assembling() {
    let mut outbound = Outbound::new(Message::builder());
    let err = outbound.mark_validated(success_result()).unwrap_err();
    assert!(matches!(err, DispatchError::Message(MessageError::NoPayloads)));
    assert_eq!(outbound.state(), OutboundState::Assembling);

    let err = outbound.mark_routed(sample_routing()).unwrap_err();
    assert!(matches!(
        err,
        DispatchError::InvalidState {
            expected: OutboundState::Validated,
            actual: OutboundState::Assembling,
        }
    ));
}

#[test]
fn duplicate_content_ids_fail_validation_transition() {
    let mut outbound = Outbound::new(Message::builder());
    outbound
        .add_payload(Payload::with_content_id("application/json", "cid-1", b"{}".to_vec()))
        .unwrap();
    outbound
        .add_payload(Payload::with_content_id("application/json", "cid-1", b"[]".to_vec()))
        .unwrap();
    let err = outbound.mark_validated(success_result()).unwrap_err();
    assert!(matches!(
        err,
        DispatchError::Message(MessageError::DuplicateContentId(id)) if id == "cid-1"
    ));
}

#[test]
fn error_findings_block_the_validated_transition() {
    let mut outbound = Outbound::new(Message::builder());
    outbound.add_payload(Payload::new("application/json", b"not json".to_vec())).unwrap();
    let failed = ValidationResult::new(
        RulesetId::new("docbridge:json-structure:1"),
        vec![Finding::new(
            SourceLocation::at(1, 1),
            FindingSeverity::Error,
            "payload is not well-formed JSON",
        )],
    );
    let err = outbound.mark_validated(failed).unwrap_err();
    assert!(matches!(
        err,
        DispatchError::ValidationFailed {
            error_count: 1,
            ..
        }
    ));
    assert_eq!(outbound.state(), OutboundState::Assembling);
}

#[test]
fn warning_findings_do_not_block_dispatch() {
    let mut outbound = Outbound::new(Message::builder());
    outbound.add_payload(Payload::new("application/json", b"null".to_vec())).unwrap();
    let warned = ValidationResult::new(
        RulesetId::new("docbridge:json-structure:1"),
        vec![Finding::new(
            SourceLocation::at(1, 1),
            FindingSeverity::Warning,
            "payload is JSON null",
        )],
    );
    outbound.mark_validated(warned).unwrap();
    assert_eq!(outbound.state(), OutboundState::Validated);
    assert_eq!(outbound.validation().unwrap().warning_count(), 1);
}

// ============================================================================
// SECTION: Routing Preconditions
// ============================================================================

#[test]
fn routing_builder_rejects_missing_certificate() {
    let err = RoutingInformation::builder()
        .sender(ParticipantId::new("iso6523", "0088:sender").unwrap())
        .receiver(ParticipantId::new("iso6523", "0088:receiver").unwrap())
        .document_type(DocumentTypeId::new("bdx-docid-qns", "registered-organization").unwrap())
        .process(ProcessId::new("cenbii-procid-ubl", "request-response").unwrap())
        .transport_profile(TransportProfileId::new("bdxr-as4-v1"))
        .endpoint_url(Url::parse("https://receiver.example.org/as4").unwrap())
        .build()
        .unwrap_err();
    assert_eq!(err, RoutingError::MissingField("certificate"));
}

#[test]
fn dispatch_requires_the_routed_state() {
    let driver = RecordingDriver::accepting("as4");
    let (_registry, dispatcher) = dispatcher_for(Arc::clone(&driver), "as4");
    let mut outbound = Outbound::new(Message::builder());
    outbound.add_payload(Payload::new("application/json", b"{}".to_vec())).unwrap();
    outbound.mark_validated(success_result()).unwrap();

    let err = outbound.dispatch(&dispatcher).unwrap_err();
    assert!(matches!(
        err,
        DispatchError::InvalidState {
            expected: OutboundState::Routed,
            actual: OutboundState::Validated,
        }
    ));
    assert_eq!(driver.calls(), 0);
}

// ============================================================================
// SECTION: Dispatch
// ============================================================================

#[test]
fn full_lifecycle_reaches_dispatched() {
    let driver = RecordingDriver::accepting("as4");
    let (_registry, dispatcher) = dispatcher_for(Arc::clone(&driver), "as4");

    let mut outbound = Outbound::new(Message::builder());
    outbound.add_payload(Payload::new("application/json", b"{\"k\":1}".to_vec())).unwrap();
    outbound.mark_validated(success_result()).unwrap();
    outbound.mark_routed(sample_routing()).unwrap();
    outbound.dispatch(&dispatcher).unwrap();

    assert_eq!(outbound.state(), OutboundState::Dispatched);
    assert_eq!(driver.calls(), 1);
}

#[test]
fn transport_failure_preserves_code_and_cause() {
    let driver = RecordingDriver::failing("as4", "ME-001");
    let (_registry, dispatcher) = dispatcher_for(Arc::clone(&driver), "as4");

    let mut outbound = Outbound::new(Message::builder());
    outbound.add_payload(Payload::new("application/json", b"{}".to_vec())).unwrap();
    outbound.mark_validated(success_result()).unwrap();
    outbound.mark_routed(sample_routing()).unwrap();

    let err = outbound.dispatch(&dispatcher).unwrap_err();
    match err {
        DispatchError::Outgoing {
            code,
            source,
            ..
        } => {
            assert_eq!(code, Some(ErrorCode::new("ME-001")));
            assert!(source.is_some());
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(outbound.state(), OutboundState::Routed);
    assert_eq!(driver.calls(), 1);
}

#[test]
fn unresolvable_configured_transport_never_invokes_a_driver() {
    let driver = RecordingDriver::accepting("as4");
    let (_registry, dispatcher) = dispatcher_for(Arc::clone(&driver), "missing");

    let err = dispatcher
        .send(&sample_routing(), &Message::builder()
            .payload(Payload::new("application/json", b"{}".to_vec()))
            .build()
            .unwrap())
        .unwrap_err();
    assert!(matches!(err, DispatchError::Registry(_)));
    assert_eq!(driver.calls(), 0);
}

#[test]
fn dump_failure_never_blocks_dispatch() {
    let driver = RecordingDriver::accepting("as4");
    let registry = Arc::new(TransportRegistry::new());
    let discovery =
        StaticTransportDiscovery::new(vec![Arc::clone(&driver) as Arc<dyn TransportDriver>]);
    registry.reinitialize(&discovery).unwrap();
    let dispatcher =
        Dispatcher::new(registry, TransportId::new("as4")).with_dump(Arc::new(FailingDump));

    let message = Message::builder()
        .payload(Payload::new("application/json", b"{}".to_vec()))
        .build()
        .unwrap();
    dispatcher.send(&sample_routing(), &message).unwrap();
    assert_eq!(driver.calls(), 1);
}
