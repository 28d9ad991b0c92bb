// crates/docbridge-core/tests/message.rs
// ============================================================================
// Module: Message Model Tests
// Description: Payload invariants and filesystem dump records.
// Purpose: Verify message assembly rules and the audit dump format.
// ============================================================================

//! ## Overview
//! Covers message builder invariants (non-empty payload list, unique
//! non-empty content IDs, non-empty mime types), generated content IDs, and
//! the JSON audit records written by the filesystem dump.

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use docbridge_core::DocumentTypeId;
use docbridge_core::Endpoint;
use docbridge_core::FileMessageDump;
use docbridge_core::Message;
use docbridge_core::MessageDump;
use docbridge_core::MessageError;
use docbridge_core::ParticipantId;
use docbridge_core::Payload;
use docbridge_core::ProcessId;
use docbridge_core::RoutingInformation;
use docbridge_core::TransportProfileId;
use rcgen::generate_simple_self_signed;
use rustls_pki_types::CertificateDer;
use serde_json::Value;
use url::Url;

// ============================================================================
// SECTION: Message Builder
// ============================================================================

#[test]
fn builder_rejects_an_empty_payload_list() {
    let err = Message::builder().build().unwrap_err();
    assert_eq!(err, MessageError::NoPayloads);
}

#[test]
fn builder_rejects_empty_content_id_and_mime_type() {
    let err = Message::builder()
        .payload(Payload::with_content_id("application/json", "", b"{}".to_vec()))
        .build()
        .unwrap_err();
    assert_eq!(err, MessageError::EmptyContentId);

    let err = Message::builder()
        .payload(Payload::with_content_id("", "cid-1", b"{}".to_vec()))
        .build()
        .unwrap_err();
    assert_eq!(err, MessageError::EmptyMimeType);
}

#[test]
fn builder_rejects_duplicate_content_ids() {
    let err = Message::builder()
        .payload(Payload::with_content_id("application/json", "cid-1", b"{}".to_vec()))
        .payload(Payload::with_content_id("application/xml", "cid-1", b"<a/>".to_vec()))
        .build()
        .unwrap_err();
    assert_eq!(err, MessageError::DuplicateContentId("cid-1".to_string()));
}

#[test]
fn generated_content_ids_are_nonempty_and_distinct() {
    let first = Payload::new("application/json", b"{}".to_vec());
    let second = Payload::new("application/json", b"{}".to_vec());
    assert!(!first.content_id().is_empty());
    assert_ne!(first.content_id(), second.content_id());

    let message = Message::builder().payload(first).payload(second).build().unwrap();
    assert_eq!(message.payloads().len(), 2);
}

#[test]
fn builder_preserves_headers_and_payload_order() {
    let message = Message::builder()
        .sender(ParticipantId::new("iso6523", "0088:sender").unwrap())
        .receiver(ParticipantId::new("iso6523", "0088:receiver").unwrap())
        .payload(Payload::with_content_id("application/json", "cid-1", b"{}".to_vec()))
        .payload(Payload::with_content_id("application/xml", "cid-2", b"<a/>".to_vec()))
        .build()
        .unwrap();
    assert_eq!(message.sender().unwrap().value(), "0088:sender");
    assert!(message.document_type().is_none());
    assert_eq!(message.payloads()[0].content_id(), "cid-1");
    assert_eq!(message.payloads()[1].content_id(), "cid-2");
}

// ============================================================================
// SECTION: File Dump
// ============================================================================

fn sample_routing() -> RoutingInformation {
    let rcgen::CertifiedKey {
        cert,
        signing_key: _,
    } = generate_simple_self_signed(vec!["localhost".to_string()]).unwrap();
    let endpoint = Endpoint::new(
        TransportProfileId::new("bdxr-as4-v1"),
        Url::parse("https://receiver.example.org/as4").unwrap(),
        CertificateDer::from(cert),
        Some("registered organization lookup".to_string()),
    );
    RoutingInformation::from_endpoint(
        ParticipantId::new("iso6523", "0088:sender").unwrap(),
        ParticipantId::new("iso6523", "0088:receiver").unwrap(),
        DocumentTypeId::new("bdx-docid-qns", "registered-organization").unwrap(),
        ProcessId::new("cenbii-procid-ubl", "request-response").unwrap(),
        &endpoint,
    )
}

#[test]
fn file_dump_writes_one_json_record_per_message() {
    let dir = tempfile::tempdir().unwrap();
    let dump = FileMessageDump::new(dir.path().join("dumps")).unwrap();
    let routing = sample_routing();
    let message = Message::builder()
        .payload(Payload::with_content_id("application/json", "cid-1", b"{\"k\":1}".to_vec()))
        .build()
        .unwrap();

    dump.dump(&routing, &message).unwrap();
    dump.dump(&routing, &message).unwrap();

    let mut entries: Vec<_> = std::fs::read_dir(dump.directory())
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .collect();
    entries.sort();
    assert_eq!(entries.len(), 2);

    let record: Value =
        serde_json::from_slice(&std::fs::read(&entries[0]).unwrap()).unwrap();
    assert_eq!(record["sender"]["value"], "0088:sender");
    assert_eq!(record["receiver"]["value"], "0088:receiver");
    assert_eq!(record["transport_profile"], "bdxr-as4-v1");
    assert_eq!(record["endpoint_url"], "https://receiver.example.org/as4");
    assert_eq!(
        record["payloads"][0]["content_b64"],
        BASE64.encode(b"{\"k\":1}")
    );
    assert!(record["dumped_at"].as_str().unwrap().contains('T'));
    assert!(!record["certificate_der_b64"].as_str().unwrap().is_empty());
}
