// crates/docbridge-discovery/tests/directory.rs
// ============================================================================
// Module: Directory Resolver Tests
// Description: Service-group and service-metadata lookup behavior.
// Purpose: Verify not-found semantics, contract checks, and tolerance.
// ============================================================================

//! ## Overview
//! Covers the two directory lookups against a local HTTP server: empty and
//! absent publications, network failure versus not-found, the participant /
//! document-type contract check, and per-record tolerance with error sink
//! reporting.

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use std::thread;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use docbridge_core::CollectingErrorSink;
use docbridge_core::DocumentTypeId;
use docbridge_core::ParticipantId;
use docbridge_discovery::DirectoryClient;
use docbridge_discovery::DirectoryError;
use docbridge_discovery::LookupConfig;
use serde_json::json;
use tiny_http::Response;
use tiny_http::Server;
use url::Url;

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Serves `count` requests, answering each with the same status and body.
fn serve(status: u16, body: String, count: usize) -> (Url, thread::JoinHandle<()>) {
    let server = Server::http("127.0.0.1:0").unwrap();
    let addr = server.server_addr().to_ip().unwrap();
    let base = Url::parse(&format!("http://{addr}/")).unwrap();
    let handle = thread::spawn(move || {
        for _ in 0..count {
            let request = server.recv().unwrap();
            let response = Response::from_string(body.clone()).with_status_code(status);
            request.respond(response).unwrap();
        }
    });
    (base, handle)
}

fn client_for(base: Url) -> DirectoryClient {
    DirectoryClient::new(LookupConfig::new(base)).unwrap()
}

fn participant() -> ParticipantId {
    ParticipantId::new("iso6523", "0088:123456").unwrap()
}

fn document_type() -> DocumentTypeId {
    DocumentTypeId::new("bdx-docid-qns", "registered-organization").unwrap()
}

fn cert_b64() -> String {
    BASE64.encode(b"dummy-der-certificate")
}

// ============================================================================
// SECTION: Service Groups
// ============================================================================

#[test]
fn zero_published_service_groups_yield_an_empty_map() {
    let (base, handle) = serve(200, json!({ "service_groups": [] }).to_string(), 1);
    let sink = CollectingErrorSink::new();
    let hrefs = client_for(base).service_group_hrefs(&participant(), &sink).unwrap();
    assert!(hrefs.is_empty());
    assert!(sink.is_empty());
    handle.join().unwrap();
}

#[test]
fn unknown_participant_yields_an_empty_map_not_an_error() {
    let (base, handle) = serve(404, String::new(), 1);
    let sink = CollectingErrorSink::new();
    let hrefs = client_for(base).service_group_hrefs(&participant(), &sink).unwrap();
    assert!(hrefs.is_empty());
    handle.join().unwrap();
}

#[test]
fn hrefs_are_keyed_by_decoded_value_with_verbatim_payload() {
    let body = json!({
        "service_groups": [
            { "href": "services/registered%2Dorganization" },
            { "href": "services/other+type" },
        ]
    })
    .to_string();
    let (base, handle) = serve(200, body, 1);
    let sink = CollectingErrorSink::new();
    let hrefs = client_for(base).service_group_hrefs(&participant(), &sink).unwrap();
    assert_eq!(
        hrefs.get("services/registered-organization").map(String::as_str),
        Some("services/registered%2Dorganization")
    );
    assert_eq!(hrefs.get("services/other type").map(String::as_str), Some("services/other+type"));
    assert!(sink.is_empty());
    handle.join().unwrap();
}

#[test]
fn malformed_group_entries_are_skipped_and_reported() {
    let body = json!({
        "service_groups": [
            { "href": "services/good" },
            { "not_href": true },
            { "href": "services/broken%2" },
        ]
    })
    .to_string();
    let (base, handle) = serve(200, body, 1);
    let sink = CollectingErrorSink::new();
    let hrefs = client_for(base).service_group_hrefs(&participant(), &sink).unwrap();
    assert_eq!(hrefs.len(), 1);
    assert!(hrefs.contains_key("services/good"));
    assert_eq!(sink.len(), 2);
    handle.join().unwrap();
}

#[test]
fn connection_failure_is_an_error_with_a_cause() {
    // Bind and drop so the port refuses connections.
    let base = {
        let server = Server::http("127.0.0.1:0").unwrap();
        let addr = server.server_addr().to_ip().unwrap();
        Url::parse(&format!("http://{addr}/")).unwrap()
    };
    let sink = CollectingErrorSink::new();
    let err = client_for(base).service_group_hrefs(&participant(), &sink).unwrap_err();
    assert!(matches!(err, DirectoryError::Request { .. }));
    assert!(std::error::Error::source(&err).is_some());
}

// ============================================================================
// SECTION: Service Metadata
// ============================================================================

#[test]
fn absent_metadata_is_ok_none() {
    let (base, handle) = serve(404, String::new(), 1);
    let sink = CollectingErrorSink::new();
    let metadata = client_for(base)
        .service_metadata(&participant(), &document_type(), &sink)
        .unwrap();
    assert!(metadata.is_none());
    handle.join().unwrap();
}

#[test]
fn empty_body_is_ok_none() {
    let (base, handle) = serve(200, String::new(), 1);
    let sink = CollectingErrorSink::new();
    let metadata = client_for(base)
        .service_metadata(&participant(), &document_type(), &sink)
        .unwrap();
    assert!(metadata.is_none());
    handle.join().unwrap();
}

#[test]
fn server_errors_are_status_failures() {
    let (base, handle) = serve(500, "boom".to_string(), 1);
    let sink = CollectingErrorSink::new();
    let err = client_for(base)
        .service_metadata(&participant(), &document_type(), &sink)
        .unwrap_err();
    assert!(matches!(err, DirectoryError::Status { status: 500, .. }));
    handle.join().unwrap();
}

#[test]
fn metadata_for_a_different_participant_violates_the_contract() {
    let body = json!({
        "participant": { "scheme": "iso6523", "value": "9999:other" },
        "document_type": { "scheme": "bdx-docid-qns", "value": "registered-organization" },
        "processes": []
    })
    .to_string();
    let (base, handle) = serve(200, body, 1);
    let sink = CollectingErrorSink::new();
    let err = client_for(base)
        .service_metadata(&participant(), &document_type(), &sink)
        .unwrap_err();
    assert!(matches!(err, DirectoryError::Contract { .. }));
    handle.join().unwrap();
}

#[test]
fn valid_metadata_parses_with_per_endpoint_tolerance() {
    let body = json!({
        "participant": { "scheme": "iso6523", "value": "0088:123456" },
        "document_type": { "scheme": "bdx-docid-qns", "value": "registered-organization" },
        "processes": [
            {
                "process": { "scheme": "cenbii-procid-ubl", "value": "request-response" },
                "endpoints": [
                    {
                        "transport_profile": "bdxr-as4-v1",
                        "url": "https://receiver.example.org/as4",
                        "certificate_b64": cert_b64(),
                        "service_description": "registered organization lookup"
                    },
                    {
                        "transport_profile": "bdxr-as4-v1",
                        "url": "not a url",
                        "certificate_b64": cert_b64()
                    }
                ]
            }
        ]
    })
    .to_string();
    let (base, handle) = serve(200, body.clone(), 1);
    let sink = CollectingErrorSink::new();
    let metadata = client_for(base)
        .service_metadata(&participant(), &document_type(), &sink)
        .unwrap()
        .unwrap();

    assert_eq!(metadata.participant(), &participant());
    assert_eq!(metadata.document_type(), &document_type());
    assert_eq!(metadata.processes().len(), 1);
    let process = &metadata.processes()[0];
    assert_eq!(process.process().value(), "request-response");
    assert_eq!(process.endpoints().len(), 1);
    assert_eq!(process.endpoints()[0].url().as_str(), "https://receiver.example.org/as4");
    assert_eq!(metadata.signed_bytes(), body.as_bytes());
    assert_eq!(sink.len(), 1);
    handle.join().unwrap();
}
