// crates/docbridge-discovery/tests/endpoint.rs
// ============================================================================
// Module: Endpoint Selector Tests
// Description: Narrowing service metadata to one endpoint.
// Purpose: Verify profile/process matching and absent-result semantics.
// ============================================================================

//! ## Overview
//! Covers the endpoint selector contract over in-memory service metadata:
//! "service exists but not on this profile" is `None` rather than an error,
//! mismatched scope or process yields `None`, and the static selector
//! ignores its inputs entirely.

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use docbridge_core::DocumentTypeId;
use docbridge_core::Endpoint;
use docbridge_core::EndpointRecord;
use docbridge_core::ParticipantId;
use docbridge_core::ProcessEndpoints;
use docbridge_core::ProcessId;
use docbridge_core::ServiceMetadata;
use docbridge_core::TransportProfileId;
use docbridge_discovery::DirectoryEndpointSelector;
use docbridge_discovery::EndpointSelector;
use docbridge_discovery::StaticEndpointSelector;
use rustls_pki_types::CertificateDer;
use url::Url;

// ============================================================================
// SECTION: Helpers
// ============================================================================

fn participant() -> ParticipantId {
    ParticipantId::new("iso6523", "0088:123456").unwrap()
}

fn document_type() -> DocumentTypeId {
    DocumentTypeId::new("bdx-docid-qns", "registered-organization").unwrap()
}

fn process() -> ProcessId {
    ProcessId::new("cenbii-procid-ubl", "request-response").unwrap()
}

fn record(profile: &str, url: &str) -> EndpointRecord {
    EndpointRecord::new(
        TransportProfileId::new(profile),
        Url::parse(url).unwrap(),
        CertificateDer::from(b"dummy-der-certificate".to_vec()),
        None,
    )
}

fn metadata_with_profiles(profiles: &[&str]) -> ServiceMetadata {
    let endpoints = profiles
        .iter()
        .map(|profile| record(profile, &format!("https://receiver.example.org/{profile}")))
        .collect();
    ServiceMetadata::new(
        participant(),
        document_type(),
        vec![ProcessEndpoints::new(process(), endpoints)],
        b"{}".to_vec(),
    )
}

// ============================================================================
// SECTION: Directory Selector
// ============================================================================

#[test]
fn matching_profile_yields_the_endpoint() {
    let metadata = metadata_with_profiles(&["profile-a", "profile-b"]);
    let selected = DirectoryEndpointSelector::new()
        .select(
            &participant(),
            &document_type(),
            &process(),
            &TransportProfileId::new("profile-b"),
            &metadata,
        )
        .unwrap();
    assert_eq!(selected.transport_profile().as_str(), "profile-b");
    assert_eq!(selected.url().as_str(), "https://receiver.example.org/profile-b");
}

#[test]
fn unserved_profile_is_absent_not_an_error() {
    let metadata = metadata_with_profiles(&["profile-a", "profile-b"]);
    let selected = DirectoryEndpointSelector::new().select(
        &participant(),
        &document_type(),
        &process(),
        &TransportProfileId::new("profile-c"),
        &metadata,
    );
    assert!(selected.is_none());
}

#[test]
fn unknown_process_is_absent() {
    let metadata = metadata_with_profiles(&["profile-a"]);
    let selected = DirectoryEndpointSelector::new().select(
        &participant(),
        &document_type(),
        &ProcessId::new("cenbii-procid-ubl", "other-process").unwrap(),
        &TransportProfileId::new("profile-a"),
        &metadata,
    );
    assert!(selected.is_none());
}

#[test]
fn metadata_scoped_to_another_participant_is_absent() {
    let metadata = metadata_with_profiles(&["profile-a"]);
    let selected = DirectoryEndpointSelector::new().select(
        &ParticipantId::new("iso6523", "9999:other").unwrap(),
        &document_type(),
        &process(),
        &TransportProfileId::new("profile-a"),
        &metadata,
    );
    assert!(selected.is_none());
}

// ============================================================================
// SECTION: Static Selector
// ============================================================================

#[test]
fn static_selector_ignores_every_input() {
    let pinned = Endpoint::new(
        TransportProfileId::new("pinned-profile"),
        Url::parse("https://pinned.example.org/as4").unwrap(),
        CertificateDer::from(b"dummy-der-certificate".to_vec()),
        None,
    );
    let selector = StaticEndpointSelector::new(pinned.clone());
    let metadata = metadata_with_profiles(&["profile-a"]);

    let selected = selector
        .select(
            &participant(),
            &document_type(),
            &process(),
            &TransportProfileId::new("profile-that-does-not-exist"),
            &metadata,
        )
        .unwrap();
    assert_eq!(selected, pinned);
}
