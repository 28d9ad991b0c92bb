// crates/docbridge-core/tests/registry.rs
// ============================================================================
// Module: Transport Registry Tests
// Description: Registry initialization, lookup, and concurrency behavior.
// Purpose: Verify unique-ID and atomic-swap invariants under readers.
// ============================================================================

//! ## Overview
//! Covers registry initialization failures (duplicate and zero
//! implementations), configured lookup resolution, copy semantics of
//! `list_all`, and snapshot consistency while `reinitialize` runs under
//! concurrent readers.

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use std::sync::Arc;
use std::thread;

use docbridge_core::Message;
use docbridge_core::OutgoingError;
use docbridge_core::RegistryError;
use docbridge_core::RoutingInformation;
use docbridge_core::StaticTransportDiscovery;
use docbridge_core::TransportDiscovery;
use docbridge_core::TransportDiscoveryError;
use docbridge_core::TransportDriver;
use docbridge_core::TransportId;
use docbridge_core::TransportRegistry;

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Driver that accepts every message.
struct NullDriver {
    id: TransportId,
}

impl NullDriver {
    fn arc(id: &str) -> Arc<dyn TransportDriver> {
        Arc::new(Self {
            id: TransportId::new(id),
        })
    }
}

impl TransportDriver for NullDriver {
    fn id(&self) -> TransportId {
        self.id.clone()
    }

    fn send_outgoing(
        &self,
        _routing: &RoutingInformation,
        _message: &Message,
    ) -> Result<(), OutgoingError> {
        Ok(())
    }
}

/// Discovery collaborator whose scan always fails.
struct BrokenDiscovery;

impl TransportDiscovery for BrokenDiscovery {
    fn discover(&self) -> Result<Vec<Arc<dyn TransportDriver>>, TransportDiscoveryError> {
        Err(TransportDiscoveryError::ScanFailed("plugin scan unavailable".to_string()))
    }
}

// ============================================================================
// SECTION: Initialization
// ============================================================================

#[test]
fn reinitialize_registers_discovered_drivers() {
    let registry = TransportRegistry::new();
    let discovery =
        StaticTransportDiscovery::new(vec![NullDriver::arc("as4"), NullDriver::arc("rest")]);
    registry.reinitialize(&discovery).unwrap();
    assert_eq!(registry.len(), 2);
    assert!(registry.get_by_id(&TransportId::new("as4")).is_some());
    assert!(registry.get_by_id(&TransportId::new("rest")).is_some());
}

#[test]
fn duplicate_driver_ids_fail_and_keep_previous_mapping() {
    let registry = TransportRegistry::new();
    let good = StaticTransportDiscovery::new(vec![NullDriver::arc("as4")]);
    registry.reinitialize(&good).unwrap();

    let duplicated =
        StaticTransportDiscovery::new(vec![NullDriver::arc("as4"), NullDriver::arc("as4")]);
    let err = registry.reinitialize(&duplicated).unwrap_err();
    assert!(matches!(err, RegistryError::DuplicateTransport(id) if id.as_str() == "as4"));
    assert_eq!(registry.len(), 1);
    assert!(registry.get_by_id(&TransportId::new("as4")).is_some());
}

#[test]
fn zero_discovered_drivers_fail() {
    let registry = TransportRegistry::new();
    let empty = StaticTransportDiscovery::new(Vec::new());
    let err = registry.reinitialize(&empty).unwrap_err();
    assert!(matches!(err, RegistryError::NoTransports));
    assert!(registry.is_empty());
}

#[test]
fn failed_scan_surfaces_as_discovery_error() {
    let registry = TransportRegistry::new();
    let err = registry.reinitialize(&BrokenDiscovery).unwrap_err();
    assert!(matches!(err, RegistryError::Discovery(_)));
}

// ============================================================================
// SECTION: Lookup
// ============================================================================

#[test]
fn configured_lookup_resolves_or_fails_by_id() {
    let registry = TransportRegistry::new();
    let discovery = StaticTransportDiscovery::new(vec![NullDriver::arc("as4")]);
    registry.reinitialize(&discovery).unwrap();

    let driver = registry.get_configured(&TransportId::new("as4")).unwrap();
    assert_eq!(driver.id().as_str(), "as4");

    let err = registry.get_configured(&TransportId::new("missing")).unwrap_err();
    assert!(
        matches!(err, RegistryError::UnknownConfiguredTransport(id) if id.as_str() == "missing")
    );
}

#[test]
fn configured_lookup_fails_before_first_initialization() {
    let registry = TransportRegistry::new();
    let err = registry.get_configured(&TransportId::new("as4")).unwrap_err();
    assert!(matches!(err, RegistryError::UnknownConfiguredTransport(_)));
}

#[test]
fn list_all_returns_a_detached_copy() {
    let registry = TransportRegistry::new();
    let discovery = StaticTransportDiscovery::new(vec![NullDriver::arc("as4")]);
    registry.reinitialize(&discovery).unwrap();

    let mut copy = registry.list_all();
    copy.clear();
    assert_eq!(registry.len(), 1);
}

// ============================================================================
// SECTION: Concurrency
// ============================================================================

#[test]
fn readers_always_observe_a_consistent_snapshot() {
    let registry = Arc::new(TransportRegistry::new());
    let one = StaticTransportDiscovery::new(vec![NullDriver::arc("as4")]);
    let two =
        StaticTransportDiscovery::new(vec![NullDriver::arc("as4"), NullDriver::arc("rest")]);
    registry.reinitialize(&one).unwrap();

    let writer = {
        let registry = Arc::clone(&registry);
        thread::spawn(move || {
            for round in 0..200 {
                if round % 2 == 0 {
                    registry.reinitialize(&two).unwrap();
                } else {
                    registry.reinitialize(&one).unwrap();
                }
            }
        })
    };

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let registry = Arc::clone(&registry);
            thread::spawn(move || {
                for _ in 0..500 {
                    let snapshot = registry.list_all();
                    // Either mapping generation, never a partial one.
                    assert!(snapshot.len() == 1 || snapshot.len() == 2);
                    assert!(snapshot.contains_key(&TransportId::new("as4")));
                }
            })
        })
        .collect();

    writer.join().unwrap();
    for reader in readers {
        reader.join().unwrap();
    }
}
