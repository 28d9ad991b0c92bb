// crates/docbridge-core/src/runtime/registry.rs
// ============================================================================
// Module: Docbridge Transport Registry
// Description: Concurrency-safe catalogue of named transport implementations.
// Purpose: Resolve the configured transport implementation for dispatch.
// Dependencies: crate::interfaces, thiserror
// ============================================================================

//! ## Overview
//! [`TransportRegistry`] is the only shared mutable state in the connector
//! core. The implementation mapping is an `Arc<BTreeMap>` snapshot behind an
//! `RwLock`: readers clone the `Arc` and work on a consistent snapshot;
//! `reinitialize` builds a complete replacement map outside the lock and
//! swaps the reference while holding the write lock for the swap only. A
//! failed reinitialization leaves the previous mapping untouched.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::PoisonError;
use std::sync::RwLock;

use thiserror::Error;

use crate::core::identifiers::TransportId;
use crate::interfaces::TransportDiscovery;
use crate::interfaces::TransportDiscoveryError;
use crate::interfaces::TransportDriver;

// ============================================================================
// SECTION: Registry Errors
// ============================================================================

/// Errors produced by registry initialization and configured lookup.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// Two discovered implementations declared the same ID.
    #[error("duplicate transport implementation id: {0}")]
    DuplicateTransport(TransportId),
    /// Discovery returned zero implementations.
    #[error("no transport implementations discovered")]
    NoTransports,
    /// The configured implementation ID did not resolve.
    #[error("configured transport implementation is not registered: {0}")]
    UnknownConfiguredTransport(TransportId),
    /// The discovery scan itself failed.
    #[error(transparent)]
    Discovery(#[from] TransportDiscoveryError),
}

// ============================================================================
// SECTION: Transport Registry
// ============================================================================

/// Shorthand for the published implementation mapping snapshot.
type DriverMap = BTreeMap<TransportId, Arc<dyn TransportDriver>>;

/// Concurrency-safe catalogue of transport implementations.
///
/// # Invariants
/// - The published mapping is never observed partially updated.
/// - Implementation IDs are unique within one published mapping.
/// - A failed `reinitialize` leaves the previous mapping queryable.
pub struct TransportRegistry {
    /// Published mapping snapshot; swapped atomically, never mutated in place.
    drivers: RwLock<Arc<DriverMap>>,
}

impl TransportRegistry {
    /// Creates a registry with an empty mapping.
    ///
    /// The registry is unusable for dispatch until `reinitialize` succeeds.
    #[must_use]
    pub fn new() -> Self {
        Self {
            drivers: RwLock::new(Arc::new(BTreeMap::new())),
        }
    }

    /// Returns the current mapping snapshot.
    ///
    /// Snapshots are always fully built before publication, so recovering
    /// from a poisoned lock still yields a consistent mapping.
    fn snapshot(&self) -> Arc<DriverMap> {
        Arc::clone(
            &self
                .drivers
                .read()
                .unwrap_or_else(PoisonError::into_inner),
        )
    }

    /// Discovers implementations and atomically replaces the mapping.
    ///
    /// The discovery scan and map construction happen before the write lock
    /// is taken; the lock is held only for the reference swap.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Discovery`] when the scan fails,
    /// [`RegistryError::NoTransports`] when zero implementations were found,
    /// and [`RegistryError::DuplicateTransport`] when two implementations
    /// declare the same ID. In every error case the previously published
    /// mapping remains in place.
    pub fn reinitialize(&self, discovery: &dyn TransportDiscovery) -> Result<(), RegistryError> {
        let discovered = discovery.discover()?;
        if discovered.is_empty() {
            return Err(RegistryError::NoTransports);
        }
        let mut next: DriverMap = BTreeMap::new();
        for driver in discovered {
            let id = driver.id();
            if next.contains_key(&id) {
                return Err(RegistryError::DuplicateTransport(id));
            }
            next.insert(id, driver);
        }
        let next = Arc::new(next);
        let mut guard = self.drivers.write().unwrap_or_else(PoisonError::into_inner);
        *guard = next;
        Ok(())
    }

    /// Returns the implementation registered under `id`, if any.
    #[must_use]
    pub fn get_by_id(&self, id: &TransportId) -> Option<Arc<dyn TransportDriver>> {
        self.snapshot().get(id).cloned()
    }

    /// Resolves the configured implementation ID.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::UnknownConfiguredTransport`] when the ID is
    /// not present in the current mapping, including the never-initialized
    /// empty mapping.
    pub fn get_configured(
        &self,
        configured: &TransportId,
    ) -> Result<Arc<dyn TransportDriver>, RegistryError> {
        self.get_by_id(configured)
            .ok_or_else(|| RegistryError::UnknownConfiguredTransport(configured.clone()))
    }

    /// Returns an owned copy of the current mapping.
    ///
    /// Callers cannot corrupt registry state through the returned value.
    #[must_use]
    pub fn list_all(&self) -> DriverMap {
        self.snapshot().as_ref().clone()
    }

    /// Returns the number of registered implementations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshot().len()
    }

    /// Returns true when no implementation is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshot().is_empty()
    }
}

impl Default for TransportRegistry {
    fn default() -> Self {
        Self::new()
    }
}
