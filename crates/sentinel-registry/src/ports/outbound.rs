//! # Driven Ports (SPI - Outbound)
//!
//! Interfaces the registry depends on. The host ledger implements them with
//! call-scoped staging, so nothing written here is visible outside the call
//! until the call commits.

use crate::domain::value_objects::{RecordKey, Timestamp};
use crate::errors::StoreError;
use crate::events::RegistryEvent;

// =============================================================================
// RECORD STORE
// =============================================================================

/// Keyed byte storage (one "box" per key).
///
/// All methods are synchronous and touch exactly one key.
pub trait RecordStore {
    /// Returns true if `key` holds a value.
    fn exists(&self, key: &RecordKey) -> bool;

    /// Returns the value at `key`.
    ///
    /// # Errors
    ///
    /// [`StoreError::NotFound`] if the key is absent.
    fn get(&self, key: &RecordKey) -> Result<Vec<u8>, StoreError>;

    /// Creates or overwrites the value at `key`.
    ///
    /// # Errors
    ///
    /// [`StoreError::BudgetExceeded`] if the key or value is over budget.
    fn put(&mut self, key: &RecordKey, value: Vec<u8>) -> Result<(), StoreError>;

    /// Removes `key`.
    ///
    /// # Errors
    ///
    /// [`StoreError::NotFound`] if the key is absent.
    fn delete(&mut self, key: &RecordKey) -> Result<(), StoreError>;
}

// =============================================================================
// EVENT SINK
// =============================================================================

/// Append-only destination for program events.
///
/// The program can only append; it never reads events back.
pub trait EventSink {
    /// Appends one event.
    fn emit(&mut self, event: RegistryEvent);
}

// =============================================================================
// CLOCK
// =============================================================================

/// Host time source.
///
/// Only the host reads it, to build the call context; handlers see the
/// resulting timestamp and never the clock itself.
pub trait Clock {
    /// Current ledger time.
    fn now(&self) -> Timestamp;
}
