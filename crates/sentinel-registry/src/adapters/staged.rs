//! # Staged Store Adapter
//!
//! Call-scoped write overlay. Reads fall through to the committed store;
//! puts and deletes are buffered and only reach the committed store through
//! [`StagedChanges::apply_to`] after the call succeeds. Dropping the overlay
//! is the rollback.

use crate::adapters::memory_store::{check_budget, InMemoryBoxStore};
use crate::domain::entities::ResourceLimits;
use crate::domain::value_objects::RecordKey;
use crate::errors::StoreError;
use crate::ports::outbound::RecordStore;
use std::collections::BTreeMap;

/// Pending write for one key. `None` is a staged delete.
type Pending = Option<Vec<u8>>;

/// Overlay over a committed store.
#[derive(Debug)]
pub struct StagedStore<'a> {
    base: &'a InMemoryBoxStore,
    limits: &'a ResourceLimits,
    pending: BTreeMap<RecordKey, Pending>,
}

impl<'a> StagedStore<'a> {
    /// Opens an empty overlay over `base`.
    #[must_use]
    pub fn new(base: &'a InMemoryBoxStore, limits: &'a ResourceLimits) -> Self {
        Self {
            base,
            limits,
            pending: BTreeMap::new(),
        }
    }

    /// Number of keys touched so far.
    #[must_use]
    pub fn touched(&self) -> usize {
        self.pending.len()
    }

    /// Closes the overlay, keeping its buffered writes.
    #[must_use]
    pub fn into_changes(self) -> StagedChanges {
        StagedChanges {
            pending: self.pending,
        }
    }

    fn lookup(&self, key: &RecordKey) -> Option<&[u8]> {
        match self.pending.get(key) {
            Some(Some(value)) => Some(value),
            Some(None) => None,
            None => self.base.peek(key),
        }
    }
}

impl RecordStore for StagedStore<'_> {
    fn exists(&self, key: &RecordKey) -> bool {
        self.lookup(key).is_some()
    }

    fn get(&self, key: &RecordKey) -> Result<Vec<u8>, StoreError> {
        self.lookup(key)
            .map(<[u8]>::to_vec)
            .ok_or_else(|| StoreError::NotFound { key: key.clone() })
    }

    fn put(&mut self, key: &RecordKey, value: Vec<u8>) -> Result<(), StoreError> {
        check_budget(self.limits, key, &value)?;
        self.pending.insert(key.clone(), Some(value));
        Ok(())
    }

    fn delete(&mut self, key: &RecordKey) -> Result<(), StoreError> {
        if !self.exists(key) {
            return Err(StoreError::NotFound { key: key.clone() });
        }
        self.pending.insert(key.clone(), None);
        Ok(())
    }
}

/// Writes buffered by a successful call, ready to commit.
#[derive(Debug, Default)]
pub struct StagedChanges {
    pending: BTreeMap<RecordKey, Pending>,
}

impl StagedChanges {
    /// Returns true if the call wrote nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Number of keys written or deleted.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Applies every buffered write to `store`, in key order.
    ///
    /// # Errors
    ///
    /// Propagates store failures. Buffered deletes always target keys that
    /// were present when staged, so a failure here means the committed store
    /// changed underneath the call.
    pub fn apply_to(self, store: &mut InMemoryBoxStore) -> Result<(), StoreError> {
        for (key, value) in self.pending {
            match value {
                Some(value) => store.put(&key, value)?,
                None => store.delete(&key)?,
            }
        }
        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================
