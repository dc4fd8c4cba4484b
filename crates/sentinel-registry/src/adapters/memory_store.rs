//! # Box Store Adapter
//!
//! Committed, in-memory record storage for one program. Keys are ordered so
//! that iteration (and therefore any state dump) is deterministic.

use crate::domain::entities::ResourceLimits;
use crate::domain::value_objects::RecordKey;
use crate::errors::StoreError;
use crate::ports::outbound::RecordStore;
use std::collections::BTreeMap;

/// Checks a key/value pair against the size budget.
pub(crate) fn check_budget(
    limits: &ResourceLimits,
    key: &RecordKey,
    value: &[u8],
) -> Result<(), StoreError> {
    if key.len() > limits.max_key_len {
        return Err(StoreError::BudgetExceeded {
            what: "key",
            size: key.len(),
            max: limits.max_key_len,
        });
    }
    if value.len() > limits.max_value_len {
        return Err(StoreError::BudgetExceeded {
            what: "value",
            size: value.len(),
            max: limits.max_value_len,
        });
    }
    Ok(())
}

/// In-memory box storage.
#[derive(Clone, Debug, Default)]
pub struct InMemoryBoxStore {
    boxes: BTreeMap<RecordKey, Vec<u8>>,
    limits: ResourceLimits,
}

impl InMemoryBoxStore {
    /// Create an empty store with default limits.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store with the given limits.
    #[must_use]
    pub fn with_limits(limits: ResourceLimits) -> Self {
        Self {
            boxes: BTreeMap::new(),
            limits,
        }
    }

    /// Number of stored boxes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    /// Returns true if nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }

    /// Raw value at `key`, without copying.
    #[must_use]
    pub fn peek(&self, key: &RecordKey) -> Option<&[u8]> {
        self.boxes.get(key).map(Vec::as_slice)
    }

    /// All boxes in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&RecordKey, &[u8])> {
        self.boxes.iter().map(|(k, v)| (k, v.as_slice()))
    }

    /// Limits enforced by `put`.
    #[must_use]
    pub fn limits(&self) -> &ResourceLimits {
        &self.limits
    }
}

impl RecordStore for InMemoryBoxStore {
    fn exists(&self, key: &RecordKey) -> bool {
        self.boxes.contains_key(key)
    }

    fn get(&self, key: &RecordKey) -> Result<Vec<u8>, StoreError> {
        self.boxes
            .get(key)
            .cloned()
            .ok_or_else(|| StoreError::NotFound { key: key.clone() })
    }

    fn put(&mut self, key: &RecordKey, value: Vec<u8>) -> Result<(), StoreError> {
        check_budget(&self.limits, key, &value)?;
        self.boxes.insert(key.clone(), value);
        Ok(())
    }

    fn delete(&mut self, key: &RecordKey) -> Result<(), StoreError> {
        self.boxes
            .remove(key)
            .map(|_| ())
            .ok_or_else(|| StoreError::NotFound { key: key.clone() })
    }
}

// =============================================================================
// TESTS
// =============================================================================
