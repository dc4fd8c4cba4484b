//! # Record Handlers
//!
//! One function per operation, grouped by family. Every handler touches a
//! single record key and follows the same order of checks:
//!
//! 1. argument validation (`PreconditionFailure`)
//! 2. existence (`AlreadyExists` for creates, `NotFound` otherwise)
//! 3. authorization (`Unauthorized`)
//! 4. store mutation, then exactly one event
//!
//! Handlers write through the call-scoped store and event sink held by
//! [`Execution`]; the host discards both if any step fails.

pub mod evidence;
pub mod incident;
pub mod profile;

use crate::domain::entities::{CallContext, ResourceLimits};
use crate::domain::operations::OperationSpec;
use crate::domain::policy::authorize;
use crate::domain::records::Record;
use crate::domain::value_objects::{Family, Identity, RecordKey, Timestamp};
use crate::errors::{CodecError, RegistryError};
use crate::events::RegistryEvent;
use crate::ports::outbound::{EventSink, RecordStore};
use tracing::warn;

/// Everything a handler may touch during one call.
pub struct Execution<'a> {
    /// Caller and timestamp.
    pub ctx: &'a CallContext,
    /// Program admin.
    pub admin: &'a Identity,
    /// Operation being executed.
    pub spec: &'static OperationSpec,
    /// Key size budget.
    pub limits: &'a ResourceLimits,
    /// Call-scoped record store.
    pub store: &'a mut dyn RecordStore,
    /// Call-scoped event sink.
    pub events: &'a mut dyn EventSink,
    /// Program record counter.
    pub records_created: &'a mut u64,
}

impl Execution<'_> {
    /// Calling identity.
    #[must_use]
    pub fn caller(&self) -> &Identity {
        &self.ctx.caller
    }

    /// Call timestamp.
    #[must_use]
    pub fn now(&self) -> Timestamp {
        self.ctx.timestamp
    }

    /// Builds and validates the storage key for `id` in `family`.
    ///
    /// # Errors
    ///
    /// `PreconditionFailure` if `id` is empty or the key exceeds the key
    /// budget.
    pub fn key(&self, family: Family, id: &[u8]) -> Result<RecordKey, RegistryError> {
        if id.is_empty() {
            return Err(RegistryError::precondition(format!(
                "{}: {} identifier must not be empty",
                self.spec.name, family
            )));
        }
        let key = RecordKey::new(family, id);
        if key.len() > self.limits.max_key_len {
            return Err(RegistryError::precondition(format!(
                "{}: key is {} bytes, limit {}",
                self.spec.name,
                key.len(),
                self.limits.max_key_len
            )));
        }
        Ok(key)
    }

    /// Loads and decodes the record at `key`.
    ///
    /// # Errors
    ///
    /// `NotFound` if absent, `CorruptRecord` if the value does not decode.
    pub fn load<R: Record>(&self, key: &RecordKey) -> Result<R, RegistryError> {
        let value = self.store.get(key)?;
        R::decode(&value).map_err(|source| RegistryError::CorruptRecord {
            key: key.clone(),
            source,
        })
    }

    /// Creates the record at `key` and bumps the record counter.
    ///
    /// # Errors
    ///
    /// `AlreadyExists` if present, `BudgetExceeded` if the value is too large.
    pub fn insert<R: Record>(&mut self, key: &RecordKey, record: &R) -> Result<(), RegistryError> {
        if self.store.exists(key) {
            return Err(RegistryError::AlreadyExists { key: key.clone() });
        }
        self.write(key, record)?;
        *self.records_created = self.records_created.saturating_add(1);
        Ok(())
    }

    /// Overwrites the record at `key`.
    ///
    /// # Errors
    ///
    /// `BudgetExceeded` if the value is too large.
    pub fn replace<R: Record>(&mut self, key: &RecordKey, record: &R) -> Result<(), RegistryError> {
        self.write(key, record)
    }

    /// Deletes the record at `key`.
    ///
    /// # Errors
    ///
    /// `NotFound` if absent.
    pub fn remove(&mut self, key: &RecordKey) -> Result<(), RegistryError> {
        Ok(self.store.delete(key)?)
    }

    /// Checks the operation's policy against `owner`.
    ///
    /// # Errors
    ///
    /// `Unauthorized` if the caller fails the policy.
    pub fn authorize(&self, owner: &Identity) -> Result<(), RegistryError> {
        let policy = self.spec.policy.bind(owner);
        if authorize(self.caller(), self.admin, &policy) {
            return Ok(());
        }
        warn!(
            caller = %self.caller(),
            operation = self.spec.name,
            policy = %self.spec.policy,
            "Caller failed operation policy"
        );
        Err(RegistryError::Unauthorized {
            caller: self.caller().clone(),
            operation: self.spec.name,
        })
    }

    /// Error for an argument list the handler cannot destructure.
    #[must_use]
    pub fn arity_mismatch(&self) -> RegistryError {
        RegistryError::precondition(format!(
            "{} expects {} arguments",
            self.spec.name, self.spec.arity
        ))
    }

    /// Appends the call's event.
    pub fn emit(&mut self, event: RegistryEvent) {
        self.events.emit(event);
    }

    fn write<R: Record>(&mut self, key: &RecordKey, record: &R) -> Result<(), RegistryError> {
        let value = record.encode().map_err(|err| match err {
            CodecError::FieldTooLarge { len, max, .. } => RegistryError::BudgetExceeded {
                what: "field",
                size: len,
                max,
            },
            source => RegistryError::CorruptRecord {
                key: key.clone(),
                source,
            },
        })?;
        self.store.put(key, value)?;
        Ok(())
    }
}

/// Rejects an empty required argument.
pub(crate) fn non_empty<'a>(
    spec: &OperationSpec,
    name: &str,
    value: &'a [u8],
) -> Result<&'a [u8], RegistryError> {
    if value.is_empty() {
        return Err(RegistryError::precondition(format!(
            "{}: {name} must not be empty",
            spec.name
        )));
    }
    Ok(value)
}

// =============================================================================
// TEST HARNESS
// =============================================================================
