//! # Error Types
//!
//! All error types for the record registry and its in-memory host.

use crate::adapters::ledger::ProgramId;
use crate::domain::value_objects::{Identity, RecordKey, Timestamp};
use thiserror::Error;

// =============================================================================
// REGISTRY ERRORS
// =============================================================================

/// Reasons a call is rejected. Every variant aborts the call with no effects.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// Wrong argument count, unknown operation or malformed argument.
    #[error("precondition failure: {0}")]
    PreconditionFailure(String),

    /// The operation requires a record that is absent.
    #[error("record not found: {key}")]
    NotFound {
        /// Missing key.
        key: RecordKey,
    },

    /// Creation of a record that already exists.
    #[error("record already exists: {key}")]
    AlreadyExists {
        /// Existing key.
        key: RecordKey,
    },

    /// The caller fails the operation's policy.
    #[error("unauthorized: {caller} may not call {operation}")]
    Unauthorized {
        /// Rejected caller.
        caller: Identity,
        /// Operation name.
        operation: &'static str,
    },

    /// A write exceeds the per-call resource budget.
    #[error("budget exceeded: {what} is {size} bytes, limit {max}")]
    BudgetExceeded {
        /// What was measured.
        what: &'static str,
        /// Measured size.
        size: usize,
        /// Configured limit.
        max: usize,
    },

    /// A stored value failed to decode.
    #[error("corrupt record at {key}: {source}")]
    CorruptRecord {
        /// Key holding the value.
        key: RecordKey,
        /// Decoding failure.
        source: CodecError,
    },
}

impl RegistryError {
    /// Shorthand for [`RegistryError::PreconditionFailure`].
    pub fn precondition(reason: impl Into<String>) -> Self {
        Self::PreconditionFailure(reason.into())
    }

    /// Stable snake-case label, used for logs and metrics.
    #[must_use]
    pub fn reason(&self) -> &'static str {
        match self {
            Self::PreconditionFailure(_) => "precondition_failure",
            Self::NotFound { .. } => "not_found",
            Self::AlreadyExists { .. } => "already_exists",
            Self::Unauthorized { .. } => "unauthorized",
            Self::BudgetExceeded { .. } => "budget_exceeded",
            Self::CorruptRecord { .. } => "corrupt_record",
        }
    }
}

// =============================================================================
// STORE ERRORS
// =============================================================================

/// Errors from the record store port.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// `get` or `delete` of an absent key.
    #[error("key not found: {key}")]
    NotFound {
        /// Missing key.
        key: RecordKey,
    },

    /// `put` exceeds the store's size budget.
    #[error("{what} too large: {size} > {max} bytes")]
    BudgetExceeded {
        /// `"key"` or `"value"`.
        what: &'static str,
        /// Offending size.
        size: usize,
        /// Configured limit.
        max: usize,
    },
}

impl From<StoreError> for RegistryError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { key } => RegistryError::NotFound { key },
            StoreError::BudgetExceeded { what, size, max } => {
                RegistryError::BudgetExceeded { what, size, max }
            }
        }
    }
}

// =============================================================================
// CODEC ERRORS
// =============================================================================

/// Errors from record framing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// Framing runs past the end of the value.
    #[error("truncated value at offset {offset}")]
    Truncated {
        /// Offset of the incomplete prefix or field.
        offset: usize,
    },

    /// Value holds a different number of fields than the schema.
    #[error("field count mismatch: expected {expected}, got {actual}")]
    FieldCountMismatch {
        /// Schema field count.
        expected: usize,
        /// Decoded field count.
        actual: usize,
    },

    /// Field too large for its length prefix.
    #[error("field {index} too large: {len} > {max} bytes")]
    FieldTooLarge {
        /// Field position.
        index: usize,
        /// Field length.
        len: usize,
        /// Prefix limit.
        max: usize,
    },

    /// Timestamp field is not 8 bytes.
    #[error("field {index} is not a timestamp: {len} bytes")]
    InvalidTimestamp {
        /// Field position.
        index: usize,
        /// Field length.
        len: usize,
    },
}

// =============================================================================
// LEDGER ERRORS
// =============================================================================

/// Errors from the in-memory ledger host.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// No program with this id was ever deployed.
    #[error("unknown program: {0}")]
    UnknownProgram(ProgramId),

    /// The program was deleted by its admin.
    #[error("program {0} has been deleted")]
    ProgramDeleted(ProgramId),

    /// The host clock may not move backwards.
    #[error("clock regression: current {current}, requested {requested}")]
    ClockRegression {
        /// Current ledger time.
        current: Timestamp,
        /// Rejected time.
        requested: Timestamp,
    },

    /// The program rejected the call; nothing was committed.
    #[error("call rejected: {0}")]
    Rejected(#[from] RegistryError),

    /// Applying committed changes failed.
    #[error("commit failed: {0}")]
    Commit(#[from] StoreError),
}

impl LedgerError {
    /// The program's rejection, if that is what this error is.
    #[must_use]
    pub fn as_rejection(&self) -> Option<&RegistryError> {
        match self {
            Self::Rejected(err) => Some(err),
            _ => None,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
