//! # Core Domain Entities
//!
//! Call inputs, per-program state, resource limits and call outcomes.

use crate::domain::records::StoredRecord;
use crate::domain::value_objects::{Family, Identity, RecordKey, Timestamp};
use serde::{Deserialize, Serialize};

// =============================================================================
// CALL CONTEXT
// =============================================================================

/// Host-supplied context for one call.
///
/// The core never reads a clock or an ambient identity; both arrive here.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CallContext {
    /// Identity that signed the call.
    pub caller: Identity,
    /// Host timestamp for the call.
    pub timestamp: Timestamp,
}

impl CallContext {
    /// Creates a call context.
    #[must_use]
    pub fn new(caller: Identity, timestamp: Timestamp) -> Self {
        Self { caller, timestamp }
    }
}

// =============================================================================
// INVOCATION
// =============================================================================

/// How a call relates to the program's lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OnCompletion {
    /// Ordinary operation call; the first argument names the operation.
    #[default]
    NoOp,
    /// Account opt-in. Not supported by any family.
    OptIn,
    /// Account close-out. Not supported by any family.
    CloseOut,
    /// Clear local state. Always accepted.
    ClearState,
    /// Replace the program. Admin only.
    UpdateApplication,
    /// Destroy the program. Admin only.
    DeleteApplication,
}

impl OnCompletion {
    /// Stable single-byte tag, used when hashing calls.
    #[must_use]
    pub const fn tag(&self) -> u8 {
        match self {
            Self::NoOp => 0,
            Self::OptIn => 1,
            Self::CloseOut => 2,
            Self::ClearState => 3,
            Self::UpdateApplication => 4,
            Self::DeleteApplication => 5,
        }
    }
}

/// One program invocation: completion kind plus ordered byte arguments.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Invocation {
    /// Lifecycle relation of the call.
    pub on_completion: OnCompletion,
    /// Ordered arguments; for `NoOp` the first is the operation name.
    pub args: Vec<Vec<u8>>,
}

impl Invocation {
    /// A `NoOp` call of `operation` with `args`.
    #[must_use]
    pub fn call<A: AsRef<[u8]>>(operation: &str, args: &[A]) -> Self {
        let mut all = Vec::with_capacity(args.len() + 1);
        all.push(operation.as_bytes().to_vec());
        all.extend(args.iter().map(|a| a.as_ref().to_vec()));
        Self {
            on_completion: OnCompletion::NoOp,
            args: all,
        }
    }

    /// An argument-less call with the given completion kind.
    #[must_use]
    pub fn lifecycle(on_completion: OnCompletion) -> Self {
        Self {
            on_completion,
            args: Vec::new(),
        }
    }

    /// The program creation call (no arguments).
    #[must_use]
    pub fn create() -> Self {
        Self::lifecycle(OnCompletion::NoOp)
    }
}

// =============================================================================
// PROGRAM STATE
// =============================================================================

/// Global state of one deployed program.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProgramState {
    /// Record family the program manages.
    pub family: Family,
    /// Admin captured on the first call; never changes afterwards.
    pub admin: Option<Identity>,
    /// Records created over the program's lifetime.
    pub records_created: u64,
}

impl ProgramState {
    /// State of a program that has not been called yet.
    #[must_use]
    pub fn new(family: Family) -> Self {
        Self {
            family,
            admin: None,
            records_created: 0,
        }
    }

    /// Returns true once the bootstrap call has run.
    #[must_use]
    pub fn is_bootstrapped(&self) -> bool {
        self.admin.is_some()
    }
}

// =============================================================================
// RESOURCE LIMITS
// =============================================================================

/// Per-call resource budget enforced by the dispatcher and the store.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceLimits {
    /// Maximum storage key length.
    pub max_key_len: usize,
    /// Maximum stored value length.
    pub max_value_len: usize,
    /// Maximum number of call arguments (including the operation name).
    pub max_args: usize,
    /// Maximum combined length of all call arguments.
    pub max_args_total_len: usize,
}

impl ResourceLimits {
    /// Default maximum key length.
    pub const DEFAULT_MAX_KEY_LEN: usize = 64;
    /// Default maximum value length.
    pub const DEFAULT_MAX_VALUE_LEN: usize = 32_768;
    /// Default maximum argument count.
    pub const DEFAULT_MAX_ARGS: usize = 16;
    /// Default maximum combined argument length.
    pub const DEFAULT_MAX_ARGS_TOTAL_LEN: usize = 2_048;
}

impl Default for ResourceLimits {
    fn default() -> Self {
        Self {
            max_key_len: Self::DEFAULT_MAX_KEY_LEN,
            max_value_len: Self::DEFAULT_MAX_VALUE_LEN,
            max_args: Self::DEFAULT_MAX_ARGS,
            max_args_total_len: Self::DEFAULT_MAX_ARGS_TOTAL_LEN,
        }
    }
}

// =============================================================================
// CALL OUTCOME
// =============================================================================

/// Result of an accepted call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CallOutcome {
    /// First call: the caller became admin.
    Bootstrapped {
        /// The new admin.
        admin: Identity,
    },
    /// A record was created.
    Created {
        /// Key of the new record.
        key: RecordKey,
    },
    /// A record was updated in place.
    Updated {
        /// Key of the updated record.
        key: RecordKey,
    },
    /// A record was deleted.
    Revoked {
        /// Key of the deleted record.
        key: RecordKey,
    },
    /// A record was read.
    Read(StoredRecord),
    /// Evidence verification result.
    Verified(bool),
    /// Admin accepted a program update.
    ProgramUpdated,
    /// Admin accepted program deletion.
    ProgramDeleted,
    /// Clear-state call accepted.
    StateCleared,
}

// =============================================================================
// TESTS
// =============================================================================
