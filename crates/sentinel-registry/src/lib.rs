//! # Sentinel Registry - Keyed Record Programs for a Deterministic Ledger VM
//!
//! ## Purpose
//!
//! A transaction-scoped record store with per-family authorization and
//! hash-based verification. Three record families (evidence, incidents,
//! profiles) are each deployed as their own program and share one engine:
//! existence-gated create/read/update/delete, ownership checks, a one-time
//! admin bootstrap and verbatim hash comparison.
//!
//! ## Guarantees
//!
//! | Guarantee | Enforcement Location |
//! |-----------|---------------------|
//! | Exactly-once creation | `handlers/mod.rs` - `Execution::insert()` |
//! | Policy checked before any write | `handlers/mod.rs` - `Execution::authorize()` |
//! | All-or-nothing calls | `adapters/ledger.rs` - `InMemoryLedger::call()` |
//! | Admin fixed at bootstrap | `service.rs` - `RegistryService::dispatch()` |
//! | Loud decode failures | `domain/codec.rs` - `decode_fields()` |
//!
//! ## Operations
//!
//! | Family | Operations |
//! |--------|-----------|
//! | evidence | `submit_evidence`, `verify_evidence`, `read_evidence`, `revoke_evidence` |
//! | incident | `trigger_incident`, `update_incident_status`, `read_incident` |
//! | profile | `register_profile`, `update_profile`, `read_profile`, `revoke_profile` |
//!
//! ## Resource Limits
//!
//! | Limit | Default |
//! |-------|---------|
//! | `max_key_len` | 64 bytes |
//! | `max_value_len` | 32 KiB |
//! | `max_args` | 16 |
//! | `max_args_total_len` | 2 KiB |
//!
//! ## Usage Example
//!
//! ```
//! use sentinel_registry::prelude::*;
//!
//! let mut ledger = InMemoryLedger::new(ServiceConfig::default());
//! let admin = Identity::from("admin");
//! let evidence = ledger.deploy(Family::Evidence, &admin).unwrap();
//!
//! let hash = content_hash_hex(b"photo bytes");
//! ledger
//!     .call(
//!         evidence,
//!         &Identity::from("reporter"),
//!         &Invocation::call("submit_evidence", &["E1", "cid123", hash.as_str()]),
//!     )
//!     .unwrap();
//!
//! let receipt = ledger
//!     .call(
//!         evidence,
//!         &Identity::from("auditor"),
//!         &Invocation::call("verify_evidence", &["E1", hash.as_str()]),
//!     )
//!     .unwrap();
//! assert_eq!(receipt.outcome, CallOutcome::Verified(true));
//! ```

// Crate-level lints
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

// =============================================================================
// MODULES
// =============================================================================

pub mod adapters;
pub mod domain;
pub mod errors;
pub mod events;
pub mod handlers;
pub mod ports;
pub mod service;

// =============================================================================
// PRELUDE
// =============================================================================

/// Convenient re-exports for common usage.
pub mod prelude {
    // Domain entities
    pub use crate::domain::entities::{
        CallContext, CallOutcome, Invocation, OnCompletion, ProgramState, ResourceLimits,
    };

    // Value objects
    pub use crate::domain::value_objects::{Family, Identity, RecordKey, Timestamp};

    // Records
    pub use crate::domain::records::{
        EvidenceRecord, IncidentRecord, IncidentStatus, ProfileRecord, Record, StoredRecord,
    };

    // Dispatch metadata and policy
    pub use crate::domain::operations::{Arity, Operation, OperationSpec, OPERATIONS};
    pub use crate::domain::policy::{authorize, Policy, PolicyKind};

    // Domain services
    pub use crate::domain::services::{content_hash_hex, hashes_match};

    // Ports
    pub use crate::ports::inbound::ProgramApi;
    pub use crate::ports::outbound::{Clock, EventSink, RecordStore};

    // Events
    pub use crate::events::RegistryEvent;

    // Errors
    pub use crate::errors::{CodecError, LedgerError, RegistryError, StoreError};

    // Adapters
    pub use crate::adapters::{
        CallReceipt, EventBuffer, InMemoryBoxStore, InMemoryLedger, LedgerEvent, LedgerStats,
        ManualClock, ProgramId, StagedStore, TxId,
    };

    // Service
    pub use crate::service::{RegistryService, ServiceConfig};
}

// =============================================================================
// CRATE INFO
// =============================================================================

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name.
pub const CRATE_NAME: &str = "sentinel-registry";

// =============================================================================
// TESTS
// =============================================================================
