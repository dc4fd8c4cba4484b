//! # In-Memory Ledger Host
//!
//! Simulates the host side of the execution environment: it deploys programs,
//! owns their committed state and boxes, supplies caller identity and time,
//! and makes every call atomic.
//!
//! ## Call Lifecycle
//!
//! 1. The call context is built from the caller and the ledger clock.
//! 2. The program runs against a copy of its state, a [`StagedStore`] overlay
//!    and a fresh [`EventBuffer`].
//! 3. On `Ok` the staged writes, state and events are committed together.
//!    On `Err` all three are dropped.

use crate::adapters::clock::ManualClock;
use crate::adapters::event_buffer::EventBuffer;
use crate::adapters::memory_store::InMemoryBoxStore;
use crate::adapters::staged::StagedStore;
use crate::domain::entities::{CallContext, CallOutcome, Invocation, ProgramState, ResourceLimits};
use crate::domain::value_objects::{Family, Identity, RecordKey, Timestamp};
use crate::errors::LedgerError;
use crate::events::RegistryEvent;
use crate::ports::inbound::ProgramApi;
use crate::ports::outbound::Clock;
use crate::service::{RegistryService, ServiceConfig};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::fmt;
use tracing::{debug, info, instrument};

/// Ledger-assigned program identifier.
pub type ProgramId = u64;

// =============================================================================
// TRANSACTION ID
// =============================================================================

/// Deterministic transaction id.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TxId(pub [u8; 32]);

impl TxId {
    /// SHA-256 over the call sequence number, program, caller, timestamp,
    /// completion kind and arguments. Variable-length parts are
    /// length-prefixed so distinct calls never hash the same input.
    #[must_use]
    pub fn compute(
        sequence: u64,
        program: ProgramId,
        ctx: &CallContext,
        invocation: &Invocation,
    ) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(sequence.to_be_bytes());
        hasher.update(program.to_be_bytes());
        update_prefixed(&mut hasher, ctx.caller.as_bytes());
        hasher.update(ctx.timestamp.to_be_bytes());
        hasher.update([invocation.on_completion.tag()]);
        hasher.update((invocation.args.len() as u64).to_be_bytes());
        for arg in &invocation.args {
            update_prefixed(&mut hasher, arg);
        }
        Self(hasher.finalize().into())
    }

    /// Lowercase hex form.
    #[must_use]
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

fn update_prefixed(hasher: &mut Sha256, bytes: &[u8]) {
    hasher.update((bytes.len() as u64).to_be_bytes());
    hasher.update(bytes);
}

impl fmt::Debug for TxId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TxId({})", self.to_hex())
    }
}

impl fmt::Display for TxId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

// =============================================================================
// RECEIPTS AND LOG
// =============================================================================

/// Result of a committed call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CallReceipt {
    /// Transaction id.
    pub txid: TxId,
    /// Program that was called.
    pub program: ProgramId,
    /// Program outcome.
    pub outcome: CallOutcome,
    /// Events the call emitted, in order.
    pub events: Vec<RegistryEvent>,
}

/// One committed event in the ledger log.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LedgerEvent {
    /// Emitting program.
    pub program: ProgramId,
    /// Emitting transaction.
    pub txid: TxId,
    /// The event.
    pub event: RegistryEvent,
}

impl fmt::Display for LedgerEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[program {}] {}", self.program, self.event)
    }
}

/// Ledger counters.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LedgerStats {
    /// Programs deployed.
    pub programs_deployed: u64,
    /// Calls committed.
    pub calls_accepted: u64,
    /// Calls rolled back.
    pub calls_rejected: u64,
    /// Events committed.
    pub events_emitted: u64,
}

// =============================================================================
// LEDGER
// =============================================================================

#[derive(Debug)]
struct Program {
    state: ProgramState,
    boxes: InMemoryBoxStore,
    deleted: bool,
}

/// In-memory host ledger.
pub struct InMemoryLedger<P: ProgramApi = RegistryService> {
    api: P,
    limits: ResourceLimits,
    clock: ManualClock,
    programs: BTreeMap<ProgramId, Program>,
    next_program: ProgramId,
    sequence: u64,
    log: Vec<LedgerEvent>,
    stats: LedgerStats,
}

impl InMemoryLedger<RegistryService> {
    /// Ledger running the registry service.
    #[must_use]
    pub fn new(config: ServiceConfig) -> Self {
        let limits = config.limits.clone();
        Self::with_api(RegistryService::new(config), limits)
    }
}

impl Default for InMemoryLedger<RegistryService> {
    fn default() -> Self {
        Self::new(ServiceConfig::default())
    }
}

impl<P: ProgramApi> InMemoryLedger<P> {
    /// Ledger running `api`, storing boxes under `limits`.
    pub fn with_api(api: P, limits: ResourceLimits) -> Self {
        Self {
            api,
            limits,
            clock: ManualClock::default(),
            programs: BTreeMap::new(),
            next_program: 1,
            sequence: 0,
            log: Vec::new(),
            stats: LedgerStats::default(),
        }
    }

    /// Current ledger time.
    #[must_use]
    pub fn timestamp(&self) -> Timestamp {
        self.clock.now()
    }

    /// Moves the ledger clock to `to`.
    ///
    /// # Errors
    ///
    /// [`LedgerError::ClockRegression`] if `to` is in the past.
    pub fn set_timestamp(&mut self, to: Timestamp) -> Result<(), LedgerError> {
        self.clock.set(to)
    }

    /// Moves the ledger clock forward by `secs`.
    pub fn advance_clock(&mut self, secs: u64) {
        self.clock.advance(secs);
    }

    /// Deploys a `family` program and runs its creation call as `creator`,
    /// who becomes the program admin.
    ///
    /// # Errors
    ///
    /// Propagates a rejected creation call; the program is then removed.
    #[instrument(skip(self), fields(creator = %creator))]
    pub fn deploy(&mut self, family: Family, creator: &Identity) -> Result<ProgramId, LedgerError> {
        let id = self.next_program;
        self.next_program += 1;
        self.programs.insert(
            id,
            Program {
                state: ProgramState::new(family),
                boxes: InMemoryBoxStore::with_limits(self.limits.clone()),
                deleted: false,
            },
        );
        if let Err(err) = self.call(id, creator, &Invocation::create()) {
            self.programs.remove(&id);
            return Err(err);
        }
        self.stats.programs_deployed += 1;
        info!(program = id, %family, "Program deployed");
        Ok(id)
    }

    /// Runs one atomic call.
    ///
    /// # Errors
    ///
    /// [`LedgerError::UnknownProgram`] / [`LedgerError::ProgramDeleted`]
    /// before execution, [`LedgerError::Rejected`] if the program rejects the
    /// call. In every error case nothing is committed.
    #[instrument(skip(self, invocation), fields(caller = %caller))]
    pub fn call(
        &mut self,
        program: ProgramId,
        caller: &Identity,
        invocation: &Invocation,
    ) -> Result<CallReceipt, LedgerError> {
        let entry = self
            .programs
            .get_mut(&program)
            .ok_or(LedgerError::UnknownProgram(program))?;
        if entry.deleted {
            return Err(LedgerError::ProgramDeleted(program));
        }

        let ctx = CallContext::new(caller.clone(), self.clock.now());
        let txid = TxId::compute(self.sequence, program, &ctx, invocation);
        self.sequence += 1;

        let mut state = entry.state.clone();
        let mut buffer = EventBuffer::new();
        let (result, changes) = {
            let mut staged = StagedStore::new(&entry.boxes, &self.limits);
            let result = self
                .api
                .invoke(&mut state, &ctx, invocation, &mut staged, &mut buffer);
            (result, staged.into_changes())
        };

        let outcome = match result {
            Ok(outcome) => outcome,
            Err(err) => {
                self.stats.calls_rejected += 1;
                return Err(LedgerError::Rejected(err));
            }
        };

        let touched = changes.len();
        changes.apply_to(&mut entry.boxes)?;
        entry.state = state;
        if outcome == CallOutcome::ProgramDeleted {
            entry.deleted = true;
            info!(program, "Program deleted");
        }

        let events = buffer.into_events();
        self.log.extend(events.iter().map(|event| LedgerEvent {
            program,
            txid,
            event: event.clone(),
        }));
        self.stats.calls_accepted += 1;
        self.stats.events_emitted += events.len() as u64;
        debug!(%txid, touched, events = events.len(), "Call committed");

        Ok(CallReceipt {
            txid,
            program,
            outcome,
            events,
        })
    }

    /// Committed state of `program`.
    #[must_use]
    pub fn state(&self, program: ProgramId) -> Option<&ProgramState> {
        self.programs.get(&program).map(|p| &p.state)
    }

    /// Committed boxes of `program`.
    #[must_use]
    pub fn boxes(&self, program: ProgramId) -> Option<&InMemoryBoxStore> {
        self.programs.get(&program).map(|p| &p.boxes)
    }

    /// Committed raw value at `key` in `program`.
    #[must_use]
    pub fn raw_box(&self, program: ProgramId, key: &RecordKey) -> Option<&[u8]> {
        self.boxes(program).and_then(|boxes| boxes.peek(key))
    }

    /// Returns true if `program` was deleted by its admin.
    #[must_use]
    pub fn is_deleted(&self, program: ProgramId) -> bool {
        self.programs.get(&program).is_some_and(|p| p.deleted)
    }

    /// Every committed event, in commit order.
    #[must_use]
    pub fn events(&self) -> &[LedgerEvent] {
        &self.log
    }

    /// Committed events of one program.
    pub fn events_for(&self, program: ProgramId) -> impl Iterator<Item = &LedgerEvent> {
        self.log.iter().filter(move |e| e.program == program)
    }

    /// Ledger counters.
    #[must_use]
    pub fn stats(&self) -> &LedgerStats {
        &self.stats
    }

    /// The program API the ledger runs.
    #[must_use]
    pub fn api(&self) -> &P {
        &self.api
    }
}

// =============================================================================
// TESTS
// =============================================================================
