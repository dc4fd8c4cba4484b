//! # Script Runner
//!
//! Replays a [`Script`] against an [`InMemoryLedger`], prints every
//! committed event and every rejection, records metrics and checks each
//! call's expected outcome.

use std::collections::HashMap;
use std::io::Write;

use anyhow::{anyhow, bail, Context, Result};
use sentinel_registry::prelude::*;
use sentinel_telemetry::{record_call_accepted, record_call_rejected, record_event};
use tracing::{debug, info, instrument};

use crate::script::{build_invocation, Script, Step};

/// Expectation value that matches any outcome.
pub const EXPECT_ANY: &str = "any";

/// Expectation value for an accepted call.
pub const EXPECT_OK: &str = "ok";

/// Totals for one script run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Programs deployed.
    pub deployed: usize,
    /// Calls executed.
    pub calls: usize,
    /// Calls committed.
    pub accepted: usize,
    /// Calls rejected.
    pub rejected: usize,
    /// Events committed.
    pub events: usize,
}

/// Drives one ledger through a script.
pub struct Runner {
    ledger: InMemoryLedger,
    programs: HashMap<String, ProgramId>,
    summary: RunSummary,
}

impl Runner {
    /// Create a runner over a fresh ledger.
    #[must_use]
    pub fn new(config: ServiceConfig) -> Self {
        Self {
            ledger: InMemoryLedger::new(config),
            programs: HashMap::new(),
            summary: RunSummary::default(),
        }
    }

    /// The underlying ledger.
    #[must_use]
    pub fn ledger(&self) -> &InMemoryLedger {
        &self.ledger
    }

    /// Program bound to a script name.
    #[must_use]
    pub fn program(&self, name: &str) -> Option<ProgramId> {
        self.programs.get(name).copied()
    }

    /// Run every step of `script`, writing one line per event or rejection
    /// to `out`. Stops at the first step whose outcome contradicts its
    /// expectation.
    #[instrument(skip_all, fields(steps = script.steps.len()))]
    pub fn run(&mut self, script: &Script, out: &mut impl Write) -> Result<RunSummary> {
        self.ledger
            .set_timestamp(Timestamp::from_secs(script.start_time))
            .context("invalid start time")?;

        for (index, step) in script.steps.iter().enumerate() {
            self.step(index, step, out)
                .with_context(|| format!("step {index} failed"))?;
        }

        info!(
            calls = self.summary.calls,
            accepted = self.summary.accepted,
            rejected = self.summary.rejected,
            "Script finished"
        );
        Ok(self.summary.clone())
    }

    fn step(&mut self, index: usize, step: &Step, out: &mut impl Write) -> Result<()> {
        match step {
            Step::Deploy {
                name,
                family,
                creator,
            } => {
                if self.programs.contains_key(name) {
                    bail!("program name {name:?} already bound");
                }
                let id = self.ledger.deploy(*family, &Identity::from(creator.as_str()))?;
                self.programs.insert(name.clone(), id);
                self.summary.deployed += 1;
                writeln!(out, "deployed {name} ({family}) as program {id}")?;
            }
            Step::Advance { secs } => self.ledger.advance_clock(*secs),
            Step::SetTime { at } => self.ledger.set_timestamp(Timestamp::from_secs(*at))?,
            Step::Call {
                program,
                caller,
                op,
                args,
                completion,
                expect,
            } => {
                let id = self
                    .program(program)
                    .ok_or_else(|| anyhow!("unknown program name {program:?}"))?;
                let invocation = build_invocation(index, op.as_deref(), args, *completion)?;
                let label = op.as_deref().unwrap_or_else(|| completion_label(*completion));
                let actual = self.call(program, id, caller, label, &invocation, out)?;

                let expected = expect.as_deref().unwrap_or(EXPECT_OK);
                if expected != EXPECT_ANY && expected != actual {
                    bail!("{program}.{label} by {caller}: expected {expected}, got {actual}");
                }
            }
        }
        Ok(())
    }

    /// Execute one call and return its outcome label.
    fn call(
        &mut self,
        name: &str,
        id: ProgramId,
        caller: &str,
        label: &str,
        invocation: &Invocation,
        out: &mut impl Write,
    ) -> Result<&'static str> {
        let family = self
            .ledger
            .state(id)
            .map_or("unknown", |state| state.family.name());
        self.summary.calls += 1;

        match self.ledger.call(id, &Identity::from(caller), invocation) {
            Ok(receipt) => {
                self.summary.accepted += 1;
                self.summary.events += receipt.events.len();
                record_call_accepted(family, label);
                for event in &receipt.events {
                    record_event(event.tag());
                    writeln!(out, "[{name}] {event}")?;
                }
                debug!(txid = %receipt.txid, outcome = ?receipt.outcome, "Call accepted");
                Ok(EXPECT_OK)
            }
            Err(err) => {
                let reason = rejection_label(&err);
                self.summary.rejected += 1;
                record_call_rejected(family, reason);
                writeln!(out, "[{name}] {label} by {caller} rejected: {err}")?;
                Ok(reason)
            }
        }
    }
}

/// Metric and expectation label for a completion kind.
#[must_use]
pub const fn completion_label(completion: OnCompletion) -> &'static str {
    match completion {
        OnCompletion::NoOp => "no_op",
        OnCompletion::OptIn => "opt_in",
        OnCompletion::CloseOut => "close_out",
        OnCompletion::ClearState => "clear_state",
        OnCompletion::UpdateApplication => "update_application",
        OnCompletion::DeleteApplication => "delete_application",
    }
}

/// Stable label for a failed call.
#[must_use]
pub fn rejection_label(err: &LedgerError) -> &'static str {
    match err {
        LedgerError::Rejected(inner) => inner.reason(),
        LedgerError::UnknownProgram(_) => "unknown_program",
        LedgerError::ProgramDeleted(_) => "program_deleted",
        LedgerError::ClockRegression { .. } => "clock_regression",
        LedgerError::Commit(_) => "commit_failed",
    }
}

// =============================================================================
// TESTS
// =============================================================================
