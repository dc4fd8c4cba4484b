//! # Registry Service (Dispatcher)
//!
//! Implements [`ProgramApi`] for all three record families. One service
//! instance can drive any number of programs: the family, admin and record
//! counter live in the [`ProgramState`] the host passes in.
//!
//! ## Call Routing
//!
//! | Program state | Completion | Action |
//! |---------------|------------|--------|
//! | not bootstrapped | any | caller becomes admin, accepted |
//! | bootstrapped | `NoOp` | operation lookup, arity check, handler |
//! | bootstrapped | `UpdateApplication` / `DeleteApplication` | admin only, no event |
//! | bootstrapped | `ClearState` | accepted, no effect |
//! | bootstrapped | `OptIn` / `CloseOut` | `PreconditionFailure` |

use crate::domain::entities::{
    CallContext, CallOutcome, Invocation, OnCompletion, ProgramState, ResourceLimits,
};
use crate::domain::operations::{Operation, OperationSpec};
use crate::domain::value_objects::Identity;
use crate::errors::RegistryError;
use crate::handlers::{evidence, incident, profile, Execution};
use crate::ports::inbound::ProgramApi;
use crate::ports::outbound::{EventSink, RecordStore};
use tracing::{debug, info, instrument, warn};

/// Handler signature shared by every operation.
type Handler = fn(&mut Execution<'_>, &[Vec<u8>]) -> Result<CallOutcome, RegistryError>;

/// Registry service configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Argument and key budget applied to every call.
    pub limits: ResourceLimits,
}

/// The registry dispatcher.
#[derive(Debug, Clone, Default)]
pub struct RegistryService {
    config: ServiceConfig,
}

impl RegistryService {
    /// Create a service with the given configuration.
    #[must_use]
    pub fn new(config: ServiceConfig) -> Self {
        Self { config }
    }

    /// Active configuration.
    #[must_use]
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    fn dispatch(
        &self,
        state: &mut ProgramState,
        ctx: &CallContext,
        invocation: &Invocation,
        store: &mut dyn RecordStore,
        events: &mut dyn EventSink,
    ) -> Result<CallOutcome, RegistryError> {
        let Some(admin) = state.admin.clone() else {
            state.admin = Some(ctx.caller.clone());
            state.records_created = 0;
            info!(family = %state.family, admin = %ctx.caller, "Program bootstrapped");
            return Ok(CallOutcome::Bootstrapped {
                admin: ctx.caller.clone(),
            });
        };

        self.check_argument_budget(&invocation.args)?;

        match invocation.on_completion {
            OnCompletion::NoOp => {
                let (spec, args) = Self::resolve(state, &invocation.args)?;
                let mut exec = Execution {
                    ctx,
                    admin: &admin,
                    spec,
                    limits: &self.config.limits,
                    store,
                    events,
                    records_created: &mut state.records_created,
                };
                route(spec.operation)(&mut exec, args)
            }
            OnCompletion::UpdateApplication => {
                require_admin(ctx, &admin, "update_application")?;
                Ok(CallOutcome::ProgramUpdated)
            }
            OnCompletion::DeleteApplication => {
                require_admin(ctx, &admin, "delete_application")?;
                Ok(CallOutcome::ProgramDeleted)
            }
            OnCompletion::ClearState => Ok(CallOutcome::StateCleared),
            OnCompletion::OptIn | OnCompletion::CloseOut => Err(RegistryError::precondition(
                format!("{:?} is not supported", invocation.on_completion),
            )),
        }
    }

    fn check_argument_budget(&self, args: &[Vec<u8>]) -> Result<(), RegistryError> {
        let limits = &self.config.limits;
        if args.len() > limits.max_args {
            return Err(RegistryError::precondition(format!(
                "{} arguments, limit {}",
                args.len(),
                limits.max_args
            )));
        }
        let total: usize = args.iter().map(Vec::len).sum();
        if total > limits.max_args_total_len {
            return Err(RegistryError::precondition(format!(
                "arguments total {total} bytes, limit {}",
                limits.max_args_total_len
            )));
        }
        Ok(())
    }

    /// Splits a `NoOp` argument list into the operation and its arguments.
    fn resolve<'a>(
        state: &ProgramState,
        args: &'a [Vec<u8>],
    ) -> Result<(&'static OperationSpec, &'a [Vec<u8>]), RegistryError> {
        let Some((name, rest)) = args.split_first() else {
            return Err(RegistryError::precondition("missing operation name"));
        };
        let spec = Operation::lookup(state.family, name).ok_or_else(|| {
            RegistryError::precondition(format!(
                "unknown {} operation {:?}",
                state.family,
                String::from_utf8_lossy(name)
            ))
        })?;
        if !spec.arity.accepts(rest.len()) {
            return Err(RegistryError::precondition(format!(
                "{} expects {} arguments, got {}",
                spec.name,
                spec.arity,
                rest.len()
            )));
        }
        Ok((spec, rest))
    }
}

fn route(operation: Operation) -> Handler {
    match operation {
        Operation::SubmitEvidence => evidence::submit,
        Operation::VerifyEvidence => evidence::verify,
        Operation::ReadEvidence => evidence::read,
        Operation::RevokeEvidence => evidence::revoke,
        Operation::TriggerIncident => incident::trigger,
        Operation::UpdateIncidentStatus => incident::update_status,
        Operation::ReadIncident => incident::read,
        Operation::RegisterProfile => profile::register,
        Operation::UpdateProfile => profile::update,
        Operation::ReadProfile => profile::read,
        Operation::RevokeProfile => profile::revoke,
    }
}

fn require_admin(
    ctx: &CallContext,
    admin: &Identity,
    operation: &'static str,
) -> Result<(), RegistryError> {
    if &ctx.caller == admin {
        Ok(())
    } else {
        Err(RegistryError::Unauthorized {
            caller: ctx.caller.clone(),
            operation,
        })
    }
}

// =============================================================================
// ProgramApi Implementation
// =============================================================================

impl ProgramApi for RegistryService {
    #[instrument(
        skip_all,
        fields(
            family = %state.family,
            caller = %ctx.caller,
            at = ctx.timestamp.as_secs(),
            on_completion = ?invocation.on_completion,
        )
    )]
    fn invoke(
        &self,
        state: &mut ProgramState,
        ctx: &CallContext,
        invocation: &Invocation,
        store: &mut dyn RecordStore,
        events: &mut dyn EventSink,
    ) -> Result<CallOutcome, RegistryError> {
        let result = self.dispatch(state, ctx, invocation, store, events);
        match &result {
            Ok(outcome) => debug!(?outcome, "Call accepted"),
            Err(err) => warn!(reason = err.reason(), error = %err, "Call rejected"),
        }
        result
    }
}

// =============================================================================
// TESTS
// =============================================================================
