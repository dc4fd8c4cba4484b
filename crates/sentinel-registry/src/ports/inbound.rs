//! # Driving Ports (API - Inbound)
//!
//! The entry point a host ledger drives for every call against a program.

use crate::domain::entities::{CallContext, CallOutcome, Invocation, ProgramState};
use crate::errors::RegistryError;
use crate::ports::outbound::{EventSink, RecordStore};

/// Program execution API.
///
/// The host owns atomicity: it hands in a call-scoped `store` and `events`,
/// commits them together with `state` when this returns `Ok`, and discards
/// all three when it returns `Err`.
pub trait ProgramApi {
    /// Executes one call.
    ///
    /// # Errors
    ///
    /// Any [`RegistryError`] rejects the call as a whole.
    fn invoke(
        &self,
        state: &mut ProgramState,
        ctx: &CallContext,
        invocation: &Invocation,
        store: &mut dyn RecordStore,
        events: &mut dyn EventSink,
    ) -> Result<CallOutcome, RegistryError>;
}
