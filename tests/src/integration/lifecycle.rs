//! # Program Lifecycle
//!
//! Bootstrap, admin-gated update and delete, clear-state and unsupported
//! completion kinds, across all three families.

#[cfg(test)]
mod tests {
    use super::super::fixture::{Sentinel, ADMIN};
    use sentinel_registry::prelude::*;

    fn lifecycle(s: &mut Sentinel, program: ProgramId, caller: &str, kind: OnCompletion) -> Result<CallReceipt, LedgerError> {
        s.ledger
            .call(program, &Identity::from(caller), &Invocation::lifecycle(kind))
    }

    #[test]
    fn test_deployer_is_admin_of_every_family() {
        let s = Sentinel::deploy();
        for program in [s.evidence, s.incident, s.profile] {
            let state = s.ledger.state(program).unwrap();
            assert_eq!(state.admin, Some(Identity::from(ADMIN)));
            assert_eq!(state.records_created, 0);
        }
        assert_eq!(s.ledger.stats().programs_deployed, 3);
        assert!(s.ledger.events().is_empty());
    }

    #[test]
    fn test_admin_is_fixed_after_bootstrap() {
        let mut s = Sentinel::deploy();
        s.call(s.evidence, "B", "submit_evidence", &[b"E1", b"c", b"h"])
            .unwrap();
        assert_eq!(
            s.reject(s.evidence, "B", "revoke_evidence", &[b"E1"]),
            "unauthorized"
        );
        assert_eq!(
            s.ledger.state(s.evidence).unwrap().admin,
            Some(Identity::from(ADMIN))
        );
    }

    #[test]
    fn test_update_application_admin_only() {
        let mut s = Sentinel::deploy();
        for program in [s.evidence, s.incident, s.profile] {
            let err = lifecycle(&mut s, program, "B", OnCompletion::UpdateApplication).unwrap_err();
            assert!(matches!(
                err.as_rejection(),
                Some(RegistryError::Unauthorized { .. })
            ));
            let receipt = lifecycle(&mut s, program, ADMIN, OnCompletion::UpdateApplication).unwrap();
            assert_eq!(receipt.outcome, CallOutcome::ProgramUpdated);
            assert!(receipt.events.is_empty());
        }
    }

    #[test]
    fn test_delete_application_ends_program() {
        let mut s = Sentinel::deploy();
        let inc = s.incident;
        s.call(inc, "R", "trigger_incident", &[b"I1", b"E1", b"loc"]).unwrap();

        assert!(lifecycle(&mut s, inc, "R", OnCompletion::DeleteApplication).is_err());
        assert!(!s.ledger.is_deleted(inc));

        let receipt = lifecycle(&mut s, inc, ADMIN, OnCompletion::DeleteApplication).unwrap();
        assert_eq!(receipt.outcome, CallOutcome::ProgramDeleted);
        assert!(s.ledger.is_deleted(inc));

        let err = s.call(inc, "R", "read_incident", &[b"I1"]).unwrap_err();
        assert!(matches!(err, LedgerError::ProgramDeleted(id) if id == inc));

        // Other programs are unaffected.
        assert!(s.call(s.evidence, "B", "submit_evidence", &[b"E1", b"c", b"h"]).is_ok());
    }

    #[test]
    fn test_clear_state_and_unsupported_completions() {
        let mut s = Sentinel::deploy();
        let p = s.profile;
        let receipt = lifecycle(&mut s, p, "anyone", OnCompletion::ClearState).unwrap();
        assert_eq!(receipt.outcome, CallOutcome::StateCleared);

        for kind in [OnCompletion::OptIn, OnCompletion::CloseOut] {
            let err = lifecycle(&mut s, p, "anyone", kind).unwrap_err();
            assert!(matches!(
                err.as_rejection(),
                Some(RegistryError::PreconditionFailure(_))
            ));
        }
        assert!(s.ledger.events().is_empty());
    }

    #[test]
    fn test_unknown_program() {
        let mut s = Sentinel::deploy();
        let err = s.call(99, "B", "read_profile", &[b"B"]).unwrap_err();
        assert!(matches!(err, LedgerError::UnknownProgram(99)));
    }

    #[test]
    fn test_transaction_ids_are_unique() {
        let mut s = Sentinel::deploy();
        let a = s.call(s.evidence, "C", "verify_evidence", &[b"E1", b"h"]);
        assert!(a.is_err());
        s.call(s.evidence, "B", "submit_evidence", &[b"E1", b"c", b"h"]).unwrap();
        let first = s.call(s.evidence, "C", "verify_evidence", &[b"E1", b"h"]).unwrap();
        let second = s.call(s.evidence, "C", "verify_evidence", &[b"E1", b"h"]).unwrap();
        assert_ne!(first.txid, second.txid);
        assert_eq!(first.txid.to_hex().len(), 64);
    }
}
