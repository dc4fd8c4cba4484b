//! # Script Replay
//!
//! The node's script runner against the same ledger the other scenarios
//! use: the built-in demo must replay cleanly and its committed log must
//! agree with the runner's summary.

#[cfg(test)]
mod tests {
    use sentinel_node::{Runner, Script, DEMO_SCRIPT};
    use sentinel_registry::prelude::*;

    #[test]
    fn test_demo_replays_and_log_agrees() {
        let script = Script::from_json(DEMO_SCRIPT).unwrap();
        let mut runner = Runner::new(ServiceConfig::default());
        let mut out = Vec::new();
        let summary = runner.run(&script, &mut out).unwrap();

        let ledger = runner.ledger();
        assert_eq!(ledger.events().len(), summary.events);
        assert_eq!(ledger.stats().programs_deployed, summary.deployed as u64);
        assert_eq!(
            ledger.stats().calls_rejected,
            summary.rejected as u64
        );

        let evidence = runner.program("evidence").unwrap();
        let revoked = ledger
            .events_for(evidence)
            .any(|e| e.event.tag() == "EvidenceRevoked");
        assert!(revoked);
        assert!(ledger
            .raw_box(evidence, &RecordKey::new(Family::Evidence, b"E1"))
            .is_none());
    }

    #[test]
    fn test_tight_limits_surface_as_expectation_failure() {
        let script = Script::from_json(
            r#"{"steps":[
                {"action":"deploy","name":"ev","family":"evidence","creator":"A"},
                {"action":"call","program":"ev","caller":"B","op":"submit_evidence",
                 "args":["E1","cid","hash"],"expect":"precondition_failure"}
            ]}"#,
        )
        .unwrap();
        let limits = ResourceLimits {
            max_args: 2,
            ..ResourceLimits::default()
        };
        let mut runner = Runner::new(ServiceConfig { limits });
        let summary = runner.run(&script, &mut Vec::new()).unwrap();
        assert_eq!(summary.rejected, 1);
        assert!(runner.ledger().events().is_empty());
    }
}
