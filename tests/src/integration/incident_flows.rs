//! # Incident Flows
//!
//! Triggering, status updates by owner and admin, and reads.

#[cfg(test)]
mod tests {
    use super::super::fixture::{Sentinel, ADMIN};
    use sentinel_registry::prelude::*;

    fn incident_of(receipt: &CallReceipt) -> IncidentRecord {
        match &receipt.outcome {
            CallOutcome::Read(StoredRecord::Incident { record, .. }) => record.clone(),
            other => panic!("expected an incident read, got {other:?}"),
        }
    }

    fn read(s: &mut Sentinel, id: &[u8]) -> IncidentRecord {
        let receipt = s.call(s.incident, "observer", "read_incident", &[id]).unwrap();
        incident_of(&receipt)
    }

    #[test]
    fn test_trigger_starts_pending() {
        let mut s = Sentinel::deploy();
        let receipt = s
            .call(s.incident, "R", "trigger_incident", &[b"I1", b"E1", b"loc#1", b"night"])
            .unwrap();
        assert_eq!(
            receipt.outcome,
            CallOutcome::Created {
                key: RecordKey::new(Family::Incident, b"I1")
            }
        );
        assert!(Sentinel::only_event(&receipt).starts_with("IncidentTriggered|I1|R|"));

        let record = read(&mut s, b"I1");
        assert_eq!(record.owner, Identity::from("R"));
        assert_eq!(record.status, IncidentStatus::Pending);
        assert_eq!(record.metadata, b"night");
    }

    #[test]
    fn test_metadata_is_optional_at_trigger() {
        let mut s = Sentinel::deploy();
        s.call(s.incident, "R", "trigger_incident", &[b"I1", b"E1", b"loc"])
            .unwrap();
        assert!(read(&mut s, b"I1").metadata.is_empty());
    }

    #[test]
    fn test_update_preserves_identity_fields() {
        let mut s = Sentinel::deploy();
        s.call(s.incident, "R", "trigger_incident", &[b"I1", b"E1", b"loc", b"m0"])
            .unwrap();
        let before = read(&mut s, b"I1");

        s.ledger.advance_clock(120);
        let receipt = s
            .call(s.incident, ADMIN, "update_incident_status", &[b"I1", b"verified", b"m1"])
            .unwrap();
        let after = read(&mut s, b"I1");

        assert_eq!(after.owner, before.owner);
        assert_eq!(after.evidence_ref, before.evidence_ref);
        assert_eq!(after.location_hash, before.location_hash);
        assert_eq!(after.status, IncidentStatus::Verified);
        assert_eq!(after.metadata, b"m1");
        assert_eq!(after.updated_at.as_secs(), before.updated_at.as_secs() + 120);
        assert_eq!(
            receipt.events[0],
            RegistryEvent::IncidentUpdated {
                id: b"I1".to_vec(),
                status: b"verified".to_vec(),
                timestamp: after.updated_at,
            }
        );
    }

    #[test]
    fn test_owner_may_update_without_metadata() {
        let mut s = Sentinel::deploy();
        s.call(s.incident, "R", "trigger_incident", &[b"I1", b"E1", b"loc", b"keep"])
            .unwrap();
        s.call(s.incident, "R", "update_incident_status", &[b"I1", b"resolved"])
            .unwrap();

        let record = read(&mut s, b"I1");
        assert_eq!(record.status, IncidentStatus::Resolved);
        assert_eq!(record.metadata, b"keep");
    }

    #[test]
    fn test_stranger_cannot_update() {
        let mut s = Sentinel::deploy();
        s.call(s.incident, "R", "trigger_incident", &[b"I1", b"E1", b"loc"])
            .unwrap();
        let before = read(&mut s, b"I1");

        assert_eq!(
            s.reject(s.incident, "X", "update_incident_status", &[b"I1", b"false"]),
            "unauthorized"
        );
        assert_eq!(read(&mut s, b"I1"), before);
    }

    #[test]
    fn test_free_form_status() {
        let mut s = Sentinel::deploy();
        s.call(s.incident, "R", "trigger_incident", &[b"I1", b"E1", b"loc"])
            .unwrap();
        s.call(s.incident, "R", "update_incident_status", &[b"I1", b"escalated"])
            .unwrap();
        assert_eq!(
            read(&mut s, b"I1").status,
            IncidentStatus::Other(b"escalated".to_vec())
        );
    }

    #[test]
    fn test_evidence_ref_is_not_cross_checked() {
        let mut s = Sentinel::deploy();
        assert!(s
            .call(s.incident, "R", "trigger_incident", &[b"I1", b"no-such-evidence", b"loc"])
            .is_ok());
    }

    #[test]
    fn test_incident_family_has_no_revoke() {
        let mut s = Sentinel::deploy();
        s.call(s.incident, "R", "trigger_incident", &[b"I1", b"E1", b"loc"])
            .unwrap();
        assert_eq!(
            s.reject(s.incident, ADMIN, "revoke_evidence", &[b"I1"]),
            "precondition_failure"
        );
    }

    #[test]
    fn test_update_missing_incident() {
        let mut s = Sentinel::deploy();
        assert_eq!(
            s.reject(s.incident, ADMIN, "update_incident_status", &[b"I9", b"verified"]),
            "not_found"
        );
    }
}
