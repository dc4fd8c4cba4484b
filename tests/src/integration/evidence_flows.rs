//! # Evidence Flows
//!
//! Submission, open verification, reads and admin revocation of evidence,
//! observed only through call receipts and the ledger event log.

#[cfg(test)]
mod tests {
    use super::super::fixture::{Sentinel, ADMIN, GENESIS};
    use sentinel_registry::prelude::*;

    fn evidence_of(receipt: &CallReceipt) -> &EvidenceRecord {
        match &receipt.outcome {
            CallOutcome::Read(StoredRecord::Evidence { record, .. }) => record,
            other => panic!("expected an evidence read, got {other:?}"),
        }
    }

    #[test]
    fn test_submit_verify_revoke_scenario() {
        let mut s = Sentinel::deploy();
        let ev = s.evidence;
        let t0 = s.ledger.timestamp();

        s.call(ev, "B", "submit_evidence", &[b"E1", b"cid123", b"deadbeef"])
            .unwrap();

        let read = s.call(ev, "B", "read_evidence", &[b"E1"]).unwrap();
        let record = evidence_of(&read);
        assert_eq!(record.content_ref, b"cid123");
        assert_eq!(record.content_hash, b"deadbeef");
        assert_eq!(record.submitter, Identity::from("B"));
        assert_eq!(record.created_at, t0);
        assert_eq!(
            Sentinel::only_event(&read),
            format!("EvidenceRead|E1|cid123|deadbeef|B|0x{}", hex_secs(t0))
        );

        let yes = s.call(ev, "C", "verify_evidence", &[b"E1", b"deadbeef"]).unwrap();
        assert_eq!(yes.outcome, CallOutcome::Verified(true));
        assert_eq!(Sentinel::only_event(&yes), "EvidenceVerified|E1|true");

        let before = s.ledger.raw_box(ev, &RecordKey::new(Family::Evidence, b"E1")).map(<[u8]>::to_vec);
        let no = s.call(ev, "C", "verify_evidence", &[b"E1", b"beef"]).unwrap();
        assert_eq!(no.outcome, CallOutcome::Verified(false));
        assert_eq!(Sentinel::only_event(&no), "EvidenceVerified|E1|false");
        let after = s.ledger.raw_box(ev, &RecordKey::new(Family::Evidence, b"E1")).map(<[u8]>::to_vec);
        assert_eq!(before, after);

        let revoked = s.call(ev, ADMIN, "revoke_evidence", &[b"E1"]).unwrap();
        assert_eq!(Sentinel::only_event(&revoked), "EvidenceRevoked|E1");
        assert_eq!(s.reject(ev, "B", "read_evidence", &[b"E1"]), "not_found");
    }

    fn hex_secs(ts: Timestamp) -> String {
        ts.to_be_bytes().iter().map(|b| format!("{b:02x}")).collect()
    }

    #[test]
    fn test_duplicate_submission_keeps_first() {
        let mut s = Sentinel::deploy();
        let ev = s.evidence;
        s.call(ev, "B", "submit_evidence", &[b"E1", b"first", b"h1"]).unwrap();
        s.ledger.advance_clock(30);

        assert_eq!(
            s.reject(ev, "C", "submit_evidence", &[b"E1", b"second", b"h2"]),
            "already_exists"
        );

        let read = s.call(ev, "C", "read_evidence", &[b"E1"]).unwrap();
        let record = evidence_of(&read);
        assert_eq!(record.content_ref, b"first");
        assert_eq!(record.submitter, Identity::from("B"));
        assert_eq!(record.created_at, Timestamp::from_secs(GENESIS));
    }

    #[test]
    fn test_only_admin_revokes() {
        let mut s = Sentinel::deploy();
        let ev = s.evidence;
        s.call(ev, "B", "submit_evidence", &[b"E1", b"cid", b"h"]).unwrap();

        assert_eq!(s.reject(ev, "B", "revoke_evidence", &[b"E1"]), "unauthorized");
        assert_eq!(s.reject(ev, ADMIN, "revoke_evidence", &[b"E2"]), "not_found");
        assert!(s.call(ev, "C", "read_evidence", &[b"E1"]).is_ok());
    }

    #[test]
    fn test_hash_comparison_is_verbatim() {
        let mut s = Sentinel::deploy();
        let ev = s.evidence;
        let digest = content_hash_hex(b"dashcam footage");
        s.call(ev, "B", "submit_evidence", &[b"E1", b"cid", digest.as_bytes()])
            .unwrap();

        let upper = digest.to_uppercase();
        let receipt = s
            .call(ev, "C", "verify_evidence", &[b"E1", upper.as_bytes()])
            .unwrap();
        assert_eq!(receipt.outcome, CallOutcome::Verified(false));

        let receipt = s
            .call(ev, "C", "verify_evidence", &[b"E1", digest.as_bytes()])
            .unwrap();
        assert_eq!(receipt.outcome, CallOutcome::Verified(true));
    }

    #[test]
    fn test_verify_missing_record() {
        let mut s = Sentinel::deploy();
        let before = s.event_count();
        assert_eq!(
            s.reject(s.evidence, "C", "verify_evidence", &[b"E404", b"h"]),
            "not_found"
        );
        assert_eq!(s.event_count(), before);
    }

    #[test]
    fn test_delimiter_bytes_survive_storage() {
        let mut s = Sentinel::deploy();
        let ev = s.evidence;
        s.call(ev, "B", "submit_evidence", &[b"E|1", b"a|b|c", b"h|"]).unwrap();

        let read = s.call(ev, "B", "read_evidence", &[b"E|1"]).unwrap();
        let record = evidence_of(&read);
        assert_eq!(record.content_ref, b"a|b|c");
        assert_eq!(record.content_hash, b"h|");
    }
}
