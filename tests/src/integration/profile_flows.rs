//! # Profile Flows
//!
//! One profile per identity, keyed by the caller. Only the owner may
//! update or revoke it; the admin has no override.

#[cfg(test)]
mod tests {
    use super::super::fixture::{Sentinel, ADMIN};
    use sentinel_registry::prelude::*;

    fn profile_of(receipt: &CallReceipt) -> ProfileRecord {
        match &receipt.outcome {
            CallOutcome::Read(StoredRecord::Profile { record, .. }) => record.clone(),
            other => panic!("expected a profile read, got {other:?}"),
        }
    }

    #[test]
    fn test_register_update_scenario() {
        let mut s = Sentinel::deploy();
        let p = s.profile;

        let registered = s.call(p, "D", "register_profile", &[b"P1", b"blob1"]).unwrap();
        let t0 = s.ledger.timestamp();
        assert_eq!(
            registered.outcome,
            CallOutcome::Created {
                key: RecordKey::new(Family::Profile, b"D")
            }
        );

        s.ledger.advance_clock(45);
        let updated = s.call(p, "D", "update_profile", &[b"blob2"]).unwrap();
        assert!(Sentinel::only_event(&updated).starts_with("ProfileUpdated|D|"));

        let record = profile_of(&s.call(p, "anyone", "read_profile", &[b"D"]).unwrap());
        assert_eq!(record.profile_id, b"P1");
        assert_eq!(record.payload, b"blob2");
        assert!(record.updated_at >= t0);
        assert_eq!(record.updated_at.as_secs(), t0.as_secs() + 45);

        assert_eq!(
            s.reject(p, "E", "update_profile", &[b"blob3", b"D"]),
            "unauthorized"
        );
        let record = profile_of(&s.call(p, "anyone", "read_profile", &[b"D"]).unwrap());
        assert_eq!(record.payload, b"blob2");
    }

    #[test]
    fn test_one_profile_per_identity() {
        let mut s = Sentinel::deploy();
        let p = s.profile;
        s.call(p, "D", "register_profile", &[b"P1", b"blob"]).unwrap();
        assert_eq!(
            s.reject(p, "D", "register_profile", &[b"P2", b"other"]),
            "already_exists"
        );
        assert!(s.call(p, "E", "register_profile", &[b"P1", b"blob"]).is_ok());
    }

    #[test]
    fn test_admin_has_no_override() {
        let mut s = Sentinel::deploy();
        let p = s.profile;
        s.call(p, "D", "register_profile", &[b"P1", b"blob"]).unwrap();
        assert_eq!(
            s.reject(p, ADMIN, "update_profile", &[b"x", b"D"]),
            "unauthorized"
        );
        assert_eq!(s.reject(p, ADMIN, "revoke_profile", &[b"D"]), "unauthorized");
    }

    #[test]
    fn test_owner_revokes_and_re_registers() {
        let mut s = Sentinel::deploy();
        let p = s.profile;
        s.call(p, "D", "register_profile", &[b"P1", b"blob"]).unwrap();

        let revoked = s.call(p, "D", "revoke_profile", &[]).unwrap();
        assert_eq!(Sentinel::only_event(&revoked), "ProfileRevoked|D");
        assert_eq!(s.reject(p, "E", "read_profile", &[b"D"]), "not_found");
        assert_eq!(s.reject(p, "D", "update_profile", &[b"x"]), "not_found");

        s.call(p, "D", "register_profile", &[b"P9", b"fresh"]).unwrap();
        let record = profile_of(&s.call(p, "D", "read_profile", &[b"D"]).unwrap());
        assert_eq!(record.profile_id, b"P9");
    }

    #[test]
    fn test_binary_payload_read_back() {
        let mut s = Sentinel::deploy();
        let p = s.profile;
        let payload = [0x00, 0xff, b'|', 0x7f];
        s.call(p, "D", "register_profile", &[b"P1", &payload]).unwrap();

        let receipt = s.call(p, "D", "read_profile", &[b"D"]).unwrap();
        assert_eq!(profile_of(&receipt).payload, payload);
        assert!(Sentinel::only_event(&receipt).starts_with("ProfileRead|D|P1|0x00ff7c7f|"));
    }
}
