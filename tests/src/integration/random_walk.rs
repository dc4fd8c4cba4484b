//! # Randomized Walks
//!
//! Seeded random call sequences checked against a plain map model: every
//! accepted or rejected outcome, and the final stored state, must match.

#[cfg(test)]
mod tests {
    use super::super::fixture::{Sentinel, ADMIN};
    use rand::rngs::StdRng;
    use rand::seq::SliceRandom;
    use rand::{Rng, SeedableRng};
    use sentinel_registry::prelude::*;
    use std::collections::BTreeMap;

    const CALLERS: [&str; 4] = [ADMIN, "B", "C", "D"];
    const IDS: [&str; 3] = ["E1", "E2", "E3"];
    const STEPS: usize = 400;

    fn outcome(result: &Result<CallReceipt, LedgerError>) -> &'static str {
        match result {
            Ok(_) => "ok",
            Err(err) => err.as_rejection().map_or("ledger_error", RegistryError::reason),
        }
    }

    #[test]
    fn test_evidence_walk_matches_model() {
        for seed in [1_u64, 7, 42] {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut s = Sentinel::deploy();
            let ev = s.evidence;
            // id -> (content_hash, submitter)
            let mut model: BTreeMap<&str, (String, &str)> = BTreeMap::new();

            for step in 0..STEPS {
                let caller = *CALLERS.choose(&mut rng).unwrap();
                let id = *IDS.choose(&mut rng).unwrap();
                let hash = format!("h{}", rng.gen_range(0..3));

                let (result, expected) = match rng.gen_range(0..4) {
                    0 => {
                        let expected = if model.contains_key(id) { "already_exists" } else { "ok" };
                        let result = s.call(ev, caller, "submit_evidence", &[id.as_bytes(), b"cid", hash.as_bytes()]);
                        if expected == "ok" {
                            model.insert(id, (hash.clone(), caller));
                        }
                        (result, expected)
                    }
                    1 => {
                        let result = s.call(ev, caller, "verify_evidence", &[id.as_bytes(), hash.as_bytes()]);
                        match model.get(id) {
                            Some((stored, _)) => {
                                let matched = *stored == hash;
                                if let Ok(receipt) = &result {
                                    assert_eq!(receipt.outcome, CallOutcome::Verified(matched), "seed {seed} step {step}");
                                }
                                (result, "ok")
                            }
                            None => (result, "not_found"),
                        }
                    }
                    2 => {
                        let expected = match (model.contains_key(id), caller == ADMIN) {
                            (false, _) => "not_found",
                            (true, false) => "unauthorized",
                            (true, true) => "ok",
                        };
                        let result = s.call(ev, caller, "revoke_evidence", &[id.as_bytes()]);
                        if expected == "ok" {
                            model.remove(id);
                        }
                        (result, expected)
                    }
                    _ => {
                        let expected = if model.contains_key(id) { "ok" } else { "not_found" };
                        (s.call(ev, caller, "read_evidence", &[id.as_bytes()]), expected)
                    }
                };
                assert_eq!(outcome(&result), expected, "seed {seed} step {step}");
            }

            for id in IDS {
                let result = s.call(ev, "C", "read_evidence", &[id.as_bytes()]);
                match (model.get(id), result) {
                    (Some((hash, submitter)), Ok(receipt)) => match receipt.outcome {
                        CallOutcome::Read(StoredRecord::Evidence { record, .. }) => {
                            assert_eq!(record.content_hash, hash.as_bytes());
                            assert_eq!(record.submitter, Identity::from(*submitter));
                        }
                        other => panic!("unexpected outcome {other:?}"),
                    },
                    (None, Err(err)) => assert_eq!(
                        err.as_rejection().map(RegistryError::reason),
                        Some("not_found")
                    ),
                    (model, result) => panic!("seed {seed}: model {model:?} vs ledger {result:?}"),
                }
            }
        }
    }

    #[test]
    fn test_profile_walk_matches_model() {
        let mut rng = StdRng::seed_from_u64(0x5e_17_1e_1);
        let mut s = Sentinel::deploy();
        let p = s.profile;
        let mut model: BTreeMap<&str, Vec<u8>> = BTreeMap::new();

        for step in 0..STEPS {
            let caller = *CALLERS.choose(&mut rng).unwrap();
            let target = *CALLERS.choose(&mut rng).unwrap();
            let payload: Vec<u8> = (0..rng.gen_range(1..16)).map(|_| rng.gen()).collect();

            let (result, expected) = match rng.gen_range(0..4) {
                0 => {
                    let expected = if model.contains_key(caller) { "already_exists" } else { "ok" };
                    let result = s.call(p, caller, "register_profile", &[b"P", payload.as_slice()]);
                    if expected == "ok" {
                        model.insert(caller, payload);
                    }
                    (result, expected)
                }
                1 => {
                    let expected = match (model.contains_key(target), caller == target) {
                        (false, _) => "not_found",
                        (true, false) => "unauthorized",
                        (true, true) => "ok",
                    };
                    let result = s.call(p, caller, "update_profile", &[payload.as_slice(), target.as_bytes()]);
                    if expected == "ok" {
                        model.insert(target, payload);
                    }
                    (result, expected)
                }
                2 => {
                    let expected = match (model.contains_key(target), caller == target) {
                        (false, _) => "not_found",
                        (true, false) => "unauthorized",
                        (true, true) => "ok",
                    };
                    let result = s.call(p, caller, "revoke_profile", &[target.as_bytes()]);
                    if expected == "ok" {
                        model.remove(target);
                    }
                    (result, expected)
                }
                _ => {
                    let expected = if model.contains_key(target) { "ok" } else { "not_found" };
                    (s.call(p, caller, "read_profile", &[target.as_bytes()]), expected)
                }
            };
            assert_eq!(outcome(&result), expected, "step {step}");
        }

        let boxes = s.ledger.boxes(p).unwrap();
        assert_eq!(boxes.len(), model.len());
        for owner in model.keys() {
            assert!(boxes.peek(&RecordKey::new(Family::Profile, owner.as_bytes())).is_some());
        }
    }
}
