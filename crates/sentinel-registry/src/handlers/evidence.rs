//! # Evidence Handlers
//!
//! Evidence is write-once: submitted by anyone, verified and read by anyone,
//! deleted only by the program admin. The stored `content_hash` is whatever
//! the submitter asserted and is compared verbatim on verification.

use super::{non_empty, Execution};
use crate::domain::entities::CallOutcome;
use crate::domain::records::{EvidenceRecord, Record, StoredRecord};
use crate::domain::services::hashes_match;
use crate::domain::value_objects::Family;
use crate::errors::RegistryError;
use crate::events::RegistryEvent;

/// `submit_evidence(id, content_ref, content_hash)`
pub fn submit(exec: &mut Execution<'_>, args: &[Vec<u8>]) -> Result<CallOutcome, RegistryError> {
    let [id, content_ref, content_hash] = args else {
        return Err(exec.arity_mismatch());
    };
    let key = exec.key(Family::Evidence, id)?;
    let record = EvidenceRecord {
        content_ref: content_ref.clone(),
        content_hash: non_empty(exec.spec, "content_hash", content_hash)?.to_vec(),
        submitter: exec.caller().clone(),
        created_at: exec.now(),
    };
    exec.insert(&key, &record)?;
    exec.emit(RegistryEvent::EvidenceSubmitted {
        id: id.clone(),
        submitter: record.submitter,
        timestamp: record.created_at,
    });
    Ok(CallOutcome::Created { key })
}

/// `verify_evidence(id, candidate_hash)`
///
/// Emits the verdict and returns it; a mismatch is not an error.
pub fn verify(exec: &mut Execution<'_>, args: &[Vec<u8>]) -> Result<CallOutcome, RegistryError> {
    let [id, candidate] = args else {
        return Err(exec.arity_mismatch());
    };
    let key = exec.key(Family::Evidence, id)?;
    let record: EvidenceRecord = exec.load(&key)?;
    let matched = hashes_match(&record.content_hash, candidate);
    exec.emit(RegistryEvent::EvidenceVerified {
        id: id.clone(),
        matched,
    });
    Ok(CallOutcome::Verified(matched))
}

/// `read_evidence(id)`
pub fn read(exec: &mut Execution<'_>, args: &[Vec<u8>]) -> Result<CallOutcome, RegistryError> {
    let [id] = args else {
        return Err(exec.arity_mismatch());
    };
    let key = exec.key(Family::Evidence, id)?;
    let record: EvidenceRecord = exec.load(&key)?;
    exec.emit(RegistryEvent::EvidenceRead {
        id: id.clone(),
        record: record.to_fields(),
    });
    Ok(CallOutcome::Read(StoredRecord::Evidence {
        id: id.clone(),
        record,
    }))
}

/// `revoke_evidence(id)`, admin only.
pub fn revoke(exec: &mut Execution<'_>, args: &[Vec<u8>]) -> Result<CallOutcome, RegistryError> {
    let [id] = args else {
        return Err(exec.arity_mismatch());
    };
    let key = exec.key(Family::Evidence, id)?;
    let record: EvidenceRecord = exec.load(&key)?;
    exec.authorize(&record.submitter)?;
    exec.remove(&key)?;
    exec.emit(RegistryEvent::EvidenceRevoked { id: id.clone() });
    Ok(CallOutcome::Revoked { key })
}

// =============================================================================
// TESTS
// =============================================================================
