//! # Profile Handlers
//!
//! One profile per identity, keyed by the owner's identity bytes.
//! Registration always targets the caller. Update and revoke default to the
//! caller's key and accept an explicit owner so that attempts against another
//! identity's profile are rejected by the owner-only policy rather than
//! silently redirected.

use super::{non_empty, Execution};
use crate::domain::entities::CallOutcome;
use crate::domain::records::{ProfileRecord, Record, StoredRecord};
use crate::domain::value_objects::{Family, Identity};
use crate::errors::RegistryError;
use crate::events::RegistryEvent;

/// `register_profile(profile_id, payload)`
pub fn register(exec: &mut Execution<'_>, args: &[Vec<u8>]) -> Result<CallOutcome, RegistryError> {
    let [profile_id, payload] = args else {
        return Err(exec.arity_mismatch());
    };
    let owner = exec.caller().clone();
    let key = exec.key(Family::Profile, owner.as_bytes())?;
    let record = ProfileRecord {
        profile_id: non_empty(exec.spec, "profile_id", profile_id)?.to_vec(),
        payload: payload.clone(),
        updated_at: exec.now(),
    };
    exec.insert(&key, &record)?;
    exec.emit(RegistryEvent::ProfileRegistered {
        owner,
        profile_id: record.profile_id,
        timestamp: record.updated_at,
    });
    Ok(CallOutcome::Created { key })
}

/// `update_profile(payload, [owner])`, owner only.
pub fn update(exec: &mut Execution<'_>, args: &[Vec<u8>]) -> Result<CallOutcome, RegistryError> {
    let (payload, owner) = match args {
        [payload] => (payload, exec.caller().clone()),
        [payload, owner] => (payload, Identity::from(owner.as_slice())),
        _ => return Err(exec.arity_mismatch()),
    };
    let key = exec.key(Family::Profile, owner.as_bytes())?;
    let mut record: ProfileRecord = exec.load(&key)?;
    exec.authorize(&owner)?;

    record.payload.clone_from(payload);
    record.updated_at = exec.now();
    exec.replace(&key, &record)?;
    exec.emit(RegistryEvent::ProfileUpdated {
        owner,
        timestamp: record.updated_at,
    });
    Ok(CallOutcome::Updated { key })
}

/// `read_profile(owner)`
pub fn read(exec: &mut Execution<'_>, args: &[Vec<u8>]) -> Result<CallOutcome, RegistryError> {
    let [owner] = args else {
        return Err(exec.arity_mismatch());
    };
    let owner = Identity::from(owner.as_slice());
    let key = exec.key(Family::Profile, owner.as_bytes())?;
    let record: ProfileRecord = exec.load(&key)?;
    exec.emit(RegistryEvent::ProfileRead {
        owner: owner.clone(),
        record: record.to_fields(),
    });
    Ok(CallOutcome::Read(StoredRecord::Profile { owner, record }))
}

/// `revoke_profile([owner])`, owner only.
pub fn revoke(exec: &mut Execution<'_>, args: &[Vec<u8>]) -> Result<CallOutcome, RegistryError> {
    let owner = match args {
        [] => exec.caller().clone(),
        [owner] => Identity::from(owner.as_slice()),
        _ => return Err(exec.arity_mismatch()),
    };
    let key = exec.key(Family::Profile, owner.as_bytes())?;
    let _: ProfileRecord = exec.load(&key)?;
    exec.authorize(&owner)?;
    exec.remove(&key)?;
    exec.emit(RegistryEvent::ProfileRevoked { owner });
    Ok(CallOutcome::Revoked { key })
}

// =============================================================================
// TESTS
// =============================================================================
