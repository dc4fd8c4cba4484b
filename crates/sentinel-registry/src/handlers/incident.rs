//! # Incident Handlers
//!
//! Incidents start `pending`. Afterwards only the status, timestamp and
//! metadata change; owner, evidence reference and location never do. The
//! evidence reference is stored as given and is not checked against the
//! evidence program.

use super::{non_empty, Execution};
use crate::domain::entities::CallOutcome;
use crate::domain::records::{IncidentRecord, IncidentStatus, Record, StoredRecord};
use crate::domain::value_objects::Family;
use crate::errors::RegistryError;
use crate::events::RegistryEvent;

/// `trigger_incident(id, evidence_ref, location_hash, [metadata])`
pub fn trigger(exec: &mut Execution<'_>, args: &[Vec<u8>]) -> Result<CallOutcome, RegistryError> {
    let (id, evidence_ref, location_hash, metadata) = match args {
        [id, evidence_ref, location_hash] => (id, evidence_ref, location_hash, Vec::new()),
        [id, evidence_ref, location_hash, metadata] => {
            (id, evidence_ref, location_hash, metadata.clone())
        }
        _ => return Err(exec.arity_mismatch()),
    };
    let key = exec.key(Family::Incident, id)?;
    let record = IncidentRecord {
        owner: exec.caller().clone(),
        evidence_ref: non_empty(exec.spec, "evidence_ref", evidence_ref)?.to_vec(),
        location_hash: location_hash.clone(),
        status: IncidentStatus::Pending,
        updated_at: exec.now(),
        metadata,
    };
    exec.insert(&key, &record)?;
    exec.emit(RegistryEvent::IncidentTriggered {
        id: id.clone(),
        owner: record.owner,
        timestamp: record.updated_at,
    });
    Ok(CallOutcome::Created { key })
}

/// `update_incident_status(id, new_status, [metadata])`, admin or owner.
///
/// Without a metadata argument the stored metadata is kept.
pub fn update_status(
    exec: &mut Execution<'_>,
    args: &[Vec<u8>],
) -> Result<CallOutcome, RegistryError> {
    let (id, new_status, metadata) = match args {
        [id, status] => (id, status, None),
        [id, status, metadata] => (id, status, Some(metadata)),
        _ => return Err(exec.arity_mismatch()),
    };
    let key = exec.key(Family::Incident, id)?;
    let mut record: IncidentRecord = exec.load(&key)?;
    exec.authorize(&record.owner)?;

    record.status = IncidentStatus::from_bytes(non_empty(exec.spec, "status", new_status)?);
    record.updated_at = exec.now();
    if let Some(metadata) = metadata {
        record.metadata.clone_from(metadata);
    }
    exec.replace(&key, &record)?;
    exec.emit(RegistryEvent::IncidentUpdated {
        id: id.clone(),
        status: record.status.as_bytes().to_vec(),
        timestamp: record.updated_at,
    });
    Ok(CallOutcome::Updated { key })
}

/// `read_incident(id)`
pub fn read(exec: &mut Execution<'_>, args: &[Vec<u8>]) -> Result<CallOutcome, RegistryError> {
    let [id] = args else {
        return Err(exec.arity_mismatch());
    };
    let key = exec.key(Family::Incident, id)?;
    let record: IncidentRecord = exec.load(&key)?;
    exec.emit(RegistryEvent::IncidentRead {
        id: id.clone(),
        record: record.to_fields(),
    });
    Ok(CallOutcome::Read(StoredRecord::Incident {
        id: id.clone(),
        record,
    }))
}

// =============================================================================
// TESTS
// =============================================================================
