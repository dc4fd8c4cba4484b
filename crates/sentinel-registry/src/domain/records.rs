//! # Record Families
//!
//! Field schemas for the three record families and the [`Record`] trait that
//! maps each schema onto the codec's ordered field tuple.

use crate::domain::codec;
use crate::domain::value_objects::{Family, Identity, Timestamp};
use crate::errors::CodecError;

/// A record family's stored schema.
pub trait Record: Sized {
    /// Family (and key namespace) the record lives in.
    const FAMILY: Family;

    /// Number of stored fields.
    const FIELD_COUNT: usize;

    /// Stored fields, in storage order.
    fn to_fields(&self) -> Vec<Vec<u8>>;

    /// Rebuilds the record from exactly [`Self::FIELD_COUNT`] fields.
    ///
    /// # Errors
    ///
    /// Fails if a typed field (timestamp) is malformed.
    fn from_fields(fields: Vec<Vec<u8>>) -> Result<Self, CodecError>;

    /// Encodes the record into a stored value.
    ///
    /// # Errors
    ///
    /// Fails if a field exceeds the codec's field limit.
    fn encode(&self) -> Result<Vec<u8>, CodecError> {
        codec::encode_fields(&self.to_fields())
    }

    /// Decodes a stored value.
    ///
    /// # Errors
    ///
    /// Fails on truncated framing, wrong field count or malformed fields.
    fn decode(value: &[u8]) -> Result<Self, CodecError> {
        Self::from_fields(codec::decode_fields(value, Self::FIELD_COUNT)?)
    }
}

fn take_timestamp(field: &[u8], index: usize) -> Result<Timestamp, CodecError> {
    Timestamp::from_be_slice(field).ok_or(CodecError::InvalidTimestamp {
        index,
        len: field.len(),
    })
}

fn take_fields<const N: usize>(fields: Vec<Vec<u8>>) -> Result<[Vec<u8>; N], CodecError> {
    let actual = fields.len();
    fields
        .try_into()
        .map_err(|_| CodecError::FieldCountMismatch {
            expected: N,
            actual,
        })
}

// =============================================================================
// EVIDENCE
// =============================================================================

/// Evidence submission. Immutable once created.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EvidenceRecord {
    /// Content pointer (for example an IPFS CID).
    pub content_ref: Vec<u8>,
    /// Caller-asserted content hash, compared verbatim on verification.
    pub content_hash: Vec<u8>,
    /// Identity that submitted the evidence.
    pub submitter: Identity,
    /// Submission time.
    pub created_at: Timestamp,
}

impl Record for EvidenceRecord {
    const FAMILY: Family = Family::Evidence;
    const FIELD_COUNT: usize = 4;

    fn to_fields(&self) -> Vec<Vec<u8>> {
        vec![
            self.content_ref.clone(),
            self.content_hash.clone(),
            self.submitter.as_bytes().to_vec(),
            self.created_at.to_be_bytes().to_vec(),
        ]
    }

    fn from_fields(fields: Vec<Vec<u8>>) -> Result<Self, CodecError> {
        let [content_ref, content_hash, submitter, created_at] = take_fields(fields)?;
        Ok(Self {
            content_ref,
            content_hash,
            submitter: Identity(submitter),
            created_at: take_timestamp(&created_at, 3)?,
        })
    }
}

// =============================================================================
// INCIDENT
// =============================================================================

/// Incident status. Free-form after creation; `pending` at creation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IncidentStatus {
    /// Initial status, forced at trigger time.
    Pending,
    /// Confirmed by the owner or the admin.
    Verified,
    /// Reported as a false alarm.
    False,
    /// Closed.
    Resolved,
    /// Any other caller-supplied status.
    Other(Vec<u8>),
}

impl IncidentStatus {
    /// Parses a stored or caller-supplied status.
    #[must_use]
    pub fn from_bytes(bytes: &[u8]) -> Self {
        match bytes {
            b"pending" => Self::Pending,
            b"verified" => Self::Verified,
            b"false" => Self::False,
            b"resolved" => Self::Resolved,
            other => Self::Other(other.to_vec()),
        }
    }

    /// Stored representation.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Self::Pending => b"pending",
            Self::Verified => b"verified",
            Self::False => b"false",
            Self::Resolved => b"resolved",
            Self::Other(bytes) => bytes,
        }
    }
}

/// Incident report.
///
/// `owner`, `evidence_ref` and `location_hash` never change after creation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IncidentRecord {
    /// Identity that triggered the incident.
    pub owner: Identity,
    /// Evidence id the incident refers to (not validated against evidence).
    pub evidence_ref: Vec<u8>,
    /// Hashed location.
    pub location_hash: Vec<u8>,
    /// Current status.
    pub status: IncidentStatus,
    /// Time of the last trigger or status update.
    pub updated_at: Timestamp,
    /// Optional caller metadata (empty when not supplied).
    pub metadata: Vec<u8>,
}

impl Record for IncidentRecord {
    const FAMILY: Family = Family::Incident;
    const FIELD_COUNT: usize = 6;

    fn to_fields(&self) -> Vec<Vec<u8>> {
        vec![
            self.owner.as_bytes().to_vec(),
            self.evidence_ref.clone(),
            self.location_hash.clone(),
            self.status.as_bytes().to_vec(),
            self.updated_at.to_be_bytes().to_vec(),
            self.metadata.clone(),
        ]
    }

    fn from_fields(fields: Vec<Vec<u8>>) -> Result<Self, CodecError> {
        let [owner, evidence_ref, location_hash, status, updated_at, metadata] =
            take_fields(fields)?;
        Ok(Self {
            owner: Identity(owner),
            evidence_ref,
            location_hash,
            status: IncidentStatus::from_bytes(&status),
            updated_at: take_timestamp(&updated_at, 4)?,
            metadata,
        })
    }
}

// =============================================================================
// PROFILE
// =============================================================================

/// User profile. The owner is the record key, not a stored field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProfileRecord {
    /// Caller-chosen id, fixed at registration.
    pub profile_id: Vec<u8>,
    /// Opaque profile blob (hashed or encrypted by the client).
    pub payload: Vec<u8>,
    /// Time of registration or last update.
    pub updated_at: Timestamp,
}

impl Record for ProfileRecord {
    const FAMILY: Family = Family::Profile;
    const FIELD_COUNT: usize = 3;

    fn to_fields(&self) -> Vec<Vec<u8>> {
        vec![
            self.profile_id.clone(),
            self.payload.clone(),
            self.updated_at.to_be_bytes().to_vec(),
        ]
    }

    fn from_fields(fields: Vec<Vec<u8>>) -> Result<Self, CodecError> {
        let [profile_id, payload, updated_at] = take_fields(fields)?;
        Ok(Self {
            profile_id,
            payload,
            updated_at: take_timestamp(&updated_at, 2)?,
        })
    }
}

// =============================================================================
// STORED RECORD
// =============================================================================

/// A decoded record returned by a read, tagged with its family and key id.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StoredRecord {
    /// Evidence read by id.
    Evidence {
        /// Evidence id.
        id: Vec<u8>,
        /// Decoded record.
        record: EvidenceRecord,
    },
    /// Incident read by id.
    Incident {
        /// Incident id.
        id: Vec<u8>,
        /// Decoded record.
        record: IncidentRecord,
    },
    /// Profile read by owner.
    Profile {
        /// Profile owner (the key).
        owner: Identity,
        /// Decoded record.
        record: ProfileRecord,
    },
}

impl StoredRecord {
    /// Stored fields of the wrapped record, in storage order.
    #[must_use]
    pub fn fields(&self) -> Vec<Vec<u8>> {
        match self {
            Self::Evidence { record, .. } => record.to_fields(),
            Self::Incident { record, .. } => record.to_fields(),
            Self::Profile { record, .. } => record.to_fields(),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
