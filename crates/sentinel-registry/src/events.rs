//! # Event Schema
//!
//! Structured log entries emitted by the registry programs. Each accepted
//! state-changing, verify or read call emits exactly one event; rejected
//! calls emit none.
//!
//! ## Line Format
//!
//! `Tag|field|field|...`, fields joined by `|` as raw bytes. Timestamps are
//! 8-byte big-endian seconds, verification results are `true` / `false`, and
//! read events carry the stored record's fields in storage order.
//!
//! | Tag | Fields |
//! |-----|--------|
//! | `EvidenceSubmitted` | id, submitter, timestamp |
//! | `EvidenceVerified` | id, `true`/`false` |
//! | `EvidenceRead` | id, stored fields |
//! | `EvidenceRevoked` | id |
//! | `IncidentTriggered` | id, owner, timestamp |
//! | `IncidentUpdated` | id, new status, timestamp |
//! | `IncidentRead` | id, stored fields |
//! | `ProfileRegistered` | owner, profile id, timestamp |
//! | `ProfileUpdated` | owner, timestamp |
//! | `ProfileRead` | owner, stored fields |
//! | `ProfileRevoked` | owner |

use crate::domain::value_objects::{Identity, Timestamp};
use std::fmt;

/// Field separator in rendered lines.
pub const FIELD_SEPARATOR: u8 = b'|';

/// One registry event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RegistryEvent {
    /// Evidence created.
    EvidenceSubmitted {
        /// Evidence id.
        id: Vec<u8>,
        /// Submitting identity.
        submitter: Identity,
        /// Creation time.
        timestamp: Timestamp,
    },
    /// Evidence hash compared.
    EvidenceVerified {
        /// Evidence id.
        id: Vec<u8>,
        /// Whether the candidate matched.
        matched: bool,
    },
    /// Evidence read.
    EvidenceRead {
        /// Evidence id.
        id: Vec<u8>,
        /// Stored fields.
        record: Vec<Vec<u8>>,
    },
    /// Evidence deleted by the admin.
    EvidenceRevoked {
        /// Evidence id.
        id: Vec<u8>,
    },
    /// Incident created.
    IncidentTriggered {
        /// Incident id.
        id: Vec<u8>,
        /// Triggering identity.
        owner: Identity,
        /// Creation time.
        timestamp: Timestamp,
    },
    /// Incident status changed.
    IncidentUpdated {
        /// Incident id.
        id: Vec<u8>,
        /// New status bytes.
        status: Vec<u8>,
        /// Update time.
        timestamp: Timestamp,
    },
    /// Incident read.
    IncidentRead {
        /// Incident id.
        id: Vec<u8>,
        /// Stored fields.
        record: Vec<Vec<u8>>,
    },
    /// Profile created.
    ProfileRegistered {
        /// Profile owner.
        owner: Identity,
        /// Caller-chosen profile id.
        profile_id: Vec<u8>,
        /// Registration time.
        timestamp: Timestamp,
    },
    /// Profile payload replaced.
    ProfileUpdated {
        /// Profile owner.
        owner: Identity,
        /// Update time.
        timestamp: Timestamp,
    },
    /// Profile read.
    ProfileRead {
        /// Profile owner.
        owner: Identity,
        /// Stored fields.
        record: Vec<Vec<u8>>,
    },
    /// Profile deleted by its owner.
    ProfileRevoked {
        /// Profile owner.
        owner: Identity,
    },
}

impl RegistryEvent {
    /// Event tag (first element of the rendered line).
    #[must_use]
    pub const fn tag(&self) -> &'static str {
        match self {
            Self::EvidenceSubmitted { .. } => "EvidenceSubmitted",
            Self::EvidenceVerified { .. } => "EvidenceVerified",
            Self::EvidenceRead { .. } => "EvidenceRead",
            Self::EvidenceRevoked { .. } => "EvidenceRevoked",
            Self::IncidentTriggered { .. } => "IncidentTriggered",
            Self::IncidentUpdated { .. } => "IncidentUpdated",
            Self::IncidentRead { .. } => "IncidentRead",
            Self::ProfileRegistered { .. } => "ProfileRegistered",
            Self::ProfileUpdated { .. } => "ProfileUpdated",
            Self::ProfileRead { .. } => "ProfileRead",
            Self::ProfileRevoked { .. } => "ProfileRevoked",
        }
    }

    /// Event fields after the tag, as emitted.
    #[must_use]
    pub fn fields(&self) -> Vec<Vec<u8>> {
        fn with_record(head: &[u8], record: &[Vec<u8>]) -> Vec<Vec<u8>> {
            let mut fields = Vec::with_capacity(record.len() + 1);
            fields.push(head.to_vec());
            fields.extend(record.iter().cloned());
            fields
        }

        match self {
            Self::EvidenceSubmitted {
                id,
                submitter,
                timestamp,
            } => vec![
                id.clone(),
                submitter.as_bytes().to_vec(),
                timestamp.to_be_bytes().to_vec(),
            ],
            Self::EvidenceVerified { id, matched } => {
                let verdict: &[u8] = if *matched { b"true" } else { b"false" };
                vec![id.clone(), verdict.to_vec()]
            }
            Self::EvidenceRead { id, record } | Self::IncidentRead { id, record } => {
                with_record(id, record)
            }
            Self::EvidenceRevoked { id } => vec![id.clone()],
            Self::IncidentTriggered {
                id,
                owner,
                timestamp,
            } => vec![
                id.clone(),
                owner.as_bytes().to_vec(),
                timestamp.to_be_bytes().to_vec(),
            ],
            Self::IncidentUpdated {
                id,
                status,
                timestamp,
            } => vec![id.clone(), status.clone(), timestamp.to_be_bytes().to_vec()],
            Self::ProfileRegistered {
                owner,
                profile_id,
                timestamp,
            } => vec![
                owner.as_bytes().to_vec(),
                profile_id.clone(),
                timestamp.to_be_bytes().to_vec(),
            ],
            Self::ProfileUpdated { owner, timestamp } => {
                vec![owner.as_bytes().to_vec(), timestamp.to_be_bytes().to_vec()]
            }
            Self::ProfileRead { owner, record } => with_record(owner.as_bytes(), record),
            Self::ProfileRevoked { owner } => vec![owner.as_bytes().to_vec()],
        }
    }

    /// Rendered log line: tag and fields joined by `|`.
    #[must_use]
    pub fn to_line(&self) -> Vec<u8> {
        let mut line = self.tag().as_bytes().to_vec();
        for field in self.fields() {
            line.push(FIELD_SEPARATOR);
            line.extend_from_slice(&field);
        }
        line
    }
}

/// Human-readable rendering for logs: timestamps in decimal, opaque fields
/// as text when printable and hex otherwise.
impl fmt::Display for RegistryEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let timestamp = self.timestamp();
        f.write_str(self.tag())?;
        for field in self.fields() {
            f.write_str("|")?;
            if let Some(ts) = timestamp.filter(|ts| ts.to_be_bytes()[..] == field[..]) {
                write!(f, "{}", ts.as_secs())?;
            } else if field.iter().all(u8::is_ascii_graphic) {
                f.write_str(&String::from_utf8_lossy(&field))?;
            } else {
                write!(f, "0x{}", hex::encode(&field))?;
            }
        }
        Ok(())
    }
}

impl RegistryEvent {
    /// Timestamp carried by the event, if any.
    #[must_use]
    pub const fn timestamp(&self) -> Option<Timestamp> {
        match self {
            Self::EvidenceSubmitted { timestamp, .. }
            | Self::IncidentTriggered { timestamp, .. }
            | Self::IncidentUpdated { timestamp, .. }
            | Self::ProfileRegistered { timestamp, .. }
            | Self::ProfileUpdated { timestamp, .. } => Some(*timestamp),
            _ => None,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
