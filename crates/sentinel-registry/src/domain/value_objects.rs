//! # Value Objects
//!
//! Immutable primitives shared by every record family.
//! These types represent concepts that are defined by their value, not identity.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Writes `bytes` as text when every byte is printable ASCII, otherwise as
/// `0x`-prefixed hex.
fn fmt_opaque(bytes: &[u8], f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if !bytes.is_empty() && bytes.iter().all(|b| b.is_ascii_graphic()) {
        // All graphic ASCII, so this cannot fail.
        f.write_str(std::str::from_utf8(bytes).unwrap_or_default())
    } else {
        write!(f, "0x{}", hex::encode(bytes))
    }
}

// =============================================================================
// IDENTITY
// =============================================================================

/// Opaque, comparable caller identity (an account address on the host ledger).
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct Identity(pub Vec<u8>);

impl Identity {
    /// Creates an identity from raw bytes.
    #[must_use]
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    /// Returns the underlying bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Returns true if the identity carries no bytes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Identity(")?;
        fmt_opaque(&self.0, f)?;
        write!(f, ")")
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_opaque(&self.0, f)
    }
}

impl From<&str> for Identity {
    fn from(s: &str) -> Self {
        Self(s.as_bytes().to_vec())
    }
}

impl From<&[u8]> for Identity {
    fn from(bytes: &[u8]) -> Self {
        Self(bytes.to_vec())
    }
}

impl From<Vec<u8>> for Identity {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

// =============================================================================
// TIMESTAMP
// =============================================================================

/// Host-supplied monotonic timestamp, in seconds.
///
/// Stored and emitted as an 8-byte big-endian integer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct Timestamp(pub u64);

impl Timestamp {
    /// Encoded width in bytes.
    pub const ENCODED_LEN: usize = 8;

    /// Creates a timestamp from a count of seconds.
    #[must_use]
    pub const fn from_secs(secs: u64) -> Self {
        Self(secs)
    }

    /// Returns the count of seconds.
    #[must_use]
    pub const fn as_secs(&self) -> u64 {
        self.0
    }

    /// Big-endian encoding used in stored values and events.
    #[must_use]
    pub const fn to_be_bytes(&self) -> [u8; 8] {
        self.0.to_be_bytes()
    }

    /// Decodes an 8-byte big-endian slice. Returns None if wrong length.
    #[must_use]
    pub fn from_be_slice(slice: &[u8]) -> Option<Self> {
        let bytes: [u8; 8] = slice.try_into().ok()?;
        Some(Self(u64::from_be_bytes(bytes)))
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}s", self.0)
    }
}

// =============================================================================
// RECORD FAMILY
// =============================================================================

/// One of the three record families, each deployed as its own program.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Family {
    /// Evidence submissions (`evi:` keys).
    Evidence,
    /// Incident reports (`inc:` keys).
    Incident,
    /// User profiles (`profile:` keys, one per identity).
    Profile,
}

impl Family {
    /// All families, in deployment order.
    pub const ALL: [Family; 3] = [Family::Evidence, Family::Incident, Family::Profile];

    /// Key namespace prefix for this family.
    #[must_use]
    pub const fn namespace(&self) -> &'static [u8] {
        match self {
            Self::Evidence => b"evi:",
            Self::Incident => b"inc:",
            Self::Profile => b"profile:",
        }
    }

    /// Lowercase family name, used in logs and metric labels.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Evidence => "evidence",
            Self::Incident => "incident",
            Self::Profile => "profile",
        }
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// RECORD KEY
// =============================================================================

/// Storage key: `namespace ++ identifier`.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RecordKey(Vec<u8>);

impl RecordKey {
    /// Builds the key for `id` inside `family`'s namespace.
    #[must_use]
    pub fn new(family: Family, id: &[u8]) -> Self {
        let namespace = family.namespace();
        let mut key = Vec::with_capacity(namespace.len() + id.len());
        key.extend_from_slice(namespace);
        key.extend_from_slice(id);
        Self(key)
    }

    /// Wraps already-namespaced key bytes.
    #[must_use]
    pub fn from_raw(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    /// Returns the full key bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Key length in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true for the empty key.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for RecordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RecordKey(")?;
        fmt_opaque(&self.0, f)?;
        write!(f, ")")
    }
}

impl fmt::Display for RecordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_opaque(&self.0, f)
    }
}

// =============================================================================
// TESTS
// =============================================================================
