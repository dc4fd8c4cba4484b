//! # Domain Services
//!
//! Pure helpers shared by handlers and clients.

use sha2::{Digest, Sha256};

/// Lowercase hex SHA-256 of `content`.
///
/// Clients compute this before `submit_evidence` and `verify_evidence`. The
/// registry itself never hashes content: it compares what callers assert.
#[must_use]
pub fn content_hash_hex(content: &[u8]) -> String {
    hex::encode(Sha256::digest(content))
}

/// Byte-exact comparison of a stored hash with a candidate.
#[must_use]
pub fn hashes_match(stored: &[u8], candidate: &[u8]) -> bool {
    stored == candidate
}
