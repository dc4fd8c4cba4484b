//! # Authorization Guard
//!
//! Caller-eligibility predicates evaluated before a handler applies effects.
//! The guard only looks at the caller, the program admin and the record
//! owner; it never inspects record content.

use crate::domain::value_objects::Identity;
use std::fmt;

/// Policy declared statically by an operation, before the owner is known.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PolicyKind {
    /// Anyone may call.
    Open,
    /// Only the program admin.
    AdminOnly,
    /// Only the record owner.
    OwnerOnly,
    /// The program admin or the record owner.
    AdminOrOwner,
}

impl PolicyKind {
    /// Binds the declared kind to a concrete record owner.
    #[must_use]
    pub fn bind(self, owner: &Identity) -> Policy<'_> {
        match self {
            Self::Open => Policy::Open,
            Self::AdminOnly => Policy::AdminOnly,
            Self::OwnerOnly => Policy::OwnerOnly(owner),
            Self::AdminOrOwner => Policy::AdminOrOwner(owner),
        }
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Open => "open",
            Self::AdminOnly => "admin-only",
            Self::OwnerOnly => "owner-only",
            Self::AdminOrOwner => "admin-or-owner",
        };
        f.write_str(name)
    }
}

/// A policy bound to the record it guards.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Policy<'a> {
    /// Always satisfied.
    Open,
    /// `caller == admin`.
    AdminOnly,
    /// `caller == owner`.
    OwnerOnly(&'a Identity),
    /// `caller == admin || caller == owner`.
    AdminOrOwner(&'a Identity),
}

/// Evaluates `policy` for `caller`.
#[must_use]
pub fn authorize(caller: &Identity, admin: &Identity, policy: &Policy<'_>) -> bool {
    match policy {
        Policy::Open => true,
        Policy::AdminOnly => caller == admin,
        Policy::OwnerOnly(owner) => caller == *owner,
        Policy::AdminOrOwner(owner) => caller == admin || caller == *owner,
    }
}

// =============================================================================
// TESTS
// =============================================================================
