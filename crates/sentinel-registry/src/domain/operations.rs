//! # Operation Table
//!
//! Closed set of operations with their static dispatch metadata: owning
//! family, argument arity and declared policy kind.
//!
//! | Operation | Family | Args | Policy |
//! |-----------|--------|------|--------|
//! | `submit_evidence` | evidence | 3 | open |
//! | `verify_evidence` | evidence | 2 | open |
//! | `read_evidence` | evidence | 1 | open |
//! | `revoke_evidence` | evidence | 1 | admin-only |
//! | `trigger_incident` | incident | 3..=4 | open |
//! | `update_incident_status` | incident | 2..=3 | admin-or-owner |
//! | `read_incident` | incident | 1 | open |
//! | `register_profile` | profile | 2 | open |
//! | `update_profile` | profile | 1..=2 | owner-only |
//! | `read_profile` | profile | 1 | open |
//! | `revoke_profile` | profile | 0..=1 | owner-only |

use crate::domain::policy::PolicyKind;
use crate::domain::value_objects::Family;
use std::fmt;

/// Accepted argument count range (operation name excluded).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Arity {
    /// Minimum argument count.
    pub min: usize,
    /// Maximum argument count.
    pub max: usize,
}

impl Arity {
    /// Exactly `n` arguments.
    #[must_use]
    pub const fn exact(n: usize) -> Self {
        Self { min: n, max: n }
    }

    /// Between `min` and `max` arguments, inclusive.
    #[must_use]
    pub const fn range(min: usize, max: usize) -> Self {
        Self { min, max }
    }

    /// Returns true if `count` arguments are accepted.
    #[must_use]
    pub const fn accepts(&self, count: usize) -> bool {
        count >= self.min && count <= self.max
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.min == self.max {
            write!(f, "{}", self.min)
        } else {
            write!(f, "{}..={}", self.min, self.max)
        }
    }
}

/// Every operation any family exposes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Create an evidence record.
    SubmitEvidence,
    /// Compare a candidate hash with stored evidence.
    VerifyEvidence,
    /// Emit an evidence record.
    ReadEvidence,
    /// Delete an evidence record.
    RevokeEvidence,
    /// Create an incident record.
    TriggerIncident,
    /// Change an incident's status.
    UpdateIncidentStatus,
    /// Emit an incident record.
    ReadIncident,
    /// Create the caller's profile.
    RegisterProfile,
    /// Replace a profile payload.
    UpdateProfile,
    /// Emit a profile record.
    ReadProfile,
    /// Delete a profile.
    RevokeProfile,
}

/// Static dispatch metadata for one operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OperationSpec {
    /// The operation.
    pub operation: Operation,
    /// Wire name (first call argument).
    pub name: &'static str,
    /// Family whose program exposes the operation.
    pub family: Family,
    /// Accepted argument count.
    pub arity: Arity,
    /// Declared caller policy.
    pub policy: PolicyKind,
}

/// Dispatch table.
pub static OPERATIONS: [OperationSpec; 11] = [
    OperationSpec {
        operation: Operation::SubmitEvidence,
        name: "submit_evidence",
        family: Family::Evidence,
        arity: Arity::exact(3),
        policy: PolicyKind::Open,
    },
    OperationSpec {
        operation: Operation::VerifyEvidence,
        name: "verify_evidence",
        family: Family::Evidence,
        arity: Arity::exact(2),
        policy: PolicyKind::Open,
    },
    OperationSpec {
        operation: Operation::ReadEvidence,
        name: "read_evidence",
        family: Family::Evidence,
        arity: Arity::exact(1),
        policy: PolicyKind::Open,
    },
    OperationSpec {
        operation: Operation::RevokeEvidence,
        name: "revoke_evidence",
        family: Family::Evidence,
        arity: Arity::exact(1),
        policy: PolicyKind::AdminOnly,
    },
    OperationSpec {
        operation: Operation::TriggerIncident,
        name: "trigger_incident",
        family: Family::Incident,
        arity: Arity::range(3, 4),
        policy: PolicyKind::Open,
    },
    OperationSpec {
        operation: Operation::UpdateIncidentStatus,
        name: "update_incident_status",
        family: Family::Incident,
        arity: Arity::range(2, 3),
        policy: PolicyKind::AdminOrOwner,
    },
    OperationSpec {
        operation: Operation::ReadIncident,
        name: "read_incident",
        family: Family::Incident,
        arity: Arity::exact(1),
        policy: PolicyKind::Open,
    },
    OperationSpec {
        operation: Operation::RegisterProfile,
        name: "register_profile",
        family: Family::Profile,
        arity: Arity::exact(2),
        policy: PolicyKind::Open,
    },
    OperationSpec {
        operation: Operation::UpdateProfile,
        name: "update_profile",
        family: Family::Profile,
        arity: Arity::range(1, 2),
        policy: PolicyKind::OwnerOnly,
    },
    OperationSpec {
        operation: Operation::ReadProfile,
        name: "read_profile",
        family: Family::Profile,
        arity: Arity::exact(1),
        policy: PolicyKind::Open,
    },
    OperationSpec {
        operation: Operation::RevokeProfile,
        name: "revoke_profile",
        family: Family::Profile,
        arity: Arity::range(0, 1),
        policy: PolicyKind::OwnerOnly,
    },
];

impl Operation {
    /// Looks up `name` among the operations exposed by `family`.
    #[must_use]
    pub fn lookup(family: Family, name: &[u8]) -> Option<&'static OperationSpec> {
        OPERATIONS
            .iter()
            .find(|spec| spec.family == family && spec.name.as_bytes() == name)
    }

    /// Static metadata of this operation.
    #[must_use]
    pub fn spec(self) -> &'static OperationSpec {
        // The table holds one entry per variant.
        match OPERATIONS.iter().find(|spec| spec.operation == self) {
            Some(spec) => spec,
            None => unreachable!("operation table is missing {self:?}"),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.spec().name)
    }
}

// =============================================================================
// TESTS
// =============================================================================
