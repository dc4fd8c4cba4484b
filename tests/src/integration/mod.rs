//! # Integration Scenarios
//!
//! Each module deploys all three families on one in-memory ledger and
//! drives them only through `deploy` and `call`, the way a host would.

pub mod evidence_flows;
pub mod incident_flows;
pub mod lifecycle;
pub mod profile_flows;
pub mod random_walk;
pub mod script_replay;
