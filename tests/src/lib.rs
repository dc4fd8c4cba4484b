//! # Sentinel Test Suite
//!
//! Scenario tests that drive the three registry programs through the
//! in-memory ledger, plus criterion benchmarks.
//!
//! ## Structure
//!
//! ```text
//! tests/
//! ├── src/integration/   # Cross-family scenarios on one ledger
//! │   ├── evidence_flows.rs
//! │   ├── incident_flows.rs
//! │   ├── profile_flows.rs
//! │   ├── atomicity.rs
//! │   ├── lifecycle.rs
//! │   ├── random_walk.rs
//! │   └── script_replay.rs
//! └── benches/           # criterion benchmarks
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p sentinel-tests
//! cargo test -p sentinel-tests integration::atomicity
//! cargo bench -p sentinel-tests
//! ```

#![allow(dead_code)]

pub mod integration;
