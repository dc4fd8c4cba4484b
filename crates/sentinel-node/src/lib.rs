//! # Sentinel Node
//!
//! Host simulator for the Sentinel registry programs. Deploys evidence,
//! incident and profile programs on an in-memory ledger, replays a JSON call
//! script against them and reports events, rejections and metrics.
//!
//! | Module | Role |
//! |--------|------|
//! | [`config`] | Environment and command-line configuration |
//! | [`script`] | Call script schema and argument decoding |
//! | [`runner`] | Script execution against the ledger |

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

pub mod config;
pub mod runner;
pub mod script;

pub use config::{Cli, ConfigError, NodeConfig};
pub use runner::{RunSummary, Runner};
pub use script::{Script, ScriptError, Step};

/// Script replayed when no `--script` is given.
pub const DEMO_SCRIPT: &str = include_str!("../scripts/demo.json");
