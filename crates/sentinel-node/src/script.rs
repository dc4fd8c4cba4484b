//! # Call Scripts
//!
//! JSON description of a ledger session: program deployments, clock moves
//! and calls with optional expected outcomes.
//!
//! ```json
//! { "start_time": 1700000000,
//!   "steps": [
//!     { "action": "deploy", "name": "ev", "family": "evidence", "creator": "ADMIN" },
//!     { "action": "call", "program": "ev", "caller": "B",
//!       "op": "submit_evidence", "args": ["E1", "cid", "sha256:payload"] } ] }
//! ```
//!
//! ## Argument Encoding
//!
//! | Prefix | Bytes passed to the program |
//! |--------|-----------------------------|
//! | `sha256:` | lowercase hex SHA-256 digest of the rest |
//! | `hex:` | hex-decoded rest |
//! | none | the string as UTF-8 |

use std::fs;
use std::path::Path;

use sentinel_registry::domain::entities::{Invocation, OnCompletion};
use sentinel_registry::domain::services::content_hash_hex;
use sentinel_registry::domain::value_objects::Family;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Script loading and decoding errors.
#[derive(Debug, Error)]
pub enum ScriptError {
    /// The script file could not be read.
    #[error("failed to read script: {0}")]
    Io(#[from] std::io::Error),

    /// The script is not valid JSON for the step schema.
    #[error("invalid script: {0}")]
    Parse(#[from] serde_json::Error),

    /// A `hex:` argument holds invalid hex.
    #[error("argument {arg:?} is not valid hex: {source}")]
    BadHex {
        /// The offending argument.
        arg: String,
        /// Decoder error.
        source: hex::FromHexError,
    },

    /// A call step names an operation together with a lifecycle completion.
    #[error("step {index}: operation {op:?} given with completion {completion:?}")]
    OperationWithLifecycle {
        /// Step position.
        index: usize,
        /// Operation name.
        op: String,
        /// Completion kind.
        completion: OnCompletion,
    },
}

/// A complete call script.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Script {
    /// Ledger clock at the start of the run, in seconds.
    #[serde(default)]
    pub start_time: u64,
    /// Steps, executed in order.
    pub steps: Vec<Step>,
}

/// One script step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Step {
    /// Deploy a program and bind it to `name`.
    Deploy {
        /// Script-local program name.
        name: String,
        /// Record family the program serves.
        family: Family,
        /// Deploying identity; becomes admin.
        creator: String,
    },
    /// Move the clock forward.
    Advance {
        /// Seconds to add.
        secs: u64,
    },
    /// Set the clock to an absolute time.
    SetTime {
        /// New time in seconds.
        at: u64,
    },
    /// Call a deployed program.
    Call {
        /// Script-local program name.
        program: String,
        /// Calling identity.
        caller: String,
        /// Operation name for `no_op` calls.
        #[serde(default)]
        op: Option<String>,
        /// Operation arguments, see the module docs for prefixes.
        #[serde(default)]
        args: Vec<String>,
        /// Completion kind.
        #[serde(default)]
        completion: OnCompletion,
        /// `"ok"` or a rejection reason such as `"not_found"`.
        #[serde(default)]
        expect: Option<String>,
    },
}

impl Script {
    /// Parse a script from JSON text.
    pub fn from_json(text: &str) -> Result<Self, ScriptError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Read and parse a script file.
    pub fn load(path: &Path) -> Result<Self, ScriptError> {
        Self::from_json(&fs::read_to_string(path)?)
    }

    /// Number of call steps.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.steps
            .iter()
            .filter(|step| matches!(step, Step::Call { .. }))
            .count()
    }
}

/// Decode one script argument to program bytes.
pub fn decode_arg(arg: &str) -> Result<Vec<u8>, ScriptError> {
    if let Some(content) = arg.strip_prefix("sha256:") {
        Ok(content_hash_hex(content.as_bytes()).into_bytes())
    } else if let Some(digits) = arg.strip_prefix("hex:") {
        hex::decode(digits).map_err(|source| ScriptError::BadHex {
            arg: arg.to_string(),
            source,
        })
    } else {
        Ok(arg.as_bytes().to_vec())
    }
}

/// Build the invocation for a call step.
pub fn build_invocation(
    index: usize,
    op: Option<&str>,
    args: &[String],
    completion: OnCompletion,
) -> Result<Invocation, ScriptError> {
    let mut decoded = Vec::with_capacity(args.len() + 1);
    match (op, completion) {
        (Some(op), OnCompletion::NoOp) => decoded.push(op.as_bytes().to_vec()),
        (Some(op), completion) => {
            return Err(ScriptError::OperationWithLifecycle {
                index,
                op: op.to_string(),
                completion,
            })
        }
        (None, _) => {}
    }
    for arg in args {
        decoded.push(decode_arg(arg)?);
    }
    Ok(Invocation {
        on_completion: completion,
        args: decoded,
    })
}

// =============================================================================
// TESTS
// =============================================================================
