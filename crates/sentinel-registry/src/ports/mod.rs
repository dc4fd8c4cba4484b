//! # Ports Layer (Hexagonal Architecture)
//!
//! - `inbound`: the program API the host drives
//! - `outbound`: record storage, event emission and the host clock

pub mod inbound;
pub mod outbound;

pub use inbound::*;
pub use outbound::*;
