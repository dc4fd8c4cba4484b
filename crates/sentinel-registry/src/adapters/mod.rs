//! # Adapters Layer (Outer Hexagon)
//!
//! In-memory implementations of the outbound ports plus the ledger host
//! that wires them into atomic calls.

pub mod clock;
pub mod event_buffer;
pub mod ledger;
pub mod memory_store;
pub mod staged;

pub use clock::*;
pub use event_buffer::*;
pub use ledger::*;
pub use memory_store::*;
pub use staged::*;
