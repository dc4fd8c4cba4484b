//! # Domain Layer (Inner Hexagon)
//!
//! Pure record-registry logic: value objects, record schemas, the codec,
//! the authorization guard and the operation table.
//! NO I/O, NO clock, NO storage access.

pub mod codec;
pub mod entities;
pub mod operations;
pub mod policy;
pub mod records;
pub mod services;
pub mod value_objects;

pub use entities::*;
pub use operations::*;
pub use policy::*;
pub use records::*;
pub use services::*;
pub use value_objects::*;
