//! Domain primitives shared by the VX server crates.
//!
//! Holds id and timestamp aliases, the domain error type, input validation
//! helpers, and the project metadata rules that both the repository layer
//! and the HTTP layer depend on.

pub mod error;
pub mod metadata;
pub mod types;
pub mod validation;
