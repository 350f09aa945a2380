//! Domain model structs and DTOs.
//!
//! Each submodule contains a `FromRow` + `Serialize` entity struct matching
//! the database row. Input DTOs live next to the entity they create.

pub mod metadata;
pub mod owner;
pub mod project;
