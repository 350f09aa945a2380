//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods. Methods
//! that take part in a larger write accept `&mut PgConnection` so callers
//! can run them inside one transaction; top-level operations accept
//! `&PgPool` and manage their own transaction.

pub mod metadata_repo;
pub mod owner_repo;
pub mod project_repo;

pub use metadata_repo::MetadataRepo;
pub use owner_repo::OwnerRepo;
pub use project_repo::ProjectRepo;
