//! Owner entity model.

use serde::Serialize;
use sqlx::FromRow;
use vx_core::types::{DbId, Timestamp};

/// A row from the `owners` table. `email` is the natural key.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Owner {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
