//! Project metadata entity model and input DTO.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use vx_core::metadata::MetadataFields;
use vx_core::types::{DbId, Timestamp};

/// A row from the `project_metadata` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProjectMetadata {
    pub id: DbId,
    pub project_id: DbId,
    pub icon: String,
    pub description: String,
    /// Zero-based position within the project's metadata list.
    pub position: i32,
    pub created_at: Timestamp,
}

/// A metadata entry as submitted by a client.
///
/// Both keys are required, though either may be an empty string. Any `id`
/// sent along with an entry is ignored: updates replace the whole list
/// rather than patching individual rows.
#[derive(Debug, Clone, Deserialize)]
pub struct MetadataInput {
    pub icon: String,
    pub description: String,
}

impl MetadataFields for MetadataInput {
    fn icon(&self) -> &str {
        &self.icon
    }

    fn description(&self) -> &str {
        &self.description
    }
}
