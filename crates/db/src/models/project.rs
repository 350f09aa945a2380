//! Project entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;
use vx_core::types::{DbId, Timestamp};

use crate::models::metadata::{MetadataInput, ProjectMetadata};
use crate::models::owner::Owner;

/// A project row from the `projects` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Project {
    pub id: DbId,
    pub name: String,
    pub owner_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A project with its owner and ordered metadata list.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectWithRelations {
    #[serde(flatten)]
    pub project: Project,
    pub owner: Owner,
    pub metadata: Vec<ProjectMetadata>,
}

/// DTO for creating a new project.
///
/// The owner is upserted by `owner_email`; an existing owner's name is
/// overwritten with `owner_name`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateProject {
    #[validate(length(min = 1, message = "Project name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "Owner name is required"))]
    pub owner_name: String,
    #[validate(email(message = "Valid email is required"))]
    pub owner_email: String,
    #[serde(default)]
    pub metadata: Vec<MetadataInput>,
}

/// DTO for replacing a project's fields and metadata list.
///
/// Every field is required: the metadata list replaces the stored one
/// wholesale, so an omitted list clears it.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateProject {
    #[validate(length(min = 1, message = "Project name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "Owner name is required"))]
    pub owner_name: String,
    #[validate(email(message = "Valid email is required"))]
    pub owner_email: String,
    #[serde(default)]
    pub metadata: Vec<MetadataInput>,
}
