//! Repository for the `projects` table and its owner/metadata relations.

use std::collections::HashMap;

use sqlx::{PgConnection, PgPool};
use vx_core::types::DbId;

use crate::models::metadata::ProjectMetadata;
use crate::models::project::{CreateProject, Project, ProjectWithRelations, UpdateProject};
use crate::repositories::{MetadataRepo, OwnerRepo};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, owner_id, created_at, updated_at";

/// Provides CRUD operations for projects.
///
/// Every write runs in a single transaction, so a failure part-way through
/// leaves the previous state untouched.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Upsert the owner, insert the project and its non-blank metadata.
    pub async fn create(
        pool: &PgPool,
        input: &CreateProject,
    ) -> Result<ProjectWithRelations, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let owner = OwnerRepo::upsert_by_email(&mut tx, &input.owner_name, &input.owner_email)
            .await?;

        let query = format!(
            "INSERT INTO projects (name, owner_id) \
             VALUES ($1, $2) \
             RETURNING {COLUMNS}"
        );
        let project = sqlx::query_as::<_, Project>(&query)
            .bind(&input.name)
            .bind(owner.id)
            .fetch_one(&mut *tx)
            .await?;

        let inserted = MetadataRepo::insert_many(&mut tx, project.id, &input.metadata).await?;

        let result = Self::with_relations(&mut tx, vec![project])
            .await?
            .pop()
            .ok_or(sqlx::Error::RowNotFound)?;

        tx.commit().await?;
        tracing::debug!(
            project_id = result.project.id,
            owner_id = owner.id,
            metadata = inserted,
            "Project created"
        );
        Ok(result)
    }

    /// List all projects with relations, most recently created first.
    pub async fn list(pool: &PgPool) -> Result<Vec<ProjectWithRelations>, sqlx::Error> {
        let mut conn = pool.acquire().await?;
        let query = format!("SELECT {COLUMNS} FROM projects ORDER BY id DESC");
        let projects = sqlx::query_as::<_, Project>(&query)
            .fetch_all(&mut *conn)
            .await?;
        Self::with_relations(&mut conn, projects).await
    }

    /// Find a project with relations by its internal ID.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ProjectWithRelations>, sqlx::Error> {
        let mut conn = pool.acquire().await?;
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1");
        let project = sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?;

        match project {
            Some(project) => Ok(Self::with_relations(&mut conn, vec![project]).await?.pop()),
            None => Ok(None),
        }
    }

    /// Replace a project's name, owner, and metadata list.
    ///
    /// The project row is locked for the duration of the transaction. The
    /// old metadata is deleted and the new list inserted before commit, so
    /// readers never observe the project without metadata in between.
    ///
    /// Returns `None` (and changes nothing) if no row with `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProject,
    ) -> Result<Option<ProjectWithRelations>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        if Self::lock(&mut tx, id).await?.is_none() {
            return Ok(None);
        }

        let owner = OwnerRepo::upsert_by_email(&mut tx, &input.owner_name, &input.owner_email)
            .await?;

        let removed = MetadataRepo::delete_for_project(&mut tx, id).await?;
        let inserted = MetadataRepo::insert_many(&mut tx, id, &input.metadata).await?;

        let query = format!(
            "UPDATE projects SET name = $2, owner_id = $3 \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        let project = sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(owner.id)
            .fetch_one(&mut *tx)
            .await?;

        let result = Self::with_relations(&mut tx, vec![project]).await?.pop();

        tx.commit().await?;
        tracing::debug!(
            project_id = id,
            owner_id = owner.id,
            removed,
            inserted,
            "Project metadata replaced"
        );
        Ok(result)
    }

    /// Delete a project and its metadata. Returns `true` if a project was removed.
    ///
    /// Takes the project row lock before touching metadata, in the same
    /// order as [`ProjectRepo::update`], so the two never deadlock. Owners
    /// are left in place.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        if Self::lock(&mut tx, id).await?.is_none() {
            return Ok(false);
        }

        let removed = MetadataRepo::delete_for_project(&mut tx, id).await?;
        sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        tracing::debug!(project_id = id, metadata = removed, "Project deleted");
        Ok(true)
    }

    /// Lock the project row for the rest of the transaction.
    async fn lock(conn: &mut PgConnection, id: DbId) -> Result<Option<DbId>, sqlx::Error> {
        sqlx::query_scalar::<_, DbId>("SELECT id FROM projects WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(conn)
            .await
    }

    /// Attach owners and ordered metadata to a batch of projects.
    ///
    /// Preserves the order of `projects`.
    async fn with_relations(
        conn: &mut PgConnection,
        projects: Vec<Project>,
    ) -> Result<Vec<ProjectWithRelations>, sqlx::Error> {
        if projects.is_empty() {
            return Ok(Vec::new());
        }

        let project_ids: Vec<DbId> = projects.iter().map(|p| p.id).collect();
        let owner_ids: Vec<DbId> = projects.iter().map(|p| p.owner_id).collect();

        let owners: HashMap<DbId, _> = OwnerRepo::list_by_ids(conn, &owner_ids)
            .await?
            .into_iter()
            .map(|o| (o.id, o))
            .collect();

        let mut metadata: HashMap<DbId, Vec<ProjectMetadata>> = HashMap::new();
        for item in MetadataRepo::list_for_projects(conn, &project_ids).await? {
            metadata.entry(item.project_id).or_default().push(item);
        }

        projects
            .into_iter()
            .map(|project| -> Result<ProjectWithRelations, sqlx::Error> {
                let owner = owners
                    .get(&project.owner_id)
                    .cloned()
                    .ok_or(sqlx::Error::RowNotFound)?;
                let metadata = metadata.remove(&project.id).unwrap_or_default();
                Ok(ProjectWithRelations {
                    project,
                    owner,
                    metadata,
                })
            })
            .collect()
    }
}
