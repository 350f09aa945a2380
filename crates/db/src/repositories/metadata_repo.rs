//! Repository for the `project_metadata` table.

use sqlx::PgConnection;
use vx_core::metadata::retain_filled;
use vx_core::types::DbId;

use crate::models::metadata::{MetadataInput, ProjectMetadata};

const COLUMNS: &str = "id, project_id, icon, description, position, created_at";

/// Provides bulk operations on a project's metadata list.
pub struct MetadataRepo;

impl MetadataRepo {
    /// Insert the non-blank entries of `items` for a project.
    ///
    /// Entries whose icon and description are both blank are skipped.
    /// Positions are assigned from 0 in input order over the kept entries.
    /// Returns the number of rows inserted.
    pub async fn insert_many(
        conn: &mut PgConnection,
        project_id: DbId,
        items: &[MetadataInput],
    ) -> Result<u64, sqlx::Error> {
        let kept = retain_filled(items);
        if kept.is_empty() {
            return Ok(0);
        }

        let icons: Vec<&str> = kept.iter().map(|m| m.icon.as_str()).collect();
        let descriptions: Vec<&str> = kept.iter().map(|m| m.description.as_str()).collect();
        let positions = positions(kept.len())?;

        let result = sqlx::query(
            "INSERT INTO project_metadata (project_id, icon, description, position) \
             SELECT $1, icon, description, position \
             FROM UNNEST($2::text[], $3::text[], $4::int[]) AS t(icon, description, position)",
        )
        .bind(project_id)
        .bind(&icons)
        .bind(&descriptions)
        .bind(&positions)
        .execute(conn)
        .await?;

        Ok(result.rows_affected())
    }

    /// Delete every metadata row of a project. Returns the number removed.
    pub async fn delete_for_project(
        conn: &mut PgConnection,
        project_id: DbId,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM project_metadata WHERE project_id = $1")
            .bind(project_id)
            .execute(conn)
            .await?;
        Ok(result.rows_affected())
    }

    /// List the metadata of several projects, ordered by project then position.
    pub async fn list_for_projects(
        conn: &mut PgConnection,
        project_ids: &[DbId],
    ) -> Result<Vec<ProjectMetadata>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM project_metadata \
             WHERE project_id = ANY($1) \
             ORDER BY project_id, position, id"
        );
        sqlx::query_as::<_, ProjectMetadata>(&query)
            .bind(project_ids)
            .fetch_all(conn)
            .await
    }
}

/// Zero-based positions for `len` entries. The column is `INT`.
fn positions(len: usize) -> Result<Vec<i32>, sqlx::Error> {
    let len = i32::try_from(len).map_err(|e| sqlx::Error::Encode(Box::new(e)))?;
    Ok((0..len).collect())
}
