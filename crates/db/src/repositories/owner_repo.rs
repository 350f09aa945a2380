//! Repository for the `owners` table.

use sqlx::PgConnection;
use vx_core::types::DbId;

use crate::models::owner::Owner;

const COLUMNS: &str = "id, name, email, created_at, updated_at";

/// Provides upsert and lookup operations for owners.
pub struct OwnerRepo;

impl OwnerRepo {
    /// Insert an owner keyed by email, or overwrite the name of the
    /// existing owner with that email. Returns the resulting row.
    pub async fn upsert_by_email(
        conn: &mut PgConnection,
        name: &str,
        email: &str,
    ) -> Result<Owner, sqlx::Error> {
        let query = format!(
            "INSERT INTO owners (name, email) \
             VALUES ($1, $2) \
             ON CONFLICT (email) DO UPDATE SET name = EXCLUDED.name \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Owner>(&query)
            .bind(name)
            .bind(email)
            .fetch_one(conn)
            .await
    }

    /// Fetch all owners whose id is in `ids`.
    pub async fn list_by_ids(
        conn: &mut PgConnection,
        ids: &[DbId],
    ) -> Result<Vec<Owner>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM owners WHERE id = ANY($1)");
        sqlx::query_as::<_, Owner>(&query)
            .bind(ids)
            .fetch_all(conn)
            .await
    }
}
