//! Integration tests for the project repository.
//!
//! Exercises the full repository layer against a real database:
//! - Owner upsert by email on create and update
//! - Blank metadata filtering
//! - Wholesale metadata replacement on update
//! - Metadata removal on delete
//! - Rollback of a failed update, and lock ordering between update and delete
//! - Ordering of the project list

use std::time::Duration;

use sqlx::PgPool;
use vx_db::models::metadata::MetadataInput;
use vx_db::models::project::{CreateProject, UpdateProject};
use vx_db::repositories::ProjectRepo;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn item(icon: &str, description: &str) -> MetadataInput {
    MetadataInput {
        icon: icon.to_string(),
        description: description.to_string(),
    }
}

fn new_project(name: &str, email: &str, metadata: Vec<MetadataInput>) -> CreateProject {
    CreateProject {
        name: name.to_string(),
        owner_name: "Ada Lovelace".to_string(),
        owner_email: email.to_string(),
        metadata,
    }
}

fn replacement(name: &str, email: &str, metadata: Vec<MetadataInput>) -> UpdateProject {
    UpdateProject {
        name: name.to_string(),
        owner_name: "Grace Hopper".to_string(),
        owner_email: email.to_string(),
        metadata,
    }
}

async fn owner_count(pool: &PgPool) -> i64 {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM owners")
        .fetch_one(pool)
        .await
        .unwrap();
    count
}

async fn owners_with_email(pool: &PgPool, email: &str) -> i64 {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM owners WHERE email = $1")
        .bind(email)
        .fetch_one(pool)
        .await
        .unwrap();
    count
}

async fn metadata_count(pool: &PgPool, project_id: i64) -> i64 {
    let (count,): (i64,) =
        sqlx::query_as("SELECT COUNT(*) FROM project_metadata WHERE project_id = $1")
            .bind(project_id)
            .fetch_one(pool)
            .await
            .unwrap();
    count
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_returns_relations(pool: PgPool) {
    let input = new_project(
        "Explorer",
        "ada@example.com",
        vec![item("🚀", "Mainnet"), item("📄", "Docs")],
    );
    let created = ProjectRepo::create(&pool, &input).await.unwrap();

    assert_eq!(created.project.name, "Explorer");
    assert_eq!(created.owner.email, "ada@example.com");
    assert_eq!(created.owner.name, "Ada Lovelace");
    assert_eq!(created.project.owner_id, created.owner.id);

    let described: Vec<&str> = created
        .metadata
        .iter()
        .map(|m| m.description.as_str())
        .collect();
    assert_eq!(described, vec!["Mainnet", "Docs"]);
    assert_eq!(created.metadata[0].position, 0);
    assert_eq!(created.metadata[1].position, 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_reuses_owner_by_email(pool: PgPool) {
    let first = ProjectRepo::create(&pool, &new_project("A", "same@example.com", vec![]))
        .await
        .unwrap();

    let mut second_input = new_project("B", "same@example.com", vec![]);
    second_input.owner_name = "Renamed".to_string();
    let second = ProjectRepo::create(&pool, &second_input).await.unwrap();

    assert_eq!(first.owner.id, second.owner.id);
    assert_eq!(second.owner.name, "Renamed");
    assert_eq!(owner_count(&pool).await, 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_filters_blank_metadata(pool: PgPool) {
    let input = new_project(
        "Filtered",
        "ada@example.com",
        vec![
            item("", ""),
            item("⭐", ""),
            item("   ", " "),
            item("", "description only"),
            item("⭐", ""),
        ],
    );
    let created = ProjectRepo::create(&pool, &input).await.unwrap();

    assert_eq!(created.metadata.len(), 4);
    let positions: Vec<i32> = created.metadata.iter().map(|m| m.position).collect();
    assert_eq!(positions, vec![0, 1, 2, 3]);
    assert_eq!(created.metadata[1].icon, "   ");
}

// ---------------------------------------------------------------------------
// Read
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_orders_newest_first(pool: PgPool) {
    for name in ["first", "second", "third"] {
        ProjectRepo::create(&pool, &new_project(name, "ada@example.com", vec![]))
            .await
            .unwrap();
    }

    let names: Vec<String> = ProjectRepo::list(&pool)
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.project.name)
        .collect();
    assert_eq!(names, vec!["third", "second", "first"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_attaches_each_projects_own_metadata(pool: PgPool) {
    ProjectRepo::create(
        &pool,
        &new_project("one", "one@example.com", vec![item("1", "one")]),
    )
    .await
    .unwrap();
    ProjectRepo::create(
        &pool,
        &new_project("two", "two@example.com", vec![item("2", "two"), item("2", "deux")]),
    )
    .await
    .unwrap();

    let projects = ProjectRepo::list(&pool).await.unwrap();
    assert_eq!(projects.len(), 2);
    assert_eq!(projects[0].owner.email, "two@example.com");
    assert_eq!(projects[0].metadata.len(), 2);
    assert_eq!(projects[1].owner.email, "one@example.com");
    assert_eq!(projects[1].metadata.len(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_find_missing_returns_none(pool: PgPool) {
    let found = ProjectRepo::find_by_id(&pool, 999_999).await.unwrap();
    assert!(found.is_none());
}

// ---------------------------------------------------------------------------
// Update
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_replaces_metadata_wholesale(pool: PgPool) {
    let created = ProjectRepo::create(
        &pool,
        &new_project(
            "Original",
            "ada@example.com",
            vec![item("a", "old one"), item("b", "old two"), item("c", "old three")],
        ),
    )
    .await
    .unwrap();
    let id = created.project.id;

    let updated = ProjectRepo::update(
        &pool,
        id,
        &replacement(
            "Renamed",
            "ada@example.com",
            vec![item("x", "new"), item("", "")],
        ),
    )
    .await
    .unwrap()
    .expect("project should exist");

    assert_eq!(updated.project.name, "Renamed");
    assert_eq!(updated.owner.name, "Grace Hopper");
    assert_eq!(updated.metadata.len(), 1);
    assert_eq!(updated.metadata[0].icon, "x");
    assert_eq!(updated.metadata[0].description, "new");

    assert_eq!(metadata_count(&pool, id).await, 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_moves_project_to_new_owner(pool: PgPool) {
    let created = ProjectRepo::create(&pool, &new_project("P", "ada@example.com", vec![]))
        .await
        .unwrap();

    let updated = ProjectRepo::update(
        &pool,
        created.project.id,
        &replacement("P", "grace@example.com", vec![]),
    )
    .await
    .unwrap()
    .unwrap();

    assert_ne!(updated.owner.id, created.owner.id);
    assert_eq!(updated.owner.email, "grace@example.com");
    assert_eq!(owner_count(&pool).await, 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_failed_update_rolls_back(pool: PgPool) {
    let created = ProjectRepo::create(
        &pool,
        &new_project("Stable", "ada@example.com", vec![item("1", "one"), item("2", "two")]),
    )
    .await
    .unwrap();
    let id = created.project.id;

    // Fail the final UPDATE, after the owner upsert and metadata replacement ran.
    sqlx::raw_sql(
        "CREATE FUNCTION reject_project_update() RETURNS trigger AS $$ \
         BEGIN RAISE EXCEPTION 'project updates disabled'; END; \
         $$ LANGUAGE plpgsql; \
         CREATE TRIGGER reject_project_update BEFORE UPDATE ON projects \
         FOR EACH ROW EXECUTE FUNCTION reject_project_update();",
    )
    .execute(&pool)
    .await
    .unwrap();

    let result = ProjectRepo::update(
        &pool,
        id,
        &replacement("Changed", "grace@example.com", vec![item("x", "new")]),
    )
    .await;
    assert!(result.is_err());

    let current = ProjectRepo::find_by_id(&pool, id).await.unwrap().unwrap();
    assert_eq!(current.project.name, "Stable");
    assert_eq!(current.owner.email, "ada@example.com");
    let described: Vec<&str> = current
        .metadata
        .iter()
        .map(|m| m.description.as_str())
        .collect();
    assert_eq!(described, vec!["one", "two"]);
    assert_eq!(owners_with_email(&pool, "grace@example.com").await, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_missing_changes_nothing(pool: PgPool) {
    let result = ProjectRepo::update(
        &pool,
        999_999,
        &replacement("Ghost", "ghost@example.com", vec![item("👻", "boo")]),
    )
    .await
    .unwrap();

    assert!(result.is_none());

    assert_eq!(
        owners_with_email(&pool, "ghost@example.com").await,
        0,
        "a failed update must not upsert the owner"
    );
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_removes_metadata_and_keeps_owner(pool: PgPool) {
    let created = ProjectRepo::create(
        &pool,
        &new_project("Doomed", "ada@example.com", vec![item("1", "a"), item("2", "b")]),
    )
    .await
    .unwrap();
    let id = created.project.id;

    assert!(ProjectRepo::delete(&pool, id).await.unwrap());

    assert_eq!(metadata_count(&pool, id).await, 0);
    assert!(ProjectRepo::find_by_id(&pool, id).await.unwrap().is_none());
    assert_eq!(owner_count(&pool).await, 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_waits_for_concurrent_update(pool: PgPool) {
    let created = ProjectRepo::create(
        &pool,
        &new_project("Contended", "ada@example.com", vec![item("1", "a"), item("2", "b")]),
    )
    .await
    .unwrap();
    let id = created.project.id;

    // Hold the row the way an in-flight update does.
    let mut updater = pool.begin().await.unwrap();
    sqlx::query("SELECT id FROM projects WHERE id = $1 FOR UPDATE")
        .bind(id)
        .execute(&mut *updater)
        .await
        .unwrap();

    let deleter = tokio::spawn({
        let pool = pool.clone();
        async move { ProjectRepo::delete(&pool, id).await }
    });
    tokio::time::sleep(Duration::from_millis(200)).await;
    assert!(!deleter.is_finished(), "delete must wait for the row lock");

    // The updater still gets to replace the metadata without contention.
    sqlx::query("DELETE FROM project_metadata WHERE project_id = $1")
        .bind(id)
        .execute(&mut *updater)
        .await
        .unwrap();
    updater.commit().await.unwrap();

    assert!(deleter.await.unwrap().unwrap());
    assert!(ProjectRepo::find_by_id(&pool, id).await.unwrap().is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_missing_returns_false(pool: PgPool) {
    assert!(!ProjectRepo::delete(&pool, 999_999).await.unwrap());
}

// ---------------------------------------------------------------------------
// Serialization
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_relations_serialize_flat(pool: PgPool) {
    let created = ProjectRepo::create(
        &pool,
        &new_project("Flat", "ada@example.com", vec![item("🔗", "link")]),
    )
    .await
    .unwrap();

    let json = serde_json::to_value(&created).unwrap();
    assert_eq!(json["name"], "Flat");
    assert!(json["id"].is_number());
    assert_eq!(json["owner"]["email"], "ada@example.com");
    assert_eq!(json["metadata"][0]["icon"], "🔗");
}
