//! Handlers for the `/projects` resource.
//!
//! Every handler requires an authenticated caller ([`SessionUser`]). Bodies
//! arrive through [`ValidatedJson`], so they are checked before any
//! database work.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use vx_core::error::CoreError;
use vx_core::types::DbId;
use vx_db::models::project::{CreateProject, ProjectWithRelations, UpdateProject};
use vx_db::repositories::ProjectRepo;

use crate::error::{AppError, AppResult};
use crate::extract::ValidatedJson;
use crate::middleware::auth::SessionUser;
use crate::response::{MessageResponse, ProjectMutation};
use crate::state::AppState;

/// POST /api/v1/projects
pub async fn create(
    user: SessionUser,
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<CreateProject>,
) -> AppResult<(StatusCode, Json<ProjectMutation<ProjectWithRelations>>)> {
    let project = ProjectRepo::create(&state.pool, &input).await?;
    tracing::info!(
        project_id = project.project.id,
        user_id = %user.id,
        "Project created"
    );
    Ok((StatusCode::CREATED, Json(ProjectMutation::ok(project))))
}

/// GET /api/v1/projects
pub async fn list(
    _user: SessionUser,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<ProjectWithRelations>>> {
    let projects = ProjectRepo::list(&state.pool).await?;
    Ok(Json(projects))
}

/// GET /api/v1/projects/{id}
pub async fn get_by_id(
    _user: SessionUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<ProjectWithRelations>> {
    let project = ProjectRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(CoreError::project_not_found(id))?;
    Ok(Json(project))
}

/// PUT /api/v1/projects/{id}
pub async fn update(
    user: SessionUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    ValidatedJson(input): ValidatedJson<UpdateProject>,
) -> AppResult<Json<ProjectMutation<ProjectWithRelations>>> {
    let project = ProjectRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(CoreError::project_not_found(id))?;
    tracing::info!(project_id = id, user_id = %user.id, "Project updated");
    Ok(Json(ProjectMutation::ok(project)))
}

/// DELETE /api/v1/projects/{id}
pub async fn delete(
    user: SessionUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<MessageResponse>> {
    if !ProjectRepo::delete(&state.pool, id).await? {
        return Err(AppError::from(CoreError::project_not_found(id)));
    }
    tracing::info!(project_id = id, user_id = %user.id, "Project deleted");
    Ok(Json(MessageResponse {
        success: true,
        message: "Project deleted successfully",
    }))
}
