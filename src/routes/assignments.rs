use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use diesel::prelude::*;
use uuid::Uuid;

use crate::{
    AppState,
    db::enums::UserRole,
    db::models::{ApiResponse, AssignRequest, CurrentUser},
    db::store::PgStore,
    error::AppError,
    services::AssignmentsService,
    validation::ValidatedJson,
};

pub async fn assign_worker(
    State(state): State<AppState>,
    user: CurrentUser,
    ValidatedJson(req): ValidatedJson<AssignRequest>,
) -> Result<impl IntoResponse, AppError> {
    user.require_role(UserRole::ResourceManager)?;
    let mut conn = state.db.get()?;
    let assignment = conn.transaction::<_, AppError, _>(|conn| {
        AssignmentsService::assign(
            &mut PgStore::new(conn),
            req.user_id,
            req.project_id,
            req.hours_per_week,
            req.assignment_type,
            req.role_in_project.clone(),
        )
    })?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::created(assignment, "Worker assigned")),
    ))
}

pub async fn remove_worker(
    State(state): State<AppState>,
    user: CurrentUser,
    Path((project_id, worker_id)): Path<(Uuid, Uuid)>,
) -> Result<impl IntoResponse, AppError> {
    user.require_role(UserRole::ResourceManager)?;
    let mut conn = state.db.get()?;
    let capacity = conn.transaction::<_, AppError, _>(|conn| {
        AssignmentsService::remove(&mut PgStore::new(conn), worker_id, project_id)
    })?;
    Ok(Json(ApiResponse::success(capacity, "Worker removed from project")))
}
