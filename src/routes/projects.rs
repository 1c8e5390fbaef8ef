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
    db::models::{ApiResponse, CreateProjectRequest, CurrentUser, SaveSelectionRequest},
    db::repositories::{ProjectsRepo, UsersRepo},
    db::store::PgStore,
    error::AppError,
    services::{AssignmentsService, ProjectsService, RecommendationsService},
    validation::ValidatedJson,
};

pub async fn create_project(
    State(state): State<AppState>,
    user: CurrentUser,
    ValidatedJson(req): ValidatedJson<CreateProjectRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut conn = state.db.get()?;
    let created = conn.transaction::<_, AppError, _>(|conn| ProjectsService::create(conn, &user, &req))?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::created(created, "Project created")),
    ))
}

pub async fn active_projects(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<impl IntoResponse, AppError> {
    let mut conn = state.db.get()?;
    let projects = ProjectsService::active(&mut conn, &user, &state.avatars)?;
    Ok(Json(ApiResponse::success(projects, "Active projects retrieved")))
}

pub async fn project_history(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<impl IntoResponse, AppError> {
    let mut conn = state.db.get()?;
    let projects = ProjectsService::history(&mut conn, &user, &state.avatars)?;
    Ok(Json(ApiResponse::success(projects, "Project history retrieved")))
}

pub async fn project_stats(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<impl IntoResponse, AppError> {
    let mut conn = state.db.get()?;
    let stats = ProjectsService::stats(&mut conn, &user)?;
    Ok(Json(ApiResponse::success(stats, "Project stats retrieved")))
}

pub async fn project_team(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(project_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let mut conn = state.db.get()?;
    let team = ProjectsService::team(&mut conn, &user, &state.avatars, project_id)?;
    Ok(Json(ApiResponse::success(team, "Team members retrieved")))
}

pub async fn complete_project(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(project_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let mut conn = state.db.get()?;
    let summary = conn.transaction::<_, AppError, _>(|conn| {
        ProjectsService::find_visible(conn, &user, project_id)?;
        AssignmentsService::complete_project(&mut PgStore::new(conn), project_id)
    })?;
    Ok(Json(ApiResponse::success(summary, "Project completed")))
}

pub async fn drop_project(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(project_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let mut conn = state.db.get()?;
    let summary = conn.transaction::<_, AppError, _>(|conn| {
        ProjectsService::find_visible(conn, &user, project_id)?;
        AssignmentsService::drop_project(&mut PgStore::new(conn), project_id)
    })?;
    Ok(Json(ApiResponse::success(summary, "Project dropped")))
}

/// Staffing candidates, ranked by the recommendation service when it answers.
pub async fn project_candidates(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(project_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    user.require_role(UserRole::ResourceManager)?;

    // The pooled connection is released before the remote call.
    let (workers, preferred) = {
        let mut conn = state.db.get()?;
        ProjectsRepo::find_by_id(&mut conn, project_id)?.ok_or_else(|| AppError::not_found("Project"))?;
        let preferred = ProjectsRepo::requirements_for(&mut conn, project_id)?
            .first()
            .map(|r| r.preferred_assignment_type);
        (UsersRepo::list_workers(&mut conn)?, preferred)
    };

    let list = RecommendationsService::candidates(
        state.recommendations.as_ref(),
        project_id,
        workers,
        preferred,
        &state.avatars,
    )
    .await;
    Ok(Json(ApiResponse::success(list, "Candidates retrieved")))
}

pub async fn save_selection(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(project_id): Path<Uuid>,
    Json(req): Json<SaveSelectionRequest>,
) -> Result<impl IntoResponse, AppError> {
    user.require_role(UserRole::ResourceManager)?;
    let mut conn = state.db.get()?;
    let outcome = conn.transaction::<_, AppError, _>(|conn| {
        AssignmentsService::save_selection(&mut PgStore::new(conn), project_id, &req.selections)
    })?;
    Ok(Json(ApiResponse::success(outcome, "Team selection saved")))
}
