use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use diesel::prelude::*;

use crate::{
    AppState,
    db::models::{AllocateHoursRequest, ApiResponse, CreateWorkLogRequest, CurrentUser},
    db::store::PgStore,
    error::AppError,
    services::WorkLogsService,
    validation::ValidatedJson,
};

pub async fn log_hours(
    State(state): State<AppState>,
    user: CurrentUser,
    ValidatedJson(req): ValidatedJson<CreateWorkLogRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut conn = state.db.get()?;
    let log = conn.transaction::<_, AppError, _>(|conn| {
        WorkLogsService::log_hours(&mut PgStore::new(conn), &user, &req)
    })?;
    Ok((StatusCode::CREATED, Json(ApiResponse::created(log, "Hours logged"))))
}

/// A project manager planning hours on the weekly grid.
pub async fn allocate_hours(
    State(state): State<AppState>,
    user: CurrentUser,
    ValidatedJson(req): ValidatedJson<AllocateHoursRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut conn = state.db.get()?;
    let log = conn.transaction::<_, AppError, _>(|conn| {
        WorkLogsService::allocate_hours(&mut PgStore::new(conn), &user, &req)
    })?;
    Ok((StatusCode::CREATED, Json(ApiResponse::created(log, "Hours allocated"))))
}

pub async fn today_tasks(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<impl IntoResponse, AppError> {
    let mut conn = state.db.get()?;
    let today = chrono::Local::now().date_naive();
    let tasks = WorkLogsService::today(&mut conn, &user, today)?;
    Ok(Json(ApiResponse::success(tasks, "Today's tasks retrieved")))
}
