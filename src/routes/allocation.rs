use axum::{
    Json,
    extract::{Query, State},
    response::IntoResponse,
};

use crate::{
    AppState,
    db::enums::UserRole,
    db::models::{ApiResponse, CurrentUser, WeekQuery},
    error::AppError,
    services::AllocationService,
    services::allocation_service::{PAST_WEEKS, recent_weeks},
};

pub async fn weekly_allocation(
    State(state): State<AppState>,
    user: CurrentUser,
    Query(query): Query<WeekQuery>,
) -> Result<impl IntoResponse, AppError> {
    user.require_role(UserRole::ProjectManager)?;
    let week_start = query
        .week_start
        .unwrap_or_else(|| chrono::Local::now().date_naive());
    let mut conn = state.db.get()?;
    let rows = AllocationService::weekly_view(&mut conn, &user, &state.avatars, week_start)?;
    Ok(Json(ApiResponse::success(rows, "Weekly allocation retrieved")))
}

pub async fn week_options(user: CurrentUser) -> Result<impl IntoResponse, AppError> {
    user.require_role(UserRole::ProjectManager)?;
    let weeks = recent_weeks(chrono::Local::now().date_naive(), PAST_WEEKS);
    Ok(Json(ApiResponse::success(weeks, "Weeks retrieved")))
}

pub async fn dashboard_stats(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<impl IntoResponse, AppError> {
    user.require_role(UserRole::ProjectManager)?;
    let mut conn = state.db.get()?;
    let stats = AllocationService::dashboard_stats(&mut conn, &user, chrono::Local::now().date_naive())?;
    Ok(Json(ApiResponse::success(stats, "Dashboard stats retrieved")))
}

pub async fn available_members(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<impl IntoResponse, AppError> {
    user.require_role(UserRole::ProjectManager)?;
    let mut conn = state.db.get()?;
    let members = AllocationService::available_members(&mut conn, &user, &state.avatars)?;
    Ok(Json(ApiResponse::success(members, "Available members retrieved")))
}
