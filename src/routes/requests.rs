use axum::{
    Json,
    extract::{Path, Query, State},
    response::IntoResponse,
};
use diesel::prelude::*;
use uuid::Uuid;

use crate::{
    AppState,
    db::models::{ApiResponse, CurrentUser, DecideRequestBody, RequestListQuery},
    error::AppError,
    services::RequestsService,
};

pub async fn list_requests(
    State(state): State<AppState>,
    user: CurrentUser,
    Query(query): Query<RequestListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let mut conn = state.db.get()?;
    let requests = RequestsService::list(&mut conn, &user, query.status)?;
    Ok(Json(ApiResponse::success(requests, "Resource requests retrieved")))
}

pub async fn decide_request(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(request_id): Path<Uuid>,
    Json(body): Json<DecideRequestBody>,
) -> Result<impl IntoResponse, AppError> {
    let mut conn = state.db.get()?;
    let request = conn.transaction::<_, AppError, _>(|conn| {
        RequestsService::decide(conn, &user, request_id, body.decision)
    })?;
    Ok(Json(ApiResponse::success(request, "Resource request updated")))
}
