use axum::{Extension, Json, extract::State, response::IntoResponse};
use diesel::prelude::*;

use crate::{
    AppState, cache,
    db::models::{ApiResponse, CurrentUser, LoginRequest},
    error::AppError,
    middleware::auth::Claims,
    services::AuthService,
    validation::ValidatedJson,
};

pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut conn = state.db.get()?;
    let response = AuthService::login(&mut conn, &state.jwt, &req)?;
    Ok(Json(ApiResponse::success(response, "Login successful")))
}

/// Revokes the presented token until it would have expired.
pub async fn logout(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, AppError> {
    cache::revoke_token(&state.redis, &claims.jti, claims.remaining_secs()).await?;
    if let Err(e) = cache::forget_user(&state.redis, claims.sub).await {
        tracing::warn!(user_id = %claims.sub, error = %e, "Failed to drop cached user on logout");
    }
    tracing::info!(user_id = %claims.sub, "User logged out");
    Ok(Json(ApiResponse::<()>::ok("Logged out")))
}

pub async fn me(user: CurrentUser) -> impl IntoResponse {
    Json(ApiResponse::success(user, "Current user"))
}

pub async fn health(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    {
        let mut conn = state.db.get()?;
        diesel::sql_query("SELECT 1").execute(&mut conn)?;
    }
    if !cache::redis_health_check(&state.redis).await? {
        return Err(AppError::internal("Redis did not answer PING"));
    }
    Ok(Json(ApiResponse::<()>::ok("OK")))
}
