use axum::{
    Json,
    extract::{Multipart, Query, State},
    response::IntoResponse,
};
use diesel::prelude::*;
use serde::Deserialize;

use crate::{
    AppState,
    db::models::{ApiResponse, CurrentUser, UpdateSkillsRequest},
    db::repositories::UsersRepo,
    error::AppError,
    services::WorkersService,
    services::recommendations::CvFile,
    validation::ValidatedJson,
};

#[derive(Deserialize)]
pub struct DeleteCvQuery {
    pub filename: String,
}

pub async fn worker_directory(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<impl IntoResponse, AppError> {
    let mut conn = state.db.get()?;
    let workers = WorkersService::directory(&mut conn, &user, &state.avatars)?;
    Ok(Json(ApiResponse::success(workers, "Workers retrieved")))
}

pub async fn update_skills(
    State(state): State<AppState>,
    user: CurrentUser,
    ValidatedJson(req): ValidatedJson<UpdateSkillsRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut conn = state.db.get()?;
    let skills = WorkersService::update_own_skills(&mut conn, &user, &req.skills)?;
    Ok(Json(ApiResponse::success(skills, "Skills updated")))
}

pub async fn extract_skills(
    State(state): State<AppState>,
    _user: CurrentUser,
    multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let files = read_files(multipart).await?;
    let skills = state.recommendations.extract_skills(files).await?;
    Ok(Json(ApiResponse::success(skills, "Skills extracted")))
}

pub async fn upload_cv(
    State(state): State<AppState>,
    user: CurrentUser,
    multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let employee_id = own_employee_id(&state, &user)?;
    let files = read_files(multipart).await?;
    let uploaded = state.recommendations.upload_cv(&employee_id, files).await?;
    tracing::info!(user_id = %user.id, files = uploaded.len(), "CV uploaded");
    Ok(Json(ApiResponse::success(uploaded, "CV uploaded")))
}

pub async fn delete_cv(
    State(state): State<AppState>,
    user: CurrentUser,
    Query(query): Query<DeleteCvQuery>,
) -> Result<impl IntoResponse, AppError> {
    let employee_id = own_employee_id(&state, &user)?;
    state.recommendations.delete_cv(&employee_id, &query.filename).await?;
    tracing::info!(user_id = %user.id, filename = %query.filename, "CV deleted");
    Ok(Json(ApiResponse::<()>::ok("CV deleted")))
}

fn own_employee_id(state: &AppState, user: &CurrentUser) -> Result<String, AppError> {
    let mut conn = state.db.get()?;
    UsersRepo::workers_by_ids(&mut conn, &[user.id])?
        .into_iter()
        .next()
        .and_then(|(_, details)| details.employee_id)
        .ok_or_else(|| AppError::validation_field("employee_id", "No employee id on file"))
}

async fn read_files(mut multipart: Multipart) -> Result<Vec<CvFile>, AppError> {
    let mut files = Vec::new();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::validation_field("files", format!("Invalid upload: {}", e)))?
    {
        let Some(file_name) = field.file_name().map(str::to_string) else {
            continue;
        };
        let content_type = field.content_type().map(str::to_string);
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::validation_field("files", format!("Invalid upload: {}", e)))?;
        files.push(CvFile {
            file_name,
            content_type,
            bytes: bytes.to_vec(),
        });
    }

    if files.is_empty() {
        return Err(AppError::validation_field("files", "At least one file is required"));
    }
    Ok(files)
}
