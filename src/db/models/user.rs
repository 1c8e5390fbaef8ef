use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::db::enums::{ExperienceLevel, UserRole, WorkerStatus};
use crate::error::AppError;

// User models
#[derive(Queryable, Selectable, Serialize, Deserialize, Clone, Debug)]
#[diesel(table_name = crate::schema::users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    #[serde(skip_serializing)]
    pub password_hash: Option<String>,
    pub is_active: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Queryable, Selectable, Serialize, Deserialize, Clone, Debug)]
#[diesel(table_name = crate::schema::user_details)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct WorkerDetails {
    pub user_id: Uuid,
    pub employee_id: Option<String>,
    pub job_title: Option<String>,
    pub experience_level: Option<ExperienceLevel>,
    pub skills: Vec<String>,
    pub total_available_hours: i32,
    pub status: WorkerStatus,
    pub profile_pic: Option<String>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// The slice of `user_details` the capacity ledger reads and writes.
#[derive(Queryable, Selectable, Serialize, Clone, Copy, Debug, PartialEq)]
#[diesel(table_name = crate::schema::user_details)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct WorkerCapacity {
    pub user_id: Uuid,
    pub total_available_hours: i32,
    pub status: WorkerStatus,
}

/// The authenticated actor, resolved once per request by the auth middleware
/// and passed explicitly to every service that needs it.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct CurrentUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    #[serde(skip)]
    pub token_id: String,
}

impl CurrentUser {
    pub fn require_role(&self, role: UserRole) -> Result<(), AppError> {
        if self.role == role {
            Ok(())
        } else {
            Err(AppError::forbidden(format!(
                "This action requires the {} role",
                role
            )))
        }
    }

    pub fn require_any_role(&self, roles: &[UserRole]) -> Result<(), AppError> {
        if roles.contains(&self.role) {
            Ok(())
        } else {
            Err(AppError::forbidden("Your role cannot perform this action"))
        }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentUser>()
            .cloned()
            .ok_or_else(|| AppError::auth("Unauthorized"))
    }
}

// Authentication DTOs
#[derive(Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
    pub user: CurrentUser,
}

/// One row of the resource manager's worker directory.
#[derive(Serialize, Clone, Debug)]
pub struct WorkerSummary {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub employee_id: Option<String>,
    pub job_title: Option<String>,
    pub experience_level: Option<ExperienceLevel>,
    pub skills: Vec<String>,
    pub total_available_hours: i32,
    pub committed_hours: i32,
    pub status: WorkerStatus,
    pub avatar_url: String,
}

#[derive(Deserialize, Validate)]
pub struct UpdateSkillsRequest {
    #[validate(length(max = 100, message = "At most 100 skills can be stored"))]
    pub skills: Vec<String>,
}
