pub mod assignment;
pub mod auth;
pub mod project;
pub mod worklog;

use axum::{
    async_trait,
    extract::FromRequest,
    http::Request,
    Json,
};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::error::AppError;

/// JSON extractor that runs `validator` rules before the handler sees the body.
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S, axum::body::Body> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request<axum::body::Body>, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| AppError::validation(format!("Invalid JSON format: {}", e)))?;

        value.validate().map_err(first_field_error)?;

        Ok(ValidatedJson(value))
    }
}

/// Collapses `validator` output into the first offending field.
pub fn first_field_error(errors: validator::ValidationErrors) -> AppError {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    match fields.into_iter().next() {
        Some((field, field_errors)) => {
            let message = field_errors
                .first()
                .and_then(|e| e.message.as_ref())
                .map(|m| m.to_string())
                .unwrap_or_else(|| format!("Validation failed for field: {}", field));
            AppError::validation_field(field.to_string(), message)
        }
        None => AppError::validation("Validation failed"),
    }
}

pub mod rules {
    use validator::ValidationError;

    /// Skills are free text but must be printable and reasonably short.
    pub fn validate_skill_name(skill: &str) -> Result<(), ValidationError> {
        let trimmed = skill.trim();
        if trimmed.is_empty() || trimmed.chars().count() > 64 {
            return Err(ValidationError::new("invalid_skill_length"));
        }
        if trimmed.chars().any(|c| c.is_control()) {
            return Err(ValidationError::new("invalid_skill_characters"));
        }
        Ok(())
    }
}
