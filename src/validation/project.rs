use chrono::NaiveDate;

use crate::db::models::CreateProjectRequest;
use crate::error::AppError;

pub fn validate_create_project(req: &CreateProjectRequest) -> Result<(), AppError> {
    if req.name.trim().is_empty() {
        return Err(AppError::validation_field("name", "Project name is required"));
    }
    validate_date_range(req.start_date, req.end_date)?;
    if req.requirements.is_empty() {
        return Err(AppError::validation_field(
            "requirements",
            "At least one resource requirement is needed",
        ));
    }
    for requirement in &req.requirements {
        if requirement.skills.iter().any(|s| s.trim().is_empty()) {
            return Err(AppError::validation_field(
                "requirements",
                "Required skills cannot be blank",
            ));
        }
    }
    Ok(())
}

pub fn validate_date_range(start: NaiveDate, end: NaiveDate) -> Result<(), AppError> {
    if end < start {
        return Err(AppError::validation_field(
            "end_date",
            "End date cannot be before start date",
        ));
    }
    Ok(())
}

/// Whole days between the two dates, regardless of order.
pub fn duration_days(start: NaiveDate, end: NaiveDate) -> i32 {
    (end - start).num_days().unsigned_abs() as i32
}
