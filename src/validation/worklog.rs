use chrono::{Datelike, NaiveDate, Weekday};

use crate::db::enums::AssignmentType;
use crate::error::AppError;

pub fn validate_log_hours(hours: f64) -> Result<(), AppError> {
    if !hours.is_finite() || hours <= 0.0 || hours > 24.0 {
        return Err(AppError::validation_field(
            "hours",
            "Hours must be greater than 0 and at most 24",
        ));
    }
    Ok(())
}

/// Hours a project manager may plan for one worker in one weekday cell.
pub fn validate_allocation_hours(hours: f64) -> Result<(), AppError> {
    if !hours.is_finite() || !(0.0..=8.0).contains(&hours) {
        return Err(AppError::validation_field(
            "hours",
            "Hours must be between 0 and 8",
        ));
    }
    Ok(())
}

/// Existing plus new hours for one (worker, project, day) must fit the daily capacity.
pub fn validate_daily_capacity(
    assignment_type: AssignmentType,
    already_logged: f64,
    hours: f64,
) -> Result<(), AppError> {
    let capacity = assignment_type.daily_capacity();
    if already_logged + hours > capacity {
        let remaining = (capacity - already_logged).max(0.0);
        return Err(AppError::validation_field(
            "hours",
            format!(
                "Daily capacity for {} work is {}h; {}h remaining",
                assignment_type, capacity, remaining
            ),
        ));
    }
    Ok(())
}

pub fn validate_week_start(week_start: NaiveDate) -> Result<(), AppError> {
    if week_start.weekday() != Weekday::Mon {
        return Err(AppError::validation_field(
            "week_start",
            "Week must start on a Monday",
        ));
    }
    Ok(())
}
