use std::collections::HashSet;

use crate::db::models::WorkerSelection;
use crate::error::AppError;
use crate::services::ledger::WEEKLY_CAPACITY;

pub fn validate_hours_per_week(hours: i32) -> Result<(), AppError> {
    if !(1..=WEEKLY_CAPACITY).contains(&hours) {
        return Err(AppError::validation_field(
            "hours_per_week",
            format!("Hours per week must be between 1 and {}", WEEKLY_CAPACITY),
        ));
    }
    Ok(())
}

pub fn validate_selection(selections: &[WorkerSelection]) -> Result<(), AppError> {
    let mut seen = HashSet::with_capacity(selections.len());
    for selection in selections {
        if !seen.insert(selection.user_id) {
            return Err(AppError::validation_field(
                "selections",
                format!("Worker {} is selected more than once", selection.user_id),
            ));
        }
    }
    Ok(())
}
