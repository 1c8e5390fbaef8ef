use crate::db::enums::WorkLogStatus;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

// Work log models
#[derive(Queryable, Selectable, Serialize, Deserialize, Clone, Debug, PartialEq)]
#[diesel(table_name = crate::schema::worklogs)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct WorkLog {
    pub id: Uuid,
    pub user_id: Uuid,
    pub project_id: Uuid,
    pub log_date: chrono::NaiveDate,
    pub hours: f64,
    pub work_type: String,
    pub work_description: Option<String>,
    pub status: WorkLogStatus,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Insertable, Clone, Debug)]
#[diesel(table_name = crate::schema::worklogs)]
pub struct NewWorkLog {
    pub user_id: Uuid,
    pub project_id: Uuid,
    pub log_date: chrono::NaiveDate,
    pub hours: f64,
    pub work_type: String,
    pub work_description: Option<String>,
    pub status: WorkLogStatus,
}

// Work log API DTOs
#[derive(Deserialize, Validate)]
pub struct CreateWorkLogRequest {
    pub project_id: Uuid,
    pub log_date: chrono::NaiveDate,
    #[validate(range(min = 0.0, max = 24.0, message = "Hours must be between 0 and 24"))]
    pub hours: f64,
    #[validate(length(min = 1, max = 64, message = "Work type is required"))]
    pub work_type: String,
    pub work_description: Option<String>,
    pub status: Option<WorkLogStatus>,
}

/// A project manager filling one cell of the weekly grid.
#[derive(Deserialize, Validate)]
pub struct AllocateHoursRequest {
    pub user_id: Uuid,
    pub project_id: Uuid,
    pub week_start: chrono::NaiveDate,
    #[validate(range(min = 0, max = 4, message = "Day must be between 0 (Monday) and 4 (Friday)"))]
    pub day_index: u32,
    #[validate(range(min = 0.0, max = 8.0, message = "Hours must be between 0 and 8"))]
    pub hours: f64,
    pub task: Option<String>,
}

#[derive(Serialize, Clone, Debug)]
pub struct TodayTasks {
    pub date: chrono::NaiveDate,
    pub tasks: Vec<WorkLog>,
    pub logged_hours: f64,
    pub remaining_hours: f64,
}
