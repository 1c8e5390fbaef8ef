use crate::db::enums::{AssignmentStatus, AssignmentType};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

// Assignment models
#[derive(Queryable, Selectable, Serialize, Deserialize, Clone, Debug, PartialEq)]
#[diesel(table_name = crate::schema::project_assignments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Assignment {
    pub id: Uuid,
    pub project_id: Uuid,
    pub user_id: Uuid,
    pub role_in_project: Option<String>,
    pub status: AssignmentStatus,
    pub assignment_type: AssignmentType,
    pub assigned_hours: i32,
    pub allocation_percent: i32,
    pub assigned_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Insertable, Clone, Debug)]
#[diesel(table_name = crate::schema::project_assignments)]
pub struct NewAssignment {
    pub project_id: Uuid,
    pub user_id: Uuid,
    pub role_in_project: Option<String>,
    pub status: AssignmentStatus,
    pub assignment_type: AssignmentType,
    pub assigned_hours: i32,
    pub allocation_percent: i32,
}

// Assignment API DTOs
#[derive(Deserialize, Validate)]
pub struct AssignRequest {
    pub user_id: Uuid,
    pub project_id: Uuid,
    #[validate(range(min = 1, max = 40, message = "Hours per week must be between 1 and 40"))]
    pub hours_per_week: i32,
    pub assignment_type: Option<AssignmentType>,
    pub role_in_project: Option<String>,
}

#[derive(Deserialize, Clone, Debug)]
pub struct WorkerSelection {
    pub user_id: Uuid,
    pub hours_per_week: i32,
    pub assignment_type: Option<AssignmentType>,
}

#[derive(Deserialize)]
pub struct SaveSelectionRequest {
    pub selections: Vec<WorkerSelection>,
}

#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct SelectionFailure {
    pub user_id: Uuid,
    pub reason: String,
}

#[derive(Serialize, Clone, Debug, Default)]
pub struct SelectionOutcome {
    pub assigned: Vec<Assignment>,
    pub removed: Vec<Uuid>,
    pub failed: Vec<SelectionFailure>,
}

#[derive(Serialize, Clone, Debug)]
pub struct TeamMember {
    pub user_id: Uuid,
    pub name: String,
    pub email: String,
    pub role: String,
    pub assignment_type: AssignmentType,
    pub assigned_hours: i32,
    pub avatar_url: String,
}

/// A project manager's planning entry for one worker on one project.
#[derive(Queryable, Selectable, Serialize, Clone, Debug)]
#[diesel(table_name = crate::schema::employee_assigned)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct PmAllocation {
    pub id: Uuid,
    pub project_id: Uuid,
    pub user_id: Uuid,
    pub created_by: Uuid,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Insertable, Clone, Debug)]
#[diesel(table_name = crate::schema::employee_assigned)]
pub struct NewPmAllocation {
    pub project_id: Uuid,
    pub user_id: Uuid,
    pub created_by: Uuid,
}

/// What closing a project (completion or drop) gave back to the ledger.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct ClosureSummary {
    pub project_id: Uuid,
    pub status: crate::db::enums::ProjectStatus,
    pub rows_closed: usize,
    pub released: Vec<ReleasedHours>,
}

#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReleasedHours {
    pub user_id: Uuid,
    pub hours: i32,
}
