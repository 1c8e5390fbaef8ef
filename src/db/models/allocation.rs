use crate::db::enums::{AssignmentType, WorkerStatus};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One worker's Monday..Friday totals in the weekly grid.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct WeeklyAllocationRow {
    pub user_id: Uuid,
    pub employee: String,
    pub role: String,
    pub avatar_url: String,
    pub days: [f64; 5],
    pub total: f64,
}

#[derive(Deserialize)]
pub struct WeekQuery {
    pub week_start: Option<chrono::NaiveDate>,
}

#[derive(Serialize, Clone, Debug)]
pub struct WeekOption {
    pub week_start: chrono::NaiveDate,
    pub week_end: chrono::NaiveDate,
    pub label: String,
    pub is_current: bool,
}

#[derive(Serialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DashboardStats {
    pub active_projects: i64,
    pub team_members: i64,
    pub total_hours: i64,
    pub team_utilization: i64,
}

#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum UtilizationLevel {
    Low,
    Medium,
    High,
}

#[derive(Serialize, Clone, Debug)]
pub struct AvailableMember {
    pub user_id: Uuid,
    pub name: String,
    pub role: String,
    pub avatar_url: String,
    pub assigned_hours: i32,
    pub available_hours: i32,
    pub utilization: i32,
    pub utilization_level: UtilizationLevel,
    pub status: WorkerStatus,
}

/// A worker offered to a resource manager when staffing a project.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct Candidate {
    pub user_id: Uuid,
    pub name: String,
    pub job_title: Option<String>,
    pub skills: Vec<String>,
    pub status: WorkerStatus,
    pub total_available_hours: i32,
    pub assignment_type: AssignmentType,
    pub assigned_hours: i32,
    pub allocation_percent: f64,
    pub recommended: bool,
    pub avatar_url: String,
}

#[derive(Serialize, Clone, Debug)]
pub struct CandidateList {
    pub ranked: bool,
    pub candidates: Vec<Candidate>,
}
