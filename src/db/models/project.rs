use crate::db::enums::{AssignmentType, ExperienceLevel, ProjectPriority, ProjectStatus};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

// Project models
#[derive(Queryable, Selectable, Serialize, Deserialize, Clone, Debug)]
#[diesel(table_name = crate::schema::projects)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Project {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub status: ProjectStatus,
    pub priority: ProjectPriority,
    pub start_date: Option<chrono::NaiveDate>,
    pub end_date: Option<chrono::NaiveDate>,
    pub duration_days: Option<i32>,
    pub created_by: Uuid,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::projects)]
pub struct NewProject {
    pub name: String,
    pub description: Option<String>,
    pub status: ProjectStatus,
    pub priority: ProjectPriority,
    pub start_date: Option<chrono::NaiveDate>,
    pub end_date: Option<chrono::NaiveDate>,
    pub duration_days: Option<i32>,
    pub created_by: Uuid,
}

#[derive(Queryable, Selectable, Serialize, Deserialize, Clone, Debug)]
#[diesel(table_name = crate::schema::project_requirements)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ProjectRequirement {
    pub id: Uuid,
    pub project_id: Uuid,
    pub experience_level: ExperienceLevel,
    pub quantity_needed: i32,
    pub required_skills: Vec<String>,
    pub preferred_assignment_type: AssignmentType,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::project_requirements)]
pub struct NewProjectRequirement {
    pub project_id: Uuid,
    pub experience_level: ExperienceLevel,
    pub quantity_needed: i32,
    pub required_skills: Vec<String>,
    pub preferred_assignment_type: AssignmentType,
}

// Project API DTOs
#[derive(Deserialize, Validate)]
pub struct CreateProjectRequest {
    #[validate(length(min = 1, max = 255, message = "Project name must be between 1 and 255 characters"))]
    pub name: String,
    pub description: Option<String>,
    pub priority: ProjectPriority,
    pub start_date: chrono::NaiveDate,
    pub end_date: chrono::NaiveDate,
    #[validate(length(min = 1, message = "At least one resource requirement is needed"), nested)]
    pub requirements: Vec<RequirementInput>,
    pub notes: Option<String>,
}

#[derive(Serialize, Deserialize, Validate, Clone, Debug)]
pub struct RequirementInput {
    pub experience_level: ExperienceLevel,
    #[validate(range(min = 1, max = 50, message = "Quantity must be between 1 and 50"))]
    pub quantity: i32,
    pub skills: Vec<String>,
    pub assignment_type: AssignmentType,
}

#[derive(Serialize, Clone, Debug)]
pub struct ProjectInfo {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub status: ProjectStatus,
    pub priority: ProjectPriority,
    pub start_date: Option<chrono::NaiveDate>,
    pub end_date: Option<chrono::NaiveDate>,
    pub duration_days: Option<i32>,
    pub team_members: Vec<super::assignment::TeamMember>,
    pub team_size: usize,
}

#[derive(Serialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ProjectTrackingStats {
    pub active_projects: i64,
    pub completed_projects: i64,
    pub total_members: i64,
    pub high_priority: i64,
}

#[derive(Serialize, Clone, Debug)]
pub struct CreatedProject {
    pub project: Project,
    pub requirements: Vec<ProjectRequirement>,
    pub requests: Vec<super::request::ResourceRequest>,
}
