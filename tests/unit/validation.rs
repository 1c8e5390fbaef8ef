// Unit tests focus on pure validation and DTO shaping

use chrono::NaiveDate;
use resource_planner::db::enums::{AssignmentType, ExperienceLevel, ProjectPriority};
use resource_planner::db::models::{CreateProjectRequest, RequirementInput, WorkerSelection};
use resource_planner::validation::assignment::{validate_hours_per_week, validate_selection};
use resource_planner::validation::auth::{normalize_skills, validate_login_request, validate_skills};
use resource_planner::validation::project::{duration_days, validate_create_project};
use resource_planner::validation::worklog::{
    validate_allocation_hours, validate_daily_capacity, validate_log_hours, validate_week_start,
};
use uuid::Uuid;
use validator::Validate;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn project_request(start: NaiveDate, end: NaiveDate, quantity: i32) -> CreateProjectRequest {
    CreateProjectRequest {
        name: "Billing revamp".to_string(),
        description: None,
        priority: ProjectPriority::High,
        start_date: start,
        end_date: end,
        requirements: vec![RequirementInput {
            experience_level: ExperienceLevel::Advanced,
            quantity,
            skills: vec!["rust".to_string()],
            assignment_type: AssignmentType::FullTime,
        }],
        notes: None,
    }
}

#[test]
fn login_inputs() {
    assert!(validate_login_request("pm@example.com", "secret").is_ok());
    assert!(validate_login_request("", "secret").is_err());
    assert!(validate_login_request("pm.example.com", "secret").is_err());
    assert!(validate_login_request("pm@example.com", " ").is_err());
}

#[test]
fn weekly_hours_and_selection() {
    assert!(validate_hours_per_week(1).is_ok());
    assert!(validate_hours_per_week(40).is_ok());
    assert!(validate_hours_per_week(0).is_err());
    assert!(validate_hours_per_week(41).is_err());

    let id = Uuid::new_v4();
    let pick = |user_id| WorkerSelection {
        user_id,
        hours_per_week: 10,
        assignment_type: None,
    };
    assert!(validate_selection(&[pick(id), pick(Uuid::new_v4())]).is_ok());
    assert!(validate_selection(&[pick(id), pick(id)]).is_err());
}

#[test]
fn project_dates_and_requirements() {
    let ok = project_request(date(2024, 3, 1), date(2024, 3, 31), 2);
    assert!(validate_create_project(&ok).is_ok());
    assert!(ok.validate().is_ok());
    assert_eq!(duration_days(ok.start_date, ok.end_date), 30);

    let inverted = project_request(date(2024, 3, 31), date(2024, 3, 1), 2);
    assert!(validate_create_project(&inverted).is_err());

    let zero_quantity = project_request(date(2024, 3, 1), date(2024, 3, 2), 0);
    assert!(zero_quantity.validate().is_err());

    let mut empty = project_request(date(2024, 3, 1), date(2024, 3, 2), 1);
    empty.requirements.clear();
    let errors = empty.validate().unwrap_err();
    assert!(errors.field_errors().contains_key("requirements"));
}

#[test]
fn allocation_cells_take_zero_to_eight_hours() {
    assert!(validate_allocation_hours(0.0).is_ok());
    assert!(validate_allocation_hours(8.0).is_ok());
    assert!(validate_allocation_hours(-0.5).is_err());
    assert!(validate_allocation_hours(8.5).is_err());
    assert!(validate_allocation_hours(f64::NAN).is_err());
}

#[test]
fn daily_capacity_depends_on_assignment_type() {
    assert!(validate_daily_capacity(AssignmentType::FullTime, 6.0, 2.0).is_ok());
    assert!(validate_daily_capacity(AssignmentType::FullTime, 6.0, 2.5).is_err());
    assert!(validate_daily_capacity(AssignmentType::Contract, 0.0, 8.0).is_ok());
    assert!(validate_daily_capacity(AssignmentType::PartTime, 3.0, 1.0).is_ok());
    assert!(validate_daily_capacity(AssignmentType::PartTime, 3.0, 1.5).is_err());

    assert!(validate_log_hours(0.0).is_err());
    assert!(validate_log_hours(24.5).is_err());
    assert!(validate_week_start(date(2024, 3, 4)).is_ok());
    assert!(validate_week_start(date(2024, 3, 5)).is_err());
}

#[test]
fn skills_are_trimmed_and_deduplicated() {
    let raw = vec![
        " Rust ".to_string(),
        "rust".to_string(),
        "".to_string(),
        "PostgreSQL".to_string(),
    ];
    assert_eq!(normalize_skills(&raw), vec!["Rust", "PostgreSQL"]);
    assert!(validate_skills(&["Kubernetes".to_string()]).is_ok());
    assert!(validate_skills(&["x".repeat(65)]).is_err());
}
