use chrono::NaiveDate;
use resource_planner::db::enums::{ProjectStatus, UserRole, WorkLogStatus};
use resource_planner::db::models::{AllocateHoursRequest, CreateWorkLogRequest, CurrentUser};
use resource_planner::db::store::InMemoryStore;
use resource_planner::error::AppError;
use resource_planner::services::{AssignmentsService, WorkLogsService};
use uuid::Uuid;

fn actor(id: Uuid, role: UserRole) -> CurrentUser {
    CurrentUser {
        id,
        name: "Test User".to_string(),
        email: "test@example.com".to_string(),
        role,
        token_id: String::new(),
    }
}

fn log(project_id: Uuid, hours: f64) -> CreateWorkLogRequest {
    CreateWorkLogRequest {
        project_id,
        log_date: NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
        hours,
        work_type: "development".to_string(),
        work_description: None,
        status: None,
    }
}

#[test]
fn part_time_workers_are_capped_at_four_hours_a_day() {
    let mut store = InMemoryStore::new();
    let worker = store.add_worker(40);
    let project = store.add_project(Uuid::new_v4(), ProjectStatus::Active);
    AssignmentsService::assign(&mut store, worker, project, 20, None, None).unwrap();
    let employee = actor(worker, UserRole::Employee);

    let first = WorkLogsService::log_hours(&mut store, &employee, &log(project, 3.0)).unwrap();
    assert_eq!(first.status, WorkLogStatus::Pending);

    let err = WorkLogsService::log_hours(&mut store, &employee, &log(project, 2.0)).unwrap_err();
    assert!(matches!(err, AppError::Validation { .. }));
    assert_eq!(store.worklogs().len(), 1);
}

#[test]
fn logging_requires_an_assignment_and_the_employee_role() {
    let mut store = InMemoryStore::new();
    let worker = store.add_worker(40);
    let project = store.add_project(Uuid::new_v4(), ProjectStatus::Active);

    let err = WorkLogsService::log_hours(&mut store, &actor(worker, UserRole::Employee), &log(project, 1.0))
        .unwrap_err();
    assert!(matches!(err, AppError::Validation { .. }));

    let err = WorkLogsService::log_hours(&mut store, &actor(worker, UserRole::ProjectManager), &log(project, 1.0))
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden { .. }));
}

#[test]
fn project_manager_plans_hours_on_own_projects_only() {
    let mut store = InMemoryStore::new();
    let pm = Uuid::new_v4();
    let worker = store.add_worker(40);
    let own = store.add_project(pm, ProjectStatus::Active);
    let foreign = store.add_project(Uuid::new_v4(), ProjectStatus::Active);
    AssignmentsService::assign(&mut store, worker, own, 40, None, None).unwrap();

    let request = |project_id| AllocateHoursRequest {
        user_id: worker,
        project_id,
        week_start: NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(),
        day_index: 2,
        hours: 6.0,
        task: Some("API review".to_string()),
    };
    let manager = actor(pm, UserRole::ProjectManager);

    let planned = WorkLogsService::allocate_hours(&mut store, &manager, &request(own)).unwrap();
    assert_eq!(planned.log_date, NaiveDate::from_ymd_opt(2024, 3, 6).unwrap());
    assert_eq!(planned.status, WorkLogStatus::InProgress);
    assert_eq!(store.pm_allocations().len(), 1);

    let err = WorkLogsService::allocate_hours(&mut store, &manager, &request(foreign)).unwrap_err();
    assert!(matches!(err, AppError::Forbidden { .. }));
}
