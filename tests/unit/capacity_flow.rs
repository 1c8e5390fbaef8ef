// Ledger and assignment flows against the in-memory store

use resource_planner::db::enums::{AssignmentStatus, ProjectStatus, WorkerStatus};
use resource_planner::db::models::WorkerSelection;
use resource_planner::db::store::InMemoryStore;
use resource_planner::error::AppError;
use resource_planner::services::AssignmentsService;
use uuid::Uuid;

fn selection(user_id: Uuid, hours_per_week: i32) -> WorkerSelection {
    WorkerSelection {
        user_id,
        hours_per_week,
        assignment_type: None,
    }
}

#[test]
fn assign_overcommit_and_remove_round_trip() {
    let mut store = InMemoryStore::new();
    let worker = store.add_worker(40);
    let owner = Uuid::new_v4();
    let first = store.add_project(owner, ProjectStatus::Active);
    let second = store.add_project(owner, ProjectStatus::Active);

    AssignmentsService::assign(&mut store, worker, first, 24, None, None).unwrap();
    let capacity = store.capacity(worker).unwrap();
    assert_eq!(capacity.total_available_hours, 16);
    assert_eq!(capacity.status, WorkerStatus::Partial);

    let err = AssignmentsService::assign(&mut store, worker, second, 20, None, None).unwrap_err();
    assert!(matches!(
        err,
        AppError::InsufficientCapacity { requested: 20, available: 16, .. }
    ));
    assert_eq!(store.capacity(worker).unwrap().total_available_hours, 16);
    assert_eq!(store.assignments().len(), 1);

    let restored = AssignmentsService::remove(&mut store, worker, first).unwrap();
    assert_eq!(restored.total_available_hours, 40);
    assert_eq!(restored.status, WorkerStatus::Available);
    assert_eq!(store.assignments()[0].status, AssignmentStatus::Removed);
}

#[test]
fn completing_a_project_frees_every_member() {
    let mut store = InMemoryStore::new();
    let ada = store.add_worker(40);
    let grace = store.add_worker(40);
    let project = store.add_project(Uuid::new_v4(), ProjectStatus::Active);

    AssignmentsService::assign(&mut store, ada, project, 40, None, None).unwrap();
    AssignmentsService::assign(&mut store, grace, project, 10, None, None).unwrap();
    assert_eq!(store.capacity(ada).unwrap().status, WorkerStatus::Busy);

    let today = chrono::NaiveDate::from_ymd_opt(2024, 3, 8).unwrap();
    let summary = AssignmentsService::complete_project_on(&mut store, project, today).unwrap();

    assert_eq!(summary.rows_closed, 2);
    assert_eq!(store.capacity(ada).unwrap().total_available_hours, 40);
    assert_eq!(store.capacity(grace).unwrap().total_available_hours, 40);
    let closed = store.project(project).unwrap();
    assert_eq!(closed.status, ProjectStatus::Completed);
    assert_eq!(closed.end_date, Some(today));

    let err = AssignmentsService::assign(&mut store, ada, project, 5, None, None).unwrap_err();
    assert!(matches!(err, AppError::Conflict { .. }));
}

#[test]
fn saving_a_selection_swaps_members_and_reports_shortfalls() {
    let mut store = InMemoryStore::new();
    let staying = store.add_worker(40);
    let leaving = store.add_worker(40);
    let joining = store.add_worker(40);
    let stretched = store.add_worker(8);
    let project = store.add_project(Uuid::new_v4(), ProjectStatus::Pending);

    AssignmentsService::assign(&mut store, staying, project, 20, None, None).unwrap();
    AssignmentsService::assign(&mut store, leaving, project, 30, None, None).unwrap();

    let outcome = AssignmentsService::save_selection(
        &mut store,
        project,
        &[
            selection(staying, 20),
            selection(joining, 16),
            selection(stretched, 12),
        ],
    )
    .unwrap();

    assert_eq!(outcome.removed, vec![leaving]);
    assert_eq!(outcome.assigned.len(), 1);
    assert_eq!(outcome.assigned[0].user_id, joining);
    assert_eq!(outcome.failed.len(), 1);
    assert_eq!(outcome.failed[0].user_id, stretched);
    assert!(outcome.failed[0].reason.contains("8h available"));

    assert_eq!(store.capacity(leaving).unwrap().total_available_hours, 40);
    assert_eq!(store.capacity(joining).unwrap().total_available_hours, 24);
    assert_eq!(store.capacity(stretched).unwrap().total_available_hours, 8);
    assert_eq!(store.project(project).unwrap().status, ProjectStatus::Active);
}

#[test]
fn selection_over_headcount_is_refused_before_any_write() {
    let mut store = InMemoryStore::new();
    let a = store.add_worker(40);
    let b = store.add_worker(40);
    let project = store.add_project(Uuid::new_v4(), ProjectStatus::Pending);
    store.set_headcount(project, 1);

    let err = AssignmentsService::save_selection(
        &mut store,
        project,
        &[selection(a, 10), selection(b, 10)],
    )
    .unwrap_err();

    assert!(matches!(err, AppError::Conflict { .. }));
    assert_eq!(store.capacity_writes(), 0);
    assert!(store.assignments().is_empty());
}
