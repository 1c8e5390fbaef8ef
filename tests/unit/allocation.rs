use chrono::{Duration, NaiveDate};
use resource_planner::db::enums::{ProjectStatus, UserRole};
use resource_planner::db::models::{AllocateHoursRequest, CurrentUser};
use resource_planner::db::store::InMemoryStore;
use resource_planner::services::allocation_service::{PAST_WEEKS, recent_weeks, weekly_grid};
use resource_planner::services::{AssignmentsService, WorkLogsService};
use uuid::Uuid;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn manager() -> CurrentUser {
    CurrentUser {
        id: Uuid::new_v4(),
        name: "Planner".to_string(),
        email: "planner@example.com".to_string(),
        role: UserRole::ProjectManager,
        token_id: String::new(),
    }
}

fn cell(worker: Uuid, project: Uuid, week_start: NaiveDate, day_index: u32, hours: f64) -> AllocateHoursRequest {
    AllocateHoursRequest {
        user_id: worker,
        project_id: project,
        week_start,
        day_index,
        hours,
        task: None,
    }
}

#[test]
fn planned_cells_show_up_in_the_weekly_grid() {
    let mut store = InMemoryStore::new();
    let pm = manager();
    let project = store.add_project(pm.id, ProjectStatus::Active);
    let full_time = store.add_worker(40);
    let part_time = store.add_worker(40);
    AssignmentsService::assign(&mut store, full_time, project, 40, None, None).unwrap();
    AssignmentsService::assign(&mut store, part_time, project, 20, None, None).unwrap();

    let this_week = date(2024, 3, 4);
    let next_week = this_week + Duration::weeks(1);
    for req in [
        cell(full_time, project, this_week, 0, 8.0),
        cell(full_time, project, this_week, 4, 3.5),
        cell(part_time, project, this_week, 2, 4.0),
        cell(full_time, project, next_week, 0, 6.0),
    ] {
        WorkLogsService::allocate_hours(&mut store, &pm, &req).unwrap();
    }

    // A Thursday picks the same week as its Monday.
    let grid = weekly_grid(date(2024, 3, 7), store.worklogs());

    assert_eq!(grid.len(), 2);
    assert_eq!(grid[&full_time], [8.0, 0.0, 0.0, 0.0, 3.5]);
    assert_eq!(grid[&part_time], [0.0, 0.0, 4.0, 0.0, 0.0]);
    assert_eq!(weekly_grid(next_week, store.worklogs())[&full_time][0], 6.0);
}

#[test]
fn week_picker_crosses_the_new_year() {
    // Tuesday in the first ISO week of 2025.
    let weeks = recent_weeks(date(2024, 12, 31), PAST_WEEKS);

    assert_eq!(weeks[0].week_start, date(2024, 12, 30));
    assert_eq!(weeks[0].week_end, date(2025, 1, 3));
    assert_eq!(weeks[0].label, "Dec 30 - Jan 03, 2025");
    assert!(weeks.windows(2).all(|w| w[0].week_start - w[1].week_start == Duration::weeks(1)));
}
