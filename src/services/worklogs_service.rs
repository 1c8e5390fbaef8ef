use chrono::{Duration, NaiveDate};
use diesel::prelude::*;

use crate::{
    db::enums::{UserRole, WorkLogStatus},
    db::models::{
        AllocateHoursRequest, CreateWorkLogRequest, CurrentUser, NewPmAllocation, NewWorkLog,
        TodayTasks, WorkLog,
    },
    db::repositories::WorkLogsRepo,
    db::store::ResourceStore,
    error::AppError,
    validation::worklog::{
        validate_allocation_hours, validate_daily_capacity, validate_log_hours, validate_week_start,
    },
};

/// Work type written for hours a project manager plans on the weekly grid.
pub const PLANNED_WORK_TYPE: &str = "assigned";
/// Hours an employee is expected to log in one day.
pub const WORKDAY_HOURS: f64 = 8.0;

pub struct WorkLogsService;

impl WorkLogsService {
    /// An employee logging their own hours against a project they are staffed on.
    pub fn log_hours<S: ResourceStore + ?Sized>(
        store: &mut S,
        user: &CurrentUser,
        req: &CreateWorkLogRequest,
    ) -> Result<WorkLog, AppError> {
        user.require_role(UserRole::Employee)?;
        validate_log_hours(req.hours)?;

        let new_log = NewWorkLog {
            user_id: user.id,
            project_id: req.project_id,
            log_date: req.log_date,
            hours: req.hours,
            work_type: req.work_type.trim().to_string(),
            work_description: req.work_description.clone(),
            status: req.status.unwrap_or(WorkLogStatus::Pending),
        };
        Self::insert_within_capacity(store, new_log)
    }

    /// A project manager filling one Monday..Friday cell for a worker on their project.
    pub fn allocate_hours<S: ResourceStore + ?Sized>(
        store: &mut S,
        user: &CurrentUser,
        req: &AllocateHoursRequest,
    ) -> Result<WorkLog, AppError> {
        user.require_role(UserRole::ProjectManager)?;
        validate_week_start(req.week_start)?;
        if req.day_index > 4 {
            return Err(AppError::validation_field(
                "day_index",
                "Day must be between 0 (Monday) and 4 (Friday)",
            ));
        }
        validate_allocation_hours(req.hours)?;

        let project = store
            .find_project(req.project_id)?
            .ok_or_else(|| AppError::not_found("Project"))?;
        if project.created_by != user.id {
            return Err(AppError::forbidden("You can only allocate hours on your own projects"));
        }

        let new_log = NewWorkLog {
            user_id: req.user_id,
            project_id: req.project_id,
            log_date: req.week_start + Duration::days(req.day_index as i64),
            hours: req.hours,
            work_type: PLANNED_WORK_TYPE.to_string(),
            work_description: req.task.clone(),
            status: WorkLogStatus::InProgress,
        };
        let created = Self::insert_within_capacity(store, new_log)?;

        store.record_pm_allocation(&NewPmAllocation {
            project_id: req.project_id,
            user_id: req.user_id,
            created_by: user.id,
        })?;
        Ok(created)
    }

    pub fn today(
        conn: &mut PgConnection,
        user: &CurrentUser,
        today: NaiveDate,
    ) -> Result<TodayTasks, AppError> {
        let tasks = WorkLogsRepo::for_worker_on(conn, user.id, today)?;
        Ok(summarize_day(today, tasks))
    }

    fn insert_within_capacity<S: ResourceStore + ?Sized>(
        store: &mut S,
        new_log: NewWorkLog,
    ) -> Result<WorkLog, AppError> {
        // Duplicate assigned rows can survive old data; the widest daily cap wins.
        let assignment_type = store
            .assigned_rows(new_log.project_id, Some(new_log.user_id))?
            .into_iter()
            .map(|row| row.assignment_type)
            .max_by(|a, b| a.daily_capacity().total_cmp(&b.daily_capacity()))
            .ok_or_else(|| {
                AppError::validation_field("project_id", "Worker is not assigned to this project")
            })?;

        let logged = store.logged_hours_on(new_log.user_id, new_log.project_id, new_log.log_date)?;
        validate_daily_capacity(assignment_type, logged, new_log.hours)?;

        let created = store.insert_worklog(&new_log)?;
        tracing::info!(
            worker_id = %created.user_id,
            project_id = %created.project_id,
            date = %created.log_date,
            hours = created.hours,
            "Work logged"
        );
        Ok(created)
    }
}

pub fn summarize_day(date: NaiveDate, tasks: Vec<WorkLog>) -> TodayTasks {
    let logged_hours: f64 = tasks.iter().map(|t| t.hours).sum();
    TodayTasks {
        date,
        remaining_hours: (WORKDAY_HOURS - logged_hours).max(0.0),
        logged_hours,
        tasks,
    }
}
