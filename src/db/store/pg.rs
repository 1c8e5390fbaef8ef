use chrono::NaiveDate;
use diesel::PgConnection;
use uuid::Uuid;

use super::ResourceStore;
use crate::db::enums::{AssignmentStatus, ProjectStatus, WorkerStatus};
use crate::db::models::{
    Assignment, NewAssignment, NewPmAllocation, NewWorkLog, Project, WorkLog, WorkerCapacity,
};
use crate::db::repositories::{AssignmentsRepo, ProjectsRepo, UsersRepo, WorkLogsRepo};
use crate::error::AppResult;

/// Postgres-backed store over a borrowed connection, usually one already
/// inside `conn.transaction(..)`.
pub struct PgStore<'a> {
    conn: &'a mut PgConnection,
}

impl<'a> PgStore<'a> {
    pub fn new(conn: &'a mut PgConnection) -> Self {
        Self { conn }
    }
}

impl ResourceStore for PgStore<'_> {
    fn worker_capacity(&mut self, worker: Uuid) -> AppResult<Option<WorkerCapacity>> {
        Ok(UsersRepo::capacity(self.conn, worker)?)
    }

    fn update_worker_capacity(
        &mut self,
        worker: Uuid,
        available: i32,
        status: WorkerStatus,
    ) -> AppResult<()> {
        UsersRepo::update_capacity(self.conn, worker, available, status)?;
        Ok(())
    }

    fn find_project(&mut self, project: Uuid) -> AppResult<Option<Project>> {
        Ok(ProjectsRepo::find_by_id(self.conn, project)?)
    }

    fn update_project_status(
        &mut self,
        project: Uuid,
        status: ProjectStatus,
        end_date: Option<NaiveDate>,
    ) -> AppResult<()> {
        ProjectsRepo::update_status(self.conn, project, status, end_date)?;
        Ok(())
    }

    fn requirement_headcount(&mut self, project: Uuid) -> AppResult<Option<i64>> {
        Ok(ProjectsRepo::headcount(self.conn, project)?)
    }

    fn insert_assignment(&mut self, new_assignment: &NewAssignment) -> AppResult<Assignment> {
        Ok(AssignmentsRepo::insert(self.conn, new_assignment)?)
    }

    fn assigned_rows(&mut self, project: Uuid, worker: Option<Uuid>) -> AppResult<Vec<Assignment>> {
        Ok(AssignmentsRepo::assigned_rows(self.conn, project, worker)?)
    }

    fn set_assignment_status(&mut self, ids: &[Uuid], status: AssignmentStatus) -> AppResult<()> {
        AssignmentsRepo::set_status(self.conn, ids, status)?;
        Ok(())
    }

    fn record_pm_allocation(&mut self, allocation: &NewPmAllocation) -> AppResult<()> {
        AssignmentsRepo::record_pm_allocation(self.conn, allocation)?;
        Ok(())
    }

    fn clear_pm_allocations(&mut self, project: Uuid, worker: Option<Uuid>) -> AppResult<()> {
        AssignmentsRepo::clear_pm_allocations(self.conn, project, worker)?;
        Ok(())
    }

    fn logged_hours_on(&mut self, worker: Uuid, project: Uuid, day: NaiveDate) -> AppResult<f64> {
        Ok(WorkLogsRepo::hours_on(self.conn, worker, project, day)?)
    }

    fn insert_worklog(&mut self, new_log: &NewWorkLog) -> AppResult<WorkLog> {
        Ok(WorkLogsRepo::insert(self.conn, new_log)?)
    }
}
