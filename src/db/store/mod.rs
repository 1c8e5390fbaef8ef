//! The narrow persistence seam used by the capacity ledger, the assignment
//! service and work-log writes.
//!
//! Handlers hand a [`PgStore`] borrowed from the request's transaction to the
//! services; tests use [`InMemoryStore`]. Read-only dashboard queries go
//! straight to the repositories instead.

pub mod memory;
pub mod pg;

pub use memory::InMemoryStore;
pub use pg::PgStore;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::db::enums::{AssignmentStatus, ProjectStatus, WorkerStatus};
use crate::db::models::{
    Assignment, NewAssignment, NewPmAllocation, NewWorkLog, Project, WorkLog, WorkerCapacity,
};
use crate::error::AppResult;

pub trait ResourceStore {
    fn worker_capacity(&mut self, worker: Uuid) -> AppResult<Option<WorkerCapacity>>;

    fn update_worker_capacity(
        &mut self,
        worker: Uuid,
        available: i32,
        status: WorkerStatus,
    ) -> AppResult<()>;

    fn find_project(&mut self, project: Uuid) -> AppResult<Option<Project>>;

    /// `end_date` of `None` leaves the stored end date untouched.
    fn update_project_status(
        &mut self,
        project: Uuid,
        status: ProjectStatus,
        end_date: Option<NaiveDate>,
    ) -> AppResult<()>;

    /// Sum of `quantity_needed` across the project's requirements, `None` when it has none.
    fn requirement_headcount(&mut self, project: Uuid) -> AppResult<Option<i64>>;

    fn insert_assignment(&mut self, new_assignment: &NewAssignment) -> AppResult<Assignment>;

    fn assigned_rows(&mut self, project: Uuid, worker: Option<Uuid>) -> AppResult<Vec<Assignment>>;

    fn set_assignment_status(&mut self, ids: &[Uuid], status: AssignmentStatus) -> AppResult<()>;

    fn record_pm_allocation(&mut self, allocation: &NewPmAllocation) -> AppResult<()>;

    fn clear_pm_allocations(&mut self, project: Uuid, worker: Option<Uuid>) -> AppResult<()>;

    fn logged_hours_on(&mut self, worker: Uuid, project: Uuid, day: NaiveDate) -> AppResult<f64>;

    fn insert_worklog(&mut self, new_log: &NewWorkLog) -> AppResult<WorkLog>;
}
