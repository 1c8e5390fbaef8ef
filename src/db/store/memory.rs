use std::collections::HashMap;

use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use super::ResourceStore;
use crate::db::enums::{AssignmentStatus, AssignmentType, ProjectPriority, ProjectStatus, WorkerStatus};
use crate::db::models::{
    Assignment, NewAssignment, NewPmAllocation, NewWorkLog, PmAllocation, Project, WorkLog,
    WorkerCapacity,
};
use crate::error::AppResult;

/// Map-backed store for exercising the ledger and assignment flows without Postgres.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    workers: HashMap<Uuid, WorkerCapacity>,
    projects: HashMap<Uuid, Project>,
    headcounts: HashMap<Uuid, i64>,
    assignments: Vec<Assignment>,
    pm_allocations: Vec<PmAllocation>,
    worklogs: Vec<WorkLog>,
    capacity_writes: usize,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a worker with the given available hours and the matching status.
    pub fn add_worker(&mut self, available: i32) -> Uuid {
        let id = Uuid::new_v4();
        self.workers.insert(
            id,
            WorkerCapacity {
                user_id: id,
                total_available_hours: available,
                status: crate::services::ledger::CapacityLedger::status_for(available),
            },
        );
        id
    }

    pub fn add_project(&mut self, owner: Uuid, status: ProjectStatus) -> Uuid {
        let id = Uuid::new_v4();
        let now = Utc::now();
        self.projects.insert(
            id,
            Project {
                id,
                name: format!("project-{}", &id.to_string()[..8]),
                description: None,
                status,
                priority: ProjectPriority::Medium,
                start_date: None,
                end_date: None,
                duration_days: None,
                created_by: owner,
                created_at: now,
                updated_at: now,
            },
        );
        id
    }

    pub fn set_headcount(&mut self, project: Uuid, headcount: i64) {
        self.headcounts.insert(project, headcount);
    }

    /// Inserts an assigned row directly, bypassing the ledger.
    pub fn seed_assignment(&mut self, project: Uuid, worker: Uuid, hours: i32) -> Uuid {
        let row = self.build_assignment(&NewAssignment {
            project_id: project,
            user_id: worker,
            role_in_project: None,
            status: AssignmentStatus::Assigned,
            assignment_type: AssignmentType::for_hours(hours),
            assigned_hours: hours,
            allocation_percent: 0,
        });
        let id = row.id;
        self.assignments.push(row);
        id
    }

    pub fn capacity(&self, worker: Uuid) -> Option<WorkerCapacity> {
        self.workers.get(&worker).copied()
    }

    pub fn project(&self, project: Uuid) -> Option<&Project> {
        self.projects.get(&project)
    }

    pub fn assignments(&self) -> &[Assignment] {
        &self.assignments
    }

    pub fn pm_allocations(&self) -> &[PmAllocation] {
        &self.pm_allocations
    }

    pub fn worklogs(&self) -> &[WorkLog] {
        &self.worklogs
    }

    /// Number of persisted capacity updates so far.
    pub fn capacity_writes(&self) -> usize {
        self.capacity_writes
    }

    fn build_assignment(&self, new_assignment: &NewAssignment) -> Assignment {
        let now = Utc::now();
        Assignment {
            id: Uuid::new_v4(),
            project_id: new_assignment.project_id,
            user_id: new_assignment.user_id,
            role_in_project: new_assignment.role_in_project.clone(),
            status: new_assignment.status,
            assignment_type: new_assignment.assignment_type,
            assigned_hours: new_assignment.assigned_hours,
            allocation_percent: new_assignment.allocation_percent,
            assigned_at: now,
            updated_at: now,
        }
    }
}

impl ResourceStore for InMemoryStore {
    fn worker_capacity(&mut self, worker: Uuid) -> AppResult<Option<WorkerCapacity>> {
        Ok(self.workers.get(&worker).copied())
    }

    fn update_worker_capacity(
        &mut self,
        worker: Uuid,
        available: i32,
        status: WorkerStatus,
    ) -> AppResult<()> {
        if let Some(entry) = self.workers.get_mut(&worker) {
            entry.total_available_hours = available;
            entry.status = status;
            self.capacity_writes += 1;
        }
        Ok(())
    }

    fn find_project(&mut self, project: Uuid) -> AppResult<Option<Project>> {
        Ok(self.projects.get(&project).cloned())
    }

    fn update_project_status(
        &mut self,
        project: Uuid,
        status: ProjectStatus,
        end_date: Option<NaiveDate>,
    ) -> AppResult<()> {
        if let Some(entry) = self.projects.get_mut(&project) {
            entry.status = status;
            if end_date.is_some() {
                entry.end_date = end_date;
            }
            entry.updated_at = Utc::now();
        }
        Ok(())
    }

    fn requirement_headcount(&mut self, project: Uuid) -> AppResult<Option<i64>> {
        Ok(self.headcounts.get(&project).copied())
    }

    fn insert_assignment(&mut self, new_assignment: &NewAssignment) -> AppResult<Assignment> {
        let row = self.build_assignment(new_assignment);
        self.assignments.push(row.clone());
        Ok(row)
    }

    fn assigned_rows(&mut self, project: Uuid, worker: Option<Uuid>) -> AppResult<Vec<Assignment>> {
        Ok(self
            .assignments
            .iter()
            .filter(|row| row.project_id == project && row.status == AssignmentStatus::Assigned)
            .filter(|row| worker.map_or(true, |w| row.user_id == w))
            .cloned()
            .collect())
    }

    fn set_assignment_status(&mut self, ids: &[Uuid], status: AssignmentStatus) -> AppResult<()> {
        let now = Utc::now();
        for row in self.assignments.iter_mut().filter(|row| ids.contains(&row.id)) {
            row.status = status;
            row.updated_at = now;
        }
        Ok(())
    }

    fn record_pm_allocation(&mut self, allocation: &NewPmAllocation) -> AppResult<()> {
        let exists = self
            .pm_allocations
            .iter()
            .any(|row| row.project_id == allocation.project_id && row.user_id == allocation.user_id);
        if !exists {
            self.pm_allocations.push(PmAllocation {
                id: Uuid::new_v4(),
                project_id: allocation.project_id,
                user_id: allocation.user_id,
                created_by: allocation.created_by,
                created_at: Utc::now(),
            });
        }
        Ok(())
    }

    fn clear_pm_allocations(&mut self, project: Uuid, worker: Option<Uuid>) -> AppResult<()> {
        self.pm_allocations
            .retain(|row| !(row.project_id == project && worker.map_or(true, |w| row.user_id == w)));
        Ok(())
    }

    fn logged_hours_on(&mut self, worker: Uuid, project: Uuid, day: NaiveDate) -> AppResult<f64> {
        Ok(self
            .worklogs
            .iter()
            .filter(|log| log.user_id == worker && log.project_id == project && log.log_date == day)
            .map(|log| log.hours)
            .sum())
    }

    fn insert_worklog(&mut self, new_log: &NewWorkLog) -> AppResult<WorkLog> {
        let row = WorkLog {
            id: Uuid::new_v4(),
            user_id: new_log.user_id,
            project_id: new_log.project_id,
            log_date: new_log.log_date,
            hours: new_log.hours,
            work_type: new_log.work_type.clone(),
            work_description: new_log.work_description.clone(),
            status: new_log.status,
            created_at: Utc::now(),
        };
        self.worklogs.push(row.clone());
        Ok(row)
    }
}
