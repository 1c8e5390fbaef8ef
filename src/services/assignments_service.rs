use std::collections::{BTreeMap, HashSet};

use chrono::NaiveDate;
use uuid::Uuid;

use crate::{
    db::enums::{AssignmentStatus, AssignmentType, ProjectStatus},
    db::models::{
        api::error_codes, Assignment, ClosureSummary, NewAssignment, Project, ReleasedHours,
        SelectionFailure, SelectionOutcome, WorkerCapacity, WorkerSelection,
    },
    db::store::ResourceStore,
    error::AppError,
    services::ledger::{CapacityLedger, WEEKLY_CAPACITY},
    validation::assignment::{validate_hours_per_week, validate_selection},
};

/// `round(hours / 40 * 100)`.
pub fn allocation_percent(hours_per_week: i32) -> i32 {
    ((hours_per_week as f64 / WEEKLY_CAPACITY as f64) * 100.0).round() as i32
}

pub struct AssignmentsService;

impl AssignmentsService {
    pub fn assign<S: ResourceStore + ?Sized>(
        store: &mut S,
        worker: Uuid,
        project: Uuid,
        hours_per_week: i32,
        assignment_type: Option<AssignmentType>,
        role_in_project: Option<String>,
    ) -> Result<Assignment, AppError> {
        validate_hours_per_week(hours_per_week)?;
        Self::open_project(store, project)?;

        CapacityLedger::commit(store, worker, hours_per_week)?;

        let new_assignment = NewAssignment {
            project_id: project,
            user_id: worker,
            role_in_project,
            status: AssignmentStatus::Assigned,
            assignment_type: assignment_type.unwrap_or_else(|| AssignmentType::for_hours(hours_per_week)),
            assigned_hours: hours_per_week,
            allocation_percent: allocation_percent(hours_per_week),
        };

        match store.insert_assignment(&new_assignment) {
            Ok(created) => {
                tracing::info!(
                    worker_id = %worker,
                    project_id = %project,
                    hours_per_week,
                    assignment_type = %created.assignment_type,
                    "Worker assigned"
                );
                Ok(created)
            }
            Err(insert_err) => {
                if let Err(release_err) = CapacityLedger::release(store, worker, hours_per_week) {
                    tracing::error!(
                        worker_id = %worker,
                        hours_per_week,
                        error = %release_err,
                        "Compensating release failed after assignment insert error"
                    );
                }
                Err(insert_err)
            }
        }
    }

    /// Ends every assigned row for the pair and gives their summed hours back.
    pub fn remove<S: ResourceStore + ?Sized>(
        store: &mut S,
        worker: Uuid,
        project: Uuid,
    ) -> Result<WorkerCapacity, AppError> {
        let rows = store.assigned_rows(project, Some(worker))?;
        if rows.is_empty() {
            return Err(AppError::not_found("Assignment"));
        }
        if rows.len() > 1 {
            tracing::warn!(
                worker_id = %worker,
                project_id = %project,
                rows = rows.len(),
                "Multiple assigned rows for one worker and project"
            );
        }

        let hours: i32 = rows.iter().map(|row| row.assigned_hours).sum();
        let ids: Vec<Uuid> = rows.iter().map(|row| row.id).collect();

        store.set_assignment_status(&ids, AssignmentStatus::Removed)?;
        store.clear_pm_allocations(project, Some(worker))?;
        let capacity = CapacityLedger::release(store, worker, hours)?;

        tracing::info!(worker_id = %worker, project_id = %project, hours, "Worker removed from project");
        Ok(capacity)
    }

    pub fn complete_project<S: ResourceStore + ?Sized>(
        store: &mut S,
        project: Uuid,
    ) -> Result<ClosureSummary, AppError> {
        Self::complete_project_on(store, project, chrono::Local::now().date_naive())
    }

    pub fn complete_project_on<S: ResourceStore + ?Sized>(
        store: &mut S,
        project: Uuid,
        today: NaiveDate,
    ) -> Result<ClosureSummary, AppError> {
        Self::close_project(
            store,
            project,
            AssignmentStatus::Completed,
            ProjectStatus::Completed,
            Some(today),
        )
    }

    pub fn drop_project<S: ResourceStore + ?Sized>(
        store: &mut S,
        project: Uuid,
    ) -> Result<ClosureSummary, AppError> {
        Self::close_project(
            store,
            project,
            AssignmentStatus::Removed,
            ProjectStatus::Cancelled,
            None,
        )
    }

    /// Brings the project's assigned team in line with a resource manager's selection.
    ///
    /// Capacity, validation and missing-worker problems are reported per worker;
    /// anything else aborts the whole call.
    pub fn save_selection<S: ResourceStore + ?Sized>(
        store: &mut S,
        project: Uuid,
        selections: &[WorkerSelection],
    ) -> Result<SelectionOutcome, AppError> {
        validate_selection(selections)?;
        let current_project = Self::open_project(store, project)?;

        if let Some(limit) = store.requirement_headcount(project)? {
            if limit > 0 && selections.len() as i64 > limit {
                return Err(AppError::conflict_with_code(
                    format!(
                        "Project needs {} members but {} were selected",
                        limit,
                        selections.len()
                    ),
                    Some("selections".to_string()),
                    error_codes::PROJECT_TEAM_FULL,
                ));
            }
        }

        let current: HashSet<Uuid> = store
            .assigned_rows(project, None)?
            .into_iter()
            .map(|row| row.user_id)
            .collect();
        let desired: HashSet<Uuid> = selections.iter().map(|s| s.user_id).collect();

        let mut outcome = SelectionOutcome::default();

        let mut to_remove: Vec<Uuid> = current.difference(&desired).copied().collect();
        to_remove.sort();
        for worker in to_remove {
            Self::remove(store, worker, project)?;
            outcome.removed.push(worker);
        }

        for selection in selections.iter().filter(|s| !current.contains(&s.user_id)) {
            match Self::assign(
                store,
                selection.user_id,
                project,
                selection.hours_per_week,
                selection.assignment_type,
                None,
            ) {
                Ok(created) => outcome.assigned.push(created),
                Err(e) if e.is_validation() || e.is_insufficient_capacity() || e.is_not_found() => {
                    tracing::warn!(
                        worker_id = %selection.user_id,
                        project_id = %project,
                        error = %e,
                        "Selection skipped"
                    );
                    outcome.failed.push(SelectionFailure {
                        user_id: selection.user_id,
                        reason: Self::failure_reason(&e),
                    });
                }
                Err(e) => return Err(e),
            }
        }

        let staffed = !store.assigned_rows(project, None)?.is_empty();
        if staffed && current_project.status != ProjectStatus::Active {
            store.update_project_status(project, ProjectStatus::Active, None)?;
        }

        tracing::info!(
            project_id = %project,
            assigned = outcome.assigned.len(),
            removed = outcome.removed.len(),
            failed = outcome.failed.len(),
            "Selection saved"
        );
        Ok(outcome)
    }

    fn close_project<S: ResourceStore + ?Sized>(
        store: &mut S,
        project: Uuid,
        row_status: AssignmentStatus,
        project_status: ProjectStatus,
        end_date: Option<NaiveDate>,
    ) -> Result<ClosureSummary, AppError> {
        Self::open_project(store, project)?;

        let rows = store.assigned_rows(project, None)?;
        let mut per_worker: BTreeMap<Uuid, i32> = BTreeMap::new();
        for row in &rows {
            *per_worker.entry(row.user_id).or_insert(0) += row.assigned_hours;
        }
        let ids: Vec<Uuid> = rows.iter().map(|row| row.id).collect();

        if !ids.is_empty() {
            store.set_assignment_status(&ids, row_status)?;
        }

        let mut released = Vec::with_capacity(per_worker.len());
        for (worker, hours) in per_worker {
            CapacityLedger::release(store, worker, hours)?;
            released.push(ReleasedHours { user_id: worker, hours });
        }

        store.clear_pm_allocations(project, None)?;
        store.update_project_status(project, project_status, end_date)?;

        tracing::info!(
            project_id = %project,
            status = %project_status,
            rows = ids.len(),
            workers = released.len(),
            "Project closed"
        );

        Ok(ClosureSummary {
            project_id: project,
            status: project_status,
            rows_closed: ids.len(),
            released,
        })
    }

    fn open_project<S: ResourceStore + ?Sized>(store: &mut S, project: Uuid) -> Result<Project, AppError> {
        let found = store
            .find_project(project)?
            .ok_or_else(|| AppError::not_found("Project"))?;
        if found.status.is_closed() {
            return Err(AppError::conflict_with_code(
                format!("Project is already {}", found.status),
                None,
                error_codes::PROJECT_CLOSED,
            ));
        }
        Ok(found)
    }

    fn failure_reason(err: &AppError) -> String {
        match err {
            AppError::InsufficientCapacity {
                requested,
                available,
                ..
            } => format!(
                "Insufficient hours ({}h available, {}h required)",
                available, requested
            ),
            AppError::Validation { message, .. } => message.clone(),
            AppError::NotFound { resource } => format!("{} not found", resource),
            other => other.to_string(),
        }
    }
}
