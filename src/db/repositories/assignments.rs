use diesel::prelude::*;
use uuid::Uuid;

use crate::db::enums::AssignmentStatus;
use crate::db::models::assignment::{Assignment, NewAssignment, NewPmAllocation, PmAllocation};
use crate::db::models::user::{User, WorkerDetails};

pub struct AssignmentsRepo;

impl AssignmentsRepo {
    pub fn insert(conn: &mut PgConnection, new_assignment: &NewAssignment) -> Result<Assignment, diesel::result::Error> {
        diesel::insert_into(crate::schema::project_assignments::table)
            .values(new_assignment)
            .returning(Assignment::as_returning())
            .get_result(conn)
    }

    /// Rows still in `assigned` status for a project, optionally narrowed to one worker.
    pub fn assigned_rows(
        conn: &mut PgConnection,
        project: Uuid,
        worker: Option<Uuid>,
    ) -> Result<Vec<Assignment>, diesel::result::Error> {
        use crate::schema::project_assignments::dsl as pa;
        let mut query = pa::project_assignments
            .filter(pa::project_id.eq(project))
            .filter(pa::status.eq(AssignmentStatus::Assigned))
            .select(Assignment::as_select())
            .into_boxed();
        if let Some(worker) = worker {
            query = query.filter(pa::user_id.eq(worker));
        }
        query.order(pa::assigned_at.asc()).load::<Assignment>(conn)
    }

    pub fn set_status(
        conn: &mut PgConnection,
        ids: &[Uuid],
        new_status: AssignmentStatus,
    ) -> Result<usize, diesel::result::Error> {
        use crate::schema::project_assignments::dsl as pa;
        diesel::update(pa::project_assignments.filter(pa::id.eq_any(ids.to_vec())))
            .set((pa::status.eq(new_status), pa::updated_at.eq(chrono::Utc::now())))
            .execute(conn)
    }

    pub fn assigned_for_projects(
        conn: &mut PgConnection,
        projects: &[Uuid],
    ) -> Result<Vec<Assignment>, diesel::result::Error> {
        use crate::schema::project_assignments::dsl as pa;
        pa::project_assignments
            .filter(pa::project_id.eq_any(projects.to_vec()))
            .filter(pa::status.eq(AssignmentStatus::Assigned))
            .select(Assignment::as_select())
            .load::<Assignment>(conn)
    }

    pub fn first_assigned_for_worker(
        conn: &mut PgConnection,
        project: Uuid,
        worker: Uuid,
    ) -> Result<Option<Assignment>, diesel::result::Error> {
        Self::assigned_rows(conn, project, Some(worker)).map(|rows| rows.into_iter().next())
    }

    /// Assigned rows on a project joined with the worker's identity and details.
    pub fn team_of(
        conn: &mut PgConnection,
        project: Uuid,
    ) -> Result<Vec<(Assignment, User, Option<WorkerDetails>)>, diesel::result::Error> {
        use crate::schema::{project_assignments as pa, user_details, users};
        pa::table
            .inner_join(users::table.on(users::id.eq(pa::user_id)))
            .left_join(user_details::table.on(user_details::user_id.eq(pa::user_id)))
            .filter(pa::project_id.eq(project))
            .filter(pa::status.eq(AssignmentStatus::Assigned))
            .select((
                Assignment::as_select(),
                User::as_select(),
                Option::<WorkerDetails>::as_select(),
            ))
            .order(users::name.asc())
            .load(conn)
    }

    /// Committed hours per worker across every assigned row.
    pub fn committed_by_worker(conn: &mut PgConnection) -> Result<Vec<(Uuid, Option<i64>)>, diesel::result::Error> {
        use crate::schema::project_assignments::dsl as pa;
        pa::project_assignments
            .filter(pa::status.eq(AssignmentStatus::Assigned))
            .group_by(pa::user_id)
            .select((pa::user_id, diesel::dsl::sum(pa::assigned_hours)))
            .load::<(Uuid, Option<i64>)>(conn)
    }

    pub fn clear_pm_allocations(
        conn: &mut PgConnection,
        project: Uuid,
        worker: Option<Uuid>,
    ) -> Result<usize, diesel::result::Error> {
        use crate::schema::employee_assigned::dsl as ea;
        match worker {
            Some(worker) => diesel::delete(
                ea::employee_assigned
                    .filter(ea::project_id.eq(project))
                    .filter(ea::user_id.eq(worker)),
            )
            .execute(conn),
            None => diesel::delete(ea::employee_assigned.filter(ea::project_id.eq(project))).execute(conn),
        }
    }

    /// Records a PM allocation unless one already exists for the pair.
    pub fn record_pm_allocation(
        conn: &mut PgConnection,
        allocation: &NewPmAllocation,
    ) -> Result<PmAllocation, diesel::result::Error> {
        use crate::schema::employee_assigned::dsl as ea;
        let existing = ea::employee_assigned
            .filter(ea::project_id.eq(allocation.project_id))
            .filter(ea::user_id.eq(allocation.user_id))
            .select(PmAllocation::as_select())
            .first::<PmAllocation>(conn)
            .optional()?;
        match existing {
            Some(row) => Ok(row),
            None => diesel::insert_into(ea::employee_assigned)
                .values(allocation)
                .returning(PmAllocation::as_returning())
                .get_result(conn),
        }
    }
}
