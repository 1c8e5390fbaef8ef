use diesel::prelude::*;
use uuid::Uuid;

use crate::db::models::worklog::{NewWorkLog, WorkLog};

pub struct WorkLogsRepo;

impl WorkLogsRepo {
    pub fn insert(conn: &mut PgConnection, new_log: &NewWorkLog) -> Result<WorkLog, diesel::result::Error> {
        diesel::insert_into(crate::schema::worklogs::table)
            .values(new_log)
            .returning(WorkLog::as_returning())
            .get_result(conn)
    }

    pub fn hours_on(
        conn: &mut PgConnection,
        worker: Uuid,
        project: Uuid,
        day: chrono::NaiveDate,
    ) -> Result<f64, diesel::result::Error> {
        use crate::schema::worklogs::dsl as w;
        w::worklogs
            .filter(w::user_id.eq(worker))
            .filter(w::project_id.eq(project))
            .filter(w::log_date.eq(day))
            .select(diesel::dsl::sum(w::hours))
            .first::<Option<f64>>(conn)
            .map(|total| total.unwrap_or(0.0))
    }

    pub fn for_worker_on(
        conn: &mut PgConnection,
        worker: Uuid,
        day: chrono::NaiveDate,
    ) -> Result<Vec<WorkLog>, diesel::result::Error> {
        use crate::schema::worklogs::dsl as w;
        w::worklogs
            .filter(w::user_id.eq(worker))
            .filter(w::log_date.eq(day))
            .select(WorkLog::as_select())
            .order(w::created_at.asc())
            .load::<WorkLog>(conn)
    }

    /// Logs against any of `projects` dated within `[from, to]` inclusive.
    pub fn for_projects_between(
        conn: &mut PgConnection,
        projects: &[Uuid],
        from: chrono::NaiveDate,
        to: chrono::NaiveDate,
    ) -> Result<Vec<WorkLog>, diesel::result::Error> {
        use crate::schema::worklogs::dsl as w;
        w::worklogs
            .filter(w::project_id.eq_any(projects.to_vec()))
            .filter(w::log_date.ge(from))
            .filter(w::log_date.le(to))
            .select(WorkLog::as_select())
            .load::<WorkLog>(conn)
    }
}
