use diesel::prelude::*;
use uuid::Uuid;

use crate::db::enums::{UserRole, WorkerStatus};
use crate::db::models::user::{User, WorkerCapacity, WorkerDetails};

pub struct UsersRepo;

impl UsersRepo {
    pub fn find_active_by_email(conn: &mut PgConnection, address: &str) -> Result<Option<User>, diesel::result::Error> {
        use crate::schema::users::dsl::*;
        users
            .filter(email.eq(address))
            .filter(is_active.eq(true))
            .select(User::as_select())
            .first::<User>(conn)
            .optional()
    }

    pub fn find_active_by_id(conn: &mut PgConnection, user_id: Uuid) -> Result<Option<User>, diesel::result::Error> {
        use crate::schema::users::dsl::*;
        users
            .filter(id.eq(user_id))
            .filter(is_active.eq(true))
            .select(User::as_select())
            .first::<User>(conn)
            .optional()
    }

    pub fn capacity(conn: &mut PgConnection, worker: Uuid) -> Result<Option<WorkerCapacity>, diesel::result::Error> {
        use crate::schema::user_details::dsl::*;
        user_details
            .filter(user_id.eq(worker))
            .select(WorkerCapacity::as_select())
            .first::<WorkerCapacity>(conn)
            .optional()
    }

    pub fn update_capacity(
        conn: &mut PgConnection,
        worker: Uuid,
        available: i32,
        new_status: WorkerStatus,
    ) -> Result<usize, diesel::result::Error> {
        use crate::schema::user_details::dsl::*;
        diesel::update(user_details.filter(user_id.eq(worker)))
            .set((
                total_available_hours.eq(available),
                status.eq(new_status),
                updated_at.eq(chrono::Utc::now()),
            ))
            .execute(conn)
    }

    pub fn all_capacities(conn: &mut PgConnection) -> Result<Vec<WorkerCapacity>, diesel::result::Error> {
        use crate::schema::user_details::dsl::*;
        user_details
            .select(WorkerCapacity::as_select())
            .order(user_id.asc())
            .load::<WorkerCapacity>(conn)
    }

    /// Active employees with their details, the pool resource managers staff from.
    pub fn list_workers(conn: &mut PgConnection) -> Result<Vec<(User, WorkerDetails)>, diesel::result::Error> {
        use crate::schema::{user_details, users};
        users::table
            .inner_join(user_details::table.on(user_details::user_id.eq(users::id)))
            .filter(users::is_active.eq(true))
            .filter(users::role.eq(UserRole::Employee))
            .select((User::as_select(), WorkerDetails::as_select()))
            .order(users::name.asc())
            .load::<(User, WorkerDetails)>(conn)
    }

    pub fn workers_by_ids(
        conn: &mut PgConnection,
        ids: &[Uuid],
    ) -> Result<Vec<(User, WorkerDetails)>, diesel::result::Error> {
        use crate::schema::{user_details, users};
        users::table
            .inner_join(user_details::table.on(user_details::user_id.eq(users::id)))
            .filter(users::id.eq_any(ids.to_vec()))
            .select((User::as_select(), WorkerDetails::as_select()))
            .order(users::name.asc())
            .load::<(User, WorkerDetails)>(conn)
    }

    pub fn update_skills(conn: &mut PgConnection, worker: Uuid, new_skills: &[String]) -> Result<usize, diesel::result::Error> {
        use crate::schema::user_details::dsl::*;
        diesel::update(user_details.filter(user_id.eq(worker)))
            .set((skills.eq(new_skills.to_vec()), updated_at.eq(chrono::Utc::now())))
            .execute(conn)
    }
}
