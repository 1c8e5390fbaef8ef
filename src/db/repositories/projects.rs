use diesel::prelude::*;
use uuid::Uuid;

use crate::db::enums::{ProjectPriority, ProjectStatus};
use crate::db::models::project::{
    NewProject, NewProjectRequirement, Project, ProjectRequirement,
};

pub struct ProjectsRepo;

impl ProjectsRepo {
    pub fn insert(conn: &mut PgConnection, new_project: &NewProject) -> Result<Project, diesel::result::Error> {
        diesel::insert_into(crate::schema::projects::table)
            .values(new_project)
            .returning(Project::as_returning())
            .get_result(conn)
    }

    pub fn find_by_id(conn: &mut PgConnection, project_id: Uuid) -> Result<Option<Project>, diesel::result::Error> {
        use crate::schema::projects::dsl::*;
        projects
            .filter(id.eq(project_id))
            .select(Project::as_select())
            .first::<Project>(conn)
            .optional()
    }

    pub fn update_status(
        conn: &mut PgConnection,
        project_id: Uuid,
        new_status: ProjectStatus,
        new_end_date: Option<chrono::NaiveDate>,
    ) -> Result<usize, diesel::result::Error> {
        use crate::schema::projects::dsl as p;
        let now = chrono::Utc::now();
        match new_end_date {
            Some(date) => diesel::update(p::projects.filter(p::id.eq(project_id)))
                .set((p::status.eq(new_status), p::end_date.eq(date), p::updated_at.eq(now)))
                .execute(conn),
            None => diesel::update(p::projects.filter(p::id.eq(project_id)))
                .set((p::status.eq(new_status), p::updated_at.eq(now)))
                .execute(conn),
        }
    }

    pub fn list_by_creator(
        conn: &mut PgConnection,
        creator: Uuid,
        statuses: &[ProjectStatus],
    ) -> Result<Vec<Project>, diesel::result::Error> {
        use crate::schema::projects::dsl as p;
        p::projects
            .filter(p::created_by.eq(creator))
            .filter(p::status.eq_any(statuses.to_vec()))
            .select(Project::as_select())
            .order(p::created_at.desc())
            .load::<Project>(conn)
    }

    pub fn count_by_creator(
        conn: &mut PgConnection,
        creator: Uuid,
        statuses: &[ProjectStatus],
        priority: Option<ProjectPriority>,
    ) -> Result<i64, diesel::result::Error> {
        use crate::schema::projects::dsl as p;
        let mut query = p::projects
            .filter(p::created_by.eq(creator))
            .filter(p::status.eq_any(statuses.to_vec()))
            .into_boxed();
        if let Some(level) = priority {
            query = query.filter(p::priority.eq(level));
        }
        query.count().get_result(conn)
    }

    pub fn open_ids_for_creator(conn: &mut PgConnection, creator: Uuid) -> Result<Vec<Uuid>, diesel::result::Error> {
        use crate::schema::projects::dsl as p;
        p::projects
            .filter(p::created_by.eq(creator))
            .filter(p::status.eq_any(ProjectStatus::OPEN.to_vec()))
            .select(p::id)
            .load::<Uuid>(conn)
    }

    pub fn insert_requirement(
        conn: &mut PgConnection,
        requirement: &NewProjectRequirement,
    ) -> Result<ProjectRequirement, diesel::result::Error> {
        diesel::insert_into(crate::schema::project_requirements::table)
            .values(requirement)
            .returning(ProjectRequirement::as_returning())
            .get_result(conn)
    }

    pub fn requirements_for(
        conn: &mut PgConnection,
        project: Uuid,
    ) -> Result<Vec<ProjectRequirement>, diesel::result::Error> {
        use crate::schema::project_requirements::dsl as r;
        r::project_requirements
            .filter(r::project_id.eq(project))
            .select(ProjectRequirement::as_select())
            .order(r::created_at.asc())
            .load::<ProjectRequirement>(conn)
    }

    /// Sum of `quantity_needed` over the project's requirements.
    pub fn headcount(conn: &mut PgConnection, project: Uuid) -> Result<Option<i64>, diesel::result::Error> {
        use crate::schema::project_requirements::dsl as r;
        r::project_requirements
            .filter(r::project_id.eq(project))
            .select(diesel::dsl::sum(r::quantity_needed))
            .first::<Option<i64>>(conn)
    }
}
