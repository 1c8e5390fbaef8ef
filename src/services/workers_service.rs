use diesel::prelude::*;

use crate::{
    db::enums::UserRole,
    db::models::{CurrentUser, User, WorkerDetails, WorkerSummary},
    db::repositories::UsersRepo,
    error::AppError,
    services::ledger::WEEKLY_CAPACITY,
    utils::AvatarUrlHelper,
    validation::auth::{normalize_skills, validate_skills},
};

pub struct WorkersService;

impl WorkersService {
    /// The resource manager's worker directory.
    pub fn directory(
        conn: &mut PgConnection,
        user: &CurrentUser,
        avatars: &AvatarUrlHelper,
    ) -> Result<Vec<WorkerSummary>, AppError> {
        user.require_role(UserRole::ResourceManager)?;
        Ok(UsersRepo::list_workers(conn)?
            .into_iter()
            .map(|(worker, details)| summarize(avatars, worker, details))
            .collect())
    }

    pub fn update_own_skills(
        conn: &mut PgConnection,
        user: &CurrentUser,
        skills: &[String],
    ) -> Result<Vec<String>, AppError> {
        validate_skills(skills)?;
        let skills = normalize_skills(skills);
        let updated = UsersRepo::update_skills(conn, user.id, &skills)?;
        if updated == 0 {
            return Err(AppError::not_found("Worker details"));
        }
        tracing::info!(user_id = %user.id, skills = skills.len(), "Skills updated");
        Ok(skills)
    }
}

pub fn summarize(avatars: &AvatarUrlHelper, worker: User, details: WorkerDetails) -> WorkerSummary {
    let avatar_url = avatars
        .resolve(details.profile_pic.as_deref(), &worker.name)
        .into_owned();
    WorkerSummary {
        id: worker.id,
        name: worker.name,
        email: worker.email,
        employee_id: details.employee_id,
        job_title: details.job_title,
        experience_level: details.experience_level,
        skills: details.skills,
        committed_hours: (WEEKLY_CAPACITY - details.total_available_hours).max(0),
        total_available_hours: details.total_available_hours,
        status: details.status,
        avatar_url,
    }
}
