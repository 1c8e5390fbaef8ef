use std::collections::HashSet;

use diesel::prelude::*;
use uuid::Uuid;

use crate::{
    db::enums::{ProjectPriority, ProjectStatus, RequestStatus, UserRole},
    db::models::{
        Assignment, CreateProjectRequest, CreatedProject, CurrentUser, NewProject,
        NewProjectRequirement, NewResourceRequest, Project, ProjectInfo, ProjectRequirement,
        ProjectTrackingStats, TeamMember, User, WorkerDetails,
    },
    db::repositories::{AssignmentsRepo, ProjectsRepo, RequestsRepo},
    error::AppError,
    utils::AvatarUrlHelper,
    validation::project::{duration_days, validate_create_project},
};

pub struct ProjectsService;

impl ProjectsService {
    /// Creates a pending project with its requirements and files one resource request per requirement.
    pub fn create(
        conn: &mut PgConnection,
        user: &CurrentUser,
        req: &CreateProjectRequest,
    ) -> Result<CreatedProject, AppError> {
        user.require_role(UserRole::ProjectManager)?;
        validate_create_project(req)?;

        let duration = duration_days(req.start_date, req.end_date);
        let project = ProjectsRepo::insert(
            conn,
            &NewProject {
                name: req.name.trim().to_string(),
                description: req.description.clone(),
                status: ProjectStatus::Pending,
                priority: req.priority,
                start_date: Some(req.start_date),
                end_date: Some(req.end_date),
                duration_days: Some(duration),
                created_by: user.id,
            },
        )?;

        let mut requirements = Vec::with_capacity(req.requirements.len());
        for input in &req.requirements {
            let requirement = ProjectsRepo::insert_requirement(
                conn,
                &NewProjectRequirement {
                    project_id: project.id,
                    experience_level: input.experience_level,
                    quantity_needed: input.quantity,
                    required_skills: input.skills.iter().map(|s| s.trim().to_string()).collect(),
                    preferred_assignment_type: input.assignment_type,
                },
            )?;
            requirements.push(requirement);
        }

        let mut requests = Vec::with_capacity(requirements.len());
        for new_request in resource_requests_for(&project, &requirements, user.id, req.notes.as_deref()) {
            requests.push(RequestsRepo::insert(conn, &new_request)?);
        }

        tracing::info!(
            project_id = %project.id,
            created_by = %user.id,
            requirements = requirements.len(),
            "Project created"
        );

        Ok(CreatedProject {
            project,
            requirements,
            requests,
        })
    }

    pub fn active(
        conn: &mut PgConnection,
        user: &CurrentUser,
        avatars: &AvatarUrlHelper,
    ) -> Result<Vec<ProjectInfo>, AppError> {
        Self::list_infos(conn, user, avatars, &ProjectStatus::OPEN)
    }

    pub fn history(
        conn: &mut PgConnection,
        user: &CurrentUser,
        avatars: &AvatarUrlHelper,
    ) -> Result<Vec<ProjectInfo>, AppError> {
        Self::list_infos(conn, user, avatars, &ProjectStatus::CLOSED)
    }

    pub fn stats(conn: &mut PgConnection, user: &CurrentUser) -> Result<ProjectTrackingStats, AppError> {
        user.require_role(UserRole::ProjectManager)?;
        let active_projects = ProjectsRepo::count_by_creator(conn, user.id, &ProjectStatus::OPEN, None)?;
        let completed_projects =
            ProjectsRepo::count_by_creator(conn, user.id, &[ProjectStatus::Completed], None)?;
        let high_priority = ProjectsRepo::count_by_creator(
            conn,
            user.id,
            &ProjectStatus::OPEN,
            Some(ProjectPriority::High),
        )?;

        let open_ids = ProjectsRepo::open_ids_for_creator(conn, user.id)?;
        let total_members = if open_ids.is_empty() {
            0
        } else {
            AssignmentsRepo::assigned_for_projects(conn, &open_ids)?
                .iter()
                .map(|a| a.user_id)
                .collect::<HashSet<_>>()
                .len() as i64
        };

        Ok(ProjectTrackingStats {
            active_projects,
            completed_projects,
            total_members,
            high_priority,
        })
    }

    pub fn team(
        conn: &mut PgConnection,
        user: &CurrentUser,
        avatars: &AvatarUrlHelper,
        project_id: Uuid,
    ) -> Result<Vec<TeamMember>, AppError> {
        let project = Self::find_visible(conn, user, project_id)?;
        let rows = AssignmentsRepo::team_of(conn, project.id)?;
        Ok(rows
            .into_iter()
            .map(|row| team_member(avatars, row))
            .collect())
    }

    /// Loads a project the caller may act on: its manager or any resource manager.
    pub fn find_visible(
        conn: &mut PgConnection,
        user: &CurrentUser,
        project_id: Uuid,
    ) -> Result<Project, AppError> {
        let project = ProjectsRepo::find_by_id(conn, project_id)?
            .ok_or_else(|| AppError::not_found("Project"))?;
        match user.role {
            UserRole::ResourceManager => Ok(project),
            UserRole::ProjectManager if project.created_by == user.id => Ok(project),
            _ => Err(AppError::forbidden("You do not have access to this project")),
        }
    }

    fn list_infos(
        conn: &mut PgConnection,
        user: &CurrentUser,
        avatars: &AvatarUrlHelper,
        statuses: &[ProjectStatus],
    ) -> Result<Vec<ProjectInfo>, AppError> {
        user.require_role(UserRole::ProjectManager)?;
        let projects = ProjectsRepo::list_by_creator(conn, user.id, statuses)?;

        let mut infos = Vec::with_capacity(projects.len());
        for project in projects {
            let team_members: Vec<TeamMember> = AssignmentsRepo::team_of(conn, project.id)?
                .into_iter()
                .map(|row| team_member(avatars, row))
                .collect();
            infos.push(ProjectInfo {
                id: project.id,
                name: project.name,
                description: project.description,
                status: project.status,
                priority: project.priority,
                start_date: project.start_date,
                end_date: project.end_date,
                duration_days: project.duration_days,
                team_size: team_members.len(),
                team_members,
            });
        }
        Ok(infos)
    }
}

/// Pending resource requests for a freshly created project, one per requirement row.
pub fn resource_requests_for(
    project: &Project,
    requirements: &[ProjectRequirement],
    requested_by: Uuid,
    notes: Option<&str>,
) -> Vec<NewResourceRequest> {
    requirements
        .iter()
        .map(|requirement| NewResourceRequest {
            project_id: project.id,
            requirement_id: Some(requirement.id),
            requested_by,
            status: RequestStatus::Pending,
            notes: notes.map(str::to_string),
            start_date: project.start_date,
            end_date: project.end_date,
            duration_days: project.duration_days,
        })
        .collect()
}

fn team_member(
    avatars: &AvatarUrlHelper,
    (assignment, user, details): (Assignment, User, Option<WorkerDetails>),
) -> TeamMember {
    let profile_pic = details.as_ref().and_then(|d| d.profile_pic.as_deref());
    let avatar_url = avatars.resolve(profile_pic, &user.name).into_owned();
    let role = assignment
        .role_in_project
        .or_else(|| details.and_then(|d| d.job_title))
        .unwrap_or_else(|| "Team Member".to_string());
    TeamMember {
        user_id: user.id,
        name: user.name,
        email: user.email,
        role,
        assignment_type: assignment.assignment_type,
        assigned_hours: assignment.assigned_hours,
        avatar_url,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::enums::{AssignmentType, ExperienceLevel};
    use chrono::{NaiveDate, Utc};

    fn project(owner: Uuid) -> Project {
        Project {
            id: Uuid::new_v4(),
            name: "Billing revamp".to_string(),
            description: None,
            status: ProjectStatus::Pending,
            priority: ProjectPriority::Medium,
            start_date: NaiveDate::from_ymd_opt(2024, 3, 4),
            end_date: NaiveDate::from_ymd_opt(2024, 4, 1),
            duration_days: Some(28),
            created_by: owner,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn requirement(project: &Project, level: ExperienceLevel, kind: AssignmentType) -> ProjectRequirement {
        ProjectRequirement {
            id: Uuid::new_v4(),
            project_id: project.id,
            experience_level: level,
            quantity_needed: 2,
            required_skills: vec!["Rust".to_string()],
            preferred_assignment_type: kind,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn every_requirement_gets_its_own_request() {
        let owner = Uuid::new_v4();
        let project = project(owner);
        let requirements = vec![
            requirement(&project, ExperienceLevel::Advanced, AssignmentType::FullTime),
            requirement(&project, ExperienceLevel::Beginner, AssignmentType::PartTime),
        ];

        let requests = resource_requests_for(&project, &requirements, owner, Some("Q2 launch"));

        assert_eq!(requests.len(), 2);
        for (request, requirement) in requests.iter().zip(&requirements) {
            assert_eq!(request.requirement_id, Some(requirement.id));
            assert_eq!(request.project_id, project.id);
            assert_eq!(request.requested_by, owner);
            assert_eq!(request.status, RequestStatus::Pending);
            assert_eq!(request.notes.as_deref(), Some("Q2 launch"));
            assert_eq!(request.duration_days, Some(28));
        }
    }

    #[test]
    fn no_requirements_means_no_requests() {
        let project = project(Uuid::new_v4());
        assert!(resource_requests_for(&project, &[], project.created_by, None).is_empty());
    }
}
