use diesel::prelude::*;
use uuid::Uuid;

use crate::{
    db::enums::{RequestStatus, UserRole},
    db::models::{api::error_codes, CurrentUser, RequestDecision, ResourceRequest},
    db::repositories::RequestsRepo,
    error::AppError,
};

/// Status a pending request moves to; decided requests stay decided.
pub fn next_status(current: RequestStatus, decision: RequestDecision) -> Result<RequestStatus, AppError> {
    if current != RequestStatus::Pending {
        return Err(AppError::conflict_with_code(
            format!("Request is already {}", current),
            Some("decision".to_string()),
            error_codes::REQUEST_ALREADY_DECIDED,
        ));
    }
    Ok(match decision {
        RequestDecision::Approve => RequestStatus::Approved,
        RequestDecision::Reject => RequestStatus::Rejected,
    })
}

pub struct RequestsService;

impl RequestsService {
    /// Project managers see the requests they filed; resource managers see all.
    pub fn list(
        conn: &mut PgConnection,
        user: &CurrentUser,
        status: Option<RequestStatus>,
    ) -> Result<Vec<ResourceRequest>, AppError> {
        match user.role {
            UserRole::ResourceManager => Ok(RequestsRepo::list(conn, None, status)?),
            UserRole::ProjectManager => Ok(RequestsRepo::list(conn, Some(user.id), status)?),
            UserRole::Employee => Err(AppError::forbidden("Employees cannot view resource requests")),
        }
    }

    pub fn decide(
        conn: &mut PgConnection,
        user: &CurrentUser,
        request_id: Uuid,
        decision: RequestDecision,
    ) -> Result<ResourceRequest, AppError> {
        user.require_role(UserRole::ResourceManager)?;
        let request = RequestsRepo::find_by_id(conn, request_id)?
            .ok_or_else(|| AppError::not_found("Resource request"))?;

        let status = next_status(request.status, decision)?;
        let decided_at = (status == RequestStatus::Approved).then(chrono::Utc::now);
        let updated = RequestsRepo::set_status(conn, request_id, status, decided_at)?;

        tracing::info!(
            request_id = %request_id,
            project_id = %updated.project_id,
            status = %status,
            decided_by = %user.id,
            "Resource request decided"
        );
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_requests_can_be_decided() {
        assert_eq!(
            next_status(RequestStatus::Pending, RequestDecision::Approve).unwrap(),
            RequestStatus::Approved
        );
        assert_eq!(
            next_status(RequestStatus::Pending, RequestDecision::Reject).unwrap(),
            RequestStatus::Rejected
        );
    }

    #[test]
    fn decided_requests_are_a_conflict() {
        for current in [RequestStatus::Approved, RequestStatus::Rejected] {
            let err = next_status(current, RequestDecision::Approve).unwrap_err();
            assert!(matches!(err, AppError::Conflict { .. }));
        }
    }
}
