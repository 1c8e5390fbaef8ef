use crate::db::enums::RequestStatus;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// Resource request models
#[derive(Queryable, Selectable, Serialize, Deserialize, Clone, Debug)]
#[diesel(table_name = crate::schema::resource_requests)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ResourceRequest {
    pub id: Uuid,
    pub project_id: Uuid,
    pub requirement_id: Option<Uuid>,
    pub requested_by: Uuid,
    pub status: RequestStatus,
    pub notes: Option<String>,
    pub start_date: Option<chrono::NaiveDate>,
    pub end_date: Option<chrono::NaiveDate>,
    pub duration_days: Option<i32>,
    pub approved_at: Option<chrono::DateTime<chrono::Utc>>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::resource_requests)]
pub struct NewResourceRequest {
    pub project_id: Uuid,
    pub requirement_id: Option<Uuid>,
    pub requested_by: Uuid,
    pub status: RequestStatus,
    pub notes: Option<String>,
    pub start_date: Option<chrono::NaiveDate>,
    pub end_date: Option<chrono::NaiveDate>,
    pub duration_days: Option<i32>,
}

#[derive(Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RequestDecision {
    Approve,
    Reject,
}

#[derive(Deserialize)]
pub struct DecideRequestBody {
    pub decision: RequestDecision,
}

#[derive(Deserialize)]
pub struct RequestListQuery {
    pub status: Option<RequestStatus>,
}
