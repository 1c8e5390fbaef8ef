use diesel::prelude::*;
use uuid::Uuid;

use crate::db::enums::RequestStatus;
use crate::db::models::request::{NewResourceRequest, ResourceRequest};

pub struct RequestsRepo;

impl RequestsRepo {
    pub fn insert(conn: &mut PgConnection, new_request: &NewResourceRequest) -> Result<ResourceRequest, diesel::result::Error> {
        diesel::insert_into(crate::schema::resource_requests::table)
            .values(new_request)
            .returning(ResourceRequest::as_returning())
            .get_result(conn)
    }

    pub fn find_by_id(conn: &mut PgConnection, request_id: Uuid) -> Result<Option<ResourceRequest>, diesel::result::Error> {
        use crate::schema::resource_requests::dsl::*;
        resource_requests
            .filter(id.eq(request_id))
            .select(ResourceRequest::as_select())
            .first::<ResourceRequest>(conn)
            .optional()
    }

    pub fn list(
        conn: &mut PgConnection,
        requester: Option<Uuid>,
        state: Option<RequestStatus>,
    ) -> Result<Vec<ResourceRequest>, diesel::result::Error> {
        use crate::schema::resource_requests::dsl::*;
        let mut query = resource_requests.select(ResourceRequest::as_select()).into_boxed();
        if let Some(requester) = requester {
            query = query.filter(requested_by.eq(requester));
        }
        if let Some(state) = state {
            query = query.filter(status.eq(state));
        }
        query.order(created_at.desc()).load::<ResourceRequest>(conn)
    }

    pub fn set_status(
        conn: &mut PgConnection,
        request_id: Uuid,
        new_status: RequestStatus,
        decided_at: Option<chrono::DateTime<chrono::Utc>>,
    ) -> Result<ResourceRequest, diesel::result::Error> {
        use crate::schema::resource_requests::dsl::*;
        diesel::update(resource_requests.filter(id.eq(request_id)))
            .set((status.eq(new_status), approved_at.eq(decided_at)))
            .returning(ResourceRequest::as_returning())
            .get_result(conn)
    }
}
