use axum::{
    http::{HeaderMap, HeaderName, HeaderValue, Request, header::USER_AGENT},
    middleware::Next,
    response::Response,
};
use std::time::Instant;
use tracing::{info, warn};
use uuid::Uuid;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Requests slower than this are logged at warn level.
pub const SLOW_REQUEST_MS: u128 = 1000;

/// Tags every request with an id, echoes it back, and logs the outcome.
pub async fn request_tracking_middleware<B>(mut request: Request<B>, next: Next<B>) -> Response {
    let start_time = Instant::now();
    let request_id = extract_request_id(request.headers()).unwrap_or_else(|| Uuid::new_v4().to_string());
    let header_value = HeaderValue::from_str(&request_id).unwrap_or_else(|_| HeaderValue::from_static("invalid"));

    request
        .headers_mut()
        .insert(HeaderName::from_static(REQUEST_ID_HEADER), header_value.clone());

    let method = request.method().clone();
    let uri = request.uri().path().to_string();
    let user_agent = request
        .headers()
        .get(USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
        .to_string();

    tracing::debug!(request_id = %request_id, method = %method, uri = %uri, user_agent = %user_agent, "Request started");

    let mut response = next.run(request).await;
    response
        .headers_mut()
        .insert(HeaderName::from_static(REQUEST_ID_HEADER), header_value);

    let duration_ms = start_time.elapsed().as_millis();
    let status = response.status();

    if status.is_server_error() {
        warn!(request_id = %request_id, method = %method, uri = %uri, status = %status, duration_ms = %duration_ms, "Request failed");
    } else if status.is_client_error() {
        info!(request_id = %request_id, method = %method, uri = %uri, status = %status, duration_ms = %duration_ms, "Request rejected");
    } else {
        info!(request_id = %request_id, method = %method, uri = %uri, status = %status, duration_ms = %duration_ms, "Request completed");
    }

    if duration_ms > SLOW_REQUEST_MS {
        warn!(request_id = %request_id, method = %method, uri = %uri, duration_ms = %duration_ms, "Slow request detected");
    }

    response
}

pub fn extract_request_id(headers: &HeaderMap) -> Option<String> {
    headers
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_id_is_read_from_header() {
        let mut headers = HeaderMap::new();
        assert_eq!(extract_request_id(&headers), None);

        headers.insert(REQUEST_ID_HEADER, HeaderValue::from_static("req-42"));
        assert_eq!(extract_request_id(&headers).as_deref(), Some("req-42"));
    }
}
