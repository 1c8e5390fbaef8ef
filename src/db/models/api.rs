use serde::Serialize;

// Unified response envelope shared by every dashboard endpoint
#[derive(Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub code: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<ErrorDetail>>,
    pub timestamp: String,
}

#[derive(Serialize, Debug, Clone)]
pub struct ErrorDetail {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    pub code: String,
    pub message: String,
}

impl<T> ApiResponse<T> {
    fn build(success: bool, code: u16, message: &str, data: Option<T>, errors: Option<Vec<ErrorDetail>>) -> Self {
        Self {
            success,
            code,
            message: message.to_string(),
            data,
            errors,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    fn single_error(code: u16, message: &str, error_code: &str, field: Option<String>) -> Self {
        Self::build(
            false,
            code,
            message,
            None,
            Some(vec![ErrorDetail {
                field,
                code: error_code.to_string(),
                message: message.to_string(),
            }]),
        )
    }

    pub fn success(data: T, message: &str) -> Self {
        Self::build(true, 200, message, Some(data), None)
    }

    pub fn created(data: T, message: &str) -> Self {
        Self::build(true, 201, message, Some(data), None)
    }

    pub fn ok(message: &str) -> Self {
        Self::build(true, 200, message, None, None)
    }

    pub fn validation_error(errors: Vec<ErrorDetail>) -> Self {
        Self::build(false, 400, "Validation failed", None, Some(errors))
    }

    pub fn bad_request(message: &str) -> Self {
        Self::single_error(400, message, error_codes::VALIDATION_FAILED, None)
    }

    pub fn unauthorized(message: &str) -> Self {
        Self::single_error(401, message, error_codes::AUTH_INVALID_TOKEN, None)
    }

    pub fn forbidden(message: &str) -> Self {
        Self::single_error(403, message, error_codes::AUTH_FORBIDDEN, None)
    }

    pub fn not_found(message: &str) -> Self {
        Self::single_error(404, message, error_codes::NOT_FOUND, None)
    }

    pub fn conflict(message: &str, field: Option<String>, error_code: &str) -> Self {
        Self::single_error(409, message, error_code, field)
    }

    pub fn bad_gateway(message: &str) -> Self {
        Self::single_error(502, message, error_codes::SYSTEM_EXTERNAL_SERVICE_ERROR, None)
    }

    pub fn internal_error(message: &str) -> Self {
        Self::single_error(500, message, error_codes::SYSTEM_INTERNAL_ERROR, None)
    }
}

// Business error codes surfaced in `errors[].code`
pub mod error_codes {
    pub const AUTH_INVALID_CREDENTIALS: &str = "AUTH_001";
    pub const AUTH_INVALID_TOKEN: &str = "AUTH_002";
    pub const AUTH_FORBIDDEN: &str = "AUTH_003";

    pub const VALIDATION_FAILED: &str = "VALIDATION_001";
    pub const NOT_FOUND: &str = "NOT_FOUND";

    pub const CAPACITY_INSUFFICIENT: &str = "INSUFFICIENT_CAPACITY";
    pub const PROJECT_CLOSED: &str = "PROJECT_CLOSED";
    pub const PROJECT_TEAM_FULL: &str = "PROJECT_TEAM_FULL";
    pub const REQUEST_ALREADY_DECIDED: &str = "REQUEST_ALREADY_DECIDED";

    pub const SYSTEM_DATABASE_ERROR: &str = "SYSTEM_001";
    pub const SYSTEM_CACHE_ERROR: &str = "SYSTEM_002";
    pub const SYSTEM_EXTERNAL_SERVICE_ERROR: &str = "SYSTEM_003";
    pub const SYSTEM_INTERNAL_ERROR: &str = "SYSTEM_004";
}
