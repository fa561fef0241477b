// HTTP API Error Types
use axum::{http::StatusCode, response::IntoResponse, Json};

use crate::api::Alerts;
use crate::database::manager::DatabaseError;
use crate::tenancy::{CheckError, TenancyError};

/// Message sent to clients for any system error; the detail stays in the log
const INTERNAL_ERROR_TEXT: &str = "Internal Server Error";

/// HTTP API error with appropriate status codes and client-friendly messages
#[derive(Debug)]
pub enum ApiError {
    // 400 Bad Request
    BadRequest(String),

    // 401 Unauthorized
    Unauthorized(String),

    // 403 Forbidden
    Forbidden(String),

    // 404 Not Found
    NotFound(String),

    // 500 Internal Server Error
    InternalServerError(String),

    // 503 Service Unavailable
    ServiceUnavailable(String),
}

impl ApiError {
    /// Get HTTP status code
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::BadRequest(_) => 400,
            ApiError::Unauthorized(_) => 401,
            ApiError::Forbidden(_) => 403,
            ApiError::NotFound(_) => 404,
            ApiError::InternalServerError(_) => 500,
            ApiError::ServiceUnavailable(_) => 503,
        }
    }

    /// Get client-safe error message
    pub fn message(&self) -> &str {
        match self {
            ApiError::BadRequest(msg) => msg,
            ApiError::Unauthorized(msg) => msg,
            ApiError::Forbidden(msg) => msg,
            ApiError::NotFound(msg) => msg,
            ApiError::InternalServerError(msg) => msg,
            ApiError::ServiceUnavailable(msg) => msg,
        }
    }

    /// Error-level alert body for the client
    pub fn to_alerts(&self) -> Alerts {
        Alerts::error(self.message())
    }

    /// Map a status and user-facing text onto the matching variant
    fn from_status(status: StatusCode, message: String) -> Self {
        match status {
            StatusCode::BAD_REQUEST => ApiError::BadRequest(message),
            StatusCode::UNAUTHORIZED => ApiError::Unauthorized(message),
            StatusCode::FORBIDDEN => ApiError::Forbidden(message),
            StatusCode::NOT_FOUND => ApiError::NotFound(message),
            StatusCode::SERVICE_UNAVAILABLE => ApiError::ServiceUnavailable(message),
            other => {
                tracing::warn!("Unmapped user error status {}: {}", other, message);
                ApiError::BadRequest(message)
            }
        }
    }
}

// Static constructor methods
impl ApiError {
    pub fn unauthorized(message: impl Into<String>) -> Self {
        ApiError::Unauthorized(message.into())
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        ApiError::Forbidden(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    pub fn internal_server_error(message: impl Into<String>) -> Self {
        ApiError::InternalServerError(message.into())
    }

    pub fn service_unavailable(message: impl Into<String>) -> Self {
        ApiError::ServiceUnavailable(message.into())
    }
}

// Convert other error types to ApiError
impl From<TenancyError> for ApiError {
    fn from(err: TenancyError) -> Self {
        // Never expose SQL or data integrity details to clients
        tracing::error!("Tenancy system error: {}", err);
        ApiError::internal_server_error(INTERNAL_ERROR_TEXT)
    }
}

impl From<CheckError> for ApiError {
    fn from(err: CheckError) -> Self {
        match err {
            CheckError::User { status, message } => ApiError::from_status(status, message),
            CheckError::System(err) => err.into(),
        }
    }
}

impl From<DatabaseError> for ApiError {
    fn from(err: DatabaseError) -> Self {
        match err {
            DatabaseError::ConfigMissing(_) | DatabaseError::InvalidDatabaseUrl => {
                tracing::error!("Database configuration error: {}", err);
                ApiError::internal_server_error(INTERNAL_ERROR_TEXT)
            }
            DatabaseError::Sqlx(sqlx_err) => {
                // Log the real error but return generic message
                tracing::error!("SQLx error: {}", sqlx_err);
                ApiError::service_unavailable("Database temporarily unavailable")
            }
        }
    }
}

// Standard error trait implementations
impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}

// Automatic HTTP response conversion for Axum
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self.to_alerts())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_user_errors_keep_status_and_text() {
        let err: ApiError = CheckError::not_found("delivery service 7 not found").into();
        assert_eq!(err.status_code(), 404);
        assert_eq!(err.message(), "delivery service 7 not found");

        let err: ApiError = CheckError::forbidden("not authorized on this tenant").into();
        assert_eq!(err.status_code(), 403);
    }

    #[test]
    fn system_errors_hide_detail() {
        let err: ApiError = CheckError::System(TenancyError::MissingTenant {
            resource_type: "origin",
            name: "origin-secret".to_string(),
        })
        .into();
        assert_eq!(err.status_code(), 500);
        assert!(!err.message().contains("origin-secret"));
    }

    #[test]
    fn renders_alert_body() {
        let alerts = ApiError::forbidden("Access to this resource is not authorized").to_alerts();
        assert_eq!(alerts.alerts.len(), 1);
        assert_eq!(alerts.alerts[0].text, "Access to this resource is not authorized");
    }
}
