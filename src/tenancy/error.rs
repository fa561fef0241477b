use axum::http::StatusCode;
use thiserror::Error;

/// Failures inside the tenancy core. Every variant is a system error: it
/// means the decision could not be made, never that access was denied.
#[derive(Debug, Error)]
pub enum TenancyError {
    #[error("{context}: {source}")]
    Query {
        context: &'static str,
        #[source]
        source: sqlx::Error,
    },

    #[error("invalid use_tenancy parameter value '{0}'")]
    InvalidToggleValue(String),

    #[error("{resource_type} '{name}' has no tenant ID")]
    MissingTenant {
        resource_type: &'static str,
        name: String,
    },
}

impl TenancyError {
    pub(crate) fn query(context: &'static str, source: sqlx::Error) -> Self {
        TenancyError::Query { context, source }
    }
}

/// Outcome of a failed tenancy check. `User` carries the status and text to
/// show the client; `System` must surface as a 500 with the detail logged.
#[derive(Debug, Error)]
pub enum CheckError {
    #[error("{message}")]
    User { status: StatusCode, message: String },

    #[error(transparent)]
    System(#[from] TenancyError),
}

impl CheckError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        CheckError::User {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        CheckError::User {
            status: StatusCode::FORBIDDEN,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        CheckError::User {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
        }
    }

    /// HTTP status to return to the client
    pub fn status(&self) -> StatusCode {
        match self {
            CheckError::User { status, .. } => *status,
            CheckError::System(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn user_error(&self) -> Option<&str> {
        match self {
            CheckError::User { message, .. } => Some(message),
            CheckError::System(_) => None,
        }
    }

    pub fn system_error(&self) -> Option<&TenancyError> {
        match self {
            CheckError::User { .. } => None,
            CheckError::System(err) => Some(err),
        }
    }
}
