use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Errors raised by the security filter chain and its handlers.
#[derive(Debug, Error)]
pub enum SecurityError {
    /// Principal lacks the access required by the matching rule.
    #[error("Access denied to {path} for {principal}")]
    AccessDenied { path: String, principal: String },

    /// Username unknown or password mismatch. Login processing turns this into a redirect
    /// to the failure URL, so it is never rendered as a response.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// A path pattern could not be parsed.
    #[error("Invalid path pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: &'static str },

    #[error("Template render error: {0}")]
    Template(#[from] askama::Error),
}

impl SecurityError {
    pub fn access_denied(path: &str, principal: Option<&str>) -> Self {
        SecurityError::AccessDenied {
            path: path.to_string(),
            principal: principal.unwrap_or("anonymous").to_string(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            SecurityError::AccessDenied { .. } => StatusCode::FORBIDDEN,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for SecurityError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            SecurityError::AccessDenied { .. } => {
                tracing::error!(error = %self, "Access denied");
                "Access Denied"
            }
            _ => {
                tracing::error!(error = %self, "Request failed");
                "Internal Server Error"
            }
        };
        (status, body).into_response()
    }
}
