//! HTTP error mapping
//!
//! Errors are rendered as `{"detail": "..."}`, the shape the frontend reads.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use tracing::{error, warn};

use crate::error::Error;

/// Error returned by every handler
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    detail: String,
}

impl ApiError {
    pub fn new(status: StatusCode, detail: impl Into<String>) -> Self {
        Self {
            status,
            detail: detail.into(),
        }
    }

    /// Prefix the detail with an operation name, e.g. `AI chat error: ...`
    pub fn with_context(context: &str, err: Error) -> Self {
        let status = status_for(&err);
        Self::new(status, format!("{}: {}", context, err))
    }

    /// Map a deployment failure; build errors report stderr or the timeout
    pub fn deployment(err: Error) -> Self {
        let status = status_for(&err);
        let detail = match err {
            Error::BuildFailed {
                status: exit_status,
                stderr,
            } => match stderr.trim() {
                "" => format!("Deployment failed: build script exited with {}", exit_status),
                stderr => format!("Deployment failed: {}", stderr),
            },
            Error::BuildTimeout(_) => format!("Deployment failed: {}", err),
            other => other.to_string(),
        };
        Self::new(status, detail)
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn detail(&self) -> &str {
        &self.detail
    }
}

fn status_for(err: &Error) -> StatusCode {
    StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        let status = status_for(&err);
        Self::new(status, err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            error!(status = %self.status, detail = %self.detail, "Request failed");
        } else {
            warn!(status = %self.status, detail = %self.detail, "Request rejected");
        }
        (self.status, Json(json!({ "detail": self.detail }))).into_response()
    }
}
