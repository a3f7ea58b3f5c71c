//! API error types
//!
//! Every failure a client can observe is an [`ApiError`]. Each variant knows
//! its HTTP status and renders to the same JSON envelope:
//!
//! ```json
//! {"error": {"status": 404, "message": "user does not exist"}}
//! ```

use hyper::StatusCode;
use serde::Serialize;
use thiserror::Error;

/// A single parameter that failed validation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParamIssue {
    pub param: String,
    pub expected: &'static str,
    pub reason: String,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("Validation error")]
    Validation { issues: Vec<ParamIssue> },

    #[error("{message}")]
    NotFound { message: String },

    #[error("Route not found")]
    RouteNotFound,

    #[error("Internal server error")]
    Internal,
}

/// Error envelope written to the response body
#[derive(Debug, Serialize)]
pub struct ErrorBody<'a> {
    pub error: ErrorDetail<'a>,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail<'a> {
    pub status: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<&'a [ParamIssue]>,
}

impl ApiError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } | Self::RouteNotFound => StatusCode::NOT_FOUND,
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn body(&self) -> ErrorBody<'_> {
        let data = match self {
            Self::Validation { issues } => Some(issues.as_slice()),
            _ => None,
        };
        ErrorBody {
            error: ErrorDetail {
                status: self.status().as_u16(),
                message: self.to_string(),
                data,
            },
        }
    }
}
