//! API errors and their HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

#[derive(Error, Debug)]
pub enum ApiError {
    /// Required fields absent, null or empty. `status` is chosen by the resource.
    #[error("missing required fields: {}", .fields.join(", "))]
    MissingFields {
        status: StatusCode,
        fields: Vec<&'static str>,
    },
    #[error("invalid body: {message}")]
    InvalidBody { status: StatusCode, message: String },
    #[error("{resource} {id} not found")]
    NotFound { resource: &'static str, id: i32 },
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<&'static str>>,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingFields { status, .. } | ApiError::InvalidBody { status, .. } => {
                *status
            }
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let detail = match self {
            ApiError::MissingFields { fields, .. } => ErrorDetail {
                code: "validation_error",
                message: format!("missing required fields: {}", fields.join(", ")),
                fields: Some(fields),
            },
            ApiError::InvalidBody { message, .. } => ErrorDetail {
                code: "validation_error",
                message,
                fields: None,
            },
            not_found @ ApiError::NotFound { .. } => ErrorDetail {
                code: "not_found",
                message: not_found.to_string(),
                fields: None,
            },
            ApiError::Storage(e) => {
                error!(error = ?e, "storage failure");
                ErrorDetail {
                    code: "internal_error",
                    message: "internal server error".into(),
                    fields: None,
                }
            }
        };
        (status, Json(ErrorBody { error: detail })).into_response()
    }
}
