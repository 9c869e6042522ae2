use axum::Json;
use axum::extract::rejection::PathRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;
use validator::ValidationErrors;

use crate::application::error::ServiceError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Service(#[from] ServiceError),
    #[error("request validation failed")]
    Invalid(#[from] ValidationErrors),
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Unauthorized(String),
}

impl From<anyhow::Error> for ApiError {
    fn from(e: anyhow::Error) -> Self {
        ApiError::Service(ServiceError::Internal(e))
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

fn error_body(status: StatusCode, code: &str, message: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorBody {
            code: code.to_string(),
            message: message.into(),
        }),
    )
        .into_response()
}

/// One entry per failing field, sorted by field name. A field reports only its
/// first broken rule, in declaration order.
pub fn field_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut fields: Vec<FieldError> = errors
        .field_errors()
        .iter()
        .filter_map(|(field, issues)| {
            issues.first().map(|issue| FieldError {
                field: field.to_string(),
                message: issue
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| issue.code.to_string()),
            })
        })
        .collect();
    fields.sort_by(|a, b| a.field.cmp(&b.field));
    fields
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Invalid(errors) => {
                (StatusCode::BAD_REQUEST, Json(field_errors(&errors))).into_response()
            }
            ApiError::BadRequest(message) => {
                error_body(StatusCode::BAD_REQUEST, "bad_request", message)
            }
            ApiError::Unauthorized(message) => {
                error_body(StatusCode::UNAUTHORIZED, "unauthorized", message)
            }
            ApiError::Service(ServiceError::Validation { field, message }) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(FieldError {
                    field: field.to_string(),
                    message,
                }),
            )
                .into_response(),
            ApiError::Service(e @ ServiceError::NotFound(_)) => {
                error_body(StatusCode::NOT_FOUND, "not_found", e.to_string())
            }
            ApiError::Service(ServiceError::Internal(e)) => {
                tracing::error!(error = ?e, "request_failed");
                error_body(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "internal server error",
                )
            }
        }
    }
}
