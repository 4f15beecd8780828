use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use models::{FieldError, ModelError};
use serde::Serialize;
use service::query::QueryParseError;
use service::ServiceError;
use thiserror::Error;
use tracing::{error, warn};

/// Error returned by every JSON handler.
#[derive(Debug, Error)]
pub enum JsonApiError {
    #[error("{0}")]
    NotFound(String),
    #[error("validation failed")]
    Validation(Vec<FieldError>),
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Internal(String),
}

#[derive(Serialize)]
struct ValidationBody<'a> {
    title: &'static str,
    detail: String,
    errors: &'a [FieldError],
}

impl From<ServiceError> for JsonApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::NotFound { .. } => Self::NotFound(e.to_string()),
            ServiceError::Validation(ModelError::Validation(errors)) => Self::Validation(errors),
            other => Self::Internal(other.to_string()),
        }
    }
}

impl From<QueryParseError> for JsonApiError {
    fn from(e: QueryParseError) -> Self { Self::BadRequest(e.to_string()) }
}

/// Unreadable request bodies get the same `{message}` shape as other 400s.
impl From<JsonRejection> for JsonApiError {
    fn from(e: JsonRejection) -> Self { Self::BadRequest(e.body_text()) }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        match self {
            Self::NotFound(msg) => {
                warn!(error = %msg, "not found");
                (StatusCode::NOT_FOUND, Json(serde_json::json!({"message": msg}))).into_response()
            }
            Self::Validation(errors) => {
                let detail = errors
                    .iter()
                    .map(|e| format!("{}: {}", e.field, e.message))
                    .collect::<Vec<_>>()
                    .join("; ");
                warn!(%detail, "validation failed");
                let body = ValidationBody { title: "Validation failed", detail, errors: &errors };
                (StatusCode::UNPROCESSABLE_ENTITY, Json(body)).into_response()
            }
            Self::BadRequest(msg) => {
                warn!(error = %msg, "bad request");
                (StatusCode::BAD_REQUEST, Json(serde_json::json!({"message": msg}))).into_response()
            }
            Self::Internal(msg) => {
                error!(error = %msg, "internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, Json(serde_json::json!({"message": msg}))).into_response()
            }
        }
    }
}

/// Failures while wiring the server together, before it accepts requests.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("failed to load site data: {0}")]
    Snapshot(#[from] ServiceError),
    #[error("failed to compile page templates: {0}")]
    Templates(#[from] tera::Error),
}
