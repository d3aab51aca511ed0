//! Error taxonomy for the HTTP boundary.
//!
//! Validation problems carry field detail back to the dashboard; store and
//! upstream failures are logged with their cause and collapsed into a
//! generic 500 body.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use sea_orm::DbErr;
use serde::Serialize;
use serde_json::json;
use shared::UpstreamUnavailable;
use thiserror::Error;
use tracing::{error, warn};

#[derive(Debug, Clone, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("validation failed")]
    Validation(Vec<FieldError>),
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error(transparent)]
    Upstream(#[from] UpstreamUnavailable),
    #[error(transparent)]
    Database(#[from] anyhow::Error),
}

impl ApiError {
    pub fn invalid(field: &str, message: &str) -> Self {
        ApiError::Validation(vec![FieldError {
            field: field.to_string(),
            message: message.to_string(),
        }])
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Upstream(_) | ApiError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<DbErr> for ApiError {
    fn from(e: DbErr) -> Self {
        ApiError::Database(anyhow::Error::new(e))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match &self {
            ApiError::Validation(fields) => {
                warn!("request validation failed: {:?}", fields);
                json!({ "error": "validation failed", "fields": fields })
            }
            ApiError::NotFound(what) => {
                warn!("{} not found", what);
                json!({ "error": format!("{} not found", what) })
            }
            ApiError::Upstream(cause) => {
                error!("upstream failure: {}", cause);
                json!({ "error": "compute service unavailable" })
            }
            ApiError::Database(cause) => {
                error!("store failure: {:#}", cause);
                json!({ "error": "internal server error" })
            }
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_maps_to_400() {
        let err = ApiError::invalid("selectedModels", "must not be empty");
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn not_found_maps_to_404() {
        let err = ApiError::NotFound("analysis");
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn upstream_and_store_failures_map_to_500() {
        let upstream: ApiError = UpstreamUnavailable {
            reason: "POST /api/models/train returned 503".to_string(),
        }
        .into();
        assert_eq!(
            upstream.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );

        let db: ApiError = anyhow::anyhow!("connection reset").into();
        assert_eq!(
            db.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
