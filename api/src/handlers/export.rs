//! Export routes. The history row is written before the upstream call, so a
//! failed export still leaves an audit entry; the two steps are not atomic.

use std::sync::Arc;

use axum::body::Body;
use axum::extract::State;
use axum::http::{header, HeaderValue};
use axum::response::Response;
use axum::Json;
use chrono::Utc;
use sea_orm::Set;
use serde_json::Value;
use shared::entity::export_histories;
use shared::{export_file_name, ExportRecord, ExportRequest};
use tracing::info;

use crate::error::ApiError;
use crate::handlers::parse_body;
use crate::repositories::{AnalysisRepository, ExportRepository};
use crate::state::AppState;

/// POST /api/export/csv — streams the upstream CSV body straight through.
pub async fn export_csv(
    State(state): State<Arc<AppState>>,
    Json(body): Json<Value>,
) -> Result<Response, ApiError> {
    let req: ExportRequest = parse_body(body)?;
    let file_name = record_export(&state, &req, "csv").await?;

    let upstream = state.compute.export_csv(&req).await?;
    let disposition =
        HeaderValue::from_str(&format!("attachment; filename=\"{}\"", file_name))
            .map_err(|_| ApiError::invalid("dataType", "contains characters not allowed in a file name"))?;

    let mut response = Response::new(Body::from_stream(upstream.bytes_stream()));
    response
        .headers_mut()
        .insert(header::CONTENT_TYPE, HeaderValue::from_static("text/csv"));
    response
        .headers_mut()
        .insert(header::CONTENT_DISPOSITION, disposition);
    Ok(response)
}

/// POST /api/export/json — buffered JSON blob.
pub async fn export_json(
    State(state): State<Arc<AppState>>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    let req: ExportRequest = parse_body(body)?;
    record_export(&state, &req, "json").await?;

    let blob = state.compute.export_json(&req).await?;
    Ok(Json(blob))
}

/// GET /api/export/history
pub async fn export_history(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ExportRecord>>, ApiError> {
    let records = ExportRepository::new(state.db.clone())
        .list_by_user(state.owner_id)
        .await?;
    Ok(Json(records.into_iter().map(Into::into).collect()))
}

async fn record_export(
    state: &AppState,
    req: &ExportRequest,
    kind: &str,
) -> Result<String, ApiError> {
    let analysis = AnalysisRepository::new(state.db.clone())
        .find_by_id(&req.analysis_id)
        .await?
        .ok_or(ApiError::NotFound("analysis"))?;

    let file_name = export_file_name(&req.data_type, &analysis.id, kind);
    ExportRepository::new(state.db.clone())
        .create(export_histories::ActiveModel {
            user_id: Set(state.owner_id),
            analysis_id: Set(analysis.id.clone()),
            export_type: Set(kind.to_string()),
            file_name: Set(file_name.clone()),
            file_path: Set(None),
            share_link: Set(None),
            created_at: Set(Utc::now()),
            ..Default::default()
        })
        .await?;
    info!("Recorded {} export {} for analysis {}", kind, file_name, analysis.id);
    Ok(file_name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
    use serde_json::json;
    use shared::entity::stock_analyses;

    use crate::handlers::test_support::state_with;

    fn stored_analysis(id: &str) -> stock_analyses::Model {
        stock_analyses::Model {
            id: id.to_string(),
            user_id: 1,
            ticker: "AAPL".to_string(),
            country: "US".to_string(),
            start_date: "2023-01-01".to_string(),
            end_date: "2024-01-01".to_string(),
            interval: "1d".to_string(),
            feature_preset: "basic".to_string(),
            selected_features: json!(["close"]),
            selected_models: json!(["arima"]),
            forecast_horizon: 7,
            training_window: "1y".to_string(),
            status: "completed".to_string(),
            results: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn history_row(analysis_id: &str, kind: &str, file_name: &str) -> export_histories::Model {
        export_histories::Model {
            id: 7,
            user_id: 1,
            analysis_id: analysis_id.to_string(),
            export_type: kind.to_string(),
            file_name: file_name.to_string(),
            file_path: None,
            share_link: None,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn csv_export_records_history_row() {
        let db = MockDatabase::new(DatabaseBackend::MySql)
            .append_query_results([vec![stored_analysis("a1")]])
            .append_query_results([vec![history_row("a1", "csv", "stock_data_a1.csv")]])
            .append_exec_results([MockExecResult {
                last_insert_id: 7,
                rows_affected: 1,
            }])
            .into_connection();
        let state = state_with(db);

        let req = ExportRequest {
            analysis_id: "a1".to_string(),
            data_type: "stock_data".to_string(),
        };
        let file_name = record_export(&state, &req, "csv").await.unwrap();
        assert_eq!(file_name, "stock_data_a1.csv");
    }

    #[tokio::test]
    async fn recorded_export_shows_up_in_history() {
        let db = MockDatabase::new(DatabaseBackend::MySql)
            .append_query_results([vec![history_row("a1", "csv", "stock_data_a1.csv")]])
            .into_connection();
        let state = state_with(db);

        let Json(records) = export_history(State(state)).await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].export_type, "csv");
        assert_eq!(records[0].file_name, "stock_data_a1.csv");
        assert_eq!(records[0].analysis_id, "a1");
    }

    #[tokio::test]
    async fn export_for_unknown_analysis_is_404() {
        let db = MockDatabase::new(DatabaseBackend::MySql)
            .append_query_results([Vec::<stock_analyses::Model>::new()])
            .into_connection();
        let state = state_with(db);

        let req = ExportRequest {
            analysis_id: "missing".to_string(),
            data_type: "stock_data".to_string(),
        };
        let err = record_export(&state, &req, "csv").await.unwrap_err();
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }
}
