//! Training routes. The train route is the one place this layer creates a
//! StockAnalysis row; the status route copies whatever the compute service
//! reports back onto that row verbatim.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;
use chrono::Utc;
use sea_orm::Set;
use serde_json::{json, Value};
use shared::entity::{model_results, stock_analyses};
use shared::{AnalysisStatus, ModelResultSummary, TrainRequest};
use tracing::info;
use uuid::Uuid;

use crate::error::{ApiError, FieldError};
use crate::handlers::parse_body;
use crate::repositories::{AnalysisRepository, ModelResultRepository};
use crate::state::AppState;

/// GET /api/models/available
pub async fn available_models(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Value>, ApiError> {
    let models = state.compute.list_available_models().await?;
    Ok(Json(models))
}

/// POST /api/models/train
///
/// Creates the analysis row (status `pending`) before the forward, so a
/// record exists even when the compute service turns the job away.
pub async fn start_training(
    State(state): State<Arc<AppState>>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    let req: TrainRequest = parse_body(body)?;
    validate_train(&req)?;

    let now = Utc::now();
    let analysis = AnalysisRepository::new(state.db.clone())
        .create(stock_analyses::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            user_id: Set(state.owner_id),
            ticker: Set(req.ticker.clone()),
            country: Set(req.country.clone()),
            start_date: Set(req.start_date.clone()),
            end_date: Set(req.end_date.clone()),
            interval: Set(req.interval.clone()),
            feature_preset: Set(req.feature_preset.clone()),
            selected_features: Set(json!(req.selected_features)),
            selected_models: Set(json!(req.selected_models)),
            forecast_horizon: Set(req.forecast_horizon),
            training_window: Set(req.training_window.clone()),
            status: Set(AnalysisStatus::Pending.as_str().to_string()),
            results: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        })
        .await?;
    info!(
        "Created analysis {} for ticker {} ({} models)",
        analysis.id,
        analysis.ticker,
        req.selected_models.len()
    );

    let mut job = state.compute.start_training(&analysis.id, &req).await?;
    match job {
        Value::Object(ref mut fields) => {
            fields.insert("analysisId".to_string(), json!(analysis.id));
        }
        _ => job = json!({ "analysisId": analysis.id, "job": job }),
    }
    Ok(Json(job))
}

/// GET /api/models/status/:analysis_id
pub async fn training_status(
    State(state): State<Arc<AppState>>,
    Path(analysis_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let analysis = AnalysisRepository::new(state.db.clone())
        .find_by_id(&analysis_id)
        .await?
        .ok_or(ApiError::NotFound("analysis"))?;

    let progress = state.compute.get_training_status(&analysis_id).await?;
    sync_training_state(&state, &analysis, &progress).await?;
    Ok(Json(progress))
}

/// GET /api/models/results/:analysis_id — store read only, no external call.
/// An analysis without results is an empty list, not an error.
pub async fn model_results(
    State(state): State<Arc<AppState>>,
    Path(analysis_id): Path<String>,
) -> Result<Json<Vec<ModelResultSummary>>, ApiError> {
    let rows = ModelResultRepository::new(state.db.clone())
        .list_by_analysis(&analysis_id)
        .await?;
    Ok(Json(rows.into_iter().map(Into::into).collect()))
}

fn validate_train(req: &TrainRequest) -> Result<(), ApiError> {
    let mut fields = Vec::new();
    let mut require = |field: &str, ok: bool, message: &str| {
        if !ok {
            fields.push(FieldError {
                field: field.to_string(),
                message: message.to_string(),
            });
        }
    };

    require("ticker", !req.ticker.trim().is_empty(), "must not be empty");
    require(
        "startDate",
        !req.start_date.trim().is_empty(),
        "must not be empty",
    );
    require(
        "endDate",
        !req.end_date.trim().is_empty(),
        "must not be empty",
    );
    require(
        "selectedFeatures",
        !req.selected_features.is_empty(),
        "at least one feature must be selected",
    );
    require(
        "selectedModels",
        !req.selected_models.is_empty(),
        "at least one model must be selected",
    );
    require(
        "forecastHorizon",
        req.forecast_horizon > 0,
        "must be a positive number of periods",
    );

    if fields.is_empty() {
        Ok(())
    } else {
        Err(ApiError::Validation(fields))
    }
}

/// Copy the upstream progress report into the store: analysis status is
/// written verbatim, and any per-model entries are upserted into
/// `model_results`. Unknown status strings are ignored rather than invented.
async fn sync_training_state(
    state: &AppState,
    analysis: &stock_analyses::Model,
    progress: &Value,
) -> Result<(), ApiError> {
    if let Some(status) = progress
        .get("status")
        .and_then(Value::as_str)
        .and_then(AnalysisStatus::parse)
    {
        let results = match status {
            AnalysisStatus::Completed => progress.get("results").cloned(),
            _ => None,
        };
        if analysis.status != status.as_str() || results.is_some() {
            let mut patch = stock_analyses::ActiveModel {
                id: Set(analysis.id.clone()),
                status: Set(status.as_str().to_string()),
                updated_at: Set(Utc::now()),
                ..Default::default()
            };
            if let Some(results) = results {
                patch.results = Set(Some(results));
            }
            AnalysisRepository::new(state.db.clone()).update(patch).await?;
        }
    }

    if let Some(entries) = progress.get("results").and_then(Value::as_array) {
        let repo = ModelResultRepository::new(state.db.clone());
        for entry in entries {
            if let Some(result) = UpstreamModelResult::from_value(entry) {
                upsert_model_result(&repo, &analysis.id, result).await?;
            }
        }
    }
    Ok(())
}

async fn upsert_model_result(
    repo: &ModelResultRepository,
    analysis_id: &str,
    result: UpstreamModelResult,
) -> Result<(), ApiError> {
    match repo
        .find_by_analysis_and_model(analysis_id, &result.model_name)
        .await?
    {
        Some(existing) => {
            repo.update(model_results::ActiveModel {
                id: Set(existing.id),
                mae: Set(result.mae),
                rmse: Set(result.rmse),
                mape: Set(result.mape),
                sharpe_ratio: Set(result.sharpe_ratio),
                training_status: Set(result.training_status),
                predictions: Set(result.predictions),
                confidence_intervals: Set(result.confidence_intervals),
                ..Default::default()
            })
            .await?;
        }
        None => {
            repo.create(model_results::ActiveModel {
                analysis_id: Set(analysis_id.to_string()),
                model_name: Set(result.model_name),
                mae: Set(result.mae),
                rmse: Set(result.rmse),
                mape: Set(result.mape),
                sharpe_ratio: Set(result.sharpe_ratio),
                training_status: Set(result.training_status),
                predictions: Set(result.predictions),
                confidence_intervals: Set(result.confidence_intervals),
                created_at: Set(Utc::now()),
                ..Default::default()
            })
            .await?;
        }
    }
    Ok(())
}

/// One per-model entry from the compute service's progress report.
#[derive(Debug, PartialEq)]
struct UpstreamModelResult {
    model_name: String,
    mae: Option<f64>,
    rmse: Option<f64>,
    mape: Option<f64>,
    sharpe_ratio: Option<f64>,
    training_status: String,
    predictions: Option<Value>,
    confidence_intervals: Option<Value>,
}

impl UpstreamModelResult {
    fn from_value(entry: &Value) -> Option<Self> {
        let model_name = entry.get("modelName").and_then(Value::as_str)?.to_string();
        Some(Self {
            model_name,
            mae: entry.get("mae").and_then(Value::as_f64),
            rmse: entry.get("rmse").and_then(Value::as_f64),
            mape: entry.get("mape").and_then(Value::as_f64),
            sharpe_ratio: entry.get("sharpeRatio").and_then(Value::as_f64),
            training_status: entry
                .get("trainingStatus")
                .and_then(Value::as_str)
                .unwrap_or("pending")
                .to_string(),
            predictions: non_null(entry.get("predictions")),
            confidence_intervals: non_null(entry.get("confidenceIntervals")),
        })
    }
}

fn non_null(value: Option<&Value>) -> Option<Value> {
    value.filter(|v| !v.is_null()).cloned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    use crate::handlers::test_support::state_with;

    fn valid_request() -> TrainRequest {
        TrainRequest {
            ticker: "AAPL".to_string(),
            country: "United States (NASDAQ/NYSE)".to_string(),
            start_date: "2023-01-01".to_string(),
            end_date: "2024-01-01".to_string(),
            interval: "1 Day".to_string(),
            feature_preset: "technical".to_string(),
            selected_features: vec!["close".to_string()],
            selected_models: vec!["linear_regression".to_string()],
            forecast_horizon: 7,
            training_window: "1y".to_string(),
        }
    }

    #[test]
    fn valid_train_request_passes() {
        assert!(validate_train(&valid_request()).is_ok());
    }

    #[test]
    fn empty_model_list_is_rejected() {
        let mut req = valid_request();
        req.selected_models.clear();
        let err = validate_train(&req).unwrap_err();
        match err {
            ApiError::Validation(fields) => {
                assert_eq!(fields.len(), 1);
                assert_eq!(fields[0].field, "selectedModels");
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn multiple_problems_are_reported_together() {
        let mut req = valid_request();
        req.ticker = "  ".to_string();
        req.selected_features.clear();
        req.forecast_horizon = 0;
        let err = validate_train(&req).unwrap_err();
        match err {
            ApiError::Validation(fields) => {
                let names: Vec<&str> = fields.iter().map(|f| f.field.as_str()).collect();
                assert_eq!(names, vec!["ticker", "selectedFeatures", "forecastHorizon"]);
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn upstream_result_parses_completed_entry() {
        let entry = json!({
            "modelName": "random_forest",
            "mae": 1.5,
            "rmse": 2.5,
            "mape": 3.1,
            "sharpeRatio": null,
            "trainingStatus": "completed",
            "predictions": [101.0, 102.5],
            "confidenceIntervals": null
        });

        let parsed = UpstreamModelResult::from_value(&entry).unwrap();
        assert_eq!(parsed.model_name, "random_forest");
        assert_eq!(parsed.mae, Some(1.5));
        assert_eq!(parsed.sharpe_ratio, None);
        assert_eq!(parsed.training_status, "completed");
        assert!(parsed.predictions.is_some());
        assert!(parsed.confidence_intervals.is_none());
    }

    #[test]
    fn upstream_result_without_model_name_is_skipped() {
        assert!(UpstreamModelResult::from_value(&json!({ "mae": 1.0 })).is_none());
    }

    #[tokio::test]
    async fn analysis_without_results_yields_empty_list() {
        let db = MockDatabase::new(DatabaseBackend::MySql)
            .append_query_results([Vec::<model_results::Model>::new()])
            .into_connection();
        let state = state_with(db);

        let Json(rows) = model_results(State(state), Path("no-rows-yet".to_string()))
            .await
            .unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn upstream_result_defaults_training_status() {
        let parsed = UpstreamModelResult::from_value(&json!({ "modelName": "arima" })).unwrap();
        assert_eq!(parsed.training_status, "pending");
        assert_eq!(parsed.mae, None);
    }
}
