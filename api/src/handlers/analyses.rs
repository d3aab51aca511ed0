use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;
use shared::AnalysisResponse;

use crate::error::ApiError;
use crate::repositories::AnalysisRepository;
use crate::state::AppState;

/// GET /api/analyses — every analysis for the current owner, oldest first.
pub async fn list_analyses(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<AnalysisResponse>>, ApiError> {
    let analyses = AnalysisRepository::new(state.db.clone())
        .list_by_user(state.owner_id)
        .await?;
    Ok(Json(analyses.into_iter().map(Into::into).collect()))
}

/// GET /api/analyses/:id
pub async fn get_analysis(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<AnalysisResponse>, ApiError> {
    let analysis = AnalysisRepository::new(state.db.clone())
        .find_by_id(&id)
        .await?
        .ok_or(ApiError::NotFound("analysis"))?;
    Ok(Json(analysis.into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use serde_json::json;
    use shared::entity::stock_analyses;

    use crate::handlers::test_support::state_with;

    fn stored_analysis(id: &str) -> stock_analyses::Model {
        stock_analyses::Model {
            id: id.to_string(),
            user_id: 1,
            ticker: "AAPL".to_string(),
            country: "United States (NASDAQ/NYSE)".to_string(),
            start_date: "2023-01-01".to_string(),
            end_date: "2024-01-01".to_string(),
            interval: "1 Day".to_string(),
            feature_preset: "technical".to_string(),
            selected_features: json!(["close", "rsi"]),
            selected_models: json!(["linear_regression"]),
            forecast_horizon: 7,
            training_window: "1y".to_string(),
            status: "pending".to_string(),
            results: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn fresh_analysis_is_returned_by_id() {
        let db = MockDatabase::new(DatabaseBackend::MySql)
            .append_query_results([vec![stored_analysis("11111111-2222-3333-4444-555555555555")]])
            .into_connection();
        let state = state_with(db);

        let Json(body) = get_analysis(
            State(state),
            Path("11111111-2222-3333-4444-555555555555".to_string()),
        )
        .await
        .unwrap();
        assert_eq!(body.id, "11111111-2222-3333-4444-555555555555");
        assert_eq!(body.ticker, "AAPL");
        assert_eq!(body.status, "pending");
    }

    #[tokio::test]
    async fn unknown_analysis_is_404() {
        let db = MockDatabase::new(DatabaseBackend::MySql)
            .append_query_results([Vec::<stock_analyses::Model>::new()])
            .into_connection();
        let state = state_with(db);

        let err = get_analysis(State(state), Path("no-such-id".to_string()))
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }
}
