use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde_json::Value;
use shared::{BacktestRequest, ForecastRequest};

use crate::error::ApiError;
use crate::handlers::parse_body;
use crate::state::AppState;

/// POST /api/forecast/generate
pub async fn generate_forecast(
    State(state): State<Arc<AppState>>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    let req: ForecastRequest = parse_body(body)?;
    let forecast = state.compute.generate_forecast(&req).await?;
    Ok(Json(forecast))
}

/// POST /api/backtest/run
pub async fn run_backtest(
    State(state): State<Arc<AppState>>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    let req: BacktestRequest = parse_body(body)?;
    let report = state.compute.run_backtest(&req).await?;
    Ok(Json(report))
}
