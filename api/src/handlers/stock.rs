use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;
use serde_json::Value;
use shared::StockDataRequest;

use crate::error::ApiError;
use crate::handlers::parse_body;
use crate::state::AppState;

/// POST /api/stock/fetch — forward to the compute service, body unmodified.
pub async fn fetch_stock_data(
    State(state): State<Arc<AppState>>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    let req: StockDataRequest = parse_body(body)?;
    let data = state.compute.fetch_stock_data(&req).await?;
    Ok(Json(data))
}

/// GET /api/stock/validate/:ticker
pub async fn validate_ticker(
    State(state): State<Arc<AppState>>,
    Path(ticker): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let result = state.compute.validate_ticker(&ticker).await?;
    Ok(Json(result))
}
