use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde_json::Value;
use shared::FeatureGenerateRequest;

use crate::error::ApiError;
use crate::handlers::parse_body;
use crate::state::AppState;

/// POST /api/features/generate
pub async fn generate_features(
    State(state): State<Arc<AppState>>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    let req: FeatureGenerateRequest = parse_body(body)?;
    let features = state.compute.generate_features(&req).await?;
    Ok(Json(features))
}

/// GET /api/features/presets
pub async fn feature_presets(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Value>, ApiError> {
    let presets = state.compute.list_feature_presets().await?;
    Ok(Json(presets))
}
