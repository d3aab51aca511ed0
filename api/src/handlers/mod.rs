pub mod analyses;
pub mod export;
pub mod features;
pub mod forecast;
pub mod models;
pub mod stock;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ApiError;

/// Schema check for POST bodies. Routed through `serde_json::from_value` so a
/// malformed body surfaces as a 400 with the offending field in the message.
pub(crate) fn parse_body<T: DeserializeOwned>(value: Value) -> Result<T, ApiError> {
    serde_json::from_value(value).map_err(|e| ApiError::invalid("body", &e.to_string()))
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use sea_orm::DatabaseConnection;
    use shared::ComputeApiClient;

    use crate::state::AppState;

    /// State over a mock connection; the compute URL points nowhere and the
    /// tests using this never reach it.
    pub fn state_with(db: DatabaseConnection) -> Arc<AppState> {
        Arc::new(AppState {
            db: Arc::new(db),
            compute: ComputeApiClient::new("http://localhost:9".to_string()),
            owner_id: 1,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use shared::ExportRequest;

    #[test]
    fn parse_body_rejects_missing_fields() {
        let err = parse_body::<ExportRequest>(json!({ "analysisId": "abc" })).unwrap_err();
        assert_eq!(err.status_code(), axum::http::StatusCode::BAD_REQUEST);
    }

    #[test]
    fn parse_body_accepts_complete_bodies() {
        let req: ExportRequest =
            parse_body(json!({ "analysisId": "abc", "dataType": "stock_data" })).unwrap();
        assert_eq!(req.analysis_id, "abc");
        assert_eq!(req.data_type, "stock_data");
    }
}
