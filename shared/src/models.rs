use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::entity::{export_histories, model_results, stock_analyses};

/// Lifecycle of a stock analysis. Transitions are driven by the external
/// compute service; this layer only stores the value it is told.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisStatus {
    Pending,
    Training,
    Completed,
    Failed,
}

impl AnalysisStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnalysisStatus::Pending => "pending",
            AnalysisStatus::Training => "training",
            AnalysisStatus::Completed => "completed",
            AnalysisStatus::Failed => "failed",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(AnalysisStatus::Pending),
            "training" => Some(AnalysisStatus::Training),
            "completed" => Some(AnalysisStatus::Completed),
            "failed" => Some(AnalysisStatus::Failed),
            _ => None,
        }
    }
}

fn default_interval() -> String {
    "1d".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockDataRequest {
    pub ticker: String,
    pub country: String,
    pub start_date: String,
    pub end_date: String,
    #[serde(default = "default_interval")]
    pub interval: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureGenerateRequest {
    pub ticker: String,
    pub preset: String,
    pub selected_features: Vec<String>,
    pub stock_data: Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainRequest {
    pub ticker: String,
    pub country: String,
    pub start_date: String,
    pub end_date: String,
    #[serde(default = "default_interval")]
    pub interval: String,
    pub feature_preset: String,
    pub selected_features: Vec<String>,
    pub selected_models: Vec<String>,
    pub forecast_horizon: i32,
    pub training_window: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastRequest {
    pub analysis_id: String,
    pub model_names: Vec<String>,
    pub horizon: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BacktestRequest {
    pub analysis_id: String,
    pub period: String,
    pub rolling_window: i32,
    pub forecast_horizon: i32,
    pub metrics: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportRequest {
    pub analysis_id: String,
    pub data_type: String,
}

/// Name given to a generated export artifact, e.g. `stock_data_<uuid>.csv`.
pub fn export_file_name(data_type: &str, analysis_id: &str, extension: &str) -> String {
    format!("{}_{}.{}", data_type, analysis_id, extension)
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResponse {
    pub id: String,
    pub ticker: String,
    pub country: String,
    pub start_date: String,
    pub end_date: String,
    pub interval: String,
    pub feature_preset: String,
    pub selected_features: Value,
    pub selected_models: Value,
    pub forecast_horizon: i32,
    pub training_window: String,
    pub status: String,
    pub results: Option<Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<stock_analyses::Model> for AnalysisResponse {
    fn from(m: stock_analyses::Model) -> Self {
        Self {
            id: m.id,
            ticker: m.ticker,
            country: m.country,
            start_date: m.start_date,
            end_date: m.end_date,
            interval: m.interval,
            feature_preset: m.feature_preset,
            selected_features: m.selected_features,
            selected_models: m.selected_models,
            forecast_horizon: m.forecast_horizon,
            training_window: m.training_window,
            status: m.status,
            results: m.results,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelResultSummary {
    pub id: u64,
    pub analysis_id: String,
    pub model_name: String,
    pub mae: Option<f64>,
    pub rmse: Option<f64>,
    pub mape: Option<f64>,
    pub sharpe_ratio: Option<f64>,
    pub training_status: String,
    pub predictions: Option<Value>,
    pub confidence_intervals: Option<Value>,
    pub created_at: DateTime<Utc>,
}

impl From<model_results::Model> for ModelResultSummary {
    fn from(m: model_results::Model) -> Self {
        Self {
            id: m.id,
            analysis_id: m.analysis_id,
            model_name: m.model_name,
            mae: m.mae,
            rmse: m.rmse,
            mape: m.mape,
            sharpe_ratio: m.sharpe_ratio,
            training_status: m.training_status,
            predictions: m.predictions,
            confidence_intervals: m.confidence_intervals,
            created_at: m.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportRecord {
    pub id: u64,
    pub analysis_id: String,
    pub export_type: String,
    pub file_name: String,
    pub file_path: Option<String>,
    pub share_link: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<export_histories::Model> for ExportRecord {
    fn from(m: export_histories::Model) -> Self {
        Self {
            id: m.id,
            analysis_id: m.analysis_id,
            export_type: m.export_type,
            file_name: m.file_name,
            file_path: m.file_path,
            share_link: m.share_link,
            created_at: m.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn train_request_accepts_dashboard_shape() {
        let body = json!({
            "ticker": "AAPL",
            "country": "United States (NASDAQ/NYSE)",
            "startDate": "2023-01-01",
            "endDate": "2024-01-01",
            "interval": "1 Day",
            "featurePreset": "technical",
            "selectedFeatures": ["close", "rsi", "macd"],
            "selectedModels": ["linear_regression", "random_forest"],
            "forecastHorizon": 7,
            "trainingWindow": "1y"
        });

        let req: TrainRequest = serde_json::from_value(body).unwrap();
        assert_eq!(req.ticker, "AAPL");
        assert_eq!(req.start_date, "2023-01-01");
        assert_eq!(req.selected_features, vec!["close", "rsi", "macd"]);
        assert_eq!(
            req.selected_models,
            vec!["linear_regression", "random_forest"]
        );
        assert_eq!(req.forecast_horizon, 7);
    }

    #[test]
    fn train_request_interval_defaults() {
        let body = json!({
            "ticker": "AAPL",
            "country": "US",
            "startDate": "2023-01-01",
            "endDate": "2024-01-01",
            "featurePreset": "basic",
            "selectedFeatures": ["close"],
            "selectedModels": ["arima"],
            "forecastHorizon": 1,
            "trainingWindow": "6m"
        });

        let req: TrainRequest = serde_json::from_value(body).unwrap();
        assert_eq!(req.interval, "1d");
    }

    #[test]
    fn status_round_trips_known_values() {
        for s in ["pending", "training", "completed", "failed"] {
            assert_eq!(AnalysisStatus::parse(s).unwrap().as_str(), s);
        }
        assert!(AnalysisStatus::parse("queued").is_none());
        assert!(AnalysisStatus::parse("").is_none());
    }

    #[test]
    fn export_file_name_shape() {
        assert_eq!(
            export_file_name("stock_data", "abc-123", "csv"),
            "stock_data_abc-123.csv"
        );
        assert_eq!(
            export_file_name("predictions", "abc-123", "json"),
            "predictions_abc-123.json"
        );
    }

    #[test]
    fn export_record_serializes_camel_case() {
        let record = ExportRecord {
            id: 1,
            analysis_id: "a".to_string(),
            export_type: "csv".to_string(),
            file_name: "stock_data_a.csv".to_string(),
            file_path: None,
            share_link: None,
            created_at: chrono::Utc::now(),
        };

        let v = serde_json::to_value(&record).unwrap();
        assert!(v.get("analysisId").is_some());
        assert!(v.get("fileName").is_some());
        assert!(v.get("exportType").is_some());
        assert!(v.get("file_name").is_none());
    }
}
