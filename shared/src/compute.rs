//! HTTP client for the external compute service.
//!
//! The dashboard speaks camelCase JSON; the compute service expects
//! snake_case. Each operation builds the translated payload, issues one
//! call, and hands the raw body back unmodified. No retries, no caching.

use reqwest::Response;
use serde_json::{json, Value};
use thiserror::Error;

use crate::models::{
    BacktestRequest, ExportRequest, FeatureGenerateRequest, ForecastRequest, StockDataRequest,
    TrainRequest,
};

/// The single failure condition of the gateway: transport error, non-2xx
/// status, or a body that is not JSON when JSON was expected.
#[derive(Debug, Error)]
#[error("compute service unavailable: {reason}")]
pub struct UpstreamUnavailable {
    pub reason: String,
}

impl UpstreamUnavailable {
    fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ComputeApiClient {
    base_url: String,
    client: reqwest::Client,
}

impl ComputeApiClient {
    pub fn new(base_url: String) -> Self {
        Self {
            base_url,
            client: reqwest::Client::new(),
        }
    }

    async fn post(&self, path: &str, payload: &Value) -> Result<Response, UpstreamUnavailable> {
        let response = self
            .client
            .post(format!("{}{}", self.base_url, path))
            .json(payload)
            .send()
            .await
            .map_err(|e| UpstreamUnavailable::new(format!("POST {}: {}", path, e)))?;

        if !response.status().is_success() {
            return Err(UpstreamUnavailable::new(format!(
                "POST {} returned {}",
                path,
                response.status()
            )));
        }
        Ok(response)
    }

    async fn post_json(&self, path: &str, payload: &Value) -> Result<Value, UpstreamUnavailable> {
        self.post(path, payload)
            .await?
            .json()
            .await
            .map_err(|e| UpstreamUnavailable::new(format!("POST {}: invalid body: {}", path, e)))
    }

    async fn get_json(&self, path: &str) -> Result<Value, UpstreamUnavailable> {
        let response = self
            .client
            .get(format!("{}{}", self.base_url, path))
            .send()
            .await
            .map_err(|e| UpstreamUnavailable::new(format!("GET {}: {}", path, e)))?;

        if !response.status().is_success() {
            return Err(UpstreamUnavailable::new(format!(
                "GET {} returned {}",
                path,
                response.status()
            )));
        }
        response
            .json()
            .await
            .map_err(|e| UpstreamUnavailable::new(format!("GET {}: invalid body: {}", path, e)))
    }

    pub async fn fetch_stock_data(
        &self,
        req: &StockDataRequest,
    ) -> Result<Value, UpstreamUnavailable> {
        self.post_json("/api/stock/fetch", &stock_fetch_payload(req))
            .await
    }

    pub async fn validate_ticker(&self, ticker: &str) -> Result<Value, UpstreamUnavailable> {
        self.get_json(&format!("/api/stock/validate/{}", path_segment(ticker)))
            .await
    }

    pub async fn generate_features(
        &self,
        req: &FeatureGenerateRequest,
    ) -> Result<Value, UpstreamUnavailable> {
        self.post_json("/api/features/generate", &features_payload(req))
            .await
    }

    pub async fn list_feature_presets(&self) -> Result<Value, UpstreamUnavailable> {
        self.get_json("/api/features/presets").await
    }

    pub async fn list_available_models(&self) -> Result<Value, UpstreamUnavailable> {
        self.get_json("/api/models/available").await
    }

    pub async fn start_training(
        &self,
        analysis_id: &str,
        req: &TrainRequest,
    ) -> Result<Value, UpstreamUnavailable> {
        self.post_json("/api/models/train", &train_payload(analysis_id, req))
            .await
    }

    pub async fn get_training_status(
        &self,
        analysis_id: &str,
    ) -> Result<Value, UpstreamUnavailable> {
        self.get_json(&format!("/api/models/status/{}", path_segment(analysis_id)))
            .await
    }

    pub async fn generate_forecast(
        &self,
        req: &ForecastRequest,
    ) -> Result<Value, UpstreamUnavailable> {
        self.post_json("/api/forecast/generate", &forecast_payload(req))
            .await
    }

    pub async fn run_backtest(&self, req: &BacktestRequest) -> Result<Value, UpstreamUnavailable> {
        self.post_json("/api/backtest/run", &backtest_payload(req))
            .await
    }

    /// CSV export keeps the upstream response intact so the caller can
    /// stream the body through to the dashboard connection.
    pub async fn export_csv(&self, req: &ExportRequest) -> Result<Response, UpstreamUnavailable> {
        self.post("/api/export/csv", &export_payload(req)).await
    }

    pub async fn export_json(&self, req: &ExportRequest) -> Result<Value, UpstreamUnavailable> {
        self.post_json("/api/export/json", &export_payload(req))
            .await
    }
}

/// Values interpolated into an upstream path must not be able to change the
/// route they address.
fn path_segment(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

fn stock_fetch_payload(req: &StockDataRequest) -> Value {
    json!({
        "ticker": req.ticker,
        "country": req.country,
        "start_date": req.start_date,
        "end_date": req.end_date,
        "interval": req.interval,
    })
}

fn features_payload(req: &FeatureGenerateRequest) -> Value {
    json!({
        "ticker": req.ticker,
        "preset": req.preset,
        "selected_features": req.selected_features,
        "stock_data": req.stock_data,
    })
}

fn train_payload(analysis_id: &str, req: &TrainRequest) -> Value {
    json!({
        "analysis_id": analysis_id,
        "ticker": req.ticker,
        "country": req.country,
        "start_date": req.start_date,
        "end_date": req.end_date,
        "interval": req.interval,
        "feature_preset": req.feature_preset,
        "selected_features": req.selected_features,
        "selected_models": req.selected_models,
        "forecast_horizon": req.forecast_horizon,
        "training_window": req.training_window,
    })
}

fn forecast_payload(req: &ForecastRequest) -> Value {
    json!({
        "analysis_id": req.analysis_id,
        "model_names": req.model_names,
        "horizon": req.horizon,
    })
}

fn backtest_payload(req: &BacktestRequest) -> Value {
    json!({
        "analysis_id": req.analysis_id,
        "period": req.period,
        "rolling_window": req.rolling_window,
        "forecast_horizon": req.forecast_horizon,
        "metrics": req.metrics,
    })
}

fn export_payload(req: &ExportRequest) -> Value {
    json!({
        "analysis_id": req.analysis_id,
        "data_type": req.data_type,
    })
}
