use std::sync::Arc;

use anyhow::Result;
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::Utc;
use sea_orm::{DatabaseConnection, Set};
use serde_json::{json, Value};
use shared::entity::users;
use shared::{get_db_connection, ComputeApiClient, Config};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

mod error;
mod handlers;
mod repositories;
mod state;

use crate::repositories::UserRepository;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    info!("Starting ForecastLab API server...");

    let config = Config::from_env()?;
    let db = Arc::new(get_db_connection(&config.database_url).await?);
    info!("Connected to database");

    let owner_id = ensure_default_owner(db.clone(), &config.default_owner).await?;
    let compute = ComputeApiClient::new(config.compute_api_url.clone());
    info!("Forwarding compute calls to {}", config.compute_api_url);

    let state = Arc::new(AppState {
        db,
        compute,
        owner_id,
    });

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/health", get(health_check))
        // Stock data
        .route("/api/stock/fetch", post(handlers::stock::fetch_stock_data))
        .route(
            "/api/stock/validate/:ticker",
            get(handlers::stock::validate_ticker),
        )
        // Feature engineering
        .route(
            "/api/features/generate",
            post(handlers::features::generate_features),
        )
        .route(
            "/api/features/presets",
            get(handlers::features::feature_presets),
        )
        // Model training
        .route(
            "/api/models/available",
            get(handlers::models::available_models),
        )
        .route("/api/models/train", post(handlers::models::start_training))
        .route(
            "/api/models/status/:analysis_id",
            get(handlers::models::training_status),
        )
        .route(
            "/api/models/results/:analysis_id",
            get(handlers::models::model_results),
        )
        // Forecasting and backtesting
        .route(
            "/api/forecast/generate",
            post(handlers::forecast::generate_forecast),
        )
        .route("/api/backtest/run", post(handlers::forecast::run_backtest))
        // Exports
        .route("/api/export/csv", post(handlers::export::export_csv))
        .route("/api/export/json", post(handlers::export::export_json))
        .route("/api/export/history", get(handlers::export::export_history))
        // Persisted analyses
        .route("/api/analyses", get(handlers::analyses::list_analyses))
        .route("/api/analyses/:id", get(handlers::analyses::get_analysis))
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!("API server listening on http://{}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}

async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Single-tenant placeholder identity: get or create the owner row every
/// analysis and export is attributed to.
async fn ensure_default_owner(db: Arc<DatabaseConnection>, username: &str) -> Result<i64> {
    let repo = UserRepository::new(db);
    if let Some(user) = repo.find_by_username(username).await? {
        return Ok(user.id);
    }

    let user = repo
        .create(users::ActiveModel {
            username: Set(username.to_string()),
            password: Set(String::new()),
            created_at: Set(Utc::now()),
            ..Default::default()
        })
        .await?;
    info!("Created default owner '{}' (id {})", username, user.id);
    Ok(user.id)
}
