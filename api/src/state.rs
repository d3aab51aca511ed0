use std::sync::Arc;

use sea_orm::DatabaseConnection;
use shared::ComputeApiClient;

/// Read-only after startup; shared across request tasks via `Arc`.
pub struct AppState {
    pub db: Arc<DatabaseConnection>,
    pub compute: ComputeApiClient,
    /// Placeholder owner for the single-tenant design. Every analysis and
    /// export row is attributed to this user until real auth lands.
    pub owner_id: i64,
}
