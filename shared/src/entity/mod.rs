//! `SeaORM` entities for the four persisted tables.

pub mod export_histories;
pub mod model_results;
pub mod stock_analyses;
pub mod users;
