pub mod compute;
pub mod config;
pub mod database;
pub mod entity;
pub mod models;

pub use compute::{ComputeApiClient, UpstreamUnavailable};
pub use config::Config;
pub use database::get_db_connection;
pub use models::*;
