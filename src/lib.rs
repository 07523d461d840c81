use std::sync::Arc;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

pub mod agents;
pub mod config;
pub mod crew;
pub mod error;
pub mod extract;
pub mod markers;
pub mod models;
pub mod routes;
pub mod types;

use config::AppConfig;
use crew::AnalysisPipeline;

/// Embedded schema migrations, applied at startup (and by tests).
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");

pub struct AppState {
    pub pool: SqlitePool,
    pub config: AppConfig,
    pub pipeline: Arc<dyn AnalysisPipeline>,
}

/// Open the SQLite pool, creating the database file on first run. Foreign
/// keys are enforced so report deletion cascades to markers and analyses.
pub async fn init_pool(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    let options: SqliteConnectOptions = database_url
        .parse::<SqliteConnectOptions>()?
        .create_if_missing(true)
        .foreign_keys(true);

    SqlitePoolOptions::new().connect_with(options).await
}
