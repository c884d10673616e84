use std::sync::Arc;

use anyhow::Result;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod enrichment;
mod error;
mod models;
mod routes;
mod settings;
mod state;
#[cfg(test)]
mod test_support;

use common::{
    database::{DatabaseConfig, health_check, init_pool, init_schema},
    repositories::SqliteDataManager,
};
use omdb::{OmdbClient, OmdbConfig};
use tokio::net::TcpListener;

use crate::{settings::ServerConfig, state::AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Starting MovieWeb API service");

    let server_config = ServerConfig::load()?;

    // Initialize database connection pool and schema
    let db_config = DatabaseConfig::from_env()?;
    let pool = init_pool(&db_config).await?;
    init_schema(&pool).await?;

    if health_check(&pool).await? {
        info!("Database connection successful");
    } else {
        anyhow::bail!("Failed to connect to database");
    }

    // Initialize the metadata lookup
    let omdb_config = OmdbConfig::from_env();
    if omdb_config.api_key.is_none() {
        warn!("OMDB_API_KEY is not set; movies will only carry manually entered details");
    }
    let lookup = OmdbClient::new(omdb_config)?;

    let app_state = AppState {
        data_manager: Arc::new(SqliteDataManager::new(pool)),
        lookup: Arc::new(lookup),
    };

    // Start the web server
    let app = routes::create_router(app_state);

    let listener = TcpListener::bind(&server_config.bind_address).await?;
    info!("API service listening on {}", server_config.bind_address);

    axum::serve(listener, app).await?;

    Ok(())
}
