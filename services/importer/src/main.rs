use anyhow::Result;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod seeder;
mod settings;

use common::{
    database::{DatabaseConfig, init_pool, init_schema},
    repositories::SqliteDataManager,
};
use omdb::{OmdbClient, OmdbConfig};

use crate::{seeder::Seeder, settings::ImportSettings};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Starting movie importer");

    let settings = ImportSettings::from_env();
    let titles = settings.titles()?;
    info!("Loaded {} titles", titles.len());

    let db_config = DatabaseConfig::from_env()?;
    let pool = init_pool(&db_config).await?;
    init_schema(&pool).await?;
    let data_manager = SqliteDataManager::new(pool);

    let omdb_config = OmdbConfig::from_env();
    if omdb_config.api_key.is_none() {
        warn!("OMDB_API_KEY is not set; every lookup will fail");
    }
    let lookup = OmdbClient::new(omdb_config)?;

    let summary = Seeder::new(&data_manager, &lookup)
        .run(&settings.user_name, &titles)
        .await?;

    info!(
        "Import finished for '{}': {} added, {} already listed, {} not found, {} failed",
        settings.user_name, summary.added, summary.skipped, summary.not_found, summary.failed
    );

    Ok(())
}
