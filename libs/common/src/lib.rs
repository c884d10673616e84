//! Common library for the MovieWeb application
//!
//! This crate provides the storage layer shared by the API service and the
//! importer: SQLite connectivity and schema, the user and movie entities, the
//! [`repositories::DataManager`] contract and its implementations, and error
//! handling.

pub mod database;
pub mod error;
pub mod models;
pub mod repositories;

/// Example usage of the database module
///
/// ```rust,no_run
/// use common::database::{DatabaseConfig, init_pool, init_schema};
/// use common::repositories::{DataManager, SqliteDataManager};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config = DatabaseConfig::from_env()?;
///     let pool = init_pool(&config).await?;
///     init_schema(&pool).await?;
///
///     let data_manager = SqliteDataManager::new(pool);
///     let user = data_manager.add_user("Ada").await?;
///     println!("Created user {}", user.id);
///     Ok(())
/// }
/// ```
pub fn example_usage() {}
