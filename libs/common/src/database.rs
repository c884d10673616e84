//! Database module for handling SQLite connections and the storage schema
//!
//! This module provides connection pooling, configuration, schema creation and
//! health checks for the SQLite database holding users and their movies.

use crate::error::{DatabaseError, DatabaseResult};
use sqlx::{
    Row, SqlitePool,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
};
use std::{env, str::FromStr};
use tracing::info;

/// Columns added to `movies` after the first release of the schema.
///
/// Only missing columns are added; declared types of existing ones never change.
const ADDITIVE_MOVIE_COLUMNS: &[(&str, &str)] = &[("poster_url", "TEXT"), ("plot", "TEXT")];

/// Database configuration struct
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Database connection URL
    pub database_url: String,
    /// Maximum number of connections in the pool
    pub max_connections: u32,
}

impl DatabaseConfig {
    /// Create a new DatabaseConfig from environment variables
    ///
    /// # Environment Variables
    /// - `DATABASE_URL`: SQLite connection URL (default: "sqlite://movieweb.db")
    /// - `DATABASE_MAX_CONNECTIONS`: Maximum number of connections (default: 5)
    pub fn from_env() -> DatabaseResult<Self> {
        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://movieweb.db".to_string());

        let max_connections = env::var("DATABASE_MAX_CONNECTIONS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(5);

        if max_connections == 0 {
            return Err(DatabaseError::Configuration(
                "DATABASE_MAX_CONNECTIONS must be at least 1".to_string(),
            ));
        }

        Ok(Self {
            database_url,
            max_connections,
        })
    }
}

/// Initialize a SQLite connection pool
///
/// The database file is created when missing and foreign key enforcement is
/// switched on for every connection, so deleting a user cascades to its
/// movies at the storage level too.
///
/// # Arguments
///
/// * `config` - Database configuration
///
/// # Returns
///
/// * `DatabaseResult<SqlitePool>` - SQLite connection pool or error
pub async fn init_pool(config: &DatabaseConfig) -> DatabaseResult<SqlitePool> {
    let options = SqliteConnectOptions::from_str(&config.database_url)
        .map_err(|e| DatabaseError::Configuration(format!("Invalid database URL: {}", e)))?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .connect_with(options)
        .await
        .map_err(DatabaseError::Connection)?;

    info!("Database connection pool initialized for {}", config.database_url);
    Ok(pool)
}

/// Initialize a private in-memory database with the schema already applied
///
/// Every connection to `sqlite::memory:` opens its own database, so the pool
/// is pinned to a single connection that is never recycled.
pub async fn init_memory_pool() -> DatabaseResult<SqlitePool> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .map_err(|e| DatabaseError::Configuration(format!("Invalid database URL: {}", e)))?
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
        .map_err(DatabaseError::Connection)?;

    init_schema(&pool).await?;
    Ok(pool)
}

/// Create the `users` and `movies` tables if they are absent
///
/// Safe to run on every start. Databases created before the poster and plot
/// columns existed are upgraded in place with `ALTER TABLE ... ADD COLUMN`.
///
/// Existing column types are left as they are. A legacy `movies` table whose
/// `year` column was declared `INTEGER` keeps integer affinity, so a year such
/// as `"0123"` reads back as `"123"`; non-numeric years are stored verbatim.
pub async fn init_schema(pool: &SqlitePool) -> DatabaseResult<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await
    .map_err(|e| DatabaseError::Migration(format!("Failed to create users table: {}", e)))?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS movies (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            director TEXT,
            year TEXT,
            rating TEXT,
            poster_url TEXT,
            plot TEXT,
            user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE
        )
        "#,
    )
    .execute(pool)
    .await
    .map_err(|e| DatabaseError::Migration(format!("Failed to create movies table: {}", e)))?;

    let existing: Vec<String> = sqlx::query("SELECT name FROM pragma_table_info('movies')")
        .fetch_all(pool)
        .await
        .map_err(|e| DatabaseError::Migration(format!("Failed to inspect movies table: {}", e)))?
        .into_iter()
        .map(|row| row.get("name"))
        .collect();

    for (column, sql_type) in ADDITIVE_MOVIE_COLUMNS {
        if existing.iter().any(|name| name == column) {
            continue;
        }

        info!("Adding missing column movies.{}", column);
        let statement = format!("ALTER TABLE movies ADD COLUMN {} {}", column, sql_type);
        sqlx::query(&statement)
            .execute(pool)
            .await
            .map_err(|e| {
                DatabaseError::Migration(format!("Failed to add column movies.{}: {}", column, e))
            })?;
    }

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_movies_user_id ON movies(user_id)")
        .execute(pool)
        .await
        .map_err(|e| DatabaseError::Migration(format!("Failed to create index: {}", e)))?;

    Ok(())
}

/// Check database connectivity
///
/// # Arguments
///
/// * `pool` - SQLite connection pool
///
/// # Returns
///
/// * `DatabaseResult<bool>` - True if connection is successful
pub async fn health_check(pool: &SqlitePool) -> DatabaseResult<bool> {
    sqlx::query("SELECT 1")
        .execute(pool)
        .await
        .map_err(DatabaseError::Query)?;

    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_database_config_from_env() {
        unsafe {
            env::remove_var("DATABASE_URL");
            env::remove_var("DATABASE_MAX_CONNECTIONS");
        }

        let config = DatabaseConfig::from_env().expect("Failed to create database config");
        assert_eq!(config.max_connections, 5);
        assert_eq!(config.database_url, "sqlite://movieweb.db");
    }

    #[test]
    #[serial]
    fn test_database_config_from_env_with_custom_values() {
        unsafe {
            env::set_var("DATABASE_URL", "sqlite:///tmp/movies.db");
            env::set_var("DATABASE_MAX_CONNECTIONS", "2");
        }

        let config = DatabaseConfig::from_env().unwrap();
        assert_eq!(config.database_url, "sqlite:///tmp/movies.db");
        assert_eq!(config.max_connections, 2);

        unsafe {
            env::set_var("DATABASE_MAX_CONNECTIONS", "0");
        }
        assert!(matches!(
            DatabaseConfig::from_env(),
            Err(DatabaseError::Configuration(_))
        ));

        unsafe {
            env::remove_var("DATABASE_URL");
            env::remove_var("DATABASE_MAX_CONNECTIONS");
        }
    }

    #[tokio::test]
    async fn test_init_schema_is_idempotent() {
        let pool = init_memory_pool().await.unwrap();
        init_schema(&pool).await.unwrap();
        init_schema(&pool).await.unwrap();

        assert!(health_check(&pool).await.unwrap());
    }

    #[tokio::test]
    async fn test_init_schema_upgrades_legacy_movies_table() {
        let options = SqliteConnectOptions::from_str("sqlite::memory:").unwrap();
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .unwrap();

        sqlx::query("CREATE TABLE users (id INTEGER PRIMARY KEY AUTOINCREMENT, name TEXT NOT NULL)")
            .execute(&pool)
            .await
            .unwrap();
        sqlx::query(
            r#"
            CREATE TABLE movies (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL,
                director TEXT,
                year TEXT,
                rating TEXT,
                user_id INTEGER NOT NULL REFERENCES users(id)
            )
            "#,
        )
        .execute(&pool)
        .await
        .unwrap();
        sqlx::query("INSERT INTO users (name) VALUES ('Ada')")
            .execute(&pool)
            .await
            .unwrap();
        sqlx::query("INSERT INTO movies (title, user_id) VALUES ('Alien', 1)")
            .execute(&pool)
            .await
            .unwrap();

        init_schema(&pool).await.unwrap();

        let row = sqlx::query("SELECT title, poster_url, plot FROM movies WHERE id = 1")
            .fetch_one(&pool)
            .await
            .unwrap();
        let title: String = row.get("title");
        let poster_url: Option<String> = row.get("poster_url");
        let plot: Option<String> = row.get("plot");

        assert_eq!(title, "Alien");
        assert_eq!(poster_url, None);
        assert_eq!(plot, None);
    }

    #[tokio::test]
    async fn test_init_schema_keeps_legacy_integer_year_column() {
        let pool = init_memory_pool().await.unwrap();
        sqlx::query("DROP TABLE movies").execute(&pool).await.unwrap();
        sqlx::query(
            r#"
            CREATE TABLE movies (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL,
                director TEXT,
                year INTEGER,
                rating FLOAT,
                user_id INTEGER NOT NULL REFERENCES users(id)
            )
            "#,
        )
        .execute(&pool)
        .await
        .unwrap();

        init_schema(&pool).await.unwrap();

        let year_type: String =
            sqlx::query_scalar("SELECT type FROM pragma_table_info('movies') WHERE name = 'year'")
                .fetch_one(&pool)
                .await
                .unwrap();
        assert_eq!(year_type, "INTEGER");

        sqlx::query("INSERT INTO users (name) VALUES ('Ada')")
            .execute(&pool)
            .await
            .unwrap();
        for year in ["2010", "0123", "2010-2012"] {
            sqlx::query("INSERT INTO movies (title, year, user_id) VALUES ('Alien', ?, 1)")
                .bind(year)
                .execute(&pool)
                .await
                .unwrap();
        }

        let years: Vec<String> =
            sqlx::query_scalar("SELECT COALESCE(CAST(year AS TEXT), '') FROM movies ORDER BY id")
                .fetch_all(&pool)
                .await
                .unwrap();
        assert_eq!(years, vec!["2010", "123", "2010-2012"]);
    }
}
