//! SQLite-backed data manager

use async_trait::async_trait;
use sqlx::SqlitePool;
use tracing::info;

use super::{DataManager, require_non_blank};
use crate::{
    error::{DatabaseError, DatabaseResult},
    models::{Movie, MovieUpdate, NewMovie, User},
};

/// Data manager for the `users` and `movies` tables
#[derive(Clone)]
pub struct SqliteDataManager {
    pool: SqlitePool,
}

impl SqliteDataManager {
    /// Create a new data manager over an initialized pool
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// The underlying pool, for health checks
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl DataManager for SqliteDataManager {
    async fn get_all_users(&self) -> DatabaseResult<Vec<User>> {
        let users = sqlx::query_as::<_, User>("SELECT id, name FROM users ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        Ok(users)
    }

    async fn get_user(&self, user_id: i64) -> DatabaseResult<Option<User>> {
        let user = sqlx::query_as::<_, User>("SELECT id, name FROM users WHERE id = ?")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    async fn get_user_movies(&self, user_id: i64) -> DatabaseResult<Vec<Movie>> {
        let movies = sqlx::query_as::<_, Movie>(
            r#"
            SELECT id, title,
                   COALESCE(director, '') AS director,
                   COALESCE(CAST(year AS TEXT), '') AS year,
                   COALESCE(CAST(rating AS TEXT), '') AS rating,
                   COALESCE(poster_url, '') AS poster_url,
                   COALESCE(plot, '') AS plot,
                   user_id
            FROM movies
            WHERE user_id = ?
            ORDER BY id
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(movies)
    }

    async fn get_movie(&self, movie_id: i64) -> DatabaseResult<Option<Movie>> {
        let movie = sqlx::query_as::<_, Movie>(
            r#"
            SELECT id, title,
                   COALESCE(director, '') AS director,
                   COALESCE(CAST(year AS TEXT), '') AS year,
                   COALESCE(CAST(rating AS TEXT), '') AS rating,
                   COALESCE(poster_url, '') AS poster_url,
                   COALESCE(plot, '') AS plot,
                   user_id
            FROM movies
            WHERE id = ?
            "#,
        )
        .bind(movie_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(movie)
    }

    async fn add_user(&self, name: &str) -> DatabaseResult<User> {
        require_non_blank("name", name)?;
        info!("Creating new user: {}", name);

        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name)
            VALUES (?)
            RETURNING id, name
            "#,
        )
        .bind(name)
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }

    async fn add_movie(&self, user_id: i64, movie: &NewMovie) -> DatabaseResult<Movie> {
        require_non_blank("title", &movie.title)?;
        info!("Adding movie '{}' for user {}", movie.title, user_id);

        // Selecting the owner row makes an unknown user insert nothing
        let created = sqlx::query_as::<_, Movie>(
            r#"
            INSERT INTO movies (title, director, year, rating, poster_url, plot, user_id)
            SELECT ?, ?, ?, ?, ?, ?, id FROM users WHERE id = ?
            RETURNING id, title,
                      COALESCE(director, '') AS director,
                      COALESCE(CAST(year AS TEXT), '') AS year,
                      COALESCE(CAST(rating AS TEXT), '') AS rating,
                      COALESCE(poster_url, '') AS poster_url,
                      COALESCE(plot, '') AS plot,
                      user_id
            "#,
        )
        .bind(&movie.title)
        .bind(&movie.director)
        .bind(&movie.year)
        .bind(&movie.rating)
        .bind(&movie.poster_url)
        .bind(&movie.plot)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        created.ok_or_else(|| unknown_owner(user_id))
    }

    async fn update_movie(&self, movie_id: i64, changes: &MovieUpdate) -> DatabaseResult<bool> {
        if let Some(title) = &changes.title {
            require_non_blank("title", title)?;
        }

        let result = sqlx::query(
            r#"
            UPDATE movies
            SET title = COALESCE(?, title),
                director = COALESCE(?, director),
                year = COALESCE(?, year),
                rating = COALESCE(?, rating),
                poster_url = COALESCE(?, poster_url),
                plot = COALESCE(?, plot)
            WHERE id = ?
            "#,
        )
        .bind(&changes.title)
        .bind(&changes.director)
        .bind(&changes.year)
        .bind(&changes.rating)
        .bind(&changes.poster_url)
        .bind(&changes.plot)
        .bind(movie_id)
        .execute(&self.pool)
        .await?;

        let updated = result.rows_affected() > 0;
        if updated {
            info!("Updated movie {}", movie_id);
        }
        Ok(updated)
    }

    async fn delete_movie(&self, movie_id: i64) -> DatabaseResult<bool> {
        let result = sqlx::query("DELETE FROM movies WHERE id = ?")
            .bind(movie_id)
            .execute(&self.pool)
            .await?;

        let deleted = result.rows_affected() > 0;
        if deleted {
            info!("Deleted movie {}", movie_id);
        }
        Ok(deleted)
    }

    async fn delete_user(&self, user_id: i64) -> DatabaseResult<bool> {
        // No reads before the first write: the transaction must never hold a
        // shared lock it later has to upgrade.
        let mut tx = self.pool.begin().await?;

        let movies = sqlx::query("DELETE FROM movies WHERE user_id = ?")
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        let users = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        if users.rows_affected() == 0 {
            tx.rollback().await?;
            return Ok(false);
        }

        tx.commit().await?;
        info!(
            "Deleted user {} and {} of their movies",
            user_id,
            movies.rows_affected()
        );
        Ok(true)
    }
}

fn unknown_owner(user_id: i64) -> DatabaseError {
    DatabaseError::InvalidInput(format!("user {} does not exist", user_id))
}
