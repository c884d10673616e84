//! Data access layer for users and their movies
//!
//! Request handlers and tools only ever talk to storage through the
//! [`DataManager`] trait. [`SqliteDataManager`] is the production
//! implementation; [`MemoryDataManager`] keeps everything in process and is
//! meant for tests.

use async_trait::async_trait;

use crate::{
    error::{DatabaseError, DatabaseResult},
    models::{Movie, MovieUpdate, NewMovie, User},
};

pub mod memory;
pub mod sqlite;

pub use memory::MemoryDataManager;
pub use sqlite::SqliteDataManager;

/// Contract between request handling and persisted storage
///
/// Lookups signal absence with `None` (or `false` for mutations) rather than
/// an error. Every mutation is committed before the call returns.
#[async_trait]
pub trait DataManager: Send + Sync {
    /// All users, in insertion order
    async fn get_all_users(&self) -> DatabaseResult<Vec<User>>;

    /// A single user by ID
    async fn get_user(&self, user_id: i64) -> DatabaseResult<Option<User>>;

    /// All movies owned by a user
    ///
    /// Returns an empty list for unknown users; existence is not validated.
    async fn get_user_movies(&self, user_id: i64) -> DatabaseResult<Vec<Movie>>;

    /// A single movie by ID
    async fn get_movie(&self, movie_id: i64) -> DatabaseResult<Option<Movie>>;

    /// Create a user. Names need not be unique but must not be blank.
    async fn add_user(&self, name: &str) -> DatabaseResult<User>;

    /// Create a movie owned by `user_id`
    ///
    /// An unknown owner is rejected with [`DatabaseError::InvalidInput`].
    async fn add_movie(&self, user_id: i64, movie: &NewMovie) -> DatabaseResult<Movie>;

    /// Overwrite the fields present in `changes`
    ///
    /// Returns `false` when no movie has that ID. Never creates a record.
    async fn update_movie(&self, movie_id: i64, changes: &MovieUpdate) -> DatabaseResult<bool>;

    /// Remove a movie. Returns `false` if it was already absent.
    async fn delete_movie(&self, movie_id: i64) -> DatabaseResult<bool>;

    /// Remove a user together with all of its movies
    async fn delete_user(&self, user_id: i64) -> DatabaseResult<bool>;
}

pub(crate) fn require_non_blank(field: &str, value: &str) -> DatabaseResult<()> {
    if value.trim().is_empty() {
        return Err(DatabaseError::InvalidInput(format!("{} must not be empty", field)));
    }

    Ok(())
}
