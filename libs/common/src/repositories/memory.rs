//! In-process data manager for tests and local experiments

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{DataManager, require_non_blank};
use crate::{
    error::{DatabaseError, DatabaseResult},
    models::{Movie, MovieUpdate, NewMovie, User},
};

#[derive(Default)]
struct Store {
    users: BTreeMap<i64, User>,
    movies: BTreeMap<i64, Movie>,
    last_user_id: i64,
    last_movie_id: i64,
}

/// Data manager that keeps users and movies in memory
///
/// Mirrors the SQLite implementation, including rejecting movies whose owner
/// does not exist.
#[derive(Default)]
pub struct MemoryDataManager {
    store: RwLock<Store>,
}

impl MemoryDataManager {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DataManager for MemoryDataManager {
    async fn get_all_users(&self) -> DatabaseResult<Vec<User>> {
        Ok(self.store.read().await.users.values().cloned().collect())
    }

    async fn get_user(&self, user_id: i64) -> DatabaseResult<Option<User>> {
        Ok(self.store.read().await.users.get(&user_id).cloned())
    }

    async fn get_user_movies(&self, user_id: i64) -> DatabaseResult<Vec<Movie>> {
        let store = self.store.read().await;
        Ok(store
            .movies
            .values()
            .filter(|movie| movie.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn get_movie(&self, movie_id: i64) -> DatabaseResult<Option<Movie>> {
        Ok(self.store.read().await.movies.get(&movie_id).cloned())
    }

    async fn add_user(&self, name: &str) -> DatabaseResult<User> {
        require_non_blank("name", name)?;

        let mut store = self.store.write().await;
        store.last_user_id += 1;
        let user = User {
            id: store.last_user_id,
            name: name.to_string(),
        };
        store.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn add_movie(&self, user_id: i64, movie: &NewMovie) -> DatabaseResult<Movie> {
        require_non_blank("title", &movie.title)?;

        let mut store = self.store.write().await;
        if !store.users.contains_key(&user_id) {
            return Err(DatabaseError::InvalidInput(format!(
                "user {} does not exist",
                user_id
            )));
        }

        store.last_movie_id += 1;
        let created = Movie {
            id: store.last_movie_id,
            title: movie.title.clone(),
            director: movie.director.clone(),
            year: movie.year.clone(),
            rating: movie.rating.clone(),
            poster_url: movie.poster_url.clone(),
            plot: movie.plot.clone(),
            user_id,
        };
        store.movies.insert(created.id, created.clone());
        Ok(created)
    }

    async fn update_movie(&self, movie_id: i64, changes: &MovieUpdate) -> DatabaseResult<bool> {
        if let Some(title) = &changes.title {
            require_non_blank("title", title)?;
        }

        let mut store = self.store.write().await;
        match store.movies.get_mut(&movie_id) {
            Some(movie) => {
                changes.apply_to(movie);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_movie(&self, movie_id: i64) -> DatabaseResult<bool> {
        Ok(self.store.write().await.movies.remove(&movie_id).is_some())
    }

    async fn delete_user(&self, user_id: i64) -> DatabaseResult<bool> {
        let mut store = self.store.write().await;
        if store.users.remove(&user_id).is_none() {
            return Ok(false);
        }

        store.movies.retain(|_, movie| movie.user_id != user_id);
        Ok(true)
    }
}
