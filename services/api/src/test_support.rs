//! Test doubles shared by the handler and enrichment tests

use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use async_trait::async_trait;
use common::repositories::MemoryDataManager;
use omdb::{MovieDetails, MovieLookup, OmdbError, SearchCandidate};

use crate::state::AppState;

/// Canned lookup: either always answers with `details` or always fails
pub struct FakeLookup {
    details: Option<MovieDetails>,
    calls: AtomicUsize,
}

impl FakeLookup {
    pub fn returning(details: MovieDetails) -> Self {
        Self {
            details: Some(details),
            calls: AtomicUsize::new(0),
        }
    }

    /// Every call fails as if the network were down
    pub fn failing() -> Self {
        Self {
            details: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn answer(&self) -> omdb::Result<MovieDetails> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.details.clone().ok_or_else(|| OmdbError::Api {
            status_code: 503,
            message: "service unavailable".to_string(),
        })
    }
}

#[async_trait]
impl MovieLookup for FakeLookup {
    async fn search_by_title(&self, _title: &str) -> omdb::Result<Vec<SearchCandidate>> {
        let details = self.answer()?;
        Ok(vec![SearchCandidate {
            imdb_id: details.imdb_id,
            title: details.title,
            year: details.year,
            poster_url: details.poster_url,
        }])
    }

    async fn lookup_by_id(&self, _imdb_id: &str) -> omdb::Result<MovieDetails> {
        self.answer()
    }

    async fn lookup_by_title(&self, _title: &str) -> omdb::Result<MovieDetails> {
        self.answer()
    }
}

/// OMDb-shaped record for Inception, poster left as the service's placeholder
pub fn inception() -> MovieDetails {
    MovieDetails {
        imdb_id: "tt1375666".to_string(),
        title: "Inception".to_string(),
        director: "Christopher Nolan".to_string(),
        year: "2010".to_string(),
        rating: "8.8".to_string(),
        poster_url: "N/A".to_string(),
        plot: "A thief who steals corporate secrets through dream-sharing technology.".to_string(),
    }
}

pub fn app_state(lookup: Arc<FakeLookup>) -> (AppState, Arc<MemoryDataManager>) {
    let data_manager = Arc::new(MemoryDataManager::new());
    let state = AppState {
        data_manager: data_manager.clone(),
        lookup,
    };
    (state, data_manager)
}
