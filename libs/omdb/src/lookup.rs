//! Lookup contract used by the enrichment workflow

use async_trait::async_trait;
use tracing::debug;

use crate::{MovieDetails, OmdbClient, SearchCandidate};

/// Read-only movie metadata source
///
/// Implemented by [`OmdbClient`]; handlers depend on this trait so tests can
/// substitute a canned source.
#[async_trait]
pub trait MovieLookup: Send + Sync {
    /// Candidate summaries for a free-text title
    async fn search_by_title(&self, title: &str) -> crate::Result<Vec<SearchCandidate>>;

    /// Full record for a catalog identifier
    async fn lookup_by_id(&self, imdb_id: &str) -> crate::Result<MovieDetails>;

    /// Full record for the service's best single title match
    async fn lookup_by_title(&self, title: &str) -> crate::Result<MovieDetails>;

    /// Search by title, then fetch full details for the first candidate
    ///
    /// Returns `None` when the search has no results.
    async fn find_best(&self, title: &str) -> crate::Result<Option<MovieDetails>> {
        let candidates = self.search_by_title(title).await?;

        let Some(first) = candidates.into_iter().find(|c| !c.imdb_id.is_empty()) else {
            debug!("No candidates for '{}'", title);
            return Ok(None);
        };

        self.lookup_by_id(&first.imdb_id).await.map(Some)
    }
}

#[async_trait]
impl MovieLookup for OmdbClient {
    async fn search_by_title(&self, title: &str) -> crate::Result<Vec<SearchCandidate>> {
        OmdbClient::search_by_title(self, title).await
    }

    async fn lookup_by_id(&self, imdb_id: &str) -> crate::Result<MovieDetails> {
        OmdbClient::lookup_by_id(self, imdb_id).await
    }

    async fn lookup_by_title(&self, title: &str) -> crate::Result<MovieDetails> {
        OmdbClient::lookup_by_title(self, title).await
    }
}
