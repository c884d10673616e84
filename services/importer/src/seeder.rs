use std::collections::HashSet;

use common::{
    error::DatabaseResult,
    models::{NewMovie, User},
    repositories::DataManager,
};
use omdb::{MovieLookup, OmdbError};
use tracing::{debug, info, warn};

/// Outcome counters of one import run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub added: usize,
    pub skipped: usize,
    pub not_found: usize,
    pub failed: usize,
}

/// Seeds a user's list from a list of titles
pub struct Seeder<'a> {
    data_manager: &'a dyn DataManager,
    lookup: &'a dyn MovieLookup,
}

impl<'a> Seeder<'a> {
    pub fn new(data_manager: &'a dyn DataManager, lookup: &'a dyn MovieLookup) -> Self {
        Self {
            data_manager,
            lookup,
        }
    }

    /// Reuse the first user called `name`, or create one
    pub async fn find_or_create_user(&self, name: &str) -> DatabaseResult<User> {
        let existing = self
            .data_manager
            .get_all_users()
            .await?
            .into_iter()
            .find(|user| user.name == name);

        match existing {
            Some(user) => {
                info!("Importing into existing user {} ({})", user.id, user.name);
                Ok(user)
            }
            None => {
                let user = self.data_manager.add_user(name).await?;
                info!("Created user {} ({})", user.id, user.name);
                Ok(user)
            }
        }
    }

    /// Look up every title and add the hits to `user_name`'s list
    ///
    /// Lookup failures are counted and skipped; database failures abort the run.
    pub async fn run(&self, user_name: &str, titles: &[String]) -> DatabaseResult<ImportSummary> {
        let user = self.find_or_create_user(user_name).await?;

        let mut known: HashSet<String> = self
            .data_manager
            .get_user_movies(user.id)
            .await?
            .into_iter()
            .map(|movie| title_key(&movie.title))
            .collect();

        let mut summary = ImportSummary::default();

        for title in titles {
            if known.contains(&title_key(title)) {
                debug!("Skipping '{}', already listed", title);
                summary.skipped += 1;
                continue;
            }

            let details = match self.lookup.lookup_by_title(title).await {
                Ok(details) => details,
                Err(OmdbError::NotFound(message)) => {
                    warn!("No match for '{}': {}", title, message);
                    summary.not_found += 1;
                    continue;
                }
                Err(e) => {
                    warn!("Lookup failed for '{}': {}", title, e);
                    summary.failed += 1;
                    continue;
                }
            };

            let stored_title = if details.title.trim().is_empty() {
                title.clone()
            } else {
                details.title.trim().to_string()
            };

            if !known.insert(title_key(&stored_title)) {
                debug!("Skipping '{}', resolved to listed '{}'", title, stored_title);
                summary.skipped += 1;
                continue;
            }

            let new_movie = NewMovie {
                title: stored_title,
                director: details.director,
                year: details.year,
                rating: details.rating,
                poster_url: details.poster_url,
                plot: details.plot,
            };

            let movie = self.data_manager.add_movie(user.id, &new_movie).await?;
            info!("Added '{}' as movie {}", movie.title, movie.id);
            known.insert(title_key(title));
            summary.added += 1;
        }

        Ok(summary)
    }
}

fn title_key(title: &str) -> String {
    title.trim().to_lowercase()
}
