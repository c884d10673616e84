//! Merging human input with metadata from the lookup service
//!
//! A non-blank value typed by a person always wins. Blank fields fall back to
//! the lookup, and then to an empty string. Lookup failures are logged here
//! and never reach the caller.

use common::models::{Movie, MovieUpdate, NewMovie};
use omdb::{MovieDetails, MovieLookup, OmdbError, normalize_field};
use tracing::{debug, warn};

use crate::models::{MovieForm, MovieUpdateForm};

/// Pick the human value if non-blank, else the fetched one, else empty
pub fn merge_field(human: &str, fetched: Option<&str>) -> String {
    let human = human.trim();
    if !human.is_empty() {
        return human.to_string();
    }

    normalize_field(fetched)
}

/// Merge for an edit: `None` means "leave the stored value alone"
///
/// An absent form field stands for the stored value, so a non-blank stored
/// value is never replaced by the lookup. A blank form value falls back to the
/// lookup and then to an empty string.
fn merge_update_field(human: Option<&str>, stored: &str, fetched: Option<&str>) -> Option<String> {
    let fetched = Some(normalize_field(fetched)).filter(|value| !value.is_empty());

    match human.map(str::trim) {
        Some(value) if !value.is_empty() => Some(value.to_string()),
        Some(_) => fetched.or_else(|| Some(String::new())),
        None if stored.trim().is_empty() => fetched,
        None => None,
    }
}

/// Query the lookup by catalog ID when one was picked, otherwise by title
///
/// Returns `None` on any failure.
pub async fn fetch_details(
    lookup: &dyn MovieLookup,
    imdb_id: Option<&str>,
    title: &str,
) -> Option<MovieDetails> {
    let imdb_id = imdb_id.map(str::trim).filter(|id| !id.is_empty());
    let result = match imdb_id {
        Some(id) => lookup.lookup_by_id(id).await.map(Some),
        None if title.trim().is_empty() => return None,
        None => lookup.find_best(title).await,
    };

    match result {
        Ok(details) => details,
        Err(OmdbError::MissingApiKey) => {
            debug!("Metadata lookup skipped for '{}': no API key", title);
            None
        }
        Err(e) => {
            warn!("Metadata lookup failed for '{}': {}", title, e);
            None
        }
    }
}

/// Build the movie to persist from a creation form
///
/// The lookup is only consulted when at least one field was left blank.
pub async fn enrich_new_movie(lookup: &dyn MovieLookup, form: &MovieForm) -> NewMovie {
    let has_blank = [
        &form.title,
        &form.director,
        &form.year,
        &form.rating,
        &form.poster_url,
        &form.plot,
    ]
    .iter()
    .any(|value| value.trim().is_empty());

    let fetched = if has_blank {
        fetch_details(lookup, form.imdb_id.as_deref(), &form.title).await
    } else {
        None
    };
    let fetched = fetched.as_ref();

    NewMovie {
        title: merge_field(&form.title, fetched.map(|d| d.title.as_str())),
        director: merge_field(&form.director, fetched.map(|d| d.director.as_str())),
        year: merge_field(&form.year, fetched.map(|d| d.year.as_str())),
        rating: merge_field(&form.rating, fetched.map(|d| d.rating.as_str())),
        poster_url: merge_field(&form.poster_url, fetched.map(|d| d.poster_url.as_str())),
        plot: merge_field(&form.plot, fetched.map(|d| d.plot.as_str())),
    }
}

/// Build the partial update for an edit form against the stored movie
pub async fn enrich_update(
    lookup: &dyn MovieLookup,
    current: &Movie,
    form: &MovieUpdateForm,
) -> MovieUpdate {
    let effective = [
        (&form.title, &current.title),
        (&form.director, &current.director),
        (&form.year, &current.year),
        (&form.rating, &current.rating),
        (&form.poster_url, &current.poster_url),
        (&form.plot, &current.plot),
    ];
    let has_blank = effective
        .iter()
        .any(|(human, stored)| human.as_deref().unwrap_or(stored.as_str()).trim().is_empty());

    let fetched = if form.autofill && has_blank {
        let title = form
            .title
            .as_deref()
            .filter(|title| !title.trim().is_empty())
            .unwrap_or(&current.title);
        fetch_details(lookup, form.imdb_id.as_deref(), title).await
    } else {
        None
    };
    let fetched = fetched.as_ref();

    MovieUpdate {
        title: merge_update_field(
            form.title.as_deref(),
            &current.title,
            fetched.map(|d| d.title.as_str()),
        ),
        director: merge_update_field(
            form.director.as_deref(),
            &current.director,
            fetched.map(|d| d.director.as_str()),
        ),
        year: merge_update_field(
            form.year.as_deref(),
            &current.year,
            fetched.map(|d| d.year.as_str()),
        ),
        rating: merge_update_field(
            form.rating.as_deref(),
            &current.rating,
            fetched.map(|d| d.rating.as_str()),
        ),
        poster_url: merge_update_field(
            form.poster_url.as_deref(),
            &current.poster_url,
            fetched.map(|d| d.poster_url.as_str()),
        ),
        plot: merge_update_field(
            form.plot.as_deref(),
            &current.plot,
            fetched.map(|d| d.plot.as_str()),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{FakeLookup, inception};

    fn stored_movie() -> Movie {
        Movie {
            id: 3,
            title: "Inception".to_string(),
            director: "Nolan".to_string(),
            year: "2010".to_string(),
            rating: "".to_string(),
            poster_url: "".to_string(),
            plot: "".to_string(),
            user_id: 1,
        }
    }

    #[test]
    fn test_merge_field_prefers_human_value() {
        assert_eq!(merge_field("Mine", Some("Theirs")), "Mine");
        assert_eq!(merge_field("  ", Some("Theirs")), "Theirs");
        assert_eq!(merge_field("", Some("N/A")), "");
        assert_eq!(merge_field("", None), "");
    }

    #[test]
    fn test_merge_update_field() {
        assert_eq!(
            merge_update_field(Some("Mine"), "Stored", Some("Theirs")),
            Some("Mine".to_string())
        );
        assert_eq!(merge_update_field(None, "Stored", Some("Theirs")), None);
        assert_eq!(
            merge_update_field(None, " ", Some("Theirs")),
            Some("Theirs".to_string())
        );
        assert_eq!(merge_update_field(None, "", Some("N/A")), None);
        assert_eq!(merge_update_field(None, "", None), None);
        assert_eq!(
            merge_update_field(Some(""), "Stored", Some("Theirs")),
            Some("Theirs".to_string())
        );
        assert_eq!(merge_update_field(Some(""), "Stored", None), Some(String::new()));
    }

    #[tokio::test]
    async fn test_enrich_new_movie_fills_blanks_and_drops_placeholder() {
        let lookup = FakeLookup::returning(inception());
        let form = MovieForm {
            title: "Inception".to_string(),
            rating: "10".to_string(),
            ..MovieForm::default()
        };

        let movie = enrich_new_movie(&lookup, &form).await;

        assert_eq!(movie.title, "Inception");
        assert_eq!(movie.director, "Christopher Nolan");
        assert_eq!(movie.year, "2010");
        assert_eq!(movie.rating, "10");
        assert_eq!(movie.poster_url, "");
        assert!(movie.plot.starts_with("A thief"));
    }

    #[tokio::test]
    async fn test_enrich_new_movie_uses_picked_candidate() {
        let lookup = FakeLookup::returning(inception());
        let form = MovieForm {
            imdb_id: Some("tt1375666".to_string()),
            ..MovieForm::default()
        };

        let movie = enrich_new_movie(&lookup, &form).await;

        assert_eq!(movie.title, "Inception");
        assert_eq!(lookup.calls(), 1);
    }

    #[tokio::test]
    async fn test_enrich_new_movie_skips_lookup_when_complete() {
        let lookup = FakeLookup::returning(inception());
        let form = MovieForm {
            title: "Primer".to_string(),
            director: "Shane Carruth".to_string(),
            year: "2004".to_string(),
            rating: "6.8".to_string(),
            poster_url: "https://example.com/primer.jpg".to_string(),
            plot: "Friends build a time machine.".to_string(),
            imdb_id: None,
        };

        let movie = enrich_new_movie(&lookup, &form).await;

        assert_eq!(movie.director, "Shane Carruth");
        assert_eq!(lookup.calls(), 0);
    }

    #[tokio::test]
    async fn test_enrich_new_movie_survives_lookup_failure() {
        let lookup = FakeLookup::failing();
        let form = MovieForm {
            title: "Obscure Film".to_string(),
            ..MovieForm::default()
        };

        let movie = enrich_new_movie(&lookup, &form).await;

        assert_eq!(movie, NewMovie::titled("Obscure Film"));
        assert_eq!(lookup.calls(), 1);
    }

    #[tokio::test]
    async fn test_enrich_update_without_autofill_keeps_absent_fields() {
        let lookup = FakeLookup::returning(inception());
        let form = MovieUpdateForm {
            rating: Some("9".to_string()),
            plot: Some("".to_string()),
            ..MovieUpdateForm::default()
        };

        let update = enrich_update(&lookup, &stored_movie(), &form).await;

        assert_eq!(
            update,
            MovieUpdate {
                rating: Some("9".to_string()),
                plot: Some(String::new()),
                ..MovieUpdate::default()
            }
        );
        assert_eq!(lookup.calls(), 0);
    }

    #[tokio::test]
    async fn test_enrich_update_with_autofill() {
        let lookup = FakeLookup::returning(inception());
        let form = MovieUpdateForm {
            director: Some("Someone Else".to_string()),
            autofill: true,
            ..MovieUpdateForm::default()
        };

        let update = enrich_update(&lookup, &stored_movie(), &form).await;

        assert_eq!(update.title, None);
        assert_eq!(update.director.as_deref(), Some("Someone Else"));
        assert_eq!(update.year, None);
        assert_eq!(update.rating.as_deref(), Some("8.8"));
        assert_eq!(update.poster_url, None);
        assert!(update.plot.is_some());
        assert_eq!(lookup.calls(), 2);
    }

    #[tokio::test]
    async fn test_enrich_update_autofill_keeps_stored_human_values() {
        let lookup = FakeLookup::returning(inception());
        let form = MovieUpdateForm {
            rating: Some("7".to_string()),
            autofill: true,
            ..MovieUpdateForm::default()
        };

        let update = enrich_update(&lookup, &stored_movie(), &form).await;

        // "Nolan" was typed earlier and survives the lookup's "Christopher Nolan"
        assert_eq!(update.director, None);
        assert_eq!(update.rating.as_deref(), Some("7"));
        assert!(update.plot.as_deref().is_some_and(|p| p.starts_with("A thief")));
    }

    #[tokio::test]
    async fn test_enrich_update_autofill_skips_lookup_when_complete() {
        let lookup = FakeLookup::returning(inception());
        let current = Movie {
            rating: "8".to_string(),
            poster_url: "https://example.com/inception.jpg".to_string(),
            plot: "Dreams within dreams.".to_string(),
            ..stored_movie()
        };
        let form = MovieUpdateForm {
            autofill: true,
            ..MovieUpdateForm::default()
        };

        let update = enrich_update(&lookup, &current, &form).await;

        assert!(update.is_empty());
        assert_eq!(lookup.calls(), 0);
    }
}
