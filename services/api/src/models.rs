//! API models for request and response payloads

use common::models::{Movie, User};
use omdb::SearchCandidate;
use serde::{Deserialize, Serialize};

/// Request for user creation
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub name: String,
}

/// A user together with their movie list
#[derive(Debug, Serialize)]
pub struct UserMoviesResponse {
    pub user: User,
    pub movies: Vec<Movie>,
}

/// Movie fields as entered by a person when adding a movie
///
/// Blank fields are filled from the metadata service. `imdb_id` is set when
/// the person picked a candidate from a search.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MovieForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub director: String,
    #[serde(default)]
    pub year: String,
    #[serde(default)]
    pub rating: String,
    #[serde(default)]
    pub poster_url: String,
    #[serde(default)]
    pub plot: String,
    pub imdb_id: Option<String>,
}

/// Movie fields sent when editing a movie
///
/// Absent fields stay as stored. With `autofill`, fields that are blank once
/// the stored values are taken into account are filled from the metadata
/// service where it has a value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MovieUpdateForm {
    pub title: Option<String>,
    pub director: Option<String>,
    pub year: Option<String>,
    pub rating: Option<String>,
    pub poster_url: Option<String>,
    pub plot: Option<String>,
    pub imdb_id: Option<String>,
    #[serde(default)]
    pub autofill: bool,
}

/// Query parameters for the candidate search
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub title: String,
}

/// Candidates for a title search
#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub candidates: Vec<SearchCandidate>,
}
