use serde::{Deserialize, Serialize};

use crate::OmdbError;

/// Placeholder OMDb uses for fields it has no data for
pub const NOT_AVAILABLE: &str = "N/A";

/// Trim a raw OMDb field, mapping missing values and "N/A" to an empty string
pub fn normalize_field(value: Option<&str>) -> String {
    match value.map(str::trim) {
        Some(v) if !v.eq_ignore_ascii_case(NOT_AVAILABLE) => v.to_string(),
        _ => String::new(),
    }
}

/// Full record for one catalog entry, with every field normalized
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieDetails {
    pub imdb_id: String,
    pub title: String,
    pub director: String,
    pub year: String,
    pub rating: String,
    pub poster_url: String,
    pub plot: String,
}

/// Summary returned by the title search, used to pick a catalog entry
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchCandidate {
    pub imdb_id: String,
    pub title: String,
    pub year: String,
    pub poster_url: String,
}

/// `Response`/`Error` pair present on every OMDb payload.
#[derive(Debug, Deserialize)]
pub(crate) struct RawStatus {
    #[serde(rename = "Response")]
    response: Option<String>,
    #[serde(rename = "Error")]
    error: Option<String>,
}

impl RawStatus {
    pub(crate) fn check(&self) -> crate::Result<()> {
        match self.response.as_deref() {
            Some(flag) if flag.eq_ignore_ascii_case("false") => Err(OmdbError::NotFound(
                self.error
                    .clone()
                    .unwrap_or_else(|| "no matching title".to_string()),
            )),
            _ => Ok(()),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawDetail {
    #[serde(flatten)]
    pub(crate) status: RawStatus,
    #[serde(rename = "imdbID")]
    imdb_id: Option<String>,
    #[serde(rename = "Title")]
    title: Option<String>,
    #[serde(rename = "Director")]
    director: Option<String>,
    #[serde(rename = "Year")]
    year: Option<String>,
    #[serde(rename = "imdbRating")]
    rating: Option<String>,
    #[serde(rename = "Poster")]
    poster: Option<String>,
    #[serde(rename = "Plot")]
    plot: Option<String>,
}

impl From<RawDetail> for MovieDetails {
    fn from(raw: RawDetail) -> Self {
        Self {
            imdb_id: normalize_field(raw.imdb_id.as_deref()),
            title: normalize_field(raw.title.as_deref()),
            director: normalize_field(raw.director.as_deref()),
            year: normalize_field(raw.year.as_deref()),
            rating: normalize_field(raw.rating.as_deref()),
            poster_url: normalize_field(raw.poster.as_deref()),
            plot: normalize_field(raw.plot.as_deref()),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawSearch {
    #[serde(flatten)]
    pub(crate) status: RawStatus,
    #[serde(rename = "Search", default)]
    pub(crate) results: Vec<RawCandidate>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawCandidate {
    #[serde(rename = "imdbID")]
    imdb_id: Option<String>,
    #[serde(rename = "Title")]
    title: Option<String>,
    #[serde(rename = "Year")]
    year: Option<String>,
    #[serde(rename = "Poster")]
    poster: Option<String>,
}

impl From<RawCandidate> for SearchCandidate {
    fn from(raw: RawCandidate) -> Self {
        Self {
            imdb_id: normalize_field(raw.imdb_id.as_deref()),
            title: normalize_field(raw.title.as_deref()),
            year: normalize_field(raw.year.as_deref()),
            poster_url: normalize_field(raw.poster.as_deref()),
        }
    }
}
