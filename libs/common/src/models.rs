//! User and movie entities and their creation/update payloads

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// User entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i64,
    pub name: String,
}

/// Movie entity
///
/// Optional attributes are stored as nullable columns and read back as empty
/// strings. Year and rating stay textual since the metadata service does not
/// guarantee numeric values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Movie {
    pub id: i64,
    pub title: String,
    pub director: String,
    pub year: String,
    pub rating: String,
    pub poster_url: String,
    pub plot: String,
    pub user_id: i64,
}

/// New movie creation payload
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewMovie {
    pub title: String,
    pub director: String,
    pub year: String,
    pub rating: String,
    pub poster_url: String,
    pub plot: String,
}

impl NewMovie {
    /// A movie with only a title; every other field is empty
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }
}

/// Movie update payload
///
/// `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieUpdate {
    pub title: Option<String>,
    pub director: Option<String>,
    pub year: Option<String>,
    pub rating: Option<String>,
    pub poster_url: Option<String>,
    pub plot: Option<String>,
}

impl MovieUpdate {
    /// True when no field would change
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.director.is_none()
            && self.year.is_none()
            && self.rating.is_none()
            && self.poster_url.is_none()
            && self.plot.is_none()
    }

    /// Apply the present fields to `movie`
    pub fn apply_to(&self, movie: &mut Movie) {
        if let Some(title) = &self.title {
            movie.title = title.clone();
        }
        if let Some(director) = &self.director {
            movie.director = director.clone();
        }
        if let Some(year) = &self.year {
            movie.year = year.clone();
        }
        if let Some(rating) = &self.rating {
            movie.rating = rating.clone();
        }
        if let Some(poster_url) = &self.poster_url {
            movie.poster_url = poster_url.clone();
        }
        if let Some(plot) = &self.plot {
            movie.plot = plot.clone();
        }
    }
}
