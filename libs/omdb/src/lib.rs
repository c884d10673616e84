//! Client for the OMDb movie-information service
//!
//! Provides title search, lookup by catalog identifier and lookup by title.
//! Responses are normalized so that missing data and the service's "N/A"
//! placeholder both come back as empty strings.

mod client;
mod config;
mod error;
mod lookup;
pub mod models;

pub use client::OmdbClient;
pub use config::{DEFAULT_BASE_URL, OmdbConfig};
pub use error::OmdbError;
pub use lookup::MovieLookup;
pub use models::{MovieDetails, SearchCandidate, normalize_field};

pub type Result<T> = std::result::Result<T, OmdbError>;
