use thiserror::Error;

/// Errors returned by the OMDb client
#[derive(Debug, Error)]
pub enum OmdbError {
    #[error("OMDb API key is not configured")]
    MissingApiKey,

    #[error("Lookup query is empty")]
    EmptyQuery,

    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("OMDb API error {status_code}: {message}")]
    Api { status_code: u16, message: String },

    #[error("Failed to decode OMDb response at '{path}': {source}")]
    Json {
        path: String,
        source: serde_json::Error,
    },

    #[error("OMDb returned no result: {0}")]
    NotFound(String),
}
