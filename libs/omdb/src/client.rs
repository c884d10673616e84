use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::{
    OmdbConfig, OmdbError,
    models::{MovieDetails, RawDetail, RawSearch, SearchCandidate},
};

/// Client for the OMDb HTTP API
///
/// Every query is a GET against the configured endpoint with the API key in
/// the `apikey` parameter.
#[derive(Clone)]
pub struct OmdbClient {
    client: Client,
    config: OmdbConfig,
}

impl OmdbClient {
    /// Build a client, applying the configured timeout if any.
    pub fn new(config: OmdbConfig) -> crate::Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self::with_client(builder.build()?, config))
    }

    /// Create an OmdbClient with an existing reqwest Client.
    pub fn with_client(client: Client, config: OmdbConfig) -> Self {
        Self { client, config }
    }

    /// Search the catalog by title
    ///
    /// GET /?s={title}
    ///
    /// OMDb does the fuzzy matching. A search without hits yields an empty list.
    pub async fn search_by_title(&self, title: &str) -> crate::Result<Vec<SearchCandidate>> {
        let raw: RawSearch = self.get("s", title).await?;
        match raw.status.check() {
            Ok(()) => Ok(raw.results.into_iter().map(SearchCandidate::from).collect()),
            Err(OmdbError::NotFound(reason)) => {
                debug!("OMDb search for '{}' found nothing: {}", title, reason);
                Ok(Vec::new())
            }
            Err(e) => Err(e),
        }
    }

    /// Get full details for a catalog identifier
    ///
    /// GET /?i={imdb_id}
    pub async fn lookup_by_id(&self, imdb_id: &str) -> crate::Result<MovieDetails> {
        let raw: RawDetail = self.get("i", imdb_id).await?;
        raw.status.check()?;
        Ok(raw.into())
    }

    /// Get full details for the best single match of a title
    ///
    /// GET /?t={title}
    pub async fn lookup_by_title(&self, title: &str) -> crate::Result<MovieDetails> {
        let raw: RawDetail = self.get("t", title).await?;
        raw.status.check()?;
        Ok(raw.into())
    }

    async fn get<T: DeserializeOwned>(&self, param: &str, value: &str) -> crate::Result<T> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(OmdbError::MissingApiKey)?;
        let value = value.trim();
        if value.is_empty() {
            return Err(OmdbError::EmptyQuery);
        }

        debug!("OMDb query {}={}", param, value);
        let response = self
            .client
            .get(&self.config.base_url)
            .query(&[("apikey", api_key), (param, value)])
            .send()
            .await?;

        self.handle_response(response).await
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> crate::Result<T> {
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(OmdbError::Api {
                status_code: status.as_u16(),
                message: body,
            });
        }
        let deserializer = &mut serde_json::Deserializer::from_str(&body);
        serde_path_to_error::deserialize(deserializer).map_err(|e| OmdbError::Json {
            path: e.path().to_string(),
            source: e.into_inner(),
        })
    }
}
