//! OMDb client configuration

use std::{env, time::Duration};

/// Public OMDb endpoint
pub const DEFAULT_BASE_URL: &str = "http://www.omdbapi.com/";

/// Configuration for the OMDb client
#[derive(Debug, Clone)]
pub struct OmdbConfig {
    /// API key sent as the `apikey` query parameter
    pub api_key: Option<String>,
    /// Endpoint all queries are sent to
    pub base_url: String,
    /// Request timeout; `None` leaves it to the transport
    pub timeout: Option<Duration>,
}

impl OmdbConfig {
    /// Create a new OmdbConfig from environment variables
    ///
    /// # Environment Variables
    /// - `OMDB_API_KEY`: API key (unset or blank disables lookups)
    /// - `OMDB_BASE_URL`: Endpoint (default: "http://www.omdbapi.com/")
    /// - `OMDB_TIMEOUT_SECONDS`: Request timeout in seconds (default: none)
    pub fn from_env() -> Self {
        let api_key = env::var("OMDB_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty());

        let base_url = env::var("OMDB_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        let timeout = env::var("OMDB_TIMEOUT_SECONDS")
            .ok()
            .and_then(|s| s.parse().ok())
            .map(Duration::from_secs);

        Self {
            api_key,
            base_url,
            timeout,
        }
    }

    /// Configuration for a given key against the public endpoint
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_omdb_config_defaults() {
        unsafe {
            env::remove_var("OMDB_API_KEY");
            env::remove_var("OMDB_BASE_URL");
            env::remove_var("OMDB_TIMEOUT_SECONDS");
        }

        let config = OmdbConfig::from_env();
        assert_eq!(config.api_key, None);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout, None);
    }

    #[test]
    #[serial]
    fn test_omdb_config_from_env_with_custom_values() {
        unsafe {
            env::set_var("OMDB_API_KEY", "abc123");
            env::set_var("OMDB_BASE_URL", "http://localhost:9999/");
            env::set_var("OMDB_TIMEOUT_SECONDS", "15");
        }

        let config = OmdbConfig::from_env();
        assert_eq!(config.api_key.as_deref(), Some("abc123"));
        assert_eq!(config.base_url, "http://localhost:9999/");
        assert_eq!(config.timeout, Some(Duration::from_secs(15)));

        unsafe {
            env::set_var("OMDB_API_KEY", "   ");
        }
        assert_eq!(OmdbConfig::from_env().api_key, None);

        unsafe {
            env::remove_var("OMDB_API_KEY");
            env::remove_var("OMDB_BASE_URL");
            env::remove_var("OMDB_TIMEOUT_SECONDS");
        }
    }
}
