//! HTTP server configuration

use config::{Config, ConfigError, Environment};
use serde::Deserialize;

const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:3001";

/// Server settings read from `MOVIEWEB_*` environment variables
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Address the HTTP listener binds to (`MOVIEWEB_BIND_ADDRESS`)
    pub bind_address: String,
}

impl ServerConfig {
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("bind_address", DEFAULT_BIND_ADDRESS)?
            .add_source(Environment::with_prefix("MOVIEWEB"))
            .build()?
            .try_deserialize()
    }
}
