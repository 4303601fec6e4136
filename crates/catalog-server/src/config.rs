//! Server configuration
//!
//! Defaults overlaid by `CATALOG_*` environment variables.

use anyhow::{Context, Result};
use config::{Config, Environment};
use serde::Deserialize;
use std::collections::HashMap;
use std::net::SocketAddr;

/// Prefix of the environment variables read at startup
pub const ENV_PREFIX: &str = "CATALOG";

/// How request failures map onto HTTP status codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusPolicy {
    /// Missing id and wrong method share 405, not found is a 200, bad
    /// payloads are a 500. Kept for existing clients.
    #[default]
    Legacy,
    /// 400 for bad requests, 404 for unknown products
    Corrected,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub bind_address: String,
    pub status_policy: StatusPolicy,
    pub seed: bool,
    pub log_level: String,
}

impl ServerConfig {
    /// Load configuration from the process environment
    pub fn load() -> Result<Self> {
        Self::from_env(None)
    }

    /// Load configuration from `vars` instead of the process environment when given
    pub fn from_env(vars: Option<HashMap<String, String>>) -> Result<Self> {
        let config = Config::builder()
            .set_default("bind_address", "0.0.0.0:9000")?
            .set_default("status_policy", "legacy")?
            .set_default("seed", true)?
            .set_default("log_level", "info")?
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .try_parsing(true)
                    .source(vars),
            )
            .build()
            .context("Failed to read configuration")?;

        let config: ServerConfig = config
            .try_deserialize()
            .context("Invalid configuration")?;
        config.socket_addr()?;
        Ok(config)
    }

    pub fn socket_addr(&self) -> Result<SocketAddr> {
        self.bind_address
            .parse()
            .with_context(|| format!("Failed to parse bind address {}", self.bind_address))
    }
}
