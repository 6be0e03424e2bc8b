//! Configuration management for kairos-web
//!
//! Read from the environment; a `.env` file is loaded first by `main`.

use std::path::PathBuf;

use crate::pricing::{RuleTable, TableError};

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid KAIROS_PORT '{value}': {source}")]
    InvalidPort {
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },
}

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Interface to bind (KAIROS_HOST)
    pub host: String,

    /// Port to bind (KAIROS_PORT)
    pub port: u16,

    /// Rate card override (KAIROS_PRICING_TABLE); the embedded card is used when unset
    pub pricing_table: Option<PathBuf>,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            pricing_table: None,
        }
    }
}

impl Config {
    /// Build the configuration from process environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from any key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = match non_empty("KAIROS_PORT") {
            Some(value) => match value.trim().parse::<u16>() {
                Ok(port) => port,
                Err(source) => return Err(ConfigError::InvalidPort { value, source }),
            },
            None => default_port(),
        };

        Ok(Self {
            host: non_empty("KAIROS_HOST").unwrap_or_else(default_host),
            port,
            pricing_table: non_empty("KAIROS_PRICING_TABLE").map(PathBuf::from),
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Load the configured rate card
    pub fn load_rule_table(&self) -> Result<RuleTable, TableError> {
        match &self.pricing_table {
            Some(path) => {
                tracing::info!("Loading rate card from {}", path.display());
                RuleTable::from_path(path)
            }
            None => RuleTable::embedded(),
        }
    }
}
