//! Configuration loading and management

use crate::core::ConfigError;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::time::Duration;

/// Storage backend selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageBackend {
    #[default]
    InMemory,
    Mysql,
}

/// HTTP listener settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSection {
    /// Socket address to listen on
    pub bind: String,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Read operation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuerySection {
    /// Deadline per read operation in milliseconds; 0 disables it
    pub timeout_ms: u64,
}

impl Default for QuerySection {
    fn default() -> Self {
        Self { timeout_ms: 5000 }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSection {
    pub backend: StorageBackend,

    /// Connection string, required for `mysql`
    pub dsn: Option<String>,
}

/// One-time import performed at startup
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeedSection {
    /// JSON array of transactions loaded when the store is empty
    pub fixture: Option<String>,
}

/// Complete configuration for the service
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub server: ServerSection,
    pub query: QuerySection,
    pub storage: StorageSection,
    pub seed: SeedSection,
}

impl ServiceConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Load configuration from a YAML string
    ///
    /// Malformed YAML is reported as [`ConfigError::ParseError`].
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml).map_err(|e| ConfigError::ParseError {
            message: e.to_string(),
        })?;
        Ok(config)
    }

    /// Create a default configuration: in-memory storage on port 8080
    pub fn default_config() -> Self {
        Self::default()
    }

    /// Apply `PORT` and `DB_DSN` from the process environment
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| std::env::var(key).ok());
    }

    /// Apply overrides from an arbitrary lookup (the environment in production)
    ///
    /// `PORT` replaces the port of `server.bind`, keeping its host. `DB_DSN`
    /// sets the storage dsn and selects the mysql backend.
    pub fn apply_overrides_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(port) = lookup("PORT").filter(|p| !p.trim().is_empty()) {
            let host = self
                .server
                .bind
                .rsplit_once(':')
                .map(|(host, _)| host)
                .unwrap_or("0.0.0.0");
            self.server.bind = format!("{}:{}", host, port.trim());
        }

        if let Some(dsn) = lookup("DB_DSN").filter(|d| !d.trim().is_empty()) {
            self.storage.backend = StorageBackend::Mysql;
            self.storage.dsn = Some(dsn);
        }
    }

    /// Check that the settings are usable together
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        self.bind_addr()?;

        if self.storage.backend == StorageBackend::Mysql
            && self.storage.dsn.as_deref().is_none_or(|d| d.trim().is_empty())
        {
            return Err(ConfigError::MissingField {
                field: "storage.dsn".to_string(),
            });
        }

        Ok(())
    }

    /// Parsed `server.bind`
    pub fn bind_addr(&self) -> std::result::Result<SocketAddr, ConfigError> {
        self.server
            .bind
            .parse()
            .map_err(|e: std::net::AddrParseError| ConfigError::InvalidValue {
                field: "server.bind".to_string(),
                message: e.to_string(),
            })
    }

    /// Per-operation deadline, or `None` when disabled
    pub fn query_timeout(&self) -> Option<Duration> {
        (self.query.timeout_ms > 0).then(|| Duration::from_millis(self.query.timeout_ms))
    }
}
