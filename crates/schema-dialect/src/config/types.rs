//! Configuration type definitions.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::drivers::common::SslMode;

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Database connection configuration.
    pub connection: ConnectionConfig,
}

/// Database connection configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionConfig {
    /// Registered driver name (e.g. `mssql`, `postgres`, `sqlite3`).
    pub driver: String,

    /// Driver-specific connection string or URL.
    pub data_source: String,

    /// Extra dialect parameters (`schema` for PostgreSQL, `rowFormat` for MySQL).
    #[serde(default)]
    pub params: HashMap<String, String>,

    /// TLS mode: disable, require, verify-ca, verify-full (default: disable).
    #[serde(default)]
    pub ssl_mode: SslMode,

    /// Maximum pooled connections (default: 4).
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Trace catalog statements at debug level.
    #[serde(default)]
    pub show_sql: bool,
}

impl ConnectionConfig {
    /// Connection settings with defaults for everything but driver and data source.
    pub fn new(driver: impl Into<String>, data_source: impl Into<String>) -> Self {
        Self {
            driver: driver.into(),
            data_source: data_source.into(),
            params: HashMap::new(),
            ssl_mode: SslMode::default(),
            max_connections: default_max_connections(),
            show_sql: false,
        }
    }
}

fn default_max_connections() -> u32 {
    4
}
