//! Configuration validation.

use super::Config;
use crate::error::{DialectError, Result};

/// Validate the configuration.
pub fn validate(config: &Config) -> Result<()> {
    let connection = &config.connection;

    if connection.driver.trim().is_empty() {
        return Err(DialectError::Config("connection.driver is required".into()));
    }
    if connection.data_source.trim().is_empty() {
        return Err(DialectError::Config(
            "connection.data_source is required".into(),
        ));
    }
    if connection.max_connections == 0 {
        return Err(DialectError::Config(
            "connection.max_connections must be at least 1".into(),
        ));
    }

    Ok(())
}
