//! SQLite data sources: a file path, `file:` URI, or `sqlite://` URL.
//! Query parameters are dropped; the path itself is the database name.

use crate::core::traits::Driver;
use crate::core::uri::{DbType, Uri};
use crate::error::{DialectError, Result};

/// Database path of a SQLite data source, without scheme or parameters.
pub fn database_path(data_source_name: &str) -> &str {
    let source = data_source_name.trim();
    let source = source
        .strip_prefix("sqlite://")
        .or_else(|| source.strip_prefix("sqlite3://"))
        .or_else(|| source.strip_prefix("file:"))
        .unwrap_or(source);
    source.split_once('?').map_or(source, |(path, _)| path)
}

/// Connection-string parser for the `sqlite3` and `sqlite` drivers.
#[derive(Debug, Clone, Copy, Default)]
pub struct SqliteDriver;

impl Driver for SqliteDriver {
    fn parse(&self, driver_name: &str, data_source_name: &str) -> Result<Uri> {
        let path = database_path(data_source_name);
        if path.is_empty() {
            return Err(DialectError::missing_db_name(driver_name));
        }
        Ok(Uri::new(DbType::Sqlite, path))
    }
}
