//! Connection state shared by every dialect.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tracing::debug;

use super::traits::Connection;
use super::uri::Uri;
use super::value::{Row, SqlValue, Statement};
use crate::error::{DialectError, Result};

/// Tracing target for executed catalog statements.
pub const SQL_LOG_TARGET: &str = "schema_dialect::sql";

/// Parameters captured by [`Dialect::init`](super::traits::Dialect::init).
///
/// Dialects hold one of these and nothing else; they never cache catalog
/// results.
#[derive(Clone, Default)]
pub struct DialectBase {
    connection: Option<Arc<dyn Connection>>,
    uri: Option<Uri>,
    driver_name: String,
    data_source_name: String,
    params: HashMap<String, String>,
    show_sql: bool,
}

impl DialectBase {
    pub fn bind(
        &mut self,
        connection: Arc<dyn Connection>,
        uri: Uri,
        driver_name: &str,
        data_source_name: &str,
    ) -> Result<()> {
        if !connection.is_valid() {
            return Err(DialectError::InvalidConnection(format!(
                "{} connection is closed",
                driver_name
            )));
        }
        self.connection = Some(connection);
        self.uri = Some(uri);
        self.driver_name = driver_name.to_string();
        self.data_source_name = data_source_name.to_string();
        Ok(())
    }

    pub fn uri(&self) -> Option<&Uri> {
        self.uri.as_ref()
    }

    /// Database name from the URI, empty before init.
    pub fn db_name(&self) -> &str {
        self.uri.as_ref().map_or("", |u| u.db_name.as_str())
    }

    pub fn driver_name(&self) -> &str {
        &self.driver_name
    }

    pub fn data_source_name(&self) -> &str {
        &self.data_source_name
    }

    pub fn params(&self) -> &HashMap<String, String> {
        &self.params
    }

    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str).filter(|v| !v.is_empty())
    }

    pub fn set_params(&mut self, params: HashMap<String, String>) {
        self.params = params;
    }

    pub fn show_sql(&self) -> bool {
        self.show_sql
    }

    pub fn set_show_sql(&mut self, show: bool) {
        self.show_sql = show;
    }

    pub fn connection(&self) -> Result<&Arc<dyn Connection>> {
        self.connection.as_ref().ok_or_else(|| {
            DialectError::InvalidConnection("dialect used before init".to_string())
        })
    }

    /// Emit the statement at debug level when SQL tracing is on.
    pub fn log_sql(&self, sql: &str, args: &[SqlValue]) {
        if !self.show_sql {
            return;
        }
        if args.is_empty() {
            debug!(target: SQL_LOG_TARGET, "[SQL] {}", sql);
        } else {
            debug!(target: SQL_LOG_TARGET, "[SQL] {} {:?}", sql, args);
        }
    }

    pub async fn query(&self, stmt: &Statement) -> Result<Vec<Row>> {
        let connection = self.connection()?;
        self.log_sql(&stmt.sql, &stmt.args);
        connection.query(&stmt.sql, &stmt.args).await
    }

    /// Whether the statement returns at least one row.
    pub async fn has_records(&self, stmt: &Statement) -> Result<bool> {
        Ok(!self.query(stmt).await?.is_empty())
    }
}

impl fmt::Debug for DialectBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DialectBase")
            .field("connected", &self.connection.is_some())
            .field("uri", &self.uri)
            .field("driver_name", &self.driver_name)
            .field("params", &self.params)
            .field("show_sql", &self.show_sql)
            .finish()
    }
}
