//! SQLite transport: sqlx pool.

use std::str::FromStr;

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::{Row as _, TypeInfo as _, ValueRef as _};
use tracing::info;

use super::dsn::database_path;
use crate::config::ConnectionConfig;
use crate::core::traits::Connection;
use crate::core::value::{Row, SqlValue};
use crate::drivers::common::POOL_CONNECTION_TIMEOUT;
use crate::error::{DialectError, Result};

const MEMORY: &str = ":memory:";

/// Pooled SQLite connection.
pub struct SqliteConnection {
    pool: SqlitePool,
}

impl SqliteConnection {
    /// Open the database file (it must already exist) or an in-memory database.
    pub async fn connect(settings: &ConnectionConfig) -> Result<Self> {
        let path = database_path(&settings.data_source);
        if path.is_empty() {
            return Err(DialectError::missing_db_name(&settings.driver));
        }

        let (options, max_connections) = if path == MEMORY {
            // Every in-memory connection is its own database.
            (SqliteConnectOptions::from_str("sqlite::memory:")?, 1)
        } else {
            (
                SqliteConnectOptions::new().filename(path).read_only(false),
                settings.max_connections,
            )
        };

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(POOL_CONNECTION_TIMEOUT)
            .connect_with(options)
            .await
            .map_err(|e| DialectError::pool(e, "opening SQLite database"))?;

        info!("Opened SQLite database: {}", path);
        Ok(Self { pool })
    }
}

#[async_trait]
impl Connection for SqliteConnection {
    async fn query(&self, sql: &str, args: &[SqlValue]) -> Result<Vec<Row>> {
        let mut query = sqlx::query(sql);
        for arg in args {
            query = match arg {
                SqlValue::Null => query.bind(Option::<String>::None),
                SqlValue::Bool(v) => query.bind(*v),
                SqlValue::Int(v) => query.bind(*v),
                SqlValue::Float(v) => query.bind(*v),
                SqlValue::Text(v) => query.bind(v.clone()),
                SqlValue::Bytes(v) => query.bind(v.clone()),
            };
        }

        let rows: Vec<SqliteRow> = query.fetch_all(&self.pool).await?;
        rows.iter().map(convert_row).collect()
    }
}

fn convert_row(row: &SqliteRow) -> Result<Row> {
    let mut values = Vec::with_capacity(row.len());
    for idx in 0..row.len() {
        let raw = row.try_get_raw(idx)?;
        if raw.is_null() {
            values.push(SqlValue::Null);
            continue;
        }
        // Storage class of the value, not the declared column type.
        let storage = raw.type_info().name().to_string();
        let value = match storage.as_str() {
            "INTEGER" => SqlValue::Int(row.try_get_unchecked::<i64, _>(idx)?),
            "REAL" => SqlValue::Float(row.try_get_unchecked::<f64, _>(idx)?),
            "BLOB" => SqlValue::Bytes(row.try_get_unchecked::<Vec<u8>, _>(idx)?),
            _ => SqlValue::Text(row.try_get_unchecked::<String, _>(idx)?),
        };
        values.push(value);
    }
    Ok(Row::new(values))
}
