//! MySQL transport: sqlx pool.

use async_trait::async_trait;
use sqlx::mysql::{MySqlConnectOptions, MySqlPool, MySqlPoolOptions, MySqlRow, MySqlSslMode};
use sqlx::{Column as _, Row as _, TypeInfo as _, ValueRef as _};
use tracing::info;

use super::dsn::MysqlDsn;
use crate::config::ConnectionConfig;
use crate::core::traits::Connection;
use crate::core::value::{Row, SqlValue};
use crate::drivers::common::{SslMode, POOL_CONNECTION_TIMEOUT};
use crate::error::{DialectError, Result};

const DEFAULT_PORT: u16 = 3306;

/// Pooled MySQL connection.
pub struct MysqlConnection {
    pool: MySqlPool,
}

impl MysqlConnection {
    /// Open a pool and run a probe query to verify the settings.
    pub async fn connect(settings: &ConnectionConfig) -> Result<Self> {
        let dsn = MysqlDsn::parse(&settings.driver, &settings.data_source)?;
        let host = dsn.host.clone().unwrap_or_else(|| "localhost".to_string());
        let port = dsn.port.unwrap_or(DEFAULT_PORT);

        let mut options = MySqlConnectOptions::new()
            .host(&host)
            .port(port)
            .database(&dsn.db_name)
            .ssl_mode(ssl_mode(settings.ssl_mode));
        if let Some(user) = &dsn.user {
            options = options.username(user);
        }
        if let Some(password) = &dsn.password {
            options = options.password(password);
        }
        if let Some(charset) = &dsn.charset {
            options = options.charset(charset);
        }

        let pool = MySqlPoolOptions::new()
            .max_connections(settings.max_connections)
            .acquire_timeout(POOL_CONNECTION_TIMEOUT)
            .connect_with(options)
            .await
            .map_err(|e| DialectError::pool(e, "creating MySQL connection pool"))?;

        sqlx::query("SELECT 1")
            .fetch_one(&pool)
            .await
            .map_err(|e| DialectError::pool(e, "testing MySQL connection"))?;

        info!("Connected to MySQL: {}:{}/{}", host, port, dsn.db_name);
        Ok(Self { pool })
    }
}

fn ssl_mode(mode: SslMode) -> MySqlSslMode {
    match mode {
        SslMode::Disable => MySqlSslMode::Disabled,
        SslMode::Require => MySqlSslMode::Required,
        SslMode::VerifyCa => MySqlSslMode::VerifyCa,
        SslMode::VerifyFull => MySqlSslMode::VerifyIdentity,
    }
}

#[async_trait]
impl Connection for MysqlConnection {
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

        let rows: Vec<MySqlRow> = query.fetch_all(&self.pool).await?;
        rows.iter().map(convert_row).collect()
    }
}

fn convert_row(row: &MySqlRow) -> Result<Row> {
    let mut values = Vec::with_capacity(row.len());
    for (idx, column) in row.columns().iter().enumerate() {
        if row.try_get_raw(idx)?.is_null() {
            values.push(SqlValue::Null);
            continue;
        }
        let value = match column.type_info().name() {
            "BOOLEAN" => SqlValue::Bool(row.try_get(idx)?),
            "TINYINT" | "SMALLINT" | "MEDIUMINT" | "INT" | "BIGINT" => SqlValue::Int(row.try_get(idx)?),
            "TINYINT UNSIGNED" | "SMALLINT UNSIGNED" | "MEDIUMINT UNSIGNED" | "INT UNSIGNED"
            | "BIGINT UNSIGNED" => {
                let v: u64 = row.try_get(idx)?;
                i64::try_from(v)
                    .map(SqlValue::Int)
                    .unwrap_or_else(|_| SqlValue::Text(v.to_string()))
            }
            "FLOAT" | "DOUBLE" => SqlValue::Float(row.try_get(idx)?),
            "BINARY" | "VARBINARY" | "TINYBLOB" | "BLOB" | "MEDIUMBLOB" | "LONGBLOB" => {
                SqlValue::Bytes(row.try_get(idx)?)
            }
            _ => SqlValue::Text(row.try_get_unchecked::<String, _>(idx)?),
        };
        values.push(value);
    }
    Ok(Row::new(values))
}
