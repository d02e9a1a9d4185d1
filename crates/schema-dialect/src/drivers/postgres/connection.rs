//! PostgreSQL transport: tokio-postgres clients pooled with deadpool.

use std::str::FromStr;

use async_trait::async_trait;
use deadpool_postgres::{Manager, ManagerConfig, Pool, RecyclingMethod};
use tokio_postgres::types::{ToSql, Type};
use tokio_postgres::NoTls;
use tracing::{info, warn};

use crate::config::ConnectionConfig;
use crate::core::traits::Connection;
use crate::core::value::{Row, SqlValue};
use crate::drivers::common::TlsBuilder;
use crate::error::{DialectError, Result};

/// Pooled PostgreSQL connection.
pub struct PostgresConnection {
    pool: Pool,
}

impl PostgresConnection {
    /// Open a pool and run a probe query to verify the settings.
    pub async fn connect(settings: &ConnectionConfig) -> Result<Self> {
        let pg_config = tokio_postgres::Config::from_str(settings.data_source.trim())?;
        let mgr_config = ManagerConfig {
            recycling_method: RecyclingMethod::Fast,
        };

        let mgr = match TlsBuilder::new(settings.ssl_mode).build()? {
            Some(tls) => Manager::from_config(pg_config, tls, mgr_config),
            None => {
                warn!(
                    "PostgreSQL TLS is disabled. Catalog traffic is unencrypted; \
                     set ssl_mode to require or verify-full for remote servers."
                );
                Manager::from_config(pg_config, NoTls, mgr_config)
            }
        };

        let pool = Pool::builder(mgr)
            .max_size(settings.max_connections as usize)
            .build()
            .map_err(|e| DialectError::pool(e, "creating PostgreSQL connection pool"))?;

        {
            let client = pool
                .get()
                .await
                .map_err(|e| DialectError::pool(e, "testing PostgreSQL connection"))?;
            client.simple_query("SELECT 1").await?;
        }

        info!(
            "Connected to PostgreSQL (pool_size={}, ssl_mode={})",
            settings.max_connections, settings.ssl_mode
        );
        Ok(Self { pool })
    }
}

#[async_trait]
impl Connection for PostgresConnection {
    async fn query(&self, sql: &str, args: &[SqlValue]) -> Result<Vec<Row>> {
        let client = self
            .pool
            .get()
            .await
            .map_err(|e| DialectError::pool(e, "getting PostgreSQL connection from pool"))?;

        let params: Vec<Box<dyn ToSql + Sync + Send>> = args.iter().map(to_param).collect();
        let refs: Vec<&(dyn ToSql + Sync)> = params
            .iter()
            .map(|p| p.as_ref() as &(dyn ToSql + Sync))
            .collect();

        let rows = client.query(sql, &refs).await?;
        rows.iter().map(convert_row).collect()
    }
}

fn to_param(value: &SqlValue) -> Box<dyn ToSql + Sync + Send> {
    match value {
        SqlValue::Null => Box::new(Option::<String>::None),
        SqlValue::Bool(v) => Box::new(*v),
        SqlValue::Int(v) => Box::new(*v),
        SqlValue::Float(v) => Box::new(*v),
        SqlValue::Text(v) => Box::new(v.clone()),
        SqlValue::Bytes(v) => Box::new(v.clone()),
    }
}

fn convert_row(row: &tokio_postgres::Row) -> Result<Row> {
    let mut values = Vec::with_capacity(row.len());
    for (idx, column) in row.columns().iter().enumerate() {
        let ty = column.type_();
        let value = if *ty == Type::BOOL {
            row.try_get::<_, Option<bool>>(idx)?.map(SqlValue::Bool)
        } else if *ty == Type::INT2 {
            row.try_get::<_, Option<i16>>(idx)?.map(|v| SqlValue::Int(v.into()))
        } else if *ty == Type::INT4 {
            row.try_get::<_, Option<i32>>(idx)?.map(|v| SqlValue::Int(v.into()))
        } else if *ty == Type::INT8 {
            row.try_get::<_, Option<i64>>(idx)?.map(SqlValue::Int)
        } else if *ty == Type::OID {
            row.try_get::<_, Option<u32>>(idx)?.map(|v| SqlValue::Int(v.into()))
        } else if *ty == Type::FLOAT4 {
            row.try_get::<_, Option<f32>>(idx)?.map(|v| SqlValue::Float(v.into()))
        } else if *ty == Type::FLOAT8 {
            row.try_get::<_, Option<f64>>(idx)?.map(SqlValue::Float)
        } else if *ty == Type::BYTEA {
            row.try_get::<_, Option<Vec<u8>>>(idx)?.map(SqlValue::Bytes)
        } else {
            // Catalog queries cast everything else to text.
            row.try_get::<_, Option<String>>(idx)?.map(SqlValue::Text)
        };
        values.push(value.unwrap_or(SqlValue::Null));
    }
    Ok(Row::new(values))
}
