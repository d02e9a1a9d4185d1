//! Database driver implementations.
//!
//! Each product module provides the pieces the registry wires together:
//!
//! - a `Dialect` for DDL rendering and catalog reflection
//! - a `Driver` that parses the product's connection strings
//! - a transport implementing [`Connection`], where one is bundled
//!
//! | Module       | Transport                         | Feature   |
//! |--------------|-----------------------------------|-----------|
//! | [`mssql`]    | tiberius + bb8                    | always    |
//! | [`postgres`] | tokio-postgres + deadpool         | always    |
//! | [`mysql`]    | sqlx                              | `mysql`   |
//! | [`sqlite`]   | sqlx                              | `sqlite`  |
//! | [`oracle`]   | none, supply your own connection  |           |
//!
//! # Adding New Databases
//!
//! 1. Create a module under `drivers/` with `dialect`, `dsn` and `reserved`
//! 2. Implement `Dialect` and `Driver`, exposing `new_dialect` / `new_driver`
//! 3. Register the driver names in `DialectRegistry::with_builtins()`
//! 4. If a transport is bundled, gate it with a feature and dispatch in [`connect`]

pub mod common;
pub mod mssql;
pub mod mysql;
pub mod oracle;
pub mod postgres;
pub mod sqlite;

use std::sync::Arc;

pub use common::{SslMode, TlsBuilder};

pub use mssql::MssqlDialect;
pub use mysql::MysqlDialect;
pub use oracle::OracleDialect;
pub use postgres::PostgresDialect;
pub use sqlite::SqliteDialect;

use crate::config::ConnectionConfig;
use crate::core::traits::Connection;
use crate::core::uri::{DbType, Uri};
use crate::error::{DialectError, Result};

/// Open a pooled connection for the product named by `uri`.
pub async fn connect(uri: &Uri, settings: &ConnectionConfig) -> Result<Arc<dyn Connection>> {
    match uri.db_type {
        DbType::Mssql => Ok(Arc::new(mssql::MssqlConnection::connect(settings).await?)),
        DbType::Postgres => Ok(Arc::new(postgres::PostgresConnection::connect(settings).await?)),
        #[cfg(feature = "mysql")]
        DbType::Mysql => Ok(Arc::new(mysql::MysqlConnection::connect(settings).await?)),
        #[cfg(feature = "sqlite")]
        DbType::Sqlite => Ok(Arc::new(sqlite::SqliteConnection::connect(settings).await?)),
        other => Err(DialectError::UnsupportedDriver(format!(
            "{} (no bundled transport for {}; build with its feature or supply a connection)",
            settings.driver,
            other.display_name()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_connect_without_transport() {
        let settings = ConnectionConfig::new("oci8", "scott/tiger@XE");
        let uri = Uri::new(DbType::Oracle, "XE");
        match connect(&uri, &settings).await {
            Err(DialectError::UnsupportedDriver(message)) => {
                assert!(message.starts_with("oci8"));
                assert!(message.contains("Oracle"));
            }
            Err(other) => panic!("unexpected error: {}", other),
            Ok(_) => panic!("oracle has no bundled transport"),
        }
    }
}
