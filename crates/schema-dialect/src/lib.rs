//! # schema-dialect
//!
//! SQL dialect abstraction and schema reflection for SQL Server, MySQL,
//! PostgreSQL, SQLite and Oracle.
//!
//! This library provides:
//!
//! - **Type mapping** from a logical column vocabulary to each product's DDL types
//! - **DDL generation** for tables, indexes and columns with product quoting
//! - **Catalog reflection** of tables, columns and indexes back into metadata
//! - **Connection-string parsing** for every supported driver name
//! - **A registry** mapping driver names to parsers and dialects
//!
//! ## Example
//!
//! ```rust,no_run
//! use schema_dialect::{Config, DialectRegistry, Engine};
//!
//! #[tokio::main]
//! async fn main() -> schema_dialect::Result<()> {
//!     let config = Config::load("config.yaml")?;
//!     let registry = DialectRegistry::with_builtins();
//!     let engine = Engine::open(&registry, &config.connection).await?;
//!     for table in engine.db_metas().await? {
//!         println!("{} ({} columns)", table.name, table.column_count());
//!     }
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod core;
pub mod drivers;
pub mod engine;
pub mod error;

#[cfg(test)]
mod testing;

// Re-exports for convenient access
pub use config::{Config, ConnectionConfig};
pub use core::catalog::{global, init_global, install};
pub use core::{
    Column, Connection, DbType, Dialect, DialectRegistry, Driver, Index, IndexType, Row,
    SqlType, SqlValue, Statement, Table, Uri,
};
pub use drivers::SslMode;
pub use engine::Engine;
pub use error::{DialectError, Result};
