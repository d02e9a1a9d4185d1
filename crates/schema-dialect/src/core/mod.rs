//! Core abstractions for database-agnostic schema handling.
//!
//! - [`types`]: the logical column type vocabulary
//! - [`schema`]: table, column and index metadata
//! - [`uri`]: database product identifiers and parsed connection metadata
//! - [`value`]: query arguments and result rows
//! - [`traits`]: the connection seam, connection-string drivers and dialects
//! - [`base`]: connection state shared by every dialect
//! - [`catalog`]: the driver/dialect registry
//!
//! # Architecture
//!
//! The core module defines the contract that driver modules
//! (`drivers/mssql`, `drivers/postgres`, etc.) implement. Callers reach
//! product-specific behavior only through [`Dialect`]; nothing outside the
//! driver modules branches on the product.

pub mod base;
pub mod catalog;
pub mod schema;
pub mod traits;
pub mod types;
pub mod uri;
pub mod value;

pub use base::{DialectBase, SQL_LOG_TARGET};
pub use catalog::{DialectFactory, DialectRegistry, DriverFactory};
pub use schema::{strip_convention_prefix, Column, Index, IndexType, Table};
pub use traits::{Connection, Dialect, Driver};
pub use types::{SqlType, TypeCategory};
pub use uri::{DbType, Uri};
pub use value::{Row, SqlValue, Statement};
