//! PostgreSQL driver.
//!
//! - [`PostgresDialect`]: DDL rendering and `pg_catalog` reflection
//! - [`PostgresDriver`]: libpq key/value and `postgres://` URL parser
//! - [`PostgresConnection`]: tokio-postgres transport pooled with deadpool

mod connection;
mod dialect;
mod dsn;
mod reserved;

pub use connection::PostgresConnection;
pub use dialect::PostgresDialect;
pub use dsn::PostgresDriver;

use crate::core::traits::{Dialect, Driver};

/// Registry constructor for the connection-string parser.
pub fn new_driver() -> Box<dyn Driver> {
    Box::new(PostgresDriver)
}

/// Registry constructor for the dialect.
pub fn new_dialect() -> Box<dyn Dialect> {
    Box::new(PostgresDialect::new())
}
