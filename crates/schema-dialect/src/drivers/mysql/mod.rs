//! MySQL/MariaDB driver.
//!
//! - [`MysqlDialect`]: DDL rendering and `INFORMATION_SCHEMA` reflection
//! - [`MysqlDriver`]: `mysql://` URL and Go `user@tcp(host)/db` parser
//! - `MysqlConnection`: sqlx transport, behind the `mysql` feature

#[cfg(feature = "mysql")]
mod connection;
mod dialect;
mod dsn;
mod reserved;

#[cfg(feature = "mysql")]
pub use connection::MysqlConnection;
pub use dialect::MysqlDialect;
pub use dsn::{MysqlDriver, MysqlDsn};

use crate::core::traits::{Dialect, Driver};

/// Registry constructor for the connection-string parser.
pub fn new_driver() -> Box<dyn Driver> {
    Box::new(MysqlDriver)
}

/// Registry constructor for the dialect.
pub fn new_dialect() -> Box<dyn Dialect> {
    Box::new(MysqlDialect::new())
}
