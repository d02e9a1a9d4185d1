//! Microsoft SQL Server driver.
//!
//! - [`MssqlDialect`]: DDL rendering and `sys.*` catalog reflection
//! - [`MssqlDriver`]: ADO / `sqlserver://` connection-string parser
//! - [`MssqlConnection`]: tiberius transport pooled with bb8

mod connection;
mod dialect;
mod dsn;
mod reserved;

pub use connection::{MssqlConnection, TiberiusConnectionManager};
pub use dialect::MssqlDialect;
pub use dsn::MssqlDriver;

use crate::core::traits::{Dialect, Driver};

/// Registry constructor for the connection-string parser.
pub fn new_driver() -> Box<dyn Driver> {
    Box::new(MssqlDriver)
}

/// Registry constructor for the dialect.
pub fn new_dialect() -> Box<dyn Dialect> {
    Box::new(MssqlDialect::new())
}
