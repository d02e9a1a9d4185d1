//! SQLite driver.
//!
//! - [`SqliteDialect`]: DDL rendering and `sqlite_master` reflection
//! - [`SqliteDriver`]: file path / `file:` URI parser
//! - `SqliteConnection`: sqlx transport, behind the `sqlite` feature

#[cfg(feature = "sqlite")]
mod connection;
mod dialect;
mod dsn;
mod reserved;

#[cfg(feature = "sqlite")]
pub use connection::SqliteConnection;
pub use dialect::SqliteDialect;
pub use dsn::{database_path, SqliteDriver};

use crate::core::traits::{Dialect, Driver};

/// Registry constructor for the connection-string parser.
pub fn new_driver() -> Box<dyn Driver> {
    Box::new(SqliteDriver)
}

/// Registry constructor for the dialect.
pub fn new_dialect() -> Box<dyn Dialect> {
    Box::new(SqliteDialect::new())
}
