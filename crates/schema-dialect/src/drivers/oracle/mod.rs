//! Oracle driver.
//!
//! - [`OracleDialect`]: DDL rendering and `USER_*` dictionary reflection
//! - [`OracleDriver`]: EZConnect / `oracle://` parser
//!
//! No transport ships with the crate; bind the dialect to a caller-supplied
//! [`Connection`](crate::core::traits::Connection).

mod dialect;
mod dsn;
mod reserved;

pub use dialect::OracleDialect;
pub use dsn::OracleDriver;

use crate::core::traits::{Dialect, Driver};

/// Registry constructor for the connection-string parser.
pub fn new_driver() -> Box<dyn Driver> {
    Box::new(OracleDriver)
}

/// Registry constructor for the dialect.
pub fn new_dialect() -> Box<dyn Dialect> {
    Box::new(OracleDialect::new())
}
