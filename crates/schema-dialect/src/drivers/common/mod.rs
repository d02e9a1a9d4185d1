//! Utilities shared across database drivers.
//!
//! - [`tls`]: TLS settings for PostgreSQL and SQL Server connections
//! - [`dsn`]: key=value connection-string splitting

pub mod dsn;
pub mod tls;

pub use tls::{SslMode, TlsBuilder};

use std::time::Duration;

/// Connection acquisition timeout from pool (30 seconds).
pub(crate) const POOL_CONNECTION_TIMEOUT: Duration = Duration::from_secs(30);

/// Strip backticks and spaces around a catalog name.
pub(crate) fn trim_name(name: &str) -> String {
    name.trim_matches(|c| c == '`' || c == ' ').to_string()
}

/// Render `(l)` or `(l,l2)` after a native type name when lengths are set.
pub(crate) fn with_lengths(native: &str, length: i32, length2: i32) -> String {
    if length2 > 0 {
        format!("{}({},{})", native, length, length2)
    } else if length > 0 {
        format!("{}({})", native, length)
    } else {
        native.to_string()
    }
}
