//! Error types for the dialect library.

use thiserror::Error;

/// Main error type for dialect, catalog and connection operations.
#[derive(Error, Debug)]
pub enum DialectError {
    /// Configuration error (invalid YAML, missing fields, etc.)
    #[error("Configuration error: {0}")]
    Config(String),

    /// The connection string did not name a database
    #[error("No database name found in {driver} connection string")]
    MissingDatabaseName { driver: String },

    /// Driver name not present in the registry
    #[error("Unsupported driver: {0}")]
    UnsupportedDriver(String),

    /// No dialect registered for a database type
    #[error("Unsupported dialect: {0}")]
    UnsupportedDialect(String),

    /// Operation the database product cannot express
    #[error("Unsupported by {dialect}: {operation}")]
    Unsupported {
        dialect: &'static str,
        operation: String,
    },

    /// Dialect bound to a closed handle, or used before init
    #[error("Invalid connection: {0}")]
    InvalidConnection(String),

    /// Catalog reported a native type the dialect cannot map back
    #[error("Unknown column type '{native_type}' for column {column} of table {table}")]
    UnknownColumnType {
        table: String,
        column: String,
        native_type: String,
    },

    /// Catalog output had an unexpected shape
    #[error("Catalog error: {0}")]
    Catalog(String),

    /// A row value could not be read as the requested type
    #[error("Cannot decode column {index} as {expected}: found {found}")]
    Decode {
        index: usize,
        expected: &'static str,
        found: String,
    },

    /// SQL Server transport error
    #[error("SQL Server error: {0}")]
    Mssql(#[from] tiberius::error::Error),

    /// PostgreSQL transport error
    #[error("PostgreSQL error: {0}")]
    Postgres(#[from] tokio_postgres::Error),

    /// MySQL / SQLite transport error
    #[cfg(any(feature = "mysql", feature = "sqlite"))]
    #[error("Database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    /// Connection pool error with context
    #[error("Pool error: {message}\n  Context: {context}")]
    Pool { message: String, context: String },

    /// IO error (file operations)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML serialization/deserialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Malformed connection URL
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

impl DialectError {
    /// Create a Pool error with context about where it occurred
    pub fn pool(message: impl ToString, context: impl Into<String>) -> Self {
        DialectError::Pool {
            message: message.to_string(),
            context: context.into(),
        }
    }

    /// Create an UnknownColumnType error
    pub fn unknown_type(
        table: impl Into<String>,
        column: impl Into<String>,
        native_type: impl Into<String>,
    ) -> Self {
        DialectError::UnknownColumnType {
            table: table.into(),
            column: column.into(),
            native_type: native_type.into(),
        }
    }

    /// Create a MissingDatabaseName error
    pub fn missing_db_name(driver: impl Into<String>) -> Self {
        DialectError::MissingDatabaseName {
            driver: driver.into(),
        }
    }

    /// Process exit code used by the CLI.
    pub fn exit_code(&self) -> u8 {
        match self {
            DialectError::Config(_)
            | DialectError::MissingDatabaseName { .. }
            | DialectError::UnsupportedDriver(_)
            | DialectError::UnsupportedDialect(_)
            | DialectError::Unsupported { .. }
            | DialectError::Yaml(_)
            | DialectError::Url(_) => 1,
            DialectError::UnknownColumnType { .. } => 4,
            DialectError::Io(_) => 7,
            _ => 3,
        }
    }

    /// Format error with full details including error chain
    pub fn format_detailed(&self) -> String {
        let mut output = format!("Error: {}\n", self);

        let mut source = std::error::Error::source(self);
        let mut depth = 1;
        while let Some(err) = source {
            output.push_str(&format!("\nCaused by:\n  {}: {}", depth, err));
            source = err.source();
            depth += 1;
        }

        output
    }
}

/// Result type alias for dialect operations.
pub type Result<T> = std::result::Result<T, DialectError>;
