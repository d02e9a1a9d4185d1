//! Database product identifiers and parsed connection metadata.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DialectError;

/// Supported database products.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DbType {
    #[serde(rename = "mssql")]
    Mssql,
    #[serde(rename = "mysql")]
    Mysql,
    #[serde(rename = "postgres")]
    Postgres,
    #[serde(rename = "sqlite3")]
    Sqlite,
    #[serde(rename = "oracle")]
    Oracle,
}

impl DbType {
    pub const ALL: [DbType; 5] = [
        DbType::Mssql,
        DbType::Mysql,
        DbType::Postgres,
        DbType::Sqlite,
        DbType::Oracle,
    ];

    /// Canonical identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            DbType::Mssql => "mssql",
            DbType::Mysql => "mysql",
            DbType::Postgres => "postgres",
            DbType::Sqlite => "sqlite3",
            DbType::Oracle => "oracle",
        }
    }

    /// Human-readable product name.
    pub fn display_name(&self) -> &'static str {
        match self {
            DbType::Mssql => "Microsoft SQL Server",
            DbType::Mysql => "MySQL",
            DbType::Postgres => "PostgreSQL",
            DbType::Sqlite => "SQLite",
            DbType::Oracle => "Oracle",
        }
    }
}

impl fmt::Display for DbType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DbType {
    type Err = DialectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mssql" | "sqlserver" | "sql_server" => Ok(DbType::Mssql),
            "mysql" | "mariadb" => Ok(DbType::Mysql),
            "postgres" | "postgresql" | "pg" => Ok(DbType::Postgres),
            "sqlite3" | "sqlite" => Ok(DbType::Sqlite),
            "oracle" => Ok(DbType::Oracle),
            other => Err(DialectError::UnsupportedDialect(other.to_string())),
        }
    }
}

/// Connection metadata extracted from a data source name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Uri {
    pub db_type: DbType,

    /// Logical database name (file path for SQLite, service for Oracle).
    pub db_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub charset: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,
}

impl Uri {
    pub fn new(db_type: DbType, db_name: impl Into<String>) -> Self {
        Self {
            db_type,
            db_name: db_name.into(),
            host: None,
            port: None,
            user: None,
            charset: None,
            schema: None,
        }
    }
}
