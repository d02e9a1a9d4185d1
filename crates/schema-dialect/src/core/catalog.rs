//! Dialect registry.
//!
//! The [`DialectRegistry`] maps driver names to a connection-string parser
//! and a dialect constructor, and database types to the dialect in use for
//! them. It is built explicitly and either passed around or installed once
//! as the process-wide registry with [`install`]; after that it is only read.
//!
//! # Design Rationale
//!
//! - **Explicit registration**: built by [`DialectRegistry::with_builtins`],
//!   never populated as a side effect of linking a module
//! - **First registration wins**: registering a known driver name is a no-op
//! - **Testable**: tests build private registries with mock drivers

use std::collections::HashMap;
use std::sync::OnceLock;

use tracing::debug;

use super::traits::{Dialect, Driver};
use super::uri::DbType;
use crate::error::{DialectError, Result};

/// Constructor for a connection-string parser.
pub type DriverFactory = fn() -> Box<dyn Driver>;

/// Constructor for a fresh, unbound dialect.
pub type DialectFactory = fn() -> Box<dyn Dialect>;

#[derive(Clone, Copy)]
struct DriverEntry {
    db_type: DbType,
    driver: DriverFactory,
}

/// Registry of drivers and dialects.
///
/// # Example
///
/// ```rust
/// use schema_dialect::{DbType, DialectRegistry};
///
/// let registry = DialectRegistry::with_builtins();
/// let driver = registry.query_driver("postgres").unwrap();
/// let uri = driver.parse("postgres", "postgres://app@localhost/shop").unwrap();
/// assert_eq!(uri.db_name, "shop");
///
/// let dialect = registry.query_dialect(DbType::Postgres).unwrap();
/// assert_eq!(dialect.quote("order"), "\"order\"");
/// ```
#[derive(Default, Clone)]
pub struct DialectRegistry {
    drivers: HashMap<String, DriverEntry>,
    dialects: HashMap<DbType, DialectFactory>,
}

static GLOBAL: OnceLock<DialectRegistry> = OnceLock::new();

impl DialectRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with every built-in product registered.
    pub fn with_builtins() -> Self {
        use crate::drivers::{mssql, mysql, oracle, postgres, sqlite};

        let mut registry = Self::new();
        let builtins: [(&str, DbType, DriverFactory, DialectFactory); 10] = [
            ("mssql", DbType::Mssql, mssql::new_driver, mssql::new_dialect),
            ("odbc", DbType::Mssql, mssql::new_driver, mssql::new_dialect),
            ("mysql", DbType::Mysql, mysql::new_driver, mysql::new_dialect),
            ("mymysql", DbType::Mysql, mysql::new_driver, mysql::new_dialect),
            ("postgres", DbType::Postgres, postgres::new_driver, postgres::new_dialect),
            ("pgx", DbType::Postgres, postgres::new_driver, postgres::new_dialect),
            ("sqlite3", DbType::Sqlite, sqlite::new_driver, sqlite::new_dialect),
            ("sqlite", DbType::Sqlite, sqlite::new_driver, sqlite::new_dialect),
            ("oci8", DbType::Oracle, oracle::new_driver, oracle::new_dialect),
            ("goracle", DbType::Oracle, oracle::new_driver, oracle::new_dialect),
        ];
        for (name, db_type, driver, dialect) in builtins {
            registry.register(name, db_type, driver, dialect);
        }
        registry
    }

    /// Register a driver and the dialect for its database type.
    ///
    /// Returns `false` and changes nothing when the driver name is already
    /// registered. Otherwise the dialect constructor becomes the one used for
    /// `db_type`.
    pub fn register(
        &mut self,
        driver_name: &str,
        db_type: DbType,
        driver: DriverFactory,
        dialect: DialectFactory,
    ) -> bool {
        if self.drivers.contains_key(driver_name) {
            debug!("driver {} already registered, skipping", driver_name);
            return false;
        }
        self.drivers
            .insert(driver_name.to_string(), DriverEntry { db_type, driver });
        self.dialects.insert(db_type, dialect);
        true
    }

    pub fn has_driver(&self, driver_name: &str) -> bool {
        self.drivers.contains_key(driver_name)
    }

    /// Connection-string parser for a driver name.
    pub fn query_driver(&self, driver_name: &str) -> Option<Box<dyn Driver>> {
        self.drivers.get(driver_name).map(|entry| (entry.driver)())
    }

    /// Database type a driver name connects to.
    pub fn driver_db_type(&self, driver_name: &str) -> Option<DbType> {
        self.drivers.get(driver_name).map(|entry| entry.db_type)
    }

    /// Fresh dialect for a database type.
    pub fn query_dialect(&self, db_type: DbType) -> Option<Box<dyn Dialect>> {
        self.dialects.get(&db_type).map(|factory| factory())
    }

    /// Like [`query_driver`](Self::query_driver), failing with `UnsupportedDriver`.
    pub fn require_driver(&self, driver_name: &str) -> Result<Box<dyn Driver>> {
        self.query_driver(driver_name)
            .ok_or_else(|| DialectError::UnsupportedDriver(driver_name.to_string()))
    }

    /// Like [`query_dialect`](Self::query_dialect), failing with `UnsupportedDialect`.
    pub fn require_dialect(&self, db_type: DbType) -> Result<Box<dyn Dialect>> {
        self.query_dialect(db_type)
            .ok_or_else(|| DialectError::UnsupportedDialect(db_type.to_string()))
    }

    /// Registered driver names, sorted.
    pub fn driver_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.drivers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

/// Install the process-wide registry.
///
/// The first installed registry wins; later calls return it unchanged.
pub fn install(registry: DialectRegistry) -> &'static DialectRegistry {
    GLOBAL.get_or_init(move || registry)
}

/// Install the built-in registry unless one is already installed.
pub fn init_global() -> &'static DialectRegistry {
    GLOBAL.get_or_init(DialectRegistry::with_builtins)
}

/// The process-wide registry, if [`install`] or [`init_global`] ran.
pub fn global() -> Option<&'static DialectRegistry> {
    GLOBAL.get()
}
