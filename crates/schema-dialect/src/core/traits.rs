//! Core traits: the connection seam, connection-string drivers and dialects.
//!
//! # Design Pattern
//!
//! [`Dialect`] is a **Strategy** with **Template Method** defaults: every
//! product supplies the primitive operations (type names, quoting, catalog
//! queries) and inherits the column, index and ALTER rendering built on top
//! of them, overriding only where its syntax differs.

use async_trait::async_trait;
use indexmap::IndexMap;
use std::collections::HashMap;
use std::sync::Arc;

use super::base::DialectBase;
use super::schema::{Column, Index, Table};
use super::uri::{DbType, Uri};
use super::value::{Row, SqlValue, Statement};
use crate::error::Result;

/// An open database handle able to run parameterized queries.
///
/// Transports (tiberius, tokio-postgres, sqlx) implement this; dialects
/// only ever talk to the database through it.
#[async_trait]
pub trait Connection: Send + Sync {
    /// Execute a query and collect every row.
    async fn query(&self, sql: &str, args: &[SqlValue]) -> Result<Vec<Row>>;

    /// Whether the handle can still be used.
    fn is_valid(&self) -> bool {
        true
    }
}

/// Parser for one family of connection strings.
pub trait Driver: Send + Sync {
    /// Extract connection metadata; fails when no database name is present.
    fn parse(&self, driver_name: &str, data_source_name: &str) -> Result<Uri>;
}

/// Product-specific SQL generation and catalog reflection.
#[async_trait]
pub trait Dialect: Send + Sync {
    /// Shared connection state.
    fn base(&self) -> &DialectBase;

    fn base_mut(&mut self) -> &mut DialectBase;

    fn db_type(&self) -> DbType;

    /// Bind the dialect to an open connection and its parsed URI.
    ///
    /// Calling it again rebinds; a closed connection is rejected.
    fn init(
        &mut self,
        connection: Arc<dyn Connection>,
        uri: Uri,
        driver_name: &str,
        data_source_name: &str,
    ) -> Result<()> {
        self.base_mut()
            .bind(connection, uri, driver_name, data_source_name)
    }

    fn uri(&self) -> Option<&Uri> {
        self.base().uri()
    }

    /// Extra per-dialect parameters, e.g. `schema` or `rowFormat`.
    fn set_params(&mut self, params: HashMap<String, String>) {
        self.base_mut().set_params(params);
    }

    /// Toggle SQL tracing of catalog statements.
    fn set_show_sql(&mut self, show: bool) {
        self.base_mut().set_show_sql(show);
    }

    // ===== Type mapping and identifiers =====

    /// Native DDL type fragment for a column.
    ///
    /// Normalizes the column in place: boolean defaults become product
    /// literals, fixed-width types lose their length, and variable-length
    /// binary types get a default length.
    fn sql_type(&self, column: &mut Column) -> String;

    /// Wrap an identifier in the product's quote characters.
    fn quote(&self, name: &str) -> String;

    /// Whether the identifier is in the product's reserved-word set.
    ///
    /// SQL Server matches the stored upper-case words exactly, so `select`
    /// is not reserved there. MySQL, PostgreSQL, SQLite and Oracle fold the
    /// identifier to upper case before the lookup.
    fn is_reserved(&self, name: &str) -> bool;

    // ===== Capabilities =====

    fn supports_insert_many(&self) -> bool;

    fn supports_engine(&self) -> bool;

    fn supports_charset(&self) -> bool;

    /// Whether `DROP INDEX` needs an `ON <table>` clause.
    fn index_on_table(&self) -> bool;

    /// Whether column definitions spell out `NULL` for nullable columns.
    fn show_create_null(&self) -> bool {
        true
    }

    fn auto_increment_clause(&self) -> &'static str;

    /// Bind placeholder for a 1-based argument position.
    fn param_placeholder(&self, index: usize) -> String;

    // ===== DDL =====

    fn drop_table_statement(&self, table_name: &str) -> String;

    /// `CREATE TABLE` for the table. `table_name` overrides the table's own name.
    fn create_table_statement(
        &self,
        table: &mut Table,
        table_name: Option<&str>,
        store_engine: Option<&str>,
        charset: Option<&str>,
    ) -> String;

    /// Row-locking form of a query, or the query unchanged.
    fn for_update_clause(&self, query: &str) -> String;

    fn index_exists_statement(&self, table_name: &str, index_name: &str) -> Statement;

    fn table_exists_statement(&self, table_name: &str) -> Statement;

    fn column_exists_statement(&self, table_name: &str, column_name: &str) -> Statement;

    /// Column definition with inline primary key and auto-increment.
    fn column_definition(&self, column: &mut Column) -> String {
        let mut parts = vec![self.quote(&column.name), self.sql_type(column)];
        if column.is_primary_key {
            parts.push("PRIMARY KEY".to_string());
            if column.is_auto_increment {
                parts.push(self.auto_increment_clause().to_string());
            }
        }
        push_default_and_null(self, column, &mut parts);
        join_parts(parts)
    }

    /// Column definition without key syntax, used for composite keys and ALTERs.
    fn column_definition_no_pk(&self, column: &mut Column) -> String {
        let mut parts = vec![self.quote(&column.name), self.sql_type(column)];
        push_default_and_null(self, column, &mut parts);
        join_parts(parts)
    }

    fn create_index_statement(&self, table_name: &str, index: &Index) -> String {
        let unique = if index.is_unique() { "UNIQUE " } else { "" };
        let columns = index
            .columns
            .iter()
            .map(|c| self.quote(c))
            .collect::<Vec<_>>()
            .join(",");
        format!(
            "CREATE {}INDEX {} ON {} ({})",
            unique,
            self.quote(&index.ddl_name(table_name)),
            self.quote(table_name),
            columns
        )
    }

    fn drop_index_statement(&self, table_name: &str, index: &Index) -> String {
        let name = self.quote(&index.ddl_name(table_name));
        if self.index_on_table() {
            format!("DROP INDEX {} ON {}", name, self.quote(table_name))
        } else {
            format!("DROP INDEX {}", name)
        }
    }

    fn add_column_statement(&self, table_name: &str, column: &mut Column) -> String {
        format!(
            "ALTER TABLE {} ADD {}",
            self.quote(table_name),
            self.column_definition(column)
        )
    }

    fn modify_column_statement(&self, table_name: &str, column: &mut Column) -> Result<String> {
        Ok(format!(
            "ALTER TABLE {} MODIFY COLUMN {}",
            self.quote(table_name),
            self.column_definition_no_pk(column)
        ))
    }

    // ===== Catalog =====

    async fn column_exists(&self, table_name: &str, column_name: &str) -> Result<bool> {
        let stmt = self.column_exists_statement(table_name, column_name);
        self.base().has_records(&stmt).await
    }

    /// User tables, names only.
    async fn list_tables(&self) -> Result<Vec<Table>>;

    /// Columns in ordinal order, keyed by name.
    async fn list_columns(&self, table_name: &str) -> Result<IndexMap<String, Column>>;

    /// Secondary indexes keyed by (possibly stripped) name.
    async fn list_indexes(&self, table_name: &str) -> Result<IndexMap<String, Index>>;
}

fn push_default_and_null<D: Dialect + ?Sized>(dialect: &D, column: &Column, parts: &mut Vec<String>) {
    if let Some(default) = column.default_expr() {
        parts.push(format!("DEFAULT {}", default));
    }
    if dialect.show_create_null() {
        parts.push(if column.nullable { "NULL" } else { "NOT NULL" }.to_string());
    }
}

fn join_parts(parts: Vec<String>) -> String {
    parts
        .into_iter()
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Parenthesized column list of a `CREATE TABLE`.
///
/// A sole primary key is rendered inline on its column; a composite key
/// becomes one trailing `PRIMARY KEY ( .. )` clause in key order.
pub(crate) fn create_table_body<D: Dialect + ?Sized>(
    dialect: &D,
    table: &mut Table,
    quote_key_columns: bool,
) -> String {
    let keys = table.primary_keys().to_vec();
    let mut definitions = Vec::with_capacity(table.column_count() + 1);

    for column in table.columns_mut() {
        if keys.len() == 1 && keys[0] == column.name {
            definitions.push(dialect.column_definition(column));
        } else {
            definitions.push(dialect.column_definition_no_pk(column));
        }
    }

    if keys.len() > 1 {
        let key_list = keys
            .iter()
            .map(|k| {
                if quote_key_columns {
                    dialect.quote(k)
                } else {
                    k.clone()
                }
            })
            .collect::<Vec<_>>()
            .join(",");
        definitions.push(format!("PRIMARY KEY ( {} )", key_list));
    }

    format!("({})", definitions.join(", "))
}

/// Query rows through the dialect's bound connection.
pub(crate) async fn fetch<D: Dialect + ?Sized>(dialect: &D, stmt: &Statement) -> Result<Vec<Row>> {
    dialect.base().query(stmt).await
}
