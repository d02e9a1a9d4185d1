//! Engine glue: resolves a driver name to a bound dialect and runs the
//! schema-level operations built on top of it.

use std::sync::Arc;

use tracing::{debug, info};

use crate::config::ConnectionConfig;
use crate::core::catalog::DialectRegistry;
use crate::core::schema::{Index, Table};
use crate::core::traits::{Connection, Dialect};
use crate::core::uri::Uri;
use crate::drivers;
use crate::error::{DialectError, Result};

/// A dialect bound to an open connection.
pub struct Engine {
    dialect: Box<dyn Dialect>,
    uri: Uri,
}

impl Engine {
    /// Parse the data source, open the bundled transport and bind the dialect.
    pub async fn open(registry: &DialectRegistry, settings: &ConnectionConfig) -> Result<Self> {
        let uri = parse_uri(registry, settings)?;
        let connection = drivers::connect(&uri, settings).await?;
        Self::bind(registry, settings, uri, connection)
    }

    /// Bind the dialect to a caller-supplied connection.
    pub fn with_connection(
        registry: &DialectRegistry,
        settings: &ConnectionConfig,
        connection: Arc<dyn Connection>,
    ) -> Result<Self> {
        let uri = parse_uri(registry, settings)?;
        Self::bind(registry, settings, uri, connection)
    }

    fn bind(
        registry: &DialectRegistry,
        settings: &ConnectionConfig,
        uri: Uri,
        connection: Arc<dyn Connection>,
    ) -> Result<Self> {
        let mut dialect = registry.require_dialect(uri.db_type)?;
        dialect.init(
            connection,
            uri.clone(),
            &settings.driver,
            &settings.data_source,
        )?;
        dialect.set_params(settings.params.clone());
        dialect.set_show_sql(settings.show_sql);

        info!(
            "Engine ready: driver={} database={} ({})",
            settings.driver,
            uri.db_name,
            uri.db_type.display_name()
        );
        Ok(Self { dialect, uri })
    }

    pub fn dialect(&self) -> &dyn Dialect {
        self.dialect.as_ref()
    }

    pub fn dialect_mut(&mut self) -> &mut dyn Dialect {
        self.dialect.as_mut()
    }

    pub fn uri(&self) -> &Uri {
        &self.uri
    }

    pub async fn is_table_exist(&self, table_name: &str) -> Result<bool> {
        let stmt = self.dialect.table_exists_statement(table_name);
        self.dialect.base().has_records(&stmt).await
    }

    /// Checks the index under the name it is created with.
    pub async fn is_index_exist(&self, table_name: &str, index: &Index) -> Result<bool> {
        let stmt = self
            .dialect
            .index_exists_statement(table_name, &index.ddl_name(table_name));
        self.dialect.base().has_records(&stmt).await
    }

    pub async fn is_column_exist(&self, table_name: &str, column_name: &str) -> Result<bool> {
        self.dialect.column_exists(table_name, column_name).await
    }

    /// Every table with its columns and indexes.
    ///
    /// Each column records the indexes it belongs to and its position in them.
    pub async fn db_metas(&self) -> Result<Vec<Table>> {
        let mut tables = self.dialect.list_tables().await?;
        for table in &mut tables {
            let columns = self.dialect.list_columns(&table.name).await?;
            table.set_columns(columns);

            let table_name = table.name.clone();
            let indexes = self.dialect.list_indexes(&table_name).await?;
            for (name, index) in indexes {
                for (position, column_name) in index.columns.iter().enumerate() {
                    let column = table.column_mut(column_name).ok_or_else(|| {
                        DialectError::Catalog(format!(
                            "index {} on {} references unknown column {}",
                            name, table_name, column_name
                        ))
                    })?;
                    column.indexes.insert(name.clone(), position);
                }
                table.add_index(index);
            }
            debug!(
                "{}: {} columns, {} indexes",
                table.name,
                table.column_count(),
                table.indexes.len()
            );
        }
        Ok(tables)
    }

    /// `CREATE TABLE` and `CREATE INDEX` script for the live schema.
    pub async fn dump_ddl(&self) -> Result<String> {
        let mut tables = self.db_metas().await?;
        Ok(self.render_ddl(&mut tables))
    }

    /// `CREATE TABLE` and `CREATE INDEX` script for the given tables.
    pub fn render_ddl(&self, tables: &mut [Table]) -> String {
        let mut script = Vec::with_capacity(tables.len());
        for table in tables.iter_mut() {
            let mut lines = vec![terminate(
                self.dialect.create_table_statement(table, None, None, None),
            )];
            for index in table.indexes.values() {
                lines.push(terminate(
                    self.dialect.create_index_statement(&table.name, index),
                ));
            }
            script.push(lines.join("\n"));
        }
        script.join("\n\n")
    }
}

fn parse_uri(registry: &DialectRegistry, settings: &ConnectionConfig) -> Result<Uri> {
    let driver = registry.require_driver(&settings.driver)?;
    driver.parse(&settings.driver, &settings.data_source)
}

fn terminate(statement: String) -> String {
    if statement.trim_end().ends_with(';') {
        statement
    } else {
        statement + ";"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::schema::{Column, IndexType};
    use crate::core::types::SqlType;
    use crate::testing::MockConnection;

    fn mssql_engine(connection: MockConnection) -> Engine {
        let registry = DialectRegistry::with_builtins();
        let settings = ConnectionConfig::new("mssql", "server=db;database=shop;user id=sa");
        Engine::with_connection(&registry, &settings, Arc::new(connection)).unwrap()
    }

    #[test]
    fn test_terminate() {
        assert_eq!(terminate("SELECT 1".into()), "SELECT 1;");
        assert_eq!(terminate("SELECT 1;".into()), "SELECT 1;");
        assert_eq!(terminate("SELECT 1; ".into()), "SELECT 1; ");
    }

    #[test]
    fn test_render_ddl_multiple_tables() {
        let engine = mssql_engine(MockConnection::new());
        let mut orders = Table::new("orders")
            .with_column(Column::new("id", SqlType::BigInt).primary_key().auto_increment());
        let mut index = Index::new("placed", IndexType::Regular);
        index.add_column("id");
        orders.add_index(index);
        let tags = Table::new("tags").with_column(Column::new("tag", SqlType::Varchar).not_null());

        let ddl = engine.render_ddl(&mut [orders, tags]);
        let statements: Vec<_> = ddl.split('\n').filter(|l| !l.is_empty()).collect();
        assert_eq!(statements.len(), 3);
        assert!(statements[0].ends_with(";"));
        assert!(statements[0].contains("CREATE TABLE \"orders\""));
        assert_eq!(
            statements[1],
            "CREATE INDEX \"IDX_orders_placed\" ON \"orders\" (\"id\");"
        );
        assert!(statements[2].contains("CREATE TABLE \"tags\""));
        assert!(!statements[2].ends_with(";;"));
        assert!(ddl.contains(";\n\n"));
    }

    #[tokio::test]
    async fn test_is_table_exist_propagates_errors() {
        let engine = mssql_engine(MockConnection::new().with_error("connection reset"));
        let err = engine.is_table_exist("orders").await.unwrap_err();
        assert!(matches!(err, DialectError::Catalog(_)));
    }

    #[tokio::test]
    async fn test_db_metas_empty() {
        let engine = mssql_engine(MockConnection::new().with_rows(Vec::new()));
        assert!(engine.db_metas().await.unwrap().is_empty());
    }
}
