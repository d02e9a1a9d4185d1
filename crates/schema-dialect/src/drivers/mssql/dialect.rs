//! MSSQL SQL dialect.
//!
//! Quotes identifiers with double quotes, renders auto-increment as
//! `IDENTITY`, and reflects schemas from the `sys.*` catalog views.

use async_trait::async_trait;
use indexmap::IndexMap;

use super::reserved::RESERVED_WORDS;
use crate::core::base::DialectBase;
use crate::core::schema::{Column, Index, IndexType, Table};
use crate::core::traits::{create_table_body, fetch, Dialect};
use crate::core::types::SqlType;
use crate::core::uri::DbType;
use crate::core::value::{Row, SqlValue, Statement};
use crate::drivers::common::{trim_name, with_lengths};
use crate::error::{DialectError, Result};

const LIST_TABLES_SQL: &str = "SELECT name FROM sysobjects WHERE xtype = 'U' ORDER BY name";

const LIST_COLUMNS_SQL: &str = r#"SELECT a.name AS name, b.name AS ctype, a.max_length, a.precision, a.scale,
       a.is_nullable AS nullable,
       d.definition AS vdefault,
       CASE WHEN EXISTS (
           SELECT 1 FROM sys.index_columns ic
           INNER JOIN sys.indexes i ON ic.object_id = i.object_id AND ic.index_id = i.index_id
           WHERE ic.object_id = a.object_id AND ic.column_id = a.column_id AND i.is_primary_key = 1
       ) THEN 1 ELSE 0 END AS is_primary_key,
       a.is_identity AS is_identity
FROM sys.columns a
LEFT JOIN sys.types b ON a.user_type_id = b.user_type_id
LEFT JOIN sys.default_constraints d ON a.default_object_id = d.object_id
WHERE a.object_id = OBJECT_ID(@P1)
ORDER BY a.column_id"#;

const LIST_INDEXES_SQL: &str = r#"SELECT
IXS.NAME                    AS  [INDEX_NAME],
C.NAME                      AS  [COLUMN_NAME],
IXS.is_unique               AS  [IS_UNIQUE]
FROM SYS.INDEXES IXS
INNER JOIN SYS.INDEX_COLUMNS IXCS
ON IXS.OBJECT_ID = IXCS.OBJECT_ID AND IXS.INDEX_ID = IXCS.INDEX_ID
INNER JOIN SYS.COLUMNS C ON IXS.OBJECT_ID = C.OBJECT_ID
AND IXCS.COLUMN_ID = C.COLUMN_ID
WHERE IXS.TYPE_DESC = 'NONCLUSTERED' AND IXCS.is_included_column = 0
AND OBJECT_NAME(IXS.OBJECT_ID) = @P1
ORDER BY IXS.INDEX_ID, IXCS.KEY_ORDINAL"#;

/// Microsoft SQL Server dialect implementation.
#[derive(Debug, Clone, Default)]
pub struct MssqlDialect {
    base: DialectBase,
}

impl MssqlDialect {
    /// Create a new, unbound MSSQL dialect.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Dialect for MssqlDialect {
    fn base(&self) -> &DialectBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut DialectBase {
        &mut self.base
    }

    fn db_type(&self) -> DbType {
        DbType::Mssql
    }

    fn sql_type(&self, column: &mut Column) -> String {
        let native = match column.sql_type {
            SqlType::Bool | SqlType::Boolean => {
                column.normalize_bool_default("1", "0");
                "BIT"
            }
            SqlType::Serial => {
                column.mark_serial();
                "INT"
            }
            SqlType::BigSerial => {
                column.mark_serial();
                "BIGINT"
            }
            SqlType::Bytea
            | SqlType::Blob
            | SqlType::Binary
            | SqlType::TinyBlob
            | SqlType::MediumBlob
            | SqlType::LongBlob => {
                if column.length == 0 {
                    column.length = 50;
                }
                "VARBINARY"
            }
            SqlType::TimeStamp => "DATETIME",
            SqlType::TimeStampz => {
                column.length = 7;
                "DATETIMEOFFSET"
            }
            SqlType::MediumInt => "INT",
            SqlType::Text
            | SqlType::TinyText
            | SqlType::MediumText
            | SqlType::LongText
            | SqlType::Clob
            | SqlType::Json
            | SqlType::Jsonb => return "VARCHAR(MAX)".to_string(),
            SqlType::Double => "REAL",
            SqlType::Uuid => {
                column.length = 40;
                "VARCHAR"
            }
            SqlType::Enum | SqlType::Set => {
                if column.length == 0 {
                    column.length = 255;
                }
                "VARCHAR"
            }
            SqlType::TinyInt => {
                column.length = 0;
                "TINYINT"
            }
            SqlType::BigInt => {
                column.length = 0;
                "BIGINT"
            }
            other => other.name(),
        };

        if native == "INT" {
            return native.to_string();
        }
        with_lengths(native, column.length, column.length2)
    }

    fn quote(&self, name: &str) -> String {
        format!("\"{}\"", name)
    }

    fn is_reserved(&self, name: &str) -> bool {
        RESERVED_WORDS.contains(name)
    }

    fn supports_insert_many(&self) -> bool {
        true
    }

    fn supports_engine(&self) -> bool {
        false
    }

    fn supports_charset(&self) -> bool {
        false
    }

    fn index_on_table(&self) -> bool {
        true
    }

    fn auto_increment_clause(&self) -> &'static str {
        "IDENTITY"
    }

    fn param_placeholder(&self, index: usize) -> String {
        format!("@P{}", index)
    }

    fn drop_table_statement(&self, table_name: &str) -> String {
        format!(
            "IF EXISTS (SELECT * FROM sysobjects WHERE id = object_id(N'{}') and \
             OBJECTPROPERTY(id, N'IsUserTable') = 1) DROP TABLE {}",
            escape_literal(table_name),
            self.quote(table_name)
        )
    }

    fn create_table_statement(
        &self,
        table: &mut Table,
        table_name: Option<&str>,
        _store_engine: Option<&str>,
        _charset: Option<&str>,
    ) -> String {
        let name = table_name
            .filter(|n| !n.is_empty())
            .unwrap_or(&table.name)
            .to_string();
        format!(
            "IF NOT EXISTS (SELECT [name] FROM sys.tables WHERE [name] = '{}' ) CREATE TABLE {} {};",
            escape_literal(&name),
            self.quote(&name),
            create_table_body(self, table, false)
        )
    }

    fn for_update_clause(&self, query: &str) -> String {
        query.to_string()
    }

    fn index_exists_statement(&self, table_name: &str, index_name: &str) -> Statement {
        Statement::new(
            "SELECT name FROM sys.indexes WHERE object_id = OBJECT_ID(@P1) AND name = @P2",
            vec![table_name.into(), index_name.into()],
        )
    }

    fn table_exists_statement(&self, table_name: &str) -> Statement {
        Statement::new(
            "SELECT * FROM sysobjects WHERE id = OBJECT_ID(@P1) AND OBJECTPROPERTY(id, N'IsUserTable') = 1",
            vec![table_name.into()],
        )
    }

    fn column_exists_statement(&self, table_name: &str, column_name: &str) -> Statement {
        Statement::new(
            r#"SELECT "COLUMN_NAME" FROM "INFORMATION_SCHEMA"."COLUMNS" WHERE "TABLE_NAME" = @P1 AND "COLUMN_NAME" = @P2"#,
            vec![table_name.into(), column_name.into()],
        )
    }

    /// SQL Server has no `MODIFY`; defaults live in separate constraints.
    fn modify_column_statement(&self, table_name: &str, column: &mut Column) -> Result<String> {
        let native = self.sql_type(column);
        let null = if column.nullable { "NULL" } else { "NOT NULL" };
        Ok(format!(
            "ALTER TABLE {} ALTER COLUMN {} {} {}",
            self.quote(table_name),
            self.quote(&column.name),
            native,
            null
        ))
    }

    async fn list_tables(&self) -> Result<Vec<Table>> {
        let rows = fetch(self, &Statement::new(LIST_TABLES_SQL, vec![])).await?;
        rows.iter()
            .map(|row| Ok(Table::new(trim_name(&row.get_string(0)?))))
            .collect()
    }

    async fn list_columns(&self, table_name: &str) -> Result<IndexMap<String, Column>> {
        let stmt = Statement::new(LIST_COLUMNS_SQL, vec![SqlValue::from(table_name)]);
        let rows = fetch(self, &stmt).await?;

        let mut columns = IndexMap::with_capacity(rows.len());
        for row in &rows {
            let column = column_from_row(table_name, row)?;
            columns.insert(column.name.clone(), column);
        }
        Ok(columns)
    }

    async fn list_indexes(&self, table_name: &str) -> Result<IndexMap<String, Index>> {
        let stmt = Statement::new(LIST_INDEXES_SQL, vec![SqlValue::from(table_name)]);
        let rows = fetch(self, &stmt).await?;

        let mut indexes: IndexMap<String, Index> = IndexMap::new();
        for row in &rows {
            let index_name = row.get_string(0)?;
            let column_name = trim_name(&row.get_string(1)?);
            let index_type = if row.get_bool(2)? {
                IndexType::Unique
            } else {
                IndexType::Regular
            };

            let index = Index::from_catalog_name(table_name, &index_name, index_type);
            indexes
                .entry(index.name.clone())
                .or_insert(index)
                .add_column(column_name);
        }
        Ok(indexes)
    }
}

fn column_from_row(table_name: &str, row: &Row) -> Result<Column> {
    let name = trim_name(&row.get_string(0)?);
    let native = row.get_string_or_empty(1)?.to_uppercase();
    let max_length = row.get_i32_or_zero(2)?;
    let precision = row.get_i32_or_zero(3)?;
    let scale = row.get_i32_or_zero(4)?;

    let sql_type = reverse_type(&native, max_length)
        .ok_or_else(|| DialectError::unknown_type(table_name, &name, &native))?;

    let mut column = Column::new(name, sql_type);
    (column.length, column.length2) = match native.as_str() {
        "DECIMAL" | "NUMERIC" => (precision, scale),
        "TIME" => (scale, 0),
        "NVARCHAR" | "NCHAR" if max_length > 0 => (max_length / 2, 0),
        "VARCHAR" | "CHAR" | "VARBINARY" | "BINARY" if max_length > 0 => (max_length, 0),
        _ => (0, 0),
    };
    column.nullable = row.get_bool(5)?;
    column.default = row.get_opt_string(6)?.map(|d| strip_wrapping_parens(&d));
    column.is_primary_key = row.get_bool(7)?;
    column.is_auto_increment = row.get_bool(8)?;
    Ok(column)
}

/// Map a `sys.types` name back to the logical vocabulary.
fn reverse_type(native: &str, max_length: i32) -> Option<SqlType> {
    match native {
        "DATETIMEOFFSET" => Some(SqlType::TimeStampz),
        "DATETIME2" => Some(SqlType::DateTime),
        "IMAGE" => Some(SqlType::VarBinary),
        "NVARCHAR" if max_length == -1 => Some(SqlType::NText),
        "VARCHAR" if max_length == -1 => Some(SqlType::Text),
        other => SqlType::from_name(other),
    }
}

/// `((0))` -> `0`, `('abc')` -> `'abc'`, `(getdate())` -> `getdate()`.
fn strip_wrapping_parens(definition: &str) -> String {
    let mut value = definition.trim();
    while let Some(inner) = value.strip_prefix('(').and_then(|v| v.strip_suffix(')')) {
        if !balanced(inner) {
            break;
        }
        value = inner.trim();
    }
    value.to_string()
}

fn balanced(s: &str) -> bool {
    let mut depth = 0i32;
    for c in s.chars() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth < 0 {
                    return false;
                }
            }
            _ => {}
        }
    }
    depth == 0
}

fn escape_literal(s: &str) -> String {
    s.replace('\'', "''")
}
