//! Oracle SQL dialect.
//!
//! Integers are rendered as `NUMBER(p)` with a fixed precision per width so
//! the data dictionary's precision recovers the logical type. Auto-increment
//! uses identity columns (12c and later).

use async_trait::async_trait;
use indexmap::IndexMap;

use super::reserved::RESERVED_WORDS;
use crate::core::base::DialectBase;
use crate::core::schema::{Column, Index, IndexType, Table};
use crate::core::traits::{create_table_body, fetch, Dialect};
use crate::core::types::SqlType;
use crate::core::uri::DbType;
use crate::core::value::{Row, Statement};
use crate::drivers::common::with_lengths;
use crate::error::{DialectError, Result};

const LIST_TABLES_SQL: &str = "SELECT TABLE_NAME FROM USER_TABLES ORDER BY TABLE_NAME";

const LIST_COLUMNS_SQL: &str = r#"SELECT c.COLUMN_NAME, c.DATA_DEFAULT, c.DATA_TYPE, c.CHAR_LENGTH, c.DATA_LENGTH,
       c.DATA_PRECISION, c.DATA_SCALE, c.NULLABLE, c.IDENTITY_COLUMN,
       CASE WHEN EXISTS (
           SELECT 1 FROM USER_CONSTRAINTS k
           JOIN USER_CONS_COLUMNS kc ON kc.CONSTRAINT_NAME = k.CONSTRAINT_NAME
           WHERE k.TABLE_NAME = c.TABLE_NAME AND k.CONSTRAINT_TYPE = 'P'
             AND kc.COLUMN_NAME = c.COLUMN_NAME
       ) THEN 1 ELSE 0 END AS IS_PK
FROM USER_TAB_COLUMNS c
WHERE c.TABLE_NAME = :1
ORDER BY c.COLUMN_ID"#;

const LIST_INDEXES_SQL: &str = r#"SELECT i.INDEX_NAME, i.UNIQUENESS, t.COLUMN_NAME
FROM USER_IND_COLUMNS t
JOIN USER_INDEXES i ON t.INDEX_NAME = i.INDEX_NAME AND t.TABLE_NAME = i.TABLE_NAME
WHERE t.TABLE_NAME = :1
  AND NOT EXISTS (
      SELECT 1 FROM USER_CONSTRAINTS k
      WHERE k.CONSTRAINT_TYPE = 'P' AND k.INDEX_NAME = i.INDEX_NAME AND k.TABLE_NAME = i.TABLE_NAME
  )
ORDER BY i.INDEX_NAME, t.COLUMN_POSITION"#;

/// Oracle dialect implementation.
#[derive(Debug, Clone, Default)]
pub struct OracleDialect {
    base: DialectBase,
}

impl OracleDialect {
    /// Create a new, unbound Oracle dialect.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Dialect for OracleDialect {
    fn base(&self) -> &DialectBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut DialectBase {
        &mut self.base
    }

    fn db_type(&self) -> DbType {
        DbType::Oracle
    }

    fn sql_type(&self, column: &mut Column) -> String {
        let integer_precision = match column.sql_type {
            SqlType::Bool | SqlType::Boolean => {
                column.normalize_bool_default("1", "0");
                Some(1)
            }
            SqlType::Bit => Some(1),
            SqlType::TinyInt => Some(3),
            SqlType::SmallInt => Some(5),
            SqlType::MediumInt | SqlType::Int | SqlType::Integer => Some(10),
            SqlType::BigInt => Some(19),
            SqlType::Serial => {
                column.mark_serial();
                Some(10)
            }
            SqlType::BigSerial => {
                column.mark_serial();
                Some(19)
            }
            _ => None,
        };
        if let Some(precision) = integer_precision {
            column.length = 0;
            column.length2 = 0;
            return format!("NUMBER({})", precision);
        }

        let native = match column.sql_type {
            SqlType::Binary
            | SqlType::VarBinary
            | SqlType::Blob
            | SqlType::TinyBlob
            | SqlType::MediumBlob
            | SqlType::LongBlob
            | SqlType::Bytea => return "BLOB".to_string(),
            SqlType::Time | SqlType::DateTime | SqlType::SmallDateTime | SqlType::TimeStamp => {
                return "TIMESTAMP".to_string()
            }
            SqlType::TimeStampz => return "TIMESTAMP WITH TIME ZONE".to_string(),
            SqlType::Float | SqlType::Real => return "BINARY_FLOAT".to_string(),
            SqlType::Double => return "BINARY_DOUBLE".to_string(),
            SqlType::Numeric | SqlType::Decimal | SqlType::Money | SqlType::SmallMoney => "NUMBER",
            SqlType::Text
            | SqlType::MediumText
            | SqlType::LongText
            | SqlType::Clob
            | SqlType::Json
            | SqlType::Jsonb => return "CLOB".to_string(),
            SqlType::NText => return "NCLOB".to_string(),
            SqlType::Xml => return "XMLTYPE".to_string(),
            SqlType::Char => "CHAR",
            SqlType::NChar => "NCHAR",
            SqlType::Varchar | SqlType::TinyText | SqlType::SysName => "VARCHAR2",
            SqlType::NVarchar => "NVARCHAR2",
            SqlType::Uuid | SqlType::UniqueIdentifier => {
                column.length = 40;
                "VARCHAR2"
            }
            SqlType::Enum | SqlType::Set => {
                if column.length == 0 {
                    column.length = 255;
                }
                "VARCHAR2"
            }
            other => other.name(),
        };
        with_lengths(native, column.length, column.length2)
    }

    fn quote(&self, name: &str) -> String {
        format!("\"{}\"", name)
    }

    fn is_reserved(&self, name: &str) -> bool {
        RESERVED_WORDS.contains(name.to_uppercase().as_str())
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
        false
    }

    fn auto_increment_clause(&self) -> &'static str {
        "GENERATED BY DEFAULT AS IDENTITY"
    }

    fn param_placeholder(&self, index: usize) -> String {
        format!(":{}", index)
    }

    /// Identity clause precedes the inline key constraint.
    fn column_definition(&self, column: &mut Column) -> String {
        let mut parts = vec![self.quote(&column.name), self.sql_type(column)];
        if column.is_primary_key && column.is_auto_increment {
            parts.push(self.auto_increment_clause().to_string());
        }
        if let Some(default) = column.default_expr() {
            parts.push(format!("DEFAULT {}", default));
        }
        if column.is_primary_key {
            parts.push("PRIMARY KEY".to_string());
        }
        parts.push(if column.nullable { "NULL" } else { "NOT NULL" }.to_string());
        parts.join(" ")
    }

    fn drop_table_statement(&self, table_name: &str) -> String {
        format!("DROP TABLE {}", self.quote(table_name))
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
            "CREATE TABLE {} {}",
            self.quote(&name),
            create_table_body(self, table, true)
        )
    }

    fn for_update_clause(&self, query: &str) -> String {
        format!("{} FOR UPDATE", query)
    }

    fn index_exists_statement(&self, table_name: &str, index_name: &str) -> Statement {
        Statement::new(
            "SELECT INDEX_NAME FROM USER_INDEXES WHERE TABLE_NAME = :1 AND INDEX_NAME = :2",
            vec![table_name.into(), index_name.into()],
        )
    }

    fn table_exists_statement(&self, table_name: &str) -> Statement {
        Statement::new(
            "SELECT TABLE_NAME FROM USER_TABLES WHERE TABLE_NAME = :1",
            vec![table_name.into()],
        )
    }

    fn column_exists_statement(&self, table_name: &str, column_name: &str) -> Statement {
        Statement::new(
            "SELECT COLUMN_NAME FROM USER_TAB_COLUMNS WHERE TABLE_NAME = :1 AND COLUMN_NAME = :2",
            vec![table_name.into(), column_name.into()],
        )
    }

    fn modify_column_statement(&self, table_name: &str, column: &mut Column) -> Result<String> {
        Ok(format!(
            "ALTER TABLE {} MODIFY ({})",
            self.quote(table_name),
            self.column_definition_no_pk(column)
        ))
    }

    async fn list_tables(&self) -> Result<Vec<Table>> {
        let rows = fetch(self, &Statement::new(LIST_TABLES_SQL, Vec::new())).await?;
        rows.iter()
            .map(|row| Ok(Table::new(row.get_string(0)?.trim())))
            .collect()
    }

    async fn list_columns(&self, table_name: &str) -> Result<IndexMap<String, Column>> {
        let stmt = Statement::new(LIST_COLUMNS_SQL, vec![table_name.into()]);
        let rows = fetch(self, &stmt).await?;

        let mut columns = IndexMap::with_capacity(rows.len());
        for row in &rows {
            let column = column_from_row(table_name, row)?;
            columns.insert(column.name.clone(), column);
        }
        Ok(columns)
    }

    async fn list_indexes(&self, table_name: &str) -> Result<IndexMap<String, Index>> {
        let stmt = Statement::new(LIST_INDEXES_SQL, vec![table_name.into()]);
        let rows = fetch(self, &stmt).await?;

        let mut indexes: IndexMap<String, Index> = IndexMap::new();
        for row in &rows {
            let index_name = row.get_string(0)?;
            let index_type = if row.get_string_or_empty(1)?.eq_ignore_ascii_case("UNIQUE") {
                IndexType::Unique
            } else {
                IndexType::Regular
            };
            let column_name = row.get_string(2)?;

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
    let name = row.get_string(0)?;
    let raw_default = row
        .get_opt_string(1)?
        .map(|d| d.trim().to_string())
        .filter(|d| !d.is_empty());
    let data_type = row.get_string_or_empty(2)?;
    let char_length = row.get_i32_or_zero(3)?;
    let data_length = row.get_i32_or_zero(4)?;
    let precision = row.get_opt_i64(5)?;
    let scale = row.get_i32_or_zero(6)?;

    let (sql_type, length, length2) = reverse_type(&data_type, char_length, data_length, precision, scale)
        .ok_or_else(|| DialectError::unknown_type(table_name, &name, data_type.clone()))?;

    let mut column = Column::new(name, sql_type);
    column.length = length;
    column.length2 = length2;
    column.nullable = row.get_string_or_empty(7)? == "Y";
    column.is_auto_increment = row.get_string_or_empty(8)? == "YES";
    column.is_primary_key = row.get_bool(9)?;

    match raw_default {
        Some(d) if d.to_lowercase().ends_with(".nextval") => column.is_auto_increment = true,
        other => column.default = other,
    }
    Ok(column)
}

/// Map a dictionary `DATA_TYPE` back to a logical type and lengths.
fn reverse_type(
    data_type: &str,
    char_length: i32,
    data_length: i32,
    precision: Option<i64>,
    scale: i32,
) -> Option<(SqlType, i32, i32)> {
    let upper = data_type.trim().to_uppercase();
    // TIMESTAMP(6) WITH TIME ZONE -> TIMESTAMP WITH TIME ZONE
    let base = match (upper.find('('), upper.find(')')) {
        (Some(open), Some(close)) if open < close => format!("{}{}", &upper[..open], &upper[close + 1..]),
        _ => upper,
    };

    let mapped = match base.as_str() {
        "NUMBER" => {
            let precision = precision.and_then(|p| i32::try_from(p).ok());
            match (precision, scale) {
                (None, _) => (SqlType::Numeric, 0, 0),
                (Some(p), s) if s > 0 => (SqlType::Decimal, p, s),
                (Some(1), _) => (SqlType::Bool, 0, 0),
                (Some(p), _) if p <= 3 => (SqlType::TinyInt, 0, 0),
                (Some(p), _) if p <= 5 => (SqlType::SmallInt, 0, 0),
                (Some(p), _) if p <= 10 => (SqlType::Int, 0, 0),
                (Some(p), _) if p <= 19 => (SqlType::BigInt, 0, 0),
                (Some(p), _) => (SqlType::Decimal, p, 0),
            }
        }
        "VARCHAR2" | "VARCHAR" => (SqlType::Varchar, char_length, 0),
        "NVARCHAR2" => (SqlType::NVarchar, char_length, 0),
        "CHAR" => (SqlType::Char, char_length, 0),
        "NCHAR" => (SqlType::NChar, char_length, 0),
        "CLOB" | "LONG" => (SqlType::Text, 0, 0),
        "NCLOB" => (SqlType::NText, 0, 0),
        "BLOB" | "LONG RAW" => (SqlType::Blob, 0, 0),
        "RAW" => (SqlType::VarBinary, data_length, 0),
        "DATE" => (SqlType::Date, 0, 0),
        "TIMESTAMP" => (SqlType::DateTime, 0, 0),
        "TIMESTAMP WITH TIME ZONE" | "TIMESTAMP WITH LOCAL TIME ZONE" => (SqlType::TimeStampz, 0, 0),
        "BINARY_FLOAT" | "FLOAT" => (SqlType::Float, 0, 0),
        "BINARY_DOUBLE" => (SqlType::Double, 0, 0),
        "XMLTYPE" => (SqlType::Xml, 0, 0),
        "ROWID" => (SqlType::Varchar, 18, 0),
        other => (SqlType::from_name(other)?, 0, 0),
    };
    Some(mapped)
}
