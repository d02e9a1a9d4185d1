//! SQLite SQL dialect.
//!
//! SQLite keeps no typed column catalog, so columns and indexes are
//! recovered by parsing the `CREATE` statements stored in `sqlite_master`.

use async_trait::async_trait;
use indexmap::IndexMap;

use super::reserved::RESERVED_WORDS;
use crate::core::base::DialectBase;
use crate::core::schema::{Column, Index, IndexType, Table};
use crate::core::traits::{create_table_body, fetch, Dialect};
use crate::core::types::SqlType;
use crate::core::uri::DbType;
use crate::core::value::Statement;
use crate::error::{DialectError, Result};

const LIST_TABLES_SQL: &str = "SELECT name FROM sqlite_master WHERE type = 'table' \
     AND name NOT LIKE 'sqlite_%' ORDER BY name";

const TABLE_SQL: &str = "SELECT sql FROM sqlite_master WHERE type = 'table' AND name = ?";

const LIST_INDEXES_SQL: &str = "SELECT name, sql FROM sqlite_master WHERE type = 'index' \
     AND tbl_name = ? ORDER BY name";

/// Words that end the type name in a column definition.
const CONSTRAINT_WORDS: &[&str] = &[
    "CONSTRAINT",
    "PRIMARY",
    "NOT",
    "NULL",
    "UNIQUE",
    "CHECK",
    "DEFAULT",
    "COLLATE",
    "REFERENCES",
    "GENERATED",
    "AS",
    "AUTOINCREMENT",
];

/// SQLite dialect implementation.
#[derive(Debug, Clone, Default)]
pub struct SqliteDialect {
    base: DialectBase,
}

impl SqliteDialect {
    /// Create a new, unbound SQLite dialect.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Dialect for SqliteDialect {
    fn base(&self) -> &DialectBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut DialectBase {
        &mut self.base
    }

    fn db_type(&self) -> DbType {
        DbType::Sqlite
    }

    /// SQLite type affinities carry no length.
    fn sql_type(&self, column: &mut Column) -> String {
        let native = match column.sql_type {
            SqlType::Bool | SqlType::Boolean => {
                column.normalize_bool_default("1", "0");
                "INTEGER"
            }
            SqlType::Date
            | SqlType::DateTime
            | SqlType::SmallDateTime
            | SqlType::TimeStamp
            | SqlType::Time => "DATETIME",
            SqlType::TimeStampz => "TEXT",
            SqlType::Char
            | SqlType::Varchar
            | SqlType::NChar
            | SqlType::NVarchar
            | SqlType::TinyText
            | SqlType::Text
            | SqlType::NText
            | SqlType::MediumText
            | SqlType::LongText
            | SqlType::Clob
            | SqlType::Json
            | SqlType::Jsonb
            | SqlType::Uuid
            | SqlType::Enum
            | SqlType::Set => "TEXT",
            SqlType::Bit
            | SqlType::TinyInt
            | SqlType::SmallInt
            | SqlType::MediumInt
            | SqlType::Int
            | SqlType::Integer
            | SqlType::BigInt => "INTEGER",
            SqlType::Float | SqlType::Double | SqlType::Real => "REAL",
            SqlType::Decimal | SqlType::Numeric => "NUMERIC",
            SqlType::TinyBlob
            | SqlType::Blob
            | SqlType::MediumBlob
            | SqlType::LongBlob
            | SqlType::Bytea
            | SqlType::Binary
            | SqlType::VarBinary => "BLOB",
            SqlType::Serial | SqlType::BigSerial => {
                column.mark_serial();
                "INTEGER"
            }
            other => other.name(),
        };
        native.to_string()
    }

    fn quote(&self, name: &str) -> String {
        format!("`{}`", name)
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
        "AUTOINCREMENT"
    }

    fn param_placeholder(&self, _index: usize) -> String {
        "?".to_string()
    }

    fn drop_table_statement(&self, table_name: &str) -> String {
        format!("DROP TABLE IF EXISTS {}", self.quote(table_name))
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
            "CREATE TABLE IF NOT EXISTS {} {}",
            self.quote(&name),
            create_table_body(self, table, true)
        )
    }

    fn for_update_clause(&self, query: &str) -> String {
        query.to_string()
    }

    fn index_exists_statement(&self, _table_name: &str, index_name: &str) -> Statement {
        Statement::new(
            "SELECT name FROM sqlite_master WHERE type = 'index' AND name = ?",
            vec![index_name.into()],
        )
    }

    fn table_exists_statement(&self, table_name: &str) -> Statement {
        Statement::new(
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name = ?",
            vec![table_name.into()],
        )
    }

    fn column_exists_statement(&self, table_name: &str, column_name: &str) -> Statement {
        Statement::new(
            "SELECT name FROM pragma_table_info(?) WHERE name = ?",
            vec![table_name.into(), column_name.into()],
        )
    }

    fn modify_column_statement(&self, _table_name: &str, _column: &mut Column) -> Result<String> {
        Err(DialectError::Unsupported {
            dialect: "sqlite3",
            operation: "ALTER COLUMN".to_string(),
        })
    }

    async fn list_tables(&self) -> Result<Vec<Table>> {
        let rows = fetch(self, &Statement::new(LIST_TABLES_SQL, Vec::new())).await?;
        rows.iter()
            .map(|row| Ok(Table::new(unquote(&row.get_string(0)?))))
            .collect()
    }

    async fn list_columns(&self, table_name: &str) -> Result<IndexMap<String, Column>> {
        let stmt = Statement::new(TABLE_SQL, vec![table_name.into()]);
        let rows = fetch(self, &stmt).await?;
        let Some(row) = rows.first() else {
            return Ok(IndexMap::new());
        };
        parse_create_table(table_name, &row.get_string_or_empty(0)?)
    }

    async fn list_indexes(&self, table_name: &str) -> Result<IndexMap<String, Index>> {
        let stmt = Statement::new(LIST_INDEXES_SQL, vec![table_name.into()]);
        let rows = fetch(self, &stmt).await?;

        let mut indexes = IndexMap::new();
        for row in &rows {
            // Automatic indexes for UNIQUE/PRIMARY KEY constraints have no SQL.
            let Some(sql) = row.get_opt_string(1)? else {
                continue;
            };
            let index_name = unquote(&row.get_string(0)?);
            let index_type = if sql.trim_start().to_uppercase().starts_with("CREATE UNIQUE INDEX") {
                IndexType::Unique
            } else {
                IndexType::Regular
            };

            let mut index = Index::from_catalog_name(table_name, &index_name, index_type);
            for column in index_columns(&sql) {
                index.add_column(column);
            }
            indexes.insert(index.name.clone(), index);
        }
        Ok(indexes)
    }
}

/// Rebuild columns from a stored `CREATE TABLE` statement.
fn parse_create_table(table_name: &str, sql: &str) -> Result<IndexMap<String, Column>> {
    let body = match (sql.find('('), sql.rfind(')')) {
        (Some(start), Some(end)) if start < end => &sql[start + 1..end],
        _ => {
            return Err(DialectError::Catalog(format!(
                "cannot parse CREATE TABLE for {}",
                table_name
            )))
        }
    };

    let mut columns: IndexMap<String, Column> = IndexMap::new();
    let mut table_keys = Vec::new();

    for definition in split_top_level(body, ',') {
        let tokens = tokenize(definition);
        let Some(first) = tokens.first() else {
            continue;
        };
        let keyword = first.split('(').next().unwrap_or_default().to_uppercase();
        match keyword.as_str() {
            "PRIMARY" => {
                table_keys.extend(paren_list(&tokens));
                continue;
            }
            "CONSTRAINT" => {
                if tokens.iter().any(|t| t.eq_ignore_ascii_case("PRIMARY")) {
                    table_keys.extend(paren_list(&tokens));
                }
                continue;
            }
            "UNIQUE" | "CHECK" | "FOREIGN" => continue,
            _ => {}
        }

        let column = parse_column(table_name, &tokens)?;
        columns.insert(column.name.clone(), column);
    }

    for key in table_keys {
        if let Some(column) = columns.get_mut(&key) {
            column.is_primary_key = true;
        }
    }
    Ok(columns)
}

fn parse_column(table_name: &str, tokens: &[String]) -> Result<Column> {
    let name = unquote(&tokens[0]);
    let rest = &tokens[1..];
    let type_len = rest
        .iter()
        .position(|t| CONSTRAINT_WORDS.contains(&t.to_uppercase().as_str()))
        .unwrap_or(rest.len());
    let declared = rest[..type_len].join(" ");

    let (sql_type, length, length2) = reverse_type(&declared)
        .ok_or_else(|| DialectError::unknown_type(table_name, &name, declared.to_uppercase()))?;

    let mut column = Column::new(name, sql_type);
    column.length = length;
    column.length2 = length2;

    let constraints = &rest[type_len..];
    for (pos, token) in constraints.iter().enumerate() {
        match token.to_uppercase().as_str() {
            "PRIMARY" => column.is_primary_key = true,
            "AUTOINCREMENT" => column.is_auto_increment = true,
            "NULL" => {
                column.nullable = pos == 0 || !constraints[pos - 1].eq_ignore_ascii_case("NOT");
            }
            "DEFAULT" => column.default = constraints.get(pos + 1).cloned(),
            _ => {}
        }
    }
    Ok(column)
}

/// Map a declared type such as `VARCHAR(255)` back to a logical type and lengths.
fn reverse_type(declared: &str) -> Option<(SqlType, i32, i32)> {
    let declared = declared.trim().to_uppercase();
    let (name, args) = match declared.split_once('(') {
        Some((name, rest)) => (name.trim(), rest.trim_end_matches(')')),
        None => (declared.as_str(), ""),
    };

    let sql_type = match name {
        // No declared type means BLOB affinity.
        "" => SqlType::Blob,
        "DOUBLE PRECISION" => SqlType::Double,
        "UNSIGNED BIG INT" => SqlType::BigInt,
        "VARYING CHARACTER" => SqlType::Varchar,
        "NATIVE CHARACTER" => SqlType::NChar,
        other => SqlType::from_name(other)
            .or_else(|| other.split_whitespace().next().and_then(SqlType::from_name))?,
    };

    let mut lengths = args
        .split(',')
        .map(|l| l.trim().parse::<i32>().unwrap_or(0));
    let length = lengths.next().unwrap_or(0);
    let length2 = lengths.next().unwrap_or(0);
    Some((sql_type, length, length2))
}

/// Column names inside the parentheses after ` ON <table>`.
fn index_columns(sql: &str) -> Vec<String> {
    let upper = sql.to_uppercase();
    let after_on = upper.find(" ON ").map_or(0, |pos| pos + 4);
    let Some(open) = sql[after_on..].find('(').map(|pos| pos + after_on) else {
        return Vec::new();
    };
    let Some(close) = sql.rfind(')').filter(|close| *close > open) else {
        return Vec::new();
    };

    split_top_level(&sql[open + 1..close], ',')
        .into_iter()
        .filter_map(|part| tokenize(part).into_iter().next())
        .map(|name| unquote(&name))
        .filter(|name| !name.is_empty())
        .collect()
}

/// Names listed in the first parenthesized group, e.g. `PRIMARY KEY (a, b)`
/// or `PRIMARY KEY(a, b)`.
fn paren_list(tokens: &[String]) -> Vec<String> {
    tokens
        .iter()
        .find_map(|t| {
            let open = t.find('(')?;
            let close = t.rfind(')').filter(|close| *close > open)?;
            Some(&t[open + 1..close])
        })
        .map(|list| {
            split_top_level(list, ',')
                .into_iter()
                .filter_map(|part| tokenize(part).into_iter().next())
                .map(|name| unquote(&name))
                .collect()
        })
        .unwrap_or_default()
}

/// Split on `delimiter` outside parentheses and quotes.
fn split_top_level(source: &str, delimiter: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut start = 0;

    for (pos, c) in source.char_indices() {
        match quote {
            Some(q) if c == closing_quote(q) => quote = None,
            Some(_) => {}
            None => match c {
                '\'' | '"' | '`' | '[' => quote = Some(c),
                '(' => depth += 1,
                ')' => depth = depth.saturating_sub(1),
                c if c == delimiter && depth == 0 => {
                    parts.push(&source[start..pos]);
                    start = pos + c.len_utf8();
                }
                _ => {}
            },
        }
    }
    parts.push(&source[start..]);
    parts
}

/// Whitespace tokens; quoted runs stay whole and a parenthesized group
/// attaches to the token before it (`VARCHAR (10)` -> `VARCHAR(10)`).
fn tokenize(source: &str) -> Vec<String> {
    let mut tokens: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;

    for c in source.chars() {
        if let Some(q) = quote {
            current.push(c);
            if c == closing_quote(q) {
                quote = None;
            }
            continue;
        }
        match c {
            '\'' | '"' | '`' | '[' => {
                quote = Some(c);
                current.push(c);
            }
            '(' => {
                if depth == 0 && current.is_empty() {
                    // Only type names take a detached argument list.
                    if tokens.last().is_some_and(|last| is_type_word(last)) {
                        current = tokens.pop().unwrap_or_default();
                    }
                }
                depth += 1;
                current.push(c);
            }
            ')' => {
                depth = depth.saturating_sub(1);
                current.push(c);
            }
            c if c.is_whitespace() && depth == 0 => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
            }
            c => current.push(c),
        }
    }
    if !current.is_empty() {
        tokens.push(current);
    }
    tokens
}

fn is_type_word(token: &str) -> bool {
    let upper = token.to_uppercase();
    upper != "KEY"
        && !CONSTRAINT_WORDS.contains(&upper.as_str())
        && token.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn closing_quote(open: char) -> char {
    if open == '[' {
        ']'
    } else {
        open
    }
}

fn unquote(name: &str) -> String {
    name.trim()
        .trim_matches(|c| c == '`' || c == '"' || c == '[' || c == ']' || c == ' ')
        .to_string()
}
