//! PostgreSQL SQL dialect.
//!
//! Auto-increment is expressed through `SERIAL`/`BIGSERIAL` column types,
//! and catalog queries are scoped to one schema (`public` unless the
//! `schema` parameter or the connection URI names another).

use async_trait::async_trait;
use indexmap::IndexMap;

use super::reserved::RESERVED_WORDS;
use crate::core::base::DialectBase;
use crate::core::schema::{Column, Index, IndexType, Table};
use crate::core::traits::{create_table_body, fetch, Dialect};
use crate::core::types::SqlType;
use crate::core::uri::DbType;
use crate::core::value::{Row, Statement};
use crate::drivers::common::{trim_name, with_lengths};
use crate::error::{DialectError, Result};

pub(crate) const DEFAULT_SCHEMA: &str = "public";

const LIST_TABLES_SQL: &str =
    "SELECT tablename FROM pg_tables WHERE schemaname = $1 ORDER BY tablename";

const LIST_COLUMNS_SQL: &str = r#"SELECT c.column_name::text, c.column_default::text, c.is_nullable::text, c.data_type::text,
       c.character_maximum_length::int4, c.numeric_precision::int4, c.numeric_scale::int4,
       EXISTS (
           SELECT 1 FROM information_schema.table_constraints tc
           JOIN information_schema.key_column_usage kcu
             ON kcu.constraint_name = tc.constraint_name
            AND kcu.table_schema = tc.table_schema
            AND kcu.table_name = tc.table_name
           WHERE tc.constraint_type = 'PRIMARY KEY'
             AND tc.table_schema = c.table_schema
             AND tc.table_name = c.table_name
             AND kcu.column_name = c.column_name
       ) AS is_primary_key,
       (c.is_identity = 'YES') AS is_identity
FROM information_schema.columns c
WHERE c.table_schema::text = $1 AND c.table_name::text = $2
ORDER BY c.ordinal_position"#;

const LIST_INDEXES_SQL: &str = "SELECT indexname, indexdef FROM pg_indexes \
     WHERE tablename = $1 AND schemaname = $2 ORDER BY indexname";

/// PostgreSQL dialect implementation.
#[derive(Debug, Clone, Default)]
pub struct PostgresDialect {
    base: DialectBase,
}

impl PostgresDialect {
    /// Create a new, unbound PostgreSQL dialect.
    pub fn new() -> Self {
        Self::default()
    }

    /// Schema used by catalog queries.
    pub fn schema(&self) -> &str {
        self.base
            .param("schema")
            .or_else(|| self.base.uri().and_then(|u| u.schema.as_deref()))
            .unwrap_or(DEFAULT_SCHEMA)
    }
}

#[async_trait]
impl Dialect for PostgresDialect {
    fn base(&self) -> &DialectBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut DialectBase {
        &mut self.base
    }

    fn db_type(&self) -> DbType {
        DbType::Postgres
    }

    fn sql_type(&self, column: &mut Column) -> String {
        let native = match column.sql_type {
            SqlType::TinyInt => return "SMALLINT".to_string(),
            SqlType::Bit => return "BOOLEAN".to_string(),
            SqlType::MediumInt | SqlType::Int | SqlType::Integer => {
                return if column.is_auto_increment {
                    "SERIAL"
                } else {
                    "INTEGER"
                }
                .to_string();
            }
            SqlType::BigInt => {
                return if column.is_auto_increment {
                    "BIGSERIAL"
                } else {
                    "BIGINT"
                }
                .to_string();
            }
            SqlType::Serial | SqlType::BigSerial => {
                column.is_auto_increment = true;
                column.nullable = false;
                column.sql_type.name()
            }
            SqlType::Binary
            | SqlType::VarBinary
            | SqlType::Bytea
            | SqlType::Blob
            | SqlType::TinyBlob
            | SqlType::MediumBlob
            | SqlType::LongBlob => return "BYTEA".to_string(),
            SqlType::DateTime | SqlType::SmallDateTime => "TIMESTAMP",
            SqlType::TimeStampz => return "timestamp with time zone".to_string(),
            SqlType::Float => "REAL",
            SqlType::TinyText
            | SqlType::MediumText
            | SqlType::LongText
            | SqlType::NText
            | SqlType::Clob => "TEXT",
            SqlType::NVarchar | SqlType::Enum | SqlType::Set => "VARCHAR",
            SqlType::Uuid | SqlType::UniqueIdentifier => return "UUID".to_string(),
            SqlType::Double => return "DOUBLE PRECISION".to_string(),
            SqlType::Bool | SqlType::Boolean => return "BOOL".to_string(),
            SqlType::Year => return "INTEGER".to_string(),
            other => {
                if column.is_auto_increment {
                    return "SERIAL".to_string();
                }
                other.name()
            }
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
        ""
    }

    fn param_placeholder(&self, index: usize) -> String {
        format!("${}", index)
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
        format!("{} FOR UPDATE", query)
    }

    fn index_exists_statement(&self, table_name: &str, index_name: &str) -> Statement {
        Statement::new(
            "SELECT indexname FROM pg_indexes WHERE tablename = $1 AND indexname = $2 AND schemaname = $3",
            vec![table_name.into(), index_name.into(), self.schema().into()],
        )
    }

    fn table_exists_statement(&self, table_name: &str) -> Statement {
        Statement::new(
            "SELECT tablename FROM pg_tables WHERE tablename = $1 AND schemaname = $2",
            vec![table_name.into(), self.schema().into()],
        )
    }

    fn column_exists_statement(&self, table_name: &str, column_name: &str) -> Statement {
        Statement::new(
            "SELECT column_name FROM INFORMATION_SCHEMA.COLUMNS WHERE table_schema::text = $1 \
             AND table_name::text = $2 AND column_name::text = $3",
            vec![
                self.schema().into(),
                table_name.into(),
                column_name.into(),
            ],
        )
    }

    fn modify_column_statement(&self, table_name: &str, column: &mut Column) -> Result<String> {
        Ok(format!(
            "ALTER TABLE {} ALTER COLUMN {} TYPE {}",
            self.quote(table_name),
            self.quote(&column.name),
            self.sql_type(column)
        ))
    }

    async fn list_tables(&self) -> Result<Vec<Table>> {
        let stmt = Statement::new(LIST_TABLES_SQL, vec![self.schema().into()]);
        let rows = fetch(self, &stmt).await?;
        rows.iter()
            .map(|row| Ok(Table::new(trim_name(&row.get_string(0)?))))
            .collect()
    }

    async fn list_columns(&self, table_name: &str) -> Result<IndexMap<String, Column>> {
        let stmt = Statement::new(
            LIST_COLUMNS_SQL,
            vec![self.schema().into(), table_name.into()],
        );
        let rows = fetch(self, &stmt).await?;

        let mut columns = IndexMap::with_capacity(rows.len());
        for row in &rows {
            let column = column_from_row(table_name, row)?;
            columns.insert(column.name.clone(), column);
        }
        Ok(columns)
    }

    async fn list_indexes(&self, table_name: &str) -> Result<IndexMap<String, Index>> {
        let stmt = Statement::new(
            LIST_INDEXES_SQL,
            vec![table_name.into(), self.schema().into()],
        );
        let rows = fetch(self, &stmt).await?;

        let mut indexes: IndexMap<String, Index> = IndexMap::new();
        for row in &rows {
            let index_name = row.get_string(0)?;
            if index_name.ends_with("_pkey") {
                continue;
            }
            let definition = row.get_string(1)?;
            let index_type = if definition.starts_with("CREATE UNIQUE INDEX") {
                IndexType::Unique
            } else {
                IndexType::Regular
            };

            let mut index = Index::from_catalog_name(table_name, &index_name, index_type);
            for column in index_columns(&definition) {
                index.add_column(column);
            }
            indexes.insert(index.name.clone(), index);
        }
        Ok(indexes)
    }
}

fn column_from_row(table_name: &str, row: &Row) -> Result<Column> {
    let name = trim_name(&row.get_string(0)?);
    let raw_default = row.get_opt_string(1)?;
    let data_type = row.get_string_or_empty(3)?;

    let sql_type = reverse_type(&data_type)
        .ok_or_else(|| DialectError::unknown_type(table_name, &name, data_type.to_uppercase()))?;

    let mut column = Column::new(name, sql_type);
    column.nullable = row.get_string_or_empty(2)?.eq_ignore_ascii_case("YES");
    (column.length, column.length2) = match sql_type {
        SqlType::Varchar | SqlType::Char => (row.get_i32_or_zero(4)?, 0),
        SqlType::Numeric | SqlType::Decimal => (row.get_i32_or_zero(5)?, row.get_i32_or_zero(6)?),
        _ => (0, 0),
    };
    column.is_primary_key = row.get_bool(7)?;
    column.is_auto_increment = row.get_bool(8)?;

    match raw_default {
        Some(d) if d.starts_with("nextval(") => column.is_auto_increment = true,
        Some(d) => column.default = Some(strip_cast(&d)),
        None => {}
    }
    Ok(column)
}

/// Map an `information_schema` data type back to the logical vocabulary.
fn reverse_type(data_type: &str) -> Option<SqlType> {
    match data_type.to_lowercase().as_str() {
        "character varying" => Some(SqlType::Varchar),
        "character" => Some(SqlType::Char),
        "timestamp without time zone" => Some(SqlType::DateTime),
        "timestamp with time zone" => Some(SqlType::TimeStampz),
        "time without time zone" | "time with time zone" => Some(SqlType::Time),
        "double precision" => Some(SqlType::Double),
        "boolean" => Some(SqlType::Bool),
        "oid" => Some(SqlType::BigInt),
        other => SqlType::from_name(other),
    }
}

/// `'open'::character varying` -> `'open'`. A `::` inside a string literal
/// is part of the value.
fn strip_cast(default: &str) -> String {
    let mut in_literal = false;
    let mut chars = default.char_indices().peekable();
    while let Some((pos, c)) = chars.next() {
        match c {
            '\'' => in_literal = !in_literal,
            ':' if !in_literal && chars.peek().is_some_and(|(_, next)| *next == ':') => {
                if pos == 0 {
                    break;
                }
                return default[..pos].to_string();
            }
            _ => {}
        }
    }
    default.to_string()
}

/// Column names from an `indexdef`, e.g. `... USING btree (status, created_at DESC)`.
fn index_columns(definition: &str) -> Vec<String> {
    let Some(open) = definition.find('(') else {
        return Vec::new();
    };
    let body = &definition[open + 1..];

    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut quoted = false;
    let mut start = 0;
    let mut end = body.len();
    for (pos, c) in body.char_indices() {
        match c {
            '"' => quoted = !quoted,
            _ if quoted => {}
            '(' => depth += 1,
            ')' if depth == 0 => {
                end = pos;
                break;
            }
            ')' => depth -= 1,
            ',' if depth == 0 => {
                parts.push(&body[start..pos]);
                start = pos + 1;
            }
            _ => {}
        }
    }
    parts.push(&body[start..end]);

    parts
        .into_iter()
        .filter_map(leading_identifier)
        .filter(|name| !name.is_empty())
        .collect()
}

/// First identifier of an index element, unquoted. `"first name" DESC` -> `first name`.
fn leading_identifier(part: &str) -> Option<String> {
    let part = part.trim_start();
    let Some(quoted) = part.strip_prefix('"') else {
        return part.split_whitespace().next().map(str::to_string);
    };

    let mut name = String::new();
    let mut chars = quoted.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '"' {
            if chars.peek() == Some(&'"') {
                chars.next();
                name.push('"');
                continue;
            }
            return Some(name);
        }
        name.push(c);
    }
    Some(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::uri::Uri;
    use crate::core::value::SqlValue;
    use crate::testing::{int, text, MockConnection};
    use std::collections::HashMap;
    use std::sync::Arc;

    fn bound(conn: Arc<MockConnection>) -> PostgresDialect {
        let mut dialect = PostgresDialect::new();
        dialect
            .init(conn, Uri::new(DbType::Postgres, "shop"), "postgres", "dbname=shop")
            .unwrap();
        dialect
    }

    #[allow(clippy::too_many_arguments)]
    fn column_row(
        name: &str,
        default: Option<&str>,
        nullable: &str,
        data_type: &str,
        char_len: Option<i64>,
        precision: Option<i64>,
        scale: Option<i64>,
        pk: bool,
    ) -> Vec<SqlValue> {
        vec![
            text(name),
            default.map_or(SqlValue::Null, text),
            text(nullable),
            text(data_type),
            char_len.map_or(SqlValue::Null, int),
            precision.map_or(SqlValue::Null, int),
            scale.map_or(SqlValue::Null, int),
            SqlValue::Bool(pk),
            SqlValue::Bool(false),
        ]
    }

    #[test]
    fn test_sql_type_mapping() {
        let d = PostgresDialect::new();
        let cases = [
            (Column::new("a", SqlType::TinyInt), "SMALLINT"),
            (Column::new("a", SqlType::Bit), "BOOLEAN"),
            (Column::new("a", SqlType::Int).with_length(11), "INTEGER"),
            (Column::new("a", SqlType::Int).auto_increment(), "SERIAL"),
            (Column::new("a", SqlType::BigInt).auto_increment(), "BIGSERIAL"),
            (Column::new("a", SqlType::BigInt), "BIGINT"),
            (Column::new("a", SqlType::Blob), "BYTEA"),
            (Column::new("a", SqlType::VarBinary).with_length(16), "BYTEA"),
            (Column::new("a", SqlType::DateTime), "TIMESTAMP"),
            (Column::new("a", SqlType::TimeStampz), "timestamp with time zone"),
            (Column::new("a", SqlType::Float), "REAL"),
            (Column::new("a", SqlType::LongText), "TEXT"),
            (Column::new("a", SqlType::NVarchar).with_length(40), "VARCHAR(40)"),
            (Column::new("a", SqlType::Uuid), "UUID"),
            (Column::new("a", SqlType::Double), "DOUBLE PRECISION"),
            (Column::new("a", SqlType::Bool).with_length(1), "BOOL"),
            (Column::new("a", SqlType::Decimal).with_precision(12, 4), "DECIMAL(12,4)"),
            (Column::new("a", SqlType::Jsonb), "JSONB"),
        ];
        for (mut column, expected) in cases {
            assert_eq!(d.sql_type(&mut column), expected, "{:?}", column.sql_type);
        }
    }

    #[test]
    fn test_bool_default_is_not_rewritten() {
        let d = PostgresDialect::new();
        let mut col = Column::new("active", SqlType::Bool).with_default("true");
        assert_eq!(d.sql_type(&mut col), "BOOL");
        assert_eq!(col.default.as_deref(), Some("true"));
    }

    #[test]
    fn test_serial_marks_column() {
        let d = PostgresDialect::new();
        let mut col = Column::new("id", SqlType::BigSerial);
        assert_eq!(d.sql_type(&mut col), "BIGSERIAL");
        assert!(col.is_auto_increment);
        assert!(!col.nullable);
    }

    #[test]
    fn test_is_reserved_folds_case() {
        let d = PostgresDialect::new();
        assert!(d.is_reserved("user"));
        assert!(d.is_reserved("SELECT"));
        assert!(!d.is_reserved("users"));
        assert!(!d.is_reserved(""));
    }

    #[test]
    fn test_create_table_single_key() {
        let d = PostgresDialect::new();
        let mut table = Table::new("users")
            .with_column(
                Column::new("id", SqlType::BigInt)
                    .primary_key()
                    .auto_increment(),
            )
            .with_column(Column::new("email", SqlType::Varchar).with_length(120).not_null())
            .with_column(Column::new("active", SqlType::Bool).with_default("true"));
        assert_eq!(
            d.create_table_statement(&mut table, None, None, None),
            "CREATE TABLE IF NOT EXISTS \"users\" (\"id\" BIGSERIAL PRIMARY KEY NOT NULL, \
             \"email\" VARCHAR(120) NOT NULL, \"active\" BOOL DEFAULT true NULL)"
        );
    }

    #[test]
    fn test_create_table_composite_key() {
        let d = PostgresDialect::new();
        let mut table = Table::new("order_items")
            .with_column(Column::new("order_id", SqlType::BigInt).primary_key())
            .with_column(Column::new("line", SqlType::Int).primary_key())
            .with_column(Column::new("note", SqlType::Text));
        assert_eq!(
            d.create_table_statement(&mut table, None, None, None),
            "CREATE TABLE IF NOT EXISTS \"order_items\" (\"order_id\" BIGINT NOT NULL, \
             \"line\" INTEGER NOT NULL, \"note\" TEXT NULL, \
             PRIMARY KEY ( \"order_id\",\"line\" ))"
        );
    }

    #[test]
    fn test_ddl_helpers() {
        let d = PostgresDialect::new();
        assert_eq!(d.drop_table_statement("users"), "DROP TABLE IF EXISTS \"users\"");
        assert_eq!(
            d.for_update_clause("SELECT * FROM t"),
            "SELECT * FROM t FOR UPDATE"
        );
        assert_eq!(d.param_placeholder(3), "$3");
        assert_eq!(d.auto_increment_clause(), "");
        assert!(!d.index_on_table());

        let mut index = Index::new("email", IndexType::Unique);
        index.add_column("email");
        assert_eq!(
            d.create_index_statement("users", &index),
            "CREATE UNIQUE INDEX \"UQE_users_email\" ON \"users\" (\"email\")"
        );
        assert_eq!(d.drop_index_statement("users", &index), "DROP INDEX \"UQE_users_email\"");

        let mut col = Column::new("score", SqlType::Double);
        assert_eq!(
            d.modify_column_statement("users", &mut col).unwrap(),
            "ALTER TABLE \"users\" ALTER COLUMN \"score\" TYPE DOUBLE PRECISION"
        );
    }

    #[test]
    fn test_schema_resolution() {
        let mut d = PostgresDialect::new();
        assert_eq!(d.schema(), "public");
        assert_eq!(d.table_exists_statement("t").args[1], text("public"));

        d.set_params(HashMap::from([("schema".to_string(), "sales".to_string())]));
        assert_eq!(d.schema(), "sales");
        let stmt = d.index_exists_statement("t", "IDX_t_a");
        assert_eq!(stmt.args, vec![text("t"), text("IDX_t_a"), text("sales")]);
    }

    #[tokio::test]
    async fn test_list_columns() {
        let conn = Arc::new(MockConnection::new().with_rows(vec![
            column_row(
                "id",
                Some("nextval('users_id_seq'::regclass)"),
                "NO",
                "bigint",
                None,
                Some(64),
                Some(0),
                true,
            ),
            column_row(
                "status",
                Some("'open'::character varying"),
                "YES",
                "character varying",
                Some(20),
                None,
                None,
                false,
            ),
            column_row("total", None, "YES", "numeric", None, Some(12), Some(2), false),
            column_row("seen", Some("now()"), "NO", "timestamp with time zone", None, None, None, false),
            column_row("count", Some("0"), "NO", "integer", None, Some(32), Some(0), false),
        ]));
        let d = bound(conn.clone());
        let columns = d.list_columns("users").await.unwrap();

        let id = &columns["id"];
        assert_eq!(id.sql_type, SqlType::BigInt);
        assert!(id.is_auto_increment && id.is_primary_key && !id.nullable);
        assert_eq!(id.default, None);
        assert_eq!(id.length, 0);

        assert_eq!(columns["status"].sql_type, SqlType::Varchar);
        assert_eq!(columns["status"].length, 20);
        assert_eq!(columns["status"].default.as_deref(), Some("'open'"));
        assert_eq!((columns["total"].length, columns["total"].length2), (12, 2));
        assert_eq!(columns["seen"].sql_type, SqlType::TimeStampz);
        assert_eq!(columns["seen"].default.as_deref(), Some("now()"));
        assert_eq!(columns["count"].length, 0);

        assert_eq!(conn.executed()[0].args, vec![text("public"), text("users")]);
    }

    #[tokio::test]
    async fn test_list_columns_unknown_type() {
        let conn = Arc::new(MockConnection::new().with_rows(vec![column_row(
            "span", None, "YES", "interval", None, None, None, false,
        )]));
        let d = bound(conn);
        let err = d.list_columns("events").await.unwrap_err();
        assert!(matches!(
            err,
            DialectError::UnknownColumnType { ref table, ref column, .. }
                if table == "events" && column == "span"
        ));
    }

    #[tokio::test]
    async fn test_list_indexes() {
        let conn = Arc::new(MockConnection::new().with_rows(vec![
            vec![
                text("orders_pkey"),
                text("CREATE UNIQUE INDEX orders_pkey ON public.orders USING btree (id)"),
            ],
            vec![
                text("IDX_orders_status"),
                text("CREATE INDEX \"IDX_orders_status\" ON public.orders USING btree (status, created_at DESC)"),
            ],
            vec![
                text("manual_idx"),
                text("CREATE UNIQUE INDEX manual_idx ON public.orders USING btree (\"ref\")"),
            ],
        ]));
        let d = bound(conn);
        let indexes = d.list_indexes("orders").await.unwrap();
        assert_eq!(indexes.len(), 2);
        assert_eq!(indexes["status"].columns, vec!["status", "created_at"]);
        assert!(indexes["status"].is_regular);
        assert_eq!(indexes["status"].index_type, IndexType::Regular);
        assert_eq!(indexes["manual_idx"].columns, vec!["ref"]);
        assert!(!indexes["manual_idx"].is_regular);
        assert!(indexes["manual_idx"].is_unique());
    }

    #[test]
    fn test_index_columns_parsing() {
        assert_eq!(
            index_columns("CREATE INDEX i ON t USING btree (lower((email)::text), id)"),
            vec!["lower((email)::text)", "id"]
        );
        assert!(index_columns("CREATE INDEX i ON t").is_empty());
    }

    #[test]
    fn test_index_columns_quoted_identifiers() {
        assert_eq!(
            index_columns("CREATE INDEX i ON public.t USING btree (\"first name\", id)"),
            vec!["first name", "id"]
        );
        assert_eq!(
            index_columns("CREATE INDEX i ON t USING btree (\"a,(b\" DESC, \"say \"\"hi\"\"\")"),
            vec!["a,(b", "say \"hi\""]
        );
    }

    #[test]
    fn test_reverse_type() {
        let pairs = [
            ("character varying", SqlType::Varchar),
            ("character", SqlType::Char),
            ("bigint", SqlType::BigInt),
            ("smallint", SqlType::SmallInt),
            ("integer", SqlType::Integer),
            ("text", SqlType::Text),
            ("boolean", SqlType::Bool),
            ("timestamp without time zone", SqlType::DateTime),
            ("timestamp with time zone", SqlType::TimeStampz),
            ("time without time zone", SqlType::Time),
            ("double precision", SqlType::Double),
            ("real", SqlType::Real),
            ("uuid", SqlType::Uuid),
            ("bytea", SqlType::Bytea),
            ("numeric", SqlType::Numeric),
            ("date", SqlType::Date),
            ("jsonb", SqlType::Jsonb),
            ("oid", SqlType::BigInt),
        ];
        for (data_type, expected) in pairs {
            assert_eq!(reverse_type(data_type), Some(expected), "{}", data_type);
        }
        assert_eq!(reverse_type("interval"), None);
        assert_eq!(reverse_type("USER-DEFINED"), None);
    }

    #[test]
    fn test_strip_cast() {
        assert_eq!(strip_cast("'open'::character varying"), "'open'");
        assert_eq!(strip_cast("0"), "0");
        assert_eq!(strip_cast("::weird"), "::weird");
    }

    #[test]
    fn test_strip_cast_keeps_literal_colons() {
        assert_eq!(strip_cast("'a::b'::character varying"), "'a::b'");
        assert_eq!(strip_cast("'it''s::x'::text"), "'it''s::x'");
        assert_eq!(strip_cast("'::'"), "'::'");
        assert_eq!(strip_cast("(0)::numeric"), "(0)");
    }
}
