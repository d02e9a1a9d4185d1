//! MySQL/MariaDB SQL dialect.
//!
//! Backtick quoting, `AUTO_INCREMENT`, and table options (`ENGINE`,
//! `DEFAULT CHARSET`, `ROW_FORMAT`) on `CREATE TABLE`. Catalog reflection
//! reads `INFORMATION_SCHEMA` scoped to the connected database.

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

// Catalog columns are CAST to CHAR so binary collations still decode as text.
const LIST_TABLES_SQL: &str = "SELECT CAST(`TABLE_NAME` AS CHAR), CAST(`ENGINE` AS CHAR), \
     CAST(`TABLE_COMMENT` AS CHAR) FROM `INFORMATION_SCHEMA`.`TABLES` \
     WHERE `TABLE_SCHEMA` = ? AND `TABLE_TYPE` = 'BASE TABLE' ORDER BY `TABLE_NAME`";

const LIST_COLUMNS_SQL: &str = "SELECT CAST(`COLUMN_NAME` AS CHAR), CAST(`IS_NULLABLE` AS CHAR), \
     CAST(`COLUMN_DEFAULT` AS CHAR), CAST(`COLUMN_TYPE` AS CHAR), CAST(`COLUMN_KEY` AS CHAR), \
     CAST(`EXTRA` AS CHAR), CAST(`COLUMN_COMMENT` AS CHAR) \
     FROM `INFORMATION_SCHEMA`.`COLUMNS` WHERE `TABLE_SCHEMA` = ? AND `TABLE_NAME` = ? \
     ORDER BY `ORDINAL_POSITION`";

const LIST_INDEXES_SQL: &str = "SELECT CAST(`INDEX_NAME` AS CHAR), CAST(`NON_UNIQUE` AS CHAR), \
     CAST(`COLUMN_NAME` AS CHAR) FROM `INFORMATION_SCHEMA`.`STATISTICS` \
     WHERE `TABLE_SCHEMA` = ? AND `TABLE_NAME` = ? ORDER BY `INDEX_NAME`, `SEQ_IN_INDEX`";

/// MySQL dialect implementation.
#[derive(Debug, Clone, Default)]
pub struct MysqlDialect {
    base: DialectBase,
}

impl MysqlDialect {
    /// Create a new, unbound MySQL dialect.
    pub fn new() -> Self {
        Self::default()
    }

    /// `ROW_FORMAT` table option, from the `rowFormat` parameter.
    pub fn row_format(&self) -> Option<&str> {
        self.base.param("rowFormat")
    }
}

#[async_trait]
impl Dialect for MysqlDialect {
    fn base(&self) -> &DialectBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut DialectBase {
        &mut self.base
    }

    fn db_type(&self) -> DbType {
        DbType::Mysql
    }

    fn sql_type(&self, column: &mut Column) -> String {
        let native = match column.sql_type {
            SqlType::Bool | SqlType::Boolean => {
                column.normalize_bool_default("1", "0");
                column.length = 1;
                column.length2 = 0;
                "TINYINT"
            }
            SqlType::Serial => {
                column.mark_serial();
                "INT"
            }
            SqlType::BigSerial => {
                column.mark_serial();
                "BIGINT"
            }
            SqlType::Bytea => "BLOB",
            SqlType::TimeStampz => {
                column.length = 64;
                "CHAR"
            }
            SqlType::Enum | SqlType::Set => {
                return format!(
                    "{}({})",
                    column.sql_type.name(),
                    quoted_options(&column.enum_options)
                );
            }
            SqlType::NVarchar => "VARCHAR",
            SqlType::Uuid | SqlType::UniqueIdentifier => {
                column.length = 40;
                "VARCHAR"
            }
            SqlType::Json | SqlType::Jsonb | SqlType::Xml => "TEXT",
            SqlType::NText | SqlType::Clob => "LONGTEXT",
            SqlType::SmallDateTime => "DATETIME",
            other => other.name(),
        };

        if native == "BIGINT" && column.length == 0 && column.length2 == 0 {
            column.length = 20;
        }
        with_lengths(native, column.length, column.length2)
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
        true
    }

    fn supports_charset(&self) -> bool {
        true
    }

    fn index_on_table(&self) -> bool {
        true
    }

    fn auto_increment_clause(&self) -> &'static str {
        "AUTO_INCREMENT"
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
        store_engine: Option<&str>,
        charset: Option<&str>,
    ) -> String {
        let name = table_name
            .filter(|n| !n.is_empty())
            .unwrap_or(&table.name)
            .to_string();
        let store_engine = store_engine
            .or(table.store_engine.as_deref())
            .filter(|e| !e.is_empty())
            .map(str::to_string);
        let charset = charset
            .or(table.charset.as_deref())
            .or_else(|| self.base.uri().and_then(|u| u.charset.as_deref()))
            .filter(|c| !c.is_empty())
            .map(str::to_string);
        let comment = table.comment.clone().filter(|c| !c.is_empty());

        let mut sql = format!(
            "CREATE TABLE IF NOT EXISTS {} {}",
            self.quote(&name),
            create_table_body(self, table, true)
        );
        if let Some(engine) = store_engine {
            sql.push_str(" ENGINE=");
            sql.push_str(&engine);
        }
        if let Some(charset) = charset {
            sql.push_str(" DEFAULT CHARSET ");
            sql.push_str(&charset);
        }
        if let Some(row_format) = self.row_format() {
            sql.push_str(" ROW_FORMAT=");
            sql.push_str(row_format);
        }
        if let Some(comment) = comment {
            sql.push_str(&format!(" COMMENT='{}'", comment.replace('\'', "''")));
        }
        sql
    }

    fn for_update_clause(&self, query: &str) -> String {
        format!("{} FOR UPDATE", query)
    }

    fn index_exists_statement(&self, table_name: &str, index_name: &str) -> Statement {
        Statement::new(
            "SELECT `INDEX_NAME` FROM `INFORMATION_SCHEMA`.`STATISTICS` \
             WHERE `TABLE_SCHEMA` = ? AND `TABLE_NAME` = ? AND `INDEX_NAME` = ?",
            vec![
                self.base.db_name().into(),
                table_name.into(),
                index_name.into(),
            ],
        )
    }

    fn table_exists_statement(&self, table_name: &str) -> Statement {
        Statement::new(
            "SELECT `TABLE_NAME` FROM `INFORMATION_SCHEMA`.`TABLES` \
             WHERE `TABLE_SCHEMA` = ? AND `TABLE_NAME` = ?",
            vec![self.base.db_name().into(), table_name.into()],
        )
    }

    fn column_exists_statement(&self, table_name: &str, column_name: &str) -> Statement {
        Statement::new(
            "SELECT `COLUMN_NAME` FROM `INFORMATION_SCHEMA`.`COLUMNS` \
             WHERE `TABLE_SCHEMA` = ? AND `TABLE_NAME` = ? AND `COLUMN_NAME` = ?",
            vec![
                self.base.db_name().into(),
                table_name.into(),
                column_name.into(),
            ],
        )
    }

    async fn list_tables(&self) -> Result<Vec<Table>> {
        let stmt = Statement::new(LIST_TABLES_SQL, vec![self.base.db_name().into()]);
        let rows = fetch(self, &stmt).await?;
        rows.iter()
            .map(|row| {
                let mut table = Table::new(trim_name(&row.get_string(0)?));
                table.store_engine = row.get_opt_string(1)?.filter(|e| !e.is_empty());
                table.comment = row.get_opt_string(2)?.filter(|c| !c.is_empty());
                Ok(table)
            })
            .collect()
    }

    async fn list_columns(&self, table_name: &str) -> Result<IndexMap<String, Column>> {
        let stmt = Statement::new(
            LIST_COLUMNS_SQL,
            vec![self.base.db_name().into(), table_name.into()],
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
            vec![self.base.db_name().into(), table_name.into()],
        );
        let rows = fetch(self, &stmt).await?;

        let mut indexes: IndexMap<String, Index> = IndexMap::new();
        for row in &rows {
            let index_name = trim_name(&row.get_string(0)?);
            if index_name == "PRIMARY" {
                continue;
            }
            let index_type = if row.get_string_or_empty(1)? == "0" {
                IndexType::Unique
            } else {
                IndexType::Regular
            };
            let column_name = trim_name(&row.get_string(2)?);

            let index = Index::from_catalog_name(table_name, &index_name, index_type);
            indexes
                .entry(index.name.clone())
                .or_insert(index)
                .add_column(column_name);
        }
        Ok(indexes)
    }
}

fn quoted_options(options: &[String]) -> String {
    options
        .iter()
        .map(|o| format!("'{}'", o.replace('\'', "''")))
        .collect::<Vec<_>>()
        .join(",")
}

fn column_from_row(table_name: &str, row: &Row) -> Result<Column> {
    let name = trim_name(&row.get_string(0)?);
    let nullable = row.get_string_or_empty(1)?.eq_ignore_ascii_case("YES");
    let raw_default = row.get_opt_string(2)?;
    let column_type = row.get_string_or_empty(3)?;
    let column_key = row.get_string_or_empty(4)?;
    let extra = row.get_string_or_empty(5)?;
    let comment = row.get_opt_string(6)?.filter(|c| !c.is_empty());

    let parsed = ColumnType::parse(&column_type);
    let sql_type = parsed
        .sql_type()
        .ok_or_else(|| DialectError::unknown_type(table_name, &name, column_type.to_uppercase()))?;

    let mut column = Column::new(name, sql_type);
    column.nullable = nullable;
    column.is_primary_key = column_key == "PRI";
    column.is_auto_increment = extra.to_lowercase().contains("auto_increment");
    column.comment = comment;

    match sql_type {
        SqlType::Bool => (column.length, column.length2) = (0, 0),
        SqlType::Enum | SqlType::Set => column.enum_options = parsed.options,
        _ => (column.length, column.length2) = (parsed.length, parsed.length2),
    }

    column.default = raw_default.map(|d| quote_default(sql_type, d));
    Ok(column)
}

/// Text and time literals come back unquoted; functions stay as they are.
fn quote_default(sql_type: SqlType, default: String) -> String {
    if default.starts_with('\'') {
        return default;
    }
    let is_function = default.contains('(') || default.to_uppercase().starts_with("CURRENT_");
    if sql_type.is_text() || (sql_type.is_time() && !is_function) {
        format!("'{}'", default.replace('\'', "''"))
    } else {
        default
    }
}

/// Parsed `COLUMN_TYPE`, e.g. `int(11) unsigned` or `enum('a','b')`.
#[derive(Debug, Default, PartialEq)]
struct ColumnType {
    name: String,
    length: i32,
    length2: i32,
    options: Vec<String>,
}

impl ColumnType {
    fn parse(column_type: &str) -> Self {
        let column_type = column_type.trim();
        let (name, args) = match column_type.split_once('(') {
            Some((name, rest)) => (name, rest.rsplit_once(')').map(|(args, _)| args)),
            None => (
                column_type.split_whitespace().next().unwrap_or_default(),
                None,
            ),
        };
        let name = name.trim().to_uppercase();

        let mut parsed = ColumnType {
            name,
            ..Default::default()
        };
        let Some(args) = args else {
            return parsed;
        };

        if args.trim_start().starts_with('\'') {
            parsed.options = enum_options(args);
        } else {
            let mut lengths = args.split(',').map(|l| l.trim().parse().unwrap_or(0));
            parsed.length = lengths.next().unwrap_or(0);
            parsed.length2 = lengths.next().unwrap_or(0);
        }
        parsed
    }

    fn sql_type(&self) -> Option<SqlType> {
        if self.name == "TINYINT" && self.length == 1 {
            return Some(SqlType::Bool);
        }
        SqlType::from_name(&self.name)
    }
}

/// Quoted ENUM/SET members: `'a,b','it''s'` -> `["a,b", "it's"]`.
fn enum_options(args: &str) -> Vec<String> {
    let mut options = Vec::new();
    let mut current = String::new();
    let mut quoted = false;
    let mut chars = args.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\'' if quoted && chars.peek() == Some(&'\'') => {
                chars.next();
                current.push('\'');
            }
            '\'' => quoted = !quoted,
            ',' if !quoted => options.push(std::mem::take(&mut current)),
            c if quoted => current.push(c),
            _ => {}
        }
    }
    options.push(current);
    options
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::uri::Uri;
    use crate::core::value::SqlValue;
    use crate::testing::{text, MockConnection};
    use std::collections::HashMap;
    use std::sync::Arc;

    fn bound(conn: Arc<MockConnection>) -> MysqlDialect {
        let mut uri = Uri::new(DbType::Mysql, "shop");
        uri.charset = Some("utf8mb4".into());
        let mut dialect = MysqlDialect::new();
        dialect
            .init(conn, uri, "mysql", "app@tcp(localhost:3306)/shop")
            .unwrap();
        dialect
    }

    fn column_row(
        name: &str,
        nullable: &str,
        default: Option<&str>,
        column_type: &str,
        key: &str,
        extra: &str,
    ) -> Vec<SqlValue> {
        vec![
            text(name),
            text(nullable),
            default.map_or(SqlValue::Null, text),
            text(column_type),
            text(key),
            text(extra),
            text(""),
        ]
    }

    #[test]
    fn test_sql_type_mapping() {
        let d = MysqlDialect::new();
        let cases = [
            (Column::new("a", SqlType::Bool), "TINYINT(1)"),
            (Column::new("a", SqlType::BigInt), "BIGINT(20)"),
            (Column::new("a", SqlType::BigInt).with_length(11), "BIGINT(11)"),
            (Column::new("a", SqlType::Int), "INT"),
            (Column::new("a", SqlType::Bytea), "BLOB"),
            (Column::new("a", SqlType::TimeStampz), "CHAR(64)"),
            (Column::new("a", SqlType::NVarchar), "VARCHAR(255)"),
            (Column::new("a", SqlType::Uuid), "VARCHAR(40)"),
            (Column::new("a", SqlType::Json), "TEXT"),
            (Column::new("a", SqlType::Decimal).with_precision(10, 2), "DECIMAL(10,2)"),
            (Column::new("a", SqlType::DateTime), "DATETIME"),
            (
                Column::new("a", SqlType::Enum).with_options(["draft", "it's live"]),
                "ENUM('draft','it''s live')",
            ),
            (Column::new("a", SqlType::Set).with_options(["x", "y"]), "SET('x','y')"),
        ];
        for (mut column, expected) in cases {
            assert_eq!(d.sql_type(&mut column), expected, "{:?}", column.sql_type);
        }
    }

    #[test]
    fn test_bool_default_normalized() {
        let d = MysqlDialect::new();
        let mut col = Column::new("age", SqlType::Bool).with_default("true");
        assert_eq!(d.sql_type(&mut col), "TINYINT(1)");
        assert_eq!(col.default.as_deref(), Some("1"));
    }

    #[test]
    fn test_serial_becomes_key() {
        let d = MysqlDialect::new();
        let mut col = Column::new("id", SqlType::BigSerial);
        assert_eq!(d.sql_type(&mut col), "BIGINT(20)");
        assert!(col.is_auto_increment && col.is_primary_key && !col.nullable);
    }

    #[test]
    fn test_quote_and_reserved() {
        let d = MysqlDialect::new();
        assert_eq!(d.quote("order"), "`order`");
        assert_eq!(d.quote(&d.quote("a")), "``a``");
        assert!(d.is_reserved("order"));
        assert!(d.is_reserved("KEY"));
        assert!(!d.is_reserved("orders"));
        assert!(!d.is_reserved(""));
    }

    #[test]
    fn test_create_table_with_options() {
        let conn = Arc::new(MockConnection::new());
        let mut d = bound(conn);
        d.set_params(HashMap::from([("rowFormat".to_string(), "DYNAMIC".to_string())]));

        let mut table = Table::new("users")
            .with_column(
                Column::new("id", SqlType::BigInt)
                    .primary_key()
                    .auto_increment(),
            )
            .with_column(Column::new("name", SqlType::Varchar).with_length(64).not_null())
            .with_column(Column::new("active", SqlType::Bool).with_default("false"));

        assert_eq!(
            d.create_table_statement(&mut table, None, Some("InnoDB"), None),
            "CREATE TABLE IF NOT EXISTS `users` (`id` BIGINT(20) PRIMARY KEY AUTO_INCREMENT NOT NULL, \
             `name` VARCHAR(64) NOT NULL, `active` TINYINT(1) DEFAULT 0 NULL) \
             ENGINE=InnoDB DEFAULT CHARSET utf8mb4 ROW_FORMAT=DYNAMIC"
        );
    }

    #[test]
    fn test_create_table_composite_key_and_override_name() {
        let d = MysqlDialect::new();
        let mut table = Table::new("order_items")
            .with_column(Column::new("order_id", SqlType::BigInt).primary_key())
            .with_column(Column::new("line", SqlType::Int).primary_key())
            .with_column(Column::new("qty", SqlType::Int).not_null().with_default("1"));
        table.comment = Some("line items".into());

        assert_eq!(
            d.create_table_statement(&mut table, Some("order_items_v2"), None, Some("latin1")),
            "CREATE TABLE IF NOT EXISTS `order_items_v2` (`order_id` BIGINT(20) NOT NULL, \
             `line` INT NOT NULL, `qty` INT DEFAULT 1 NOT NULL, PRIMARY KEY ( `order_id`,`line` )) \
             DEFAULT CHARSET latin1 COMMENT='line items'"
        );
    }

    #[test]
    fn test_ddl_helpers() {
        let d = MysqlDialect::new();
        assert_eq!(d.drop_table_statement("users"), "DROP TABLE IF EXISTS `users`");
        assert_eq!(d.for_update_clause("SELECT 1"), "SELECT 1 FOR UPDATE");
        assert_eq!(d.param_placeholder(2), "?");

        let mut index = Index::new("status", IndexType::Regular);
        index.add_column("status");
        index.add_column("created_at");
        assert_eq!(
            d.create_index_statement("orders", &index),
            "CREATE INDEX `IDX_orders_status` ON `orders` (`status`,`created_at`)"
        );
        assert_eq!(
            d.drop_index_statement("orders", &index),
            "DROP INDEX `IDX_orders_status` ON `orders`"
        );

        let mut col = Column::new("note", SqlType::Varchar).with_length(500);
        assert_eq!(
            d.modify_column_statement("orders", &mut col).unwrap(),
            "ALTER TABLE `orders` MODIFY COLUMN `note` VARCHAR(500) NULL"
        );
        assert_eq!(
            d.add_column_statement("orders", &mut col),
            "ALTER TABLE `orders` ADD `note` VARCHAR(500) NULL"
        );
    }

    #[test]
    fn test_existence_statements_use_database() {
        let d = bound(Arc::new(MockConnection::new()));
        let stmt = d.column_exists_statement("users", "email");
        assert_eq!(stmt.args, vec![text("shop"), text("users"), text("email")]);
        assert_eq!(d.table_exists_statement("users").args.len(), 2);
    }

    #[tokio::test]
    async fn test_list_tables() {
        let conn = Arc::new(MockConnection::new().with_rows(vec![
            vec![text("orders"), text("InnoDB"), text("")],
            vec![text("users"), text("MyISAM"), text("people")],
        ]));
        let d = bound(conn.clone());
        let tables = d.list_tables().await.unwrap();
        assert_eq!(tables.len(), 2);
        assert_eq!(tables[0].store_engine.as_deref(), Some("InnoDB"));
        assert_eq!(tables[0].comment, None);
        assert_eq!(tables[1].comment.as_deref(), Some("people"));
        assert_eq!(conn.executed()[0].args, vec![text("shop")]);
    }

    #[tokio::test]
    async fn test_list_columns() {
        let conn = Arc::new(MockConnection::new().with_rows(vec![
            column_row("id", "NO", None, "bigint(20) unsigned", "PRI", "auto_increment"),
            column_row("name", "YES", Some("anon"), "varchar(64)", "", ""),
            column_row("active", "NO", Some("1"), "tinyint(1)", "", ""),
            column_row("price", "NO", Some("0.00"), "decimal(10,2)", "", ""),
            column_row("state", "NO", Some("draft"), "enum('draft','live')", "", ""),
            column_row("created", "NO", Some("CURRENT_TIMESTAMP"), "datetime", "", ""),
            column_row("ratio", "YES", None, "double unsigned", "", ""),
        ]));
        let d = bound(conn);
        let columns = d.list_columns("products").await.unwrap();
        let names: Vec<_> = columns.keys().cloned().collect();
        assert_eq!(
            names,
            vec!["id", "name", "active", "price", "state", "created", "ratio"]
        );

        let id = &columns["id"];
        assert_eq!(id.sql_type, SqlType::BigInt);
        assert_eq!(id.length, 20);
        assert!(id.is_primary_key && id.is_auto_increment && !id.nullable);

        assert_eq!(columns["name"].default.as_deref(), Some("'anon'"));
        assert_eq!(columns["active"].sql_type, SqlType::Bool);
        assert_eq!(columns["active"].length, 0);
        assert_eq!((columns["price"].length, columns["price"].length2), (10, 2));
        assert_eq!(columns["state"].sql_type, SqlType::Enum);
        assert_eq!(columns["state"].enum_options, vec!["draft", "live"]);
        assert_eq!(columns["state"].default.as_deref(), Some("'draft'"));
        assert_eq!(columns["created"].default.as_deref(), Some("CURRENT_TIMESTAMP"));
        assert_eq!(columns["ratio"].sql_type, SqlType::Double);
    }

    #[tokio::test]
    async fn test_list_columns_unknown_type() {
        let conn = Arc::new(MockConnection::new().with_rows(vec![
            column_row("id", "NO", None, "int(11)", "PRI", ""),
            column_row("shape", "YES", None, "geometry", "", ""),
        ]));
        let d = bound(conn);
        let err = d.list_columns("places").await.unwrap_err();
        assert!(matches!(
            err,
            DialectError::UnknownColumnType { ref table, ref column, ref native_type }
                if table == "places" && column == "shape" && native_type == "GEOMETRY"
        ));
    }

    #[tokio::test]
    async fn test_list_indexes() {
        let conn = Arc::new(MockConnection::new().with_rows(vec![
            vec![text("IDX_orders_status"), text("1"), text("status")],
            vec![text("IDX_orders_status"), text("1"), text("created_at")],
            vec![text("PRIMARY"), text("0"), text("id")],
            vec![text("manual_idx"), text("0"), text("ref")],
        ]));
        let d = bound(conn);
        let indexes = d.list_indexes("orders").await.unwrap();
        assert_eq!(indexes.len(), 2);
        let status = &indexes["status"];
        assert!(status.is_regular);
        assert_eq!(status.index_type, IndexType::Regular);
        assert_eq!(status.columns, vec!["status", "created_at"]);
        let manual = &indexes["manual_idx"];
        assert!(!manual.is_regular);
        assert!(manual.is_unique());
    }

    #[test]
    fn test_column_type_parsing() {
        assert_eq!(
            ColumnType::parse("int(11) unsigned"),
            ColumnType {
                name: "INT".into(),
                length: 11,
                ..Default::default()
            }
        );
        assert_eq!(ColumnType::parse("float unsigned").name, "FLOAT");
        assert_eq!(ColumnType::parse("set('a','b')").options, vec!["a", "b"]);
        assert_eq!(ColumnType::parse("tinyint(1)").sql_type(), Some(SqlType::Bool));
        assert_eq!(ColumnType::parse("tinyint(4)").sql_type(), Some(SqlType::TinyInt));
    }

    #[test]
    fn test_enum_options_with_commas_and_quotes() {
        let parsed = ColumnType::parse("enum('a,b','c')");
        assert_eq!(parsed.options, vec!["a,b", "c"]);

        let parsed = ColumnType::parse("set('it''s','x)y','')");
        assert_eq!(parsed.options, vec!["it's", "x)y", ""]);

        let d = MysqlDialect::new();
        let options = ColumnType::parse("enum('a,b','c')").options;
        let mut column = Column::new("state", SqlType::Enum).with_options(options);
        assert_eq!(d.sql_type(&mut column), "ENUM('a,b','c')");
    }

    #[test]
    fn test_native_type_round_trip() {
        let d = MysqlDialect::new();
        let lossless = [
            SqlType::Bool,
            SqlType::Int,
            SqlType::BigInt,
            SqlType::Varchar,
            SqlType::Text,
            SqlType::DateTime,
            SqlType::Decimal,
            SqlType::Blob,
            SqlType::Double,
        ];
        for logical in lossless {
            let mut column = Column::new("c", logical);
            let native = d.sql_type(&mut column).to_lowercase();
            assert_eq!(ColumnType::parse(&native).sql_type(), Some(logical), "{}", native);
        }

        let lossy = [
            (SqlType::Bytea, SqlType::Blob),
            (SqlType::NVarchar, SqlType::Varchar),
            (SqlType::Uuid, SqlType::Varchar),
            (SqlType::Json, SqlType::Text),
            (SqlType::TimeStampz, SqlType::Char),
        ];
        for (logical, recovered) in lossy {
            let mut column = Column::new("c", logical);
            let native = d.sql_type(&mut column);
            assert_eq!(ColumnType::parse(&native).sql_type(), Some(recovered), "{}", native);
        }
    }
}
