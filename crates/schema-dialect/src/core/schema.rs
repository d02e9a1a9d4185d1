//! Schema metadata types for tables, columns and indexes.
//!
//! These are transient value objects: the database catalog is the source of
//! truth, and every dialect produces and consumes the same representation.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::types::SqlType;

/// Prefix of regular index names generated by the naming convention.
pub const REGULAR_INDEX_PREFIX: &str = "IDX_";
/// Prefix of unique index names generated by the naming convention.
pub const UNIQUE_INDEX_PREFIX: &str = "UQE_";

/// Column metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    /// Column name.
    pub name: String,

    /// Logical type.
    pub sql_type: SqlType,

    /// Length, or precision for precision/scale types.
    pub length: i32,

    /// Secondary length (scale).
    pub length2: i32,

    /// Whether the column accepts NULL.
    pub nullable: bool,

    /// Default expression. `None` means no default; `Some("NULL")` is an
    /// explicit NULL default.
    pub default: Option<String>,

    /// Whether the column belongs to the primary key.
    pub is_primary_key: bool,

    /// Whether the column is auto-incremented by the database.
    pub is_auto_increment: bool,

    /// Index memberships: index name to the column's position in that index.
    #[serde(default)]
    pub indexes: IndexMap<String, usize>,

    /// Allowed values of ENUM and SET columns.
    #[serde(default)]
    pub enum_options: Vec<String>,

    /// Column comment, when the catalog exposes one.
    #[serde(default)]
    pub comment: Option<String>,
}

impl Column {
    /// Create a nullable column with the type's default lengths.
    pub fn new(name: impl Into<String>, sql_type: SqlType) -> Self {
        let (length, length2) = sql_type.default_lengths();
        Self {
            name: name.into(),
            sql_type,
            length,
            length2,
            nullable: true,
            default: None,
            is_primary_key: false,
            is_auto_increment: false,
            indexes: IndexMap::new(),
            enum_options: Vec::new(),
            comment: None,
        }
    }

    pub fn with_length(mut self, length: i32) -> Self {
        self.length = length;
        self
    }

    pub fn with_precision(mut self, precision: i32, scale: i32) -> Self {
        self.length = precision;
        self.length2 = scale;
        self
    }

    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }

    pub fn with_options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.enum_options = options.into_iter().map(Into::into).collect();
        self
    }

    pub fn not_null(mut self) -> Self {
        self.nullable = false;
        self
    }

    /// Mark as primary key. Primary key columns are never nullable.
    pub fn primary_key(mut self) -> Self {
        self.is_primary_key = true;
        self.nullable = false;
        self
    }

    pub fn auto_increment(mut self) -> Self {
        self.is_auto_increment = true;
        self
    }

    /// Default expression if one is set and non-empty.
    pub fn default_expr(&self) -> Option<&str> {
        self.default.as_deref().filter(|d| !d.is_empty())
    }

    /// Rewrite a boolean literal default into the product's literals.
    pub fn normalize_bool_default(&mut self, true_literal: &str, false_literal: &str) {
        let replacement = match self.default.as_deref() {
            Some(d) if d.eq_ignore_ascii_case("true") => true_literal,
            Some(d) if d.eq_ignore_ascii_case("false") => false_literal,
            _ => return,
        };
        self.default = Some(replacement.to_string());
    }

    /// Serial types imply an auto-incremented, non-null primary key.
    pub(crate) fn mark_serial(&mut self) {
        self.is_auto_increment = true;
        self.is_primary_key = true;
        self.nullable = false;
    }
}

/// Table metadata with columns kept in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Table {
    /// Table name.
    pub name: String,

    columns: IndexMap<String, Column>,

    primary_keys: Vec<String>,

    /// Indexes by name.
    #[serde(default)]
    pub indexes: IndexMap<String, Index>,

    /// Storage engine (MySQL).
    #[serde(default)]
    pub store_engine: Option<String>,

    /// Default character set.
    #[serde(default)]
    pub charset: Option<String>,

    /// Table comment.
    #[serde(default)]
    pub comment: Option<String>,
}

impl Table {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Append a column, replacing any column with the same name in place.
    pub fn add_column(&mut self, column: Column) {
        let name = column.name.clone();
        let is_pk = column.is_primary_key;
        self.columns.insert(name.clone(), column);
        self.track_primary_key(&name, is_pk);
    }

    /// Builder form of [`Table::add_column`].
    pub fn with_column(mut self, column: Column) -> Self {
        self.add_column(column);
        self
    }

    /// Replace all columns, recomputing the primary key from column flags.
    pub fn set_columns(&mut self, columns: IndexMap<String, Column>) {
        self.primary_keys = columns
            .values()
            .filter(|c| c.is_primary_key)
            .map(|c| c.name.clone())
            .collect();
        self.columns = columns;
    }

    pub fn add_index(&mut self, index: Index) {
        self.indexes.insert(index.name.clone(), index);
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.get(name)
    }

    pub fn column_mut(&mut self, name: &str) -> Option<&mut Column> {
        self.columns.get_mut(name)
    }

    /// Columns in declaration order.
    pub fn columns(&self) -> impl Iterator<Item = &Column> {
        self.columns.values()
    }

    pub fn columns_mut(&mut self) -> impl Iterator<Item = &mut Column> {
        self.columns.values_mut()
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Primary key column names in key order.
    pub fn primary_keys(&self) -> &[String] {
        &self.primary_keys
    }

    fn track_primary_key(&mut self, name: &str, is_pk: bool) {
        let listed = self.primary_keys.iter().position(|k| k == name);
        match (is_pk, listed) {
            (true, None) => self.primary_keys.push(name.to_string()),
            (false, Some(pos)) => {
                self.primary_keys.remove(pos);
            }
            _ => {}
        }
    }
}

/// Index kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum IndexType {
    #[default]
    Regular,
    Unique,
}

impl IndexType {
    pub fn prefix(self) -> &'static str {
        match self {
            IndexType::Regular => REGULAR_INDEX_PREFIX,
            IndexType::Unique => UNIQUE_INDEX_PREFIX,
        }
    }
}

/// Index metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Index {
    /// Index name, without the convention prefix when `is_regular` is set.
    pub name: String,

    pub index_type: IndexType,

    /// Member columns in key order.
    pub columns: Vec<String>,

    /// True when the catalog name followed the `IDX_<table>_` / `UQE_<table>_`
    /// convention and was stripped back to its short form.
    pub is_regular: bool,
}

impl Index {
    pub fn new(name: impl Into<String>, index_type: IndexType) -> Self {
        Self {
            name: name.into(),
            index_type,
            columns: Vec::new(),
            is_regular: true,
        }
    }

    /// Build an index from a name read out of the catalog.
    ///
    /// Convention names are stripped to their short form and marked regular;
    /// anything else is kept verbatim and marked not regular.
    pub fn from_catalog_name(table_name: &str, catalog_name: &str, index_type: IndexType) -> Self {
        match strip_convention_prefix(catalog_name, table_name) {
            Some(short) => Self::new(short, index_type),
            None => Self {
                is_regular: false,
                ..Self::new(catalog_name, index_type)
            },
        }
    }

    pub fn add_column(&mut self, column: impl Into<String>) {
        self.columns.push(column.into());
    }

    pub fn is_unique(&self) -> bool {
        self.index_type == IndexType::Unique
    }

    /// Expanded name as stored in the database.
    pub fn x_name(&self, table_name: &str) -> String {
        if self.name.starts_with(REGULAR_INDEX_PREFIX) || self.name.starts_with(UNIQUE_INDEX_PREFIX)
        {
            return self.name.clone();
        }
        format!(
            "{}{}_{}",
            self.index_type.prefix(),
            table_name.replace('.', "_"),
            self.name
        )
    }

    /// Name used in DDL: the expanded name for regular indexes, otherwise verbatim.
    pub fn ddl_name(&self, table_name: &str) -> String {
        if self.is_regular {
            self.x_name(table_name)
        } else {
            self.name.clone()
        }
    }
}

/// Strip `IDX_<table>_` or `UQE_<table>_` from an index name.
///
/// Returns `None` unless the whole prefix matches and a non-empty short name
/// remains.
pub fn strip_convention_prefix<'a>(index_name: &'a str, table_name: &str) -> Option<&'a str> {
    let table_name = table_name.replace('.', "_");
    [REGULAR_INDEX_PREFIX, UNIQUE_INDEX_PREFIX]
        .iter()
        .find_map(|prefix| {
            index_name
                .strip_prefix(prefix)?
                .strip_prefix(table_name.as_str())?
                .strip_prefix('_')
        })
        .filter(|rest| !rest.is_empty())
}
