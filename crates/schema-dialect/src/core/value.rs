//! Values exchanged with a [`Connection`](super::traits::Connection).
//!
//! Catalog queries only ever need a handful of scalar shapes, so rows are
//! decoded by the transport into [`SqlValue`] cells and read back through
//! the lenient typed accessors on [`Row`].

use serde::{Deserialize, Serialize};

use crate::error::{DialectError, Result};

/// A single bound argument or result cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SqlValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Bytes(Vec<u8>),
}

impl SqlValue {
    pub fn is_null(&self) -> bool {
        matches!(self, SqlValue::Null)
    }

    fn kind(&self) -> String {
        match self {
            SqlValue::Null => "NULL".into(),
            SqlValue::Bool(v) => format!("bool {}", v),
            SqlValue::Int(v) => format!("int {}", v),
            SqlValue::Float(v) => format!("float {}", v),
            SqlValue::Text(v) => format!("text '{}'", v),
            SqlValue::Bytes(v) => format!("{} bytes", v.len()),
        }
    }
}

impl From<&str> for SqlValue {
    fn from(v: &str) -> Self {
        SqlValue::Text(v.to_string())
    }
}

impl From<String> for SqlValue {
    fn from(v: String) -> Self {
        SqlValue::Text(v)
    }
}

impl From<i64> for SqlValue {
    fn from(v: i64) -> Self {
        SqlValue::Int(v)
    }
}

impl From<i32> for SqlValue {
    fn from(v: i32) -> Self {
        SqlValue::Int(v.into())
    }
}

impl From<bool> for SqlValue {
    fn from(v: bool) -> Self {
        SqlValue::Bool(v)
    }
}

impl<T: Into<SqlValue>> From<Option<T>> for SqlValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(SqlValue::Null, Into::into)
    }
}

/// A SQL statement with its positional arguments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statement {
    pub sql: String,
    pub args: Vec<SqlValue>,
}

impl Statement {
    pub fn new(sql: impl Into<String>, args: Vec<SqlValue>) -> Self {
        Self {
            sql: sql.into(),
            args,
        }
    }
}

/// One result row, cells in select-list order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Row {
    values: Vec<SqlValue>,
}

impl Row {
    pub fn new(values: Vec<SqlValue>) -> Self {
        Self { values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[SqlValue] {
        &self.values
    }

    /// Cell at `index`; a missing cell is a catalog shape error.
    pub fn get(&self, index: usize) -> Result<&SqlValue> {
        self.values.get(index).ok_or_else(|| {
            DialectError::Catalog(format!(
                "row has {} columns, column {} requested",
                self.values.len(),
                index
            ))
        })
    }

    /// Text value; NULL is an error.
    pub fn get_string(&self, index: usize) -> Result<String> {
        self.get_opt_string(index)?.ok_or_else(|| DialectError::Decode {
            index,
            expected: "text",
            found: "NULL".into(),
        })
    }

    /// Text value with NULL as `None`. Numbers and booleans are rendered as text.
    pub fn get_opt_string(&self, index: usize) -> Result<Option<String>> {
        match self.get(index)? {
            SqlValue::Null => Ok(None),
            SqlValue::Text(v) => Ok(Some(v.clone())),
            SqlValue::Int(v) => Ok(Some(v.to_string())),
            SqlValue::Float(v) => Ok(Some(v.to_string())),
            SqlValue::Bool(v) => Ok(Some(v.to_string())),
            SqlValue::Bytes(v) => String::from_utf8(v.clone())
                .map(Some)
                .map_err(|_| DialectError::Decode {
                    index,
                    expected: "text",
                    found: format!("{} non-UTF-8 bytes", v.len()),
                }),
        }
    }

    /// Text value with NULL as an empty string.
    pub fn get_string_or_empty(&self, index: usize) -> Result<String> {
        Ok(self.get_opt_string(index)?.unwrap_or_default())
    }

    /// Integer value; NULL is an error.
    pub fn get_i64(&self, index: usize) -> Result<i64> {
        self.get_opt_i64(index)?.ok_or_else(|| DialectError::Decode {
            index,
            expected: "integer",
            found: "NULL".into(),
        })
    }

    /// Integer value with NULL as `None`. Numeric text is parsed.
    pub fn get_opt_i64(&self, index: usize) -> Result<Option<i64>> {
        let value = self.get(index)?;
        let parsed = match value {
            SqlValue::Null => return Ok(None),
            SqlValue::Int(v) => Some(*v),
            SqlValue::Bool(v) => Some(i64::from(*v)),
            SqlValue::Float(v) if v.fract() == 0.0 => Some(*v as i64),
            SqlValue::Text(v) => v.trim().parse().ok(),
            _ => None,
        };
        parsed.map(Some).ok_or_else(|| DialectError::Decode {
            index,
            expected: "integer",
            found: value.kind(),
        })
    }

    /// Integer value narrowed to `i32`, NULL as zero.
    pub fn get_i32_or_zero(&self, index: usize) -> Result<i32> {
        let value = self.get_opt_i64(index)?.unwrap_or(0);
        i32::try_from(value).map_err(|_| DialectError::Decode {
            index,
            expected: "32-bit integer",
            found: value.to_string(),
        })
    }

    /// Boolean value. Accepts integers, `YES`/`NO`, `Y`/`N` and `true`/`false`.
    /// NULL reads as `false`.
    pub fn get_bool(&self, index: usize) -> Result<bool> {
        let value = self.get(index)?;
        let parsed = match value {
            SqlValue::Null => Some(false),
            SqlValue::Bool(v) => Some(*v),
            SqlValue::Int(v) => Some(*v != 0),
            SqlValue::Text(v) => match v.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "t" | "yes" | "y" => Some(true),
                "0" | "false" | "f" | "no" | "n" | "" => Some(false),
                _ => None,
            },
            _ => None,
        };
        parsed.ok_or_else(|| DialectError::Decode {
            index,
            expected: "boolean",
            found: value.kind(),
        })
    }
}

impl From<Vec<SqlValue>> for Row {
    fn from(values: Vec<SqlValue>) -> Self {
        Self::new(values)
    }
}
