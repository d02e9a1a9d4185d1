//! Logical column type vocabulary shared by every dialect.
//!
//! A [`SqlType`] names an engine-agnostic type. Dialects translate it to a
//! native type fragment when rendering DDL and map catalog type names back
//! to it when reflecting a schema.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DialectError;

/// Broad family of a logical type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeCategory {
    Text,
    Blob,
    Time,
    Numeric,
    Bool,
    Json,
    Xml,
}

macro_rules! sql_types {
    ($($variant:ident => $name:literal, $category:ident;)+) => {
        /// Logical SQL type.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "UPPERCASE")]
        pub enum SqlType {
            $($variant,)+
        }

        impl SqlType {
            /// Every type in the vocabulary.
            pub const ALL: &'static [SqlType] = &[$(SqlType::$variant,)+];

            /// Canonical upper-case name.
            pub const fn name(self) -> &'static str {
                match self {
                    $(SqlType::$variant => $name,)+
                }
            }

            pub const fn category(self) -> TypeCategory {
                match self {
                    $(SqlType::$variant => TypeCategory::$category,)+
                }
            }
        }
    };
}

sql_types! {
    Bit => "BIT", Numeric;
    TinyInt => "TINYINT", Numeric;
    SmallInt => "SMALLINT", Numeric;
    MediumInt => "MEDIUMINT", Numeric;
    Int => "INT", Numeric;
    Integer => "INTEGER", Numeric;
    BigInt => "BIGINT", Numeric;
    Serial => "SERIAL", Numeric;
    BigSerial => "BIGSERIAL", Numeric;

    Enum => "ENUM", Text;
    Set => "SET", Text;
    Char => "CHAR", Text;
    Varchar => "VARCHAR", Text;
    NChar => "NCHAR", Text;
    NVarchar => "NVARCHAR", Text;
    TinyText => "TINYTEXT", Text;
    Text => "TEXT", Text;
    NText => "NTEXT", Text;
    Clob => "CLOB", Text;
    MediumText => "MEDIUMTEXT", Text;
    LongText => "LONGTEXT", Text;
    Uuid => "UUID", Text;
    SysName => "SYSNAME", Text;

    Date => "DATE", Time;
    DateTime => "DATETIME", Time;
    SmallDateTime => "SMALLDATETIME", Time;
    Time => "TIME", Time;
    TimeStamp => "TIMESTAMP", Time;
    TimeStampz => "TIMESTAMPZ", Time;
    Year => "YEAR", Time;

    Decimal => "DECIMAL", Numeric;
    Numeric => "NUMERIC", Numeric;
    Money => "MONEY", Numeric;
    SmallMoney => "SMALLMONEY", Numeric;
    Real => "REAL", Numeric;
    Float => "FLOAT", Numeric;
    Double => "DOUBLE", Numeric;

    Binary => "BINARY", Blob;
    VarBinary => "VARBINARY", Blob;
    TinyBlob => "TINYBLOB", Blob;
    Blob => "BLOB", Blob;
    MediumBlob => "MEDIUMBLOB", Blob;
    LongBlob => "LONGBLOB", Blob;
    Bytea => "BYTEA", Blob;
    UniqueIdentifier => "UNIQUEIDENTIFIER", Blob;

    Bool => "BOOL", Bool;
    Boolean => "BOOLEAN", Bool;

    Json => "JSON", Json;
    Jsonb => "JSONB", Json;

    Xml => "XML", Xml;
}

impl SqlType {
    /// Look up a type by its canonical name, case-insensitively.
    pub fn from_name(name: &str) -> Option<Self> {
        let upper = name.trim().to_ascii_uppercase();
        Self::ALL.iter().copied().find(|t| t.name() == upper)
    }

    pub fn is_text(self) -> bool {
        self.category() == TypeCategory::Text
    }

    pub fn is_blob(self) -> bool {
        self.category() == TypeCategory::Blob
    }

    pub fn is_time(self) -> bool {
        self.category() == TypeCategory::Time
    }

    pub fn is_numeric(self) -> bool {
        self.category() == TypeCategory::Numeric
    }

    pub fn is_bool(self) -> bool {
        self.category() == TypeCategory::Bool
    }

    pub fn is_json(self) -> bool {
        self.category() == TypeCategory::Json
    }

    /// Integer types whose length is a display width rather than a size.
    pub fn is_integer(self) -> bool {
        matches!(
            self,
            SqlType::Bit
                | SqlType::TinyInt
                | SqlType::SmallInt
                | SqlType::MediumInt
                | SqlType::Int
                | SqlType::Integer
                | SqlType::BigInt
                | SqlType::Serial
                | SqlType::BigSerial
        )
    }

    /// Length and secondary length applied when a column is declared without one.
    ///
    /// Only variable-length character types get a default; every other type
    /// keeps zero, meaning "use the native default width".
    pub fn default_lengths(self) -> (i32, i32) {
        match self {
            SqlType::Varchar | SqlType::NVarchar => (255, 0),
            _ => (0, 0),
        }
    }
}

impl fmt::Display for SqlType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SqlType {
    type Err = DialectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SqlType::from_name(s)
            .ok_or_else(|| DialectError::Config(format!("unknown SQL type '{}'", s)))
    }
}
