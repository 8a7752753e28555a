use crate::error::RustyEtlError;
use thiserror::Error;

/// Errors related to column type parsing.
#[derive(Error, Debug)]
pub enum ColumnError {
    #[error("Invalid column type '{0}'")]
    TypeError(String),
}

/// Column types used by the stored tables.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ColumnType {
    Boolean,
    /// 64-bit signed integers
    BigInt,
    /// Double-precision floating point numbers
    Double,
    /// Variable-length strings
    Varchar,
}

impl ColumnType {
    /// Returns the DuckDB type name.
    pub const fn as_str(&self) -> &'static str {
        match self {
            ColumnType::Boolean => "BOOLEAN",
            ColumnType::BigInt => "BIGINT",
            ColumnType::Double => "DOUBLE",
            ColumnType::Varchar => "VARCHAR",
        }
    }

    /// Parses a column type from its name, accepting the usual aliases.
    pub fn parse(name: &str) -> Result<Self, RustyEtlError> {
        match name.trim().to_ascii_uppercase().as_str() {
            "BOOL" | "BOOLEAN" | "LOGICAL" => Ok(Self::Boolean),
            "INT8" | "LONG" | "BIGINT" => Ok(Self::BigInt),
            "FLOAT8" | "DOUBLE" => Ok(Self::Double),
            "TEXT" | "STRING" | "VARCHAR" => Ok(Self::Varchar),
            _ => Err(ColumnError::TypeError(name.to_string()))?,
        }
    }
}

/// A declared table column.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Column {
    pub name: &'static str,
    pub kind: ColumnType,
    pub primary_key: bool,
    /// SQL default expression
    pub default: Option<&'static str>,
}

impl Column {
    pub const fn new(name: &'static str, kind: ColumnType) -> Self {
        Column {
            name,
            kind,
            primary_key: false,
            default: None,
        }
    }

    pub const fn primary_key(self) -> Self {
        Column { primary_key: true, ..self }
    }

    pub const fn default(self, expression: &'static str) -> Self {
        Column { default: Some(expression), ..self }
    }

    /// Store-assigned columns are left out of inserts.
    pub const fn is_generated(&self) -> bool {
        self.primary_key && self.default.is_some()
    }

    /// Renders the column definition of a `CREATE TABLE` statement.
    pub fn definition(&self) -> String {
        let mut definition = format!("\"{}\" {}", self.name, self.kind.as_str());
        if self.primary_key {
            definition.push_str(" PRIMARY KEY");
        }
        if let Some(expression) = self.default {
            definition.push_str(" DEFAULT ");
            definition.push_str(expression);
        }
        definition
    }
}
