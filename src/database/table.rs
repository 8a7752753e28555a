use crate::database::column::Column;
use crate::database::column::ColumnType;
use crate::database::DatabaseError;
use crate::error::RustyEtlError;
use duckdb::params;
use duckdb::types::Value;
use duckdb::Connection;

/// A table declaration, the single source of the statements that touch it.
#[derive(Copy, Clone, Debug)]
pub struct Table {
    pub name: &'static str,
    pub columns: &'static [Column],
}

/// A value that serialises to one row of a table.
pub trait TableRow {
    /// Values of the insertable columns, in declaration order.
    fn values(&self) -> Vec<Value>;
}

impl Table {
    /// Columns the caller supplies values for.
    pub fn insert_columns(&self) -> impl Iterator<Item = &'static Column> {
        let columns: &'static [Column] = self.columns;
        columns.iter().filter(|column| !column.is_generated())
    }

    pub fn create_sql(&self, if_not_exists: bool) -> String {
        let definitions = self.columns
            .iter()
            .map(Column::definition)
            .collect::<Vec<_>>()
            .join(", ");
        let guard = if if_not_exists { "IF NOT EXISTS " } else { "" };
        format!("CREATE TABLE {guard}{} ({definitions})", self.name)
    }

    pub fn drop_sql(&self) -> String {
        format!("DROP TABLE IF EXISTS {}", self.name)
    }

    pub fn insert_sql(&self) -> String {
        let names = self.insert_columns().map(quote).collect::<Vec<_>>();
        let placeholders = vec!["?"; names.len()].join(", ");
        format!("INSERT INTO {} ({}) VALUES ({placeholders})", self.name, names.join(", "))
    }

    /// `SELECT` of every column, in declaration order.
    pub fn select_sql(&self) -> String {
        let names = self.columns.iter().map(quote).collect::<Vec<_>>().join(", ");
        format!("SELECT {names} FROM {}", self.name)
    }

    /// Checks whether the table exists in the main schema.
    pub fn exists(&self, connection: &Connection) -> Result<bool, RustyEtlError> {
        let count: i64 = connection.query_row(
            "SELECT count(*) FROM information_schema.tables WHERE table_schema = 'main' AND lower(table_name) = lower(?)",
            params![self.name],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    /// Compares the stored columns with the declaration.
    ///
    /// Names are compared case-insensitively, the way DuckDB resolves identifiers.
    pub fn verify(&self, connection: &Connection) -> Result<(), RustyEtlError> {
        let mut statement = connection.prepare(
            "SELECT column_name, data_type FROM information_schema.columns \
             WHERE table_schema = 'main' AND lower(table_name) = lower(?) ORDER BY ordinal_position",
        )?;
        let stored = statement
            .query_map(params![self.name], |row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?)))?
            .collect::<Result<Vec<_>, _>>()?;
        if stored.is_empty() {
            Err(DatabaseError::TableNotFound(self.name.to_owned()))?
        }

        let mismatch = |detail: String| DatabaseError::SchemaMismatch {
            table: self.name.to_owned(),
            detail,
        };
        if stored.len() != self.columns.len() {
            Err(mismatch(format!("expected {} columns, found {}", self.columns.len(), stored.len())))?
        }
        for (column, (name, data_type)) in self.columns.iter().zip(&stored) {
            if !column.name.eq_ignore_ascii_case(name) {
                Err(mismatch(format!("expected column '{}', found '{name}'", column.name)))?
            }
            if ColumnType::parse(data_type).ok() != Some(column.kind) {
                Err(mismatch(format!("column '{name}' is {data_type}, expected {}", column.kind.as_str())))?
            }
        }
        Ok(())
    }
}

fn quote(column: &Column) -> String {
    format!("\"{}\"", column.name)
}
