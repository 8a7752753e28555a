//! Table declarations and store access shared by the ETL and the joke service.
use crate::error::RustyEtlError;
use duckdb::Connection;
use std::path::PathBuf;
use thiserror::Error;

pub mod column;
pub mod table;

#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("Table '{0}' does not exist")]
    TableNotFound(String),

    #[error("Table '{table}' does not match its declaration: {detail}")]
    SchemaMismatch { table: String, detail: String },

    #[error("Database session lock is poisoned")]
    SessionPoisoned,
}

/// Location of a file-backed DuckDB store.
#[derive(Clone, Debug)]
pub struct StoreConfig {
    pub path: PathBuf,
}

impl StoreConfig {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        StoreConfig { path: path.into() }
    }

    /// Opens a connection, creating the database file if needed.
    pub fn open(&self) -> Result<Connection, RustyEtlError> {
        Ok(Connection::open(&self.path)?)
    }
}
