//! Database operations for SQLite.
//!
//! This module handles the database connection and ensures the `Dog` table
//! exists with the expected shape.

use anyhow::{bail, Context, Result};
use rusqlite::Connection;
use std::path::Path;
use tracing::{debug, info};

/// Table holding one row per dog
pub const DOG_TABLE: &str = "Dog";

/// Columns of the `Dog` table, in declaration order
pub const DOG_COLUMNS: [&str; 6] = ["age", "breed", "id", "image_link", "name", "zip_code"];

/// One row of `pragma_table_info`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnInfo {
    pub name: String,
    pub decl_type: String,
    pub not_null: bool,
    pub primary_key: bool,
}

/// Database connection wrapper
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open or create a database at the given path
    ///
    /// The schema is created when missing. An existing `Dog` table (matched
    /// case-insensitively) whose shape differs from `schema.sql` is an error.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        debug!(path = %path.display(), "Opening database");

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create database directory: {}", parent.display()))?;
        }

        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open database at {}", path.display()))?;

        let mut db = Self { conn };
        db.init_schema()?;

        Ok(db)
    }

    /// Open a private in-memory database with the schema applied
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().context("Failed to open in-memory database")?;
        let mut db = Self { conn };
        db.init_schema()?;
        Ok(db)
    }

    /// Create the schema if absent, then check the existing table matches
    fn init_schema(&mut self) -> Result<()> {
        let existed = self.table_exists(DOG_TABLE)?;

        self.conn
            .execute_batch(include_str!("../schema.sql"))
            .context("Failed to create database schema")?;

        if existed {
            debug!("Dog table already exists, verifying schema");
            self.verify_schema()?;
        } else {
            info!("Database schema created successfully");
        }

        Ok(())
    }

    /// Reject an existing table that would not enforce the dog invariants
    ///
    /// Column names, declared types, NOT NULL, the primary key on `id` and
    /// STRICT typing must all match `schema.sql`.
    fn verify_schema(&self) -> Result<()> {
        let expected: Vec<ColumnInfo> = DOG_COLUMNS
            .iter()
            .map(|&name| ColumnInfo {
                name: name.to_string(),
                decl_type: if name == "age" { "INTEGER" } else { "TEXT" }.to_string(),
                not_null: true,
                primary_key: name == "id",
            })
            .collect();

        let found = self.column_info(DOG_TABLE)?;
        if found != expected {
            bail!(
                "Existing {} table has an incompatible schema: expected columns {:?}, found {:?}",
                DOG_TABLE,
                expected,
                found
            );
        }

        let sql: String = self.conn.query_row(
            "SELECT sql FROM sqlite_master WHERE type='table' AND name=?1 COLLATE NOCASE",
            [DOG_TABLE],
            |row| row.get(0),
        )?;
        if !sql.trim_end().to_ascii_uppercase().ends_with("STRICT") {
            bail!(
                "Existing {} table has an incompatible schema: not declared STRICT",
                DOG_TABLE
            );
        }

        Ok(())
    }

    /// Get a reference to the underlying connection
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Check if a table exists (SQLite table names are case-insensitive)
    pub fn table_exists(&self, table_name: &str) -> Result<bool> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name=?1 COLLATE NOCASE",
            [table_name],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    /// Column names of a table, in declaration order
    pub fn table_columns(&self, table_name: &str) -> Result<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT name FROM pragma_table_info(?1) ORDER BY cid")?;

        let columns = stmt
            .query_map([table_name], |row| row.get(0))?
            .collect::<Result<Vec<String>, _>>()?;

        Ok(columns)
    }

    /// Declared shape of every column of a table, in declaration order
    pub fn column_info(&self, table_name: &str) -> Result<Vec<ColumnInfo>> {
        let mut stmt = self.conn.prepare(
            "SELECT name, type, \"notnull\", pk FROM pragma_table_info(?1) ORDER BY cid",
        )?;

        let columns = stmt
            .query_map([table_name], |row| {
                Ok(ColumnInfo {
                    name: row.get(0)?,
                    decl_type: row.get::<_, String>(1)?.to_ascii_uppercase(),
                    not_null: row.get::<_, i64>(2)? != 0,
                    primary_key: row.get::<_, i64>(3)? != 0,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(columns)
    }

    /// Begin a transaction
    pub fn begin_transaction(&mut self) -> Result<rusqlite::Transaction<'_>> {
        self.conn.transaction()
            .context("Failed to begin transaction")
    }
}
