//! Schema application.
//!
//! There is no version table. The full schema is re-applied on every open and
//! every statement in it is `IF NOT EXISTS`, so an older store gains any
//! missing relation, index or trigger without its rows being touched.

use log::debug;

use crate::error::{DatabaseResultExt, Result};

const SCHEMA_SQL: &str = include_str!("../../assets/schema.sql");

impl super::Database {
    /// Initializes the database schema using the embedded SQL file.
    pub(super) fn initialize_schema(&self) -> Result<()> {
        // Must be on before any statement runs; it is per-connection state
        self.connection
            .execute_batch("PRAGMA foreign_keys = ON;")
            .db_context("Failed to enable foreign keys")?;

        self.connection
            .execute_batch(SCHEMA_SQL)
            .db_context("Failed to initialize database schema")?;

        debug!("database schema applied");
        Ok(())
    }
}
