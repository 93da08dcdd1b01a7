//! SQLite persistence for plans and steps.
//!
//! [`Database`] wraps a single rusqlite connection. Schema application lives
//! in [`migrations`], read paths and bulk removal in [`plan_queries`], step
//! hydration and row writers in [`step_queries`], and the save-time
//! reconciliation of an in-memory [`Plan`](crate::models::Plan) in [`sync`].

use std::{path::Path, time::Duration};

use rusqlite::{Connection, Transaction, TransactionBehavior};

use crate::error::{DatabaseResultExt, Result};

pub mod migrations;
pub mod plan_queries;
pub mod step_queries;
pub mod sync;

/// How long a connection waits on another writer before giving up.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Database connection and operations handler.
pub struct Database {
    connection: Connection,
}

impl Database {
    /// Opens (or creates) the store at `path` and applies the schema.
    ///
    /// # Errors
    ///
    /// Returns `PlannerError::Database` if the file cannot be opened or the
    /// schema cannot be applied. No half-initialized handle is returned.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection = Connection::open(path).db_context("Failed to open database connection")?;
        Self::from_connection(connection)
    }

    /// Opens a private in-memory store, mostly useful in tests.
    pub fn in_memory() -> Result<Self> {
        let connection =
            Connection::open_in_memory().db_context("Failed to open in-memory database")?;
        Self::from_connection(connection)
    }

    fn from_connection(connection: Connection) -> Result<Self> {
        connection
            .busy_timeout(BUSY_TIMEOUT)
            .db_context("Failed to set busy timeout")?;

        let db = Self { connection };
        db.initialize_schema()?;
        Ok(db)
    }

    /// Starts a write transaction, taking the write lock up front so that two
    /// writers never deadlock upgrading from a read.
    pub(crate) fn write_transaction(&mut self) -> Result<Transaction<'_>> {
        self.connection
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .db_context("Failed to begin transaction")
    }
}
