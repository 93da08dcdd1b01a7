//! Async planner facade over the SQLite store.
//!
//! [`Planner`] is what the command line and MCP interfaces talk to. The store
//! underneath is synchronous, so every call opens its own [`Database`]
//! connection on tokio's blocking pool and runs exactly one operation (and so
//! at most one transaction) there.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │    Handlers     │    │   Operations    │    │    Database     │
//! │ (plan_handlers, │───▶│   (plan_ops)    │───▶│   (via db/)     │
//! │  step_handlers) │    │                 │    │                 │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//!     Workflows            Get / Save / ...       Transactions
//! ```
//!
//! - [`builder`]: resolves the database path and creates the store
//! - [`plan_ops`]: one async method per store operation
//! - [`plan_handlers`]: plan-level workflows (new, list, inspect, remove, ...)
//! - [`step_handlers`]: step-level workflows that load, edit and save a plan
//!
//! # Example
//!
//! ```rust,no_run
//! use tasked_core::{PlannerBuilder, params::{AddStep, PlanName}};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let planner = PlannerBuilder::new()
//!     .with_database_path(Some("tasks.db"))
//!     .build()
//!     .await?;
//!
//! planner.new_plan(&PlanName::new("release")).await?;
//! planner
//!     .add_step_to_plan(&AddStep {
//!         plan: "release".into(),
//!         id: "build".into(),
//!         description: "Build artifacts".into(),
//!         ..Default::default()
//!     })
//!     .await?;
//!
//! let next = planner.next_step(&PlanName::new("release")).await?;
//! assert_eq!(next.map(|step| step.id().to_string()), Some("build".into()));
//! # Ok(())
//! # }
//! ```
//!
//! [`Database`]: crate::db::Database

use std::path::{Path, PathBuf};

use tokio::task;

use crate::{
    db::Database,
    error::{PlannerError, Result},
};

pub mod builder;
pub mod plan_handlers;
pub mod plan_ops;
pub mod step_handlers;

#[cfg(test)]
mod tests;

pub use builder::PlannerBuilder;

/// Main planner interface for managing plans and steps.
#[derive(Debug, Clone)]
pub struct Planner {
    pub(crate) db_path: PathBuf,
}

impl Planner {
    /// Creates a new planner with the specified database path.
    pub(crate) fn new(db_path: PathBuf) -> Self {
        Self { db_path }
    }

    /// Path of the SQLite file this planner works on.
    pub fn database_path(&self) -> &Path {
        &self.db_path
    }

    /// Opens a connection on the blocking pool and runs `op` against it.
    pub(crate) async fn with_database<T, F>(&self, op: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut Database) -> Result<T> + Send + 'static,
    {
        let db_path = self.db_path.clone();

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            op(&mut db)
        })
        .await
        .map_err(|e| PlannerError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }
}
