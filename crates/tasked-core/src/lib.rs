//! Core library for the tasked planner.
//!
//! A plan is a named, ordered list of steps; each step has a status
//! (`TODO`/`DONE`), acceptance criteria and references. Plans are edited in
//! memory through [`Plan`] and written back to SQLite in one transaction by
//! the synchronization engine in [`db`].
//!
//! # Layers
//!
//! - [`models`]: plans, steps, summaries and the in-memory editing operations
//! - [`db`]: schema, reads, save-time synchronization, bulk removal
//! - [`planner`]: async facade and the workflows the interfaces call
//! - [`params`]: parameter structs shared by the CLI and MCP server
//! - [`display`]: `Display` implementations producing the user-facing text
//!
//! # Quick Start
//!
//! ```rust
//! use tasked_core::{Database, Plan};
//!
//! # fn main() -> tasked_core::Result<()> {
//! let mut db = Database::in_memory()?;
//!
//! let mut plan = Plan::new("release")?;
//! plan.add_step("build", "Build artifacts", vec![], vec![]);
//! plan.add_step("tag", "Tag the release", vec![], vec!["RELEASING.md".into()]);
//! db.save_plan(&mut plan)?;
//!
//! let mut stored = db.get_plan("release")?;
//! stored.reorder(&["tag"]);
//! stored.mark_as_completed("tag")?;
//! db.save_plan(&mut stored)?;
//!
//! let summaries = db.list_plans()?;
//! assert_eq!(summaries[0].to_string(), "release [TODO] (1/2 tasks completed)");
//! # Ok(())
//! # }
//! ```

pub mod db;
pub mod display;
pub mod error;
pub mod models;
pub mod params;
pub mod planner;

// Re-export commonly used types
pub use db::Database;
pub use display::{LocalDateTime, NextStep, PlanSummaries, StepRemoval};
pub use error::{ErrorKind, PlannerError, Result};
pub use models::{
    Plan, PlanState, PlanSummary, RemovalOutcome, RemovalReport, Step, StepStatus,
};
pub use params::{AddStep, PlanName, RemovePlans, RemoveSteps, ReorderSteps, SetStepStatus, StatusChange};
pub use planner::{Planner, PlannerBuilder};
