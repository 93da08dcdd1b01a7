//! Data models for plans and steps.
//!
//! This module contains the core domain models of the planner. A [`Plan`]
//! exclusively owns its ordered [`Step`]s, and each step owns its acceptance
//! criteria and references. Display implementations live in
//! [`crate::display::models`].
//!
//! Plans are edited in memory through the methods on [`Plan`] and persisted
//! with [`Database::save_plan`](crate::db::Database::save_plan), which
//! re-derives step order from the in-memory sequence.
//!
//! # Examples
//!
//! ```rust
//! use tasked_core::models::{Plan, StepStatus};
//!
//! let mut plan = Plan::new("release").unwrap();
//! plan.add_step("build", "Build artifacts", vec![], vec![]);
//! plan.add_step("tag", "Tag the release", vec!["tag is signed".into()], vec![]);
//! plan.reorder(&["tag"]);
//! plan.mark_as_completed("tag").unwrap();
//!
//! assert_eq!(plan.steps()[0].status(), StepStatus::Done);
//! assert_eq!(plan.next_step().map(|s| s.id()), Some("build"));
//! ```

pub mod plan;
pub mod removal;
pub mod status;
pub mod step;
pub mod summary;

#[cfg(test)]
mod tests;

pub use plan::Plan;
pub use removal::{RemovalOutcome, RemovalReport};
pub use status::{PlanState, StepStatus};
pub use step::Step;
pub use summary::PlanSummary;
