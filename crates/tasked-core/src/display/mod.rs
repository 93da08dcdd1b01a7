//! Text formatting for plans, steps and operation results.
//!
//! Domain models implement [`std::fmt::Display`] directly (see [`models`]);
//! collections and operation outcomes get newtype wrappers here so that the
//! command line and the MCP server print exactly the same text.
//!
//! - [`models`]: inspect rendering of plans and steps, summary lines
//! - [`collections`]: the plan list
//! - [`results`]: removal reports, step removals, next-step output
//! - [`datetime`]: local-time timestamps

pub mod collections;
pub mod datetime;
pub mod models;
pub mod results;

pub use collections::{PlanSummaries, TimestampedSummaries};
pub use datetime::LocalDateTime;
pub use results::{NextStep, StepRemoval};
