//! Status enumerations for plans and steps.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Type-safe enumeration of step statuses.
///
/// Parsing is case-insensitive; the canonical (stored and displayed) form is
/// uppercase.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum StepStatus {
    /// Step is pending completion
    #[default]
    Todo,

    /// Step has been completed
    Done,
}

impl FromStr for StepStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "TODO" => Ok(StepStatus::Todo),
            "DONE" => Ok(StepStatus::Done),
            _ => Err(format!("Invalid step status: {s}")),
        }
    }
}

impl StepStatus {
    /// Canonical database and display representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            StepStatus::Todo => "TODO",
            StepStatus::Done => "DONE",
        }
    }

    /// Whether this status counts as finished.
    pub fn is_done(&self) -> bool {
        matches!(self, StepStatus::Done)
    }
}

/// Persistence state of an in-memory plan handle.
///
/// Never serialized. The synchronization engine keys insert-vs-update intent
/// off this tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlanState {
    /// Built in memory and not yet confirmed present in storage
    #[default]
    Unsaved,

    /// Hydrated from storage or committed by a successful save
    Persisted,
}

impl PlanState {
    pub fn is_new(&self) -> bool {
        matches!(self, PlanState::Unsaved)
    }
}
