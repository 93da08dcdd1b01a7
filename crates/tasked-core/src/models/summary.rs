//! Plan summary types and functionality.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::{Plan, StepStatus};

/// Summary information about a plan with step statistics.
///
/// Derived on read, never stored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlanSummary {
    /// Plan name
    pub name: String,
    /// `DONE` iff the plan has steps and all of them are done
    pub status: StepStatus,
    /// Total number of steps
    pub total_tasks: u32,
    /// Number of completed steps
    pub completed_tasks: u32,
    /// Last modification time, when the stored value could be parsed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<Timestamp>,
}

impl PlanSummary {
    /// Build a summary from step counts.
    pub fn from_counts(name: String, total_tasks: u32, completed_tasks: u32) -> Self {
        let status = if total_tasks > 0 && completed_tasks == total_tasks {
            StepStatus::Done
        } else {
            StepStatus::Todo
        };
        Self {
            name,
            status,
            total_tasks,
            completed_tasks,
            updated_at: None,
        }
    }

    /// Attach a modification time.
    pub fn with_updated_at(mut self, updated_at: Option<Timestamp>) -> Self {
        self.updated_at = updated_at;
        self
    }

    /// Number of steps still to do.
    pub fn pending_tasks(&self) -> u32 {
        self.total_tasks.saturating_sub(self.completed_tasks)
    }
}

impl From<&Plan> for PlanSummary {
    fn from(plan: &Plan) -> Self {
        let total_tasks = plan.steps().len() as u32;
        let completed_tasks = plan
            .steps()
            .iter()
            .filter(|step| step.status() == StepStatus::Done)
            .count() as u32;

        Self::from_counts(plan.id().to_string(), total_tasks, completed_tasks)
    }
}
