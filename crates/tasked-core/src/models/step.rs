//! Step model definition and related functionality.

use serde::Serialize;

use super::StepStatus;

/// Represents an individual step within a plan.
///
/// Fields are private so that the collections can never be observed as
/// missing: an absent list is always an empty `Vec`.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Step {
    /// Identifier, unique within the owning plan
    id: String,

    /// Free-text description of the work
    description: String,

    /// Current status of the step
    status: StepStatus,

    /// Ordered conditions for considering the step done
    acceptance_criteria: Vec<String>,

    /// References to relevant resources (URLs, file paths)
    references: Vec<String>,

    /// Position within the plan (0-indexed), assigned on save
    #[serde(skip)]
    order: usize,
}

impl Step {
    /// Creates a new step in the `TODO` state.
    pub fn new(
        id: impl Into<String>,
        description: impl Into<String>,
        acceptance_criteria: Vec<String>,
        references: Vec<String>,
    ) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            status: StepStatus::Todo,
            acceptance_criteria,
            references,
            order: 0,
        }
    }

    /// Rebuilds a step from its stored row.
    pub(crate) fn from_storage(
        id: String,
        description: String,
        status: StepStatus,
        order: usize,
    ) -> Self {
        Self {
            id,
            description,
            status,
            acceptance_criteria: Vec::new(),
            references: Vec::new(),
            order,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn status(&self) -> StepStatus {
        self.status
    }

    /// Whether the step is `DONE`.
    pub fn is_done(&self) -> bool {
        self.status.is_done()
    }

    pub fn acceptance_criteria(&self) -> &[String] {
        &self.acceptance_criteria
    }

    pub fn references(&self) -> &[String] {
        &self.references
    }

    /// Position assigned by the last save or load.
    pub fn order(&self) -> usize {
        self.order
    }

    pub(crate) fn set_status(&mut self, status: StepStatus) {
        self.status = status;
    }

    pub(crate) fn set_order(&mut self, order: usize) {
        self.order = order;
    }

    pub(crate) fn acceptance_criteria_mut(&mut self) -> &mut Vec<String> {
        &mut self.acceptance_criteria
    }

    pub(crate) fn references_mut(&mut self) -> &mut Vec<String> {
        &mut self.references
    }
}
