//! Plan model definition and the in-memory editing operations.
//!
//! Every method here works purely on the loaded step sequence. Nothing is
//! written to storage until the plan is handed to
//! [`Database::save_plan`](crate::db::Database::save_plan).

use std::collections::HashSet;

use serde::Serialize;

use super::{PlanState, Step, StepStatus};
use crate::error::{PlannerError, Result};

/// Represents a complete plan: a name and an ordered list of steps.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Plan {
    /// Unique identifier, also the user-facing plan name
    id: String,

    /// Steps in their current order
    steps: Vec<Step>,

    /// Insert-vs-update intent for the next save
    #[serde(skip)]
    state: PlanState,
}

impl Plan {
    /// Builds an empty, unsaved plan.
    ///
    /// Storage is not consulted; a name clash surfaces when the plan is saved.
    ///
    /// # Errors
    ///
    /// Returns `PlannerError::InvalidInput` if `name` is empty.
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let id = name.into();
        if id.is_empty() {
            return Err(PlannerError::invalid_input("name").with_reason("plan name cannot be empty"));
        }
        Ok(Self {
            id,
            steps: Vec::new(),
            state: PlanState::Unsaved,
        })
    }

    /// Builds an empty handle for a plan that is expected to already be
    /// stored. Saving it updates the stored plan instead of inserting one.
    pub fn assume_persisted(name: impl Into<String>) -> Self {
        Self {
            id: name.into(),
            steps: Vec::new(),
            state: PlanState::Persisted,
        }
    }

    pub(crate) fn from_storage(id: String, steps: Vec<Step>) -> Self {
        Self {
            id,
            steps,
            state: PlanState::Persisted,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn state(&self) -> PlanState {
        self.state
    }

    /// True until a save commits or the plan was loaded from storage.
    pub fn is_new(&self) -> bool {
        self.state.is_new()
    }

    pub(crate) fn mark_persisted(&mut self) {
        self.state = PlanState::Persisted;
    }

    pub(crate) fn steps_mut(&mut self) -> &mut [Step] {
        &mut self.steps
    }

    /// Looks up a step by id.
    pub fn step(&self, step_id: &str) -> Option<&Step> {
        self.steps.iter().find(|step| step.id() == step_id)
    }

    /// Index of the first step with the given id.
    pub fn position_of(&self, step_id: &str) -> Option<usize> {
        self.steps.iter().position(|step| step.id() == step_id)
    }

    /// Appends a new `TODO` step.
    ///
    /// Duplicate ids are not rejected here; they collide with the storage
    /// primary key when the plan is saved.
    pub fn add_step(
        &mut self,
        id: impl Into<String>,
        description: impl Into<String>,
        acceptance_criteria: Vec<String>,
        references: Vec<String>,
    ) {
        self.steps
            .push(Step::new(id, description, acceptance_criteria, references));
    }

    /// Removes every step whose id is listed and returns how many were
    /// removed. Unknown ids are ignored.
    pub fn remove_steps<S: AsRef<str>>(&mut self, step_ids: &[S]) -> usize {
        if step_ids.is_empty() || self.steps.is_empty() {
            return 0;
        }

        let to_remove: HashSet<&str> = step_ids.iter().map(AsRef::as_ref).collect();
        let before = self.steps.len();
        self.steps.retain(|step| !to_remove.contains(step.id()));
        before - self.steps.len()
    }

    /// Moves the listed steps to the front in the given order and appends the
    /// rest in their previous relative order.
    ///
    /// Unknown ids and repeated ids after their first occurrence are ignored,
    /// so callers may pass just a prefix of the desired order.
    pub fn reorder<S: AsRef<str>>(&mut self, new_order: &[S]) {
        if self.steps.is_empty() {
            return;
        }

        let mut remaining: Vec<Option<Step>> = self.steps.drain(..).map(Some).collect();
        let mut reordered = Vec::with_capacity(remaining.len());

        for step_id in new_order {
            let step_id = step_id.as_ref();
            let slot = remaining
                .iter_mut()
                .find(|slot| matches!(slot, Some(step) if step.id() == step_id));
            if let Some(step) = slot.and_then(Option::take) {
                reordered.push(step);
            }
        }

        reordered.extend(remaining.into_iter().flatten());
        self.steps = reordered;
    }

    /// Sets the step's status to `DONE`.
    ///
    /// # Errors
    ///
    /// Returns `PlannerError::StepNotFound` if no step has this id.
    pub fn mark_as_completed(&mut self, step_id: &str) -> Result<()> {
        self.set_step_status(step_id, StepStatus::Done)
    }

    /// Sets the step's status to `TODO`.
    ///
    /// # Errors
    ///
    /// Returns `PlannerError::StepNotFound` if no step has this id.
    pub fn mark_as_incomplete(&mut self, step_id: &str) -> Result<()> {
        self.set_step_status(step_id, StepStatus::Todo)
    }

    fn set_step_status(&mut self, step_id: &str, status: StepStatus) -> Result<()> {
        let plan_id = &self.id;
        let step = self
            .steps
            .iter_mut()
            .find(|step| step.id() == step_id)
            .ok_or_else(|| PlannerError::step_not_found(plan_id.as_str(), step_id))?;
        step.set_status(status);
        Ok(())
    }

    /// First step, in current order, that is not `DONE`.
    pub fn next_step(&self) -> Option<&Step> {
        self.steps.iter().find(|step| !step.is_done())
    }

    /// True when no step is left to do (including an empty plan).
    pub fn is_completed(&self) -> bool {
        self.next_step().is_none()
    }

    /// Human-readable multi-section rendering of every step.
    ///
    /// See the `Display` implementation in [`crate::display::models`].
    pub fn inspect(&self) -> String {
        self.to_string()
    }

    /// JSON form with `id` and `steps`.
    ///
    /// # Errors
    ///
    /// Returns `PlannerError::Serialization` if encoding fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
