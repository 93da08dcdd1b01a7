//! Parameter structures shared by the command line and MCP interfaces.
//!
//! These carry no framework derives beyond serde. JSON schema generation is
//! available behind the `schema` feature so that the MCP server can describe
//! its tool inputs, while the core stays free of schemars by default.
//!
//! Interface layers build these from their own argument types and hand them to
//! the workflow methods on [`Planner`](crate::Planner).

#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{
    error::{PlannerError, Result},
    models::StepStatus,
};

/// Parameters for operations requiring just a plan name.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct PlanName {
    /// Name of the plan to operate on
    pub name: String,
}

impl PlanName {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Parameters for adding a step to a plan.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct AddStep {
    /// Name of the plan to add the step to
    pub plan: String,
    /// Step identifier, unique within the plan
    pub id: String,
    /// What the step is about
    #[serde(default)]
    pub description: String,
    /// Conditions for considering the step done
    #[serde(default)]
    pub acceptance_criteria: Vec<String>,
    /// URLs, file paths or other pointers relevant to the step
    #[serde(default)]
    pub references: Vec<String>,
    /// Place the new step directly after this step instead of at the end
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub after: Option<String>,
}

impl AddStep {
    /// Checks the fields that can be validated without loading the plan.
    ///
    /// # Errors
    ///
    /// Returns `PlannerError::InvalidInput` when the plan name or step id is
    /// empty.
    pub fn validate(&self) -> Result<()> {
        if self.plan.trim().is_empty() {
            return Err(PlannerError::invalid_input("plan").with_reason("plan name cannot be empty"));
        }
        if self.id.trim().is_empty() {
            return Err(PlannerError::invalid_input("id").with_reason("step ID cannot be empty"));
        }
        Ok(())
    }
}

/// Target status of a step status change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "snake_case")]
pub enum StatusChange {
    /// Mark the step as `DONE`
    Completed,
    /// Mark the step as `TODO`
    Incomplete,
}

impl From<StatusChange> for StepStatus {
    fn from(change: StatusChange) -> Self {
        match change {
            StatusChange::Completed => StepStatus::Done,
            StatusChange::Incomplete => StepStatus::Todo,
        }
    }
}

/// Parameters for changing a step's status.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct SetStepStatus {
    /// Name of the plan containing the step
    pub plan: String,
    /// Step to update
    pub step_id: String,
    /// New status
    pub status: StatusChange,
}

/// Parameters for removing steps from a plan.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct RemoveSteps {
    /// Name of the plan
    pub plan: String,
    /// Steps to remove; unknown ids are ignored
    pub step_ids: Vec<String>,
}

/// Parameters for reordering the steps of a plan.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct ReorderSteps {
    /// Name of the plan
    pub plan: String,
    /// Steps to move to the front, in this order. Unlisted steps follow in
    /// their current relative order.
    pub step_ids: Vec<String>,
}

/// Parameters for removing whole plans.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct RemovePlans {
    /// Names of the plans to remove
    pub names: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_add_step_validate() {
        let params = AddStep {
            plan: "release".into(),
            id: "build".into(),
            ..Default::default()
        };
        assert!(params.validate().is_ok());

        let params = AddStep {
            plan: "release".into(),
            id: "  ".into(),
            ..Default::default()
        };
        let err = params.validate().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert!(err.to_string().contains("step ID cannot be empty"));
    }

    #[test]
    fn test_add_step_defaults_from_json() {
        let params: AddStep =
            serde_json::from_str(r#"{"plan": "p", "id": "s1"}"#).unwrap();
        assert!(params.acceptance_criteria.is_empty());
        assert!(params.references.is_empty());
        assert!(params.after.is_none());
    }

    #[test]
    fn test_status_change_conversion() {
        let change: StatusChange = serde_json::from_str("\"completed\"").unwrap();
        assert_eq!(StepStatus::from(change), StepStatus::Done);
        assert_eq!(
            StepStatus::from(StatusChange::Incomplete),
            StepStatus::Todo
        );
        assert!(serde_json::from_str::<StatusChange>("\"done\"").is_err());
    }
}
