//! Action handlers behind the `manage_plan` tool.

use std::sync::Arc;

use log::debug;
use rmcp::{
    model::{CallToolResult, Content},
    ErrorData as McpError,
};
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::{json, Value};
use tasked_core::{
    params::{PlanName, RemovePlans, RemoveSteps, SetStepStatus, StatusChange},
    ErrorKind, Plan, Planner,
};
use tokio::sync::Mutex;

use super::errors::{missing_parameter, serialization_error, tool_error};

pub type McpResult = Result<CallToolResult, McpError>;

/// Outcome of one action: success text, or a ready-made tool error.
type ActionResult = Result<String, CallToolResult>;

/// Operation selected through the `action` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum PlanAction {
    /// Add a step, creating the plan if it does not exist yet
    AddSteps,
    /// Return the plan with all of its steps as JSON
    Inspect,
    /// Return a summary of every plan
    ListPlans,
    /// Remove the plans named in `plan_names`
    RemovePlans,
    /// Remove every plan whose steps are all done
    CompactPlans,
    /// Remove the steps named in `step_ids`
    RemoveSteps,
    /// Move the steps in `step_order` to the front, in that order
    ReorderSteps,
    /// Set the status of `step_id`
    SetStatus,
    /// Return the first step that is not done
    GetNextStep,
    /// Report whether every step is done
    IsCompleted,
}

/// Arguments of the `manage_plan` tool.
///
/// Which optional fields are required depends on `action`.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct ManagePlan {
    /// Name of the plan to operate on
    #[serde(default)]
    pub plan_name: String,
    /// Action to perform
    pub action: PlanAction,
    /// ID of the step (required for add_steps and set_status)
    #[serde(default)]
    pub step_id: Option<String>,
    /// Description of the step (required for add_steps)
    #[serde(default)]
    pub description: Option<String>,
    /// Acceptance criteria for the step (for add_steps)
    #[serde(default)]
    pub acceptance_criteria: Vec<String>,
    /// References for the step (for add_steps): URLs, file paths or other
    /// resource identifiers
    #[serde(default)]
    pub references: Vec<String>,
    /// IDs of steps (required for remove_steps)
    #[serde(default)]
    pub step_ids: Option<Vec<String>>,
    /// New order of step IDs (required for reorder_steps)
    #[serde(default)]
    pub step_order: Option<Vec<String>>,
    /// Names of plans to remove (required for remove_plans)
    #[serde(default)]
    pub plan_names: Option<Vec<String>>,
    /// Status to set for the step (required for set_status)
    #[serde(default)]
    pub status: Option<StatusChange>,
}

fn require<T>(value: Option<T>, name: &str) -> Result<T, CallToolResult> {
    value.ok_or_else(|| missing_parameter(name))
}

fn to_json(value: &impl serde::Serialize) -> ActionResult {
    serde_json::to_string(value).map_err(serialization_error)
}

/// Handler implementations for the MCP server
pub struct McpHandlers {
    planner: Arc<Mutex<Planner>>,
}

impl McpHandlers {
    pub fn new(planner: Arc<Mutex<Planner>>) -> Self {
        Self { planner }
    }

    /// Dispatch one `manage_plan` call.
    ///
    /// Calls are serialized on the planner lock, so the load and save of one
    /// action never interleave with another action.
    pub async fn manage_plan(&self, params: ManagePlan) -> McpResult {
        debug!("manage_plan: {params:?}");

        let action = params.action;
        let planner = self.planner.lock().await;
        let outcome = match action {
            PlanAction::AddSteps => Self::add_steps(&planner, params).await,
            PlanAction::Inspect => Self::inspect(&planner, &params).await,
            PlanAction::ListPlans => Self::list_plans(&planner).await,
            PlanAction::RemovePlans => Self::remove_plans(&planner, params).await,
            PlanAction::CompactPlans => Self::compact_plans(&planner).await,
            PlanAction::RemoveSteps => Self::remove_steps(&planner, params).await,
            PlanAction::ReorderSteps => Self::reorder_steps(&planner, params).await,
            PlanAction::SetStatus => Self::set_status(&planner, params).await,
            PlanAction::GetNextStep => Self::get_next_step(&planner, &params).await,
            PlanAction::IsCompleted => Self::is_completed(&planner, &params).await,
        };

        Ok(match outcome {
            Ok(text) => CallToolResult::success(vec![Content::text(text)]),
            Err(failure) => failure,
        })
    }

    fn plan_name(params: &ManagePlan) -> Result<PlanName, CallToolResult> {
        if params.plan_name.is_empty() {
            return Err(missing_parameter("plan_name"));
        }
        Ok(PlanName::new(params.plan_name.as_str()))
    }

    /// Loads `name`, or starts a new plan when it does not exist yet.
    async fn load_or_create(planner: &Planner, name: &str) -> Result<Plan, CallToolResult> {
        match planner.get_plan(name).await {
            Ok(plan) => Ok(plan),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("creating missing plan '{name}'");
                planner.create_plan(name).map_err(tool_error)
            }
            Err(e) => Err(tool_error(e)),
        }
    }

    /// Appends the step and saves. A repeated step id is left to the store,
    /// which rejects the whole save.
    async fn add_steps(planner: &Planner, params: ManagePlan) -> ActionResult {
        let name = Self::plan_name(&params)?.name;
        let step_id = require(params.step_id, "step_id")?;
        let description = require(params.description, "description")?;

        let mut plan = Self::load_or_create(planner, &name).await?;
        plan.add_step(
            step_id,
            description,
            params.acceptance_criteria,
            params.references,
        );
        planner.save_plan(&mut plan).await.map_err(tool_error)?;

        to_json(&json!({
            "id": plan.id(),
            "steps": plan.steps().len(),
        }))
    }

    async fn inspect(planner: &Planner, params: &ManagePlan) -> ActionResult {
        let plan = planner
            .inspect_plan(&Self::plan_name(params)?)
            .await
            .map_err(tool_error)?;
        plan.to_json().map_err(tool_error)
    }

    async fn list_plans(planner: &Planner) -> ActionResult {
        let summaries = planner.list_plans().await.map_err(tool_error)?;
        to_json(&summaries)
    }

    async fn remove_plans(planner: &Planner, params: ManagePlan) -> ActionResult {
        let names = require(params.plan_names, "plan_names")?;
        let report = planner
            .remove_plans_by_name(&RemovePlans { names })
            .await
            .map_err(tool_error)?;

        let results: Vec<Value> = report
            .iter()
            .map(|(name, outcome)| {
                let text = outcome
                    .error_message(name)
                    .unwrap_or_else(|| "success".to_string());
                json!({ "name": name, "result": text })
            })
            .collect();
        to_json(&results)
    }

    async fn compact_plans(planner: &Planner) -> ActionResult {
        let report = planner.compact_plans().await.map_err(tool_error)?;
        debug!("compaction removed {} plan(s)", report.len());
        Ok("Completed plans compacted successfully".to_string())
    }

    async fn remove_steps(planner: &Planner, params: ManagePlan) -> ActionResult {
        let plan = Self::plan_name(&params)?.name;
        let step_ids = require(params.step_ids, "step_ids")?;
        let removal = planner
            .remove_steps_from_plan(&RemoveSteps {
                plan: plan.clone(),
                step_ids,
            })
            .await
            .map_err(tool_error)?;

        Ok(format!(
            "Removed {} steps from plan '{plan}'",
            removal.removed_count()
        ))
    }

    /// Unknown ids in `step_order` are skipped.
    async fn reorder_steps(planner: &Planner, params: ManagePlan) -> ActionResult {
        let name = Self::plan_name(&params)?.name;
        let step_order = require(params.step_order, "step_order")?;

        let mut plan = planner.get_plan(&name).await.map_err(tool_error)?;
        plan.reorder(&step_order);
        planner.save_plan(&mut plan).await.map_err(tool_error)?;

        Ok(format!("Steps reordered in plan '{name}'"))
    }

    async fn set_status(planner: &Planner, params: ManagePlan) -> ActionResult {
        let plan = Self::plan_name(&params)?.name;
        let step_id = require(params.step_id, "step_id")?;
        let status = require(params.status, "status")?;
        let label = match status {
            StatusChange::Completed => "completed",
            StatusChange::Incomplete => "incomplete",
        };

        planner
            .set_step_status(&SetStepStatus {
                plan: plan.clone(),
                step_id: step_id.clone(),
                status,
            })
            .await
            .map_err(tool_error)?;

        Ok(format!("Step '{step_id}' marked as {label} in plan '{plan}'"))
    }

    async fn get_next_step(planner: &Planner, params: &ManagePlan) -> ActionResult {
        let next = planner
            .next_step(&Self::plan_name(params)?)
            .await
            .map_err(tool_error)?;

        match next {
            Some(step) => to_json(&step),
            None => Ok("No incomplete steps found".to_string()),
        }
    }

    async fn is_completed(planner: &Planner, params: &ManagePlan) -> ActionResult {
        let completed = planner
            .is_plan_completed(&Self::plan_name(params)?)
            .await
            .map_err(tool_error)?;
        to_json(&json!({ "completed": completed }))
    }
}
