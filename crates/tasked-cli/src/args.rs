//! Command-line argument definitions using clap
//!
//! Each argument struct carries only clap concerns (positional layout, flags,
//! help text) and converts into the interface-agnostic parameter types from
//! `tasked_core::params`:
//!
//! ```text
//! User Input → CLI Args (clap) → Core Params → Planner handlers
//! ```

use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand};
use tasked_core::params::{
    AddStep, PlanName, RemovePlans, RemoveSteps, ReorderSteps, SetStepStatus, StatusChange,
};

/// Main command-line interface for the tasked planner
///
/// tasked keeps named plans made of ordered steps. Each step has a status,
/// acceptance criteria and references. Plans can be edited from the command
/// line or through an MCP server running on stdio.
#[derive(Parser)]
#[command(version, about, name = "tasked")]
pub struct Args {
    /// Path to the SQLite database file. Defaults to
    /// $XDG_DATA_HOME/tasked/tasks.db
    #[arg(long, global = true)]
    pub database_file: Option<PathBuf>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Top-level commands
#[derive(Subcommand)]
pub enum Commands {
    /// Manage plans and their steps
    #[command(alias = "p")]
    Plan {
        #[command(subcommand)]
        command: PlanCommands,
    },
    /// Start an MCP server providing planner tools on stdio
    Mcp,
}

#[derive(Subcommand)]
pub enum PlanCommands {
    /// Create a new, empty plan
    New(PlanNameArgs),
    /// List all plans with their status and task counts
    #[command(alias = "ls")]
    List(ListPlansArgs),
    /// Show every step of a plan
    Inspect(PlanNameArgs),
    /// Show the first step that is not done yet
    NextStep(PlanNameArgs),
    /// Mark a step as completed
    MarkAsCompleted(MarkStepArgs),
    /// Mark a step as incomplete
    MarkAsIncomplete(MarkStepArgs),
    /// Add a new step to a plan
    AddStep(AddStepArgs),
    /// Remove steps from a plan
    RemoveSteps(RemoveStepsArgs),
    /// Move the given steps to the front of a plan, in the given order
    ReorderSteps(ReorderStepsArgs),
    /// Remove one or more plans
    #[command(alias = "rm")]
    Remove(RemovePlansArgs),
    /// Print whether every step of a plan is done (exit code 1 if not)
    IsCompleted(PlanNameArgs),
    /// Remove every plan whose steps are all done
    Compact,
}

/// A single plan name
#[derive(ClapArgs)]
pub struct PlanNameArgs {
    #[arg(help = "Name of the plan")]
    pub name: String,
}

impl From<PlanNameArgs> for PlanName {
    fn from(val: PlanNameArgs) -> Self {
        PlanName { name: val.name }
    }
}

/// List all plans
#[derive(ClapArgs)]
pub struct ListPlansArgs {
    /// Also show when each plan was last modified
    #[arg(long, help = "Also show when each plan was last modified")]
    pub timestamps: bool,
}

/// Change the status of one step
#[derive(ClapArgs)]
pub struct MarkStepArgs {
    #[arg(help = "Name of the plan containing the step")]
    pub plan: String,
    #[arg(help = "ID of the step to update")]
    pub step_id: String,
}

impl MarkStepArgs {
    /// Combine with the status implied by the subcommand.
    pub fn into_params(self, status: StatusChange) -> SetStepStatus {
        SetStepStatus {
            plan: self.plan,
            step_id: self.step_id,
            status,
        }
    }
}

/// Add a new step to a plan
///
/// Without `--after` the step is appended at the end of the plan.
#[derive(ClapArgs)]
pub struct AddStepArgs {
    /// Insert the new step directly after this step
    #[arg(long, value_name = "STEP_ID")]
    pub after: Option<String>,
    /// References (URLs, file paths) as a comma-separated list
    #[arg(long, value_delimiter = ',')]
    pub references: Vec<String>,
    #[arg(help = "Name of the plan to add the step to")]
    pub plan: String,
    #[arg(help = "ID of the new step, unique within the plan")]
    pub id: String,
    #[arg(help = "What needs to be done")]
    pub description: String,
    #[arg(help = "Conditions that must hold for the step to be done")]
    pub acceptance_criteria: Vec<String>,
}

impl From<AddStepArgs> for AddStep {
    fn from(val: AddStepArgs) -> Self {
        let references = val
            .references
            .iter()
            .map(|reference| reference.trim())
            .filter(|reference| !reference.is_empty())
            .map(str::to_string)
            .collect();

        AddStep {
            plan: val.plan,
            id: val.id,
            description: val.description,
            acceptance_criteria: val.acceptance_criteria,
            references,
            after: val.after,
        }
    }
}

/// Remove steps from a plan
#[derive(ClapArgs)]
pub struct RemoveStepsArgs {
    #[arg(help = "Name of the plan")]
    pub plan: String,
    #[arg(required = true, help = "IDs of the steps to remove")]
    pub step_ids: Vec<String>,
}

impl From<RemoveStepsArgs> for RemoveSteps {
    fn from(val: RemoveStepsArgs) -> Self {
        RemoveSteps {
            plan: val.plan,
            step_ids: val.step_ids,
        }
    }
}

/// Reorder the steps of a plan
///
/// Listed steps move to the front in the given order; the others keep their
/// relative order after them.
#[derive(ClapArgs)]
pub struct ReorderStepsArgs {
    #[arg(help = "Name of the plan")]
    pub plan: String,
    #[arg(required = true, help = "Step IDs in their new order")]
    pub step_ids: Vec<String>,
}

impl From<ReorderStepsArgs> for ReorderSteps {
    fn from(val: ReorderStepsArgs) -> Self {
        ReorderSteps {
            plan: val.plan,
            step_ids: val.step_ids,
        }
    }
}

/// Remove plans by name
#[derive(ClapArgs)]
pub struct RemovePlansArgs {
    #[arg(required = true, help = "Names of the plans to remove")]
    pub names: Vec<String>,
}

impl From<RemovePlansArgs> for RemovePlans {
    fn from(val: RemovePlansArgs) -> Self {
        RemovePlans { names: val.names }
    }
}
