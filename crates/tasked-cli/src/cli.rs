//! Executes `plan` subcommands against the planner and renders the results.

use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use log::debug;
use tasked_core::{
    params::{
        AddStep, PlanName, RemovePlans, RemoveSteps, ReorderSteps, SetStepStatus, StatusChange,
    },
    NextStep, Planner,
};

use crate::{
    args::{ListPlansArgs, PlanCommands},
    renderer::TerminalRenderer,
};

/// Command executor for the `tasked plan` family.
pub struct Cli {
    planner: Planner,
    renderer: TerminalRenderer,
}

impl Cli {
    pub fn new(planner: Planner, renderer: TerminalRenderer) -> Self {
        Self { planner, renderer }
    }

    /// Run one plan subcommand.
    ///
    /// Only `is-completed` reports through the exit code; every other command
    /// succeeds with `ExitCode::SUCCESS` or returns an error.
    pub async fn handle_plan_command(&self, command: PlanCommands) -> Result<ExitCode> {
        debug!("executing plan command");

        match command {
            PlanCommands::New(args) => self.new_plan(&args.into()).await?,
            PlanCommands::List(args) => self.list_plans(&args).await?,
            PlanCommands::Inspect(args) => self.inspect_plan(&args.into()).await?,
            PlanCommands::NextStep(args) => self.next_step(&args.into()).await?,
            PlanCommands::MarkAsCompleted(args) => {
                self.set_status(args.into_params(StatusChange::Completed))
                    .await?
            }
            PlanCommands::MarkAsIncomplete(args) => {
                self.set_status(args.into_params(StatusChange::Incomplete))
                    .await?
            }
            PlanCommands::AddStep(args) => self.add_step(&args.into()).await?,
            PlanCommands::RemoveSteps(args) => self.remove_steps(args.into()).await?,
            PlanCommands::ReorderSteps(args) => self.reorder_steps(args.into()).await?,
            PlanCommands::Remove(args) => self.remove_plans(args.into()).await?,
            PlanCommands::IsCompleted(args) => return self.is_completed(&args.into()).await,
            PlanCommands::Compact => self.compact().await?,
        }

        Ok(ExitCode::SUCCESS)
    }

    async fn new_plan(&self, params: &PlanName) -> Result<()> {
        self.planner
            .new_plan(params)
            .await
            .context("failed to create plan")?;

        self.renderer
            .render(&format!("Created plan '{}'\n", params.name))
    }

    pub async fn list_plans(&self, args: &ListPlansArgs) -> Result<()> {
        let summaries = self
            .planner
            .list_plans_summary()
            .await
            .context("failed to list plans")?;

        if args.timestamps {
            self.renderer.render(&summaries.with_timestamps().to_string())
        } else {
            self.renderer.render(&summaries.to_string())
        }
    }

    async fn inspect_plan(&self, params: &PlanName) -> Result<()> {
        let plan = self
            .planner
            .inspect_plan(params)
            .await
            .context("failed to get plan")?;

        self.renderer.render(&plan.to_string())
    }

    async fn next_step(&self, params: &PlanName) -> Result<()> {
        let step = self
            .planner
            .next_step(params)
            .await
            .context("failed to get plan")?;

        self.renderer
            .render(&NextStep::new(params.name.as_str(), step).to_string())
    }

    async fn set_status(&self, params: SetStepStatus) -> Result<()> {
        let verb = match params.status {
            StatusChange::Completed => "completed",
            StatusChange::Incomplete => "incomplete",
        };

        self.planner
            .set_step_status(&params)
            .await
            .with_context(|| format!("failed to mark step as {verb}"))?;

        self.renderer.render(&format!(
            "Step '{}' in plan '{}' marked as {verb}\n",
            params.step_id, params.plan
        ))
    }

    async fn add_step(&self, params: &AddStep) -> Result<()> {
        let step = self
            .planner
            .add_step_to_plan(params)
            .await
            .context("failed to add step")?;

        self.renderer.render(&format!(
            "Added step '{}' to plan '{}'\n",
            step.id(),
            params.plan
        ))
    }

    async fn remove_steps(&self, params: RemoveSteps) -> Result<()> {
        let removal = self
            .planner
            .remove_steps_from_plan(&params)
            .await
            .context("failed to remove steps")?;

        self.renderer.render(&removal.to_string())?;

        if removal.has_missing() {
            bail!("one or more steps could not be removed");
        }
        Ok(())
    }

    async fn reorder_steps(&self, params: ReorderSteps) -> Result<()> {
        self.planner
            .reorder_plan_steps(&params)
            .await
            .context("failed to reorder steps")?;

        self.renderer
            .render(&format!("Reordered steps in plan '{}'\n", params.plan))
    }

    async fn remove_plans(&self, params: RemovePlans) -> Result<()> {
        let report = self
            .planner
            .remove_plans_by_name(&params)
            .await
            .context("failed to remove plans")?;

        self.renderer.render(&report.to_string())?;

        if !report.is_success() {
            bail!("one or more plans could not be removed");
        }
        Ok(())
    }

    async fn is_completed(&self, params: &PlanName) -> Result<ExitCode> {
        let completed = self
            .planner
            .is_plan_completed(params)
            .await
            .context("failed to get plan")?;

        self.renderer.render(&format!("{completed}\n"))?;

        Ok(if completed {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        })
    }

    async fn compact(&self) -> Result<()> {
        let report = self
            .planner
            .compact_plans()
            .await
            .context("failed to compact plans")?;

        if report.is_empty() {
            self.renderer.render("No completed plans to compact.\n")
        } else {
            self.renderer.render(&report.to_string())
        }
    }
}
