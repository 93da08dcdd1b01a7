//! Plan-level workflows used by the command line and MCP interfaces.

use log::info;

use super::Planner;
use crate::{
    display::PlanSummaries,
    error::Result,
    models::{Plan, RemovalReport, Step},
    params::{PlanName, RemovePlans},
};

impl Planner {
    /// Handle creating and storing a new, empty plan.
    ///
    /// # Errors
    ///
    /// * `PlannerError::InvalidInput` - the name is empty
    /// * `PlannerError::PlanAlreadyExists` - a plan with this name is stored
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// # use tasked_core::{params::PlanName, PlannerBuilder};
    /// # async {
    /// let planner = PlannerBuilder::new().build().await?;
    /// let plan = planner.new_plan(&PlanName::new("release")).await?;
    /// assert!(!plan.is_new());
    /// # Result::<(), tasked_core::PlannerError>::Ok(())
    /// # };
    /// ```
    pub async fn new_plan(&self, params: &PlanName) -> Result<Plan> {
        let mut plan = self.create_plan(&params.name)?;
        self.save_plan(&mut plan).await?;
        info!("created plan '{}'", plan.id());
        Ok(plan)
    }

    /// Handle listing every plan with its step counts.
    pub async fn list_plans_summary(&self) -> Result<PlanSummaries> {
        Ok(PlanSummaries(self.list_plans().await?))
    }

    /// Handle loading a plan for inspection.
    ///
    /// The returned plan renders the inspect text through `Display`.
    pub async fn inspect_plan(&self, params: &PlanName) -> Result<Plan> {
        self.get_plan(&params.name).await
    }

    /// Handle finding the first step that is not done yet.
    ///
    /// `None` means the plan is complete (or has no steps).
    pub async fn next_step(&self, params: &PlanName) -> Result<Option<Step>> {
        let plan = self.get_plan(&params.name).await?;
        Ok(plan.next_step().cloned())
    }

    /// Handle checking whether every step of a plan is done.
    pub async fn is_plan_completed(&self, params: &PlanName) -> Result<bool> {
        let plan = self.get_plan(&params.name).await?;
        Ok(plan.is_completed())
    }

    /// Handle removing whole plans.
    ///
    /// Per-plan failures are reported in the returned [`RemovalReport`];
    /// only a failure to start the transaction is returned as an error.
    pub async fn remove_plans_by_name(&self, params: &RemovePlans) -> Result<RemovalReport> {
        self.remove_plans(&params.names).await
    }

    /// Handle removing every plan that has no steps or only finished steps.
    ///
    /// # Errors
    ///
    /// `PlannerError::CompactionFailed` if any candidate could not be removed.
    pub async fn compact_plans(&self) -> Result<RemovalReport> {
        self.compact().await
    }
}
