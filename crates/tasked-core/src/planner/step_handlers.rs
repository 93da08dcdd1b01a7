//! Step-level workflows: each loads a plan, edits it in memory and saves it.

use super::Planner;
use crate::{
    display::StepRemoval,
    error::{PlannerError, Result},
    models::{Plan, Step, StepStatus},
    params::{AddStep, RemoveSteps, ReorderSteps, SetStepStatus},
};

impl Planner {
    /// Handle adding a step to a plan.
    ///
    /// Unlike [`Plan::add_step`], this rejects a step id that is already used
    /// in the plan before anything is written. With `after` set, the new step
    /// is placed directly after that step.
    ///
    /// # Errors
    ///
    /// * `PlannerError::InvalidInput` - empty names or a duplicate step id
    /// * `PlannerError::PlanNotFound` - the plan does not exist
    /// * `PlannerError::StepNotFound` - `after` names an unknown step
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// # use tasked_core::{params::AddStep, PlannerBuilder};
    /// # async {
    /// let planner = PlannerBuilder::new().build().await?;
    /// let step = planner
    ///     .add_step_to_plan(&AddStep {
    ///         plan: "release".into(),
    ///         id: "changelog".into(),
    ///         description: "Write the changelog".into(),
    ///         after: Some("build".into()),
    ///         ..Default::default()
    ///     })
    ///     .await?;
    /// # Result::<(), tasked_core::PlannerError>::Ok(())
    /// # };
    /// ```
    pub async fn add_step_to_plan(&self, params: &AddStep) -> Result<Step> {
        params.validate()?;

        let mut plan = self.get_plan(&params.plan).await?;

        if plan.step(&params.id).is_some() {
            return Err(PlannerError::invalid_input("id").with_reason(format!(
                "step with ID '{}' already exists in plan '{}'",
                params.id, params.plan
            )));
        }

        let anchor = match params.after.as_deref() {
            Some(after) => Some(
                plan.position_of(after)
                    .ok_or_else(|| PlannerError::step_not_found(plan.id(), after))?,
            ),
            None => None,
        };

        plan.add_step(
            params.id.as_str(),
            params.description.as_str(),
            params.acceptance_criteria.clone(),
            params.references.clone(),
        );

        if let Some(position) = anchor {
            let mut order: Vec<String> = plan.steps()[..=position]
                .iter()
                .map(|step| step.id().to_string())
                .collect();
            order.push(params.id.clone());
            plan.reorder(&order);
        }

        self.save_plan(&mut plan).await?;
        stored_step(&plan, &params.id)
    }

    /// Handle marking a step as completed or incomplete.
    pub async fn set_step_status(&self, params: &SetStepStatus) -> Result<Step> {
        let mut plan = self.get_plan(&params.plan).await?;
        match StepStatus::from(params.status) {
            StepStatus::Done => plan.mark_as_completed(&params.step_id)?,
            StepStatus::Todo => plan.mark_as_incomplete(&params.step_id)?,
        }
        self.save_plan(&mut plan).await?;
        stored_step(&plan, &params.step_id)
    }

    /// Handle removing steps from a plan.
    ///
    /// Unknown ids are reported in the result rather than failing the call.
    /// The plan is only saved when something was removed.
    pub async fn remove_steps_from_plan(&self, params: &RemoveSteps) -> Result<StepRemoval> {
        let mut plan = self.get_plan(&params.plan).await?;

        let mut outcomes: Vec<(String, bool)> = Vec::with_capacity(params.step_ids.len());
        for step_id in &params.step_ids {
            if !outcomes.iter().any(|(seen, _)| seen == step_id) {
                outcomes.push((step_id.clone(), plan.step(step_id).is_some()));
            }
        }

        if plan.remove_steps(&params.step_ids) > 0 {
            self.save_plan(&mut plan).await?;
        }

        Ok(StepRemoval {
            plan: params.plan.clone(),
            outcomes,
        })
    }

    /// Handle reordering the steps of a plan.
    ///
    /// Every listed id must exist in the plan; steps left out keep their
    /// relative order after the listed ones.
    pub async fn reorder_plan_steps(&self, params: &ReorderSteps) -> Result<Plan> {
        let mut plan = self.get_plan(&params.plan).await?;

        if let Some(missing) = params
            .step_ids
            .iter()
            .find(|step_id| plan.step(step_id).is_none())
        {
            return Err(PlannerError::step_not_found(plan.id(), missing.as_str()));
        }

        plan.reorder(&params.step_ids);
        self.save_plan(&mut plan).await?;
        Ok(plan)
    }
}

fn stored_step(plan: &Plan, step_id: &str) -> Result<Step> {
    plan.step(step_id)
        .cloned()
        .ok_or_else(|| PlannerError::step_not_found(plan.id(), step_id))
}
