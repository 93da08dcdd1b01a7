//! Store operations for the Planner, one blocking task each.

use super::Planner;
use crate::{
    error::Result,
    models::{Plan, PlanSummary, RemovalReport},
};

impl Planner {
    /// Builds a new, unsaved plan. Storage is not consulted.
    ///
    /// # Errors
    ///
    /// Returns `PlannerError::InvalidInput` if `name` is empty.
    pub fn create_plan(&self, name: &str) -> Result<Plan> {
        Plan::new(name)
    }

    /// Loads a plan with all of its steps.
    pub async fn get_plan(&self, name: &str) -> Result<Plan> {
        let name = name.to_string();
        self.with_database(move |db| db.get_plan(&name)).await
    }

    /// Saves `plan`.
    ///
    /// The save runs on a copy; `plan` is only replaced, and so only becomes
    /// `Persisted`, when the transaction commits.
    pub async fn save_plan(&self, plan: &mut Plan) -> Result<()> {
        let mut working = plan.clone();
        let saved = self
            .with_database(move |db| {
                db.save_plan(&mut working)?;
                Ok(working)
            })
            .await?;
        *plan = saved;
        Ok(())
    }

    /// Summaries of every stored plan.
    pub async fn list_plans(&self) -> Result<Vec<PlanSummary>> {
        self.with_database(|db| db.list_plans()).await
    }

    /// Removes the named plans in one transaction.
    pub async fn remove_plans(&self, names: &[String]) -> Result<RemovalReport> {
        let names = names.to_vec();
        self.with_database(move |db| db.remove_plans(&names)).await
    }

    /// Removes every plan with no steps or only finished steps.
    pub async fn compact(&self) -> Result<RemovalReport> {
        self.with_database(|db| db.compact()).await
    }
}
