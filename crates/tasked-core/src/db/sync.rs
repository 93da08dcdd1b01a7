//! Save-time reconciliation of an in-memory plan with its stored rows.

use std::collections::HashSet;

use log::{debug, warn};
use rusqlite::params;

use crate::{
    error::{DatabaseResultExt, PlannerError, Result, is_constraint_violation},
    models::Plan,
};

const INSERT_PLAN_SQL: &str = "INSERT INTO plans (id) VALUES (?1)";

impl super::Database {
    /// Persists `plan` and its steps in a single transaction.
    ///
    /// An `Unsaved` plan is inserted and a name clash is reported as
    /// `PlanAlreadyExists`. A `Persisted` plan must already be stored,
    /// otherwise `PlanNotFound` is returned. Stored steps missing from the
    /// plan are deleted, every remaining step gets its current position as
    /// its order, and criteria and references are rewritten wholesale.
    ///
    /// The plan is flipped to `Persisted` only once the commit succeeds. On
    /// any error the transaction is rolled back and nothing is written.
    pub fn save_plan(&mut self, plan: &mut Plan) -> Result<()> {
        let plan_id = plan.id().to_string();

        for (index, step) in plan.steps_mut().iter_mut().enumerate() {
            step.set_order(index);
        }

        let tx = self.write_transaction()?;

        if plan.is_new() {
            tx.execute(INSERT_PLAN_SQL, params![plan_id])
                .map_err(|e| {
                    if is_constraint_violation(&e) {
                        PlannerError::PlanAlreadyExists {
                            name: plan_id.clone(),
                        }
                    } else {
                        PlannerError::database(format!(
                            "Failed to insert new plan '{plan_id}' into database"
                        ))
                        .with_source(e)
                    }
                })
                .inspect_err(|e| warn!("save of plan '{plan_id}' rolled back: {e}"))?;
        } else if !Self::plan_exists(&tx, &plan_id)? {
            warn!("save of plan '{plan_id}' rolled back: plan is not stored");
            return Err(PlannerError::plan_not_found(plan_id));
        }

        let stored = Self::stored_step_ids(&tx, &plan_id)?;
        let current: HashSet<&str> = plan.steps().iter().map(|step| step.id()).collect();

        let mut deleted = 0usize;
        for stale in stored.iter().filter(|id| !current.contains(id.as_str())) {
            Self::delete_step_row(&tx, &plan_id, stale)?;
            deleted += 1;
        }

        let (mut updated, mut inserted) = (0usize, 0usize);
        let mut written: HashSet<&str> = HashSet::with_capacity(plan.steps().len());
        for step in plan.steps() {
            // A repeated id falls through to insert and hits the primary key
            if written.insert(step.id()) && stored.contains(step.id()) {
                Self::update_step_row(&tx, &plan_id, step)?;
                updated += 1;
            } else {
                Self::insert_step_row(&tx, &plan_id, step)?;
                inserted += 1;
            }
            Self::replace_step_children(&tx, &plan_id, step)?;
        }

        tx.commit()
            .db_context_with(|| format!("Failed to commit transaction for plan '{plan_id}'"))?;

        debug!(
            "saved plan '{plan_id}': {deleted} deleted, {updated} updated, {inserted} inserted"
        );
        plan.mark_persisted();
        Ok(())
    }
}
