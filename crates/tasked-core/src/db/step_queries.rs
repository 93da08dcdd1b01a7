//! Step, acceptance criterion and reference rows.
//!
//! The readers hydrate [`Step`]s for a plan. The writers are used by the
//! synchronization engine inside its transaction, which is why everything here
//! takes a plain `&Connection` (a `Transaction` derefs to one).

use std::collections::HashSet;

use rusqlite::{Connection, params, types::Type};

use crate::{
    error::{DatabaseResultExt, Result},
    models::{Step, StepStatus},
};

const SELECT_STEPS_BY_PLAN_SQL: &str =
    "SELECT id, description, status, step_order FROM steps WHERE plan_id = ?1 ORDER BY step_order";
const SELECT_STEP_IDS_SQL: &str = "SELECT id FROM steps WHERE plan_id = ?1";
const SELECT_CRITERIA_SQL: &str = "SELECT criterion FROM step_acceptance_criteria \
     WHERE plan_id = ?1 AND step_id = ?2 ORDER BY criterion_order";
const SELECT_REFERENCES_SQL: &str = "SELECT reference FROM step_references \
     WHERE plan_id = ?1 AND step_id = ?2 ORDER BY reference_order";

const INSERT_STEP_SQL: &str =
    "INSERT INTO steps (id, plan_id, description, status, step_order) VALUES (?1, ?2, ?3, ?4, ?5)";
const UPDATE_STEP_SQL: &str = "UPDATE steps SET description = ?1, status = ?2, step_order = ?3 \
     WHERE plan_id = ?4 AND id = ?5";
const DELETE_STEP_SQL: &str = "DELETE FROM steps WHERE plan_id = ?1 AND id = ?2";

const DELETE_CRITERIA_SQL: &str =
    "DELETE FROM step_acceptance_criteria WHERE plan_id = ?1 AND step_id = ?2";
const INSERT_CRITERION_SQL: &str = "INSERT INTO step_acceptance_criteria \
     (plan_id, step_id, criterion_order, criterion) VALUES (?1, ?2, ?3, ?4)";
const DELETE_REFERENCES_SQL: &str =
    "DELETE FROM step_references WHERE plan_id = ?1 AND step_id = ?2";
const INSERT_REFERENCE_SQL: &str = "INSERT INTO step_references \
     (plan_id, step_id, reference_order, reference) VALUES (?1, ?2, ?3, ?4)";

impl super::Database {
    /// Helper function to construct a Step from a database row.
    ///
    /// Status is parsed case-insensitively so rows written with other casing
    /// still read back as `TODO`/`DONE`.
    fn build_step_from_row(row: &rusqlite::Row) -> rusqlite::Result<Step> {
        let status_str: String = row.get(2)?;
        let status = status_str.parse::<StepStatus>().map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(2, Type::Text, e.into())
        })?;

        let description: Option<String> = row.get(1)?;
        let order: i64 = row.get(3)?;

        Ok(Step::from_storage(
            row.get(0)?,
            description.unwrap_or_default(),
            status,
            usize::try_from(order).unwrap_or_default(),
        ))
    }

    /// Loads every step of a plan ordered by stored position, with criteria
    /// and references attached.
    pub(super) fn load_steps(conn: &Connection, plan_id: &str) -> Result<Vec<Step>> {
        let mut stmt = conn
            .prepare_cached(SELECT_STEPS_BY_PLAN_SQL)
            .db_context("Failed to prepare steps query")?;

        let mut steps = stmt
            .query_map(params![plan_id], Self::build_step_from_row)
            .db_context("Failed to query steps")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch steps")?;

        for step in &mut steps {
            let step_id = step.id().to_string();
            let criteria = Self::load_children(conn, SELECT_CRITERIA_SQL, plan_id, &step_id)
                .db_context_with(|| {
                    format!("Failed to load acceptance criteria for step '{step_id}'")
                })?;
            let references = Self::load_children(conn, SELECT_REFERENCES_SQL, plan_id, &step_id)
                .db_context_with(|| format!("Failed to load references for step '{step_id}'"))?;

            *step.acceptance_criteria_mut() = criteria;
            *step.references_mut() = references;
        }

        Ok(steps)
    }

    fn load_children(
        conn: &Connection,
        sql: &str,
        plan_id: &str,
        step_id: &str,
    ) -> rusqlite::Result<Vec<String>> {
        let mut stmt = conn.prepare_cached(sql)?;
        let rows = stmt.query_map(params![plan_id, step_id], |row| row.get(0))?;
        rows.collect()
    }

    /// Ids of the steps currently stored for a plan.
    pub(super) fn stored_step_ids(conn: &Connection, plan_id: &str) -> Result<HashSet<String>> {
        let mut stmt = conn
            .prepare_cached(SELECT_STEP_IDS_SQL)
            .db_context("Failed to prepare step id query")?;

        let ids = stmt
            .query_map(params![plan_id], |row| row.get(0))
            .db_context_with(|| format!("Failed to query existing steps for plan '{plan_id}'"))?
            .collect::<std::result::Result<HashSet<String>, _>>()
            .db_context("Failed to fetch existing step ids");
        ids
    }

    pub(super) fn insert_step_row(conn: &Connection, plan_id: &str, step: &Step) -> Result<()> {
        conn.execute(
            INSERT_STEP_SQL,
            params![
                step.id(),
                plan_id,
                step.description(),
                step.status().as_str(),
                step.order() as i64
            ],
        )
        .db_context_with(|| format!("Failed to insert step '{}' into plan '{plan_id}'", step.id()))?;
        Ok(())
    }

    pub(super) fn update_step_row(conn: &Connection, plan_id: &str, step: &Step) -> Result<()> {
        conn.execute(
            UPDATE_STEP_SQL,
            params![
                step.description(),
                step.status().as_str(),
                step.order() as i64,
                plan_id,
                step.id()
            ],
        )
        .db_context_with(|| format!("Failed to update step '{}' in plan '{plan_id}'", step.id()))?;
        Ok(())
    }

    /// Deletes a step and its children, children first.
    pub(super) fn delete_step_row(conn: &Connection, plan_id: &str, step_id: &str) -> Result<()> {
        conn.execute(DELETE_CRITERIA_SQL, params![plan_id, step_id])
            .db_context_with(|| {
                format!("Failed to delete acceptance criteria for step '{step_id}' in plan '{plan_id}'")
            })?;
        conn.execute(DELETE_REFERENCES_SQL, params![plan_id, step_id])
            .db_context_with(|| {
                format!("Failed to delete references for step '{step_id}' in plan '{plan_id}'")
            })?;
        conn.execute(DELETE_STEP_SQL, params![plan_id, step_id])
            .db_context_with(|| format!("Failed to delete step '{step_id}' from plan '{plan_id}'"))?;
        Ok(())
    }

    /// Replaces the stored criteria and references of a step with the
    /// in-memory lists, positions taken from list order.
    pub(super) fn replace_step_children(
        conn: &Connection,
        plan_id: &str,
        step: &Step,
    ) -> Result<()> {
        let step_id = step.id();

        conn.execute(DELETE_CRITERIA_SQL, params![plan_id, step_id])
            .db_context_with(|| {
                format!("Failed to delete old acceptance criteria for step '{step_id}'")
            })?;
        let mut insert = conn
            .prepare_cached(INSERT_CRITERION_SQL)
            .db_context("Failed to prepare criterion insert")?;
        for (order, criterion) in step.acceptance_criteria().iter().enumerate() {
            insert
                .execute(params![plan_id, step_id, order as i64, criterion])
                .db_context_with(|| {
                    format!("Failed to insert acceptance criterion for step '{step_id}'")
                })?;
        }

        conn.execute(DELETE_REFERENCES_SQL, params![plan_id, step_id])
            .db_context_with(|| format!("Failed to delete old references for step '{step_id}'"))?;
        let mut insert = conn
            .prepare_cached(INSERT_REFERENCE_SQL)
            .db_context("Failed to prepare reference insert")?;
        for (order, reference) in step.references().iter().enumerate() {
            insert
                .execute(params![plan_id, step_id, order as i64, reference])
                .db_context_with(|| format!("Failed to insert reference for step '{step_id}'"))?;
        }

        Ok(())
    }
}
