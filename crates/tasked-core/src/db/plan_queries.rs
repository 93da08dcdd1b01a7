//! Plan reads, listing and bulk removal.

use jiff::{Timestamp, civil::DateTime, tz::TimeZone};
use log::{debug, info, warn};
use rusqlite::{Connection, OptionalExtension, params};

use crate::{
    error::{DatabaseResultExt, PlannerError, Result},
    models::{Plan, PlanSummary, RemovalOutcome, RemovalReport},
};

const SELECT_PLAN_ID_SQL: &str = "SELECT id FROM plans WHERE id = ?1";
const DELETE_PLAN_SQL: &str = "DELETE FROM plans WHERE id = ?1";

const LIST_PLAN_SUMMARIES_SQL: &str = "
    SELECT
        p.id,
        p.updated_at,
        COUNT(s.id),
        COALESCE(SUM(CASE WHEN UPPER(s.status) = 'DONE' THEN 1 ELSE 0 END), 0)
    FROM plans p
    LEFT JOIN steps s ON p.id = s.plan_id
    GROUP BY p.id
    ORDER BY p.id";

const SELECT_COMPLETED_PLAN_IDS_SQL: &str = "
    SELECT p.id
    FROM plans p
    LEFT JOIN steps s ON p.id = s.plan_id
    GROUP BY p.id
    HAVING COUNT(s.id) = 0
        OR SUM(CASE WHEN UPPER(s.status) = 'DONE' THEN 1 ELSE 0 END) = COUNT(s.id)
    ORDER BY p.id";

/// Parses a stored timestamp.
///
/// SQLite's `CURRENT_TIMESTAMP` writes `YYYY-MM-DD HH:MM:SS` in UTC; RFC 3339
/// is accepted as well. Anything else yields `None`.
pub(crate) fn parse_stored_timestamp(value: &str) -> Option<Timestamp> {
    if let Ok(timestamp) = value.parse::<Timestamp>() {
        return Some(timestamp);
    }

    DateTime::strptime("%Y-%m-%d %H:%M:%S", value)
        .and_then(|datetime| datetime.to_zoned(TimeZone::UTC))
        .map(|zoned| zoned.timestamp())
        .ok()
}

impl super::Database {
    pub(super) fn plan_exists(conn: &Connection, name: &str) -> Result<bool> {
        conn.query_row(SELECT_PLAN_ID_SQL, params![name], |row| row.get::<_, String>(0))
            .optional()
            .db_context_with(|| format!("Failed to verify existence of plan '{name}'"))
            .map(|found| found.is_some())
    }

    /// Loads a plan with all of its steps, criteria and references.
    ///
    /// # Errors
    ///
    /// Returns `PlannerError::PlanNotFound` if no plan has this name.
    pub fn get_plan(&self, name: &str) -> Result<Plan> {
        if !Self::plan_exists(&self.connection, name)? {
            return Err(PlannerError::plan_not_found(name));
        }

        let steps = Self::load_steps(&self.connection, name)?;
        Ok(Plan::from_storage(name.to_string(), steps))
    }

    /// Summaries of every stored plan, ordered by name.
    pub fn list_plans(&self) -> Result<Vec<PlanSummary>> {
        let mut stmt = self
            .connection
            .prepare(LIST_PLAN_SUMMARIES_SQL)
            .db_context("Failed to prepare plan summary query")?;

        let summaries = stmt
            .query_map([], |row| {
                let name: String = row.get(0)?;
                let updated_at: Option<String> = row.get(1)?;
                let total: i64 = row.get(2)?;
                let completed: i64 = row.get(3)?;

                Ok(PlanSummary::from_counts(
                    name,
                    u32::try_from(total).unwrap_or(u32::MAX),
                    u32::try_from(completed).unwrap_or(u32::MAX),
                )
                .with_updated_at(updated_at.as_deref().and_then(parse_stored_timestamp)))
            })
            .db_context("Failed to query plan summaries")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch plan summaries")?;

        Ok(summaries)
    }

    /// Names of plans that have no steps or only `DONE` steps.
    pub fn completed_plan_ids(&self) -> Result<Vec<String>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_COMPLETED_PLAN_IDS_SQL)
            .db_context("Failed to prepare completed plans query")?;

        let ids = stmt
            .query_map([], |row| row.get(0))
            .db_context("Failed to query completed plans for compaction")?
            .collect::<std::result::Result<Vec<String>, _>>()
            .db_context("Failed to fetch completed plan ids");
        ids
    }

    /// Deletes the named plans in one transaction.
    ///
    /// Each distinct name gets one entry in the returned report, in request
    /// order. Steps, criteria and references go with their plan through the
    /// cascading foreign keys.
    ///
    /// Nothing is committed unless every name was deleted. A name that matches
    /// no plan keeps its `NotFound` entry, a failed delete keeps its `Failed`
    /// entry, and in either case, or when the commit itself fails, every entry
    /// that looked removed is reported as `RolledBack`.
    ///
    /// # Errors
    ///
    /// Returns `PlannerError::Database` only when the transaction cannot be
    /// started or the delete statement cannot be prepared.
    pub fn remove_plans<S: AsRef<str>>(&mut self, names: &[S]) -> Result<RemovalReport> {
        let tx = self.write_transaction()?;

        let mut report = RemovalReport::new();
        {
            let mut stmt = tx
                .prepare(DELETE_PLAN_SQL)
                .db_context("Failed to prepare delete statement")?;

            for name in names {
                let name = name.as_ref();
                if report.contains(name) {
                    continue;
                }

                let outcome = match stmt.execute(params![name]) {
                    Ok(0) => RemovalOutcome::NotFound,
                    Ok(_) => RemovalOutcome::Removed,
                    Err(e) => RemovalOutcome::Failed {
                        reason: e.to_string(),
                    },
                };
                report.push(name, outcome);
            }
        }

        if let Some(reason) = report.first_error() {
            warn!("rolling back plan removal: {reason}");
            if let Err(e) = tx.rollback() {
                warn!("rollback of plan removal failed: {e}");
            }
            report.revise_removed(&format!("transaction rolled back after: {reason}"));
            return Ok(report);
        }

        if let Err(e) = tx.commit() {
            warn!("commit of plan removal failed: {e}");
            report.revise_removed(&format!("transaction commit failed: {e}"));
            return Ok(report);
        }

        info!("removed {} plan(s)", report.removed().count());
        Ok(report)
    }

    /// Removes every plan that has no steps or only `DONE` steps.
    ///
    /// # Errors
    ///
    /// Returns `PlannerError::CompactionFailed` carrying the number of failed
    /// entries and the first error text if any removal did not go through.
    pub fn compact(&mut self) -> Result<RemovalReport> {
        let candidates = self.completed_plan_ids()?;
        if candidates.is_empty() {
            debug!("nothing to compact");
            return Ok(RemovalReport::new());
        }

        let report = self.remove_plans(&candidates)?;
        if !report.is_success() {
            return Err(PlannerError::CompactionFailed {
                error_count: report.error_count(),
                first_error: report.first_error().unwrap_or_default(),
            });
        }

        info!("compacted {} plan(s)", report.len());
        Ok(report)
    }
}
