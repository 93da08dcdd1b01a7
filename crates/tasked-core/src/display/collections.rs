//! Collection wrapper types for displaying groups of domain objects.

use std::{fmt, ops::Index};

use super::datetime::LocalDateTime;
use crate::models::PlanSummary;

/// Newtype wrapper for displaying the plan list.
///
/// One line per plan, `No plans found.` when empty.
///
/// # Examples
///
/// ```rust
/// use tasked_core::{display::PlanSummaries, models::PlanSummary};
///
/// let summaries = PlanSummaries(vec![
///     PlanSummary::from_counts("release".to_string(), 3, 1),
///     PlanSummary::from_counts("cleanup".to_string(), 0, 0),
/// ]);
///
/// assert_eq!(
///     summaries.to_string(),
///     "release [TODO] (1/3 tasks completed)\ncleanup [TODO] (no tasks)\n"
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct PlanSummaries(pub Vec<PlanSummary>);

impl PlanSummaries {
    /// Check if the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Get the number of plan summaries in the collection.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Get a reference to the plan summary at the given index.
    pub fn get(&self, index: usize) -> Option<&PlanSummary> {
        self.0.get(index)
    }

    /// Get an iterator over the plan summaries.
    pub fn iter(&self) -> std::slice::Iter<'_, PlanSummary> {
        self.0.iter()
    }

    /// Wraps the list so that each line also shows when the plan last changed.
    pub fn with_timestamps(&self) -> TimestampedSummaries<'_> {
        TimestampedSummaries(self)
    }
}

impl Index<usize> for PlanSummaries {
    type Output = PlanSummary;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl IntoIterator for PlanSummaries {
    type Item = PlanSummary;
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a PlanSummaries {
    type Item = &'a PlanSummary;
    type IntoIter = std::slice::Iter<'a, PlanSummary>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for PlanSummaries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No plans found.");
        }
        for summary in &self.0 {
            writeln!(f, "{summary}")?;
        }
        Ok(())
    }
}

/// Plan list with an `updated` suffix on plans whose timestamp is known.
pub struct TimestampedSummaries<'a>(&'a PlanSummaries);

impl fmt::Display for TimestampedSummaries<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No plans found.");
        }
        for summary in self.0 {
            match &summary.updated_at {
                Some(updated_at) => {
                    writeln!(f, "{summary} - updated {}", LocalDateTime(updated_at))?
                }
                None => writeln!(f, "{summary}")?,
            }
        }
        Ok(())
    }
}
