//! Result wrapper types for displaying operation outcomes.

use std::fmt;

use crate::models::{RemovalOutcome, RemovalReport, Step};

impl fmt::Display for RemovalReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, outcome) in self {
            match outcome.error_message(name) {
                None => writeln!(f, "Removed plan '{name}'")?,
                Some(error) => writeln!(f, "Failed to remove plan '{name}': {error}")?,
            }
        }
        Ok(())
    }
}

impl fmt::Display for RemovalOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RemovalOutcome::Removed => f.write_str("removed"),
            RemovalOutcome::NotFound => f.write_str("not found"),
            RemovalOutcome::Failed { reason } => write!(f, "failed: {reason}"),
            RemovalOutcome::RolledBack { reason } => write!(f, "rolled back: {reason}"),
        }
    }
}

/// Outcome of removing steps from one plan, in request order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepRemoval {
    pub plan: String,
    /// `(step id, was removed)` per distinct requested id
    pub outcomes: Vec<(String, bool)>,
}

impl StepRemoval {
    pub fn removed_count(&self) -> usize {
        self.outcomes.iter().filter(|(_, removed)| *removed).count()
    }

    /// Ids that did not match any step.
    pub fn missing(&self) -> impl Iterator<Item = &str> {
        self.outcomes
            .iter()
            .filter(|(_, removed)| !removed)
            .map(|(id, _)| id.as_str())
    }

    pub fn has_missing(&self) -> bool {
        self.missing().next().is_some()
    }
}

impl fmt::Display for StepRemoval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (step_id, removed) in &self.outcomes {
            if *removed {
                writeln!(f, "Removed step '{step_id}' from plan '{}'", self.plan)?;
            } else {
                writeln!(f, "Step '{step_id}' not found in plan '{}'", self.plan)?;
            }
        }
        Ok(())
    }
}

/// The next step to work on in a plan, or the note that there is none.
///
/// # Examples
///
/// ```rust
/// use tasked_core::{display::NextStep, models::Step};
///
/// let step = Step::new("build", "Build artifacts", vec!["binaries exist".into()], vec![]);
/// let output = NextStep::new("release", Some(step)).to_string();
/// assert!(output.starts_with("Next step: build\nStatus: TODO\n"));
///
/// let done = NextStep::new("release", None).to_string();
/// assert_eq!(done, "Plan 'release' is completed - all steps are done!\n");
/// ```
pub struct NextStep {
    pub plan: String,
    pub step: Option<Step>,
}

impl NextStep {
    pub fn new(plan: impl Into<String>, step: Option<Step>) -> Self {
        Self {
            plan: plan.into(),
            step,
        }
    }
}

impl fmt::Display for NextStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(step) = &self.step else {
            return writeln!(
                f,
                "Plan '{}' is completed - all steps are done!",
                self.plan
            );
        };

        writeln!(f, "Next step: {}", step.id())?;
        writeln!(f, "Status: {}", step.status())?;
        writeln!(f)?;
        writeln!(f, "{}", step.description())?;

        if !step.acceptance_criteria().is_empty() {
            writeln!(f)?;
            writeln!(f, "Acceptance Criteria:")?;
            for (index, criterion) in step.acceptance_criteria().iter().enumerate() {
                writeln!(f, "{}. {criterion}", index + 1)?;
            }
        }

        if !step.references().is_empty() {
            writeln!(f)?;
            writeln!(f, "References:")?;
            for reference in step.references() {
                writeln!(f, "- {reference}")?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_removal_report_display() {
        let mut report = RemovalReport::new();
        report.push("old", RemovalOutcome::Removed);
        report.push("ghost", RemovalOutcome::NotFound);

        assert_eq!(
            report.to_string(),
            "Removed plan 'old'\n\
             Failed to remove plan 'ghost': plan 'ghost' not found for deletion\n"
        );
    }

    #[test]
    fn test_step_removal_display() {
        let removal = StepRemoval {
            plan: "p".into(),
            outcomes: vec![("a".into(), true), ("zzz".into(), false)],
        };
        assert_eq!(removal.removed_count(), 1);
        assert!(removal.has_missing());
        assert_eq!(
            removal.to_string(),
            "Removed step 'a' from plan 'p'\nStep 'zzz' not found in plan 'p'\n"
        );
    }

    #[test]
    fn test_next_step_with_criteria() {
        let step = Step::new("s1", "d1", vec!["c1".into(), "c2".into()], vec![]);
        assert_eq!(
            NextStep::new("p", Some(step)).to_string(),
            "Next step: s1\nStatus: TODO\n\nd1\n\nAcceptance Criteria:\n1. c1\n2. c2\n"
        );
    }
}
