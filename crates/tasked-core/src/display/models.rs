//! Display implementations for domain models.
//!
//! `Plan`'s `Display` is the inspect rendering: one section per step, numbered
//! from 1, with the description, acceptance criteria and references each shown
//! only when present. A standalone `Step` renders the same body under an
//! unnumbered heading. `PlanSummary` renders as a single list line.

use std::fmt;

use crate::models::{Plan, PlanSummary, Step, StepStatus};

impl fmt::Display for StepStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Step {
    fn fmt_body(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.description().is_empty() {
            writeln!(f)?;
            writeln!(f, "{}", self.description())?;
        }
        writeln!(f)?;

        if !self.acceptance_criteria().is_empty() {
            writeln!(f, "Acceptance Criteria:")?;
            for (index, criterion) in self.acceptance_criteria().iter().enumerate() {
                writeln!(f, "{}. {criterion}", index + 1)?;
            }
            writeln!(f)?;
        }

        if !self.references().is_empty() {
            writeln!(f, "References:")?;
            for reference in self.references() {
                writeln!(f, "- {reference}")?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## [{}] {}", self.status(), self.id())?;
        self.fmt_body(f)
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, step) in self.steps().iter().enumerate() {
            writeln!(f, "## {}. [{}] {}", index + 1, step.status(), step.id())?;
            step.fmt_body(f)?;
        }
        Ok(())
    }
}

impl fmt::Display for PlanSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.total_tasks == 0 {
            write!(f, "{} [{}] (no tasks)", self.name, self.status)
        } else {
            write!(
                f,
                "{} [{}] ({}/{} tasks completed)",
                self.name, self.status, self.completed_tasks, self.total_tasks
            )
        }
    }
}
