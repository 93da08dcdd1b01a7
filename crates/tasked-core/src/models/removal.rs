//! Per-plan outcomes of a bulk removal.

use serde::Serialize;

/// What happened to a single plan named in a removal request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RemovalOutcome {
    /// The plan and everything it owned were deleted and committed
    Removed,
    /// No plan with this name existed
    NotFound,
    /// Deleting this plan failed
    Failed { reason: String },
    /// The delete succeeded but the surrounding transaction did not commit
    RolledBack { reason: String },
}

impl RemovalOutcome {
    pub fn is_removed(&self) -> bool {
        matches!(self, RemovalOutcome::Removed)
    }

    /// Error text for every outcome other than `Removed`.
    pub fn error_message(&self, name: &str) -> Option<String> {
        match self {
            RemovalOutcome::Removed => None,
            RemovalOutcome::NotFound => Some(format!("plan '{name}' not found for deletion")),
            RemovalOutcome::Failed { reason } => {
                Some(format!("failed to execute delete for plan '{name}': {reason}"))
            }
            RemovalOutcome::RolledBack { reason } => Some(format!(
                "removal of plan '{name}' was rolled back: {reason}"
            )),
        }
    }
}

/// Ordered `(name, outcome)` pairs, one per distinct requested name, in
/// request order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemovalReport {
    entries: Vec<(String, RemovalOutcome)>,
}

impl RemovalReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, name: impl Into<String>, outcome: RemovalOutcome) {
        self.entries.push((name.into(), outcome));
    }

    /// Whether `name` already has an entry.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(entry, _)| entry == name)
    }

    /// Outcome recorded for `name`.
    pub fn outcome(&self, name: &str) -> Option<&RemovalOutcome> {
        self.entries
            .iter()
            .find(|(entry, _)| entry == name)
            .map(|(_, outcome)| outcome)
    }

    /// Rewrite every `Removed` entry after the transaction failed to commit.
    pub(crate) fn revise_removed(&mut self, reason: &str) {
        for (_, outcome) in &mut self.entries {
            if outcome.is_removed() {
                *outcome = RemovalOutcome::RolledBack {
                    reason: reason.to_string(),
                };
            }
        }
    }

    /// True when every named plan was removed.
    pub fn is_success(&self) -> bool {
        self.entries.iter().all(|(_, outcome)| outcome.is_removed())
    }

    /// Number of entries that are not `Removed`.
    pub fn error_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|(_, outcome)| !outcome.is_removed())
            .count()
    }

    /// Error text of the first non-`Removed` entry, in request order.
    pub fn first_error(&self) -> Option<String> {
        self.entries
            .iter()
            .find_map(|(name, outcome)| outcome.error_message(name))
    }

    /// Names that were removed and committed.
    pub fn removed(&self) -> impl Iterator<Item = &str> {
        self.entries
            .iter()
            .filter(|(_, outcome)| outcome.is_removed())
            .map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, (String, RemovalOutcome)> {
        self.entries.iter()
    }
}

impl<'a> IntoIterator for &'a RemovalReport {
    type Item = &'a (String, RemovalOutcome);
    type IntoIter = std::slice::Iter<'a, (String, RemovalOutcome)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
