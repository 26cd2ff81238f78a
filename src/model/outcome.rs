use std::fmt;

/// Per-record result of a run. Not persisted; only feeds logging and the
/// run-level summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryOutcome {
    /// The record went through the full entry cycle.
    Submitted,
    /// The record was incomplete and never touched the browser.
    Skipped(String),
    /// A mechanical failure ended the run on this record.
    Failed(String),
}

/// Outcomes of one transcription run, in row order.
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    outcomes: Vec<EntryOutcome>,
}

impl RunReport {
    pub fn push(&mut self, outcome: EntryOutcome) {
        self.outcomes.push(outcome);
    }

    pub fn outcomes(&self) -> &[EntryOutcome] {
        &self.outcomes
    }

    pub fn submitted(&self) -> usize {
        self.count(|o| matches!(o, EntryOutcome::Submitted))
    }

    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, EntryOutcome::Skipped(_)))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, EntryOutcome::Failed(_)))
    }

    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    fn count(&self, predicate: impl Fn(&EntryOutcome) -> bool) -> usize {
        self.outcomes.iter().filter(|o| predicate(o)).count()
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} submitted, {} skipped, {} failed ({} rows)",
            self.submitted(),
            self.skipped(),
            self.failed(),
            self.total()
        )
    }
}
