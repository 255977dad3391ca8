//! Builds the read-only view the UI renders after every transition.

use crate::equivalence::{expand, project};
use crate::ledger::SubmissionLedger;
use crate::model::{Contest, Problem};
use crate::store::RootState;

/// Derived data: projected ledger plus the expanded, status-annotated catalogs.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct View {
    pub ledger: SubmissionLedger,
    pub problems: Vec<Problem>,
    pub contests: Vec<Contest>,
}

/// Raw slices together with the view derived from them.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Snapshot {
    pub state: RootState,
    pub view: View,
}

impl Snapshot {
    #[must_use]
    pub fn new(state: RootState) -> Self {
        let view = build(&state);
        Self { state, view }
    }

    /// Problems to list with the current preferences applied.
    pub fn visible_problems(&self) -> impl Iterator<Item = &Problem> {
        let prefs = &self.state.app_state;
        self.view
            .problems
            .iter()
            .filter(move |p| prefs.rating_in_range(p.rating()))
            .filter(move |p| !(prefs.hide_solved() && p.solved()))
    }
}

/// Recompute the view from raw slices. Pure and deterministic.
#[must_use]
pub fn build(state: &RootState) -> View {
    let shared = state.shared_problems.items();
    let ledger = project(&state.submissions, shared);
    let expanded = expand(
        state.problems.items(),
        shared,
        &ledger,
        state.contests.items(),
    );

    View {
        ledger,
        problems: expanded.problems,
        contests: expanded.contests,
    }
}
