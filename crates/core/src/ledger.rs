//! Per-user accumulation of solved and attempted problems and contests.

use std::collections::BTreeSet;

use crate::model::{ContestId, ProblemId, ProblemRef, Status, Submission};

/// Solved/attempted sets built from judge submission batches.
///
/// `solved_problems` and `attempted_problems` are always disjoint, as are the
/// two contest sets. `id` is the watermark of the newest batch folded in.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SubmissionLedger {
    solved_problems: BTreeSet<ProblemId>,
    attempted_problems: BTreeSet<ProblemId>,
    solved_contests: BTreeSet<ContestId>,
    attempted_contests: BTreeSet<ContestId>,
    id: u64,
    loading: bool,
    error: Option<String>,
}

impl SubmissionLedger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold a submission batch tagged with `watermark` into the ledger.
    ///
    /// - equal watermark: accumulate into a copy of the current sets
    /// - greater watermark: start from empty sets at the new watermark
    /// - lower watermark: the batch is stale and `self` is returned as is
    ///
    /// Solved always wins over attempted once the batch is folded in.
    #[must_use]
    pub fn merge(&self, batch: &[Submission], watermark: u64) -> Self {
        let mut next = match watermark.cmp(&self.id) {
            std::cmp::Ordering::Less => return self.clone(),
            std::cmp::Ordering::Equal => Self {
                loading: false,
                error: None,
                ..self.clone()
            },
            std::cmp::Ordering::Greater => Self {
                id: watermark,
                ..Self::new()
            },
        };

        for submission in batch {
            if submission.is_accepted() {
                next.mark_solved(&submission.problem);
            } else {
                next.mark_attempted(&submission.problem);
            }
        }

        next.resolve_overlaps();
        next
    }

    pub(crate) fn mark_solved(&mut self, problem: &ProblemRef) {
        self.solved_problems.insert(problem.id());
        self.solved_contests.insert(problem.contest_id);
    }

    pub(crate) fn mark_attempted(&mut self, problem: &ProblemRef) {
        self.attempted_problems.insert(problem.id());
        self.attempted_contests.insert(problem.contest_id);
    }

    /// Drop everything solved from the attempted sets.
    pub(crate) fn resolve_overlaps(&mut self) {
        let solved = &self.solved_problems;
        self.attempted_problems.retain(|id| !solved.contains(id));
        let solved = &self.solved_contests;
        self.attempted_contests.retain(|id| !solved.contains(id));
    }

    #[must_use]
    pub fn problem_status(&self, id: &ProblemId) -> Status {
        if self.solved_problems.contains(id) {
            Status::Accepted
        } else if self.attempted_problems.contains(id) {
            Status::Attempted
        } else {
            Status::Unseen
        }
    }

    #[must_use]
    pub fn contest_status(&self, id: ContestId) -> Status {
        if self.solved_contests.contains(&id) {
            Status::Accepted
        } else if self.attempted_contests.contains(&id) {
            Status::Attempted
        } else {
            Status::Unseen
        }
    }

    #[must_use]
    pub fn with_loading(mut self, loading: bool) -> Self {
        self.loading = loading;
        self
    }

    /// Record a fetch failure; existing sets stay visible.
    #[must_use]
    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self.loading = false;
        self
    }

    #[must_use]
    pub fn id(&self) -> u64 {
        self.id
    }

    #[must_use]
    pub fn loading(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    #[must_use]
    pub fn solved_problems(&self) -> &BTreeSet<ProblemId> {
        &self.solved_problems
    }

    #[must_use]
    pub fn attempted_problems(&self) -> &BTreeSet<ProblemId> {
        &self.attempted_problems
    }

    #[must_use]
    pub fn solved_contests(&self) -> &BTreeSet<ContestId> {
        &self.solved_contests
    }

    #[must_use]
    pub fn attempted_contests(&self) -> &BTreeSet<ContestId> {
        &self.attempted_contests
    }
}
