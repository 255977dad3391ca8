use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::model::ids::{ContestId, ProblemId};

/// Tracking status of a problem or contest for the followed users.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Status {
    Accepted,
    Attempted,
    #[default]
    Unseen,
}

/// `(contestId, index)` pair naming a problem.
///
/// Ordered by contest id, then index; the problem catalog is kept sorted in
/// this order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProblemRef {
    pub contest_id: ContestId,
    pub index: String,
}

impl ProblemRef {
    #[must_use]
    pub fn new(contest_id: ContestId, index: impl Into<String>) -> Self {
        Self {
            contest_id,
            index: index.into(),
        }
    }

    #[must_use]
    pub fn id(&self) -> ProblemId {
        ProblemId::new(self.contest_id, &self.index)
    }
}

/// A catalog entry, annotated with the tracked users' status during aggregation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Problem {
    reference: ProblemRef,
    name: String,
    kind: String,
    rating: Option<u32>,
    tags: Vec<String>,
    solved_count: u64,
    solved: bool,
    attempted: bool,
}

impl Problem {
    #[must_use]
    pub fn new(reference: ProblemRef, name: impl Into<String>) -> Self {
        Self {
            reference,
            name: name.into(),
            kind: "PROGRAMMING".to_string(),
            rating: None,
            tags: Vec::new(),
            solved_count: 0,
            solved: false,
            attempted: false,
        }
    }

    #[must_use]
    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = kind.into();
        self
    }

    #[must_use]
    pub fn with_rating(mut self, rating: Option<u32>) -> Self {
        self.rating = rating;
        self
    }

    #[must_use]
    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    #[must_use]
    pub fn with_solved_count(mut self, solved_count: u64) -> Self {
        self.solved_count = solved_count;
        self
    }

    /// Copy of this problem's statement data placed under another `(contestId, index)`.
    ///
    /// Status flags are reset; they are assigned later against the ledger.
    #[must_use]
    pub fn mirrored_as(&self, reference: ProblemRef) -> Self {
        Self {
            reference,
            name: self.name.clone(),
            kind: self.kind.clone(),
            rating: self.rating,
            tags: self.tags.clone(),
            solved_count: self.solved_count,
            solved: false,
            attempted: false,
        }
    }

    #[must_use]
    pub fn reference(&self) -> &ProblemRef {
        &self.reference
    }

    #[must_use]
    pub fn id(&self) -> ProblemId {
        self.reference.id()
    }

    #[must_use]
    pub fn contest_id(&self) -> ContestId {
        self.reference.contest_id
    }

    #[must_use]
    pub fn index(&self) -> &str {
        &self.reference.index
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn kind(&self) -> &str {
        &self.kind
    }

    #[must_use]
    pub fn rating(&self) -> Option<u32> {
        self.rating
    }

    #[must_use]
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    #[must_use]
    pub fn solved_count(&self) -> u64 {
        self.solved_count
    }

    #[must_use]
    pub fn solved(&self) -> bool {
        self.solved
    }

    #[must_use]
    pub fn attempted(&self) -> bool {
        self.attempted
    }

    #[must_use]
    pub fn status(&self) -> Status {
        if self.solved {
            Status::Accepted
        } else if self.attempted {
            Status::Attempted
        } else {
            Status::Unseen
        }
    }

    /// Sets the derived flags; `solved` and `attempted` are never both true.
    pub fn set_status(&mut self, status: Status) {
        self.solved = status == Status::Accepted;
        self.attempted = status == Status::Attempted;
    }

    /// Catalog ordering key.
    #[must_use]
    pub fn cmp_ref(&self, other: &ProblemRef) -> Ordering {
        self.reference.cmp(other)
    }
}

/// Sorts a catalog into `(contestId, index)` order, keeping the relative order
/// of equal keys.
pub fn sort_catalog(problems: &mut [Problem]) {
    problems.sort_by(|a, b| a.reference.cmp(&b.reference));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn problem(contest: u32, index: &str) -> Problem {
        Problem::new(ProblemRef::new(ContestId::new(contest), index), "p")
    }

    #[test]
    fn status_flags_are_mutually_exclusive() {
        let mut p = problem(1, "A");
        p.set_status(Status::Attempted);
        assert!(p.attempted() && !p.solved());
        p.set_status(Status::Accepted);
        assert!(p.solved() && !p.attempted());
        p.set_status(Status::Unseen);
        assert_eq!(p.status(), Status::Unseen);
    }

    #[test]
    fn mirrored_problem_keeps_statement_data() {
        let mut canonical = problem(100, "A")
            .with_rating(Some(800))
            .with_tags(vec!["math".into()])
            .with_solved_count(42);
        canonical.set_status(Status::Accepted);
        let mirror = canonical.mirrored_as(ProblemRef::new(ContestId::new(200), "B"));
        assert_eq!(mirror.id().as_str(), "200B");
        assert_eq!(mirror.rating(), Some(800));
        assert_eq!(mirror.tags(), ["math".to_string()]);
        assert_eq!(mirror.solved_count(), 42);
        assert_eq!(mirror.status(), Status::Unseen);
    }

    #[test]
    fn sort_catalog_orders_by_contest_then_index() {
        let mut catalog = vec![problem(2, "A"), problem(1, "B"), problem(1, "A")];
        sort_catalog(&mut catalog);
        let ids: Vec<_> = catalog.iter().map(|p| p.id().to_string()).collect();
        assert_eq!(ids, ["1A", "1B", "2A"]);
    }
}
