use serde::{Deserialize, Serialize};

use crate::model::problem::ProblemRef;

/// Judge verdict for a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Verdict {
    Ok,
    Failed,
    Partial,
    CompilationError,
    RuntimeError,
    WrongAnswer,
    PresentationError,
    TimeLimitExceeded,
    MemoryLimitExceeded,
    IdlenessLimitExceeded,
    SecurityViolated,
    Crashed,
    InputPreparationCrashed,
    Challenged,
    Skipped,
    Testing,
    Rejected,
    #[serde(other)]
    Other,
}

impl Verdict {
    #[must_use]
    pub fn is_accepted(self) -> bool {
        self == Verdict::Ok
    }
}

/// One entry of a user's submission history.
///
/// `verdict` is absent while the submission is still queued.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    #[serde(default)]
    pub id: u64,
    pub problem: ProblemRef,
    #[serde(default)]
    pub verdict: Option<Verdict>,
}

impl Submission {
    #[must_use]
    pub fn new(problem: ProblemRef, verdict: Option<Verdict>) -> Self {
        Self {
            id: 0,
            problem,
            verdict,
        }
    }

    #[must_use]
    pub fn is_accepted(&self) -> bool {
        self.verdict.is_some_and(Verdict::is_accepted)
    }
}
