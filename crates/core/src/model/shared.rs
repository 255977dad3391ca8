use serde::{Deserialize, Serialize};

use crate::model::ids::{ContestId, ProblemId};
use crate::model::problem::ProblemRef;

/// A canonical problem and the mirrored copies of its statement in other contests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SharedProblem {
    pub contest_id: ContestId,
    pub index: String,
    #[serde(default)]
    pub shared: Vec<ProblemRef>,
}

impl SharedProblem {
    #[must_use]
    pub fn new(canonical: ProblemRef, shared: Vec<ProblemRef>) -> Self {
        Self {
            contest_id: canonical.contest_id,
            index: canonical.index,
            shared,
        }
    }

    #[must_use]
    pub fn canonical(&self) -> ProblemRef {
        ProblemRef::new(self.contest_id, self.index.clone())
    }

    #[must_use]
    pub fn canonical_id(&self) -> ProblemId {
        ProblemId::new(self.contest_id, &self.index)
    }
}
