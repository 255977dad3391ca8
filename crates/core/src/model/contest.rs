use chrono::{DateTime, Utc};

use crate::model::ids::ContestId;
use crate::model::problem::Problem;

/// A contest from the judge's catalog.
///
/// `problems` is empty as fetched; aggregation fills it from the problem catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contest {
    id: ContestId,
    name: String,
    kind: String,
    phase: String,
    duration_seconds: u64,
    start_time_seconds: Option<i64>,
    problems: Vec<Problem>,
}

impl Contest {
    #[must_use]
    pub fn new(id: ContestId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            kind: "CF".to_string(),
            phase: "FINISHED".to_string(),
            duration_seconds: 0,
            start_time_seconds: None,
            problems: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = kind.into();
        self
    }

    #[must_use]
    pub fn with_phase(mut self, phase: impl Into<String>) -> Self {
        self.phase = phase.into();
        self
    }

    #[must_use]
    pub fn with_schedule(mut self, start_time_seconds: Option<i64>, duration_seconds: u64) -> Self {
        self.start_time_seconds = start_time_seconds;
        self.duration_seconds = duration_seconds;
        self
    }

    #[must_use]
    pub fn id(&self) -> ContestId {
        self.id
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
    pub fn phase(&self) -> &str {
        &self.phase
    }

    #[must_use]
    pub fn duration_seconds(&self) -> u64 {
        self.duration_seconds
    }

    #[must_use]
    pub fn start_time(&self) -> Option<DateTime<Utc>> {
        self.start_time_seconds
            .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0))
    }

    #[must_use]
    pub fn problems(&self) -> &[Problem] {
        &self.problems
    }

    pub fn add_problem(&mut self, problem: Problem) {
        self.problems.push(problem);
    }

    pub fn clear_problems(&mut self) {
        self.problems.clear();
    }
}
