//! Response shapes of the judge's JSON API.

use std::collections::HashMap;

use serde::Deserialize;
use tracker_core::model::{Contest, ContestId, Problem, ProblemRef, Submission, Verdict};

use crate::error::JudgeError;

#[derive(Debug, Deserialize)]
pub(crate) struct Envelope<T> {
    pub status: String,
    pub comment: Option<String>,
    pub result: Option<T>,
}

impl<T> Envelope<T> {
    pub(crate) fn into_result(self) -> Result<T, JudgeError> {
        if self.status != "OK" {
            return Err(JudgeError::Api(
                self.comment.unwrap_or_else(|| self.status.clone()),
            ));
        }
        self.result.ok_or(JudgeError::EmptyResponse)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ProblemsetResult {
    pub problems: Vec<WireProblem>,
    #[serde(default)]
    pub problem_statistics: Vec<WireProblemStatistics>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct WireProblem {
    pub contest_id: Option<u32>,
    pub index: String,
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub rating: Option<u32>,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct WireProblemStatistics {
    pub contest_id: Option<u32>,
    pub index: String,
    pub solved_count: u64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct WireContest {
    pub id: u32,
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub phase: Option<String>,
    #[serde(default)]
    pub duration_seconds: u64,
    #[serde(default)]
    pub start_time_seconds: Option<i64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct WireSubmission {
    pub id: u64,
    pub problem: WireProblemRef,
    #[serde(default)]
    pub verdict: Option<Verdict>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct WireProblemRef {
    pub contest_id: Option<u32>,
    pub index: String,
}

/// Join statistics onto problems. Entries without a contest id are dropped.
pub(crate) fn problems_from_wire(result: ProblemsetResult) -> Vec<Problem> {
    let solved: HashMap<(u32, String), u64> = result
        .problem_statistics
        .into_iter()
        .filter_map(|stat| Some(((stat.contest_id?, stat.index), stat.solved_count)))
        .collect();

    result
        .problems
        .into_iter()
        .filter_map(|wire| {
            let contest_id = wire.contest_id?;
            let solved_count = solved
                .get(&(contest_id, wire.index.clone()))
                .copied()
                .unwrap_or(0);
            let mut problem =
                Problem::new(ProblemRef::new(ContestId::new(contest_id), wire.index), wire.name)
                    .with_rating(wire.rating)
                    .with_tags(wire.tags)
                    .with_solved_count(solved_count);
            if let Some(kind) = wire.kind {
                problem = problem.with_kind(kind);
            }
            Some(problem)
        })
        .collect()
}

pub(crate) fn contest_from_wire(wire: WireContest) -> Contest {
    let mut contest = Contest::new(ContestId::new(wire.id), wire.name)
        .with_schedule(wire.start_time_seconds, wire.duration_seconds);
    if let Some(kind) = wire.kind {
        contest = contest.with_kind(kind);
    }
    if let Some(phase) = wire.phase {
        contest = contest.with_phase(phase);
    }
    contest
}

pub(crate) fn submission_from_wire(wire: WireSubmission) -> Option<Submission> {
    let contest_id = wire.problem.contest_id?;
    Some(Submission {
        id: wire.id,
        problem: ProblemRef::new(ContestId::new(contest_id), wire.problem.index),
        verdict: wire.verdict,
    })
}
