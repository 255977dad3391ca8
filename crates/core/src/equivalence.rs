//! Status projection and catalog expansion across mirrored problem statements.
//!
//! The problem catalog passed to [`expand`] must be sorted by
//! `(contestId, index)`; canonical problems are located by binary search.

use std::collections::{HashMap, HashSet};

use crate::ledger::SubmissionLedger;
use crate::model::{Contest, ContestId, Problem, ProblemId, SharedProblem};

/// Result of one expansion pass.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Expanded {
    /// Original catalog in its order, followed by synthesized mirrors.
    pub problems: Vec<Problem>,
    pub contests: Vec<Contest>,
}

/// Copy each canonical problem's status onto its equivalents.
///
/// Membership is tested against `ledger` as given, so an equivalent that
/// gains a status here never triggers further entries in the same pass.
#[must_use]
pub fn project(ledger: &SubmissionLedger, shared: &[SharedProblem]) -> SubmissionLedger {
    let mut projected = ledger.clone();

    for entry in shared {
        let canonical = entry.canonical_id();
        if ledger.solved_problems().contains(&canonical) {
            for equivalent in &entry.shared {
                projected.mark_solved(equivalent);
            }
        } else if ledger.attempted_problems().contains(&canonical) {
            for equivalent in &entry.shared {
                projected.mark_attempted(equivalent);
            }
        }
    }

    projected.resolve_overlaps();
    projected
}

/// Materialize mirrored problems, flag every problem against `projected`, and
/// attach problems to their contests.
///
/// Contests' problem lists are rebuilt from scratch, so running the pass again
/// on its own output's inputs gives the same result.
#[must_use]
pub fn expand(
    problems: &[Problem],
    shared: &[SharedProblem],
    projected: &SubmissionLedger,
    contests: &[Contest],
) -> Expanded {
    let mut mirrors: Vec<Problem> = Vec::new();
    let mut added: HashSet<ProblemId> = HashSet::new();

    for entry in shared {
        let canonical = entry.canonical();
        let Ok(found) = problems.binary_search_by(|p| p.cmp_ref(&canonical)) else {
            continue;
        };
        let source = &problems[found];
        for equivalent in &entry.shared {
            if !added.insert(equivalent.id()) {
                continue;
            }
            mirrors.push(source.mirrored_as(equivalent.clone()));
        }
    }

    let mut all: Vec<Problem> = problems.iter().cloned().chain(mirrors).collect();
    for problem in &mut all {
        problem.set_status(projected.problem_status(&problem.id()));
    }

    let mut contests: Vec<Contest> = contests.to_vec();
    let slots: HashMap<ContestId, usize> = contests
        .iter()
        .enumerate()
        .map(|(slot, contest)| (contest.id(), slot))
        .collect();
    for contest in &mut contests {
        contest.clear_problems();
    }
    for problem in &all {
        if let Some(&slot) = slots.get(&problem.contest_id()) {
            contests[slot].add_problem(problem.clone());
        }
    }

    Expanded {
        problems: all,
        contests,
    }
}
