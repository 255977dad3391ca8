//! Reducer-style state transitions.

mod action;
mod state;

pub use action::{Action, Effect, Transition};
pub use state::{RootState, Slice};

use crate::aggregate::Snapshot;
use crate::ledger::SubmissionLedger;
use crate::model::{UserList, sort_catalog};
use crate::persist::PersistedState;

/// Apply `action` to `state` and rebuild the snapshot.
///
/// Never fails: fetch errors arrive as actions and end up in the slices'
/// `error` fields. Every transition asks for the durable subset to be saved.
#[must_use]
pub fn reduce(state: &RootState, action: Action) -> Transition {
    let next = reduce_slices(state, action);
    let effects = vec![Effect::Persist(PersistedState::capture(&next))];
    Transition {
        snapshot: Snapshot::new(next),
        effects,
    }
}

fn reduce_slices(state: &RootState, action: Action) -> RootState {
    let mut next = state.clone();
    match action {
        Action::LoadingUsers => {
            next.user_list = state.user_list.clone().with_loading(true);
        }
        Action::AddUser(handle) => {
            let mut list = state.user_list.clone().with_loading(false);
            let error = list.add(handle).err().map(|err| err.to_string());
            next.user_list = list.with_error(error);
        }
        Action::RemoveUser(handle) => {
            let mut list = state.user_list.clone().with_loading(false);
            list.remove(&handle);
            next.user_list = list.with_error(None);
        }
        Action::ErrorFetchingUser(message) => {
            next.user_list = state
                .user_list
                .clone()
                .with_loading(false)
                .with_error(Some(message));
        }
        Action::ClearUsers => next.user_list = UserList::new(),

        Action::LoadingSubmissions => {
            next.submissions = state.submissions.clone().with_loading(true);
        }
        Action::FetchSubmissions {
            watermark,
            submissions,
        } => next.submissions = state.submissions.merge(&submissions, watermark),
        Action::ErrorFetchingSubmissions(message) => {
            next.submissions = state.submissions.clone().with_error(message);
        }
        Action::ClearSubmissions => next.submissions = SubmissionLedger::new(),

        Action::LoadingProblems => next.problems = state.problems.with_loading(),
        Action::FetchProblems(mut problems) => {
            sort_catalog(&mut problems);
            next.problems = Slice::loaded(problems);
        }
        Action::ErrorFetchingProblems(message) => {
            next.problems = state.problems.with_error(message);
        }
        Action::ClearProblems => next.problems = Slice::default(),

        Action::LoadingContests => next.contests = state.contests.with_loading(),
        Action::FetchContests(contests) => next.contests = Slice::loaded(contests),
        Action::ErrorFetchingContests(message) => {
            next.contests = state.contests.with_error(message);
        }
        Action::ClearContests => next.contests = Slice::default(),

        Action::LoadingSharedProblems => {
            next.shared_problems = state.shared_problems.with_loading();
        }
        Action::FetchSharedProblems(shared) => next.shared_problems = Slice::loaded(shared),
        Action::ErrorFetchingSharedProblems(message) => {
            next.shared_problems = state.shared_problems.with_error(message);
        }

        Action::UpdateAppState(draft) => next.app_state = draft.apply_to(&state.app_state),
    }
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        AppStateDraft, Contest, ContestId, Problem, ProblemId, ProblemRef, SharedProblem, Status,
        Submission, Verdict,
    };

    fn r(contest: u32, index: &str) -> ProblemRef {
        ProblemRef::new(ContestId::new(contest), index)
    }

    fn sub(contest: u32, index: &str, verdict: Verdict) -> Submission {
        Submission::new(r(contest, index), Some(verdict))
    }

    fn run(state: &RootState, actions: Vec<Action>) -> Transition {
        let mut actions = actions.into_iter();
        let first = actions.next().expect("at least one action");
        let mut last = reduce(state, first);
        for action in actions {
            last = reduce(&last.snapshot.state, action);
        }
        last
    }

    #[test]
    fn fetch_problems_keeps_catalog_sorted() {
        let t = reduce(
            &RootState::default(),
            Action::FetchProblems(vec![
                Problem::new(r(200, "A"), "x"),
                Problem::new(r(100, "B"), "y"),
                Problem::new(r(100, "A"), "z"),
            ]),
        );
        let ids: Vec<String> = t
            .snapshot
            .state
            .problems
            .items()
            .iter()
            .map(|p| p.id().to_string())
            .collect();
        assert_eq!(ids, ["100A", "100B", "200A"]);
    }

    #[test]
    fn loading_and_error_keep_last_good_data() {
        let loaded = run(
            &RootState::default(),
            vec![Action::FetchContests(vec![Contest::new(ContestId::new(1), "c")])],
        )
        .snapshot
        .state;

        let loading = reduce(&loaded, Action::LoadingContests).snapshot.state;
        assert!(loading.contests.loading());
        assert_eq!(loading.contests.items().len(), 1);

        let failed = reduce(&loading, Action::ErrorFetchingContests("timeout".into()))
            .snapshot
            .state;
        assert!(!failed.contests.loading());
        assert_eq!(failed.contests.error(), Some("timeout"));
        assert_eq!(failed.contests.items().len(), 1);

        let recovered = reduce(&failed, Action::FetchContests(Vec::new())).snapshot.state;
        assert_eq!(recovered.contests.error(), None);
    }

    #[test]
    fn submission_batches_follow_watermarks() {
        let after_first = run(
            &RootState::default(),
            vec![
                Action::LoadingSubmissions,
                Action::FetchSubmissions {
                    watermark: 1,
                    submissions: vec![sub(100, "A", Verdict::Ok), sub(100, "B", Verdict::WrongAnswer)],
                },
                Action::FetchSubmissions {
                    watermark: 1,
                    submissions: vec![sub(100, "B", Verdict::Ok)],
                },
            ],
        )
        .snapshot
        .state;
        let ledger = &after_first.submissions;
        assert_eq!(ledger.solved_problems().len(), 2);
        assert!(ledger.attempted_problems().is_empty());
        assert!(!ledger.loading());

        let stale = reduce(
            &after_first,
            Action::FetchSubmissions {
                watermark: 0,
                submissions: vec![sub(9, "A", Verdict::Ok)],
            },
        );
        assert_eq!(stale.snapshot.state.submissions, after_first.submissions);

        let cleared = reduce(&after_first, Action::ClearSubmissions).snapshot.state;
        assert_eq!(cleared.submissions.id(), 0);
        assert!(cleared.submissions.solved_problems().is_empty());
    }

    #[test]
    fn error_fetching_submissions_keeps_sets() {
        let state = reduce(
            &RootState::default(),
            Action::FetchSubmissions {
                watermark: 3,
                submissions: vec![sub(1, "A", Verdict::Ok)],
            },
        )
        .snapshot
        .state;
        let failed = reduce(&state, Action::ErrorFetchingSubmissions("Error Fetching Submissions".into()))
            .snapshot
            .state;
        assert_eq!(failed.submissions.error(), Some("Error Fetching Submissions"));
        assert_eq!(failed.submissions.solved_problems().len(), 1);
        assert_eq!(failed.submissions.id(), 3);
    }

    #[test]
    fn user_actions_edit_handle_list() {
        let state = run(
            &RootState::default(),
            vec![
                Action::AddUser("tourist".into()),
                Action::AddUser("Petr".into()),
                Action::AddUser("tourist".into()),
            ],
        )
        .snapshot
        .state;
        assert_eq!(state.user_list.handles().len(), 2);
        assert!(state.user_list.error().is_some());

        let state = reduce(&state, Action::RemoveUser("tourist".into())).snapshot.state;
        assert_eq!(state.user_list.handles(), ["Petr".to_string()]);
        assert_eq!(state.user_list.error(), None);

        let state = reduce(&state, Action::ClearUsers).snapshot.state;
        assert!(state.user_list.handles().is_empty());
    }

    #[test]
    fn every_transition_requests_persist_of_durable_subset() {
        let t = reduce(&RootState::default(), Action::AddUser("tourist".into()));
        assert_eq!(t.effects.len(), 1);
        let Effect::Persist(saved) = &t.effects[0];
        assert_eq!(saved.user_list.handles(), ["tourist".to_string()]);
        assert_eq!(saved.app_state, t.snapshot.state.app_state);
    }

    #[test]
    fn update_app_state_merges_draft() {
        let t = reduce(
            &RootState::default(),
            Action::UpdateAppState(AppStateDraft {
                show_tags: Some(true),
                ..AppStateDraft::new()
            }),
        );
        assert!(t.snapshot.state.app_state.show_tags());
        assert!(t.snapshot.state.app_state.show_rating());
    }

    #[test]
    fn shared_problem_shows_up_under_mirror_contest() {
        let t = run(
            &RootState::default(),
            vec![
                Action::FetchContests(vec![
                    Contest::new(ContestId::new(100), "Round 100"),
                    Contest::new(ContestId::new(200), "Round 200"),
                ]),
                Action::FetchProblems(vec![Problem::new(r(100, "A"), "Alpha")]),
                Action::FetchSharedProblems(vec![SharedProblem::new(r(100, "A"), vec![r(200, "A")])]),
                Action::FetchSubmissions {
                    watermark: 1,
                    submissions: vec![sub(100, "A", Verdict::Ok)],
                },
            ],
        );
        let view = &t.snapshot.view;
        let mirror = &view.contests[1].problems()[0];
        assert_eq!(mirror.id(), ProblemId::new(ContestId::new(200), "A"));
        assert!(mirror.solved());
        assert_eq!(view.ledger.contest_status(ContestId::new(200)), Status::Accepted);

        // a further unrelated transition does not duplicate the mirror
        let again = reduce(&t.snapshot.state, Action::LoadingProblems);
        assert_eq!(again.snapshot.view.contests[1].problems().len(), 1);
    }
}
