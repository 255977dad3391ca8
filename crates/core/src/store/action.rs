use crate::aggregate::Snapshot;
use crate::model::{AppStateDraft, Contest, Problem, SharedProblem, Submission};
use crate::persist::PersistedState;

/// Events dispatched by the UI and the fetch collaborators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    LoadingUsers,
    AddUser(String),
    RemoveUser(String),
    ErrorFetchingUser(String),
    ClearUsers,

    LoadingSubmissions,
    FetchSubmissions {
        watermark: u64,
        submissions: Vec<Submission>,
    },
    ErrorFetchingSubmissions(String),
    ClearSubmissions,

    LoadingProblems,
    FetchProblems(Vec<Problem>),
    ErrorFetchingProblems(String),
    ClearProblems,

    LoadingContests,
    FetchContests(Vec<Contest>),
    ErrorFetchingContests(String),
    ClearContests,

    LoadingSharedProblems,
    FetchSharedProblems(Vec<SharedProblem>),
    ErrorFetchingSharedProblems(String),

    UpdateAppState(AppStateDraft),
}

/// Side effects requested by a transition, run by the caller afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Persist(PersistedState),
}

/// Output of [`reduce`](super::reduce).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub snapshot: Snapshot,
    pub effects: Vec<Effect>,
}
