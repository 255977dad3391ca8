use crate::ledger::SubmissionLedger;
use crate::model::{AppState, Contest, Problem, SharedProblem, UserList};
use crate::persist::PersistedState;

/// A fetched collection with its request status.
///
/// `items` keeps the last successful payload while a refetch is loading or
/// after it failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slice<T> {
    items: Vec<T>,
    loading: bool,
    error: Option<String>,
}

impl<T> Default for Slice<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            loading: false,
            error: None,
        }
    }
}

impl<T> Slice<T> {
    #[must_use]
    pub fn loaded(items: Vec<T>) -> Self {
        Self {
            items,
            loading: false,
            error: None,
        }
    }

    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    #[must_use]
    pub fn loading(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

impl<T: Clone> Slice<T> {
    #[must_use]
    pub fn with_loading(&self) -> Self {
        Self {
            items: self.items.clone(),
            loading: true,
            error: self.error.clone(),
        }
    }

    #[must_use]
    pub fn with_error(&self, error: impl Into<String>) -> Self {
        Self {
            items: self.items.clone(),
            loading: false,
            error: Some(error.into()),
        }
    }
}

/// Raw state slices as reduced from actions.
///
/// `problems` is sorted by `(contestId, index)` at all times.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RootState {
    pub submissions: SubmissionLedger,
    pub problems: Slice<Problem>,
    pub contests: Slice<Contest>,
    pub user_list: UserList,
    pub shared_problems: Slice<SharedProblem>,
    pub app_state: AppState,
}

impl RootState {
    /// Initial state with the persisted override applied, if any.
    #[must_use]
    pub fn restore(persisted: Option<PersistedState>) -> Self {
        match persisted {
            Some(saved) => Self {
                user_list: saved.user_list.durable(),
                app_state: saved.app_state,
                ..Self::default()
            },
            None => Self::default(),
        }
    }
}
