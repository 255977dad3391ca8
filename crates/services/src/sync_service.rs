use std::sync::Arc;

use tracker_core::store::Action;

use crate::judge::JudgeApi;
use crate::tracker_store::TrackerStore;

/// Drives judge fetches and feeds their outcome into the store as actions.
///
/// Every fetch dispatches a loading action first and then either the payload
/// or an error action. Fetch failures never surface as `Err`; they land in the
/// slice's `error` field and can be retried by calling the method again.
#[derive(Clone)]
pub struct SyncService {
    api: Arc<dyn JudgeApi>,
}

impl SyncService {
    #[must_use]
    pub fn new(api: Arc<dyn JudgeApi>) -> Self {
        Self { api }
    }

    pub async fn sync_problems(&self, store: &mut TrackerStore) {
        store.dispatch(Action::LoadingProblems).await;
        match self.api.fetch_problems().await {
            Ok(problems) => {
                tracing::info!(count = problems.len(), "fetched problem catalog");
                store.dispatch(Action::FetchProblems(problems)).await;
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to fetch problem catalog");
                store
                    .dispatch(Action::ErrorFetchingProblems(err.to_string()))
                    .await;
            }
        }
    }

    pub async fn sync_contests(&self, store: &mut TrackerStore) {
        store.dispatch(Action::LoadingContests).await;
        match self.api.fetch_contests().await {
            Ok(contests) => {
                tracing::info!(count = contests.len(), "fetched contest catalog");
                store.dispatch(Action::FetchContests(contests)).await;
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to fetch contest catalog");
                store
                    .dispatch(Action::ErrorFetchingContests(err.to_string()))
                    .await;
            }
        }
    }

    pub async fn sync_shared_problems(&self, store: &mut TrackerStore) {
        store.dispatch(Action::LoadingSharedProblems).await;
        match self.api.fetch_shared_problems().await {
            Ok(shared) => {
                tracing::info!(count = shared.len(), "fetched shared problem table");
                store.dispatch(Action::FetchSharedProblems(shared)).await;
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to fetch shared problem table");
                store
                    .dispatch(Action::ErrorFetchingSharedProblems(err.to_string()))
                    .await;
            }
        }
    }

    /// Refetch the history of every followed handle.
    ///
    /// All batches of one cycle carry the same fresh watermark, so the first
    /// successful batch resets the ledger and the rest accumulate into it.
    /// Failed handles are reported together once the cycle is over.
    pub async fn sync_submissions(&self, store: &mut TrackerStore) {
        let handles = store.state().user_list.handles().to_vec();
        if handles.is_empty() {
            store.dispatch(Action::ClearSubmissions).await;
            return;
        }

        store.dispatch(Action::LoadingSubmissions).await;
        let watermark = store.next_watermark();
        let mut failures = Vec::new();
        for handle in handles {
            match self.api.fetch_user_submissions(&handle).await {
                Ok(submissions) => {
                    tracing::info!(%handle, watermark, count = submissions.len(), "fetched submissions");
                    store
                        .dispatch(Action::FetchSubmissions {
                            watermark,
                            submissions,
                        })
                        .await;
                }
                Err(err) => {
                    tracing::warn!(%handle, error = %err, "failed to fetch submissions");
                    failures.push(format!("{handle}: {err}"));
                }
            }
        }

        // A later successful merge clears the error, so report after the last batch.
        if !failures.is_empty() {
            store
                .dispatch(Action::ErrorFetchingSubmissions(failures.join("; ")))
                .await;
        }
    }

    /// Refresh every remote collection.
    pub async fn sync_all(&self, store: &mut TrackerStore) {
        self.sync_problems(store).await;
        self.sync_contests(store).await;
        self.sync_shared_problems(store).await;
        self.sync_submissions(store).await;
    }

    /// Follow a handle after checking it exists on the judge.
    ///
    /// The handle's history is merged into the current ledger under the
    /// current watermark. Returns whether the handle was added.
    pub async fn add_user(&self, store: &mut TrackerStore, handle: &str) -> bool {
        let handle = handle.trim();
        if store.state().user_list.contains(handle) {
            store.dispatch(Action::AddUser(handle.to_string())).await;
            return false;
        }

        store.dispatch(Action::LoadingUsers).await;
        match self.api.fetch_user_submissions(handle).await {
            Ok(submissions) => {
                store.dispatch(Action::AddUser(handle.to_string())).await;
                let watermark = store.state().submissions.id();
                store
                    .dispatch(Action::FetchSubmissions {
                        watermark,
                        submissions,
                    })
                    .await;
                true
            }
            Err(err) => {
                tracing::warn!(%handle, error = %err, "failed to look up handle");
                store
                    .dispatch(Action::ErrorFetchingUser(err.to_string()))
                    .await;
                false
            }
        }
    }

    /// Stop following a handle and rebuild the ledger without it.
    pub async fn remove_user(&self, store: &mut TrackerStore, handle: &str) {
        store.dispatch(Action::RemoveUser(handle.to_string())).await;
        self.sync_submissions(store).await;
    }
}
