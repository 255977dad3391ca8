use tracker_core::store::{Action, Effect, RootState, Transition, reduce};
use tracker_core::Snapshot;

use crate::persistence::PersistenceAdapter;

/// Holds the current snapshot and runs transition side effects.
///
/// Transitions are applied one at a time through `&mut self`; the persistence
/// write happens after the new snapshot is installed and cannot fail it.
pub struct TrackerStore {
    snapshot: Snapshot,
    persistence: PersistenceAdapter,
    last_watermark: u64,
}

impl TrackerStore {
    /// Start from compiled-in defaults overlaid with whatever was persisted.
    pub async fn open(persistence: PersistenceAdapter) -> Self {
        let saved = persistence.load().await;
        Self {
            snapshot: Snapshot::new(RootState::restore(saved)),
            persistence,
            last_watermark: 0,
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    #[must_use]
    pub fn state(&self) -> &RootState {
        &self.snapshot.state
    }

    /// Reduce `action`, install the new snapshot, then run its effects.
    pub async fn dispatch(&mut self, action: Action) -> &Snapshot {
        let Transition { snapshot, effects } = reduce(&self.snapshot.state, action);
        self.snapshot = snapshot;
        for effect in effects {
            self.run_effect(effect).await;
        }
        &self.snapshot
    }

    /// Watermark for a new submission fetch cycle; strictly above anything
    /// issued or merged so far.
    pub fn next_watermark(&mut self) -> u64 {
        let next = self.last_watermark.max(self.snapshot.state.submissions.id()) + 1;
        self.last_watermark = next;
        next
    }

    async fn run_effect(&self, effect: Effect) {
        match effect {
            Effect::Persist(state) => self.persistence.save(&state).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use storage::repository::{InMemoryRepository, StateSlotRepository};
    use tracker_core::persist::STATE_KEY;

    #[tokio::test]
    async fn dispatch_persists_durable_subset() {
        let repo = Arc::new(InMemoryRepository::new());
        let mut store = TrackerStore::open(PersistenceAdapter::new(repo.clone())).await;
        store.dispatch(Action::AddUser("tourist".into())).await;

        let raw = repo.get(STATE_KEY).await.unwrap().expect("state saved");
        assert!(raw.contains("tourist"));

        let reopened = TrackerStore::open(PersistenceAdapter::new(repo)).await;
        assert_eq!(reopened.state().user_list.handles(), ["tourist".to_string()]);
    }

    #[tokio::test]
    async fn watermarks_increase_monotonically() {
        let repo = Arc::new(InMemoryRepository::new());
        let mut store = TrackerStore::open(PersistenceAdapter::new(repo)).await;
        assert_eq!(store.next_watermark(), 1);
        store
            .dispatch(Action::FetchSubmissions {
                watermark: 5,
                submissions: Vec::new(),
            })
            .await;
        assert_eq!(store.next_watermark(), 6);
        assert_eq!(store.next_watermark(), 7);
    }

    #[tokio::test]
    async fn corrupt_slot_starts_from_defaults() {
        let repo = Arc::new(InMemoryRepository::new());
        repo.put(STATE_KEY, "{not json").await.unwrap();
        let store = TrackerStore::open(PersistenceAdapter::new(repo)).await;
        assert_eq!(store.state(), &RootState::default());
    }
}
