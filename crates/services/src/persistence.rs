use std::sync::Arc;

use storage::repository::StateSlotRepository;
use tracker_core::persist::{PersistedState, STATE_KEY};

/// Mirrors the durable subset of state into a storage slot.
///
/// Failures are logged and otherwise ignored: a failed read behaves like an
/// empty slot, a failed write leaves the previous value in place.
#[derive(Clone)]
pub struct PersistenceAdapter {
    slots: Arc<dyn StateSlotRepository>,
    key: String,
}

impl PersistenceAdapter {
    #[must_use]
    pub fn new(slots: Arc<dyn StateSlotRepository>) -> Self {
        Self::with_key(slots, STATE_KEY)
    }

    #[must_use]
    pub fn with_key(slots: Arc<dyn StateSlotRepository>, key: impl Into<String>) -> Self {
        Self {
            slots,
            key: key.into(),
        }
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Read the saved override, if there is a usable one.
    pub async fn load(&self) -> Option<PersistedState> {
        let raw = match self.slots.get(&self.key).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(err) => {
                tracing::warn!(key = %self.key, error = %err, "failed to read persisted state");
                return None;
            }
        };

        match PersistedState::decode(&raw) {
            Ok(state) => Some(state),
            Err(err) => {
                tracing::warn!(key = %self.key, error = %err, "discarding unreadable persisted state");
                None
            }
        }
    }

    pub async fn save(&self, state: &PersistedState) {
        let raw = match state.encode() {
            Ok(raw) => raw,
            Err(err) => {
                tracing::warn!(error = %err, "failed to encode state for persistence");
                return;
            }
        };

        if let Err(err) = self.slots.put(&self.key, &raw).await {
            tracing::warn!(key = %self.key, error = %err, "failed to persist state");
        }
    }
}
