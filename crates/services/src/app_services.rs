use std::sync::Arc;

use storage::repository::Storage;

use crate::config::TrackerConfig;
use crate::error::AppServicesError;
use crate::judge::{CodeforcesClient, JudgeApi};
use crate::persistence::PersistenceAdapter;
use crate::sync_service::SyncService;
use crate::tracker_store::TrackerStore;

/// Assembles the store and the sync service for the app.
pub struct AppServices {
    store: TrackerStore,
    sync: SyncService,
}

impl AppServices {
    /// Build services backed by `SQLite` storage and the configured judge API.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization fails.
    pub async fn new_sqlite(config: &TrackerConfig) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(&config.db_url).await?;
        let api: Arc<dyn JudgeApi> = Arc::new(CodeforcesClient::new(config));
        Ok(Self::from_parts(storage, api).await)
    }

    /// Build services from explicit storage and judge backends.
    pub async fn from_parts(storage: Storage, api: Arc<dyn JudgeApi>) -> Self {
        let store = TrackerStore::open(PersistenceAdapter::new(Arc::clone(&storage.slots))).await;
        Self {
            store,
            sync: SyncService::new(api),
        }
    }

    #[must_use]
    pub fn store(&self) -> &TrackerStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut TrackerStore {
        &mut self.store
    }

    #[must_use]
    pub fn sync(&self) -> SyncService {
        self.sync.clone()
    }
}
