//! Codec for the durable subset of state: the followed handles and preferences.
//!
//! Catalogs and submissions are never stored; they are refetched on startup.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::model::{AppState, UserList};
use crate::store::RootState;

/// Storage key for the persisted state.
pub const STATE_KEY: &str = "statev2";

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PersistError {
    #[error("failed to encode persisted state: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("failed to decode persisted state: {0}")]
    Decode(#[source] serde_json::Error),
    #[error("persisted state is not a JSON object")]
    NotAnObject,
}

/// `{userList, appState}` as written to durable storage.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedState {
    pub user_list: UserList,
    pub app_state: AppState,
}

impl PersistedState {
    #[must_use]
    pub fn capture(state: &RootState) -> Self {
        Self {
            user_list: state.user_list.durable(),
            app_state: state.app_state.clone(),
        }
    }

    /// # Errors
    ///
    /// Returns `PersistError::Encode` if serialization fails.
    pub fn encode(&self) -> Result<String, PersistError> {
        serde_json::to_string(self).map_err(PersistError::Encode)
    }

    /// Parse a stored payload.
    ///
    /// `appState` goes through [`AppState::init`], so payloads from other
    /// schema versions still load. A malformed `userList` falls back to empty.
    ///
    /// # Errors
    ///
    /// Returns `PersistError` if the payload is not JSON or not an object.
    pub fn decode(raw: &str) -> Result<Self, PersistError> {
        let value: Value = serde_json::from_str(raw).map_err(PersistError::Decode)?;
        let Value::Object(fields) = value else {
            return Err(PersistError::NotAnObject);
        };

        let user_list = fields
            .get("userList")
            .and_then(|list| UserList::deserialize(list).ok())
            .map(|list| UserList::from_handles(list.handles().iter().cloned()))
            .unwrap_or_default();
        let app_state = fields
            .get("appState")
            .map(AppState::init)
            .unwrap_or_default();

        Ok(Self {
            user_list,
            app_state,
        })
    }
}
