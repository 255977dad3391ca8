use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Judge handles followed by the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UserList {
    handles: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    loading: bool,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum UserListError {
    #[error("handle cannot be empty")]
    EmptyHandle,
    #[error("handle {0} is already tracked")]
    Duplicate(String),
}

impl UserList {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a list from persisted handles, dropping blanks and duplicates.
    #[must_use]
    pub fn from_handles<I, S>(handles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut list = Self::new();
        for handle in handles {
            let _ = list.add(handle.into());
        }
        list
    }

    #[must_use]
    pub fn handles(&self) -> &[String] {
        &self.handles
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    #[must_use]
    pub fn loading(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub fn contains(&self, handle: &str) -> bool {
        let handle = handle.trim();
        self.handles
            .iter()
            .any(|existing| existing.eq_ignore_ascii_case(handle))
    }

    /// Adds a trimmed handle; duplicates are compared case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns `UserListError` if the handle is blank or already tracked.
    pub fn add(&mut self, handle: String) -> Result<(), UserListError> {
        let trimmed = handle.trim();
        if trimmed.is_empty() {
            return Err(UserListError::EmptyHandle);
        }
        if self.contains(trimmed) {
            return Err(UserListError::Duplicate(trimmed.to_string()));
        }
        self.handles.push(trimmed.to_string());
        Ok(())
    }

    /// Removes a handle; returns whether anything was removed.
    pub fn remove(&mut self, handle: &str) -> bool {
        let handle = handle.trim();
        let before = self.handles.len();
        self.handles
            .retain(|existing| !existing.eq_ignore_ascii_case(handle));
        self.handles.len() != before
    }

    #[must_use]
    pub fn with_loading(mut self, loading: bool) -> Self {
        self.loading = loading;
        self
    }

    #[must_use]
    pub fn with_error(mut self, error: Option<String>) -> Self {
        self.error = error;
        self
    }

    /// Copy suitable for durable storage: transient fields are cleared.
    #[must_use]
    pub fn durable(&self) -> Self {
        Self {
            handles: self.handles.clone(),
            error: None,
            loading: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_trims_and_rejects_duplicates() {
        let mut list = UserList::new();
        list.add("  tourist ".into()).unwrap();
        assert_eq!(list.handles(), ["tourist".to_string()]);
        assert_eq!(
            list.add("Tourist".into()),
            Err(UserListError::Duplicate("Tourist".into()))
        );
        assert_eq!(list.add("   ".into()), Err(UserListError::EmptyHandle));
        assert_eq!(list.handles().len(), 1);
    }

    #[test]
    fn remove_ignores_case() {
        let mut list = UserList::from_handles(["Petr", "tourist"]);
        assert!(list.remove("petr"));
        assert!(!list.remove("petr"));
        assert_eq!(list.handles(), ["tourist".to_string()]);
    }

    #[test]
    fn deserializes_with_missing_fields() {
        let list: UserList = serde_json::from_str(r#"{"handles":["a","b"]}"#).unwrap();
        assert_eq!(list.handles().len(), 2);
        assert!(!list.loading());
        assert_eq!(list.error(), None);
    }
}
