use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Durable UI preferences.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    version: u32,
    show_tags: bool,
    show_rating: bool,
    hide_solved: bool,
    min_rating: Option<u32>,
    max_rating: Option<u32>,
    per_page: u32,
}

/// Loosely-typed preferences as read from storage or edited by the UI.
///
/// Every field is optional and unknown fields are ignored, so payloads written
/// by older or newer builds still deserialize.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppStateDraft {
    pub version: Option<u32>,
    #[serde(alias = "tags")]
    pub show_tags: Option<bool>,
    pub show_rating: Option<bool>,
    pub hide_solved: Option<bool>,
    pub min_rating: Option<u32>,
    pub max_rating: Option<u32>,
    pub per_page: Option<u32>,
}

impl AppStateDraft {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalize the draft on top of `base`; absent fields keep `base` values.
    #[must_use]
    pub fn apply_to(self, base: &AppState) -> AppState {
        let (min_rating, max_rating) = match (
            self.min_rating.or(base.min_rating),
            self.max_rating.or(base.max_rating),
        ) {
            (Some(lo), Some(hi)) if lo > hi => (Some(hi), Some(lo)),
            bounds => bounds,
        };

        AppState {
            version: AppState::CURRENT_VERSION,
            show_tags: self.show_tags.unwrap_or(base.show_tags),
            show_rating: self.show_rating.unwrap_or(base.show_rating),
            hide_solved: self.hide_solved.unwrap_or(base.hide_solved),
            min_rating,
            max_rating,
            per_page: self
                .per_page
                .unwrap_or(base.per_page)
                .clamp(AppState::MIN_PER_PAGE, AppState::MAX_PER_PAGE),
        }
    }
}

impl AppState {
    pub const CURRENT_VERSION: u32 = 2;
    pub const MIN_PER_PAGE: u32 = 10;
    pub const MAX_PER_PAGE: u32 = 500;

    /// Rebuild preferences from a persisted JSON value of any known version.
    ///
    /// Missing fields fall back to defaults, extra fields are ignored, and a
    /// value that is not an object yields the defaults.
    #[must_use]
    pub fn init(value: &Value) -> Self {
        let draft = AppStateDraft::deserialize(value).unwrap_or_default();
        let draft = match draft.version {
            // v1 stored a page size of 0 to mean "default".
            None | Some(1) => AppStateDraft {
                per_page: draft.per_page.filter(|&n| n > 0),
                ..draft
            },
            Some(_) => draft,
        };
        draft.apply_to(&Self::default())
    }

    #[must_use]
    pub fn version(&self) -> u32 {
        self.version
    }

    #[must_use]
    pub fn show_tags(&self) -> bool {
        self.show_tags
    }

    #[must_use]
    pub fn show_rating(&self) -> bool {
        self.show_rating
    }

    #[must_use]
    pub fn hide_solved(&self) -> bool {
        self.hide_solved
    }

    #[must_use]
    pub fn min_rating(&self) -> Option<u32> {
        self.min_rating
    }

    #[must_use]
    pub fn max_rating(&self) -> Option<u32> {
        self.max_rating
    }

    #[must_use]
    pub fn per_page(&self) -> u32 {
        self.per_page
    }

    /// Whether a problem rating passes the configured bounds. Unrated problems
    /// only pass when no bound is set.
    #[must_use]
    pub fn rating_in_range(&self, rating: Option<u32>) -> bool {
        match rating {
            Some(r) => {
                self.min_rating.is_none_or(|lo| r >= lo) && self.max_rating.is_none_or(|hi| r <= hi)
            }
            None => self.min_rating.is_none() && self.max_rating.is_none(),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            version: Self::CURRENT_VERSION,
            show_tags: false,
            show_rating: true,
            hide_solved: false,
            min_rating: None,
            max_rating: None,
            per_page: 100,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn init_tolerates_missing_and_extra_fields() {
        let state = AppState::init(&json!({"showTags": true, "theme": "dark"}));
        assert!(state.show_tags());
        assert!(state.show_rating());
        assert_eq!(state.per_page(), 100);
        assert_eq!(state.version(), AppState::CURRENT_VERSION);
    }

    #[test]
    fn init_upgrades_v1_payload() {
        let state = AppState::init(&json!({"version": 1, "tags": true, "perPage": 0}));
        assert!(state.show_tags());
        assert_eq!(state.per_page(), 100);
    }

    #[test]
    fn init_on_garbage_yields_defaults() {
        assert_eq!(AppState::init(&json!("nope")), AppState::default());
        assert_eq!(AppState::init(&json!({"perPage": "ten"})), AppState::default());
    }

    #[test]
    fn draft_normalizes_bounds_and_page_size() {
        let state = AppStateDraft {
            min_rating: Some(2000),
            max_rating: Some(1200),
            per_page: Some(5),
            ..AppStateDraft::new()
        }
        .apply_to(&AppState::default());
        assert_eq!(state.min_rating(), Some(1200));
        assert_eq!(state.max_rating(), Some(2000));
        assert_eq!(state.per_page(), AppState::MIN_PER_PAGE);
    }

    #[test]
    fn init_round_trips_its_own_output() {
        let state = AppStateDraft {
            show_tags: Some(true),
            hide_solved: Some(true),
            min_rating: Some(800),
            per_page: Some(50),
            ..AppStateDraft::new()
        }
        .apply_to(&AppState::default());
        let value = serde_json::to_value(&state).unwrap();
        assert_eq!(AppState::init(&value), state);
    }

    #[test]
    fn rating_range_filters() {
        let state = AppStateDraft {
            min_rating: Some(1000),
            max_rating: Some(1500),
            ..AppStateDraft::new()
        }
        .apply_to(&AppState::default());
        assert!(state.rating_in_range(Some(1200)));
        assert!(!state.rating_in_range(Some(1600)));
        assert!(!state.rating_in_range(None));
        assert!(AppState::default().rating_in_range(None));
    }
}
