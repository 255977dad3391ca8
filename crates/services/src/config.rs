use std::env;

use url::Url;

use crate::error::ConfigError;

pub const DEFAULT_API_BASE: &str = "https://codeforces.com/api";
pub const DEFAULT_DB_URL: &str = "sqlite://cftracker.sqlite3";

/// Process configuration: judge endpoints and the durable store location.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TrackerConfig {
    pub api_base: Url,
    pub shared_problems_url: Option<Url>,
    pub db_url: String,
}

impl TrackerConfig {
    /// Read `CFTRACKER_API_BASE`, `CFTRACKER_SHARED_URL` and `CFTRACKER_DB_URL`,
    /// falling back to defaults for anything unset or blank.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidUrl` if a URL variable does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_base = non_blank(env::var("CFTRACKER_API_BASE").ok())
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string());
        let shared = non_blank(env::var("CFTRACKER_SHARED_URL").ok());
        let db_url = non_blank(env::var("CFTRACKER_DB_URL").ok())
            .unwrap_or_else(|| DEFAULT_DB_URL.to_string());

        Ok(Self {
            api_base: parse_url("CFTRACKER_API_BASE", &api_base)?,
            shared_problems_url: shared
                .map(|raw| parse_url("CFTRACKER_SHARED_URL", &raw))
                .transpose()?,
            db_url,
        })
    }

    /// # Errors
    ///
    /// Returns `ConfigError::InvalidUrl` if `raw` does not parse.
    pub fn with_api_base(mut self, raw: &str) -> Result<Self, ConfigError> {
        self.api_base = parse_url("--api", raw)?;
        Ok(self)
    }

    /// # Errors
    ///
    /// Returns `ConfigError::EmptyDbUrl` if `raw` is blank.
    pub fn with_db_url(mut self, raw: &str) -> Result<Self, ConfigError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ConfigError::EmptyDbUrl);
        }
        self.db_url = trimmed.to_string();
        Ok(self)
    }
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            api_base: Url::parse(DEFAULT_API_BASE).expect("default API base is a valid URL"),
            shared_problems_url: None,
            db_url: DEFAULT_DB_URL.to_string(),
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|val| val.trim().to_string())
        .filter(|val| !val.is_empty())
}

fn parse_url(var: &'static str, raw: &str) -> Result<Url, ConfigError> {
    Url::parse(raw.trim()).map_err(|_| ConfigError::InvalidUrl {
        var,
        raw: raw.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_validate_input() {
        let config = TrackerConfig::default()
            .with_api_base("http://localhost:8080/api")
            .unwrap()
            .with_db_url(" sqlite::memory: ")
            .unwrap();
        assert_eq!(config.api_base.as_str(), "http://localhost:8080/api");
        assert_eq!(config.db_url, "sqlite::memory:");

        assert!(matches!(
            TrackerConfig::default().with_api_base("not a url"),
            Err(ConfigError::InvalidUrl { var: "--api", .. })
        ));
        assert!(matches!(
            TrackerConfig::default().with_db_url("  "),
            Err(ConfigError::EmptyDbUrl)
        ));
    }

    #[test]
    fn default_points_at_public_api() {
        let config = TrackerConfig::default();
        assert_eq!(config.api_base.as_str(), "https://codeforces.com/api");
        assert!(config.shared_problems_url.is_none());
    }
}
