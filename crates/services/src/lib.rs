#![forbid(unsafe_code)]

pub mod app_services;
pub mod config;
pub mod error;
pub mod judge;
pub mod persistence;
pub mod sync_service;
pub mod tracker_store;

pub use app_services::AppServices;
pub use config::TrackerConfig;
pub use error::{AppServicesError, ConfigError, JudgeError};
pub use judge::{CodeforcesClient, JudgeApi};
pub use persistence::PersistenceAdapter;
pub use sync_service::SyncService;
pub use tracker_store::TrackerStore;
