//! Storage Layer
//!
//! Provides the keyed alert cache, the alert-store adapter over it, and the
//! single-key settings store for the suppression window.
//!
//! The cache is a flat keyed map with redis-shaped operations (get/set/
//! delete/cursor-scan); it is the only shared mutable resource in the
//! system and the sole owner of alert state.

mod alert_store;
mod cache;
mod settings;

pub use alert_store::{alert_key, AlertStore, ALERT_PREFIX};
pub use cache::KvCache;
pub use settings::SettingsStore;

use thiserror::Error;

/// Storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backing cache is unreachable. Surfaced as degraded service;
    /// ingestion fails loudly rather than silently dropping an alert.
    #[error("backing store unavailable: {0}")]
    Unavailable(String),
    /// A stored record is corrupt. Recovered locally by skipping the
    /// record during scans; never propagated to callers.
    #[error("corrupt record at {key}: {reason}")]
    Decode { key: String, reason: String },
    #[error("serialization error: {0}")]
    Serialization(String),
    #[error("record not found")]
    NotFound,
}
