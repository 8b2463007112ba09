//! Suppression Window Settings Store

use crate::{KvCache, StorageError};
use std::sync::Arc;
use tracing::{info, warn};

/// Cache key holding the runtime-set suppression window
const SUPPRESS_WINDOW_KEY: &str = "ALERT_SUPPRESS_TIME";

/// Single-key configuration store for the suppression window.
///
/// The value is read fresh on every promotion decision; concurrent updates
/// only affect the suppression heuristic, never alert identity.
#[derive(Clone)]
pub struct SettingsStore {
    cache: Arc<KvCache>,
    default_secs: u64,
}

impl SettingsStore {
    pub fn new(cache: Arc<KvCache>, default_secs: u64) -> Self {
        Self {
            cache,
            default_secs,
        }
    }

    /// Current suppression window in seconds, falling back to the static
    /// default when unset or unparsable.
    pub async fn suppress_window_secs(&self) -> Result<u64, StorageError> {
        match self.cache.get(SUPPRESS_WINDOW_KEY).await? {
            Some(raw) => match raw.parse::<u64>() {
                Ok(secs) => Ok(secs),
                Err(_) => {
                    warn!(raw = %raw, "unparsable suppression window in cache, using default");
                    Ok(self.default_secs)
                }
            },
            None => Ok(self.default_secs),
        }
    }

    /// Set the suppression window in seconds
    pub async fn set_suppress_window_secs(&self, secs: u64) -> Result<(), StorageError> {
        self.cache
            .set(SUPPRESS_WINDOW_KEY, &secs.to_string())
            .await?;
        info!(secs, "suppression window updated");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_falls_back_to_default_when_unset() {
        let settings = SettingsStore::new(Arc::new(KvCache::new()), 600);
        assert_eq!(settings.suppress_window_secs().await.unwrap(), 600);
    }

    #[tokio::test]
    async fn test_set_then_get() {
        let settings = SettingsStore::new(Arc::new(KvCache::new()), 600);
        settings.set_suppress_window_secs(300).await.unwrap();
        assert_eq!(settings.suppress_window_secs().await.unwrap(), 300);
    }

    #[tokio::test]
    async fn test_unparsable_value_uses_default() {
        let cache = Arc::new(KvCache::new());
        cache.set(SUPPRESS_WINDOW_KEY, "soon").await.unwrap();
        let settings = SettingsStore::new(cache, 600);
        assert_eq!(settings.suppress_window_secs().await.unwrap(), 600);
    }
}
