//! Keyed Cache Implementation

use crate::StorageError;
use std::collections::BTreeMap;
use tokio::sync::RwLock;
use tracing::{debug, info};

/// Page size used by full-prefix scans
pub(crate) const SCAN_PAGE_SIZE: usize = 100;

/// Flat keyed cache with redis-shaped operations.
///
/// In-memory implementation standing in for the external cache instance;
/// per-key reads and writes are atomic, and every operation is a suspension
/// point, matching the concurrency model of the real backend. No
/// transactional get-then-put is offered.
pub struct KvCache {
    entries: RwLock<BTreeMap<String, String>>,
}

impl KvCache {
    /// Create an empty cache
    pub fn new() -> Self {
        info!("Creating in-memory keyed cache");
        Self {
            entries: RwLock::new(BTreeMap::new()),
        }
    }

    /// Liveness probe
    pub async fn ping(&self) -> Result<(), StorageError> {
        let _ = self.entries.read().await;
        Ok(())
    }

    /// Get the value at a key
    pub async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    /// Upsert; overwrites any prior record at the same key
    pub async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    /// Delete a key. Idempotent: deleting an absent key is not an error.
    pub async fn delete(&self, key: &str) -> Result<(), StorageError> {
        let removed = self.entries.write().await.remove(key).is_some();
        debug!(key, removed, "cache delete");
        Ok(())
    }

    /// Cursor-paginated scan of keys under a prefix.
    ///
    /// Call with cursor 0, then feed back the returned cursor until it is 0
    /// again. A page holds at most `count` keys; the scan never assumes the
    /// key space fits a single page.
    pub async fn scan(
        &self,
        cursor: u64,
        prefix: &str,
        count: usize,
    ) -> Result<(u64, Vec<String>), StorageError> {
        let entries = self.entries.read().await;
        let matching: Vec<&String> = entries
            .range(prefix.to_string()..)
            .map(|(k, _)| k)
            .take_while(|k| k.starts_with(prefix))
            .collect();

        let start = cursor as usize;
        let page: Vec<String> = matching
            .iter()
            .skip(start)
            .take(count)
            .map(|k| (*k).clone())
            .collect();

        let next = if start + page.len() >= matching.len() {
            0
        } else {
            (start + page.len()) as u64
        };
        Ok((next, page))
    }

    /// Drop every record
    pub async fn flush(&self) -> Result<(), StorageError> {
        self.entries.write().await.clear();
        info!("cache flushed");
        Ok(())
    }

    /// Number of stored records
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }
}

impl Default for KvCache {
    fn default() -> Self {
        Self::new()
    }
}
