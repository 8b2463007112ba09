//! Alert Store Adapter

use crate::cache::SCAN_PAGE_SIZE;
use crate::{KvCache, StorageError};
use quake_model::{Alert, AlertStatus, Region};
use std::sync::Arc;
use tracing::{debug, warn};

/// Key prefix shared by every alert record
pub const ALERT_PREFIX: &str = "alert_";

/// Key of the alert record for one (source, region) pair:
/// `alert_{source}_{region}`. One record per pair, so an upsert replaces
/// any alert previously open for that pair.
pub fn alert_key(source: &str, region: Region) -> String {
    format!("{ALERT_PREFIX}{source}_{region}")
}

/// Adapter exposing alert operations over the keyed cache.
///
/// The store exclusively owns alert records; the engine and the lifecycle
/// manager borrow them for the duration of one operation and never cache
/// state across calls.
#[derive(Clone)]
pub struct AlertStore {
    cache: Arc<KvCache>,
}

impl AlertStore {
    pub fn new(cache: Arc<KvCache>) -> Self {
        Self { cache }
    }

    /// Upsert one alert at its derived key
    pub async fn put(&self, alert: &Alert) -> Result<(), StorageError> {
        let key = alert_key(&alert.source, alert.region);
        let value =
            serde_json::to_string(alert).map_err(|e| StorageError::Serialization(e.to_string()))?;
        self.cache.set(&key, &value).await?;
        debug!(key = %key, "alert stored");
        Ok(())
    }

    /// Delete the record at a key; absent keys are not an error
    pub async fn delete(&self, key: &str) -> Result<(), StorageError> {
        self.cache.delete(key).await
    }

    /// Get and decode one record. Corrupt records read as absent.
    pub async fn get(&self, key: &str) -> Result<Option<Alert>, StorageError> {
        match self.cache.get(key).await? {
            Some(raw) => Ok(decode(key, &raw)),
            None => Ok(None),
        }
    }

    /// Enumerate every decodable alert under a key prefix.
    ///
    /// Pages through the cache cursor; empty or corrupt records are skipped
    /// with a warning rather than failing the whole scan.
    pub async fn scan_prefix(&self, prefix: &str) -> Result<Vec<Alert>, StorageError> {
        let mut cursor = 0;
        let mut alerts = Vec::new();
        loop {
            let (next, keys) = self.cache.scan(cursor, prefix, SCAN_PAGE_SIZE).await?;
            for key in keys {
                if let Some(raw) = self.cache.get(&key).await? {
                    if let Some(alert) = decode(&key, &raw) {
                        alerts.push(alert);
                    }
                }
            }
            if next == 0 {
                break;
            }
            cursor = next;
        }
        Ok(alerts)
    }

    /// The most recently originated open alert under a prefix, if any
    pub async fn latest_open(&self, prefix: &str) -> Result<Option<Alert>, StorageError> {
        let alerts = self.scan_prefix(prefix).await?;
        Ok(alerts
            .into_iter()
            .filter(|a| a.status == AlertStatus::Open)
            .max_by_key(|a| a.origin_time))
    }

    /// Every open alert, sorted by origin time descending, then region name
    /// ascending, then source ascending.
    pub async fn open_alerts(&self) -> Result<Vec<Alert>, StorageError> {
        let mut alerts: Vec<Alert> = self
            .scan_prefix(ALERT_PREFIX)
            .await?
            .into_iter()
            .filter(|a| a.status == AlertStatus::Open)
            .collect();
        alerts.sort_by(|a, b| {
            b.origin_time
                .cmp(&a.origin_time)
                .then_with(|| a.region.as_str().cmp(b.region.as_str()))
                .then_with(|| a.source.cmp(&b.source))
        });
        Ok(alerts)
    }
}

fn decode(key: &str, raw: &str) -> Option<Alert> {
    match serde_json::from_str(raw) {
        Ok(alert) => Some(alert),
        Err(e) => {
            let err = StorageError::Decode {
                key: key.to_string(),
                reason: e.to_string(),
            };
            warn!(%err, "skipping corrupt alert record");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, FixedOffset};
    use quake_model::SeverityTier;

    fn ts(s: &str) -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339(s).unwrap()
    }

    fn alert(id: &str, source: &str, region: Region, time: &str) -> Alert {
        Alert {
            id: id.to_string(),
            source: source.to_string(),
            origin_time: ts(time),
            region,
            severity: SeverityTier::Tier1,
            status: AlertStatus::Open,
            damage: Default::default(),
            command_center: Default::default(),
            processed_time: None,
            processing_duration: 0,
        }
    }

    fn store() -> AlertStore {
        AlertStore::new(Arc::new(KvCache::new()))
    }

    #[tokio::test]
    async fn test_put_replaces_record_for_same_pair() {
        let store = store();
        store
            .put(&alert("a1", "S1", Region::Taipei, "2024-01-01T10:00:00+08:00"))
            .await
            .unwrap();
        store
            .put(&alert("a2", "S1", Region::Taipei, "2024-01-01T11:00:00+08:00"))
            .await
            .unwrap();

        let alerts = store.scan_prefix(ALERT_PREFIX).await.unwrap();
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].id, "a2");
    }

    #[tokio::test]
    async fn test_latest_open_picks_most_recent_across_pairs() {
        let store = store();
        store
            .put(&alert("a1", "S1", Region::Taipei, "2024-01-01T10:00:00+08:00"))
            .await
            .unwrap();
        store
            .put(&alert("a2", "S1", Region::Tainan, "2024-01-01T11:00:00+08:00"))
            .await
            .unwrap();

        let latest = store
            .latest_open(&format!("{ALERT_PREFIX}S1_"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(latest.id, "a2");
    }

    #[tokio::test]
    async fn test_latest_open_absent_when_empty() {
        let store = store();
        let latest = store
            .latest_open(&alert_key("S1", Region::Taipei))
            .await
            .unwrap();
        assert!(latest.is_none());
    }

    #[tokio::test]
    async fn test_corrupt_record_skipped() {
        let cache = Arc::new(KvCache::new());
        let store = AlertStore::new(cache.clone());
        store
            .put(&alert("a1", "S1", Region::Taipei, "2024-01-01T10:00:00+08:00"))
            .await
            .unwrap();
        cache.set("alert_S2_Tainan", "{not json").await.unwrap();

        let alerts = store.scan_prefix(ALERT_PREFIX).await.unwrap();
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].id, "a1");
    }

    #[tokio::test]
    async fn test_open_alerts_sorted() {
        let store = store();
        store
            .put(&alert("a1", "S2", Region::Taipei, "2024-01-01T10:00:00+08:00"))
            .await
            .unwrap();
        store
            .put(&alert("a2", "S1", Region::Tainan, "2024-01-01T11:00:00+08:00"))
            .await
            .unwrap();
        store
            .put(&alert("a3", "S1", Region::Hsinchu, "2024-01-01T11:00:00+08:00"))
            .await
            .unwrap();

        let listed = store.open_alerts().await.unwrap();
        let ids: Vec<&str> = listed.iter().map(|a| a.id.as_str()).collect();
        // newest first; ties broken by region name, then source
        assert_eq!(ids, vec!["a3", "a2", "a1"]);
    }

    #[tokio::test]
    async fn test_get_roundtrip_and_delete() {
        let store = store();
        let a = alert("a1", "S1", Region::Taichung, "2024-01-01T10:00:00+08:00");
        store.put(&a).await.unwrap();

        let key = alert_key("S1", Region::Taichung);
        assert!(store.get(&key).await.unwrap().is_some());

        store.delete(&key).await.unwrap();
        assert!(store.get(&key).await.unwrap().is_none());
        // deleting again is fine
        store.delete(&key).await.unwrap();
    }
}
