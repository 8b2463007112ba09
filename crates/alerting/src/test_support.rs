//! Shared fixtures for engine and lifecycle tests

use crate::{LifecycleManager, SuppressionEngine};
use broadcast::AlertBus;
use chrono::{DateTime, Duration, FixedOffset};
use quake_model::{Event, Region, SeverityTier};
use std::sync::Arc;
use storage::{AlertStore, KvCache, SettingsStore};
use uuid::Uuid;

pub(crate) struct Fixture {
    pub engine: SuppressionEngine,
    pub lifecycle: LifecycleManager,
    pub store: AlertStore,
    pub settings: SettingsStore,
    pub bus: AlertBus,
}

pub(crate) async fn engine_fixture(window_secs: u64) -> Fixture {
    let cache = Arc::new(KvCache::new());
    let store = AlertStore::new(cache.clone());
    let settings = SettingsStore::new(cache, window_secs);
    let bus = AlertBus::new();
    Fixture {
        engine: SuppressionEngine::new(store.clone(), settings.clone(), bus.clone()),
        lifecycle: LifecycleManager::new(store.clone(), bus.clone()),
        store,
        settings,
        bus,
    }
}

pub(crate) fn base_time() -> DateTime<FixedOffset> {
    DateTime::parse_from_rfc3339("2024-01-01T00:00:00+08:00").unwrap()
}

/// Event `offset_secs` after the fixture base time
pub(crate) fn event(
    source: &str,
    region: Region,
    severity: SeverityTier,
    offset_secs: i64,
) -> Event {
    Event {
        report_id: Uuid::new_v4(),
        source: source.to_string(),
        origin_time: base_time() + Duration::seconds(offset_secs),
        region,
        severity,
    }
}
