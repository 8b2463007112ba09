//! Suppression & Promotion Engine

use crate::AlertingError;
use broadcast::{AlertBus, AlertNotice, NoticeKind};
use chrono::Duration;
use quake_model::{Alert, Event, SeverityTier};
use storage::{alert_key, AlertStore, SettingsStore};
use tracing::{debug, info};

/// Decides, per expanded event, whether to suppress it or promote it into
/// a newly opened alert.
///
/// The alert record for a (source, region) pair lives at a single key, so
/// a promotion replaces whatever alert was previously open for that pair;
/// at most one OPEN alert per pair can exist. The store offers no
/// conditional write, so two promotions racing on the same pair can both
/// observe "no open alert" and both write; the second write wins. Accepted
/// weak-consistency limitation of the backing cache.
#[derive(Clone)]
pub struct SuppressionEngine {
    store: AlertStore,
    settings: SettingsStore,
    bus: AlertBus,
}

impl SuppressionEngine {
    pub fn new(store: AlertStore, settings: SettingsStore, bus: AlertBus) -> Self {
        Self {
            store,
            settings,
            bus,
        }
    }

    /// Process expanded events in order, returning the newly opened alerts.
    ///
    /// Per event: an existing open alert for the same (source, region)
    /// suppresses it iff the event's severity is equal or lower and its
    /// origin falls within the suppression window. A higher severity always
    /// promotes, window or not. NONE-severity events are informational and
    /// never open alerts. The window is read fresh on every call.
    pub async fn promote(&self, events: &[Event]) -> Result<Vec<Alert>, AlertingError> {
        let window = Duration::seconds(self.settings.suppress_window_secs().await? as i64);

        let mut promoted = Vec::new();
        for event in events {
            let key = alert_key(&event.source, event.region);
            if let Some(existing) = self.store.latest_open(&key).await? {
                if event.severity <= existing.severity
                    && event.origin_time - existing.origin_time <= window
                {
                    debug!(
                        source = %event.source,
                        region = %event.region,
                        severity = ?event.severity,
                        "event suppressed, open alert within window"
                    );
                    continue;
                }
            }

            if event.severity == SeverityTier::None {
                continue;
            }

            let alert = Alert::promote(event);
            self.store.put(&alert).await?;
            self.bus.publish(AlertNotice {
                kind: NoticeKind::Open,
                alert: alert.clone(),
            });
            info!(
                alert = %alert.id,
                region = %alert.region,
                severity = ?alert.severity,
                "alert opened"
            );
            promoted.push(alert);
        }
        Ok(promoted)
    }
}
