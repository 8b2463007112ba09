//! Alert Lifecycle Manager

use crate::AlertingError;
use broadcast::{AlertBus, AlertNotice, NoticeKind};
use chrono::{DateTime, Duration, FixedOffset, Utc};
use quake_model::{time, Alert, AlertStatus};
use storage::{alert_key, AlertStore, ALERT_PREFIX};
use tracing::info;

/// Transitions open alerts to their terminal states and removes them from
/// the store. Closing deletes the record: the store only ever holds open
/// alerts, and durability of closed ones is the metrics collaborator's
/// concern.
#[derive(Clone)]
pub struct LifecycleManager {
    store: AlertStore,
    bus: AlertBus,
}

impl LifecycleManager {
    pub fn new(store: AlertStore, bus: AlertBus) -> Self {
        Self { store, bus }
    }

    /// Acknowledge an open alert, marking it PROCESSED.
    ///
    /// The key is derived from the submitted payload's (source, region);
    /// `NotFound` if no open alert lives there or its id does not match
    /// `alert_id`. Processing duration is the span from the submitted
    /// origin time to the submitted processed time (now, when omitted).
    ///
    /// Acknowledgment does not publish to the alert bus; only promotion and
    /// autoclose do. That asymmetry is inherited from the source system.
    pub async fn acknowledge(
        &self,
        alert_id: &str,
        submitted: Alert,
    ) -> Result<Alert, AlertingError> {
        let key = alert_key(&submitted.source, submitted.region);
        let stored = self
            .store
            .get(&key)
            .await?
            .filter(|a| a.status == AlertStatus::Open && a.id == alert_id)
            .ok_or_else(|| AlertingError::NotFound(alert_id.to_string()))?;

        let processed_time = submitted
            .processed_time
            .unwrap_or_else(|| Utc::now().with_timezone(&time::reference_offset()));

        let mut processed = submitted;
        processed.id = stored.id;
        processed.status = AlertStatus::Processed;
        processed.processing_duration = (processed_time - processed.origin_time).num_seconds();
        processed.processed_time = Some(processed_time);

        self.store.delete(&key).await?;
        info!(
            alert = %processed.id,
            duration_secs = processed.processing_duration,
            "alert acknowledged"
        );
        Ok(processed)
    }

    /// Close every open alert older than `timeout`, publishing an
    /// AUTOCLOSED notice per closure. Returns the number closed.
    ///
    /// Safe to run concurrently with report ingestion: each closure is one
    /// idempotent delete, and a promotion racing the sweep simply rewrites
    /// the pair's record.
    pub async fn autoclose(
        &self,
        now: DateTime<FixedOffset>,
        timeout: Duration,
    ) -> Result<usize, AlertingError> {
        let alerts = self.store.scan_prefix(ALERT_PREFIX).await?;

        let mut closed = 0;
        for mut alert in alerts {
            if alert.status != AlertStatus::Open || now - alert.origin_time <= timeout {
                continue;
            }
            alert.status = AlertStatus::Autoclosed;
            self.store
                .delete(&alert_key(&alert.source, alert.region))
                .await?;
            info!(alert = %alert.id, region = %alert.region, "alert autoclosed");
            self.bus.publish(AlertNotice {
                kind: NoticeKind::Autoclosed,
                alert,
            });
            closed += 1;
        }
        Ok(closed)
    }
}
