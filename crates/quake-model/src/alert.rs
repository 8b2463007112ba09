//! Alert Lifecycle Types

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::{Event, Region, SeverityTier};

/// Lifecycle status of an alert
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AlertStatus {
    Open,
    Processed,
    Autoclosed,
}

/// Tri-state field reported by the command center
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TriState {
    True,
    False,
    #[default]
    Unknown,
}

/// A promoted event, persisted in the alert store until closed.
///
/// At most one OPEN alert may exist per (source, region); the suppression
/// engine enforces this, not the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alert {
    /// Identity of the originating event: `{report_id}-{region}`
    pub id: String,
    pub source: String,
    #[serde(with = "crate::time::flexible")]
    pub origin_time: DateTime<FixedOffset>,
    pub region: Region,
    pub severity: SeverityTier,
    pub status: AlertStatus,
    #[serde(default)]
    pub damage: TriState,
    #[serde(default)]
    pub command_center: TriState,
    #[serde(default, with = "crate::time::flexible_opt")]
    pub processed_time: Option<DateTime<FixedOffset>>,
    /// Seconds from origin to acknowledgment; set only on PROCESSED
    #[serde(default)]
    pub processing_duration: i64,
}

impl Alert {
    /// Open a new alert from a promoted event. Every field is set
    /// explicitly; there are no silent defaults beyond the tri-states
    /// starting Unknown.
    pub fn promote(event: &Event) -> Self {
        Self {
            id: event.id(),
            source: event.source.clone(),
            origin_time: event.origin_time,
            region: event.region,
            severity: event.severity,
            status: AlertStatus::Open,
            damage: TriState::Unknown,
            command_center: TriState::Unknown,
            processed_time: None,
            processing_duration: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_promote_opens_with_unknown_flags() {
        let event = Event {
            report_id: Uuid::new_v4(),
            source: "CWA".to_string(),
            origin_time: crate::time::parse_flexible("2024-01-01T12:00:00+08:00").unwrap(),
            region: Region::Hsinchu,
            severity: SeverityTier::Tier1,
        };
        let alert = Alert::promote(&event);

        assert_eq!(alert.id, event.id());
        assert_eq!(alert.status, AlertStatus::Open);
        assert_eq!(alert.damage, TriState::Unknown);
        assert_eq!(alert.command_center, TriState::Unknown);
        assert_eq!(alert.processed_time, None);
        assert_eq!(alert.processing_duration, 0);
    }

    #[test]
    fn test_status_wire_names() {
        assert_eq!(
            serde_json::to_string(&AlertStatus::Autoclosed).unwrap(),
            "\"AUTOCLOSED\""
        );
        assert_eq!(
            serde_json::to_string(&TriState::Unknown).unwrap(),
            "\"UNKNOWN\""
        );
    }
}
