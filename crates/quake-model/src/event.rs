//! Per-Region Event Expansion

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Region, Report, SeverityThresholds, SeverityTier};

/// Per-region severity projection of a [`Report`].
///
/// Ephemeral: consumed immediately by the suppression engine, never stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub report_id: Uuid,
    pub source: String,
    #[serde(with = "crate::time::flexible")]
    pub origin_time: DateTime<FixedOffset>,
    pub region: Region,
    pub severity: SeverityTier,
}

impl Event {
    /// Stable identity: `{report_id}-{region}`
    pub fn id(&self) -> String {
        format!("{}-{}", self.report_id, self.region)
    }
}

/// Expand a report into one event per monitored region, in [`Region::ALL`]
/// order. Regions the report does not mention get intensity 0.
pub fn expand(report: &Report) -> Vec<Event> {
    let thresholds = SeverityThresholds::default();

    Region::ALL
        .iter()
        .map(|&region| {
            let intensity = report
                .shaking_area
                .iter()
                .find(|area| area.region == region)
                .map_or(0.0, |area| area.intensity);

            Event {
                report_id: report.id,
                source: report.source.clone(),
                origin_time: report.origin_time,
                region,
                severity: thresholds.classify(report.magnitude, intensity),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ShakingArea;

    fn report(magnitude: f64, areas: Vec<ShakingArea>) -> Report {
        Report {
            id: Uuid::new_v4(),
            source: "CWA".to_string(),
            origin_time: crate::time::parse_flexible("2024-01-01T12:00:00+08:00").unwrap(),
            epicenter: "off the coast of Hualien".to_string(),
            magnitude,
            focal_depth: 10.0,
            shaking_area: areas,
        }
    }

    #[test]
    fn test_one_event_per_region_in_declaration_order() {
        let report = report(2.0, vec![]);
        let events = expand(&report);

        assert_eq!(events.len(), Region::ALL.len());
        for (event, region) in events.iter().zip(Region::ALL) {
            assert_eq!(event.region, region);
            assert_eq!(event.severity, SeverityTier::None);
        }
    }

    #[test]
    fn test_mentioned_region_classified_others_default_to_zero() {
        let report = report(
            4.0,
            vec![ShakingArea {
                region: Region::Tainan,
                intensity: 4.0,
            }],
        );
        let events = expand(&report);

        let tainan = events.iter().find(|e| e.region == Region::Tainan).unwrap();
        assert_eq!(tainan.severity, SeverityTier::Tier2);
        for event in events.iter().filter(|e| e.region != Region::Tainan) {
            assert_eq!(event.severity, SeverityTier::None);
        }
    }

    #[test]
    fn test_high_magnitude_promotes_every_region() {
        let events = expand(&report(5.5, vec![]));
        assert!(events.iter().all(|e| e.severity == SeverityTier::Tier2));
    }

    #[test]
    fn test_event_id_combines_report_and_region() {
        let report = report(2.0, vec![]);
        let events = expand(&report);
        assert_eq!(events[0].id(), format!("{}-Taipei", report.id));
    }
}
