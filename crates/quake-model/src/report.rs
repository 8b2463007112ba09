//! Raw Seismic Report

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::Region;

/// Observed shaking for one region
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShakingArea {
    pub region: Region,
    pub intensity: f64,
}

/// One externally supplied seismic observation.
///
/// Immutable once received; regions absent from `shaking_area` are treated
/// as intensity 0 during expansion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    /// Generated when the sender does not supply one
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub source: String,
    #[serde(with = "crate::time::flexible")]
    pub origin_time: DateTime<FixedOffset>,
    pub epicenter: String,
    pub magnitude: f64,
    pub focal_depth: f64,
    #[serde(default)]
    pub shaking_area: Vec<ShakingArea>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_generates_id_and_defaults_area() {
        let json = r#"{
            "source": "CWA",
            "origin_time": "2024-01-01T12:00:00",
            "epicenter": "off the coast of Hualien",
            "magnitude": 5.5,
            "focal_depth": 10.0
        }"#;
        let report: Report = serde_json::from_str(json).unwrap();
        assert!(report.shaking_area.is_empty());
        assert_eq!(report.origin_time.offset().local_minus_utc(), 8 * 3600);
    }

    #[test]
    fn test_unknown_region_rejected_at_boundary() {
        let json = r#"{
            "source": "CWA",
            "origin_time": "2024-01-01T12:00:00Z",
            "epicenter": "x",
            "magnitude": 4.0,
            "focal_depth": 5.0,
            "shaking_area": [{"region": "Gotham", "intensity": 2.0}]
        }"#;
        assert!(serde_json::from_str::<Report>(json).is_err());
    }
}
