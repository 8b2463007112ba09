//! Severity Classification

use serde::{Deserialize, Serialize};

/// Severity tier for one region.
///
/// Ordering is load-bearing: the suppression engine compares tiers to
/// decide whether a repeat event escalates or is dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SeverityTier {
    None,
    Tier1,
    Tier2,
}

/// Classification thresholds
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeverityThresholds {
    /// Magnitude at or above which an event is Tier2 regardless of intensity
    pub tier2_magnitude: f64,
    /// Regional intensity at or above which an event is Tier2
    pub tier2_intensity: f64,
    /// Regional intensity at or above which an event is at least Tier1
    pub tier1_intensity: f64,
}

impl Default for SeverityThresholds {
    fn default() -> Self {
        Self {
            tier2_magnitude: 5.0,
            tier2_intensity: 3.0,
            tier1_intensity: 1.0,
        }
    }
}

impl SeverityThresholds {
    /// Classify a (magnitude, regional intensity) pair
    pub fn classify(&self, magnitude: f64, intensity: f64) -> SeverityTier {
        if magnitude >= self.tier2_magnitude || intensity >= self.tier2_intensity {
            SeverityTier::Tier2
        } else if intensity >= self.tier1_intensity {
            SeverityTier::Tier1
        } else {
            SeverityTier::None
        }
    }
}

/// Classify with the default thresholds
pub fn classify(magnitude: f64, intensity: f64) -> SeverityTier {
    SeverityThresholds::default().classify(magnitude, intensity)
}
