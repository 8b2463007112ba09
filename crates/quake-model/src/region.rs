//! Monitored Region Enumeration

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error for a region name outside the monitored set
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown region: {0}")]
pub struct UnknownRegion(pub String);

/// One of the monitored areas.
///
/// The set is fixed at compile time; declaration order is the expansion
/// order used by [`crate::expand`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Region {
    Taipei,
    Hsinchu,
    Taichung,
    Tainan,
}

impl Region {
    /// All monitored regions, in declaration order
    pub const ALL: [Region; 4] = [
        Region::Taipei,
        Region::Hsinchu,
        Region::Taichung,
        Region::Tainan,
    ];

    /// Region name as used in keys and payloads
    pub fn as_str(&self) -> &'static str {
        match self {
            Region::Taipei => "Taipei",
            Region::Hsinchu => "Hsinchu",
            Region::Taichung => "Taichung",
            Region::Tainan => "Tainan",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Region {
    type Err = UnknownRegion;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Region::ALL
            .iter()
            .find(|r| r.as_str() == s)
            .copied()
            .ok_or_else(|| UnknownRegion(s.to_string()))
    }
}
