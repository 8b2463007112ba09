//! Seismic Domain Model
//!
//! Provides the report/event/alert data model, severity classification,
//! and per-region event expansion.

mod alert;
mod event;
mod region;
mod report;
mod severity;
pub mod time;

pub use alert::{Alert, AlertStatus, TriState};
pub use event::{expand, Event};
pub use region::{Region, UnknownRegion};
pub use report::{Report, ShakingArea};
pub use severity::{classify, SeverityThresholds, SeverityTier};
