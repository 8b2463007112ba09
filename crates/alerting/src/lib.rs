//! Alert Generation, Suppression & Lifecycle Engine
//!
//! Consumes expanded per-region events, decides suppression versus
//! promotion against the alert store, tracks open alerts until they are
//! acknowledged or expire, and publishes lifecycle notices to the alert
//! bus.

mod engine;
mod lifecycle;
mod sweeper;

#[cfg(test)]
mod test_support;

pub use engine::SuppressionEngine;
pub use lifecycle::LifecycleManager;
pub use sweeper::{Sweeper, SweeperHandle};

use thiserror::Error;

/// Alerting errors
#[derive(Debug, Error)]
pub enum AlertingError {
    /// Acknowledgment targeted an alert that is absent or already closed
    #[error("no open alert with id {0}")]
    NotFound(String),
    #[error(transparent)]
    Storage(#[from] storage::StorageError),
}
