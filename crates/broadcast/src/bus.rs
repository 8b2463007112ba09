//! Alert Notification Channel

use quake_model::Alert;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tracing::debug;

/// Name of the channel carrying lifecycle notifications
pub const ALERTS_CHANNEL: &str = "alerts";

/// Buffered notices per subscriber before lagging kicks in
const BUS_CAPACITY: usize = 256;

/// Which lifecycle transition a notice describes.
///
/// Acknowledgment is deliberately absent: the source system only publishes
/// on promotion and autoclose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NoticeKind {
    Open,
    Autoclosed,
}

/// Wire envelope pushed to subscribers: `{"type": ..., "alert": ...}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertNotice {
    #[serde(rename = "type")]
    pub kind: NoticeKind,
    pub alert: Alert,
}

/// Named pub/sub channel of [`AlertNotice`] envelopes.
///
/// Delivery is best-effort, at most once per transition; publishing with no
/// subscribers is not an error.
#[derive(Clone)]
pub struct AlertBus {
    tx: broadcast::Sender<AlertNotice>,
}

impl AlertBus {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(BUS_CAPACITY);
        Self { tx }
    }

    /// Publish one notice to the channel
    pub fn publish(&self, notice: AlertNotice) {
        match self.tx.send(notice) {
            Ok(receivers) => {
                debug!(channel = ALERTS_CHANNEL, receivers, "notice published")
            }
            Err(_) => debug!(channel = ALERTS_CHANNEL, "notice dropped, no subscribers"),
        }
    }

    /// Attach a new listener to the channel
    pub fn subscribe(&self) -> broadcast::Receiver<AlertNotice> {
        self.tx.subscribe()
    }
}

impl Default for AlertBus {
    fn default() -> Self {
        Self::new()
    }
}
