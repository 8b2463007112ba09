//! Live Subscriber Registry

use crate::AlertBus;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{broadcast::error::RecvError, mpsc, Mutex};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Per-subscriber outbound buffer; a subscriber that falls this far behind
/// starts losing messages (delivery is at-most-once).
const SUBSCRIBER_BUFFER: usize = 32;

/// Handle identifying one connected subscriber
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriberId(Uuid);

/// In-memory registry of live subscriber connections.
///
/// Transport-agnostic: each subscriber is an `mpsc` sender of outbound text
/// frames; the WebSocket layer drains the paired receiver.
pub struct BroadcastHub {
    connections: Mutex<HashMap<SubscriberId, mpsc::Sender<String>>>,
}

impl BroadcastHub {
    pub fn new() -> Self {
        Self {
            connections: Mutex::new(HashMap::new()),
        }
    }

    /// Create the outbound channel for a new subscriber and register it
    pub async fn connect(&self) -> (SubscriberId, mpsc::Receiver<String>) {
        let (tx, rx) = mpsc::channel(SUBSCRIBER_BUFFER);
        let id = SubscriberId(Uuid::new_v4());
        self.connections.lock().await.insert(id, tx);
        info!(subscriber = %id.0, "subscriber connected");
        (id, rx)
    }

    /// Unregister a subscriber. Idempotent: unknown ids are ignored.
    pub async fn disconnect(&self, id: SubscriberId) {
        if self.connections.lock().await.remove(&id).is_some() {
            info!(subscriber = %id.0, "subscriber disconnected");
        }
    }

    /// Number of currently registered subscribers
    pub async fn subscriber_count(&self) -> usize {
        self.connections.lock().await.len()
    }

    /// Deliver a text frame to every registered subscriber.
    ///
    /// A closed subscriber encountered mid-broadcast is pruned without
    /// aborting delivery to the rest; a full buffer drops this frame for
    /// that subscriber only.
    pub async fn broadcast(&self, text: &str) {
        let subscribers: Vec<(SubscriberId, mpsc::Sender<String>)> = self
            .connections
            .lock()
            .await
            .iter()
            .map(|(id, tx)| (*id, tx.clone()))
            .collect();

        let mut dead = Vec::new();
        for (id, tx) in subscribers {
            match tx.try_send(text.to_string()) {
                Ok(()) => {}
                Err(mpsc::error::TrySendError::Full(_)) => {
                    warn!(subscriber = %id.0, "subscriber buffer full, frame dropped");
                }
                Err(mpsc::error::TrySendError::Closed(_)) => dead.push(id),
            }
        }
        for id in dead {
            self.disconnect(id).await;
        }
    }

    /// Spawn the long-lived listener forwarding bus notices to subscribers
    /// as JSON frames. Runs until the bus is dropped.
    pub fn listen(self: &Arc<Self>, bus: &AlertBus) -> JoinHandle<()> {
        let hub = Arc::clone(self);
        let mut rx = bus.subscribe();
        tokio::spawn(async move {
            loop {
                match rx.recv().await {
                    Ok(notice) => match serde_json::to_string(&notice) {
                        Ok(json) => hub.broadcast(&json).await,
                        Err(e) => warn!(error = %e, "failed to encode notice"),
                    },
                    Err(RecvError::Lagged(n)) => {
                        warn!(lagged = n, "hub listener lagged, notices dropped");
                    }
                    Err(RecvError::Closed) => {
                        debug!("alert bus closed, hub listener exiting");
                        break;
                    }
                }
            }
        })
    }
}

impl Default for BroadcastHub {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AlertNotice, NoticeKind};
    use quake_model::{Alert, AlertStatus, Region, SeverityTier};

    fn sample_alert() -> Alert {
        Alert {
            id: "r1-Taipei".to_string(),
            source: "CWA".to_string(),
            origin_time: chrono::DateTime::parse_from_rfc3339("2024-01-01T12:00:00+08:00")
                .unwrap(),
            region: Region::Taipei,
            severity: SeverityTier::Tier2,
            status: AlertStatus::Open,
            damage: Default::default(),
            command_center: Default::default(),
            processed_time: None,
            processing_duration: 0,
        }
    }

    #[tokio::test]
    async fn test_broadcast_reaches_every_subscriber() {
        let hub = BroadcastHub::new();
        let (_id1, mut rx1) = hub.connect().await;
        let (_id2, mut rx2) = hub.connect().await;

        hub.broadcast("hello").await;

        assert_eq!(rx1.recv().await.unwrap(), "hello");
        assert_eq!(rx2.recv().await.unwrap(), "hello");
    }

    #[tokio::test]
    async fn test_dead_subscriber_does_not_abort_broadcast() {
        let hub = BroadcastHub::new();
        let (_id1, rx1) = hub.connect().await;
        let (_id2, mut rx2) = hub.connect().await;
        drop(rx1);

        hub.broadcast("still here").await;

        assert_eq!(rx2.recv().await.unwrap(), "still here");
        assert_eq!(hub.subscriber_count().await, 1);
    }

    #[tokio::test]
    async fn test_disconnect_is_idempotent() {
        let hub = BroadcastHub::new();
        let (id, _rx) = hub.connect().await;
        hub.disconnect(id).await;
        hub.disconnect(id).await;
        assert_eq!(hub.subscriber_count().await, 0);
    }

    #[tokio::test]
    async fn test_listener_forwards_bus_notices_as_json() {
        let hub = Arc::new(BroadcastHub::new());
        let bus = AlertBus::new();
        let _listener = hub.listen(&bus);
        let (_id, mut rx) = hub.connect().await;

        bus.publish(AlertNotice {
            kind: NoticeKind::Autoclosed,
            alert: sample_alert(),
        });

        let frame = rx.recv().await.unwrap();
        let json: serde_json::Value = serde_json::from_str(&frame).unwrap();
        assert_eq!(json["type"], "AUTOCLOSED");
        assert_eq!(json["alert"]["source"], "CWA");
    }
}
