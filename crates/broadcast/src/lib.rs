//! Broadcast Layer
//!
//! Carries lifecycle notifications from the alert engine to live
//! subscribers. The [`AlertBus`] is an explicit named pub/sub channel of
//! typed envelopes; the [`BroadcastHub`] is the registry of connected
//! subscribers fed by the long-lived bus listener. Keeping the bus boundary
//! explicit lets the engine and the hub run in separate processes with a
//! brokered transport swapped in behind the same seam.

mod bus;
mod hub;

pub use bus::{AlertBus, AlertNotice, NoticeKind, ALERTS_CHANNEL};
pub use hub::{BroadcastHub, SubscriberId};
