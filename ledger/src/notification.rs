//! One-way mailbox entries informing the external source platform of
//! lifecycle events. Fire-and-forget: no delivery confirmation, no retry.

use serde::{Deserialize, Serialize};
use vusd_types::{RecordId, Timestamp};

/// Events the source platform is notified about.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationEvent {
    LockAccepted,
    LockRejected,
    VusdMinted,
}

/// A mailbox entry. Mutated only to flip `read`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Notification {
    pub id: RecordId,
    pub event: NotificationEvent,
    /// Correlation ids, amounts, signatures, timestamps — event-specific.
    pub data: serde_json::Value,
    pub timestamp: Timestamp,
    pub read: bool,
}
