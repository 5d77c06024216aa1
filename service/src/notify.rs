//! Store-backed notification mailbox.
//!
//! Simulates delivery to the external source platform: append a record to a
//! dedicated store-backed list, no acknowledgement protocol. The consumer
//! polls unread entries and marks them read.

use serde_json::Value;
use vusd_crypto::new_record_id;
use vusd_ledger::{Notification, NotificationEvent};
use vusd_store::{get_json, keys, put_json, ObjectStore, StoreError};
use vusd_types::{RecordId, Timestamp};

/// Mailbox operations over the notifications collection.
pub struct Mailbox;

impl Mailbox {
    fn load(store: &dyn ObjectStore) -> Result<Vec<Notification>, StoreError> {
        Ok(get_json(store, keys::NOTIFICATIONS)?.unwrap_or_default())
    }

    /// Append a notification. Fire-and-forget from the caller's view; the
    /// write still goes through the durable store.
    pub fn push(
        store: &dyn ObjectStore,
        event: NotificationEvent,
        data: Value,
    ) -> Result<Notification, StoreError> {
        let mut all = Self::load(store)?;
        let notification = Notification {
            id: new_record_id(),
            event,
            data,
            timestamp: Timestamp::now(),
            read: false,
        };
        all.push(notification.clone());
        put_json(store, keys::NOTIFICATIONS, &all)?;
        Ok(notification)
    }

    /// All unread notifications, oldest first.
    pub fn pending(store: &dyn ObjectStore) -> Result<Vec<Notification>, StoreError> {
        Ok(Self::load(store)?.into_iter().filter(|n| !n.read).collect())
    }

    /// Flip a notification's `read` flag. Returns whether the id was found.
    pub fn mark_read(store: &dyn ObjectStore, id: &RecordId) -> Result<bool, StoreError> {
        let mut all = Self::load(store)?;
        let Some(entry) = all.iter_mut().find(|n| &n.id == id) else {
            return Ok(false);
        };
        entry.read = true;
        put_json(store, keys::NOTIFICATIONS, &all)?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use vusd_store::MemoryStore;

    #[test]
    fn push_then_pending() {
        let store = MemoryStore::new();
        Mailbox::push(
            &store,
            NotificationEvent::LockAccepted,
            json!({"lock_id": "LOCK-1"}),
        )
        .unwrap();
        let pending = Mailbox::pending(&store).unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].event, NotificationEvent::LockAccepted);
        assert_eq!(pending[0].data["lock_id"], "LOCK-1");
    }

    #[test]
    fn mark_read_hides_from_pending() {
        let store = MemoryStore::new();
        let n = Mailbox::push(&store, NotificationEvent::VusdMinted, json!({})).unwrap();
        assert!(Mailbox::mark_read(&store, &n.id).unwrap());
        assert!(Mailbox::pending(&store).unwrap().is_empty());
    }

    #[test]
    fn mark_read_unknown_id_is_false() {
        let store = MemoryStore::new();
        assert!(!Mailbox::mark_read(&store, &RecordId::new("nope")).unwrap());
    }

    #[test]
    fn notifications_survive_in_store_order() {
        let store = MemoryStore::new();
        Mailbox::push(&store, NotificationEvent::LockAccepted, json!({"n": 1})).unwrap();
        Mailbox::push(&store, NotificationEvent::VusdMinted, json!({"n": 2})).unwrap();
        let pending = Mailbox::pending(&store).unwrap();
        assert_eq!(pending[0].data["n"], 1);
        assert_eq!(pending[1].data["n"], 2);
    }
}
