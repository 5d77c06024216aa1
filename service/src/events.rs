//! Lifecycle events and the synchronous fan-out bus.
//!
//! Listeners are invoked inline on the emitting thread; keep handlers fast to
//! avoid stalling transitions. A panicking listener is caught and logged so
//! it cannot abort a transition that already committed.

use std::collections::HashMap;
use std::panic::{catch_unwind, AssertUnwindSafe};

use vusd_ledger::{Injection, LockReserve, MintRequest, PendingLock, Publication, TreasuryStatistics};

/// Events emitted by the orchestrator, one per lifecycle transition.
#[derive(Clone, Debug)]
pub enum TreasuryEvent {
    Injected {
        injection: Injection,
    },
    PendingLockCreated {
        lock: PendingLock,
    },
    /// A lock was accepted; carries everything the acceptance derived.
    Accepted {
        lock: PendingLock,
        reserve: LockReserve,
        mint_request: Option<MintRequest>,
    },
    LockRejected {
        lock: PendingLock,
    },
    LockReserveCreated {
        reserve: LockReserve,
    },
    MintRequestCreated {
        request: MintRequest,
    },
    MintRequestCancelled {
        request: MintRequest,
    },
    MintCompleted {
        request: MintRequest,
    },
    PublicationCreated {
        publication: Publication,
    },
    StatisticsUpdated {
        statistics: TreasuryStatistics,
    },
    DataRefreshed {
        statistics: TreasuryStatistics,
    },
}

impl TreasuryEvent {
    pub fn topic(&self) -> Topic {
        match self {
            Self::Injected { .. } => Topic::Injected,
            Self::PendingLockCreated { .. } => Topic::PendingLockCreated,
            Self::Accepted { .. } => Topic::Accepted,
            Self::LockRejected { .. } => Topic::LockRejected,
            Self::LockReserveCreated { .. } => Topic::LockReserveCreated,
            Self::MintRequestCreated { .. } => Topic::MintRequestCreated,
            Self::MintRequestCancelled { .. } => Topic::MintRequestCancelled,
            Self::MintCompleted { .. } => Topic::MintCompleted,
            Self::PublicationCreated { .. } => Topic::PublicationCreated,
            Self::StatisticsUpdated { .. } => Topic::StatisticsUpdated,
            Self::DataRefreshed { .. } => Topic::DataRefreshed,
        }
    }
}

/// Subscription channels. `All` receives every event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Topic {
    Injected,
    PendingLockCreated,
    Accepted,
    LockRejected,
    LockReserveCreated,
    MintRequestCreated,
    MintRequestCancelled,
    MintCompleted,
    PublicationCreated,
    StatisticsUpdated,
    DataRefreshed,
    All,
}

/// Handle returned by [`EventBus::on`], used to unsubscribe.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn Fn(&TreasuryEvent) + Send + Sync>;

/// Synchronous publish/subscribe dispatcher.
pub struct EventBus {
    listeners: HashMap<Topic, Vec<(SubscriptionId, Listener)>>,
    next_id: u64,
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            listeners: HashMap::new(),
            next_id: 0,
        }
    }

    /// Subscribe to a topic. Subscribe to [`Topic::All`] to receive every
    /// event.
    pub fn on(
        &mut self,
        topic: Topic,
        listener: impl Fn(&TreasuryEvent) + Send + Sync + 'static,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners
            .entry(topic)
            .or_default()
            .push((id, Box::new(listener)));
        id
    }

    /// Remove a subscription. Returns whether anything was removed.
    pub fn off(&mut self, topic: Topic, id: SubscriptionId) -> bool {
        match self.listeners.get_mut(&topic) {
            Some(subs) => {
                let before = subs.len();
                subs.retain(|(sub_id, _)| *sub_id != id);
                subs.len() != before
            }
            None => false,
        }
    }

    /// Dispatch an event to its topic's listeners, then to `All` listeners.
    pub fn emit(&self, event: &TreasuryEvent) {
        let topic = event.topic();
        for listen_topic in [topic, Topic::All] {
            let Some(subs) = self.listeners.get(&listen_topic) else {
                continue;
            };
            for (id, listener) in subs {
                if catch_unwind(AssertUnwindSafe(|| listener(event))).is_err() {
                    tracing::warn!(?topic, subscription = id.0, "event listener panicked");
                }
            }
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use vusd_ledger::{LedgerState, TreasuryStatistics};

    fn stats_event() -> TreasuryEvent {
        TreasuryEvent::StatisticsUpdated {
            statistics: TreasuryStatistics::compute(&LedgerState::default()),
        }
    }

    #[test]
    fn emit_reaches_topic_and_all_listeners() {
        let counter = Arc::new(AtomicUsize::new(0));
        let mut bus = EventBus::new();

        let c1 = Arc::clone(&counter);
        bus.on(Topic::StatisticsUpdated, move |_| {
            c1.fetch_add(1, Ordering::SeqCst);
        });
        let c2 = Arc::clone(&counter);
        bus.on(Topic::All, move |_| {
            c2.fetch_add(10, Ordering::SeqCst);
        });
        let c3 = Arc::clone(&counter);
        bus.on(Topic::MintCompleted, move |_| {
            c3.fetch_add(100, Ordering::SeqCst);
        });

        bus.emit(&stats_event());
        assert_eq!(counter.load(Ordering::SeqCst), 11);
    }

    #[test]
    fn off_removes_subscription() {
        let counter = Arc::new(AtomicUsize::new(0));
        let mut bus = EventBus::new();

        let c = Arc::clone(&counter);
        let id = bus.on(Topic::All, move |_| {
            c.fetch_add(1, Ordering::SeqCst);
        });
        bus.emit(&stats_event());
        assert!(bus.off(Topic::All, id));
        bus.emit(&stats_event());
        assert_eq!(counter.load(Ordering::SeqCst), 1);
        assert!(!bus.off(Topic::All, id));
    }

    #[test]
    fn panicking_listener_does_not_stop_others() {
        let counter = Arc::new(AtomicUsize::new(0));
        let mut bus = EventBus::new();

        bus.on(Topic::All, |_| panic!("faulty listener"));
        let c = Arc::clone(&counter);
        bus.on(Topic::All, move |_| {
            c.fetch_add(1, Ordering::SeqCst);
        });

        bus.emit(&stats_event());
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn emit_with_no_listeners_is_noop() {
        let bus = EventBus::new();
        bus.emit(&stats_event());
    }
}
