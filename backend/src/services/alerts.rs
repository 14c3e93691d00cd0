//! Live alert broadcaster
//!
//! Keeps a registry of push subscriptions and, on a fixed period, sends one
//! generated alert to every open subscription. A subscription whose delivery
//! fails (closed or backed up) is removed on that same send; nothing is
//! queued or retried.

use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
    time::Duration,
};

use chrono::Utc;
use rand::{rngs::StdRng, SeedableRng};
use shared::{random_alert, risk_level_alert, AlertEvent, TelemetrySnapshot};
use tokio::{
    sync::{mpsc, Mutex},
    task::JoinHandle,
    time::{self, Instant, MissedTickBehavior},
};
use tokio_stream::wrappers::ReceiverStream;

/// Identifier of one push subscription
pub type SubscriptionId = u64;

/// Outcome of one broadcast
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BroadcastReport {
    pub delivered: usize,
    pub dropped: usize,
}

/// Receiving half of a subscription. Dropping it closes the channel, and the
/// broadcaster removes it on its next send.
#[derive(Debug)]
pub struct Subscription {
    id: SubscriptionId,
    receiver: mpsc::Receiver<AlertEvent>,
}

impl Subscription {
    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    /// Wait for the next alert. `None` once unsubscribed.
    pub async fn recv(&mut self) -> Option<AlertEvent> {
        self.receiver.recv().await
    }

    /// Non-blocking receive
    pub fn try_recv(&mut self) -> Option<AlertEvent> {
        self.receiver.try_recv().ok()
    }

    pub fn into_stream(self) -> ReceiverStream<AlertEvent> {
        ReceiverStream::new(self.receiver)
    }
}

struct Registry {
    subscribers: Mutex<HashMap<SubscriptionId, mpsc::Sender<AlertEvent>>>,
    next_id: AtomicU64,
    capacity: usize,
    rng: Mutex<StdRng>,
}

/// Broadcasts generated alerts to connected subscribers
#[derive(Clone)]
pub struct AlertBroadcaster {
    registry: Arc<Registry>,
}

impl AlertBroadcaster {
    /// Create a broadcaster with a per-subscriber queue of `capacity` events
    pub fn new(capacity: usize) -> Self {
        Self::with_rng(capacity, StdRng::from_entropy())
    }

    /// Create a broadcaster whose alert generator is seeded
    pub fn with_seed(capacity: usize, seed: u64) -> Self {
        Self::with_rng(capacity, StdRng::seed_from_u64(seed))
    }

    fn with_rng(capacity: usize, rng: StdRng) -> Self {
        Self {
            registry: Arc::new(Registry {
                subscribers: Mutex::new(HashMap::new()),
                next_id: AtomicU64::new(1),
                capacity: capacity.max(1),
                rng: Mutex::new(rng),
            }),
        }
    }

    /// Register a new subscriber
    pub async fn subscribe(&self) -> Subscription {
        let id = self.registry.next_id.fetch_add(1, Ordering::Relaxed);
        let (sender, receiver) = mpsc::channel(self.registry.capacity);
        self.registry.subscribers.lock().await.insert(id, sender);
        tracing::debug!(subscription = id, "alert subscriber connected");
        Subscription { id, receiver }
    }

    /// Remove a subscriber. Returns false if it was already gone.
    pub async fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let removed = self.registry.subscribers.lock().await.remove(&id).is_some();
        if removed {
            tracing::debug!(subscription = id, "alert subscriber disconnected");
        }
        removed
    }

    pub async fn subscriber_count(&self) -> usize {
        self.registry.subscribers.lock().await.len()
    }

    /// Send `event` to every open subscription, dropping those that fail
    pub async fn broadcast(&self, event: &AlertEvent) -> BroadcastReport {
        let mut subscribers = self.registry.subscribers.lock().await;
        let mut report = BroadcastReport::default();

        subscribers.retain(|id, sender| match sender.try_send(event.clone()) {
            Ok(()) => {
                report.delivered += 1;
                true
            }
            Err(e) => {
                let reason = match e {
                    mpsc::error::TrySendError::Full(_) => "full",
                    mpsc::error::TrySendError::Closed(_) => "closed",
                };
                tracing::debug!(subscription = *id, reason, "dropping alert subscriber");
                report.dropped += 1;
                false
            }
        });

        report
    }

    /// Generate one alert and broadcast it
    pub async fn tick(&self) -> (AlertEvent, BroadcastReport) {
        let event = {
            let mut rng = self.registry.rng.lock().await;
            random_alert(&mut *rng, Utc::now())
        };
        let report = self.broadcast(&event).await;
        tracing::debug!(
            alert = %event.id,
            severity = ?event.severity,
            delivered = report.delivered,
            dropped = report.dropped,
            "alert tick"
        );
        (event, report)
    }

    /// Emit on every `period`, starting one period from now
    pub fn spawn(&self, period: Duration) -> JoinHandle<()> {
        let broadcaster = self.clone();
        tokio::spawn(async move {
            let mut interval = time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                broadcaster.tick().await;
            }
        })
    }
}

/// Alerts derived at read time from the cached snapshot's risk level
pub fn derive_risk_alerts(snapshot: Option<&TelemetrySnapshot>) -> Vec<AlertEvent> {
    snapshot
        .and_then(|s| risk_level_alert(s.risk.level, s.risk.score, s.timestamp))
        .into_iter()
        .collect()
}
