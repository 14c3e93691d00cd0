//! Single-slot cache of the most recent telemetry snapshot

use std::sync::Arc;

use shared::TelemetrySnapshot;
use tokio::sync::RwLock;

/// Holds at most one snapshot. Writers replace the slot wholesale, so readers
/// only ever observe a complete snapshot.
#[derive(Clone, Default)]
pub struct SnapshotCache {
    slot: Arc<RwLock<Option<Arc<TelemetrySnapshot>>>>,
}

impl SnapshotCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last completed snapshot, without fetching
    pub async fn current(&self) -> Option<Arc<TelemetrySnapshot>> {
        self.slot.read().await.clone()
    }

    /// Replace the slot. Last writer wins.
    pub async fn replace(&self, snapshot: Arc<TelemetrySnapshot>) {
        let mut slot = self.slot.write().await;
        tracing::debug!(
            score = snapshot.risk.score,
            level = %snapshot.risk.level,
            "snapshot cache replaced"
        );
        *slot = Some(snapshot);
    }
}
