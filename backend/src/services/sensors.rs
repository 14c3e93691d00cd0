//! In-memory store for on-site instrument readings

use std::sync::Arc;

use chrono::Utc;
use shared::{LocalSensors, SensorPayload};
use tokio::sync::RwLock;

/// Latest local sensor values, merged from partial payloads
#[derive(Clone)]
pub struct LocalSensorStore {
    latest: Arc<RwLock<LocalSensors>>,
}

impl Default for LocalSensorStore {
    fn default() -> Self {
        Self::new()
    }
}

impl LocalSensorStore {
    pub fn new() -> Self {
        Self {
            latest: Arc::new(RwLock::new(LocalSensors::baseline(Utc::now()))),
        }
    }

    /// Merge a payload and return the resulting state
    pub async fn update(&self, payload: &SensorPayload) -> LocalSensors {
        let mut latest = self.latest.write().await;
        latest.merge(payload, Utc::now());
        tracing::debug!(status = %latest.status, "local sensors updated");
        latest.clone()
    }

    pub async fn snapshot(&self) -> LocalSensors {
        self.latest.read().await.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_starts_from_baseline() {
        let store = LocalSensorStore::new();
        let sensors = store.snapshot().await;
        assert_eq!(sensors.tiltmeter, 15.0);
        assert_eq!(sensors.status, "online");
    }

    #[tokio::test]
    async fn test_update_is_visible_to_clones() {
        let store = LocalSensorStore::new();
        let reader = store.clone();
        let payload = SensorPayload {
            piezometer: Some(30.5),
            ..Default::default()
        };

        let updated = store.update(&payload).await;
        assert_eq!(updated.piezometer, 30.5);
        assert_eq!(reader.snapshot().await.piezometer, 30.5);
        assert_eq!(reader.snapshot().await.vibration, 8.0);
    }
}
