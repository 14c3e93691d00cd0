//! Telemetry aggregation service
//!
//! Fans out to the three source clients concurrently, waits for every branch
//! to settle, scores the result and publishes it to the snapshot cache.

use std::sync::Arc;

use chrono::Utc;
use rand::{rngs::StdRng, SeedableRng};
use shared::{validate_coordinate, Coordinate, TelemetrySnapshot};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::external::{SeismicClient, SoilClient, WeatherClient};
use crate::services::snapshot_cache::SnapshotCache;

/// Aggregates upstream readings into snapshots
#[derive(Clone)]
pub struct TelemetryService {
    weather: WeatherClient,
    soil: SoilClient,
    seismic: SeismicClient,
    cache: SnapshotCache,
    rng: Arc<Mutex<StdRng>>,
    default_coordinate: Coordinate,
}

impl TelemetryService {
    /// Create a new TelemetryService from configuration
    pub fn new(config: &Config) -> Self {
        Self::from_clients(
            WeatherClient::new(&config.weather),
            SoilClient::new(&config.soil),
            SeismicClient::new(&config.seismic),
            config.telemetry.default_coordinate(),
        )
    }

    /// Create a service around explicit clients
    pub fn from_clients(
        weather: WeatherClient,
        soil: SoilClient,
        seismic: SeismicClient,
        default_coordinate: Coordinate,
    ) -> Self {
        Self {
            weather,
            soil,
            seismic,
            cache: SnapshotCache::new(),
            rng: Arc::new(Mutex::new(StdRng::from_entropy())),
            default_coordinate,
        }
    }

    /// Seed the timeline generator so projections are reproducible
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = Arc::new(Mutex::new(StdRng::seed_from_u64(seed)));
        self
    }

    pub fn default_coordinate(&self) -> Coordinate {
        self.default_coordinate
    }

    /// Last completed snapshot, without fetching
    pub async fn current(&self) -> Option<Arc<TelemetrySnapshot>> {
        self.cache.current().await
    }

    /// Fetch all sources, build a snapshot and publish it to the cache.
    ///
    /// Source failures degrade the snapshot; they are never returned here.
    pub async fn refresh(&self, coordinate: Coordinate) -> AppResult<Arc<TelemetrySnapshot>> {
        validate_coordinate(&coordinate)?;

        let weather = self.weather.clone();
        let soil = self.soil.clone();
        let seismic = self.seismic.clone();

        let (atmospheric, soil, seismic) = tokio::join!(
            settle_branch("atmospheric", tokio::spawn(async move { weather.fetch(coordinate).await })),
            settle_branch("soil", tokio::spawn(async move { soil.fetch(coordinate).await })),
            settle_branch("seismic", tokio::spawn(async move { seismic.fetch(coordinate).await })),
        );

        let snapshot = {
            let mut rng = self.rng.lock().await;
            TelemetrySnapshot::assemble(coordinate, atmospheric, soil, seismic, Utc::now(), &mut *rng)
        };
        check_invariants(&snapshot)?;

        tracing::info!(
            %coordinate,
            score = snapshot.risk.score,
            level = %snapshot.risk.level,
            sources = snapshot.coverage.available,
            "telemetry refreshed"
        );

        let snapshot = Arc::new(snapshot);
        self.cache.replace(snapshot.clone()).await;
        Ok(snapshot)
    }

    /// Refresh the default coordinate
    pub async fn refresh_default(&self) -> AppResult<Arc<TelemetrySnapshot>> {
        self.refresh(self.default_coordinate).await
    }
}

/// A branch that panicked or was cancelled counts as an unavailable source
async fn settle_branch<T>(name: &'static str, handle: JoinHandle<Option<T>>) -> Option<T> {
    match handle.await {
        Ok(reading) => reading,
        Err(e) => {
            tracing::warn!(source = name, error = %e, "source task failed");
            None
        }
    }
}

fn check_invariants(snapshot: &TelemetrySnapshot) -> AppResult<()> {
    let score = snapshot.risk.score;
    if !score.is_finite() || !(0.0..=100.0).contains(&score) {
        return Err(AppError::Aggregation(format!("score {} outside [0, 100]", score)));
    }
    if let Some(point) = snapshot
        .timeline
        .iter()
        .find(|p| !(0.0..=100.0).contains(&p.value))
    {
        return Err(AppError::Aggregation(format!(
            "timeline value {} at {} outside [0, 100]",
            point.value, point.offset_label
        )));
    }
    Ok(())
}
