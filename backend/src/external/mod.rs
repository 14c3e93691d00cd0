//! External API integrations
//!
//! One client per upstream provider. Each exposes `fetch`, which never fails:
//! transport errors, non-2xx statuses, malformed bodies, a missing credential
//! and timeout expiry all collapse to `None` after a warning is logged.

pub mod open_meteo;
pub mod usgs;
pub mod weather;

use std::{future::Future, time::Duration};

use reqwest::Client;
use serde::{de::DeserializeOwned, Serialize};
use shared::SourceKind;

use crate::error::{AppError, AppResult};

pub use open_meteo::SoilClient;
pub use usgs::SeismicClient;
pub use weather::WeatherClient;

/// HTTP client whose per-request timeout matches the source timeout
pub(crate) fn http_client(timeout: Duration) -> Client {
    Client::builder()
        .timeout(timeout)
        .build()
        .unwrap_or_else(|_| Client::new())
}

/// GET `url` with `query` and decode a JSON body, mapping every failure to
/// `SourceUnavailable` for `kind`.
pub(crate) async fn get_json<T, Q>(
    client: &Client,
    kind: SourceKind,
    url: &str,
    query: &Q,
) -> AppResult<T>
where
    T: DeserializeOwned,
    Q: Serialize + ?Sized,
{
    let response = client
        .get(url)
        .query(query)
        .send()
        .await
        .map_err(|e| AppError::unavailable(kind, format!("request failed: {}", e)))?;

    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(AppError::unavailable(
            kind,
            format!("upstream error: {} - {}", status, body),
        ));
    }

    response
        .json::<T>()
        .await
        .map_err(|e| AppError::unavailable(kind, format!("failed to parse response: {}", e)))
}

/// Bound `request` by `timeout` and collapse any failure to `None`.
pub(crate) async fn settle<T, F>(kind: SourceKind, timeout: Duration, request: F) -> Option<T>
where
    F: Future<Output = AppResult<T>>,
{
    match tokio::time::timeout(timeout, request).await {
        Ok(Ok(reading)) => Some(reading),
        Ok(Err(AppError::SourceDisabled(_))) => {
            tracing::debug!(source = %kind, "source disabled, skipping fetch");
            None
        }
        Ok(Err(e)) => {
            tracing::warn!(source = %kind, error = %e, "source unavailable");
            None
        }
        Err(_) => {
            tracing::warn!(source = %kind, timeout_ms = timeout.as_millis() as u64, "source timed out");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_settle_passes_through_success() {
        let result = settle(SourceKind::Soil, Duration::from_secs(1), async { Ok(5) }).await;
        assert_eq!(result, Some(5));
    }

    #[tokio::test]
    async fn test_settle_collapses_errors() {
        let result: Option<u32> = settle(SourceKind::Seismic, Duration::from_secs(1), async {
            Err(AppError::unavailable(SourceKind::Seismic, "boom"))
        })
        .await;
        assert_eq!(result, None);

        let result: Option<u32> = settle(SourceKind::Atmospheric, Duration::from_secs(1), async {
            Err(AppError::SourceDisabled(SourceKind::Atmospheric))
        })
        .await;
        assert_eq!(result, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_settle_times_out() {
        let result: Option<u32> = settle(SourceKind::Soil, Duration::from_secs(10), async {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(1)
        })
        .await;
        assert_eq!(result, None);
    }
}
