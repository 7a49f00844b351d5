// ── Monitor ──
//
// Poll-cycle driver for one router. Fetches the configured pages, decodes
// and merges them, and publishes the result as the current snapshot.
// Derived metrics are computed on demand from a snapshot; the only state
// carried between cycles is the traffic rate state.

use std::sync::Arc;

use arc_swap::ArcSwapOption;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use tracing::{debug, info};

use wrtwatch_api::{Credentials, RouterClient};

use crate::aggregate::{PageFailure, merge};
use crate::config::RouterConfig;
use crate::decode::decode;
use crate::devices;
use crate::error::CoreError;
use crate::metrics::{DerivedMetrics, TrafficRates};
use crate::model::{DeviceRecord, Snapshot};
use crate::status::StatusFlags;

/// Entry point for consumers.
///
/// Cheaply cloneable via `Arc<MonitorInner>`. Clones share the published
/// snapshot and the rate state.
#[derive(Clone)]
pub struct Monitor {
    inner: Arc<MonitorInner>,
}

struct MonitorInner {
    config: RouterConfig,
    client: RouterClient,
    latest: ArcSwapOption<Snapshot>,
    last_updated: ArcSwapOption<DateTime<Utc>>,
    rates: Mutex<TrafficRates>,
}

impl Monitor {
    /// Build a monitor and its HTTP client. Does no I/O.
    pub fn new(config: RouterConfig) -> Result<Self, CoreError> {
        let credentials = config.credentials.as_ref().map(Credentials::from);
        let client = RouterClient::new(config.url.clone(), credentials, &config.transport())?;
        Ok(Self::with_client(config, client))
    }

    /// Build a monitor around an existing client.
    pub fn with_client(config: RouterConfig, client: RouterClient) -> Self {
        Self {
            inner: Arc::new(MonitorInner {
                config,
                client,
                latest: ArcSwapOption::empty(),
                last_updated: ArcSwapOption::empty(),
                rates: Mutex::new(TrafficRates::default()),
            }),
        }
    }

    pub fn config(&self) -> &RouterConfig {
        &self.inner.config
    }

    pub fn client(&self) -> &RouterClient {
        &self.inner.client
    }

    // ── Poll cycle ───────────────────────────────────────────────

    /// Run one poll cycle and publish the merged snapshot.
    ///
    /// Individual page failures are logged and skipped. When no page
    /// yields data the previous snapshot stays published and the cycle
    /// fails, as `AuthenticationFailed` if any page was refused for
    /// credentials and `NoData` otherwise.
    pub async fn refresh(&self) -> Result<Arc<Snapshot>, CoreError> {
        let pages = &self.inner.config.pages;
        debug!(pages = pages.len(), url = %self.inner.config.url, "starting poll cycle");

        let fetched = self.inner.client.fetch_pages(pages).await;
        let auth_refused = fetched
            .iter()
            .any(|f| f.outcome.as_ref().is_err_and(wrtwatch_api::Error::is_auth));

        let results = fetched.into_iter().map(|f| match f.outcome {
            Ok(body) => Ok(decode(&body)),
            Err(e) => Err(PageFailure {
                page: f.page,
                reason: e.to_string(),
            }),
        });

        let snapshot = match merge(results) {
            Ok(snapshot) => Arc::new(snapshot),
            Err(CoreError::NoData { .. }) if auth_refused => {
                return Err(CoreError::AuthenticationFailed {
                    message: "router rejected the configured credentials".into(),
                });
            }
            Err(e) => return Err(e),
        };

        self.inner.latest.store(Some(Arc::clone(&snapshot)));
        self.inner.last_updated.store(Some(Arc::new(Utc::now())));
        info!(fields = snapshot.len(), "snapshot published");
        Ok(snapshot)
    }

    /// The last published snapshot, if any cycle has succeeded.
    pub fn snapshot(&self) -> Option<Arc<Snapshot>> {
        self.inner.latest.load_full()
    }

    /// When the current snapshot was published.
    pub fn last_updated(&self) -> Option<DateTime<Utc>> {
        self.inner.last_updated.load_full().map(|t| *t)
    }

    // ── Derived views ────────────────────────────────────────────

    /// Derived metrics for `snapshot`, advancing the traffic rate state.
    ///
    /// Call once per published snapshot; a second call with the same
    /// counters reports a zero rate.
    pub async fn metrics(&self, snapshot: &Snapshot, now: DateTime<Utc>) -> DerivedMetrics {
        let mut rates = self.inner.rates.lock().await;
        DerivedMetrics::compute(snapshot, &mut rates, now)
    }

    /// Forget previous traffic samples.
    pub async fn reset_rates(&self) {
        *self.inner.rates.lock().await = TrafficRates::default();
    }

    /// Devices in `snapshot`, filtered by the configured allow-list.
    pub fn devices(&self, snapshot: &Snapshot) -> Vec<DeviceRecord> {
        devices::devices_in(snapshot, &self.inner.config.tracker_interfaces)
    }

    pub fn status(&self, snapshot: &Snapshot) -> StatusFlags {
        StatusFlags::from_snapshot(snapshot)
    }

    // ── Router operations ────────────────────────────────────────

    /// Check that the configured credentials unlock DD-WRT live data.
    pub async fn verify(&self) -> Result<(), CoreError> {
        Ok(self.inner.client.verify_credentials().await?)
    }

    pub async fn discover_interfaces(&self) -> Vec<String> {
        self.inner.client.discover_interfaces().await
    }

    pub async fn reboot(&self) -> Result<(), CoreError> {
        self.inner.client.reboot().await?;
        info!(url = %self.inner.config.url, "reboot requested");
        Ok(())
    }
}
