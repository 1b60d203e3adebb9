//! Central hub coordination: owned state, metrics, and the notifier.
//!
//! The [`Hub`] is the single owner of the [`SharedState`] record. Every
//! mutation goes through its `RwLock`, which is the one serialization point
//! the state invariants rely on. Handlers receive the hub as an `Arc`.

use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::RwLock;

use hearth_core::{SharedState, StateUpdate, UpdateOutcome};
use hearth_types::{StateSnapshot, StateView, Timestamp};

use crate::config::Config;
use crate::error::{HubError, Result};
use crate::notifier::{Notifier, RelayOutcome};

/// Operational metrics for monitoring hub activity.
///
/// Counters only ever increase (reset on restart) and are `AtomicU64`, so
/// incrementing never takes the state lock.
#[derive(Debug, Default)]
pub struct HubMetrics {
    /// Total `get_state` reads served.
    pub reads_total: AtomicU64,
    /// Total accepted `update_state` writes.
    pub updates_total: AtomicU64,
    /// Total manual alert registrations.
    pub alerts_registered_total: AtomicU64,
    /// Total default (no-op) queries served.
    pub default_queries_total: AtomicU64,
    /// Total requests rejected for a bad or missing admin key.
    pub unauthorized_total: AtomicU64,
    /// Total notifier messages delivered to the messaging API.
    pub notify_sent_total: AtomicU64,
    /// Total notifier acknowledgments that were simulated.
    pub notify_simulated_total: AtomicU64,
}

/// Main hub: owned shared state plus the outbound notifier.
pub struct Hub {
    config: Config,
    state: RwLock<SharedState>,
    metrics: HubMetrics,
    notifier: Notifier,
}

impl std::fmt::Debug for Hub {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Hub")
            .field("metrics", &self.metrics)
            .field("notifier", &self.notifier)
            .finish_non_exhaustive()
    }
}

impl Hub {
    /// Create a hub with startup-default state.
    pub fn new(config: Config) -> Result<Self> {
        let notifier = Notifier::new(&config.notifier)?;
        Ok(Self {
            state: RwLock::new(SharedState::new(Timestamp::now())),
            metrics: HubMetrics::default(),
            notifier,
            config,
        })
    }

    /// The operational metrics.
    pub fn metrics(&self) -> &HubMetrics {
        &self.metrics
    }

    /// Check the supplied key against the configured admin key.
    fn authorize(&self, key: Option<&str>) -> Result<()> {
        if key == Some(self.config.auth.admin_key.as_str()) {
            Ok(())
        } else {
            self.metrics.unauthorized_total.fetch_add(1, Ordering::Relaxed);
            tracing::warn!("Rejected request with bad admin key");
            Err(HubError::Unauthorized)
        }
    }

    /// Serve a `get_state` read.
    ///
    /// Evicts stale devices, refreshes the calling device's liveness entry
    /// when `device_id` is given, and returns the full snapshot. Always
    /// succeeds.
    pub async fn get_state(&self, device_id: Option<&str>) -> StateSnapshot {
        let now = Timestamp::now();
        let mut state = self.state.write().await;

        let evicted = state.evict_stale(now);
        if evicted > 0 {
            tracing::debug!("Evicted {} stale device entries", evicted);
        }
        if let Some(device_id) = device_id {
            state.touch_device(device_id, now);
            tracing::debug!("Device {} checked in", device_id);
        }

        self.metrics.reads_total.fetch_add(1, Ordering::Relaxed);
        state.snapshot()
    }

    /// Apply an authorized partial write.
    ///
    /// Unparseable `light`/`occupancy` values are dropped rather than
    /// failing the request; `last_update` is stamped either way. No state
    /// is touched when the key is wrong.
    pub async fn update_state(
        &self,
        key: Option<&str>,
        light: Option<&str>,
        occupancy: Option<&str>,
    ) -> Result<UpdateOutcome> {
        self.authorize(key)?;

        let update = StateUpdate::parse(light, occupancy);
        let now = Timestamp::now();
        let mut state = self.state.write().await;
        state.evict_stale(now);
        let outcome = state.apply(update, now);

        self.metrics.updates_total.fetch_add(1, Ordering::Relaxed);
        tracing::info!(
            "State updated: light={}, occupancy={}",
            outcome.view.light,
            outcome.view.occupancy
        );
        if outcome.alert_triggered {
            tracing::warn!("Alert condition: light ON with room EMPTY");
        }

        Ok(outcome)
    }

    /// Increment the manual alert counter.
    ///
    /// Gated behind the admin key, same as writes.
    pub async fn register_alert(&self, key: Option<&str>) -> Result<u64> {
        self.authorize(key)?;

        let now = Timestamp::now();
        let mut state = self.state.write().await;
        state.evict_stale(now);
        let alerts = state.register_alert();

        self.metrics
            .alerts_registered_total
            .fetch_add(1, Ordering::Relaxed);
        tracing::info!("Alert registered (total: {})", alerts);

        Ok(alerts)
    }

    /// Serve the default (no-op) query: the current view, no side effects
    /// beyond lazy eviction.
    pub async fn current_view(&self) -> StateView {
        let now = Timestamp::now();
        let mut state = self.state.write().await;
        state.evict_stale(now);

        self.metrics
            .default_queries_total
            .fetch_add(1, Ordering::Relaxed);
        state.view()
    }

    /// Live-device count after eviction (health/metrics gauge).
    pub async fn device_count(&self) -> usize {
        let now = Timestamp::now();
        let mut state = self.state.write().await;
        state.evict_stale(now);
        state.device_count()
    }

    /// Current alert count (health/metrics gauge).
    pub async fn alert_count(&self) -> u64 {
        self.state.read().await.alerts()
    }

    /// Validate and relay an operator message.
    ///
    /// The only hard failures are a bad key and an empty message; the relay
    /// itself is best-effort and reports its mode in the outcome.
    pub async fn send_alert(
        &self,
        key: Option<&str>,
        message: Option<&str>,
    ) -> Result<RelayOutcome> {
        self.authorize(key)?;

        let message = message
            .filter(|m| !m.is_empty())
            .ok_or(HubError::InvalidArgument { field: "message" })?;

        let outcome = self.notifier.send(message).await;
        if outcome.is_sent() {
            self.metrics.notify_sent_total.fetch_add(1, Ordering::Relaxed);
        } else {
            self.metrics
                .notify_simulated_total
                .fetch_add(1, Ordering::Relaxed);
        }

        Ok(outcome)
    }
}
