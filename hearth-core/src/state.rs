//! The shared device/room state record and its transitions.
//!
//! All operations are pure with respect to time: the caller supplies `now`.
//! The caller is also responsible for serializing access (the hub wraps the
//! record in a single `RwLock`).

use std::collections::HashMap;
use std::time::Duration;

use hearth_types::{LightState, Occupancy, StateSnapshot, StateView, Timestamp};

/// How long a device entry stays live without a refresh.
///
/// Entries strictly older than the window are evicted at the start of every
/// state operation; an entry exactly at the boundary survives.
pub const LIVENESS_WINDOW: Duration = Duration::from_secs(300);

/// A partial update to the light/occupancy pair.
///
/// `None` fields leave the existing value unchanged. Unparseable wire input
/// degrades to `None` rather than failing the whole request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StateUpdate {
    /// New light status, if requested.
    pub light: Option<LightState>,
    /// New occupancy, if requested.
    pub occupancy: Option<Occupancy>,
}

impl StateUpdate {
    /// Build an update from raw wire strings, dropping invalid values.
    pub fn parse(light: Option<&str>, occupancy: Option<&str>) -> Self {
        Self {
            light: light.and_then(LightState::parse),
            occupancy: occupancy.and_then(Occupancy::parse),
        }
    }

    /// Whether the update carries any change at all.
    pub fn is_empty(&self) -> bool {
        self.light.is_none() && self.occupancy.is_none()
    }
}

/// Result of applying a [`StateUpdate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateOutcome {
    /// The post-update state view.
    pub view: StateView,
    /// True when the post-update values are light ON with the room EMPTY.
    /// Informational: does not touch the alert counter.
    pub alert_triggered: bool,
}

/// The single shared state record for the whole hub.
///
/// Field transitions:
/// - `light` / `occupancy` move only through [`SharedState::apply`]
/// - `alerts` only ever increments (saturating)
/// - `connected_devices` entries are refreshed by [`SharedState::touch_device`]
///   and removed by [`SharedState::evict_stale`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharedState {
    light: LightState,
    occupancy: Occupancy,
    last_update: Timestamp,
    alerts: u64,
    connected_devices: HashMap<String, Timestamp>,
}

impl SharedState {
    /// Create the startup state: light OFF, room EMPTY, no devices, no alerts.
    pub fn new(now: Timestamp) -> Self {
        Self {
            light: LightState::default(),
            occupancy: Occupancy::default(),
            last_update: now,
            alerts: 0,
            connected_devices: HashMap::new(),
        }
    }

    /// Remove device entries strictly older than [`LIVENESS_WINDOW`].
    ///
    /// Returns the number of entries removed.
    pub fn evict_stale(&mut self, now: Timestamp) -> usize {
        let window_millis = LIVENESS_WINDOW.as_millis() as u64;
        let before = self.connected_devices.len();
        self.connected_devices
            .retain(|_, last_seen| now.millis_since(*last_seen) <= window_millis);
        before - self.connected_devices.len()
    }

    /// Record or refresh a device's last-seen time.
    pub fn touch_device(&mut self, device_id: impl Into<String>, now: Timestamp) {
        self.connected_devices.insert(device_id.into(), now);
    }

    /// Apply a partial update and detect the alert condition.
    ///
    /// `last_update` is stamped with `now` even when the update is empty or
    /// repeats the current values.
    pub fn apply(&mut self, update: StateUpdate, now: Timestamp) -> UpdateOutcome {
        if let Some(light) = update.light {
            self.light = light;
        }
        if let Some(occupancy) = update.occupancy {
            self.occupancy = occupancy;
        }
        self.last_update = now;

        UpdateOutcome {
            view: self.view(),
            alert_triggered: self.light.is_on() && self.occupancy.is_empty(),
        }
    }

    /// Increment the manual alert counter and return the new count.
    pub fn register_alert(&mut self) -> u64 {
        self.alerts = self.alerts.saturating_add(1);
        self.alerts
    }

    /// Full snapshot, including the current live-device count.
    pub fn snapshot(&self) -> StateSnapshot {
        StateSnapshot {
            light: self.light,
            occupancy: self.occupancy,
            last_update: self.last_update,
            alerts: self.alerts,
            connected_devices: self.connected_devices.len(),
        }
    }

    /// Reduced view: light, occupancy, and last update time.
    pub fn view(&self) -> StateView {
        StateView {
            light: self.light,
            occupancy: self.occupancy,
            last_update: self.last_update,
        }
    }

    /// Current light status.
    pub fn light(&self) -> LightState {
        self.light
    }

    /// Current occupancy.
    pub fn occupancy(&self) -> Occupancy {
        self.occupancy
    }

    /// Time of the last accepted write.
    pub fn last_update(&self) -> Timestamp {
        self.last_update
    }

    /// Current alert count.
    pub fn alerts(&self) -> u64 {
        self.alerts
    }

    /// Number of tracked devices (without evicting first).
    pub fn device_count(&self) -> usize {
        self.connected_devices.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WINDOW_MS: u64 = 300_000;

    fn ts(millis: u64) -> Timestamp {
        Timestamp::from_millis(millis)
    }

    #[test]
    fn startup_defaults() {
        let state = SharedState::new(ts(1_000));
        assert_eq!(state.light(), LightState::Off);
        assert_eq!(state.occupancy(), Occupancy::Empty);
        assert_eq!(state.alerts(), 0);
        assert_eq!(state.device_count(), 0);
        assert_eq!(state.last_update(), ts(1_000));
    }

    #[test]
    fn apply_overwrites_only_present_fields() {
        let mut state = SharedState::new(ts(0));

        let outcome = state.apply(
            StateUpdate {
                light: Some(LightState::On),
                occupancy: None,
            },
            ts(10),
        );

        assert_eq!(outcome.view.light, LightState::On);
        assert_eq!(outcome.view.occupancy, Occupancy::Empty);
        assert_eq!(outcome.view.last_update, ts(10));
    }

    #[test]
    fn parse_drops_invalid_values() {
        let update = StateUpdate::parse(Some("BLUE"), Some("EMPTY"));
        assert_eq!(update.light, None);
        assert_eq!(update.occupancy, Some(Occupancy::Empty));

        let update = StateUpdate::parse(None, None);
        assert!(update.is_empty());
    }

    #[test]
    fn empty_update_still_stamps_last_update() {
        let mut state = SharedState::new(ts(0));
        state.apply(StateUpdate::default(), ts(500));
        assert_eq!(state.last_update(), ts(500));
        assert_eq!(state.light(), LightState::Off);
    }

    #[test]
    fn last_update_tracks_most_recent_accepted_write() {
        let mut state = SharedState::new(ts(0));
        let mut previous = state.last_update();

        for now in [100, 250, 900, 901] {
            state.apply(StateUpdate::default(), ts(now));
            assert!(state.last_update() >= previous);
            assert_eq!(state.last_update(), ts(now));
            previous = state.last_update();
        }
    }

    #[test]
    fn alert_triggered_for_all_four_combinations() {
        let cases = [
            (LightState::On, Occupancy::Empty, true),
            (LightState::On, Occupancy::Occupied, false),
            (LightState::Off, Occupancy::Empty, false),
            (LightState::Off, Occupancy::Occupied, false),
        ];

        for (light, occupancy, expected) in cases {
            let mut state = SharedState::new(ts(0));
            let outcome = state.apply(
                StateUpdate {
                    light: Some(light),
                    occupancy: Some(occupancy),
                },
                ts(1),
            );
            assert_eq!(
                outcome.alert_triggered, expected,
                "light={light} occupancy={occupancy}"
            );
        }
    }

    #[test]
    fn alert_uses_post_update_values() {
        let mut state = SharedState::new(ts(0));
        state.apply(
            StateUpdate {
                light: Some(LightState::On),
                occupancy: Some(Occupancy::Occupied),
            },
            ts(1),
        );

        // Occupancy flips to EMPTY while the light stays ON from before.
        let outcome = state.apply(
            StateUpdate {
                light: None,
                occupancy: Some(Occupancy::Empty),
            },
            ts(2),
        );
        assert!(outcome.alert_triggered);
    }

    #[test]
    fn register_alert_counts_every_call() {
        let mut state = SharedState::new(ts(0));
        for expected in 1..=5 {
            assert_eq!(state.register_alert(), expected);
        }
        assert_eq!(state.alerts(), 5);
    }

    #[test]
    fn alert_counter_saturates_at_max() {
        let mut state = SharedState::new(ts(0));
        state.alerts = u64::MAX;
        assert_eq!(state.register_alert(), u64::MAX);
    }

    #[test]
    fn stale_devices_evicted_after_window() {
        let mut state = SharedState::new(ts(0));
        state.touch_device("sensor-a", ts(0));
        state.touch_device("sensor-b", ts(WINDOW_MS));

        let removed = state.evict_stale(ts(WINDOW_MS + 1));
        assert_eq!(removed, 1);
        assert_eq!(state.device_count(), 1);
        assert_eq!(state.snapshot().connected_devices, 1);
    }

    #[test]
    fn device_exactly_at_window_boundary_survives() {
        let mut state = SharedState::new(ts(0));
        state.touch_device("sensor-a", ts(0));

        assert_eq!(state.evict_stale(ts(WINDOW_MS)), 0);
        assert_eq!(state.device_count(), 1);

        assert_eq!(state.evict_stale(ts(WINDOW_MS + 1)), 1);
        assert_eq!(state.device_count(), 0);
    }

    #[test]
    fn reregistration_refreshes_liveness() {
        let mut state = SharedState::new(ts(0));
        state.touch_device("sensor-a", ts(0));

        // Refresh just before expiry, then advance past the original window.
        state.touch_device("sensor-a", ts(WINDOW_MS - 1));
        assert_eq!(state.evict_stale(ts(WINDOW_MS + 100)), 0);
        assert_eq!(state.device_count(), 1);
    }

    #[test]
    fn snapshot_reflects_counts_and_values() {
        let mut state = SharedState::new(ts(0));
        state.touch_device("a", ts(10));
        state.touch_device("b", ts(20));
        state.register_alert();
        state.apply(
            StateUpdate {
                light: Some(LightState::On),
                occupancy: None,
            },
            ts(30),
        );

        let snapshot = state.snapshot();
        assert_eq!(snapshot.light, LightState::On);
        assert_eq!(snapshot.occupancy, Occupancy::Empty);
        assert_eq!(snapshot.last_update, ts(30));
        assert_eq!(snapshot.alerts, 1);
        assert_eq!(snapshot.connected_devices, 2);
    }
}
