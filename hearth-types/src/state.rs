//! Domain state primitives for the Hearth hub.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

/// On/off status of the room light.
///
/// Wire strings are exactly `"ON"` and `"OFF"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum LightState {
    /// The light is on.
    On,
    /// The light is off.
    #[default]
    Off,
}

impl LightState {
    /// Parse a wire string. Anything other than `"ON"` / `"OFF"` is `None`.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "ON" => Some(Self::On),
            "OFF" => Some(Self::Off),
            _ => None,
        }
    }

    /// Whether the light is on.
    pub fn is_on(self) -> bool {
        matches!(self, Self::On)
    }
}

impl fmt::Display for LightState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::On => "ON",
            Self::Off => "OFF",
        })
    }
}

/// Occupancy status of the room.
///
/// Wire strings are exactly `"OCCUPIED"` and `"EMPTY"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum Occupancy {
    /// Someone is in the room.
    Occupied,
    /// The room is empty.
    #[default]
    Empty,
}

impl Occupancy {
    /// Parse a wire string. Anything other than `"OCCUPIED"` / `"EMPTY"` is `None`.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "OCCUPIED" => Some(Self::Occupied),
            "EMPTY" => Some(Self::Empty),
            _ => None,
        }
    }

    /// Whether the room is empty.
    pub fn is_empty(self) -> bool {
        matches!(self, Self::Empty)
    }
}

impl fmt::Display for Occupancy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Occupied => "OCCUPIED",
            Self::Empty => "EMPTY",
        })
    }
}

/// A millisecond Unix timestamp.
///
/// The hub stamps these from the system clock; the pure state operations in
/// `hearth-core` take the current time as an argument instead of reading a
/// clock, so they stay instantly testable.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
pub struct Timestamp(u64);

impl Timestamp {
    /// Current wall-clock time.
    pub fn now() -> Self {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);
        Self(millis)
    }

    /// Create a Timestamp from raw milliseconds.
    pub fn from_millis(millis: u64) -> Self {
        Self(millis)
    }

    /// Raw milliseconds since the Unix epoch.
    pub fn as_millis(&self) -> u64 {
        self.0
    }

    /// Milliseconds elapsed since `earlier` (saturating at zero).
    pub fn millis_since(&self, earlier: Timestamp) -> u64 {
        self.0.saturating_sub(earlier.0)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Timestamp({})", self.0)
    }
}

/// Full state snapshot returned by `get_state`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateSnapshot {
    /// Current light status.
    pub light: LightState,
    /// Current occupancy status.
    pub occupancy: Occupancy,
    /// Time of the last accepted write.
    pub last_update: Timestamp,
    /// Manually registered alert count.
    pub alerts: u64,
    /// Number of live devices after stale eviction.
    pub connected_devices: usize,
}

/// Reduced state view returned by writes and the default query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateView {
    /// Current light status.
    pub light: LightState,
    /// Current occupancy status.
    pub occupancy: Occupancy,
    /// Time of the last accepted write.
    pub last_update: Timestamp,
}
