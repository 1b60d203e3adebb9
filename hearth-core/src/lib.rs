//! # hearth-core
//!
//! Pure state logic for the Hearth smart-home hub.
//!
//! This crate owns the [`SharedState`] record and its transitions: partial
//! light/occupancy updates, alert-condition detection, the manual alert
//! counter, and lazy eviction of stale device entries. There is no I/O and
//! no clock access — every operation takes the current time as an argument,
//! so the whole crate unit-tests instantly with synthetic timestamps. The
//! hub crate performs the locking, stamping, and HTTP plumbing around it.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod state;

pub use state::{SharedState, StateUpdate, UpdateOutcome, LIVENESS_WINDOW};
