//! # hearth-types
//!
//! Wire-format and domain types for the Hearth smart-home hub.
//!
//! This crate provides the foundational types used across the Hearth crates:
//! - [`LightState`], [`Occupancy`], [`Timestamp`] - Domain state primitives
//! - [`StateSnapshot`], [`StateView`] - Read models returned by the hub
//! - [`StateRequest`], [`NotifyRequest`] and their responses - HTTP bodies

#![warn(missing_docs)]
#![warn(clippy::all)]

mod messages;
mod state;

pub use messages::{
    DefaultStateResponse, ErrorResponse, GetStateResponse, NotifyRequest, NotifyResponse,
    RegisterAlertResponse, StateRequest, UpdateStateResponse,
};
pub use state::{LightState, Occupancy, StateSnapshot, StateView, Timestamp};
