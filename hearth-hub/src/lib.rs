//! # hearth-hub
//!
//! Smart-home state hub and alert notifier.
//!
//! This crate implements a small HTTP service that:
//! - Owns the shared device/room state record (light, occupancy, alert
//!   counter, device liveness map) behind a single lock
//! - Answers JSON read/write requests and detects the alert condition
//!   (light ON while the room is EMPTY) on writes
//! - Relays operator messages to a Telegram bot, degrading to a simulated
//!   acknowledgment when credentials are absent or the call fails
//!
//! ## Architecture
//!
//! ```text
//! Dashboard ──┐                      ┌── ESP32 sensors
//!             │     JSON over HTTP   │
//!             ├─────────────────────►│
//!             │                      │
//!         ┌───┴──────────────────────┴───┐
//!         │          hearth-hub          │
//!         │  ┌────────────────────────┐  │
//!         │  │ SharedState (RwLock)   │  │
//!         │  └────────────────────────┘  │
//!         │  ┌────────────────────────┐  │      ┌──────────────┐
//!         │  │ Notifier (best effort) │──┼─────►│ Telegram API │
//!         │  └────────────────────────┘  │      └──────────────┘
//!         └──────────────────────────────┘
//! ```
//!
//! ## Endpoints
//!
//! - `POST /api/state` — get_state / update_state / register_alert, with a
//!   no-op default query for anything else
//! - `POST /api/notify` — relay a message to the messaging bot
//! - `GET /health`, `GET /metrics` — operational endpoints

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod http;
pub mod hub;
pub mod notifier;
