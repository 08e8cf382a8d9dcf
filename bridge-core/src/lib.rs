#![no_std]

// Control logic for the LG television CEC bridge.
//
// Everything here is tick driven and allocation free so the same state
// machines run inside the firmware and inside host tooling.
#![allow(clippy::module_name_repetitions)]

pub mod cec;
pub mod config;
pub mod coordinator;
pub mod discovery;
pub mod reactor;
pub mod remote;
pub mod routing;
pub mod serial;
pub mod state;
pub mod telemetry;
pub mod timeouts;
pub mod transport;

pub use coordinator::{Bridge, RecoveryRequested};
