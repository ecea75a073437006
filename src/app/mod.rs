//! Application core — pure domain logic, zero I/O.
//!
//! This module contains the control loop of the robot: heartbeat gating
//! and pacing, inbound dispatch, and indicator refresh.  All interaction
//! with hardware happens through **port traits** defined in [`ports`],
//! keeping this layer fully testable without real peripherals.

pub mod events;
pub mod ports;
pub mod service;
