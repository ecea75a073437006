//! System configuration parameters
//!
//! All tunable parameters for the ScoutLink control loop.  The defaults
//! mirror the reference deployment: 100 ms ticks, 2 s heartbeat cadence,
//! 20 ms pacing gap between the heartbeat and its trailing alert.

use serde::{Deserialize, Serialize};

/// Reference tick period (100 ms → 10 Hz tick source).
pub const DEFAULT_TICK_PERIOD_MS: u32 = 100;
/// Ticks that make up one elapsed second at the reference period.
pub const DEFAULT_TICKS_PER_SECOND: u8 = 10;
/// Heartbeat interval in ticks — double the per-second divisor (2 s cadence).
pub const DEFAULT_HEARTBEAT_INTERVAL_TICKS: u8 = 20;

/// Core system configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemConfig {
    // --- Timing ---
    /// Tick source period (milliseconds)
    pub tick_period_ms: u32,
    /// Ticks that make up one elapsed second
    pub ticks_per_second: u8,
    /// Ticks between heartbeat transmissions
    pub heartbeat_interval_ticks: u8,
    /// Pacing gap between heartbeat and alert sends (milliseconds)
    pub pacing_delay_ms: u32,

    // --- Addressing ---
    /// This robot's link-layer address (source of every outbound frame)
    pub robot_address: u8,
    /// Condition code carried in the alert that trails each heartbeat
    pub alert_code: u8,

    // --- Radio link ---
    /// UART baud rate to the radio module
    pub uart_baud: u32,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            // Timing
            tick_period_ms: DEFAULT_TICK_PERIOD_MS,
            ticks_per_second: DEFAULT_TICKS_PER_SECOND,
            heartbeat_interval_ticks: DEFAULT_HEARTBEAT_INTERVAL_TICKS,
            pacing_delay_ms: 20,

            // Addressing
            robot_address: 0x42,
            alert_code: 0xFF, // "new sample detected"

            // Radio
            uart_baud: 9_600,
        }
    }
}

impl SystemConfig {
    /// Parse a configuration override from JSON (flashed provisioning
    /// blob or test fixture).
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
