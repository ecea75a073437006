//! GPIO / peripheral pin assignments for the ScoutLink main board.
//!
//! Single source of truth — every driver references this module rather than
//! hard-coding pin numbers.  Change a pin here and it propagates everywhere.

// ---------------------------------------------------------------------------
// Radio module (XB-class wireless serial, UART1)
// ---------------------------------------------------------------------------

/// UART TX into the radio module.
pub const RADIO_TX_GPIO: i32 = 17;
/// UART RX from the radio module.
pub const RADIO_RX_GPIO: i32 = 18;

// ---------------------------------------------------------------------------
// Operator "go" button (active-low with external pull-up)
// ---------------------------------------------------------------------------

/// Momentary push-button; falling edge grants transmit permission.
pub const GO_BUTTON_GPIO: i32 = 16;

// ---------------------------------------------------------------------------
// Indicator LEDs (all digital outputs, active HIGH)
// ---------------------------------------------------------------------------

/// Lit once when the go button first fires ("pairing complete").
pub const READY_LED_GPIO: i32 = 2;
/// Toggled on every transmitted heartbeat.
pub const LIVENESS_LED_GPIO: i32 = 4;

/// Cargo-bay slot indicators, bit 0 → slot 1.
pub const STORAGE_LED_GPIOS: [i32; 4] = [5, 6, 7, 8];
/// Supply-rack slot indicators, bit 0 → slot 1.
pub const SUPPLY_LED_GPIOS: [i32; 4] = [9, 10, 11, 12];
