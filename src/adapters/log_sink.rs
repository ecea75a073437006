//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the ESP-IDF logger (which goes to UART / USB-CDC in production).
//! A future telemetry-mirror adapter would implement the same trait.

use log::{debug, info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the serial console.
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LogEventSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::GoGranted => {
                info!("GO    | transmit permission granted, ready LED lit");
            }
            AppEvent::HeartbeatSent { elapsed_secs } => {
                info!("TX    | heartbeat @ t+{}s", elapsed_secs);
            }
            AppEvent::AlertSent(code) => {
                info!("TX    | alert code=0x{:02X}", code);
            }
            AppEvent::SendFailed(e) => {
                warn!("TX    | send failed ({}) — dropped, next interval retries", e);
            }
            AppEvent::StorageUpdated(mask) => {
                info!("RX    | storage slots=0b{:04b}", mask);
            }
            AppEvent::SupplyUpdated(mask) => {
                info!("RX    | supply slots=0b{:04b}", mask);
            }
            AppEvent::FrameRejected(e) => {
                debug!("RX    | frame discarded ({})", e);
            }
            AppEvent::UnknownType(t) => {
                debug!("RX    | unhandled type 0x{:02X}", t);
            }
        }
    }
}
