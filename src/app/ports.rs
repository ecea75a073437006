//! Port traits — the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ ControlCore (domain)
//! ```
//!
//! Driven adapters (radio link, indicator LEDs, event sinks) implement
//! these traits.  The [`ControlCore`](super::service::ControlCore)
//! consumes them via generics, so the domain core never touches hardware
//! directly.  The pacing delay between the two outbound sends uses
//! [`embedded_hal::delay::DelayNs`] rather than a bespoke trait — any
//! HAL delay provider plugs straight in.

use heapless::Vec;

use crate::link::frame::MAX_FRAME_SIZE;

// ───────────────────────────────────────────────────────────────
// Link port (driven adapter: domain ↔ radio transport)
// ───────────────────────────────────────────────────────────────

/// Byte-frame transport to the field controller.
///
/// Both operations are non-blocking: `try_send` hands a frame to the
/// channel fire-and-forget (no delivery confirmation contract), and
/// `try_receive` polls for **at most one** complete inbound frame,
/// returning immediately either way.  Reception must work before
/// transmit permission is granted — pairing traffic arrives first.
pub trait LinkPort {
    /// Hand one encoded frame to the channel.
    fn try_send(&mut self, frame: &[u8]) -> Result<(), LinkError>;

    /// Poll for one complete inbound frame, raw and unvalidated.
    fn try_receive(&mut self) -> Option<Vec<u8, MAX_FRAME_SIZE>>;
}

// ───────────────────────────────────────────────────────────────
// Indicator port (driven adapter: domain → status LEDs)
// ───────────────────────────────────────────────────────────────

/// Write-side port for the indicator LEDs.
pub trait IndicatorPort {
    /// Light (or clear) the "ready" indicator.
    fn set_ready(&mut self, on: bool);

    /// Flip the liveness indicator (toggled on every heartbeat).
    fn toggle_liveness(&mut self);

    /// Drive one cargo-bay slot indicator (slot 0-3).
    fn set_storage_slot(&mut self, slot: usize, on: bool);

    /// Drive one supply-rack slot indicator (slot 0-3).
    fn set_supply_slot(&mut self, slot: usize, on: bool);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}

// ───────────────────────────────────────────────────────────────
// Error types
// ───────────────────────────────────────────────────────────────

/// Errors from [`LinkPort`] operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkError {
    /// The channel's transmit buffer is full.
    ChannelFull,
    /// The underlying driver reported an I/O failure.
    IoError,
}

impl core::fmt::Display for LinkError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::ChannelFull => write!(f, "transmit channel full"),
            Self::IoError => write!(f, "I/O error"),
        }
    }
}
