//! Outbound application events.
//!
//! The [`ControlCore`](super::service::ControlCore) emits these through
//! the [`EventSink`](super::ports::EventSink) port.  Adapters on the
//! other side decide what to do with them — log to serial, mirror onto a
//! debug console, etc.

use crate::link::frame::FrameError;

use super::ports::LinkError;

/// Structured events emitted by the control core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEvent {
    /// Transmit permission was granted by the go button (fires once).
    GoGranted,

    /// A heartbeat frame was handed to the link (carries elapsed seconds).
    HeartbeatSent { elapsed_secs: u32 },

    /// An alert frame was handed to the link (carries the condition code).
    AlertSent(u8),

    /// The link refused an outbound frame; not retried.
    SendFailed(LinkError),

    /// The cargo-bay bitmask was overwritten by an inbound update.
    StorageUpdated(u8),

    /// The supply-rack bitmask was overwritten by an inbound update.
    SupplyUpdated(u8),

    /// An inbound frame failed validation and was discarded.
    FrameRejected(FrameError),

    /// A valid frame carried a type this robot does not consume.
    UnknownType(u8),
}
