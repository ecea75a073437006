//! Go-button latch driver.
//!
//! ## Hardware
//!
//! Active-low momentary switch with external pull-up.  The GPIO fires on
//! the falling edge; the ISR does nothing but latch an atomic.  The main
//! loop observes the latch and lights the ready indicator on the first
//! observation.
//!
//! The latch is strictly one-way: permission goes false→true exactly
//! once per power cycle and is never cleared.  Repeat edges (bounce or
//! operator mashing) are harmless — the store is idempotent.  The latch
//! gates **outbound transmission only**; inbound reception runs from
//! boot so pairing traffic is never missed.

use core::sync::atomic::{AtomicBool, Ordering};

/// One-way transmit-permission latch shared between the button ISR and
/// the main loop.
pub struct GoLatch {
    /// Set by the ISR, read by the control core.  Never cleared.
    permission: AtomicBool,
    /// Whether the main loop has already acted on the grant.
    ready_announced: AtomicBool,
}

/// The process-wide latch instance wired to the go-button GPIO ISR.
pub static GO_LATCH: GoLatch = GoLatch::new();

impl GoLatch {
    pub const fn new() -> Self {
        Self {
            permission: AtomicBool::new(false),
            ready_announced: AtomicBool::new(false),
        }
    }

    /// Latch transmit permission.
    ///
    /// Safe to call from ISR context (single atomic store); idempotent
    /// after the first firing.
    pub fn latch_from_isr(&self) {
        self.permission.store(true, Ordering::Release);
    }

    /// Whether transmit permission has been granted.
    pub fn is_granted(&self) -> bool {
        self.permission.load(Ordering::Acquire)
    }

    /// Consume the grant edge.
    ///
    /// Returns `true` exactly once — on the first call after the latch
    /// fires — so the caller lights the ready indicator a single time.
    /// Main-loop only (single consumer).
    pub fn take_ready_edge(&self) -> bool {
        if !self.permission.load(Ordering::Acquire) {
            return false;
        }
        !self.ready_announced.swap(true, Ordering::Relaxed)
    }
}

impl Default for GoLatch {
    fn default() -> Self {
        Self::new()
    }
}
