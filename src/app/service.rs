//! Control core — the hexagonal centre of the firmware.
//!
//! [`ControlCore`] owns the two slot bitmasks and runs one cooperative
//! loop iteration per [`poll`](ControlCore::poll): an outbound phase
//! (heartbeat gating + pacing) followed by an inbound phase (one frame
//! poll, decode, dispatch, indicator refresh).  All I/O flows through
//! port traits injected at call sites, making the entire core testable
//! with mock adapters.
//!
//! ```text
//!  TickClock ──▶ ┌────────────────────────┐ ──▶ LinkPort (tx)
//!  GoLatch   ──▶ │      ControlCore        │ ──▶ IndicatorPort
//!  LinkPort  ──▶ │  gate · pace · dispatch │ ──▶ EventSink
//!  (rx)          └────────────────────────┘
//! ```
//!
//! Two orthogonal latched states drive the loop: transmit permission
//! (one-way, from the go latch) and heartbeat-pending (cyclic, re-armed
//! by the tick clock every interval).  Reception and indicator refresh
//! are state-independent and active from boot.

use embedded_hal::delay::DelayNs;
use log::{debug, info, warn};

use crate::config::SystemConfig;
use crate::drivers::go_button::GoLatch;
use crate::link::frame::{
    self, BROADCAST_ADDR, MSG_ALERT, MSG_HEARTBEAT, MSG_STORAGE_UPDATE, MSG_SUPPLY_UPDATE,
};
use crate::timing::TickClock;

use super::events::AppEvent;
use super::ports::{EventSink, IndicatorPort, LinkPort};

/// Slots per category (cargo bay and supply rack each have four).
pub const SLOTS_PER_BANK: usize = 4;

// ───────────────────────────────────────────────────────────────
// ControlCore
// ───────────────────────────────────────────────────────────────

/// The free-running control loop core.
pub struct ControlCore<'a> {
    clock: &'a TickClock,
    go: &'a GoLatch,
    config: SystemConfig,
    /// Cargo-bay presence bitmask, low 4 bits significant.
    storage_mask: u8,
    /// Supply-rack presence bitmask, low 4 bits significant.
    supply_mask: u8,
}

impl<'a> ControlCore<'a> {
    /// Construct the core against the shared clock and go latch.
    ///
    /// Production wires the `'static` [`TICK_CLOCK`](crate::timing::TICK_CLOCK)
    /// and [`GO_LATCH`](crate::drivers::go_button::GO_LATCH) instances;
    /// tests pass locals.
    pub fn new(config: SystemConfig, clock: &'a TickClock, go: &'a GoLatch) -> Self {
        Self {
            clock,
            go,
            config,
            storage_mask: 0,
            supply_mask: 0,
        }
    }

    /// Run one loop iteration.  Non-blocking except for the deliberate
    /// pacing delay between the heartbeat and its trailing alert.
    pub fn poll(
        &mut self,
        link: &mut impl LinkPort,
        indicators: &mut impl IndicatorPort,
        pacer: &mut impl DelayNs,
        sink: &mut impl EventSink,
    ) {
        self.outbound_phase(link, indicators, pacer, sink);
        self.inbound_phase(link, indicators, sink);
    }

    // ── Outbound phase ────────────────────────────────────────

    fn outbound_phase(
        &mut self,
        link: &mut impl LinkPort,
        indicators: &mut impl IndicatorPort,
        pacer: &mut impl DelayNs,
        sink: &mut impl EventSink,
    ) {
        if self.go.take_ready_edge() {
            indicators.set_ready(true);
            sink.emit(&AppEvent::GoGranted);
            info!("go: transmit permission granted");
        }

        // Consume the due latch on every check, granted or not.  A cycle
        // that elapses before the go button fires is dropped, so the
        // first post-grant heartbeat waits out a full interval instead
        // of bursting immediately.
        let due = self.clock.take_heartbeat_due();
        if !(due && self.go.is_granted()) {
            return;
        }

        indicators.toggle_liveness();

        self.send(link, sink, MSG_HEARTBEAT, &[], |_| AppEvent::HeartbeatSent {
            elapsed_secs: self.clock.elapsed_secs(),
        });

        // Deliberate pacing stall so back-to-back frames don't saturate
        // the radio channel.  The only blocking wait in the loop.
        pacer.delay_ms(self.config.pacing_delay_ms);

        let alert_code = self.config.alert_code;
        self.send(link, sink, MSG_ALERT, &[alert_code], |code| {
            AppEvent::AlertSent(code[0])
        });
    }

    /// Encode and hand one broadcast frame to the link, fire-and-forget.
    /// A refused send is logged and reported; the next interval retries
    /// on its own cadence.
    fn send(
        &self,
        link: &mut impl LinkPort,
        sink: &mut impl EventSink,
        msg_type: u8,
        payload: &[u8],
        sent_event: impl FnOnce(&[u8]) -> AppEvent,
    ) {
        let encoded =
            match frame::encode_to_vec(BROADCAST_ADDR, self.config.robot_address, msg_type, payload)
            {
                Ok(f) => f,
                Err(e) => {
                    // Unreachable with in-range payloads; never fatal.
                    warn!("tx: encode of type 0x{msg_type:02X} failed: {e}");
                    return;
                }
            };

        match link.try_send(&encoded) {
            Ok(()) => sink.emit(&sent_event(payload)),
            Err(e) => {
                warn!("tx: send of type 0x{msg_type:02X} failed: {e}");
                sink.emit(&AppEvent::SendFailed(e));
            }
        }
    }

    // ── Inbound phase ─────────────────────────────────────────

    fn inbound_phase(
        &mut self,
        link: &mut impl LinkPort,
        indicators: &mut impl IndicatorPort,
        sink: &mut impl EventSink,
    ) {
        let Some(raw) = link.try_receive() else {
            return; // Common case: nothing pending.
        };

        let msg = match frame::decode(&raw, self.config.robot_address) {
            Ok(msg) => msg,
            Err(e) => {
                // Silently discard — no retry, no escalation.
                debug!("rx: frame rejected ({e})");
                sink.emit(&AppEvent::FrameRejected(e));
                return;
            }
        };

        match (msg.msg_type, msg.payload.first()) {
            (MSG_STORAGE_UPDATE, Some(&mask)) => {
                self.storage_mask = mask;
                debug!("rx: storage mask ← 0b{mask:04b}");
                sink.emit(&AppEvent::StorageUpdated(mask));
            }
            (MSG_SUPPLY_UPDATE, Some(&mask)) => {
                self.supply_mask = mask;
                debug!("rx: supply mask ← 0b{mask:04b}");
                sink.emit(&AppEvent::SupplyUpdated(mask));
            }
            (other, _) => {
                debug!("rx: ignoring type 0x{other:02X} from 0x{:02X}", msg.src);
                sink.emit(&AppEvent::UnknownType(other));
            }
        }

        // Every successful decode refreshes all eight slot indicators,
        // whether or not the dispatch above changed anything.
        self.refresh_indicators(indicators);
    }

    /// Mirror the two bitmasks onto the slot LEDs, bit i → slot i+1.
    fn refresh_indicators(&self, indicators: &mut impl IndicatorPort) {
        for slot in 0..SLOTS_PER_BANK {
            indicators.set_storage_slot(slot, self.storage_mask & (1 << slot) != 0);
            indicators.set_supply_slot(slot, self.supply_mask & (1 << slot) != 0);
        }
    }

    // ── Accessors ─────────────────────────────────────────────

    /// Current cargo-bay bitmask.
    pub fn storage_mask(&self) -> u8 {
        self.storage_mask
    }

    /// Current supply-rack bitmask.
    pub fn supply_mask(&self) -> u8 {
        self.supply_mask
    }
}
