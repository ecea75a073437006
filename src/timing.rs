//! Tick-source state shared between the timer interrupt and the main loop.
//!
//! A [`TickClock`] holds the sub-second phase counter, the elapsed-seconds
//! counter, and the heartbeat-due latch.  The timer callback is the only
//! writer of the counters; the control core only ever *consumes* the due
//! latch.  That single-writer-per-field discipline is what makes the
//! lock-free sharing sound on a single-core target.
//!
//! ```text
//! ┌────────────┐  tick()              take_heartbeat_due()  ┌────────────┐
//! │ Timer ISR  │────────▶  TickClock  ◀─────────────────────│ Main Loop  │
//! │ (producer) │        (atomics only)                      │ (consumer) │
//! └────────────┘                                            └────────────┘
//! ```

use core::sync::atomic::{AtomicBool, AtomicU8, AtomicU32, Ordering};

use crate::config::{DEFAULT_HEARTBEAT_INTERVAL_TICKS, DEFAULT_TICKS_PER_SECOND};

/// Dual-divisor tick clock.
///
/// Counters are owned by the tick handler; `heartbeat_due` is a strict
/// producer/consumer handoff — set with `Release` in [`tick`](Self::tick),
/// consumed with a single `swap(false, Acquire)` by the main loop, so at
/// most one heartbeat transmission can occur per interval.
pub struct TickClock {
    /// Whole seconds since start.  Monotone; wraps on u32 overflow.
    elapsed_secs: AtomicU32,
    /// Sub-second phase in tick units, resets at `ticks_per_second`.
    tick_counter: AtomicU8,
    /// Ticks since the last heartbeat became due.
    heartbeat_counter: AtomicU8,
    /// One-shot "heartbeat pending" latch.
    heartbeat_due: AtomicBool,
    /// Divisor for the elapsed-seconds rollover.
    ticks_per_second: u8,
    /// Divisor for the heartbeat-due rollover.
    heartbeat_interval_ticks: u8,
}

/// The process-wide clock instance wired to the hardware tick timer.
pub static TICK_CLOCK: TickClock =
    TickClock::new(DEFAULT_TICKS_PER_SECOND, DEFAULT_HEARTBEAT_INTERVAL_TICKS);

impl TickClock {
    /// Construct a clock with the given divisors (in tick units).
    pub const fn new(ticks_per_second: u8, heartbeat_interval_ticks: u8) -> Self {
        Self {
            elapsed_secs: AtomicU32::new(0),
            tick_counter: AtomicU8::new(0),
            heartbeat_counter: AtomicU8::new(0),
            heartbeat_due: AtomicBool::new(false),
            ticks_per_second,
            heartbeat_interval_ticks,
        }
    }

    /// Advance the clock by one tick period.
    ///
    /// Called from the periodic timer callback.  No I/O, bounded time,
    /// cannot fail.  Non-reentrant by the timer contract — this is the
    /// only writer of the counters.
    pub fn tick(&self) {
        let phase = self.tick_counter.load(Ordering::Relaxed) + 1;
        if phase >= self.ticks_per_second {
            self.tick_counter.store(0, Ordering::Relaxed);
            let secs = self.elapsed_secs.load(Ordering::Relaxed);
            self.elapsed_secs.store(secs.wrapping_add(1), Ordering::Relaxed);
        } else {
            self.tick_counter.store(phase, Ordering::Relaxed);
        }

        let hb = self.heartbeat_counter.load(Ordering::Relaxed) + 1;
        if hb >= self.heartbeat_interval_ticks {
            self.heartbeat_counter.store(0, Ordering::Relaxed);
            self.heartbeat_due.store(true, Ordering::Release);
        } else {
            self.heartbeat_counter.store(hb, Ordering::Relaxed);
        }
    }

    /// Consume the heartbeat-due latch.
    ///
    /// Returns `true` at most once per heartbeat interval.  The caller
    /// clears the latch whether or not it goes on to transmit — a cycle
    /// that elapses before transmit permission is granted is dropped
    /// rather than bursting out immediately after the go button fires.
    pub fn take_heartbeat_due(&self) -> bool {
        self.heartbeat_due.swap(false, Ordering::Acquire)
    }

    /// Whole seconds since start.
    pub fn elapsed_secs(&self) -> u32 {
        self.elapsed_secs.load(Ordering::Relaxed)
    }
}
