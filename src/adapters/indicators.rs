//! Indicator LED bank adapter.
//!
//! Drives the ready, liveness, and eight slot LEDs through plain GPIO
//! writes, implementing [`IndicatorPort`].  This is the only module
//! that touches the LED hardware.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: writes GPIO levels via `hw_init::gpio_write`.
//! On host/test: tracks state in-memory only (`gpio_write` is a no-op).

use crate::app::ports::IndicatorPort;
use crate::app::service::SLOTS_PER_BANK;
use crate::drivers::hw_init;
use crate::pins;

/// Concrete adapter for the status LED bank.
pub struct IndicatorBank {
    ready: bool,
    liveness: bool,
    storage: [bool; SLOTS_PER_BANK],
    supply: [bool; SLOTS_PER_BANK],
}

impl IndicatorBank {
    pub fn new() -> Self {
        Self {
            ready: false,
            liveness: false,
            storage: [false; SLOTS_PER_BANK],
            supply: [false; SLOTS_PER_BANK],
        }
    }

    /// Current liveness LED level (mirrors the pin).
    pub fn liveness(&self) -> bool {
        self.liveness
    }

    /// Current ready LED level.
    pub fn ready(&self) -> bool {
        self.ready
    }
}

impl Default for IndicatorBank {
    fn default() -> Self {
        Self::new()
    }
}

impl IndicatorPort for IndicatorBank {
    fn set_ready(&mut self, on: bool) {
        hw_init::gpio_write(pins::READY_LED_GPIO, on);
        self.ready = on;
    }

    fn toggle_liveness(&mut self) {
        self.liveness = !self.liveness;
        hw_init::gpio_write(pins::LIVENESS_LED_GPIO, self.liveness);
    }

    fn set_storage_slot(&mut self, slot: usize, on: bool) {
        if let Some(&pin) = pins::STORAGE_LED_GPIOS.get(slot) {
            hw_init::gpio_write(pin, on);
            self.storage[slot] = on;
        }
    }

    fn set_supply_slot(&mut self, slot: usize, on: bool) {
        if let Some(&pin) = pins::SUPPLY_LED_GPIOS.get(slot) {
            hw_init::gpio_write(pin, on);
            self.supply[slot] = on;
        }
    }
}
