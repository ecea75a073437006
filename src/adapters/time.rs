//! Delay and uptime providers.
//!
//! The control core's pacing stall is expressed through
//! [`embedded_hal::delay::DelayNs`], so any HAL delay source plugs in:
//!
//! - **`target_os = "espidf"`** — use `esp_idf_hal::delay::FreeRtos`
//!   directly (it implements `DelayNs` and yields to the scheduler).
//! - **`not(target_os = "espidf")`** — [`HostDelay`] below, backed by
//!   `std::thread::sleep`, for simulation and tests.

#[cfg(not(target_os = "espidf"))]
use embedded_hal::delay::DelayNs;

/// Host-side delay provider for simulation runs.
#[cfg(not(target_os = "espidf"))]
#[derive(Debug, Default)]
pub struct HostDelay;

#[cfg(not(target_os = "espidf"))]
impl DelayNs for HostDelay {
    fn delay_ns(&mut self, ns: u32) {
        std::thread::sleep(std::time::Duration::from_nanos(u64::from(ns)));
    }
}
