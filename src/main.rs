//! ScoutLink Firmware — Main Entry Point
//!
//! Hexagonal architecture around a free-running cooperative control loop.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  UartLink        IndicatorBank     LogEventSink                │
//! │  (LinkPort)      (IndicatorPort)   (EventSink)                 │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │            ControlCore (pure logic)                    │    │
//! │  │  heartbeat gating · pacing · inbound dispatch          │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! │                                                                │
//! │  TickClock (timer ISR) · GoLatch (button ISR)                  │
//! └────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

// ── Module declarations ───────────────────────────────────────
pub mod config;
mod error;
mod pins;
mod timing;

pub mod app;
mod adapters;
mod drivers;
mod link;

// ── Imports ───────────────────────────────────────────────────
use anyhow::Result;
use log::info;

use adapters::indicators::IndicatorBank;
use adapters::log_sink::LogEventSink;
use adapters::uart_link::UartLink;
use app::service::ControlCore;
use config::SystemConfig;
use drivers::go_button::GO_LATCH;
use error::Error;
use timing::TICK_CLOCK;

// ── Bring-up ──────────────────────────────────────────────────

/// One-shot peripheral bring-up: GPIO, radio UART, tick timer, ISRs.
fn bring_up(config: &SystemConfig) -> error::Result<()> {
    drivers::hw_init::init_peripherals().map_err(Error::from)?;
    drivers::hw_init::init_radio_uart(config.uart_baud).map_err(Error::from)?;
    drivers::hw_timer::start_tick_timer(config.tick_period_ms);
    drivers::hw_init::init_isr_service().map_err(Error::from)?;
    Ok(())
}

// ── Main ──────────────────────────────────────────────────────

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    #[cfg(target_os = "espidf")]
    {
        esp_idf_svc::sys::link_patches();
        esp_idf_logger::init()?;
    }

    info!("╔══════════════════════════════════════╗");
    info!("║  ScoutLink v{}                      ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    let config = SystemConfig::default();
    info!(
        "config: addr=0x{:02X} tick={}ms heartbeat={} ticks pacing={}ms",
        config.robot_address,
        config.tick_period_ms,
        config.heartbeat_interval_ticks,
        config.pacing_delay_ms,
    );

    // ── 2. Peripheral bring-up ────────────────────────────────
    if let Err(e) = bring_up(&config) {
        // Bring-up failure is critical — log and halt.
        // In production this triggers the watchdog reset after timeout.
        log::error!("bring-up failed: {} — halting", e);
        #[allow(clippy::empty_loop)]
        loop {}
    }

    // ── 3. Construct adapters ─────────────────────────────────
    let mut radio = UartLink::new();
    let mut indicators = IndicatorBank::new();
    let mut sink = LogEventSink::new();

    #[cfg(target_os = "espidf")]
    let mut pacer = esp_idf_hal::delay::FreeRtos;
    #[cfg(not(target_os = "espidf"))]
    let mut pacer = adapters::time::HostDelay;

    // ── 4. Construct the control core ─────────────────────────
    let mut core = ControlCore::new(config.clone(), &TICK_CLOCK, &GO_LATCH);

    info!("System ready. Entering control loop.");

    // ── 5. Control loop ───────────────────────────────────────
    loop {
        // Simulate the tick interrupt via sleep on non-espidf targets.
        // On real hardware the esp_timer callback advances TICK_CLOCK
        // asynchronously and the loop free-runs.
        #[cfg(not(target_os = "espidf"))]
        {
            std::thread::sleep(std::time::Duration::from_millis(u64::from(
                config.tick_period_ms,
            )));
            TICK_CLOCK.tick();
        }

        core.poll(&mut radio, &mut indicators, &mut pacer, &mut sink);

        // Brief yield so the FreeRTOS idle task can feed its watchdog;
        // heartbeat pacing is unaffected (flag-driven, not loop-timed).
        #[cfg(target_os = "espidf")]
        esp_idf_hal::delay::FreeRtos::delay_ms(1);
    }
}
