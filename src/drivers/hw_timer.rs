//! Hardware tick timer using ESP-IDF's esp_timer API.
//!
//! Creates the single periodic tick source that advances the shared
//! [`TICK_CLOCK`](crate::timing::TICK_CLOCK).  On simulation targets the
//! main loop drives the clock directly via sleep, so no timer is started.
//!
//! The callback executes in the ESP timer task context (not a raw ISR),
//! so the contract from the clock still holds: bounded time, no I/O,
//! atomics only.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

#[cfg(target_os = "espidf")]
use log::info;

#[cfg(target_os = "espidf")]
static mut TICK_TIMER: esp_timer_handle_t = core::ptr::null_mut();

/// SAFETY: TICK_TIMER is written once in `start_tick_timer()` before any
/// timer callbacks fire.  Only called from the single main task.
#[cfg(target_os = "espidf")]
unsafe fn tick_timer() -> esp_timer_handle_t {
    unsafe { TICK_TIMER }
}

#[cfg(target_os = "espidf")]
unsafe extern "C" fn tick_cb(_arg: *mut core::ffi::c_void) {
    crate::timing::TICK_CLOCK.tick();
}

/// Start the periodic tick timer at `period_ms`.
#[cfg(target_os = "espidf")]
pub fn start_tick_timer(period_ms: u32) {
    // SAFETY: TICK_TIMER is written here once at boot from the single
    // main-task context before any timer callbacks fire.  The callback
    // itself only touches the lock-free TickClock atomics.
    unsafe {
        let args = esp_timer_create_args_t {
            callback: Some(tick_cb),
            arg: core::ptr::null_mut(),
            dispatch_method: esp_timer_dispatch_t_ESP_TIMER_TASK,
            name: b"tick\0".as_ptr() as *const _,
            skip_unhandled_events: false,
        };
        let ret = esp_timer_create(&args, core::ptr::addr_of_mut!(TICK_TIMER));
        if ret != ESP_OK {
            log::error!(
                "hw_timer: tick timer create failed (rc={}) — continuing without ticks",
                ret
            );
            return;
        }
        let ret = esp_timer_start_periodic(TICK_TIMER, u64::from(period_ms) * 1_000);
        if ret != ESP_OK {
            log::error!("hw_timer: tick timer start failed (rc={})", ret);
            return;
        }

        info!("hw_timer: tick source started ({}ms period)", period_ms);
    }
}

#[cfg(not(target_os = "espidf"))]
pub fn start_tick_timer(period_ms: u32) {
    log::info!(
        "hw_timer(sim): timer not started (ticks driven by sleep loop, {}ms)",
        period_ms
    );
}

/// Stop the tick timer.
#[cfg(target_os = "espidf")]
pub fn stop_tick_timer() {
    // SAFETY: TICK_TIMER is a valid handle if start_tick_timer() succeeded;
    // null-check prevents touching a never-created timer.
    unsafe {
        // SAFETY: tick_timer() contract — main task only.
        let t = tick_timer();
        if !t.is_null() {
            esp_timer_stop(t);
        }
    }
}

#[cfg(not(target_os = "espidf"))]
pub fn stop_tick_timer() {}
