//! One-shot hardware peripheral initialization.
//!
//! Configures GPIO directions, the radio UART, and the go-button
//! interrupt using raw ESP-IDF sys calls.  Called once from `main()`
//! before the control loop starts.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

#[cfg(target_os = "espidf")]
use log::info;

#[cfg(target_os = "espidf")]
use crate::pins;

// ── Error type ────────────────────────────────────────────────

/// Errors during one-shot peripheral initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HwInitError {
    GpioConfigFailed(i32),
    UartInitFailed(i32),
    IsrInstallFailed(i32),
}

impl core::fmt::Display for HwInitError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::GpioConfigFailed(rc) => write!(f, "GPIO config failed (rc={})", rc),
            Self::UartInitFailed(rc) => write!(f, "UART init failed (rc={})", rc),
            Self::IsrInstallFailed(rc) => write!(f, "GPIO ISR service install failed (rc={})", rc),
        }
    }
}

// ── Peripheral bring-up ───────────────────────────────────────

#[cfg(target_os = "espidf")]
pub fn init_peripherals() -> Result<(), HwInitError> {
    // SAFETY: Called once from main() before the control loop; single-threaded.
    unsafe {
        init_gpio_inputs()?;
        init_gpio_outputs()?;
    }
    info!("hw_init: all peripherals configured");
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_peripherals() -> Result<(), HwInitError> {
    log::info!("hw_init(sim): peripheral init skipped");
    Ok(())
}

// ── GPIO Inputs ───────────────────────────────────────────────

#[cfg(target_os = "espidf")]
unsafe fn init_gpio_inputs() -> Result<(), HwInitError> {
    let btn_cfg = gpio_config_t {
        pin_bit_mask: 1u64 << pins::GO_BUTTON_GPIO,
        mode: gpio_mode_t_GPIO_MODE_INPUT,
        pull_up_en: gpio_pullup_t_GPIO_PULLUP_ENABLE,
        pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
        intr_type: gpio_int_type_t_GPIO_INTR_NEGEDGE,
    };
    let ret = unsafe { gpio_config(&btn_cfg) };
    if ret != ESP_OK as i32 {
        return Err(HwInitError::GpioConfigFailed(ret));
    }

    info!("hw_init: go button configured (GPIO{})", pins::GO_BUTTON_GPIO);
    Ok(())
}

// ── GPIO Outputs ──────────────────────────────────────────────

#[cfg(target_os = "espidf")]
unsafe fn init_gpio_outputs() -> Result<(), HwInitError> {
    let mut output_pins = [0i32; 10];
    output_pins[0] = pins::READY_LED_GPIO;
    output_pins[1] = pins::LIVENESS_LED_GPIO;
    output_pins[2..6].copy_from_slice(&pins::STORAGE_LED_GPIOS);
    output_pins[6..10].copy_from_slice(&pins::SUPPLY_LED_GPIOS);

    for &pin in &output_pins {
        let cfg = gpio_config_t {
            pin_bit_mask: 1u64 << pin,
            mode: gpio_mode_t_GPIO_MODE_OUTPUT,
            pull_up_en: gpio_pullup_t_GPIO_PULLUP_DISABLE,
            pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
            intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
        };
        let ret = unsafe { gpio_config(&cfg) };
        if ret != ESP_OK as i32 {
            return Err(HwInitError::GpioConfigFailed(ret));
        }
        // All indicators start dark.
        unsafe { gpio_set_level(pin, 0) };
    }

    info!("hw_init: indicator outputs configured (10 LEDs)");
    Ok(())
}

#[cfg(target_os = "espidf")]
pub fn gpio_write(pin: i32, high: bool) {
    // SAFETY: gpio_set_level writes to an already-configured output pin;
    // pin was validated during init_gpio_outputs(). Main-loop only.
    unsafe {
        gpio_set_level(pin, if high { 1 } else { 0 });
    }
}

#[cfg(not(target_os = "espidf"))]
pub fn gpio_write(_pin: i32, _high: bool) {}

// ── Radio UART ────────────────────────────────────────────────

/// UART port number used for the radio module.
#[cfg(target_os = "espidf")]
pub const RADIO_UART_NUM: u32 = 1;

/// Driver-side receive buffer; a few frames deep so a slow loop
/// iteration cannot drop bytes mid-frame.
#[cfg(target_os = "espidf")]
const UART_RX_BUF_SIZE: i32 = 256;

#[cfg(target_os = "espidf")]
pub fn init_radio_uart(baud: u32) -> Result<(), HwInitError> {
    // SAFETY: Called once from main() before the control loop; the UART
    // driver install and config calls are made from the single main task.
    unsafe {
        let cfg = uart_config_t {
            baud_rate: baud as i32,
            data_bits: uart_word_length_t_UART_DATA_8_BITS,
            parity: uart_parity_t_UART_PARITY_DISABLE,
            stop_bits: uart_stop_bits_t_UART_STOP_BITS_1,
            flow_ctrl: uart_hw_flowcontrol_t_UART_HW_FLOWCTRL_DISABLE,
            ..Default::default()
        };
        let ret = uart_param_config(RADIO_UART_NUM, &cfg);
        if ret != ESP_OK {
            return Err(HwInitError::UartInitFailed(ret));
        }

        let ret = uart_set_pin(
            RADIO_UART_NUM,
            pins::RADIO_TX_GPIO,
            pins::RADIO_RX_GPIO,
            UART_PIN_NO_CHANGE,
            UART_PIN_NO_CHANGE,
        );
        if ret != ESP_OK {
            return Err(HwInitError::UartInitFailed(ret));
        }

        let ret = uart_driver_install(
            RADIO_UART_NUM,
            UART_RX_BUF_SIZE,
            0, // unbuffered TX — writes go straight to the FIFO
            0,
            core::ptr::null_mut(),
            0,
        );
        if ret != ESP_OK {
            return Err(HwInitError::UartInitFailed(ret));
        }
    }

    info!("hw_init: radio UART{} up at {} baud", RADIO_UART_NUM, baud);
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_radio_uart(baud: u32) -> Result<(), HwInitError> {
    log::info!("hw_init(sim): radio UART skipped ({} baud)", baud);
    Ok(())
}

// ── GPIO ISR Service ──────────────────────────────────────────

#[cfg(target_os = "espidf")]
unsafe extern "C" fn go_button_gpio_isr(_arg: *mut core::ffi::c_void) {
    // Single atomic store; idempotent on bounce.
    crate::drivers::go_button::GO_LATCH.latch_from_isr();
}

/// Install the per-pin GPIO ISR service and register the go-button
/// handler.  Call after init_peripherals() and before the control loop.
#[cfg(target_os = "espidf")]
pub fn init_isr_service() -> Result<(), HwInitError> {
    // SAFETY: gpio_install_isr_service is idempotent; ESP_ERR_INVALID_STATE
    // means it was already installed (acceptable). The registered handler
    // only performs a lock-free atomic store.
    unsafe {
        let ret = gpio_install_isr_service(0);
        if ret != ESP_OK && ret != ESP_ERR_INVALID_STATE {
            return Err(HwInitError::IsrInstallFailed(ret));
        }

        // Go button: falling edge (active-low with pull-up already configured)
        gpio_set_intr_type(pins::GO_BUTTON_GPIO, gpio_int_type_t_GPIO_INTR_NEGEDGE);
        gpio_isr_handler_add(
            pins::GO_BUTTON_GPIO,
            Some(go_button_gpio_isr),
            core::ptr::null_mut(),
        );
        gpio_intr_enable(pins::GO_BUTTON_GPIO);

        info!("hw_init: ISR service installed (go button)");
    }
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_isr_service() -> Result<(), HwInitError> {
    log::info!("hw_init(sim): ISR service skipped");
    Ok(())
}
