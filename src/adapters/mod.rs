//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter      | Implements      | Connects to                |
//! |--------------|-----------------|----------------------------|
//! | `uart_link`  | LinkPort        | Radio module on UART1      |
//! | `indicators` | IndicatorPort   | Status LEDs via GPIO       |
//! | `log_sink`   | EventSink       | Serial log output          |
//! | `time`       | DelayNs (host)  | std sleep / FreeRTOS delay |

pub mod indicators;
pub mod log_sink;
pub mod time;
pub mod uart_link;
