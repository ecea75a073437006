//! Hardware initialisation, the tick timer, and the go-button latch.

pub mod go_button;
pub mod hw_init;
pub mod hw_timer;
