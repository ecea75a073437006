//! Wire protocol for the radio link.
//!
//! The link carries small addressed frames between the robot and the
//! field controller.  [`frame`] owns encoding, validation, and the
//! streaming deframer that reassembles frames from raw UART bytes.

pub mod frame;
