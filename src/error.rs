#![allow(dead_code)] // Link/Frame conversions reserved for typed adapter returns

//! Unified error types for the ScoutLink firmware.
//!
//! Follows embedded best practice: a single `Error` enum that every subsystem
//! can convert into, keeping the top-level bring-up and control loop error
//! handling uniform.  All variants are `Copy` so they can be cheaply passed
//! around without allocation.

use core::fmt;

use crate::app::ports::LinkError;
use crate::drivers::hw_init::HwInitError;
use crate::link::frame::FrameError;

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

/// Every fallible operation in the firmware funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Peripheral initialisation failed.
    Init(HwInitError),
    /// The radio link could not accept or deliver bytes.
    Link(LinkError),
    /// A wire frame could not be encoded or failed validation.
    Frame(FrameError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Init(e) => write!(f, "init: {e}"),
            Self::Link(e) => write!(f, "link: {e}"),
            Self::Frame(e) => write!(f, "frame: {e}"),
        }
    }
}

impl From<HwInitError> for Error {
    fn from(e: HwInitError) -> Self {
        Self::Init(e)
    }
}

impl From<LinkError> for Error {
    fn from(e: LinkError) -> Self {
        Self::Link(e)
    }
}

impl From<FrameError> for Error {
    fn from(e: FrameError) -> Self {
        Self::Frame(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
