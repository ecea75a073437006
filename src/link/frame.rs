//! Frame encoding and decoding for the field-controller protocol.
//!
//! Frame format:
//! - START (1 byte): 0xAA synchronization byte
//! - DEST (1 byte): destination address; 0x00 = broadcast
//! - SRC (1 byte): sender address
//! - TYPE (1 byte): message type identifier
//! - LENGTH (1 byte): payload length (0-16)
//! - PAYLOAD (0-16 bytes): type-specific data
//! - CHECKSUM (1 byte): XOR of DEST, SRC, TYPE, LENGTH, and all PAYLOAD bytes

use heapless::Vec;

/// Frame synchronization byte
pub const FRAME_START: u8 = 0xAA;

/// Destination address meaning "all listeners".
pub const BROADCAST_ADDR: u8 = 0x00;

/// Maximum payload size in bytes
pub const MAX_PAYLOAD_SIZE: usize = 16;

/// Bytes before the payload: START + DEST + SRC + TYPE + LENGTH.
const HEADER_SIZE: usize = 5;

/// Maximum complete frame size (header + payload + checksum)
pub const MAX_FRAME_SIZE: usize = HEADER_SIZE + MAX_PAYLOAD_SIZE + 1;

// ── Message type identifiers ──────────────────────────────────

/// Inbound: cargo-bay slot bitmask update (1-byte payload).
pub const MSG_STORAGE_UPDATE: u8 = 0x01;
/// Inbound: supply-rack slot bitmask update (1-byte payload).
pub const MSG_SUPPLY_UPDATE: u8 = 0x02;
/// Outbound: alert condition code (1-byte payload).
pub const MSG_ALERT: u8 = 0x03;
/// Outbound: liveness heartbeat (empty payload).
pub const MSG_HEARTBEAT: u8 = 0x07;

// ── Errors ────────────────────────────────────────────────────

/// Errors that can occur during frame parsing or encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameError {
    /// Payload exceeds maximum allowed size
    PayloadTooLarge,
    /// First byte is not the START marker
    MissingStart,
    /// Frame shorter than the declared length allows
    Truncated,
    /// Checksum mismatch
    InvalidChecksum,
    /// Destination is neither this robot nor broadcast
    NotAddressedToUs,
    /// Buffer too small for encoding
    BufferTooSmall,
}

impl core::fmt::Display for FrameError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::PayloadTooLarge => write!(f, "payload too large"),
            Self::MissingStart => write!(f, "missing start byte"),
            Self::Truncated => write!(f, "truncated frame"),
            Self::InvalidChecksum => write!(f, "checksum mismatch"),
            Self::NotAddressedToUs => write!(f, "not addressed to us"),
            Self::BufferTooSmall => write!(f, "buffer too small"),
        }
    }
}

// ── Decoded message ───────────────────────────────────────────

/// A validated inbound message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// Message type identifier
    pub msg_type: u8,
    /// Sender address
    pub src: u8,
    /// Payload data
    pub payload: Vec<u8, MAX_PAYLOAD_SIZE>,
}

fn checksum(dest: u8, src: u8, msg_type: u8, length: u8, payload: &[u8]) -> u8 {
    let mut chk = dest ^ src ^ msg_type ^ length;
    for &byte in payload {
        chk ^= byte;
    }
    chk
}

/// Encode a frame into `buffer`.
///
/// Returns the number of bytes written.
pub fn encode(
    dest: u8,
    src: u8,
    msg_type: u8,
    payload: &[u8],
    buffer: &mut [u8],
) -> Result<usize, FrameError> {
    if payload.len() > MAX_PAYLOAD_SIZE {
        return Err(FrameError::PayloadTooLarge);
    }
    let frame_len = HEADER_SIZE + payload.len() + 1;
    if buffer.len() < frame_len {
        return Err(FrameError::BufferTooSmall);
    }

    let length = payload.len() as u8;
    buffer[0] = FRAME_START;
    buffer[1] = dest;
    buffer[2] = src;
    buffer[3] = msg_type;
    buffer[4] = length;
    buffer[HEADER_SIZE..HEADER_SIZE + payload.len()].copy_from_slice(payload);
    buffer[HEADER_SIZE + payload.len()] = checksum(dest, src, msg_type, length, payload);

    Ok(frame_len)
}

/// Encode a frame into a heapless Vec.
pub fn encode_to_vec(
    dest: u8,
    src: u8,
    msg_type: u8,
    payload: &[u8],
) -> Result<Vec<u8, MAX_FRAME_SIZE>, FrameError> {
    let mut buffer = [0u8; MAX_FRAME_SIZE];
    let len = encode(dest, src, msg_type, payload, &mut buffer)?;
    let mut vec = Vec::new();
    vec.extend_from_slice(&buffer[..len])
        .map_err(|()| FrameError::BufferTooSmall)?;
    Ok(vec)
}

/// Validate and decode a complete frame.
///
/// `local_addr` is this robot's address; frames destined elsewhere are
/// rejected with [`FrameError::NotAddressedToUs`].  Rejected frames must
/// leave all caller state untouched — decode has no side effects.
pub fn decode(bytes: &[u8], local_addr: u8) -> Result<Message, FrameError> {
    if bytes.len() < HEADER_SIZE + 1 {
        return Err(FrameError::Truncated);
    }
    if bytes[0] != FRAME_START {
        return Err(FrameError::MissingStart);
    }

    let dest = bytes[1];
    let src = bytes[2];
    let msg_type = bytes[3];
    let length = bytes[4] as usize;

    if length > MAX_PAYLOAD_SIZE {
        return Err(FrameError::PayloadTooLarge);
    }
    if bytes.len() < HEADER_SIZE + length + 1 {
        return Err(FrameError::Truncated);
    }

    let payload = &bytes[HEADER_SIZE..HEADER_SIZE + length];
    let expected = checksum(dest, src, msg_type, length as u8, payload);
    if bytes[HEADER_SIZE + length] != expected {
        return Err(FrameError::InvalidChecksum);
    }
    if dest != local_addr && dest != BROADCAST_ADDR {
        return Err(FrameError::NotAddressedToUs);
    }

    let mut payload_vec = Vec::new();
    payload_vec
        .extend_from_slice(payload)
        .map_err(|()| FrameError::PayloadTooLarge)?;

    Ok(Message {
        msg_type,
        src,
        payload: payload_vec,
    })
}

// ── Streaming deframer ────────────────────────────────────────

/// Reassembles complete frames from a raw UART byte stream.
///
/// Feed bytes one at a time; a complete raw frame (START through
/// checksum, unvalidated) is returned as soon as its final byte
/// arrives.  Bytes between frames that are not the START marker are
/// discarded, which resyncs the stream after line noise.
#[derive(Debug, Clone, Default)]
pub struct Deframer {
    buf: Vec<u8, MAX_FRAME_SIZE>,
}

impl Deframer {
    pub fn new() -> Self {
        Self { buf: Vec::new() }
    }

    /// Push one received byte; returns a raw frame when one completes.
    pub fn push(&mut self, byte: u8) -> Option<Vec<u8, MAX_FRAME_SIZE>> {
        if self.buf.is_empty() && byte != FRAME_START {
            return None; // Inter-frame noise — resync on next START.
        }

        if self.buf.push(byte).is_err() {
            // Declared length was bogus enough to overrun the buffer.
            self.buf.clear();
            return None;
        }

        if self.buf.len() > HEADER_SIZE {
            let length = self.buf[4] as usize;
            let total = if length > MAX_PAYLOAD_SIZE {
                // Oversized declaration can never complete; drop and resync.
                self.buf.clear();
                return None;
            } else {
                HEADER_SIZE + length + 1
            };
            if self.buf.len() == total {
                return Some(core::mem::take(&mut self.buf));
            }
        } else if self.buf.len() == HEADER_SIZE {
            // Zero-payload frames complete one byte after the header.
            let length = self.buf[4] as usize;
            if length > MAX_PAYLOAD_SIZE {
                self.buf.clear();
                return None;
            }
        }

        None
    }

    /// Drop any partially accumulated frame (e.g. after a link reset).
    pub fn reset(&mut self) {
        self.buf.clear();
    }
}
