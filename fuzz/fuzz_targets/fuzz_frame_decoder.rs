//! Fuzz target: streaming deframer + frame decoder.
//!
//! Drives arbitrary byte sequences through the [`Deframer`] a byte at a
//! time and decodes whatever it emits, asserting the pipeline never
//! panics and only ever emits well-formed raw frames.
//!
//! cargo fuzz run fuzz_frame_decoder

#![no_main]

use libfuzzer_sys::fuzz_target;
use scoutlink::link::frame::{self, Deframer, FRAME_START, MAX_PAYLOAD_SIZE};

fuzz_target!(|data: &[u8]| {
    let mut deframer = Deframer::new();

    for &byte in data {
        if let Some(raw) = deframer.push(byte) {
            // Emitted frames must be sync-aligned and length-consistent.
            assert_eq!(raw[0], FRAME_START);
            let declared = raw[4] as usize;
            assert!(declared <= MAX_PAYLOAD_SIZE);
            assert_eq!(raw.len(), 5 + declared + 1);

            // Validation may reject the frame but must not panic.
            let _ = frame::decode(&raw, 0x42);
        }
    }

    // After a reset the deframer must accept bytes cleanly again.
    deframer.reset();
    for &byte in data {
        let _ = deframer.push(byte);
    }
});
