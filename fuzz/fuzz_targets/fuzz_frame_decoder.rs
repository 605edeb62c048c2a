//! Fuzz target: `telemetry::decode`
//!
//! Drives arbitrary input through the receiver-side line decoder and
//! asserts that it never panics and that every accepted line carries a
//! checksum matching its body, written in canonical decimal, and a free
//! count within capacity.
//!
//! cargo fuzz run fuzz_frame_decoder

#![no_main]

use libfuzzer_sys::fuzz_target;
use parkgate::config::SLOT_CAPACITY;
use parkgate::telemetry::{checksum, decode};

fuzz_target!(|data: &[u8]| {
    let Ok(line) = core::str::from_utf8(data) else {
        return;
    };

    if let Ok(frame) = decode(line) {
        assert!(usize::from(frame.free_slots) <= SLOT_CAPACITY);

        let trimmed = line.trim();
        let (body, sum) = trimmed.rsplit_once(',').expect("accepted line has a checksum field");
        assert_eq!(checksum(body), frame.checksum, "accepted line with wrong checksum");
        assert_eq!(sum, frame.checksum.to_string(), "accepted non-canonical checksum");
        assert!(frame.occupancy.filled_count() <= SLOT_CAPACITY);
    }
});
