//! Serial status telemetry.
//!
//! ## Wire format
//!
//! One ASCII line per emission, newline-terminated by the link:
//!
//! ```text
//! DATA,<free>,<s1>,<s2>,<s3>,<s4>,<s5>,<checksum>
//! ```
//!
//! `<sN>` is `Fill` or `Empty`.  `<checksum>` is the decimal sum of the
//! byte values of the body `DATA,...,<s5>`, excluding the comma in front
//! of the checksum.  It detects corruption only; it is not authentication.
//!
//! Frames are built in a fixed-capacity [`heapless::String`]; the longest
//! possible frame is well under [`MAX_FRAME_LEN`].

use core::fmt::{self, Write as _};

use crate::config::SLOT_CAPACITY;
use crate::fsm::context::OccupancySnapshot;
use crate::slots::FreeSlotCount;

/// Capacity of one encoded line, without the trailing newline.
pub const MAX_FRAME_LEN: usize = 64;

pub type FrameLine = heapless::String<MAX_FRAME_LEN>;

const TAG: &str = "DATA";
const FILLED: &str = "Fill";
const EMPTY: &str = "Empty";

// ---------------------------------------------------------------------------
// Frame
// ---------------------------------------------------------------------------

/// One status report, built fresh for every emission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TelemetryFrame {
    pub free_slots: FreeSlotCount,
    pub occupancy: OccupancySnapshot,
}

impl TelemetryFrame {
    pub fn new(free_slots: FreeSlotCount, occupancy: OccupancySnapshot) -> Self {
        Self {
            free_slots,
            occupancy,
        }
    }

    /// Everything up to, not including, the checksum field.
    pub fn body(&self) -> FrameLine {
        let mut line = FrameLine::new();
        push(&mut line, format_args!("{TAG},{}", self.free_slots));
        for filled in self.occupancy.iter() {
            push(&mut line, format_args!(",{}", slot_token(filled)));
        }
        line
    }

    /// Full line: body, comma, checksum.
    pub fn encode(&self) -> FrameLine {
        let mut line = self.body();
        let sum = checksum(&line);
        push(&mut line, format_args!(",{sum}"));
        line
    }
}

/// Additive byte sum.
pub fn checksum(body: &str) -> u32 {
    body.bytes().map(u32::from).sum()
}

fn slot_token(filled: bool) -> &'static str {
    if filled { FILLED } else { EMPTY }
}

fn push(line: &mut FrameLine, args: fmt::Arguments<'_>) {
    let written = line.write_fmt(args);
    debug_assert!(written.is_ok(), "telemetry frame exceeds {MAX_FRAME_LEN} bytes");
}

// ---------------------------------------------------------------------------
// Emitter
// ---------------------------------------------------------------------------

/// Decides when a frame is due.  Independent of the poll cadence.
pub struct TelemetryEmitter {
    interval_ms: u64,
    last_emit_ms: Option<u64>,
}

impl TelemetryEmitter {
    pub fn new(interval_ms: u32) -> Self {
        Self {
            interval_ms: u64::from(interval_ms),
            last_emit_ms: None,
        }
    }

    /// Returns a frame on the first call, then at most once per interval
    /// measured from the previous emission.
    pub fn maybe_emit(
        &mut self,
        now_ms: u64,
        snapshot: &OccupancySnapshot,
        free: FreeSlotCount,
    ) -> Option<TelemetryFrame> {
        if let Some(last) = self.last_emit_ms {
            if now_ms.saturating_sub(last) < self.interval_ms {
                return None;
            }
        }
        self.last_emit_ms = Some(now_ms);
        Some(TelemetryFrame::new(free, *snapshot))
    }

    pub fn last_emit_ms(&self) -> Option<u64> {
        self.last_emit_ms
    }
}

// ---------------------------------------------------------------------------
// Receiver side
// ---------------------------------------------------------------------------

/// A verified line as seen by a receiver.
///
/// The free count is taken from the wire as-is; it is not cross-checked
/// against the slot tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodedFrame {
    pub free_slots: u8,
    pub occupancy: OccupancySnapshot,
    pub checksum: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameError {
    /// Not exactly eight comma-separated fields.
    FieldCount(usize),
    /// First field is not `DATA`.
    BadTag,
    /// Free count is not an integer in `0..=5`.
    BadFreeSlots,
    /// Slot token (0-based slot index) is neither `Fill` nor `Empty`.
    BadSlotToken(usize),
    /// Checksum field is not a decimal integer.
    BadChecksum,
    ChecksumMismatch { expected: u32, found: u32 },
}

impl fmt::Display for FrameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FieldCount(n) => write!(f, "expected 8 fields, got {n}"),
            Self::BadTag => write!(f, "missing DATA tag"),
            Self::BadFreeSlots => write!(f, "invalid free-slot count"),
            Self::BadSlotToken(i) => write!(f, "invalid token for slot {}", i + 1),
            Self::BadChecksum => write!(f, "checksum is not a number"),
            Self::ChecksumMismatch { expected, found } => {
                write!(f, "checksum mismatch: computed {expected}, received {found}")
            }
        }
    }
}

impl std::error::Error for FrameError {}

/// Parse and verify one received line.  Surrounding whitespace (including
/// the line terminator) is ignored.
///
/// Numeric fields must be written exactly as the encoder writes them:
/// plain decimal digits, no sign, no leading zeros.  `+3` or `0029` is
/// rejected even though it names the right value.
pub fn decode(line: &str) -> Result<DecodedFrame, FrameError> {
    let line = line.trim();

    let fields = line.split(',').count();
    if fields != SLOT_CAPACITY + 3 {
        return Err(FrameError::FieldCount(fields));
    }

    // Field count checked above, so a comma is present.
    let (body, sum_field) = line.rsplit_once(',').ok_or(FrameError::FieldCount(1))?;

    let mut parts = body.split(',');
    if parts.next() != Some(TAG) {
        return Err(FrameError::BadTag);
    }

    let free_slots = parts
        .next()
        .and_then(canonical_decimal)
        .and_then(|n| u8::try_from(n).ok())
        .filter(|&n| usize::from(n) <= SLOT_CAPACITY)
        .ok_or(FrameError::BadFreeSlots)?;

    let mut filled = [false; SLOT_CAPACITY];
    for (i, (slot, token)) in filled.iter_mut().zip(parts).enumerate() {
        *slot = match token {
            FILLED => true,
            EMPTY => false,
            _ => return Err(FrameError::BadSlotToken(i)),
        };
    }

    let found = canonical_decimal(sum_field).ok_or(FrameError::BadChecksum)?;
    let expected = checksum(body);
    if expected != found {
        return Err(FrameError::ChecksumMismatch { expected, found });
    }

    Ok(DecodedFrame {
        free_slots,
        occupancy: OccupancySnapshot::new(filled),
        checksum: found,
    })
}

/// `field` as written by `u32`'s `Display`, or `None`.
fn canonical_decimal(field: &str) -> Option<u32> {
    let digits_only = !field.is_empty() && field.bytes().all(|b| b.is_ascii_digit());
    if !digits_only || (field.len() > 1 && field.starts_with('0')) {
        return None;
    }
    field.parse().ok()
}
