//! Status display rendering.
//!
//! Layout on the 20×4 character surface:
//!
//! ```text
//! col  0         10        19
//! row0 "   Slots Left: 3    "      (or " Parking Full! " while held)
//! row1 "S1:Fill   S2:Empty  "
//! row2 "S3:Empty  S4:Fill   "
//! row3 "S5:Empty            "
//! ```
//!
//! [`LcdStatusDisplay`] only writes cells whose content changed since the
//! last frame; an I²C character LCD is slow enough that a full redraw every
//! poll would eat most of the loop budget.

use core::fmt::Write as _;

use log::warn;

use crate::app::ports::StatusDisplay;
use crate::config::SLOT_CAPACITY;
use crate::error::{DisplayError, Error};
use crate::fsm::context::OccupancySnapshot;
use crate::slots::FreeSlotCount;

pub const ROWS: u8 = 4;
pub const COLS: u8 = 20;

const FULL_NOTICE: &str = " Parking Full! ";
const SPLASH_TITLE: &str = "    Car Parking  ";
const SPLASH_SUBTITLE: &str = "       System    ";

/// Slot cells: (row, col) for slots 1..=5.
const SLOT_CELLS: [(u8, u8); SLOT_CAPACITY] = [(1, 0), (1, 10), (2, 0), (2, 10), (3, 0)];

type RowText = heapless::String<{ COLS as usize }>;

// ---------------------------------------------------------------------------
// Text sink
// ---------------------------------------------------------------------------

/// Positioned-text surface.  Implemented by the LCD driver and by
/// [`FrameBuffer`].
pub trait TextSink {
    /// Write `text` starting at (`row`, `col`).  Text past the last column
    /// is dropped.
    fn write_at(&mut self, row: u8, col: u8, text: &str) -> Result<(), DisplayError>;

    /// Blank the whole surface.
    fn clear(&mut self) -> Result<(), DisplayError>;
}

/// In-memory 20×4 surface for host builds and tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    cells: [[u8; COLS as usize]; ROWS as usize],
    writes: usize,
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameBuffer {
    pub fn new() -> Self {
        Self {
            cells: [[b' '; COLS as usize]; ROWS as usize],
            writes: 0,
        }
    }

    /// Contents of `row` (always 20 characters).  Empty for an invalid row.
    pub fn row(&self, row: u8) -> &str {
        self.cells
            .get(usize::from(row))
            .and_then(|r| core::str::from_utf8(r).ok())
            .unwrap_or("")
    }

    /// Number of `write_at` calls accepted so far.
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl TextSink for FrameBuffer {
    fn write_at(&mut self, row: u8, col: u8, text: &str) -> Result<(), DisplayError> {
        if row >= ROWS || col >= COLS {
            return Err(DisplayError::OutOfBounds { row, col });
        }
        let line = &mut self.cells[usize::from(row)][usize::from(col)..];
        for (cell, byte) in line.iter_mut().zip(text.bytes()) {
            *cell = if byte.is_ascii() { byte } else { b'?' };
        }
        self.writes += 1;
        Ok(())
    }

    fn clear(&mut self) -> Result<(), DisplayError> {
        self.cells = [[b' '; COLS as usize]; ROWS as usize];
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Status display
// ---------------------------------------------------------------------------

/// Renders facility status onto any [`TextSink`].
///
/// The full notice replaces row 0 and is held for `hold_frames` subsequent
/// frames, during which slot-count updates are not drawn.  Write failures
/// are logged and otherwise ignored.
pub struct LcdStatusDisplay<T: TextSink> {
    sink: T,
    hold_frames: u32,
    notice_frames_left: u32,
    shown_count: Option<FreeSlotCount>,
    shown_slots: [Option<bool>; SLOT_CAPACITY],
}

impl<T: TextSink> LcdStatusDisplay<T> {
    pub fn new(sink: T, hold_frames: u32) -> Self {
        Self {
            sink,
            hold_frames,
            notice_frames_left: 0,
            shown_count: None,
            shown_slots: [None; SLOT_CAPACITY],
        }
    }

    /// Boot banner.  The caller clears it with [`Self::clear`] once the
    /// splash time has passed.
    pub fn show_splash(&mut self) {
        self.write(1, 0, SPLASH_TITLE);
        self.write(2, 0, SPLASH_SUBTITLE);
    }

    /// Blank the surface and forget what was drawn.
    pub fn clear(&mut self) {
        if let Err(e) = self.sink.clear() {
            warn!("clear failed, {}", Error::from(e));
        }
        self.notice_frames_left = 0;
        self.shown_count = None;
        self.shown_slots = [None; SLOT_CAPACITY];
    }

    /// The full notice is currently held on row 0.
    pub fn notice_active(&self) -> bool {
        self.notice_frames_left > 0
    }

    pub fn sink(&self) -> &T {
        &self.sink
    }

    pub fn into_inner(self) -> T {
        self.sink
    }

    fn write(&mut self, row: u8, col: u8, text: &str) {
        if let Err(e) = self.sink.write_at(row, col, text) {
            warn!("write at ({row},{col}) failed, {}", Error::from(e));
        }
    }
}

impl<T: TextSink> StatusDisplay for LcdStatusDisplay<T> {
    fn show_slot_count(&mut self, free: FreeSlotCount) {
        if self.notice_frames_left > 0 {
            self.notice_frames_left -= 1;
            return;
        }
        if self.shown_count == Some(free) {
            return;
        }
        let mut row = RowText::new();
        let fits = write!(row, "   Slots Left: {free}    ");
        debug_assert!(fits.is_ok());
        self.write(0, 0, &row);
        self.shown_count = Some(free);
    }

    fn show_slot_states(&mut self, snapshot: &OccupancySnapshot) {
        for (i, &(row, col)) in SLOT_CELLS.iter().enumerate() {
            let filled = snapshot.is_filled(i);
            if self.shown_slots[i] == Some(filled) {
                continue;
            }
            let mut cell = RowText::new();
            let fits = if filled {
                write!(cell, "S{}:Fill ", i + 1)
            } else {
                write!(cell, "S{}:Empty", i + 1)
            };
            debug_assert!(fits.is_ok());
            self.write(row, col, &cell);
            self.shown_slots[i] = Some(filled);
        }
    }

    fn show_full_notice(&mut self) {
        let mut row = RowText::new();
        let fits = write!(row, "{FULL_NOTICE:<20}");
        debug_assert!(fits.is_ok());
        self.write(0, 0, &row);
        self.notice_frames_left = self.hold_frames;
        // Row 0 must be redrawn once the hold ends.
        self.shown_count = None;
    }
}
