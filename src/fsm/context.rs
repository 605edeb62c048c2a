//! Values threaded through every gate handler.
//!
//! Handlers read a [`GateInputs`] captured once per poll cycle and write
//! [`GateCommands`], which the main loop applies to the actuators and the
//! display afterwards.  Handlers never touch hardware directly.

use crate::config::SLOT_CAPACITY;
use crate::slots::FreeSlotCount;

// ---------------------------------------------------------------------------
// Occupancy snapshot (written by the sensor bank once per poll)
// ---------------------------------------------------------------------------

/// Slot-filled flags for every parking slot, slot 1 at index 0.
///
/// Captured once per poll cycle and never modified afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OccupancySnapshot([bool; SLOT_CAPACITY]);

impl OccupancySnapshot {
    pub const fn new(filled: [bool; SLOT_CAPACITY]) -> Self {
        Self(filled)
    }

    /// `true` if `slot` (0-based) holds a vehicle.  Out-of-range slots
    /// read as empty.
    pub fn is_filled(&self, slot: usize) -> bool {
        self.0.get(slot).copied().unwrap_or(false)
    }

    /// Number of filled slots.
    pub fn filled_count(&self) -> usize {
        self.0.iter().filter(|&&f| f).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        self.0.iter().copied()
    }

    pub fn as_array(&self) -> [bool; SLOT_CAPACITY] {
        self.0
    }
}

impl From<[bool; SLOT_CAPACITY]> for OccupancySnapshot {
    fn from(filled: [bool; SLOT_CAPACITY]) -> Self {
        Self(filled)
    }
}

// ---------------------------------------------------------------------------
// Trigger snapshot
// ---------------------------------------------------------------------------

/// Levels of the three gate-threshold sensors in one poll cycle.
/// `true` = vehicle present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TriggerSnapshot {
    /// Vehicle waiting in front of the entry barrier.
    pub entry: bool,
    /// Vehicle past the entry barrier (inside the facility).
    pub back: bool,
    /// Vehicle waiting in front of the exit barrier.
    pub exit: bool,
}

// ---------------------------------------------------------------------------
// Handler inputs / outputs
// ---------------------------------------------------------------------------

/// Everything a gate handler may look at during one tick.
#[derive(Debug, Clone, Copy)]
pub struct GateInputs {
    /// Monotonic time of this poll (ms).
    pub now_ms: u64,
    pub triggers: TriggerSnapshot,
    pub free_slots: FreeSlotCount,
}

/// Commands produced by one controller tick.
/// The main loop applies these after the tick returns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GateCommands {
    /// Angle to command on the entry servo, if it should move.
    pub entry_angle: Option<u8>,
    /// Angle to command on the exit servo, if it should move.
    pub exit_angle: Option<u8>,
    /// Entry was requested while the facility is full.
    pub full_notice: bool,
}

impl GateCommands {
    /// `true` if nothing needs to be applied.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
