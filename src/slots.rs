//! Slot counter.
//!
//! Derives the number of free parking slots from the latest occupancy
//! snapshot.  The count is always recomputed; there is no stored counter
//! that could drift from the sensors.

use core::fmt;

use crate::config::SLOT_CAPACITY;
use crate::fsm::context::OccupancySnapshot;

/// Number of free slots, always in `0..=SLOT_CAPACITY`.
///
/// Only [`count`] constructs this, so it cannot be mutated independently
/// of a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FreeSlotCount(u8);

impl FreeSlotCount {
    pub fn get(self) -> u8 {
        self.0
    }

    /// No slot left for an arriving vehicle.
    pub fn is_full(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for FreeSlotCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// `SLOT_CAPACITY − filled slots`.
pub fn count(snapshot: &OccupancySnapshot) -> FreeSlotCount {
    let filled = snapshot.filled_count().min(SLOT_CAPACITY);
    FreeSlotCount((SLOT_CAPACITY - filled) as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_lot_has_every_slot_free() {
        let free = count(&OccupancySnapshot::default());
        assert_eq!(free.get(), 5);
        assert!(!free.is_full());
    }

    #[test]
    fn full_lot_reports_full() {
        let free = count(&OccupancySnapshot::new([true; SLOT_CAPACITY]));
        assert_eq!(free.get(), 0);
        assert!(free.is_full());
    }

    #[test]
    fn partial_lot() {
        let free = count(&OccupancySnapshot::new([true, false, true, false, false]));
        assert_eq!(free.get(), 3);
        assert_eq!(free.to_string(), "3");
    }

    #[test]
    fn every_snapshot_matches_popcount() {
        for bits in 0u8..32 {
            let filled: [bool; SLOT_CAPACITY] = core::array::from_fn(|i| bits & (1 << i) != 0);
            let free = count(&OccupancySnapshot::new(filled));
            assert_eq!(free.get() as u32, 5 - bits.count_ones());
        }
    }
}
