//! Entry barrier.
//!
//! ```text
//!  CLOSED ──[entry ∧ free>0]──▶ Opening ──[settle]──▶ OPEN
//!    ▲                                                 │
//!    └────────[settle]──── Closing ◀──────[back]───────┘
//! ```
//!
//! The logical state only flips once the settle deadline has passed, so
//! `Opening` still reports `Closed` and `Closing` still reports `Open`.
//! An entry request while the facility is full leaves the gate closed and
//! raises the full notice once per rising edge of the entry trigger.

use log::info;

use super::context::{GateCommands, GateInputs};
use super::{GatePhase, GateState};
use crate::config::SystemConfig;

pub struct EntryGate {
    phase: GatePhase,
    closed_angle: u8,
    open_angle: u8,
    settle_ms: u64,
    /// Entry trigger level at the last observation in `Closed`.  Reset
    /// whenever the gate is elsewhere, so a vehicle already waiting when
    /// the gate closes counts as a fresh arrival.
    last_entry_level: bool,
}

impl EntryGate {
    pub fn new(config: &SystemConfig) -> Self {
        Self {
            phase: GatePhase::Closed,
            closed_angle: config.entry_closed_angle,
            open_angle: config.entry_open_angle,
            settle_ms: u64::from(config.entry_settle_ms),
            last_entry_level: false,
        }
    }

    pub fn phase(&self) -> GatePhase {
        self.phase
    }

    pub fn state(&self) -> GateState {
        match self.phase {
            GatePhase::Closed | GatePhase::Opening { .. } => GateState::Closed,
            GatePhase::Open | GatePhase::Closing { .. } => GateState::Open,
        }
    }

    /// Commit a pending move whose settle deadline has passed.
    /// Returns `true` if the phase changed.
    pub(super) fn expire(&mut self, now_ms: u64) -> bool {
        match self.phase {
            GatePhase::Opening { until_ms } if now_ms >= until_ms => {
                info!("Entry gate: Opening -> Open");
                self.phase = GatePhase::Open;
                true
            }
            GatePhase::Closing { until_ms } if now_ms >= until_ms => {
                info!("Entry gate: Closing -> Closed");
                self.phase = GatePhase::Closed;
                true
            }
            _ => false,
        }
    }

    /// Evaluate the trigger rules for one poll.  Only called while no gate
    /// is in a timed phase.
    pub(super) fn observe(&mut self, inputs: &GateInputs, cmds: &mut GateCommands) {
        let triggers = inputs.triggers;
        let rising = triggers.entry && !self.last_entry_level;
        self.last_entry_level = self.phase == GatePhase::Closed && triggers.entry;

        match self.phase {
            GatePhase::Closed if triggers.entry => {
                if inputs.free_slots.is_full() {
                    if rising {
                        info!("Entry gate: request refused, facility full");
                        cmds.full_notice = true;
                    }
                    return;
                }
                info!(
                    "Entry gate: Closed -> Opening ({} slots free)",
                    inputs.free_slots
                );
                cmds.entry_angle = Some(self.open_angle);
                self.phase = GatePhase::Opening {
                    until_ms: inputs.now_ms.saturating_add(self.settle_ms),
                };
            }
            GatePhase::Open if triggers.back => {
                info!("Entry gate: Open -> Closing");
                cmds.entry_angle = Some(self.closed_angle);
                self.phase = GatePhase::Closing {
                    until_ms: inputs.now_ms.saturating_add(self.settle_ms),
                };
            }
            _ => {}
        }
    }
}
