//! Exit barrier: a single-shot raise/hold/lower cycle.
//!
//! The barrier is raised on the exit trigger, held for the dwell time and
//! lowered again.  Its logical state never latches `Open`, and occupancy
//! plays no part in the decision.

use log::info;

use super::context::{GateCommands, GateInputs};
use super::{GatePhase, GateState};
use crate::config::SystemConfig;

pub struct ExitGate {
    phase: GatePhase,
    closed_angle: u8,
    open_angle: u8,
    dwell_ms: u64,
}

impl ExitGate {
    pub fn new(config: &SystemConfig) -> Self {
        Self {
            phase: GatePhase::Closed,
            closed_angle: config.exit_closed_angle,
            open_angle: config.exit_open_angle,
            dwell_ms: u64::from(config.exit_dwell_ms),
        }
    }

    /// `Opening { until_ms }` while the barrier is raised for the dwell.
    pub fn phase(&self) -> GatePhase {
        self.phase
    }

    pub fn state(&self) -> GateState {
        GateState::Closed
    }

    /// Lower the barrier once the dwell has elapsed.
    /// Returns the angle to command, if the cycle just finished.
    pub(super) fn expire(&mut self, now_ms: u64) -> Option<u8> {
        match self.phase {
            GatePhase::Opening { until_ms } if now_ms >= until_ms => {
                info!("Exit gate: dwell elapsed, lowering");
                self.phase = GatePhase::Closed;
                Some(self.closed_angle)
            }
            _ => None,
        }
    }

    pub(super) fn observe(&mut self, inputs: &GateInputs, cmds: &mut GateCommands) {
        if self.phase == GatePhase::Closed && inputs.triggers.exit {
            info!("Exit gate: raising for {} ms", self.dwell_ms);
            cmds.exit_angle = Some(self.open_angle);
            self.phase = GatePhase::Opening {
                until_ms: inputs.now_ms.saturating_add(self.dwell_ms),
            };
        }
    }
}
