//! Gate state machines.
//!
//! Two independent machines, one per barrier, driven from the main loop:
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────┐
//! │  GateController::tick(inputs) -> GateCommands             │
//! │                                                           │
//! │   1. expire deadlines     (entry settle, exit dwell)      │
//! │   2. any gate busy?  ──yes──▶ return, triggers ignored    │
//! │   3. entry rules          (may start a timed phase)       │
//! │   4. any gate busy?  ──yes──▶ return                      │
//! │   5. exit rules                                           │
//! └───────────────────────────────────────────────────────────┘
//! ```
//!
//! Timed moves never block.  A moving gate carries its deadline in its
//! [`GatePhase`], checked on every tick.  While either gate is in a timed
//! phase no trigger input of either gate is observed; triggers arriving in
//! that window are lost.  The tick on which a deadline expires also
//! ignores triggers, so a finishing move and a new one are never commanded
//! in the same poll.
//!
//! Handlers never touch hardware: they write angle requests into
//! [`GateCommands`] which the caller applies afterwards.

pub mod context;
pub mod entry;
pub mod exit;

use core::fmt;

use context::{GateCommands, GateInputs};
use entry::EntryGate;
use exit::ExitGate;
use log::trace;

use crate::config::SystemConfig;

// ---------------------------------------------------------------------------
// Identity and state
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GateId {
    Entry,
    Exit,
}

impl fmt::Display for GateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Entry => write!(f, "entry"),
            Self::Exit => write!(f, "exit"),
        }
    }
}

/// Logical barrier state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    Closed,
    Open,
}

impl fmt::Display for GateState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Closed => write!(f, "CLOSED"),
            Self::Open => write!(f, "OPEN"),
        }
    }
}

/// Physical phase of a barrier, including in-flight moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GatePhase {
    Closed,
    Opening { until_ms: u64 },
    Open,
    Closing { until_ms: u64 },
}

impl GatePhase {
    /// A timed move is in progress.
    pub fn is_busy(self) -> bool {
        matches!(self, Self::Opening { .. } | Self::Closing { .. })
    }
}

// ---------------------------------------------------------------------------
// Controller
// ---------------------------------------------------------------------------

/// Owns both gate machines.  Initial state of both is `Closed`.
pub struct GateController {
    entry: EntryGate,
    exit: ExitGate,
}

impl GateController {
    pub fn new(config: &SystemConfig) -> Self {
        Self {
            entry: EntryGate::new(config),
            exit: ExitGate::new(config),
        }
    }

    /// Advance both machines by one poll.
    pub fn tick(&mut self, inputs: &GateInputs) -> GateCommands {
        let mut cmds = GateCommands::default();

        let entry_expired = self.entry.expire(inputs.now_ms);
        let exit_close = self.exit.expire(inputs.now_ms);
        if let Some(angle) = exit_close {
            cmds.exit_angle = Some(angle);
        }

        if entry_expired || exit_close.is_some() || self.is_busy() {
            trace!("gates busy at {} ms, triggers ignored", inputs.now_ms);
            return cmds;
        }

        self.entry.observe(inputs, &mut cmds);
        if self.is_busy() {
            return cmds;
        }

        self.exit.observe(inputs, &mut cmds);
        cmds
    }

    pub fn state(&self, gate: GateId) -> GateState {
        match gate {
            GateId::Entry => self.entry.state(),
            GateId::Exit => self.exit.state(),
        }
    }

    pub fn phase(&self, gate: GateId) -> GatePhase {
        match gate {
            GateId::Entry => self.entry.phase(),
            GateId::Exit => self.exit.phase(),
        }
    }

    /// Either gate is settling or dwelling.
    pub fn is_busy(&self) -> bool {
        self.entry.phase().is_busy() || self.exit.phase().is_busy()
    }
}
