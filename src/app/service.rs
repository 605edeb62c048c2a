//! Application service: the hexagonal core.
//!
//! [`AppService`] owns the gate controller, the telemetry emitter and the
//! last occupancy reading.  It exposes a clean, hardware-agnostic API.  All
//! I/O flows through port traits injected at call sites, making the entire
//! service testable with mock adapters.
//!
//! ```text
//!  SensorPort ──▶ ┌──────────────────────────┐ ──▶ EventSink
//!                 │        AppService        │ ──▶ StatusDisplay
//! ActuatorPort ◀──│  slots · gates · telem   │ ──▶ TelemetryLink
//!                 └──────────────────────────┘
//! ```

use log::{debug, info, warn};

use crate::config::SystemConfig;
use crate::error::Error;
use crate::fsm::context::{GateInputs, OccupancySnapshot};
use crate::fsm::{GateController, GateId, GatePhase, GateState};
use crate::slots::{self, FreeSlotCount};
use crate::telemetry::TelemetryEmitter;

use super::events::AppEvent;
use super::ports::{ActuatorPort, EventSink, SensorPort, StatusDisplay, TelemetryLink};

// ───────────────────────────────────────────────────────────────
// AppService
// ───────────────────────────────────────────────────────────────

/// The application service orchestrates all domain logic.
pub struct AppService {
    config: SystemConfig,
    gates: GateController,
    telemetry: TelemetryEmitter,
    /// Occupancy from the most recent poll; `None` before the first tick.
    occupancy: Option<OccupancySnapshot>,
    tick_count: u64,
}

impl AppService {
    /// Construct the service from configuration.  Both gates start closed.
    pub fn new(config: SystemConfig) -> Self {
        let gates = GateController::new(&config);
        let telemetry = TelemetryEmitter::new(config.telemetry_interval_ms);
        Self {
            config,
            gates,
            telemetry,
            occupancy: None,
            tick_count: 0,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Command both barriers to their closed angle and announce start-up.
    pub fn start(&mut self, hw: &mut impl ActuatorPort, sink: &mut impl EventSink) {
        for (gate, angle) in [
            (GateId::Entry, self.config.entry_closed_angle),
            (GateId::Exit, self.config.exit_closed_angle),
        ] {
            Self::actuate(hw, sink, gate, angle);
        }
        sink.emit(&AppEvent::Started);
        info!("AppService started, both gates closed");
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// Run one poll cycle: sensors → slot count → display → gates →
    /// actuators → telemetry.
    ///
    /// The `hw` parameter satisfies **both** [`SensorPort`] and
    /// [`ActuatorPort`]; this avoids a double mutable borrow while
    /// keeping the port boundary explicit.
    pub fn tick(
        &mut self,
        now_ms: u64,
        hw: &mut (impl SensorPort + ActuatorPort),
        display: &mut impl StatusDisplay,
        link: &mut impl TelemetryLink,
        sink: &mut impl EventSink,
    ) {
        self.tick_count += 1;

        // 1. Occupancy and free slots
        let occupancy = hw.poll();
        let free_slots = slots::count(&occupancy);
        if self.occupancy != Some(occupancy) {
            debug!("occupancy {:?}, {} free", occupancy.as_array(), free_slots);
            sink.emit(&AppEvent::OccupancyChanged {
                free_slots,
                occupancy,
            });
        }
        self.occupancy = Some(occupancy);

        // 2. Display
        display.show_slot_count(free_slots);
        display.show_slot_states(&occupancy);

        // 3. Gate machines
        let prev_entry = self.gates.state(GateId::Entry);
        let prev_exit = self.gates.state(GateId::Exit);
        let triggers = hw.read_triggers();
        let cmds = self.gates.tick(&GateInputs {
            now_ms,
            triggers,
            free_slots,
        });

        // 4. Apply commands
        if let Some(angle) = cmds.entry_angle {
            Self::actuate(hw, sink, GateId::Entry, angle);
        }
        if let Some(angle) = cmds.exit_angle {
            Self::actuate(hw, sink, GateId::Exit, angle);
        }
        if cmds.full_notice {
            display.show_full_notice();
            sink.emit(&AppEvent::FacilityFull);
        }

        // 5. Logical state changes
        for (gate, from) in [(GateId::Entry, prev_entry), (GateId::Exit, prev_exit)] {
            let to = self.gates.state(gate);
            if to != from {
                sink.emit(&AppEvent::GateChanged { gate, from, to });
            }
        }

        // 6. Telemetry
        if let Some(frame) = self.telemetry.maybe_emit(now_ms, &occupancy, free_slots) {
            match link.emit_line(&frame.encode()) {
                Ok(()) => sink.emit(&AppEvent::TelemetrySent(frame)),
                Err(e) => {
                    let err = Error::from(e);
                    warn!("Telemetry line dropped: {err}");
                    sink.emit(&AppEvent::DeviceFault(err));
                }
            }
        }
    }

    // ── Queries ───────────────────────────────────────────────

    /// Free slots at the last poll (full capacity before the first tick).
    pub fn free_slots(&self) -> FreeSlotCount {
        slots::count(&self.occupancy.unwrap_or_default())
    }

    pub fn occupancy(&self) -> Option<OccupancySnapshot> {
        self.occupancy
    }

    pub fn gate_state(&self, gate: GateId) -> GateState {
        self.gates.state(gate)
    }

    pub fn gate_phase(&self, gate: GateId) -> GatePhase {
        self.gates.phase(gate)
    }

    /// Total poll cycles executed since startup.
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn config(&self) -> &SystemConfig {
        &self.config
    }

    // ── Internal ──────────────────────────────────────────────

    /// Issue one servo command.  A failed write is reported as a
    /// [`AppEvent::DeviceFault`]; the gate state is not rolled back.
    fn actuate(
        hw: &mut impl ActuatorPort,
        sink: &mut impl EventSink,
        gate: GateId,
        angle: u8,
    ) {
        if let Err(e) = hw.set_angle(gate, angle) {
            let err = Error::from(e);
            warn!("{gate} gate command {angle}\u{00b0} failed: {err}");
            sink.emit(&AppEvent::DeviceFault(err));
        }
        sink.emit(&AppEvent::GateActuated { gate, angle });
    }
}
