//! Port traits: the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ AppService (domain)
//! ```
//!
//! Driven adapters (sensors, gate servos, display, serial link, event
//! sinks) implement these traits.  The [`AppService`](super::service::AppService)
//! consumes them via generics, so the domain core never touches hardware
//! directly.

use crate::error::{ActuatorError, CommsError};
use crate::fsm::GateId;
use crate::fsm::context::{OccupancySnapshot, TriggerSnapshot};
use crate::slots::FreeSlotCount;

use super::events::AppEvent;

// ───────────────────────────────────────────────────────────────
// Sensor port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port.  Every read is infallible from the caller's side;
/// adapters hold the last good level on a hardware error.
pub trait SensorPort {
    /// Read all five slot sensors.
    fn poll(&mut self) -> OccupancySnapshot;

    fn entry_triggered(&mut self) -> bool;

    fn back_triggered(&mut self) -> bool;

    fn exit_triggered(&mut self) -> bool;

    /// Read the three gate triggers in one go.
    fn read_triggers(&mut self) -> TriggerSnapshot {
        TriggerSnapshot {
            entry: self.entry_triggered(),
            back: self.back_triggered(),
            exit: self.exit_triggered(),
        }
    }
}

// ───────────────────────────────────────────────────────────────
// Actuator port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port for the two gate barriers.  There is no position
/// feedback; `Ok` only means the command was issued.
pub trait ActuatorPort {
    fn set_angle(&mut self, gate: GateId, angle: u8) -> Result<(), ActuatorError>;
}

// ───────────────────────────────────────────────────────────────
// Status display port
// ───────────────────────────────────────────────────────────────

/// Local operator display.  Called once per poll cycle after the slot
/// count is known; `show_full_notice` only when an entry is refused.
pub trait StatusDisplay {
    fn show_slot_count(&mut self, free: FreeSlotCount);

    fn show_slot_states(&mut self, snapshot: &OccupancySnapshot);

    fn show_full_notice(&mut self);
}

// ───────────────────────────────────────────────────────────────
// Telemetry link port
// ───────────────────────────────────────────────────────────────

/// Line-oriented outbound link.  The implementation appends the line
/// terminator.
pub trait TelemetryLink {
    fn emit_line(&mut self, line: &str) -> Result<(), CommsError>;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`]s through this port.
pub trait EventSink {
    fn emit(&mut self, event: &AppEvent);
}
