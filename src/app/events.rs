//! Outbound application events.
//!
//! The [`AppService`](super::service::AppService) emits these through the
//! [`EventSink`](super::ports::EventSink) port.  Adapters on the other
//! side decide what to do with them.

use crate::error::Error;
use crate::fsm::context::OccupancySnapshot;
use crate::fsm::{GateId, GateState};
use crate::slots::FreeSlotCount;
use crate::telemetry::TelemetryFrame;

/// Structured events emitted by the application core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// The service has started; both gates are closed.
    Started,

    /// A slot sensor changed since the previous poll (or the first poll).
    OccupancyChanged {
        free_slots: FreeSlotCount,
        occupancy: OccupancySnapshot,
    },

    /// A servo angle was commanded.
    GateActuated { gate: GateId, angle: u8 },

    /// A gate's logical state flipped.
    GateChanged {
        gate: GateId,
        from: GateState,
        to: GateState,
    },

    /// An entry request was refused because no slot is free.
    FacilityFull,

    /// A telemetry line went out on the link.
    TelemetrySent(TelemetryFrame),

    /// A servo command or telemetry write failed.  The loop carried on.
    DeviceFault(Error),
}
