//! Application core: pure domain logic, zero I/O.
//!
//! Business rules for the parking controller: slot counting, gate
//! orchestration, display updates and telemetry cadence.  All interaction
//! with hardware happens through **port traits** defined in [`ports`],
//! keeping this layer fully testable without real peripherals.

pub mod events;
pub mod ports;
pub mod service;
