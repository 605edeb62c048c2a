//! System configuration parameters
//!
//! All tunable parameters for the ParkGate controller.  Values are
//! compile-time constants; there is no runtime override and nothing is
//! persisted, so a power-cycle always boots with [`SystemConfig::default`].

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Number of parking slots (occupancy sensors) in the facility.
pub const SLOT_CAPACITY: usize = 5;

/// Servo angle for a lowered (closed) barrier.
pub const GATE_CLOSED_ANGLE: u8 = 90;
/// Servo angle for a raised (open) barrier.
pub const GATE_OPEN_ANGLE: u8 = 180;

/// Core system configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemConfig {
    // --- Gate actuators ---
    /// Entry barrier angle when closed (degrees)
    pub entry_closed_angle: u8,
    /// Entry barrier angle when open (degrees)
    pub entry_open_angle: u8,
    /// Exit barrier angle when closed (degrees)
    pub exit_closed_angle: u8,
    /// Exit barrier angle when open (degrees)
    pub exit_open_angle: u8,

    // --- Gate timing ---
    /// Time the entry barrier is held after each move before it is usable (ms)
    pub entry_settle_ms: u32,
    /// Time the exit barrier stays raised before it drops again (ms)
    pub exit_dwell_ms: u32,

    // --- Loop timing ---
    /// Sensor poll / control loop interval (ms)
    pub poll_interval_ms: u32,
    /// Telemetry line interval (ms)
    pub telemetry_interval_ms: u32,

    // --- Display ---
    /// How long the "Parking Full" notice stays on row 0 (ms)
    pub full_notice_hold_ms: u32,
    /// Boot splash duration (ms)
    pub splash_ms: u32,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            // Gate actuators
            entry_closed_angle: GATE_CLOSED_ANGLE,
            entry_open_angle: GATE_OPEN_ANGLE,
            exit_closed_angle: GATE_CLOSED_ANGLE,
            exit_open_angle: GATE_OPEN_ANGLE,

            // Gate timing
            entry_settle_ms: 2_000,
            exit_dwell_ms: 5_000, // full vehicle clearance

            // Loop timing
            poll_interval_ms: 50,        // 20 Hz
            telemetry_interval_ms: 1_000, // 1 Hz

            // Display
            full_notice_hold_ms: 2_000,
            splash_ms: 2_000,
        }
    }
}

impl SystemConfig {
    /// Range-check every field.  Called once at boot before the loop starts.
    pub fn validate(&self) -> Result<()> {
        let angles = [
            self.entry_closed_angle,
            self.entry_open_angle,
            self.exit_closed_angle,
            self.exit_open_angle,
        ];
        if angles.iter().any(|&a| a > 180) {
            return Err(Error::Config("gate angles must be 0–180"));
        }
        if self.entry_closed_angle == self.entry_open_angle
            || self.exit_closed_angle == self.exit_open_angle
        {
            return Err(Error::Config("open and closed angles must differ"));
        }
        if self.entry_settle_ms == 0 || self.exit_dwell_ms == 0 {
            return Err(Error::Config("gate settle/dwell must be non-zero"));
        }
        if self.poll_interval_ms == 0 || self.telemetry_interval_ms == 0 {
            return Err(Error::Config("loop intervals must be non-zero"));
        }
        if self.poll_interval_ms > self.entry_settle_ms {
            return Err(Error::Config("poll interval must not exceed entry settle time"));
        }
        Ok(())
    }

    /// Number of poll frames the full notice is held on the display.
    pub fn full_notice_hold_frames(&self) -> u32 {
        self.full_notice_hold_ms.div_ceil(self.poll_interval_ms.max(1))
    }
}
