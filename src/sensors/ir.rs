//! Reflective IR proximity sensor.
//!
//! The module pulls its output low while an object is in range, so a low
//! input means "vehicle present".  No debouncing is applied.
//!
//! A failed read keeps the previous good level.  Before the first good read
//! the sensor reports inactive.

use embedded_hal::digital::{Error as _, InputPin};
use log::{info, warn};

use crate::error::{Error, SensorError};

pub struct IrSensor<P> {
    pin: P,
    label: &'static str,
    last_active: bool,
    failing: bool,
}

impl<P: InputPin> IrSensor<P> {
    pub fn new(pin: P, label: &'static str) -> Self {
        Self {
            pin,
            label,
            last_active: false,
            failing: false,
        }
    }

    /// `true` while the beam detects a vehicle.
    pub fn is_active(&mut self) -> bool {
        match self.pin.is_low() {
            Ok(low) => {
                if self.failing {
                    info!("{}: reads recovered", self.label);
                    self.failing = false;
                }
                self.last_active = low;
                low
            }
            Err(e) => {
                // One warning per failure streak.
                if !self.failing {
                    warn!(
                        "{}: {} ({:?}), holding last level",
                        self.label,
                        Error::from(SensorError::GpioReadFailed),
                        e.kind()
                    );
                    self.failing = true;
                }
                self.last_active
            }
        }
    }

    pub fn label(&self) -> &'static str {
        self.label
    }
}
