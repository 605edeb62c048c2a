//! Hobby servo on an LEDC PWM channel.
//!
//! ## Hardware
//!
//! 50 Hz frame (20 ms).  Pulse width maps linearly onto travel:
//! 500 µs = 0°, 2500 µs = 180°.  The barrier arm is mounted so that 90° is
//! lowered and 180° raised.  There is no position feedback.

use embedded_hal::pwm::{self, ErrorKind, ErrorType, SetDutyCycle};
use log::debug;

use super::hw_init;
use crate::error::ActuatorError;

const PERIOD_US: u16 = 20_000;
const MIN_PULSE_US: u16 = 500;
const MAX_PULSE_US: u16 = 2_500;
const MAX_ANGLE: u8 = 180;

/// Pulse width for `angle` degrees.  `angle` must be ≤ 180.
pub fn pulse_width_us(angle: u8) -> u16 {
    let span = u32::from(MAX_PULSE_US - MIN_PULSE_US);
    MIN_PULSE_US + (u32::from(angle) * span / u32::from(MAX_ANGLE)) as u16
}

// ── LEDC channel ─────────────────────────────────────────────

/// ESP-IDF error code from a failed duty write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedcError(pub i32);

impl pwm::Error for LedcError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

/// One LEDC channel configured by [`hw_init::init_peripherals`].
#[derive(Debug)]
pub struct LedcPwm {
    channel: u32,
}

impl LedcPwm {
    pub fn new(channel: u32) -> Self {
        Self { channel }
    }
}

impl ErrorType for LedcPwm {
    type Error = LedcError;
}

impl SetDutyCycle for LedcPwm {
    fn max_duty_cycle(&self) -> u16 {
        hw_init::LEDC_DUTY_MAX
    }

    fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Self::Error> {
        hw_init::ledc_set_duty(self.channel, duty).map_err(LedcError)
    }
}

// ── Servo ────────────────────────────────────────────────────

pub struct ServoDriver<P> {
    pwm: P,
    angle: Option<u8>,
}

impl<P: SetDutyCycle> ServoDriver<P> {
    pub fn new(pwm: P) -> Self {
        Self { pwm, angle: None }
    }

    /// Command an absolute angle (0–180°).
    pub fn set_angle(&mut self, angle: u8) -> Result<(), ActuatorError> {
        if angle > MAX_ANGLE {
            return Err(ActuatorError::AngleOutOfRange(angle));
        }
        let pulse = pulse_width_us(angle);
        self.pwm
            .set_duty_cycle_fraction(pulse, PERIOD_US)
            .map_err(|_| ActuatorError::PwmWriteFailed)?;
        debug!("servo -> {angle}\u{00b0} ({pulse} us)");
        self.angle = Some(angle);
        Ok(())
    }

    /// Last successfully commanded angle.
    pub fn angle(&self) -> Option<u8> {
        self.angle
    }
}
