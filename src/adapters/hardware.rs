//! Hardware adapter: bridges real peripherals to domain port traits.
//!
//! Owns the [`SensorBank`] and both gate servos, exposing them through
//! [`SensorPort`] and [`ActuatorPort`].  On non-espidf targets the
//! underlying drivers run against the simulated registers in
//! [`hw_init`](crate::drivers::hw_init).

use embedded_hal::digital::InputPin;
use embedded_hal::pwm::SetDutyCycle;

use crate::app::ports::{ActuatorPort, SensorPort};
use crate::drivers::gpio::IrInput;
use crate::drivers::hw_init;
use crate::drivers::servo::{LedcPwm, ServoDriver};
use crate::error::ActuatorError;
use crate::fsm::GateId;
use crate::fsm::context::OccupancySnapshot;
use crate::pins;
use crate::sensors::SensorBank;

/// Concrete adapter that combines all hardware behind port traits.
pub struct HardwareAdapter<P, S> {
    sensors: SensorBank<P>,
    entry_servo: ServoDriver<S>,
    exit_servo: ServoDriver<S>,
}

impl<P: InputPin, S: SetDutyCycle> HardwareAdapter<P, S> {
    pub fn new(
        sensors: SensorBank<P>,
        entry_servo: ServoDriver<S>,
        exit_servo: ServoDriver<S>,
    ) -> Self {
        Self {
            sensors,
            entry_servo,
            exit_servo,
        }
    }

    /// Last angle successfully written to `gate`'s servo.
    pub fn commanded_angle(&self, gate: GateId) -> Option<u8> {
        match gate {
            GateId::Entry => self.entry_servo.angle(),
            GateId::Exit => self.exit_servo.angle(),
        }
    }
}

impl HardwareAdapter<IrInput, LedcPwm> {
    /// Wire up the board per [`pins`].  Call after
    /// [`hw_init::init_peripherals`].
    pub fn board() -> Self {
        let sensors = SensorBank::new(
            pins::IR_SLOT_GPIOS.map(IrInput::new),
            IrInput::new(pins::IR_ENTRY_GPIO),
            IrInput::new(pins::IR_BACK_GPIO),
            IrInput::new(pins::IR_EXIT_GPIO),
        );
        Self::new(
            sensors,
            ServoDriver::new(LedcPwm::new(hw_init::LEDC_CH_ENTRY_SERVO)),
            ServoDriver::new(LedcPwm::new(hw_init::LEDC_CH_EXIT_SERVO)),
        )
    }
}

// ── SensorPort implementation ─────────────────────────────────

impl<P: InputPin, S: SetDutyCycle> SensorPort for HardwareAdapter<P, S> {
    fn poll(&mut self) -> OccupancySnapshot {
        self.sensors.poll()
    }

    fn entry_triggered(&mut self) -> bool {
        self.sensors.entry_triggered()
    }

    fn back_triggered(&mut self) -> bool {
        self.sensors.back_triggered()
    }

    fn exit_triggered(&mut self) -> bool {
        self.sensors.exit_triggered()
    }
}

// ── ActuatorPort implementation ───────────────────────────────

impl<P: InputPin, S: SetDutyCycle> ActuatorPort for HardwareAdapter<P, S> {
    fn set_angle(&mut self, gate: GateId, angle: u8) -> Result<(), ActuatorError> {
        match gate {
            GateId::Entry => self.entry_servo.set_angle(angle),
            GateId::Exit => self.exit_servo.set_angle(angle),
        }
    }
}
