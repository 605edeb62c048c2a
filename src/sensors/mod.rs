//! Sensor subsystem: the IR sensor driver and the aggregating [`SensorBank`].
//!
//! The bank owns all eight inputs (five slot sensors plus the entry, back
//! and exit triggers) and produces an [`OccupancySnapshot`] each poll.

pub mod ir;

use embedded_hal::digital::InputPin;

use crate::app::ports::SensorPort;
use crate::config::SLOT_CAPACITY;
use crate::fsm::context::OccupancySnapshot;
use ir::IrSensor;

const SLOT_LABELS: [&str; SLOT_CAPACITY] = ["slot 1", "slot 2", "slot 3", "slot 4", "slot 5"];

pub struct SensorBank<P> {
    slots: [IrSensor<P>; SLOT_CAPACITY],
    entry: IrSensor<P>,
    back: IrSensor<P>,
    exit: IrSensor<P>,
}

impl<P: InputPin> SensorBank<P> {
    /// `slots` is ordered slot 1 first.
    pub fn new(slots: [P; SLOT_CAPACITY], entry: P, back: P, exit: P) -> Self {
        let mut labels = SLOT_LABELS.into_iter();
        Self {
            slots: slots.map(|pin| IrSensor::new(pin, labels.next().unwrap_or("slot"))),
            entry: IrSensor::new(entry, "entry trigger"),
            back: IrSensor::new(back, "back trigger"),
            exit: IrSensor::new(exit, "exit trigger"),
        }
    }

    /// Read every slot sensor.
    pub fn poll(&mut self) -> OccupancySnapshot {
        let mut filled = [false; SLOT_CAPACITY];
        for (flag, sensor) in filled.iter_mut().zip(self.slots.iter_mut()) {
            *flag = sensor.is_active();
        }
        OccupancySnapshot::new(filled)
    }

    pub fn entry_triggered(&mut self) -> bool {
        self.entry.is_active()
    }

    pub fn back_triggered(&mut self) -> bool {
        self.back.is_active()
    }

    pub fn exit_triggered(&mut self) -> bool {
        self.exit.is_active()
    }
}

impl<P: InputPin> SensorPort for SensorBank<P> {
    fn poll(&mut self) -> OccupancySnapshot {
        SensorBank::poll(self)
    }

    fn entry_triggered(&mut self) -> bool {
        SensorBank::entry_triggered(self)
    }

    fn back_triggered(&mut self) -> bool {
        SensorBank::back_triggered(self)
    }

    fn exit_triggered(&mut self) -> bool {
        SensorBank::exit_triggered(self)
    }
}
