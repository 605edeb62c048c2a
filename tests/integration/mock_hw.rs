//! Mock adapters for integration tests.
//!
//! Records every actuator, display, link and event call so tests can
//! assert on the full history without touching real GPIO/PWM registers.

use parkgate::app::events::AppEvent;
use parkgate::app::ports::{
    ActuatorPort, EventSink, SensorPort, StatusDisplay, TelemetryLink,
};
use parkgate::app::service::AppService;
use parkgate::config::{SLOT_CAPACITY, SystemConfig};
use parkgate::error::{ActuatorError, CommsError};
use parkgate::fsm::GateId;
use parkgate::fsm::context::{OccupancySnapshot, TriggerSnapshot};
use parkgate::slots::FreeSlotCount;

// ── MockHardware ──────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActuatorCall {
    pub gate: GateId,
    pub angle: u8,
}

/// Sensor levels are set directly by the test; `true` = vehicle present.
#[derive(Default)]
pub struct MockHardware {
    pub occupancy: [bool; SLOT_CAPACITY],
    pub triggers: TriggerSnapshot,
    pub calls: Vec<ActuatorCall>,
    pub fail_actuators: bool,
}

#[allow(dead_code)]
impl MockHardware {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls_for(&self, gate: GateId) -> Vec<u8> {
        self.calls
            .iter()
            .filter(|c| c.gate == gate)
            .map(|c| c.angle)
            .collect()
    }
}

impl SensorPort for MockHardware {
    fn poll(&mut self) -> OccupancySnapshot {
        OccupancySnapshot::new(self.occupancy)
    }

    fn entry_triggered(&mut self) -> bool {
        self.triggers.entry
    }

    fn back_triggered(&mut self) -> bool {
        self.triggers.back
    }

    fn exit_triggered(&mut self) -> bool {
        self.triggers.exit
    }
}

impl ActuatorPort for MockHardware {
    fn set_angle(&mut self, gate: GateId, angle: u8) -> Result<(), ActuatorError> {
        self.calls.push(ActuatorCall { gate, angle });
        if self.fail_actuators {
            Err(ActuatorError::PwmWriteFailed)
        } else {
            Ok(())
        }
    }
}

// ── MockDisplay ───────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayCall {
    SlotCount(u8),
    SlotStates([bool; SLOT_CAPACITY]),
    FullNotice,
}

#[derive(Default)]
pub struct MockDisplay {
    pub calls: Vec<DisplayCall>,
}

#[allow(dead_code)]
impl MockDisplay {
    pub fn full_notices(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| **c == DisplayCall::FullNotice)
            .count()
    }
}

impl StatusDisplay for MockDisplay {
    fn show_slot_count(&mut self, free: FreeSlotCount) {
        self.calls.push(DisplayCall::SlotCount(free.get()));
    }

    fn show_slot_states(&mut self, snapshot: &OccupancySnapshot) {
        self.calls.push(DisplayCall::SlotStates(snapshot.as_array()));
    }

    fn show_full_notice(&mut self) {
        self.calls.push(DisplayCall::FullNotice);
    }
}

// ── MockLink ──────────────────────────────────────────────────

#[derive(Default)]
pub struct MockLink {
    pub lines: Vec<String>,
    pub fail: bool,
}

impl TelemetryLink for MockLink {
    fn emit_line(&mut self, line: &str) -> Result<(), CommsError> {
        if self.fail {
            return Err(CommsError::SerialWriteFailed);
        }
        self.lines.push(line.to_owned());
        Ok(())
    }
}

// ── LogSink ───────────────────────────────────────────────────

#[derive(Default)]
pub struct LogSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl LogSink {
    pub fn count(&self, pred: impl Fn(&AppEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }
}

impl EventSink for LogSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}

// ── Rig ───────────────────────────────────────────────────────

/// A started [`AppService`] wired to every mock, with a simulated clock
/// advanced by one poll interval per tick.
pub struct Rig {
    pub app: AppService,
    pub hw: MockHardware,
    pub display: MockDisplay,
    pub link: MockLink,
    pub sink: LogSink,
    pub now_ms: u64,
    poll_ms: u64,
}

#[allow(dead_code)]
impl Rig {
    pub fn new() -> Self {
        Self::with_config(SystemConfig::default())
    }

    pub fn with_config(config: SystemConfig) -> Self {
        let poll_ms = u64::from(config.poll_interval_ms);
        let mut app = AppService::new(config);
        let mut hw = MockHardware::new();
        let mut sink = LogSink::default();
        app.start(&mut hw, &mut sink);
        Self {
            app,
            hw,
            display: MockDisplay::default(),
            link: MockLink::default(),
            sink,
            now_ms: 0,
            poll_ms,
        }
    }

    /// Run one poll at the current time, then advance the clock.
    pub fn tick(&mut self) {
        self.app.tick(
            self.now_ms,
            &mut self.hw,
            &mut self.display,
            &mut self.link,
            &mut self.sink,
        );
        self.now_ms += self.poll_ms;
    }

    /// Poll repeatedly for `ms` of simulated time.
    pub fn run_for(&mut self, ms: u64) {
        for _ in 0..ms / self.poll_ms {
            self.tick();
        }
    }

    /// Assert one trigger for a single poll, then release it.
    pub fn pulse(&mut self, set: impl Fn(&mut TriggerSnapshot, bool)) {
        set(&mut self.hw.triggers, true);
        self.tick();
        set(&mut self.hw.triggers, false);
    }
}

pub fn entry(t: &mut TriggerSnapshot, on: bool) {
    t.entry = on;
}

pub fn back(t: &mut TriggerSnapshot, on: bool) {
    t.back = on;
}

pub fn exit(t: &mut TriggerSnapshot, on: bool) {
    t.exit = on;
}
