//! Integration tests for the AppService → display / telemetry pipeline.
//!
//! These run on the host (x86_64) and verify the per-poll orchestration
//! from sensor reads down to display, link and event calls.

use parkgate::app::events::AppEvent;
use parkgate::config::GATE_CLOSED_ANGLE;
use parkgate::display::{FrameBuffer, LcdStatusDisplay};
use parkgate::error::{CommsError, Error};
use parkgate::fsm::GateId;
use parkgate::telemetry::{self, checksum};

use crate::mock_hw::{ActuatorCall, DisplayCall, MockLink, Rig, entry};

#[test]
fn start_closes_both_gates_and_announces() {
    let rig = Rig::new();
    assert_eq!(
        rig.hw.calls,
        vec![
            ActuatorCall {
                gate: GateId::Entry,
                angle: GATE_CLOSED_ANGLE
            },
            ActuatorCall {
                gate: GateId::Exit,
                angle: GATE_CLOSED_ANGLE
            },
        ]
    );
    assert_eq!(rig.sink.events.last(), Some(&AppEvent::Started));
    assert_eq!(rig.app.free_slots().get(), 5);
}

#[test]
fn first_tick_emits_telemetry_immediately() {
    let mut rig = Rig::new();
    rig.hw.occupancy = [true, false, true, false, false];
    rig.tick();

    assert_eq!(rig.link.lines.len(), 1);
    let body = "DATA,3,Fill,Empty,Fill,Empty,Empty";
    assert_eq!(rig.link.lines[0], format!("{body},{}", checksum(body)));

    let decoded = telemetry::decode(&rig.link.lines[0]).unwrap();
    assert_eq!(decoded.free_slots, 3);
}

#[test]
fn telemetry_once_per_interval() {
    let mut rig = Rig::new();
    // 0 ms .. 4950 ms in 50 ms polls.
    rig.run_for(5_000);
    assert_eq!(rig.link.lines.len(), 5);

    rig.tick(); // 5000 ms
    assert_eq!(rig.link.lines.len(), 6);
    assert_eq!(
        rig.sink
            .count(|e| matches!(e, AppEvent::TelemetrySent(_))),
        6
    );
}

#[test]
fn telemetry_reflects_latest_poll() {
    let mut rig = Rig::new();
    rig.tick();
    rig.hw.occupancy = [true; 5];
    rig.run_for(1_000);

    let last = rig.link.lines.last().unwrap();
    assert!(last.starts_with("DATA,0,Fill,Fill,Fill,Fill,Fill,"));
}

#[test]
fn link_failure_drops_line_but_loop_continues() {
    let mut rig = Rig::new();
    rig.link = MockLink {
        fail: true,
        ..MockLink::default()
    };
    rig.run_for(2_000);
    assert!(rig.link.lines.is_empty());
    assert_eq!(
        rig.sink
            .count(|e| matches!(e, AppEvent::TelemetrySent(_))),
        0
    );
    assert_eq!(rig.app.tick_count(), 40);
    assert_eq!(
        rig.sink.count(|e| *e
            == AppEvent::DeviceFault(Error::Comms(CommsError::SerialWriteFailed))),
        2,
        "one fault per due line"
    );

    rig.link.fail = false;
    rig.tick();
    assert_eq!(rig.link.lines.len(), 1);
}

#[test]
fn display_updated_every_poll() {
    let mut rig = Rig::new();
    rig.hw.occupancy = [false, true, false, false, true];
    rig.tick();
    rig.tick();

    assert_eq!(
        rig.display.calls,
        vec![
            DisplayCall::SlotCount(3),
            DisplayCall::SlotStates([false, true, false, false, true]),
            DisplayCall::SlotCount(3),
            DisplayCall::SlotStates([false, true, false, false, true]),
        ]
    );
}

#[test]
fn occupancy_change_reported_only_on_change() {
    let mut rig = Rig::new();
    let changes = |rig: &Rig| {
        rig.sink
            .count(|e| matches!(e, AppEvent::OccupancyChanged { .. }))
    };

    rig.run_for(500);
    assert_eq!(changes(&rig), 1, "first poll always reports");

    rig.hw.occupancy[3] = true;
    rig.run_for(500);
    assert_eq!(changes(&rig), 2);
    assert_eq!(rig.app.free_slots().get(), 4);
    assert_eq!(rig.app.occupancy().map(|o| o.is_filled(3)), Some(true));
}

#[test]
fn lcd_shows_full_notice_then_restores_count() {
    let mut rig = Rig::new();
    let hold = rig.app.config().full_notice_hold_frames();
    let mut lcd = LcdStatusDisplay::new(FrameBuffer::new(), hold);
    rig.hw.occupancy = [true; 5];
    rig.hw.triggers.entry = true;

    let tick = |rig: &mut Rig, lcd: &mut LcdStatusDisplay<FrameBuffer>| {
        rig.app
            .tick(rig.now_ms, &mut rig.hw, lcd, &mut rig.link, &mut rig.sink);
        rig.now_ms += 50;
    };

    tick(&mut rig, &mut lcd);
    assert_eq!(lcd.sink().row(0), " Parking Full!      ");
    assert_eq!(lcd.sink().row(3), "S5:Fill             ");

    entry(&mut rig.hw.triggers, false);
    for _ in 0..hold {
        tick(&mut rig, &mut lcd);
    }
    assert_eq!(lcd.sink().row(0), " Parking Full!      ");

    tick(&mut rig, &mut lcd);
    assert_eq!(lcd.sink().row(0), "   Slots Left: 0    ");
}
