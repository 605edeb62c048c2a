//! End-to-end gate scenarios: a vehicle entering, leaving, and being
//! turned away, driven through AppService with mock hardware.

use parkgate::app::events::AppEvent;
use parkgate::config::{GATE_CLOSED_ANGLE, GATE_OPEN_ANGLE};
use parkgate::error::{ActuatorError, Error};
use parkgate::fsm::{GateId, GatePhase, GateState};

use crate::mock_hw::{Rig, back, entry, exit};

fn gate_changes(rig: &Rig, gate: GateId) -> Vec<(GateState, GateState)> {
    rig.sink
        .events
        .iter()
        .filter_map(|e| match e {
            AppEvent::GateChanged { gate: g, from, to } if *g == gate => Some((*from, *to)),
            _ => None,
        })
        .collect()
}

#[test]
fn vehicle_enters_and_gate_recloses() {
    let mut rig = Rig::new();
    rig.hw.occupancy = [true, true, false, false, false];
    rig.hw.calls.clear();

    rig.pulse(entry);
    assert_eq!(rig.hw.calls_for(GateId::Entry), vec![GATE_OPEN_ANGLE]);
    assert_eq!(rig.app.gate_state(GateId::Entry), GateState::Closed);

    rig.run_for(2_000);
    assert_eq!(rig.app.gate_state(GateId::Entry), GateState::Open);

    rig.pulse(back);
    assert_eq!(
        rig.hw.calls_for(GateId::Entry),
        vec![GATE_OPEN_ANGLE, GATE_CLOSED_ANGLE]
    );
    rig.run_for(2_000);
    assert_eq!(rig.app.gate_state(GateId::Entry), GateState::Closed);

    assert_eq!(
        gate_changes(&rig, GateId::Entry),
        vec![
            (GateState::Closed, GateState::Open),
            (GateState::Open, GateState::Closed)
        ]
    );
}

#[test]
fn entry_not_open_before_settle_elapses() {
    let mut rig = Rig::new();
    rig.pulse(entry);
    rig.run_for(1_900);
    assert_eq!(rig.app.gate_state(GateId::Entry), GateState::Closed);
    assert!(matches!(
        rig.app.gate_phase(GateId::Entry),
        GatePhase::Opening { .. }
    ));
}

#[test]
fn full_facility_turns_vehicle_away_once_per_arrival() {
    let mut rig = Rig::new();
    rig.hw.occupancy = [true; 5];
    rig.hw.calls.clear();

    // Vehicle waits at the barrier for three seconds.
    entry(&mut rig.hw.triggers, true);
    rig.run_for(3_000);
    entry(&mut rig.hw.triggers, false);
    rig.run_for(500);

    assert!(rig.hw.calls_for(GateId::Entry).is_empty());
    assert_eq!(rig.app.gate_state(GateId::Entry), GateState::Closed);
    assert_eq!(rig.display.full_notices(), 1);
    assert_eq!(rig.sink.count(|e| *e == AppEvent::FacilityFull), 1);

    // A second arrival raises the notice again.
    rig.pulse(entry);
    assert_eq!(rig.display.full_notices(), 2);
}

#[test]
fn entry_opens_once_a_slot_frees_up() {
    let mut rig = Rig::new();
    rig.hw.occupancy = [true; 5];
    entry(&mut rig.hw.triggers, true);
    rig.run_for(500);
    assert_eq!(
        rig.hw.calls_for(GateId::Entry),
        vec![GATE_CLOSED_ANGLE],
        "only the start-up close"
    );

    rig.hw.occupancy[2] = false;
    rig.tick();
    assert_eq!(
        rig.hw.calls_for(GateId::Entry),
        vec![GATE_CLOSED_ANGLE, GATE_OPEN_ANGLE]
    );
}

#[test]
fn exit_cycle_independent_of_occupancy() {
    for occupancy in [[false; 5], [true; 5]] {
        let mut rig = Rig::new();
        rig.hw.occupancy = occupancy;
        rig.hw.calls.clear();

        rig.pulse(exit);
        assert_eq!(rig.hw.calls_for(GateId::Exit), vec![GATE_OPEN_ANGLE]);

        rig.run_for(4_900);
        assert_eq!(rig.hw.calls_for(GateId::Exit), vec![GATE_OPEN_ANGLE]);

        rig.run_for(100);
        assert_eq!(
            rig.hw.calls_for(GateId::Exit),
            vec![GATE_OPEN_ANGLE, GATE_CLOSED_ANGLE]
        );
        assert_eq!(rig.app.gate_state(GateId::Exit), GateState::Closed);
        assert!(gate_changes(&rig, GateId::Exit).is_empty());
    }
}

#[test]
fn triggers_during_exit_dwell_are_lost() {
    let mut rig = Rig::new();
    rig.hw.calls.clear();

    rig.pulse(exit);
    rig.run_for(1_000);
    rig.pulse(entry);
    rig.run_for(5_000);

    assert!(rig.hw.calls_for(GateId::Entry).is_empty());
    assert_eq!(rig.app.gate_state(GateId::Entry), GateState::Closed);
}

#[test]
fn telemetry_continues_during_dwell() {
    let mut rig = Rig::new();
    rig.pulse(exit);
    let before = rig.link.lines.len();
    rig.run_for(3_000);
    assert_eq!(rig.link.lines.len(), before + 3);
}

#[test]
fn actuator_failure_still_commits_state() {
    let mut rig = Rig::new();
    rig.hw.fail_actuators = true;

    rig.pulse(entry);
    rig.run_for(2_000);
    assert_eq!(rig.app.gate_state(GateId::Entry), GateState::Open);
    assert!(rig.sink.events.contains(&AppEvent::GateActuated {
        gate: GateId::Entry,
        angle: GATE_OPEN_ANGLE
    }));
    assert!(rig.sink.events.contains(&AppEvent::DeviceFault(Error::Actuator(
        ActuatorError::PwmWriteFailed
    ))));
}

#[test]
fn car_waiting_behind_last_free_slot_sees_full_notice() {
    let mut rig = Rig::new();
    rig.hw.occupancy = [true, true, true, true, false];

    // Car A takes the last slot.
    rig.pulse(entry);
    rig.run_for(2_000);
    assert_eq!(rig.app.gate_state(GateId::Entry), GateState::Open);
    rig.hw.occupancy = [true; 5];

    // Car B pulls up while the barrier is still raised, then A clears it.
    entry(&mut rig.hw.triggers, true);
    rig.pulse(back);
    rig.run_for(5_000);

    assert_eq!(rig.app.gate_state(GateId::Entry), GateState::Closed);
    assert_eq!(rig.display.full_notices(), 1);
    assert_eq!(rig.sink.count(|e| *e == AppEvent::FacilityFull), 1);
}
