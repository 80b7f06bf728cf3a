//! Integration tests for the TesterService → DeviceTest → indicator pipeline.
//!
//! These run on the host (x86_64) and drive the full control-loop body
//! against the behavioural socket model: chips are inserted, pulled, and
//! swapped between ticks the way an operator does at the bench.

use ictester::app::events::AppEvent;
use ictester::app::service::TesterService;
use ictester::config::{ChipFamily, TesterConfig};
use ictester::devices::TestResult;
use ictester::pins::HEX_INVERTER_GATES;
use ictester::stability::STABLE_THRESHOLD;
use ictester::status::{Status, COLOUR_CONTACT_NO_FUNCTION, COLOUR_FUNCTIONING, COLOUR_NO_CONTACT};

use super::mock_socket::{Chip, EventLog, Fault, MockSocket};

fn make_tester(family: ChipFamily, chip: Chip) -> (TesterService, MockSocket, EventLog) {
    let config = TesterConfig { family, ..TesterConfig::default() };
    let mut tester = TesterService::from_config(config).unwrap();
    let mut socket = MockSocket::new(chip);
    let mut log = EventLog::new();
    tester.start(&mut socket, &mut log).unwrap();
    (tester, socket, log)
}

fn tick_n(tester: &mut TesterService, socket: &mut MockSocket, log: &mut EventLog, n: usize) {
    for _ in 0..n {
        tester.tick(socket, log);
    }
}

// ── Start-up ─────────────────────────────────────────────────

#[test]
fn start_shows_no_contact_colour() {
    let (tester, socket, log) = make_tester(ChipFamily::Hc14, Chip::Empty);
    assert_eq!(socket.colours, vec![COLOUR_NO_CONTACT]);
    assert_eq!(tester.status(), Status::NoContact);
    assert!(matches!(
        log.events.first(),
        Some(AppEvent::Started { family: ChipFamily::Hc14, units: 6 })
    ));
}

// ── Healthy insertion ────────────────────────────────────────

#[test]
fn healthy_hc14_goes_green_on_fourth_cycle() {
    let (mut tester, mut socket, mut log) = make_tester(ChipFamily::Hc14, Chip::HexInverter);

    for cycle in 1..=STABLE_THRESHOLD {
        let raw = tester.tick(&mut socket, &mut log);
        assert_eq!(raw, TestResult { contact_detected: true, working_count: 6 });
        assert_eq!(tester.status(), Status::NoContact, "cycle {cycle}");
    }

    tester.tick(&mut socket, &mut log);
    assert_eq!(tester.status(), Status::Functioning);
    assert_eq!(socket.last_colour(), Some(COLOUR_FUNCTIONING));
    assert_eq!(log.status_changes(), 1);
}

#[test]
fn every_family_reaches_functioning() {
    for (family, chip) in [
        (ChipFamily::Hc14, Chip::HexInverter),
        (ChipFamily::Hc04, Chip::HexInverter),
        (ChipFamily::Hc32, Chip::QuadOr),
        (ChipFamily::Hc164, Chip::ShiftRegister),
    ] {
        let (mut tester, mut socket, mut log) = make_tester(family, chip);
        tick_n(&mut tester, &mut socket, &mut log, 4);
        assert_eq!(tester.status(), Status::Functioning, "{family}");
    }
}

#[test]
fn stable_status_is_rewritten_every_cycle() {
    let (mut tester, mut socket, mut log) = make_tester(ChipFamily::Hc04, Chip::HexInverter);
    tick_n(&mut tester, &mut socket, &mut log, 20);

    // Start-up colour, then one green write per forwarded cycle (4..=20).
    assert_eq!(socket.colours.len(), 1 + 17);
    assert_eq!(socket.colours[0], COLOUR_NO_CONTACT);
    assert!(socket.colours[1..].iter().all(|c| *c == COLOUR_FUNCTIONING));
    assert_eq!(log.status_changes(), 1);
}

// ── Empty socket ─────────────────────────────────────────────

#[test]
fn empty_socket_stays_red() {
    let (mut tester, mut socket, mut log) = make_tester(ChipFamily::Hc32, Chip::Empty);
    tick_n(&mut tester, &mut socket, &mut log, 10);
    assert!(tester.filter().is_stable());
    assert_eq!(tester.status(), Status::NoContact);
    assert!(socket.colours.iter().all(|c| *c == COLOUR_NO_CONTACT));
    assert_eq!(log.status_changes(), 0);
}

// ── Faulty / wrong parts ─────────────────────────────────────

#[test]
fn buffer_in_inverter_socket_goes_amber() {
    let (mut tester, mut socket, mut log) = make_tester(ChipFamily::Hc14, Chip::HexBuffer);
    tick_n(&mut tester, &mut socket, &mut log, 4);
    assert_eq!(tester.status(), Status::ContactNoFunction);
    assert_eq!(socket.last_colour(), Some(COLOUR_CONTACT_NO_FUNCTION));
}

#[test]
fn partially_working_part_is_still_functioning() {
    let (mut tester, mut socket, mut log) = make_tester(ChipFamily::Hc14, Chip::HexInverter);
    socket.faults.push(Fault::StuckLow(HEX_INVERTER_GATES[0].output));
    socket.faults.push(Fault::StuckLow(HEX_INVERTER_GATES[5].output));
    tick_n(&mut tester, &mut socket, &mut log, 4);

    assert_eq!(tester.status(), Status::Functioning);
    let t = tester.telemetry();
    assert_eq!(t.last_result.working_count, 4);
    assert_eq!(t.degraded_cycles, 4);
}

// ── Operator handling ────────────────────────────────────────

#[test]
fn insert_then_pull_returns_to_red() {
    let (mut tester, mut socket, mut log) = make_tester(ChipFamily::Hc32, Chip::Empty);
    tick_n(&mut tester, &mut socket, &mut log, 5);

    socket.insert(Chip::QuadOr);
    tick_n(&mut tester, &mut socket, &mut log, 4);
    assert_eq!(tester.status(), Status::Functioning);

    socket.insert(Chip::Empty);
    tick_n(&mut tester, &mut socket, &mut log, 3);
    assert_eq!(tester.status(), Status::Functioning, "still debouncing");
    tester.tick(&mut socket, &mut log);
    assert_eq!(tester.status(), Status::NoContact);

    let mut shown = socket.colours.clone();
    shown.dedup();
    assert_eq!(shown, vec![COLOUR_NO_CONTACT, COLOUR_FUNCTIONING, COLOUR_NO_CONTACT]);
    assert_eq!(tester.telemetry().status_changes, 2);
}

#[test]
fn bouncing_insertion_never_changes_colour() {
    let (mut tester, mut socket, mut log) = make_tester(ChipFamily::Hc04, Chip::Empty);
    for i in 0..12 {
        socket.insert(if i % 2 == 0 { Chip::HexInverter } else { Chip::Empty });
        tester.tick(&mut socket, &mut log);
    }
    assert_eq!(socket.colours, vec![COLOUR_NO_CONTACT]);
    assert_eq!(tester.filter().stable_count(), 0);
}

#[test]
fn interrupted_settling_restarts_the_count() {
    let (mut tester, mut socket, mut log) = make_tester(ChipFamily::Hc04, Chip::HexInverter);
    tick_n(&mut tester, &mut socket, &mut log, 3);

    // One bad contact cycle just before the result would have been accepted.
    socket.insert(Chip::Empty);
    tester.tick(&mut socket, &mut log);
    socket.insert(Chip::HexInverter);

    tick_n(&mut tester, &mut socket, &mut log, 3);
    assert_eq!(tester.status(), Status::NoContact);
    tester.tick(&mut socket, &mut log);
    assert_eq!(tester.status(), Status::Functioning);
}

// ── Events / telemetry ───────────────────────────────────────

#[test]
fn every_tick_emits_a_cycle_report() {
    let (mut tester, mut socket, mut log) = make_tester(ChipFamily::Hc32, Chip::QuadOr);
    tick_n(&mut tester, &mut socket, &mut log, 3);

    let cycles: Vec<u64> = log
        .events
        .iter()
        .filter_map(|e| match e {
            AppEvent::CycleCompleted { cycle, report } => {
                assert_eq!(report.verdicts.len(), 4);
                Some(*cycle)
            }
            _ => None,
        })
        .collect();
    assert_eq!(cycles, vec![1, 2, 3]);
}

#[test]
fn telemetry_serialises_to_json() {
    let config = TesterConfig {
        family: ChipFamily::Hc164,
        telemetry_interval_cycles: 4,
        ..TesterConfig::default()
    };
    let mut tester = TesterService::from_config(config).unwrap();
    let mut socket = MockSocket::new(Chip::ShiftRegister);
    let mut log = EventLog::new();
    tester.start(&mut socket, &mut log).unwrap();
    tick_n(&mut tester, &mut socket, &mut log, 4);

    let telemetry = log
        .events
        .iter()
        .find_map(|e| match e {
            AppEvent::Telemetry(t) => Some(*t),
            _ => None,
        })
        .expect("telemetry after 4 cycles");
    assert_eq!(telemetry.cycles, 4);
    assert_eq!(telemetry.status, Status::Functioning);

    let json = serde_json::to_string(&telemetry).unwrap();
    assert!(json.contains("\"family\":\"Hc164\""));
    assert!(json.contains("\"status\":\"Functioning\""));
}
