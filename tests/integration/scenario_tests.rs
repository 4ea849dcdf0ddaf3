//! End-to-end scenarios through `TrackerService`.
//!
//! Fence: center (28.620198, 77.211730), radius 1000 m.

use crate::mock_sink::RecordingSink;

use tracker::app::events::Report;
use tracker::app::service::TrackerService;
use tracker::classify::modem::{SimState, SysInitState, UrcKind};
use tracker::classify::{ModemMessage, Severity, Urc, UrcParam};
use tracker::config::TrackerConfig;
use tracker::events::{Fix, Inbound};
use tracker::geofence::{Edge, FenceInit};

const CENTER: (f64, f64) = (28.620_198, 77.211_730);

/// Roughly one metre of latitude, in degrees.
const METRE: f64 = 1.0 / 111_195.0;

fn inside() -> Fix {
    Fix {
        lat: CENTER.0 + 10.0 * METRE,
        lng: CENTER.1,
    }
}

fn outside() -> Fix {
    Fix {
        lat: CENTER.0 + 5_000.0 * METRE,
        lng: CENTER.1,
    }
}

fn make_service(fence_init: FenceInit) -> (TrackerService, RecordingSink) {
    let mut config = TrackerConfig::default();
    config.fences[0].lat = CENTER.0;
    config.fences[0].lng = CENTER.1;
    config.fence_init = fence_init;
    let svc = TrackerService::new(&config).expect("default config is valid");
    (svc, RecordingSink::new())
}

// ── Scenario A: outside → 10 m from center ───────────────────

#[test]
fn scenario_a_single_entry() {
    let (mut svc, mut sink) = make_service(FenceInit::AssumeOutside);

    svc.on_fix(outside(), &mut sink);
    svc.on_fix(inside(), &mut sink);

    assert_eq!(sink.edges(), vec![Edge::Entered]);
    assert_eq!(sink.lines(), vec!["Entered geofence 'home'".to_string()]);
}

// ── Scenario B: in, in, out, out, in ─────────────────────────

#[test]
fn scenario_b_reference_initial_state() {
    let (mut svc, mut sink) = make_service(FenceInit::AssumeOutside);

    for fix in [inside(), inside(), outside(), outside(), inside()] {
        svc.handle(Inbound::Fix(fix), &mut sink);
    }

    assert_eq!(
        sink.edges(),
        vec![Edge::Entered, Edge::Exited, Edge::Entered]
    );
}

#[test]
fn scenario_b_first_fix_initial_state() {
    let (mut svc, mut sink) = make_service(FenceInit::FirstFix);

    for fix in [inside(), inside(), outside(), outside(), inside()] {
        svc.handle(Inbound::Fix(fix), &mut sink);
    }

    assert_eq!(sink.edges(), vec![Edge::Exited, Edge::Entered]);
}

// ── Scenario C: driving events ───────────────────────────────

#[test]
fn scenario_c_driving_event_text() {
    let (mut svc, mut sink) = make_service(FenceInit::AssumeOutside);

    svc.on_driving_event(3, &mut sink);
    svc.on_driving_event(9999, &mut sink);

    let lines = sink.lines();
    assert_eq!(lines[0], "Harsh braking");
    assert!(lines[1].contains("9999"), "got {:?}", lines[1]);
}

// ── Scenario D: SIM state severities ─────────────────────────

#[test]
fn scenario_d_sim_state_severity() {
    let (mut svc, mut sink) = make_service(FenceInit::AssumeOutside);
    let sim = UrcKind::SimCardState.code();

    svc.handle(
        Inbound::Urc(Urc::decode(sim, UrcParam::Value(0))),
        &mut sink,
    );
    svc.handle(
        Inbound::Urc(Urc::decode(sim, UrcParam::Value(1))),
        &mut sink,
    );

    assert_eq!(
        sink.reports,
        vec![
            Report::Modem(ModemMessage::SimNotInserted),
            Report::Modem(ModemMessage::SimReady),
        ]
    );
    assert_eq!(sink.reports[0].severity(), Severity::Alert);
    assert_eq!(sink.reports[1].severity(), Severity::Info);
    assert_ne!(sink.lines()[0], sink.lines()[1]);
    assert_eq!(svc.modem_status().sim, Some(SimState::Ready));
}

// ── Scenario E: SMS readiness ────────────────────────────────

#[test]
fn scenario_e_sms_ready_flag() {
    let (mut svc, mut sink) = make_service(FenceInit::AssumeOutside);
    let init = UrcKind::SysInitState.code();

    for raw in [0, 1, 2, 42] {
        svc.on_urc(&Urc::decode(init, UrcParam::Value(raw)), &mut sink);
        assert!(!svc.sms_ready(), "value {raw} must not set the flag");
    }

    svc.on_urc(&Urc::SysInitState(SysInitState::SmsReady), &mut sink);
    assert!(svc.sms_ready());

    svc.on_urc(&Urc::decode(init, UrcParam::Value(0)), &mut sink);
    assert!(svc.sms_ready(), "later init states leave the flag set");
    assert!(sink.reports.is_empty());
}

// ── Verbosity gate ───────────────────────────────────────────

#[test]
fn sentences_only_at_debug_verbosity() {
    let line = "$GPGGA,092750.000,5321.6802,N,00630.3372,W,1,8,1.03,61.7,M,55.2,M,,*76";

    let (mut svc, mut sink) = make_service(FenceInit::AssumeOutside);
    svc.on_sentence(line, &mut sink);
    assert!(sink.reports.is_empty());

    let config = TrackerConfig {
        verbosity: Severity::Debug,
        ..TrackerConfig::default()
    };
    let mut svc = TrackerService::new(&config).expect("valid config");
    svc.on_sentence(line, &mut sink);
    assert_eq!(sink.lines(), vec![line.to_string()]);
}

#[test]
fn incoming_call_reports_caller() {
    let (mut svc, mut sink) = make_service(FenceInit::AssumeOutside);
    let call = UrcKind::IncomingCall.code();

    svc.on_urc(
        &Urc::decode(call, UrcParam::Call(tracker::classify::modem::CallInfo::new("+4915112345678"))),
        &mut sink,
    );
    svc.on_urc(&Urc::decode(call, UrcParam::Value(0)), &mut sink);

    let lines = sink.lines();
    assert_eq!(lines[0], "Incoming voice call from: +4915112345678");
    assert_eq!(lines[1], "Incoming voice call from: unknown");
}
