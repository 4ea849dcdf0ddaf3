//! Replay adapters → InboundQueue → TrackerService → sink.
//!
//! Exercises the same wiring as the host binary, with the processing
//! loop driven by `process_pending` once the scripts have finished.

use std::time::Duration;

use crate::mock_sink::RecordingSink;

use tracker::adapters::replay_gnss::{GnssItem, ReplayGnss};
use tracker::adapters::replay_modem::ReplayModem;
use tracker::app::events::Report;
use tracker::app::ports::{ModemPort, PositioningPort};
use tracker::app::service::TrackerService;
use tracker::classify::modem::SimState;
use tracker::classify::{DrivingEvent, Severity};
use tracker::config::TrackerConfig;
use tracker::error::InitError;
use tracker::events::{INBOUND_DEPTH, InboundQueue};
use tracker::geo::FenceId;
use tracker::geofence::{Edge, FenceState};

const TICK: Duration = Duration::from_millis(1);

fn leaked_queue() -> &'static InboundQueue {
    Box::leak(Box::new(InboundQueue::new()))
}

fn home(config: &TrackerConfig) -> (f64, f64) {
    (config.fences[0].lat, config.fences[0].lng)
}

#[test]
fn round_trip_enters_and_exits_home() {
    let config = TrackerConfig::default();
    let queue = leaked_queue();
    let (lat, lng) = home(&config);

    let mut gnss = ReplayGnss::new(ReplayGnss::round_trip(lat, lng), TICK);
    gnss.start(&config.gnss, queue).expect("gnss start");
    gnss.join();

    let mut svc = TrackerService::new(&config).expect("valid config");
    let mut sink = RecordingSink::new();
    let handled = svc.process_pending(queue, &mut sink);

    // The raw sentence is held back at the queue by the default verbosity.
    assert_eq!(handled, ReplayGnss::round_trip(lat, lng).len() - 1);
    assert_eq!(sink.edges(), vec![Edge::Entered, Edge::Exited]);
    assert_eq!(svc.fence_state(FenceId(0)), Some(FenceState::Outside));
    assert!(sink.reports.contains(&Report::Driving(DrivingEvent::HarshBrake)));
    assert!(!sink.reports.iter().any(|r| matches!(r, Report::Sentence(_))));
}

#[test]
fn boot_sequence_updates_modem_status() {
    let config = TrackerConfig::default();
    let queue = leaked_queue();

    let mut modem = ReplayModem::new(ReplayModem::boot_sequence(), TICK);
    modem.start(&config.modem, queue).expect("modem start");
    modem.join();

    let mut svc = TrackerService::new(&config).expect("valid config");
    let mut sink = RecordingSink::new();
    svc.process_pending(queue, &mut sink);

    let status = svc.modem_status();
    assert!(svc.sms_ready());
    assert_eq!(status.sim, Some(SimState::Ready));
    assert_eq!(status.network, Some(1));
    assert_eq!(status.battery_mv, Some(4012));

    let lines = sink.lines();
    assert!(lines.contains(&"SMS: New SMS (3)".to_string()), "{lines:?}");
    assert!(lines.contains(&"Incoming voice call from: +911234567890".to_string()));
}

#[test]
fn debug_verbosity_passes_sentences() {
    let config = TrackerConfig {
        verbosity: Severity::Debug,
        ..TrackerConfig::default()
    };
    let queue = leaked_queue();
    queue.set_verbosity(config.verbosity);
    let script = vec![GnssItem::Sentence("$GPGSA,A,3,04,05,,09,12,,,24,,,,,2.5,1.3,2.1*39".into())];

    let mut gnss = ReplayGnss::new(script, TICK);
    gnss.start(&config.gnss, queue).expect("gnss start");
    gnss.join();

    let mut svc = TrackerService::new(&config).expect("valid config");
    let mut sink = RecordingSink::new();
    svc.process_pending(queue, &mut sink);

    assert_eq!(
        sink.lines(),
        vec!["$GPGSA,A,3,04,05,,09,12,,,24,,,,,2.5,1.3,2.1*39".to_string()]
    );
}

#[test]
fn overflowing_script_drops_excess() {
    let config = TrackerConfig::default();
    let queue = leaked_queue();
    let script = vec![GnssItem::Driving(0); INBOUND_DEPTH + 5];

    let mut gnss = ReplayGnss::new(script, Duration::ZERO);
    gnss.start(&config.gnss, queue).expect("gnss start");
    gnss.join();

    assert_eq!(queue.len(), INBOUND_DEPTH);
}

#[test]
fn modem_start_rejects_missing_port() {
    let mut config = TrackerConfig::default();
    config.modem.port.clear();
    let mut modem = ReplayModem::new(Vec::new(), TICK);
    assert_eq!(
        modem.start(&config.modem, leaked_queue()),
        Err(InitError::PortUnavailable("modem"))
    );
}

#[test]
fn suppressed_sentences_do_not_crowd_out_fixes() {
    let config = TrackerConfig::default();
    let queue = leaked_queue();
    queue.set_verbosity(config.verbosity);
    let (lat, lng) = home(&config);

    let mut script = vec![GnssItem::Sentence("$GPGSV,1,1,00*79".into()); INBOUND_DEPTH * 2];
    script.push(GnssItem::Fix { lat, lng });

    let mut gnss = ReplayGnss::new(script, Duration::ZERO);
    gnss.start(&config.gnss, queue).expect("gnss start");
    gnss.join();

    let mut svc = TrackerService::new(&config).expect("valid config");
    let mut sink = RecordingSink::new();
    assert_eq!(svc.process_pending(queue, &mut sink), 1);
    assert_eq!(sink.edges(), vec![Edge::Entered]);
}
