//! Fuzz target: fix stream through the geofence engine
//!
//! Interprets the input as a sequence of `(lat, lng)` f64 pairs (NaN and
//! out-of-range values included) and drives them through `TrackerService`.
//! Verifies:
//! - No panics for any coordinate
//! - Edges on the single fence strictly alternate, starting with `Entered`
//!
//! cargo fuzz run fuzz_fix_stream

#![no_main]

use libfuzzer_sys::fuzz_target;
use tracker::app::events::Report;
use tracker::app::ports::ReportSink;
use tracker::app::service::TrackerService;
use tracker::config::TrackerConfig;
use tracker::events::Fix;
use tracker::geofence::Edge;

struct EdgeLog(Vec<Edge>);

impl ReportSink for EdgeLog {
    fn emit(&mut self, report: &Report) {
        if let Report::Geofence(t) = report {
            self.0.push(t.edge);
        }
    }
}

fuzz_target!(|data: &[u8]| {
    let Ok(mut svc) = TrackerService::new(&TrackerConfig::default()) else {
        return;
    };
    let mut sink = EdgeLog(Vec::new());

    for chunk in data.chunks_exact(16) {
        let mut lat = [0u8; 8];
        let mut lng = [0u8; 8];
        lat.copy_from_slice(&chunk[..8]);
        lng.copy_from_slice(&chunk[8..]);
        let fix = Fix {
            lat: f64::from_le_bytes(lat),
            lng: f64::from_le_bytes(lng),
        };
        svc.on_fix(fix, &mut sink);
    }

    let mut expected = Edge::Entered;
    for edge in &sink.0 {
        assert_eq!(*edge, expected);
        expected = match expected {
            Edge::Entered => Edge::Exited,
            Edge::Exited => Edge::Entered,
        };
    }
});
