//! Recording report sink for integration tests.
//!
//! Keeps every emitted report so tests can assert on the full history.

use tracker::app::events::Report;
use tracker::app::ports::ReportSink;
use tracker::geofence::Edge;

#[derive(Default)]
pub struct RecordingSink {
    pub reports: Vec<Report>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Geofence edges only, in emission order.
    pub fn edges(&self) -> Vec<Edge> {
        self.reports
            .iter()
            .filter_map(|r| match r {
                Report::Geofence(t) => Some(t.edge),
                _ => None,
            })
            .collect()
    }

    /// Rendered text of every report.
    pub fn lines(&self) -> Vec<String> {
        self.reports.iter().map(ToString::to_string).collect()
    }

    pub fn clear(&mut self) {
        self.reports.clear();
    }
}

impl ReportSink for RecordingSink {
    fn emit(&mut self, report: &Report) {
        self.reports.push(report.clone());
    }
}
