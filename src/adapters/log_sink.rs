//! Log-based report sink adapter.
//!
//! Implements [`ReportSink`] by writing every report to the `log` facade,
//! which goes to UART on the device and to stderr on the host.  An upload
//! adapter would implement the same trait.

use log::{Level, log};

use crate::app::events::Report;
use crate::app::ports::ReportSink;
use crate::classify::Severity;

/// Adapter that logs every [`Report`] to the console.
#[derive(Debug, Default)]
pub struct LogReportSink {
    emitted: u64,
}

impl LogReportSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reports written so far.
    pub fn emitted(&self) -> u64 {
        self.emitted
    }
}

/// Log level for a report severity.
pub fn level_for(severity: Severity) -> Level {
    match severity {
        Severity::Alert => Level::Warn,
        Severity::Notice | Severity::Info => Level::Info,
        Severity::Debug => Level::Debug,
    }
}

fn tag(report: &Report) -> &'static str {
    match report {
        Report::Started { .. } => "START",
        Report::Geofence(_) => "FENCE",
        Report::Driving(_) => "DRIVE",
        Report::Modem(_) => "MODEM",
        Report::Sentence(_) => "NMEA ",
    }
}

impl ReportSink for LogReportSink {
    fn emit(&mut self, report: &Report) {
        self.emitted += 1;
        log!(level_for(report.severity()), "{} | {}", tag(report), report);
    }
}
