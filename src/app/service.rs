//! Application service — the hexagonal core.
//!
//! [`TrackerService`] owns the geofence engine and the modem status
//! snapshot.  It consumes [`Inbound`] items one at a time and turns them
//! into [`Report`]s for the injected [`ReportSink`].
//!
//! ```text
//!                 ┌──────────────────────────────┐
//!  InboundQueue ─▶│        TrackerService        │──▶ ReportSink
//!                 │  Geofence · Classify · Gate  │
//!                 └──────────────────────────────┘
//! ```
//!
//! Every report passes through a verbosity gate: a report whose
//! [`Severity`] is less urgent than the configured verbosity is dropped.

use log::{debug, info, warn};

use crate::classify::{DrivingEvent, ModemAction, Severity, Urc, classify_urc};
use crate::config::TrackerConfig;
use crate::error::Error;
use crate::events::{Fix, Inbound, InboundQueue};
use crate::geo::FenceId;
use crate::geofence::{FenceState, GeofenceEngine};

use super::events::{ModemStatus, Report};
use super::ports::ReportSink;

// ───────────────────────────────────────────────────────────────
// TrackerService
// ───────────────────────────────────────────────────────────────

/// Routes subsystem notifications to the report sink.
pub struct TrackerService {
    geofence: GeofenceEngine,
    modem: ModemStatus,
    verbosity: Severity,
    dropped_fixes: u32,
}

impl TrackerService {
    /// Build the service from a validated configuration.
    pub fn new(config: &TrackerConfig) -> Result<Self, Error> {
        config.validate()?;
        let fences = config.fences()?;
        Ok(Self {
            geofence: GeofenceEngine::new(fences, config.fence_init),
            modem: ModemStatus::default(),
            verbosity: config.verbosity,
            dropped_fixes: 0,
        })
    }

    // ── Lifecycle ─────────────────────────────────────────────

    pub fn start(&mut self, sink: &mut impl ReportSink) {
        info!(
            "TrackerService started: {} fence(s), verbosity={:?}",
            self.geofence.len(),
            self.verbosity
        );
        self.forward(
            &Report::Started {
                fences: self.geofence.len(),
            },
            sink,
        );
    }

    /// Process queued items forever.
    pub async fn run(&mut self, queue: &InboundQueue, sink: &mut impl ReportSink) {
        loop {
            let item = queue.pop().await;
            self.handle(item, sink);
        }
    }

    /// Process every item currently queued.  Returns how many were handled.
    pub fn process_pending(&mut self, queue: &InboundQueue, sink: &mut impl ReportSink) -> usize {
        let mut handled = 0;
        queue.drain(|item| {
            self.handle(item, sink);
            handled += 1;
        });
        handled
    }

    // ── Dispatch ──────────────────────────────────────────────

    pub fn handle(&mut self, item: Inbound, sink: &mut impl ReportSink) {
        match item {
            Inbound::Fix(fix) => self.on_fix(fix, sink),
            Inbound::Driving(code) => self.on_driving_event(code, sink),
            Inbound::Urc(urc) => self.on_urc(&urc, sink),
            Inbound::Sentence(line) => self.on_sentence(line, sink),
        }
    }

    /// Feed a position fix to the geofence engine.
    pub fn on_fix(&mut self, fix: Fix, sink: &mut impl ReportSink) {
        let point = match fix.point() {
            Ok(p) => p,
            Err(e) => {
                self.dropped_fixes = self.dropped_fixes.saturating_add(1);
                warn!("Dropping fix ({}, {}): {}", fix.lat, fix.lng, e);
                return;
            }
        };
        for transition in self.geofence.evaluate(point) {
            self.forward(&Report::Geofence(transition), sink);
        }
    }

    pub fn on_driving_event(&mut self, code: i32, sink: &mut impl ReportSink) {
        let event = DrivingEvent::from_code(code);
        if !event.is_known() {
            debug!("Unrecognised driving event code {}", code);
        }
        self.forward(&Report::Driving(event), sink);
    }

    pub fn on_urc(&mut self, urc: &Urc, sink: &mut impl ReportSink) {
        let classification = classify_urc(urc);
        if let Some(action) = classification.action {
            self.apply(action);
        }
        if let Some(message) = classification.message {
            self.forward(&Report::Modem(message), sink);
        }
    }

    /// Raw diagnostic sentence.  Passed through verbatim when the gate
    /// admits debug output.
    pub fn on_sentence(&mut self, line: impl Into<String>, sink: &mut impl ReportSink) {
        if self.verbosity < Severity::Debug {
            return;
        }
        self.forward(&Report::Sentence(line.into()), sink);
    }

    // ── Queries ───────────────────────────────────────────────

    /// Whether the modem has reported SMS service ready.
    pub fn sms_ready(&self) -> bool {
        self.modem.sms_ready
    }

    pub fn modem_status(&self) -> ModemStatus {
        self.modem
    }

    pub fn fence_state(&self, id: FenceId) -> Option<FenceState> {
        self.geofence.state(id)
    }

    pub fn fence_count(&self) -> usize {
        self.geofence.len()
    }

    /// Fixes discarded because their coordinates were unusable.
    pub fn dropped_fixes(&self) -> u32 {
        self.dropped_fixes
    }

    // ── Internal ──────────────────────────────────────────────

    fn apply(&mut self, action: ModemAction) {
        match action {
            ModemAction::SmsReady => {
                info!("Modem: SMS service ready");
                self.modem.sms_ready = true;
            }
            ModemAction::SimChanged(sim) => self.modem.sim = Some(sim),
            ModemAction::NetworkChanged(n) => self.modem.network = Some(n),
            ModemAction::VoltageSampled(mv) => self.modem.battery_mv = Some(mv),
        }
    }

    fn forward(&self, report: &Report, sink: &mut impl ReportSink) {
        if report.severity() <= self.verbosity {
            sink.emit(report);
        }
    }
}
