//! Port traits — the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Positioning subsystem ──▶ PositioningPort ──┐
//!                                               ├──▶ InboundQueue ──▶ TrackerService ──▶ ReportSink
//!   Radio subsystem ────────▶ ModemPort ────────┘
//! ```
//!
//! The two subsystem ports are *driving* adapters: once started they push
//! [`Inbound`](crate::events::Inbound) items into the shared queue from
//! whatever thread their vendor callbacks run on.  The report sink is a
//! *driven* adapter that the service calls synchronously.

use crate::config::{GnssConfig, ModemConfig};
use crate::error::InitError;
use crate::events::InboundQueue;

use super::events::Report;

// ───────────────────────────────────────────────────────────────
// Report sink (driven adapter: domain → logging / upload)
// ───────────────────────────────────────────────────────────────

/// Consumer of structured reports.  Fire-and-forget: there is no
/// acknowledgement and no backpressure.
pub trait ReportSink {
    fn emit(&mut self, report: &Report);
}

// ───────────────────────────────────────────────────────────────
// Positioning subsystem (driving adapter: GNSS → domain)
// ───────────────────────────────────────────────────────────────

/// Brings up the positioning subsystem and registers its fix, event and
/// sentence callbacks against `queue`.
pub trait PositioningPort {
    /// Failure is fatal to the host process.
    fn start(&mut self, config: &GnssConfig, queue: &'static InboundQueue)
    -> Result<(), InitError>;
}

// ───────────────────────────────────────────────────────────────
// Radio subsystem (driving adapter: modem → domain)
// ───────────────────────────────────────────────────────────────

/// Brings up the modem and registers its URC callback against `queue`.
pub trait ModemPort {
    fn start(&mut self, config: &ModemConfig, queue: &'static InboundQueue)
    -> Result<(), InitError>;
}
