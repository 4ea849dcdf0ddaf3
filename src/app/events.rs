//! Outbound application reports.
//!
//! The [`TrackerService`](super::service::TrackerService) emits these through
//! the [`ReportSink`](super::ports::ReportSink) port.  Adapters on the other
//! side decide what to do with them — log to serial, queue for upload, etc.

use core::fmt;

use crate::classify::modem::SimState;
use crate::classify::{DrivingEvent, ModemMessage, Severity};
use crate::geofence::{Edge, FenceTransition};

/// Structured reports emitted by the application core.
#[derive(Debug, Clone, PartialEq)]
pub enum Report {
    /// The service has started (carries the monitored fence count).
    Started { fences: usize },

    /// A fence was entered or exited.
    Geofence(FenceTransition),

    /// Driving-behaviour event from the positioning subsystem.
    Driving(DrivingEvent),

    /// Operator message derived from a modem notification.
    Modem(ModemMessage),

    /// Raw positioning diagnostic sentence, passed through unmodified.
    /// Vendor debug lines have no length bound, so this is heap-owned.
    Sentence(String),
}

impl Report {
    pub fn severity(&self) -> Severity {
        match self {
            Self::Started { .. } => Severity::Info,
            Self::Geofence(_) | Self::Driving(_) => Severity::Notice,
            Self::Modem(msg) => msg.severity(),
            Self::Sentence(_) => Severity::Debug,
        }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Started { fences } => write!(f, "System Ready ({fences} fence(s))"),
            Self::Geofence(t) => match t.edge {
                Edge::Entered => write!(f, "Entered geofence '{}'", t.name),
                Edge::Exited => write!(f, "Exited geofence '{}'", t.name),
            },
            Self::Driving(event) => write!(f, "{event}"),
            Self::Modem(msg) => write!(f, "{msg}"),
            Self::Sentence(line) => f.write_str(line),
        }
    }
}

/// Latest modem status, assembled from classified notifications.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ModemStatus {
    /// SMS service reported usable.
    pub sms_ready: bool,
    pub sim: Option<SimState>,
    pub network: Option<u32>,
    /// Last battery voltage reading (mV).
    pub battery_mv: Option<u32>,
}
