//! Event classification — total mappings from the two inbound code spaces
//! to structured reports.
//!
//! | Code space | Raw input        | Typed form                  | Output            |
//! |------------|------------------|-----------------------------|-------------------|
//! | driving    | `i32`            | [`DrivingEvent`]            | report text       |
//! | modem      | `(u32, UrcParam)`| [`Urc`](modem::Urc)         | [`Classification`]|
//!
//! Neither side can fail: codes outside the documented sets decode to an
//! `Unknown` variant, which yields a diagnostic report (driving) or is
//! ignored (modem).

pub mod driving;
pub mod modem;

pub use driving::DrivingEvent;
pub use modem::{Classification, ModemAction, ModemMessage, Urc, UrcParam, classify_urc};

use serde::{Deserialize, Serialize};

/// Importance of a report, most urgent first.
///
/// Also used as the verbosity threshold: a report is forwarded when its
/// severity is `<=` the configured level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Needs operator attention (SIM missing, call failures).
    Alert,
    /// Application-level signal (geofence edges, driving events).
    Notice,
    /// Routine status (SIM ready, voltage).
    Info,
    /// Raw diagnostic pass-through.
    Debug,
}
