//! Driving-behaviour events reported by the positioning subsystem.

use core::fmt;

/// Behaviour classification derived upstream from motion data.
///
/// Raw codes follow declaration order, `FirstFix = 0` through
/// `ResponseOk = 12`.  Anything else becomes [`DrivingEvent::Unknown`]
/// carrying the raw value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DrivingEvent {
    FirstFix,
    MotionStart,
    MotionStop,
    HarshBrake,
    OverAcceleration,
    Overspeed,
    SpeedNormal,
    CourseChange,
    HarshTurn,
    NoResponse,
    SignalLost,
    SignalLocked,
    ResponseOk,
    Unknown(i32),
}

impl DrivingEvent {
    /// Every known event, indexed by raw code.
    pub const KNOWN: [DrivingEvent; 13] = [
        Self::FirstFix,
        Self::MotionStart,
        Self::MotionStop,
        Self::HarshBrake,
        Self::OverAcceleration,
        Self::Overspeed,
        Self::SpeedNormal,
        Self::CourseChange,
        Self::HarshTurn,
        Self::NoResponse,
        Self::SignalLost,
        Self::SignalLocked,
        Self::ResponseOk,
    ];

    /// Decode a raw event code.  Total over `i32`.
    pub fn from_code(code: i32) -> Self {
        usize::try_from(code)
            .ok()
            .and_then(|idx| Self::KNOWN.get(idx).copied())
            .unwrap_or(Self::Unknown(code))
    }

    /// Raw code for this event.
    pub fn code(self) -> i32 {
        match self {
            Self::FirstFix => 0,
            Self::MotionStart => 1,
            Self::MotionStop => 2,
            Self::HarshBrake => 3,
            Self::OverAcceleration => 4,
            Self::Overspeed => 5,
            Self::SpeedNormal => 6,
            Self::CourseChange => 7,
            Self::HarshTurn => 8,
            Self::NoResponse => 9,
            Self::SignalLost => 10,
            Self::SignalLocked => 11,
            Self::ResponseOk => 12,
            Self::Unknown(code) => code,
        }
    }

    /// Fixed report text; `None` for unknown codes, whose text embeds the
    /// raw value and is produced by `Display`.
    pub fn description(self) -> Option<&'static str> {
        let text = match self {
            Self::FirstFix => "GPS First fix after power on",
            Self::MotionStart => "Motion start event",
            Self::MotionStop => "Motion stop event",
            Self::HarshBrake => "Harsh braking",
            Self::OverAcceleration => "Harsh Acceleration",
            Self::Overspeed => "Vehicle overspeeding",
            Self::SpeedNormal => "Vehicle Speed back to normal",
            Self::CourseChange => "Course over ground changed",
            Self::HarshTurn => "Harsh turn detected",
            Self::NoResponse => "GPS Not responding",
            Self::SignalLost => "GPS signal lost",
            Self::SignalLocked => "GPS signal restored",
            Self::ResponseOk => "GPS response ok",
            Self::Unknown(_) => return None,
        };
        Some(text)
    }

    pub fn is_known(self) -> bool {
        !matches!(self, Self::Unknown(_))
    }
}

impl fmt::Display for DrivingEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.description() {
            Some(text) => f.write_str(text),
            None => write!(f, "Unknown event {}", self.code()),
        }
    }
}
