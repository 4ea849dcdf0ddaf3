//! Modem unsolicited result codes (URCs).
//!
//! The radio subsystem delivers `(code, parameter)` pairs whose parameter
//! type depends on the code.  [`Urc::decode`] turns that pair into a typed
//! variant once, at the boundary, so the incoming-call payload arrives as a
//! structured [`CallInfo`] instead of a reinterpreted integer.
//! [`classify_urc`] then maps each variant to an optional operator message
//! and an optional status action.
//!
//! ```text
//!  (code, UrcParam) ──decode──▶ Urc ──classify_urc──▶ Classification
//!                                                      ├─ message: ModemMessage (+ Severity)
//!                                                      └─ action:  ModemAction
//! ```

use core::fmt;

use super::Severity;
use crate::text::truncated;

/// Maximum stored caller number length.
pub const CALLER_ID_LEN: usize = 32;

// ───────────────────────────────────────────────────────────────
// Raw parameter
// ───────────────────────────────────────────────────────────────

/// Caller details attached to an incoming-call notification.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CallInfo {
    pub number: heapless::String<CALLER_ID_LEN>,
}

impl CallInfo {
    /// Caller info for `number`, truncated to [`CALLER_ID_LEN`].
    pub fn new(number: &str) -> Self {
        Self {
            number: truncated(number),
        }
    }

    /// No caller number presented by the network.
    pub fn withheld() -> Self {
        Self::default()
    }

    pub fn caller(&self) -> Option<&str> {
        if self.number.is_empty() {
            None
        } else {
            Some(self.number.as_str())
        }
    }
}

/// Second half of a raw notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UrcParam {
    Value(u32),
    Call(CallInfo),
}

// ───────────────────────────────────────────────────────────────
// Code table
// ───────────────────────────────────────────────────────────────

/// Documented URC codes, numbered in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum UrcKind {
    SysInitState = 0,
    SimCardState = 1,
    NetworkState = 2,
    GprsState = 3,
    CfunState = 4,
    IncomingCall = 5,
    CallState = 6,
    NewSms = 7,
    BatteryVoltage = 8,
    AlarmRing = 9,
    FileDownloadStatus = 10,
    FotaStarted = 11,
    FotaFinished = 12,
    FotaFailed = 13,
    StkResponse = 14,
}

impl UrcKind {
    pub const COUNT: usize = 15;

    /// Every documented kind, indexed by raw code.
    pub const ALL: [UrcKind; Self::COUNT] = [
        Self::SysInitState,
        Self::SimCardState,
        Self::NetworkState,
        Self::GprsState,
        Self::CfunState,
        Self::IncomingCall,
        Self::CallState,
        Self::NewSms,
        Self::BatteryVoltage,
        Self::AlarmRing,
        Self::FileDownloadStatus,
        Self::FotaStarted,
        Self::FotaFinished,
        Self::FotaFailed,
        Self::StkResponse,
    ];

    pub fn from_code(code: u32) -> Option<Self> {
        Self::ALL.get(code as usize).copied()
    }

    pub fn code(self) -> u32 {
        self as u32
    }
}

// ───────────────────────────────────────────────────────────────
// Sub-status enums
// ───────────────────────────────────────────────────────────────

/// Modem boot progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SysInitState {
    Start,
    AtReady,
    PhonebookReady,
    SmsReady,
    Other(u32),
}

impl SysInitState {
    pub fn from_raw(raw: u32) -> Self {
        match raw {
            0 => Self::Start,
            1 => Self::AtReady,
            2 => Self::PhonebookReady,
            3 => Self::SmsReady,
            n => Self::Other(n),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimState {
    NotInserted,
    Ready,
    PinRequired,
    PukRequired,
    NotReady,
    Other(u32),
}

impl SimState {
    pub fn from_raw(raw: u32) -> Self {
        match raw {
            0 => Self::NotInserted,
            1 => Self::Ready,
            2 => Self::PinRequired,
            3 => Self::PukRequired,
            4 => Self::NotReady,
            n => Self::Other(n),
        }
    }
}

/// Outcome of an outgoing call attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallState {
    Busy,
    NoAnswer,
    NoCarrier,
    NoDialtone,
    Other(u32),
}

impl CallState {
    pub fn from_raw(raw: u32) -> Self {
        match raw {
            0 => Self::Busy,
            1 => Self::NoAnswer,
            2 => Self::NoCarrier,
            3 => Self::NoDialtone,
            n => Self::Other(n),
        }
    }
}

// ───────────────────────────────────────────────────────────────
// Typed notification
// ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Urc {
    SysInitState(SysInitState),
    SimCardState(SimState),
    NetworkState(u32),
    GprsState(u32),
    CfunState(u32),
    IncomingCall(CallInfo),
    CallState(CallState),
    /// New SMS stored at this index.
    NewSms(u32),
    /// Supply voltage in millivolts.
    BatteryVoltage(u32),
    AlarmRing,
    FileDownloadStatus(u32),
    FotaStarted,
    FotaFinished,
    FotaFailed,
    StkResponse(u32),
    /// Vendor-specific or undocumented code.
    Unknown { code: u32, param: u32 },
}

impl Urc {
    /// Decode a raw notification.  Total: undocumented codes, and numeric
    /// codes that arrive with a call payload, become [`Urc::Unknown`].  An
    /// incoming-call code with a numeric parameter is a call with no
    /// presented number.
    pub fn decode(code: u32, param: UrcParam) -> Self {
        let Some(kind) = UrcKind::from_code(code) else {
            let param = match param {
                UrcParam::Value(v) => v,
                UrcParam::Call(_) => 0,
            };
            return Self::Unknown { code, param };
        };

        if kind == UrcKind::IncomingCall {
            return match param {
                UrcParam::Call(info) => Self::IncomingCall(info),
                UrcParam::Value(_) => Self::IncomingCall(CallInfo::withheld()),
            };
        }

        let UrcParam::Value(v) = param else {
            return Self::Unknown { code, param: 0 };
        };

        match kind {
            UrcKind::SysInitState => Self::SysInitState(SysInitState::from_raw(v)),
            UrcKind::SimCardState => Self::SimCardState(SimState::from_raw(v)),
            UrcKind::NetworkState => Self::NetworkState(v),
            UrcKind::GprsState => Self::GprsState(v),
            UrcKind::CfunState => Self::CfunState(v),
            UrcKind::IncomingCall => Self::IncomingCall(CallInfo::withheld()),
            UrcKind::CallState => Self::CallState(CallState::from_raw(v)),
            UrcKind::NewSms => Self::NewSms(v),
            UrcKind::BatteryVoltage => Self::BatteryVoltage(v),
            UrcKind::AlarmRing => Self::AlarmRing,
            UrcKind::FileDownloadStatus => Self::FileDownloadStatus(v),
            UrcKind::FotaStarted => Self::FotaStarted,
            UrcKind::FotaFinished => Self::FotaFinished,
            UrcKind::FotaFailed => Self::FotaFailed,
            UrcKind::StkResponse => Self::StkResponse(v),
        }
    }

    /// Documented kind, or `None` for [`Urc::Unknown`].
    pub fn kind(&self) -> Option<UrcKind> {
        let kind = match self {
            Self::SysInitState(_) => UrcKind::SysInitState,
            Self::SimCardState(_) => UrcKind::SimCardState,
            Self::NetworkState(_) => UrcKind::NetworkState,
            Self::GprsState(_) => UrcKind::GprsState,
            Self::CfunState(_) => UrcKind::CfunState,
            Self::IncomingCall(_) => UrcKind::IncomingCall,
            Self::CallState(_) => UrcKind::CallState,
            Self::NewSms(_) => UrcKind::NewSms,
            Self::BatteryVoltage(_) => UrcKind::BatteryVoltage,
            Self::AlarmRing => UrcKind::AlarmRing,
            Self::FileDownloadStatus(_) => UrcKind::FileDownloadStatus,
            Self::FotaStarted => UrcKind::FotaStarted,
            Self::FotaFinished => UrcKind::FotaFinished,
            Self::FotaFailed => UrcKind::FotaFailed,
            Self::StkResponse(_) => UrcKind::StkResponse,
            Self::Unknown { .. } => return None,
        };
        Some(kind)
    }
}

// ───────────────────────────────────────────────────────────────
// Classification output
// ───────────────────────────────────────────────────────────────

/// Operator-facing message derived from a URC.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModemMessage {
    SimNotInserted,
    SimReady,
    SimPinRequired,
    SimPukRequired,
    SimNotReady,
    SimError(u32),
    NetworkState(u32),
    GprsState(u32),
    CfunState(u32),
    IncomingCall(CallInfo),
    CallBusy,
    CallNoAnswer,
    CallNoCarrier,
    CallNoDialtone,
    NewSms(u32),
    BatteryVoltage(u32),
    AlarmRing,
    FileDownload(u32),
    FotaStarted,
    FotaFinished,
    FotaFailed,
}

impl ModemMessage {
    pub fn severity(&self) -> Severity {
        match self {
            Self::SimReady
            | Self::GprsState(_)
            | Self::CfunState(_)
            | Self::BatteryVoltage(_)
            | Self::AlarmRing
            | Self::FileDownload(_)
            | Self::FotaStarted
            | Self::FotaFinished => Severity::Info,
            Self::SimNotInserted
            | Self::SimPinRequired
            | Self::SimPukRequired
            | Self::SimNotReady
            | Self::SimError(_)
            | Self::NetworkState(_)
            | Self::IncomingCall(_)
            | Self::CallBusy
            | Self::CallNoAnswer
            | Self::CallNoCarrier
            | Self::CallNoDialtone
            | Self::NewSms(_)
            | Self::FotaFailed => Severity::Alert,
        }
    }
}

impl fmt::Display for ModemMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SimNotInserted => write!(f, "SYSTEM: SIM card not inserted!"),
            Self::SimReady => write!(f, "SYSTEM: SIM card Ready!"),
            Self::SimPinRequired => write!(f, "SYSTEM: SIM PIN required!"),
            Self::SimPukRequired => write!(f, "SYSTEM: SIM PUK required!"),
            Self::SimNotReady => write!(f, "SYSTEM: SIM card not recognized!"),
            Self::SimError(n) => write!(f, "SYSTEM: SIM ERROR: {n}"),
            Self::NetworkState(n) => write!(f, "SYSTEM: GSM NW State: {n}"),
            Self::GprsState(n) => write!(f, "SYSTEM: GPRS NW State: {n}"),
            Self::CfunState(n) => write!(f, "SYSTEM: CFUN State: {n}"),
            Self::IncomingCall(info) => write!(
                f,
                "Incoming voice call from: {}",
                info.caller().unwrap_or("unknown")
            ),
            Self::CallBusy => write!(f, "The number you dialed is busy now"),
            Self::CallNoAnswer => write!(f, "The number you dialed has no answer"),
            Self::CallNoCarrier => write!(f, "The number you dialed cannot reach"),
            Self::CallNoDialtone => write!(f, "No Dial tone"),
            Self::NewSms(idx) => write!(f, "SMS: New SMS ({idx})"),
            Self::BatteryVoltage(mv) => write!(f, "VBatt Voltage: {mv}"),
            Self::AlarmRing => write!(f, "SYSTEM: Alarm ring"),
            Self::FileDownload(status) => write!(f, "SYSTEM: File download status: {status}"),
            Self::FotaStarted => write!(f, "FOTA: update started"),
            Self::FotaFinished => write!(f, "FOTA: update finished"),
            Self::FotaFailed => write!(f, "FOTA: update failed"),
        }
    }
}

/// Status change the dispatcher applies to its modem snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModemAction {
    /// SMS service is usable.
    SmsReady,
    SimChanged(SimState),
    NetworkChanged(u32),
    VoltageSampled(u32),
}

/// Result of classifying one URC.  Both halves may be empty.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Classification {
    pub message: Option<ModemMessage>,
    pub action: Option<ModemAction>,
}

impl Classification {
    /// Nothing to report, nothing to do.
    pub const IGNORED: Self = Self {
        message: None,
        action: None,
    };

    fn message(message: ModemMessage) -> Self {
        Self {
            message: Some(message),
            action: None,
        }
    }

    fn with_action(mut self, action: ModemAction) -> Self {
        self.action = Some(action);
        self
    }

    pub fn is_ignored(&self) -> bool {
        self.message.is_none() && self.action.is_none()
    }
}

/// Map a URC to its message and action.  Never fails.
pub fn classify_urc(urc: &Urc) -> Classification {
    match urc {
        Urc::SysInitState(SysInitState::SmsReady) => Classification {
            message: None,
            action: Some(ModemAction::SmsReady),
        },
        Urc::SysInitState(_) => Classification::IGNORED,

        Urc::SimCardState(sim) => {
            let message = match sim {
                SimState::NotInserted => ModemMessage::SimNotInserted,
                SimState::Ready => ModemMessage::SimReady,
                SimState::PinRequired => ModemMessage::SimPinRequired,
                SimState::PukRequired => ModemMessage::SimPukRequired,
                SimState::NotReady => ModemMessage::SimNotReady,
                SimState::Other(n) => ModemMessage::SimError(*n),
            };
            Classification::message(message).with_action(ModemAction::SimChanged(*sim))
        }

        Urc::NetworkState(n) => Classification::message(ModemMessage::NetworkState(*n))
            .with_action(ModemAction::NetworkChanged(*n)),
        Urc::GprsState(n) => Classification::message(ModemMessage::GprsState(*n)),
        Urc::CfunState(n) => Classification::message(ModemMessage::CfunState(*n)),

        Urc::IncomingCall(info) => Classification::message(ModemMessage::IncomingCall(info.clone())),

        Urc::CallState(state) => match state {
            CallState::Busy => Classification::message(ModemMessage::CallBusy),
            CallState::NoAnswer => Classification::message(ModemMessage::CallNoAnswer),
            CallState::NoCarrier => Classification::message(ModemMessage::CallNoCarrier),
            CallState::NoDialtone => Classification::message(ModemMessage::CallNoDialtone),
            CallState::Other(_) => Classification::IGNORED,
        },

        Urc::NewSms(idx) => Classification::message(ModemMessage::NewSms(*idx)),
        Urc::BatteryVoltage(mv) => Classification::message(ModemMessage::BatteryVoltage(*mv))
            .with_action(ModemAction::VoltageSampled(*mv)),
        Urc::AlarmRing => Classification::message(ModemMessage::AlarmRing),
        Urc::FileDownloadStatus(s) => Classification::message(ModemMessage::FileDownload(*s)),
        Urc::FotaStarted => Classification::message(ModemMessage::FotaStarted),
        Urc::FotaFinished => Classification::message(ModemMessage::FotaFinished),
        Urc::FotaFailed => Classification::message(ModemMessage::FotaFailed),

        Urc::StkResponse(_) | Urc::Unknown { .. } => Classification::IGNORED,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(kind: UrcKind, value: u32) -> Urc {
        Urc::decode(kind.code(), UrcParam::Value(value))
    }

    #[test]
    fn kind_table_matches_codes() {
        for (idx, kind) in UrcKind::ALL.iter().enumerate() {
            assert_eq!(kind.code(), idx as u32);
            assert_eq!(UrcKind::from_code(idx as u32), Some(*kind));
        }
        assert_eq!(UrcKind::from_code(UrcKind::COUNT as u32), None);
    }

    #[test]
    fn decoded_kind_round_trips() {
        for kind in UrcKind::ALL {
            assert_eq!(raw(kind, 0).kind(), Some(kind));
        }
    }

    #[test]
    fn sim_not_inserted_is_alert_and_ready_is_info() {
        let missing = classify_urc(&raw(UrcKind::SimCardState, 0));
        let ready = classify_urc(&raw(UrcKind::SimCardState, 1));

        let missing_msg = missing.message.unwrap();
        let ready_msg = ready.message.unwrap();
        assert_eq!(missing_msg, ModemMessage::SimNotInserted);
        assert_eq!(missing_msg.severity(), Severity::Alert);
        assert_eq!(ready_msg, ModemMessage::SimReady);
        assert_eq!(ready_msg.severity(), Severity::Info);
        assert_ne!(missing_msg.to_string(), ready_msg.to_string());
    }

    #[test]
    fn every_non_ready_sim_state_alerts() {
        for raw_state in [0, 2, 3, 4, 77] {
            let c = classify_urc(&raw(UrcKind::SimCardState, raw_state));
            assert_eq!(c.message.unwrap().severity(), Severity::Alert);
            assert_eq!(
                c.action,
                Some(ModemAction::SimChanged(SimState::from_raw(raw_state)))
            );
        }
    }

    #[test]
    fn unrecognised_sim_state_reports_number() {
        let c = classify_urc(&raw(UrcKind::SimCardState, 77));
        assert_eq!(c.message.unwrap().to_string(), "SYSTEM: SIM ERROR: 77");
    }

    #[test]
    fn only_sms_ready_triggers_action() {
        let c = classify_urc(&raw(UrcKind::SysInitState, 3));
        assert_eq!(c.action, Some(ModemAction::SmsReady));
        assert!(c.message.is_none());

        for other in [0, 1, 2, 4, 1000] {
            assert!(classify_urc(&raw(UrcKind::SysInitState, other)).is_ignored());
        }
    }

    #[test]
    fn incoming_call_reads_caller_number() {
        let urc = Urc::decode(
            UrcKind::IncomingCall.code(),
            UrcParam::Call(CallInfo::new("+919876543210")),
        );
        let c = classify_urc(&urc);
        assert_eq!(
            c.message.unwrap().to_string(),
            "Incoming voice call from: +919876543210"
        );
    }

    #[test]
    fn incoming_call_without_payload_is_withheld() {
        let urc = raw(UrcKind::IncomingCall, 0xdead_beef);
        assert_eq!(urc, Urc::IncomingCall(CallInfo::withheld()));
        let text = classify_urc(&urc).message.unwrap().to_string();
        assert_eq!(text, "Incoming voice call from: unknown");
    }

    #[test]
    fn call_payload_on_numeric_code_is_unknown() {
        let urc = Urc::decode(
            UrcKind::NewSms.code(),
            UrcParam::Call(CallInfo::new("123")),
        );
        assert_eq!(
            urc,
            Urc::Unknown {
                code: UrcKind::NewSms.code(),
                param: 0
            }
        );
    }

    #[test]
    fn call_states() {
        let text = |v| {
            classify_urc(&raw(UrcKind::CallState, v))
                .message
                .map(|m| m.to_string())
        };
        assert_eq!(text(0).as_deref(), Some("The number you dialed is busy now"));
        assert_eq!(text(1).as_deref(), Some("The number you dialed has no answer"));
        assert_eq!(text(2).as_deref(), Some("The number you dialed cannot reach"));
        assert_eq!(text(3).as_deref(), Some("No Dial tone"));
        assert_eq!(text(9), None);
    }

    #[test]
    fn numeric_readings_are_reported() {
        let c = classify_urc(&raw(UrcKind::BatteryVoltage, 3912));
        assert_eq!(c.message.as_ref().unwrap().to_string(), "VBatt Voltage: 3912");
        assert_eq!(c.action, Some(ModemAction::VoltageSampled(3912)));

        let c = classify_urc(&raw(UrcKind::NetworkState, 1));
        assert_eq!(c.message.unwrap().to_string(), "SYSTEM: GSM NW State: 1");
        assert_eq!(c.action, Some(ModemAction::NetworkChanged(1)));

        let c = classify_urc(&raw(UrcKind::NewSms, 4));
        assert_eq!(c.message.unwrap().to_string(), "SMS: New SMS (4)");
    }

    #[test]
    fn fota_lifecycle() {
        assert_eq!(
            classify_urc(&raw(UrcKind::FotaStarted, 0)).message,
            Some(ModemMessage::FotaStarted)
        );
        assert_eq!(
            classify_urc(&raw(UrcKind::FotaFailed, 0))
                .message
                .unwrap()
                .severity(),
            Severity::Alert
        );
    }

    #[test]
    fn unknown_and_stk_are_ignored() {
        let unknown = Urc::decode(4242, UrcParam::Value(1));
        assert_eq!(unknown, Urc::Unknown { code: 4242, param: 1 });
        assert_eq!(unknown.kind(), None);
        assert!(classify_urc(&unknown).is_ignored());
        assert!(classify_urc(&raw(UrcKind::StkResponse, 5)).is_ignored());
    }

    #[test]
    fn long_caller_numbers_are_truncated() {
        let info = CallInfo::new(&"9".repeat(64));
        assert_eq!(info.number.len(), CALLER_ID_LEN);
    }
}
