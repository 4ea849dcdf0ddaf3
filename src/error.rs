//! Unified error types for the tracker core.
//!
//! Only construction-time operations can fail: building points and fences,
//! loading configuration, and bringing up the external subsystems.  Per-fix
//! and per-notification processing is total and never returns an error.
//! All variants are `Copy` so they can be passed around without allocation.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

/// Every fallible operation in the crate funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A coordinate or fence parameter was invalid.
    Geo(GeoError),
    /// Configuration could not be parsed or failed validation.
    Config(ConfigError),
    /// An external subsystem could not be started.
    Init(InitError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Geo(e) => write!(f, "geo: {e}"),
            Self::Config(e) => write!(f, "config: {e}"),
            Self::Init(e) => write!(f, "init: {e}"),
        }
    }
}

impl std::error::Error for Error {}

// ---------------------------------------------------------------------------
// Geometry errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeoError {
    /// Latitude outside [-90, 90].
    LatitudeOutOfRange,
    /// Longitude outside [-180, 180].
    LongitudeOutOfRange,
    /// NaN or infinite coordinate.
    NonFinite,
    /// Fence radius negative, NaN or infinite.
    InvalidRadius,
}

impl fmt::Display for GeoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LatitudeOutOfRange => write!(f, "latitude out of range"),
            Self::LongitudeOutOfRange => write!(f, "longitude out of range"),
            Self::NonFinite => write!(f, "coordinate is not finite"),
            Self::InvalidRadius => write!(f, "fence radius must be finite and >= 0"),
        }
    }
}

impl std::error::Error for GeoError {}

impl From<GeoError> for Error {
    fn from(e: GeoError) -> Self {
        Self::Geo(e)
    }
}

// ---------------------------------------------------------------------------
// Configuration errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// The document is not valid JSON for [`TrackerConfig`](crate::config::TrackerConfig).
    Malformed,
    /// A field failed range validation.
    /// The `&'static str` describes which field and why.
    ValidationFailed(&'static str),
    /// More fences than the engine can hold.
    TooManyFences,
    /// A fence definition has bad coordinates or radius.
    InvalidFence(GeoError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Malformed => write!(f, "malformed config document"),
            Self::ValidationFailed(msg) => write!(f, "validation failed: {msg}"),
            Self::TooManyFences => write!(f, "too many fences"),
            Self::InvalidFence(e) => write!(f, "invalid fence: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<GeoError> for ConfigError {
    fn from(e: GeoError) -> Self {
        Self::InvalidFence(e)
    }
}

// ---------------------------------------------------------------------------
// Subsystem initialisation errors
// ---------------------------------------------------------------------------

/// Bring-up failures reported by the positioning or radio port.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitError {
    /// The serial port could not be opened.
    PortUnavailable(&'static str),
    /// The subsystem rejected its configuration.
    Rejected(&'static str),
    /// `start` was called twice on the same adapter.
    AlreadyStarted,
}

impl fmt::Display for InitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PortUnavailable(port) => write!(f, "port unavailable: {port}"),
            Self::Rejected(msg) => write!(f, "configuration rejected: {msg}"),
            Self::AlreadyStarted => write!(f, "subsystem already started"),
        }
    }
}

impl std::error::Error for InitError {}

impl From<InitError> for Error {
    fn from(e: InitError) -> Self {
        Self::Init(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Crate-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
