//! System configuration parameters
//!
//! Compiled-in defaults reproduce the stock device setup: one 1 km circular
//! fence, default driving thresholds, and the standard UART assignment
//! (modem on ttyS0, GNSS on ttyS1).  The host binary can override any
//! subset from a JSON document; missing fields keep their defaults.

use log::warn;
use serde::{Deserialize, Serialize};

use crate::classify::Severity;
use crate::error::{ConfigError, GeoError};
use crate::geo::{FENCE_NAME_LEN, Fence, MAX_FENCES, Point};
use crate::geofence::FenceInit;
use crate::text::truncated;

/// Maximum serial device path length.
pub const PORT_NAME_LEN: usize = 24;

pub type PortName = heapless::String<PORT_NAME_LEN>;

// ───────────────────────────────────────────────────────────────
// Positioning subsystem
// ───────────────────────────────────────────────────────────────

/// Thresholds the positioning subsystem uses to derive driving events.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DrivingThresholds {
    /// Deceleration (km/h per second) reported as harsh braking.
    pub harsh_brake_kmh_s: f32,
    /// Yaw rate (degrees per second) reported as a harsh turn.
    pub harsh_turn_deg_s: f32,
    /// Acceleration (km/h per second) reported as over-acceleration.
    pub over_accel_kmh_s: f32,
    /// Speed (km/h) above which overspeed is reported.
    pub speed_limit_kmh: f32,
}

impl Default for DrivingThresholds {
    fn default() -> Self {
        Self {
            harsh_brake_kmh_s: 11.0,
            harsh_turn_deg_s: 30.0,
            over_accel_kmh_s: 9.0,
            speed_limit_kmh: 80.0,
        }
    }
}

/// Configuration handed to the positioning subsystem at start.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GnssConfig {
    pub port: PortName,
    pub baud: u32,
    pub thresholds: DrivingThresholds,
}

impl Default for GnssConfig {
    fn default() -> Self {
        Self {
            port: truncated("/dev/ttyS1"),
            baud: 115_200,
            thresholds: DrivingThresholds::default(),
        }
    }
}

// ───────────────────────────────────────────────────────────────
// Radio subsystem
// ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModemConfig {
    pub port: PortName,
}

impl Default for ModemConfig {
    fn default() -> Self {
        Self {
            port: truncated("/dev/ttyS0"),
        }
    }
}

// ───────────────────────────────────────────────────────────────
// Fences
// ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeKind {
    #[default]
    Circle,
}

/// Serialisable fence definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FenceConfig {
    pub name: heapless::String<FENCE_NAME_LEN>,
    #[serde(default)]
    pub shape: ShapeKind,
    pub lat: f64,
    pub lng: f64,
    pub radius_m: f64,
}

impl FenceConfig {
    pub fn to_fence(&self) -> Result<Fence, GeoError> {
        let center = Point::new(self.lat, self.lng)?;
        match self.shape {
            ShapeKind::Circle => Fence::circle(&self.name, center, self.radius_m),
        }
    }
}

// ───────────────────────────────────────────────────────────────
// Top level
// ───────────────────────────────────────────────────────────────

/// Core system configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    pub gnss: GnssConfig,
    pub modem: ModemConfig,
    /// Fences monitored for the process lifetime.
    pub fences: Vec<FenceConfig>,
    /// First-sample behaviour of every fence monitor.
    pub fence_init: FenceInit,
    /// Least urgent severity forwarded to the report sink.
    /// `Debug` enables raw sentence pass-through.
    pub verbosity: Severity,
    /// Delay between scripted items in the replay adapters (ms).
    pub replay_interval_ms: u32,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            gnss: GnssConfig::default(),
            modem: ModemConfig::default(),
            fences: vec![FenceConfig {
                name: truncated("home"),
                shape: ShapeKind::Circle,
                lat: 28.620_198_302_588_097,
                lng: 77.211_729_635_897_77,
                radius_m: 1000.0,
            }],
            fence_init: FenceInit::AssumeOutside,
            verbosity: Severity::Info,
            replay_interval_ms: 1000,
        }
    }
}

impl TrackerConfig {
    /// Parse and validate a JSON document.
    pub fn from_json(bytes: &[u8]) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_slice(bytes).map_err(|e| {
            warn!("Config parse failed: {}", e);
            ConfigError::Malformed
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Range-check every field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.gnss.port.is_empty() || self.modem.port.is_empty() {
            return Err(ConfigError::ValidationFailed("serial port name is empty"));
        }
        if self.gnss.baud == 0 {
            return Err(ConfigError::ValidationFailed("gnss.baud must be > 0"));
        }
        let t = &self.gnss.thresholds;
        for value in [
            t.harsh_brake_kmh_s,
            t.harsh_turn_deg_s,
            t.over_accel_kmh_s,
            t.speed_limit_kmh,
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::ValidationFailed(
                    "driving thresholds must be finite and > 0",
                ));
            }
        }
        if self.replay_interval_ms == 0 {
            return Err(ConfigError::ValidationFailed("replay_interval_ms must be > 0"));
        }
        self.fences().map(|_| ())
    }

    /// Build the validated fence list.
    pub fn fences(&self) -> Result<heapless::Vec<Fence, MAX_FENCES>, ConfigError> {
        if self.fences.len() > MAX_FENCES {
            return Err(ConfigError::TooManyFences);
        }
        let mut out = heapless::Vec::new();
        for fc in &self.fences {
            let fence = fc.to_fence()?;
            out.push(fence).map_err(|_| ConfigError::TooManyFences)?;
        }
        Ok(out)
    }
}
