//! Geometry primitives: points, great-circle distance and fence containment.
//!
//! Everything here is pure.  Coordinates are WGS-84 degrees treated on a
//! spherical Earth, which is well inside GNSS error for fences of a few
//! hundred metres to a few tens of kilometres.

use ::geo::HaversineDistance;

use crate::error::GeoError;
use crate::text::truncated;

/// Mean Earth radius in metres (IUGG), as used by `geo`'s haversine.
pub const EARTH_RADIUS_M: f64 = 6_371_008.8;

/// Maximum number of fences the engine can monitor.
pub const MAX_FENCES: usize = 8;

/// Maximum length of a fence name.
pub const FENCE_NAME_LEN: usize = 16;

// ---------------------------------------------------------------------------
// Point
// ---------------------------------------------------------------------------

/// A validated geographic position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    lat: f64,
    lng: f64,
}

impl Point {
    /// Build a point, rejecting non-finite or out-of-range coordinates.
    pub fn new(lat: f64, lng: f64) -> Result<Self, GeoError> {
        if !lat.is_finite() || !lng.is_finite() {
            return Err(GeoError::NonFinite);
        }
        if !(-90.0..=90.0).contains(&lat) {
            return Err(GeoError::LatitudeOutOfRange);
        }
        if !(-180.0..=180.0).contains(&lng) {
            return Err(GeoError::LongitudeOutOfRange);
        }
        Ok(Self { lat, lng })
    }

    pub fn lat(&self) -> f64 {
        self.lat
    }

    pub fn lng(&self) -> f64 {
        self.lng
    }
}

/// Haversine distance between two points, in metres.
///
/// Always finite and non-negative for valid points.
pub fn distance(a: Point, b: Point) -> f64 {
    let a = ::geo::Point::new(a.lng, a.lat);
    let b = ::geo::Point::new(b.lng, b.lat);
    // Rounding can leave the asin argument a hair above 1 for antipodes,
    // which yields NaN; `min` maps that to half the circumference.
    a.haversine_distance(&b)
        .min(core::f64::consts::PI * EARTH_RADIUS_M)
}

// ---------------------------------------------------------------------------
// Fences
// ---------------------------------------------------------------------------

/// Geometric shape of a fence.  Closed set; new shapes add a variant here
/// and an arm in [`contains`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FenceShape {
    Circle { center: Point, radius_m: f64 },
}

/// Index of a fence inside the [`GeofenceEngine`](crate::geofence::GeofenceEngine).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FenceId(pub u8);

/// A monitored region.
#[derive(Debug, Clone, PartialEq)]
pub struct Fence {
    pub name: heapless::String<FENCE_NAME_LEN>,
    pub shape: FenceShape,
}

impl Fence {
    /// Circular fence around `center`.
    pub fn circle(name: &str, center: Point, radius_m: f64) -> Result<Self, GeoError> {
        if !radius_m.is_finite() || radius_m < 0.0 {
            return Err(GeoError::InvalidRadius);
        }
        Ok(Self {
            name: truncated(name),
            shape: FenceShape::Circle { center, radius_m },
        })
    }
}

/// Point-in-fence test.
pub fn contains(fence: &Fence, p: Point) -> bool {
    match fence.shape {
        FenceShape::Circle { center, radius_m } => distance(center, p) <= radius_m,
    }
}
