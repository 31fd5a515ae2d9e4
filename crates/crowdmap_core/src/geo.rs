//! # Geographic Points
//!
//! One tracked position, stored exactly as it sits in the coordinate buffer.

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

use crate::error::{CoordinateError, CoreResult};

/// A latitude/longitude pair in degrees.
///
/// The layout is `#[repr(C)]` with two `f64` fields, so a `&[GeoPoint]`
/// reinterprets as the interleaved `[lat0, lon0, lat1, lon1, ...]` buffer
/// without copying.
///
/// Only finite values are accepted. Range is not clamped: the random walk
/// may drift past the poles or the antimeridian and the map deals with it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
#[repr(C)]
#[serde(try_from = "(f64, f64)", into = "(f64, f64)")]
pub struct GeoPoint {
    lat: f64,
    lon: f64,
}

impl GeoPoint {
    /// Creates a point, rejecting NaN and infinities.
    ///
    /// # Errors
    ///
    /// Returns [`CoordinateError::NonFinite`] if either value is not finite.
    pub fn new(lat: f64, lon: f64) -> CoreResult<Self> {
        if lat.is_finite() && lon.is_finite() {
            Ok(Self { lat, lon })
        } else {
            Err(CoordinateError::NonFinite { lat, lon })
        }
    }

    /// Builds a point from a pair already read out of the engine's buffer.
    #[inline]
    pub(crate) const fn from_buffer(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Latitude in degrees.
    #[inline]
    #[must_use]
    pub const fn lat(self) -> f64 {
        self.lat
    }

    /// Longitude in degrees.
    #[inline]
    #[must_use]
    pub const fn lon(self) -> f64 {
        self.lon
    }

    /// Returns the point shifted by the given deltas.
    #[inline]
    #[must_use]
    pub fn offset(self, dlat: f64, dlon: f64) -> Self {
        Self {
            lat: self.lat + dlat,
            lon: self.lon + dlon,
        }
    }

    /// Returns `[lat, lon]`, the order the map expects.
    #[inline]
    #[must_use]
    pub const fn to_array(self) -> [f64; 2] {
        [self.lat, self.lon]
    }
}

impl TryFrom<(f64, f64)> for GeoPoint {
    type Error = CoordinateError;

    fn try_from((lat, lon): (f64, f64)) -> CoreResult<Self> {
        Self::new(lat, lon)
    }
}

impl From<GeoPoint> for (f64, f64) {
    fn from(point: GeoPoint) -> Self {
        (point.lat, point.lon)
    }
}

/// Who a slot belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntityKind {
    /// The person holding the device. At most one, always slot 0.
    User,
    /// Anyone else, added by clicking the map.
    Other,
}

impl EntityKind {
    /// Identity of `slot` given whether a user currently exists.
    #[inline]
    #[must_use]
    pub const fn of_slot(slot: usize, user_exists: bool) -> Self {
        if user_exists && slot == 0 {
            Self::User
        } else {
            Self::Other
        }
    }
}
