//! # Core Error Types
//!
//! Engine calls themselves never fail: their preconditions are carried by
//! the argument types. Errors only come from building those types.

use thiserror::Error;

/// Errors raised while building coordinates or coordinate views.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum CoordinateError {
    /// Latitude or longitude was NaN or infinite.
    #[error("non-finite coordinate: lat {lat}, lon {lon}")]
    NonFinite {
        /// The rejected latitude.
        lat: f64,
        /// The rejected longitude.
        lon: f64,
    },

    /// A raw buffer did not hold a whole number of `(lat, lon)` pairs.
    #[error("coordinate buffer holds {0} floats, expected an even count")]
    OddBufferLength(usize),
}

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoordinateError>;
