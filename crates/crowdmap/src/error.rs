//! # Shell Error Types
//!
//! Nothing here is fatal to the session. Config errors stop startup;
//! geolocation errors become an alert and leave the engine untouched.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading the configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("cannot read config {path}: {source}")]
    Io {
        /// File that was requested.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid TOML for this schema.
    #[error("malformed config: {0}")]
    Parse(#[from] toml::de::Error),

    /// A value parsed but is out of range.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Result type for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Why a location request did not produce a position.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeolocationError {
    /// The host has no geolocation service at all.
    #[error("geolocation is not supported")]
    Unsupported,

    /// The person refused to share their location.
    #[error("permission to read the location was denied")]
    PermissionDenied,

    /// The service was asked but could not produce a fix.
    #[error("position unavailable")]
    Unavailable,
}

/// Result type for geolocation requests.
pub type GeolocationResult<T> = Result<T, GeolocationError>;
