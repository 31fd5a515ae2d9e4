//! # Configuration
//!
//! Loaded once at startup from TOML. Every field has a default, so an empty
//! file (or no file) gives the stock setup: London at zoom 13, 50 ms ticks.
//!
//! ```toml
//! tick_interval_ms = 50
//! locate_zoom = 15
//!
//! [initial_view]
//! center = [51.505, -0.09]
//! zoom = 13
//!
//! [movement]
//! seed = 12648430
//! step_scale = 0.0001
//! half_range = 50
//!
//! [styles.user]
//! radius = 10.0
//! stroke_color = "#0077b6"
//! fill_color = "#ade8f4"
//! fill_opacity = 0.9
//! ```

use std::path::Path;
use std::time::Duration;

use crowdmap_core::{GeoPoint, MovementConfig};
use crowdmap_render::{MarkerStyle, StyleSet};
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};

/// Default sync period (20 Hz).
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 50;

/// Where the map starts and how close it is zoomed.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    /// Map center as `[lat, lon]`.
    pub center: GeoPoint,
    /// Zoom level.
    pub zoom: u8,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            center: GeoPoint::new(51.505, -0.09).unwrap_or_default(),
            zoom: 13,
        }
    }
}

/// Tile provider settings, handed to the map widget untouched.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TileConfig {
    /// URL template with `{s}`, `{z}`, `{x}`, `{y}` placeholders.
    pub url: String,
    /// Attribution shown in the map corner.
    pub attribution: String,
}

impl Default for TileConfig {
    fn default() -> Self {
        Self {
            url: "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png".to_owned(),
            attribution: "© OpenStreetMap contributors".to_owned(),
        }
    }
}

/// Top-level configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrowdmapConfig {
    /// Sync loop period in milliseconds.
    pub tick_interval_ms: u64,
    /// View at startup.
    pub initial_view: ViewConfig,
    /// Zoom applied when the user's location is found.
    pub locate_zoom: u8,
    /// Tile provider.
    pub tiles: TileConfig,
    /// Random walk of the other people.
    pub movement: MovementConfig,
    /// Marker presets.
    pub styles: StyleSet,
}

impl Default for CrowdmapConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            initial_view: ViewConfig::default(),
            locate_zoom: 15,
            tiles: TileConfig::default(),
            movement: MovementConfig::default(),
            styles: StyleSet::default(),
        }
    }
}

impl CrowdmapConfig {
    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed TOML and
    /// [`ConfigError::Invalid`] for out-of-range values.
    pub fn from_toml_str(text: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses, and validates a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, otherwise as
    /// [`from_toml_str`](Self::from_toml_str).
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        tracing::info!(path = %path.display(), "configuration loaded");
        Ok(config)
    }

    /// Checks values serde cannot.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first bad field.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::Invalid("tick_interval_ms must be positive".to_owned()));
        }
        let step = self.movement.step_scale;
        if !step.is_finite() || step < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "movement.step_scale must be a finite non-negative number, got {step}"
            )));
        }
        validate_style("styles.user", &self.styles.user)?;
        validate_style("styles.other", &self.styles.other)?;
        Ok(())
    }

    /// Sync loop period.
    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}

fn validate_style(name: &str, style: &MarkerStyle) -> ConfigResult<()> {
    if !style.radius.is_finite() || style.radius < 0.0 {
        return Err(ConfigError::Invalid(format!(
            "{name}.radius must be a finite non-negative number, got {}",
            style.radius
        )));
    }
    if !(0.0..=1.0).contains(&style.fill_opacity) {
        return Err(ConfigError::Invalid(format!(
            "{name}.fill_opacity must be within [0, 1], got {}",
            style.fill_opacity
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_gives_defaults() {
        let config = CrowdmapConfig::from_toml_str("").unwrap();
        assert_eq!(config, CrowdmapConfig::default());
        assert_eq!(config.tick_interval(), Duration::from_millis(50));
        assert_eq!(config.initial_view.zoom, 13);
        assert_eq!(config.locate_zoom, 15);
    }

    #[test]
    fn test_partial_override() {
        let config = CrowdmapConfig::from_toml_str(
            r##"
            tick_interval_ms = 100

            [initial_view]
            center = [48.85, 2.35]

            [movement]
            seed = 9

            [styles.other]
            radius = 4.0
            stroke_color = "#000000"
            fill_color = "#ffffff"
            fill_opacity = 0.5
            "##,
        )
        .unwrap();

        assert_eq!(config.tick_interval_ms, 100);
        assert_eq!(config.initial_view.center, GeoPoint::new(48.85, 2.35).unwrap());
        assert_eq!(config.initial_view.zoom, 13);
        assert_eq!(config.movement.seed, 9);
        assert_eq!(config.movement.half_range, 50);
        assert_eq!(config.styles.other.radius, 4.0);
        assert_eq!(config.styles.user, MarkerStyle::user());
    }

    #[test]
    fn test_zero_interval_rejected() {
        let err = CrowdmapConfig::from_toml_str("tick_interval_ms = 0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_bad_opacity_rejected() {
        let err = CrowdmapConfig::from_toml_str(
            r##"
            [styles.user]
            radius = 10.0
            stroke_color = "#0077b6"
            fill_color = "#ade8f4"
            fill_opacity = 1.5
            "##,
        )
        .unwrap_err();
        assert!(err.to_string().contains("styles.user.fill_opacity"));
    }

    #[test]
    fn test_malformed_toml() {
        let err = CrowdmapConfig::from_toml_str("tick_interval_ms = ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = CrowdmapConfig::load("/definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
