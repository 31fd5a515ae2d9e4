//! # Marker Styles
//!
//! Two presets, chosen per slot by a pure function of the slot index and
//! whether a user currently exists.

use crowdmap_core::EntityKind;
use serde::{Deserialize, Serialize};

/// Visual parameters of a circle marker.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MarkerStyle {
    /// Circle radius in pixels.
    pub radius: f64,
    /// Outline color (CSS notation).
    pub stroke_color: String,
    /// Fill color (CSS notation).
    pub fill_color: String,
    /// Fill opacity in `[0, 1]`.
    pub fill_opacity: f64,
}

impl MarkerStyle {
    /// Larger, blue, nearly opaque.
    #[must_use]
    pub fn user() -> Self {
        Self {
            radius: 10.0,
            stroke_color: "#0077b6".to_owned(),
            fill_color: "#ade8f4".to_owned(),
            fill_opacity: 0.9,
        }
    }

    /// Smaller, red, a little more transparent.
    #[must_use]
    pub fn other() -> Self {
        Self {
            radius: 8.0,
            stroke_color: "#e63946".to_owned(),
            fill_color: "#f1faee".to_owned(),
            fill_opacity: 0.8,
        }
    }
}

/// Which of the two presets a slot wears.
pub type StyleKind = EntityKind;

/// Style of `slot` for a tick in which `user_exists` was observed.
///
/// Slot 0 is [`StyleKind::User`] only while a user exists; everything else
/// is [`StyleKind::Other`].
#[inline]
#[must_use]
pub const fn style_for_slot(slot: usize, user_exists: bool) -> StyleKind {
    EntityKind::of_slot(slot, user_exists)
}

/// The two presets in use.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleSet {
    /// Preset for the user.
    pub user: MarkerStyle,
    /// Preset for everyone else.
    pub other: MarkerStyle,
}

impl StyleSet {
    /// Looks up the preset for `kind`.
    #[inline]
    #[must_use]
    pub const fn get(&self, kind: StyleKind) -> &MarkerStyle {
        match kind {
            StyleKind::User => &self.user,
            StyleKind::Other => &self.other,
        }
    }
}

impl Default for StyleSet {
    fn default() -> Self {
        Self {
            user: MarkerStyle::user(),
            other: MarkerStyle::other(),
        }
    }
}
