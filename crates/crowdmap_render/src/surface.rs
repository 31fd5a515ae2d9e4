//! Map Surface - the mapping widget as seen from the sync loop
//!
//! The real widget (tiles, panning, DOM) is an external collaborator.
//! The loop needs only a handful of primitives from it, collected here.

use crowdmap_core::GeoPoint;

use crate::style::MarkerStyle;

/// Handle to a marker owned by the map.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MarkerId(pub u32);

/// The primitives the bridge and the shell need from the map.
pub trait MapSurface {
    /// Adds a circle marker at `at` and returns its handle.
    fn add_circle_marker(&mut self, at: GeoPoint) -> MarkerId;

    /// Moves a marker.
    fn set_marker_position(&mut self, marker: MarkerId, at: GeoPoint);

    /// Restyles a marker.
    fn set_marker_style(&mut self, marker: MarkerId, style: &MarkerStyle);

    /// Centers the view on `center` at `zoom`.
    fn set_view(&mut self, center: GeoPoint, zoom: u8);

    /// Shows a blocking notification to the person using the map.
    fn alert(&mut self, message: &str);
}

/// What a [`RecordingSurface`] remembers about one marker.
#[derive(Clone, Debug, PartialEq)]
pub struct RecordedMarker {
    /// Last position set.
    pub position: GeoPoint,
    /// Last style set, `None` until the first restyle.
    pub style: Option<MarkerStyle>,
    /// Number of `set_marker_position` calls.
    pub moves: u64,
    /// Number of `set_marker_style` calls.
    pub restyles: u64,
}

/// In-memory map that records every call.
///
/// Used by tests and by the headless binary, which has no widget to draw on.
#[derive(Clone, Debug, Default)]
pub struct RecordingSurface {
    markers: Vec<RecordedMarker>,
    view: Option<(GeoPoint, u8)>,
    alerts: Vec<String>,
}

impl RecordingSurface {
    /// Creates an empty surface.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of markers ever added.
    #[must_use]
    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }

    /// State of one marker.
    #[must_use]
    pub fn marker(&self, id: MarkerId) -> Option<&RecordedMarker> {
        self.markers.get(id.0 as usize)
    }

    /// All markers in creation order.
    #[must_use]
    pub fn markers(&self) -> &[RecordedMarker] {
        &self.markers
    }

    /// Current view center and zoom, if one was set.
    #[must_use]
    pub fn view(&self) -> Option<(GeoPoint, u8)> {
        self.view
    }

    /// Every alert shown, oldest first.
    #[must_use]
    pub fn alerts(&self) -> &[String] {
        &self.alerts
    }
}

impl MapSurface for RecordingSurface {
    fn add_circle_marker(&mut self, at: GeoPoint) -> MarkerId {
        let id = u32::try_from(self.markers.len()).unwrap_or(u32::MAX);
        self.markers.push(RecordedMarker {
            position: at,
            style: None,
            moves: 0,
            restyles: 0,
        });
        MarkerId(id)
    }

    fn set_marker_position(&mut self, marker: MarkerId, at: GeoPoint) {
        if let Some(recorded) = self.markers.get_mut(marker.0 as usize) {
            recorded.position = at;
            recorded.moves += 1;
        }
    }

    fn set_marker_style(&mut self, marker: MarkerId, style: &MarkerStyle) {
        if let Some(recorded) = self.markers.get_mut(marker.0 as usize) {
            if recorded.style.as_ref() != Some(style) {
                recorded.style = Some(style.clone());
            }
            recorded.restyles += 1;
        }
    }

    fn set_view(&mut self, center: GeoPoint, zoom: u8) {
        self.view = Some((center, zoom));
    }

    fn alert(&mut self, message: &str) {
        tracing::warn!(%message, "alert");
        self.alerts.push(message.to_owned());
    }
}
