//! # Map Shell
//!
//! Input handling around the sync loop: the "locate me" button and clicks
//! on the map. Each handler runs to completion and touches the engine in a
//! single step, so no half-applied state is ever visible to a tick.

use crowdmap_core::{EngineFacade, GeoPoint};
use crowdmap_render::{MapSurface, SyncLoop, TickOutcome};

use crate::config::CrowdmapConfig;
use crate::error::GeolocationResult;
use crate::geolocation::{Geolocator, LocateRequest};

/// Shown when the host has no location service.
pub const UNSUPPORTED_MESSAGE: &str = "Geolocation is not supported by your browser.";

/// Shown when a location request fails for any reason.
pub const LOCATE_FAILED_MESSAGE: &str =
    "Could not get your location. Please ensure you have granted permission.";

/// Input delivered to the shell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ShellEvent {
    /// The locate button was pressed.
    LocateRequested,
    /// A location request finished.
    LocationResolved(GeolocationResult<GeoPoint>),
    /// The map was clicked at raw coordinates.
    MapClicked {
        /// Latitude under the pointer.
        lat: f64,
        /// Longitude under the pointer.
        lon: f64,
    },
}

/// Sync loop plus the input handlers that feed its engine.
pub struct MapShell<E, S, G> {
    sync: SyncLoop<E, S>,
    geolocator: G,
    locate_zoom: u8,
}

impl<E: EngineFacade, S: MapSurface, G: Geolocator> MapShell<E, S, G> {
    /// Wraps a sync loop and centers the map on the configured start view.
    #[must_use]
    pub fn new(mut sync: SyncLoop<E, S>, geolocator: G, config: &CrowdmapConfig) -> Self {
        let view = config.initial_view;
        sync.surface_mut().set_view(view.center, view.zoom);
        Self {
            sync,
            geolocator,
            locate_zoom: config.locate_zoom,
        }
    }

    /// Runs one sync tick.
    pub fn tick(&mut self) -> TickOutcome {
        self.sync.tick()
    }

    /// Dispatches one input event.
    ///
    /// Returns the pending request when the event started one; the caller
    /// feeds its answer back through [`on_location`](Self::on_location).
    pub fn handle(&mut self, event: ShellEvent) -> Option<LocateRequest> {
        match event {
            ShellEvent::LocateRequested => self.request_location(),
            ShellEvent::LocationResolved(result) => {
                self.on_location(result);
                None
            }
            ShellEvent::MapClicked { lat, lon } => {
                self.on_map_click(lat, lon);
                None
            }
        }
    }

    /// Starts a location request, or alerts right away if there is no
    /// location service.
    pub fn request_location(&mut self) -> Option<LocateRequest> {
        if !self.geolocator.is_supported() {
            self.sync.surface_mut().alert(UNSUPPORTED_MESSAGE);
            return None;
        }
        tracing::debug!("location requested");
        Some(self.geolocator.request())
    }

    /// Applies the answer to a location request.
    ///
    /// On success the user is placed (or moved) and the view recenters in
    /// the same call; if the engine is not attached yet, neither happens.
    /// On failure the person gets an alert and the engine is left alone.
    pub fn on_location(&mut self, result: GeolocationResult<GeoPoint>) {
        match result {
            Ok(point) => {
                let Some(engine) = self.sync.engine_mut() else {
                    tracing::warn!("engine not ready, user location dropped");
                    return;
                };
                tracing::info!(lat = point.lat(), lon = point.lon(), "user found");
                engine.set_user_location(point);
                self.sync.surface_mut().set_view(point, self.locate_zoom);
            }
            Err(error) => {
                tracing::warn!(%error, "location request failed");
                self.sync.surface_mut().alert(LOCATE_FAILED_MESSAGE);
            }
        }
    }

    /// Adds another person where the map was clicked.
    ///
    /// Ignored while the engine is still loading or if the coordinates are
    /// not finite.
    pub fn on_map_click(&mut self, lat: f64, lon: f64) {
        let Some(engine) = self.sync.engine_mut() else {
            tracing::debug!("click ignored: engine not ready");
            return;
        };
        match GeoPoint::new(lat, lon) {
            Ok(point) => {
                tracing::info!(lat, lon, "adding other person");
                engine.add_other_person(point);
            }
            Err(error) => tracing::warn!(%error, "click dropped"),
        }
    }

    /// The sync loop.
    #[must_use]
    pub fn sync(&self) -> &SyncLoop<E, S> {
        &self.sync
    }

    /// Mutable access to the sync loop (attach the engine once it loads).
    pub fn sync_mut(&mut self) -> &mut SyncLoop<E, S> {
        &mut self.sync
    }

    /// The location provider.
    #[must_use]
    pub fn geolocator(&self) -> &G {
        &self.geolocator
    }

    /// Mutable access to the location provider.
    pub fn geolocator_mut(&mut self) -> &mut G {
        &mut self.geolocator
    }
}
