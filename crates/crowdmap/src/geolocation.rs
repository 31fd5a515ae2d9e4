//! # Geolocation Providers
//!
//! The device location service is an external collaborator. A request
//! genuinely suspends: it returns a receiver that resolves later with
//! either a position or an error. Nothing is applied until it does.

use crowdmap_core::GeoPoint;
use tokio::sync::oneshot;

use crate::error::{GeolocationError, GeolocationResult};

/// A pending location request.
pub type LocateRequest = oneshot::Receiver<GeolocationResult<GeoPoint>>;

/// Source of the user's position.
pub trait Geolocator {
    /// False when the host has no location service at all.
    fn is_supported(&self) -> bool {
        true
    }

    /// Starts a request. The receiver resolves exactly once.
    fn request(&mut self) -> LocateRequest;
}

/// Always answers with the same position.
#[derive(Clone, Copy, Debug)]
pub struct FixedGeolocator {
    position: GeoPoint,
}

impl FixedGeolocator {
    /// Creates a provider that reports `position`.
    #[must_use]
    pub const fn new(position: GeoPoint) -> Self {
        Self { position }
    }
}

impl Geolocator for FixedGeolocator {
    fn request(&mut self) -> LocateRequest {
        resolved(Ok(self.position))
    }
}

/// Always refuses, as if the person denied permission.
#[derive(Clone, Copy, Debug, Default)]
pub struct DeniedGeolocator;

impl Geolocator for DeniedGeolocator {
    fn request(&mut self) -> LocateRequest {
        resolved(Err(GeolocationError::PermissionDenied))
    }
}

/// A host with no location service.
#[derive(Clone, Copy, Debug, Default)]
pub struct UnsupportedGeolocator;

impl Geolocator for UnsupportedGeolocator {
    fn is_supported(&self) -> bool {
        false
    }

    fn request(&mut self) -> LocateRequest {
        resolved(Err(GeolocationError::Unsupported))
    }
}

/// Holds requests open until the host answers them.
///
/// Models a real device: the answer arrives some time after the request,
/// possibly several ticks later.
#[derive(Debug, Default)]
pub struct ManualGeolocator {
    waiting: Vec<oneshot::Sender<GeolocationResult<GeoPoint>>>,
}

impl ManualGeolocator {
    /// Creates a provider with nothing outstanding.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of requests not yet answered.
    #[must_use]
    pub fn outstanding(&self) -> usize {
        self.waiting.len()
    }

    /// Answers every outstanding request with `result`.
    ///
    /// Returns how many requests were answered.
    pub fn resolve(&mut self, result: GeolocationResult<GeoPoint>) -> usize {
        let mut delivered = 0;
        for sender in self.waiting.drain(..) {
            if sender.send(result).is_ok() {
                delivered += 1;
            }
        }
        delivered
    }
}

impl Geolocator for ManualGeolocator {
    fn request(&mut self) -> LocateRequest {
        // Requests whose receiver was dropped can never be delivered.
        self.waiting.retain(|sender| !sender.is_closed());
        let (sender, receiver) = oneshot::channel();
        self.waiting.push(sender);
        receiver
    }
}

fn resolved(result: GeolocationResult<GeoPoint>) -> LocateRequest {
    let (sender, receiver) = oneshot::channel();
    // The receiver is alive right here, so this cannot fail.
    let _ = sender.send(result);
    receiver
}
