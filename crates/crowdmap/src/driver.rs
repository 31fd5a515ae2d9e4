//! # Sync Driver
//!
//! Fixed-period timer that runs the sync loop, interleaved with input.
//!
//! ## Design
//!
//! Everything runs on one logical thread:
//! - timer ticks, input events and geolocation answers are awaited together
//! - whichever is ready first is handled to completion before the next wait
//! - stopping only prevents the next wait; a tick in progress always finishes

use std::future::Future;
use std::time::Duration;

use crowdmap_core::{EngineFacade, GeoPoint};
use crowdmap_render::MapSurface;
use tokio::sync::{mpsc, watch};
use tokio::time::MissedTickBehavior;

use crate::config::CrowdmapConfig;
use crate::error::{GeolocationError, GeolocationResult};
use crate::geolocation::{Geolocator, LocateRequest};
use crate::shell::{MapShell, ShellEvent};

/// Stops a running driver.
#[derive(Debug)]
pub struct StopHandle {
    sender: watch::Sender<bool>,
}

impl StopHandle {
    /// Asks the driver to stop before its next wait.
    pub fn stop(&self) {
        self.sender.send_replace(true);
    }
}

/// The receiving half of a [`StopHandle`].
#[derive(Debug, Clone)]
pub struct StopSignal {
    receiver: watch::Receiver<bool>,
}

impl StopSignal {
    /// Resolves once a stop was requested or the handle was dropped.
    async fn stopped(&mut self) {
        while !*self.receiver.borrow_and_update() {
            if self.receiver.changed().await.is_err() {
                return;
            }
        }
    }
}

/// Creates a connected stop handle and signal.
#[must_use]
pub fn stop_channel() -> (StopHandle, StopSignal) {
    let (sender, receiver) = watch::channel(false);
    (StopHandle { sender }, StopSignal { receiver })
}

/// Counters for one driver run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DriverStats {
    /// Timer ticks delivered to the sync loop.
    pub ticks: u64,
    /// Input events handled.
    pub events: u64,
    /// Location requests answered.
    pub locations_resolved: u64,
}

/// Periodic driver for a [`MapShell`].
#[derive(Clone, Copy, Debug)]
pub struct SyncDriver {
    period: Duration,
}

impl SyncDriver {
    /// Creates a driver with the given tick period.
    ///
    /// # Panics
    ///
    /// Panics if `period` is zero.
    #[must_use]
    pub fn new(period: Duration) -> Self {
        assert!(!period.is_zero(), "tick period must be positive");
        Self { period }
    }

    /// Creates a driver using the configured period.
    #[must_use]
    pub fn from_config(config: &CrowdmapConfig) -> Self {
        Self::new(config.tick_interval())
    }

    /// Tick period.
    #[must_use]
    pub const fn period(&self) -> Duration {
        self.period
    }

    /// Runs until `stop` fires.
    ///
    /// Input arrives on `events`; a closed channel just means no more input.
    /// At most one location request is in flight; a second press while one
    /// is pending replaces it.
    pub async fn run<E, S, G>(
        &self,
        shell: &mut MapShell<E, S, G>,
        mut events: mpsc::UnboundedReceiver<ShellEvent>,
        mut stop: StopSignal,
    ) -> DriverStats
    where
        E: EngineFacade,
        S: MapSurface,
        G: Geolocator,
    {
        let mut interval = tokio::time::interval(self.period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        let mut pending: Option<LocateRequest> = None;
        let mut stats = DriverStats::default();
        tracing::info!(period = ?self.period, "sync driver started");

        loop {
            tokio::select! {
                biased;

                () = stop.stopped() => break,

                Some(event) = events.recv() => {
                    stats.events += 1;
                    if let Some(request) = shell.handle(event) {
                        pending = Some(request);
                    }
                }

                result = answer(&mut pending) => {
                    pending = None;
                    stats.locations_resolved += 1;
                    shell.on_location(result);
                }

                _ = interval.tick() => {
                    stats.ticks += 1;
                    let outcome = shell.tick();
                    tracing::trace!(?outcome, "tick");
                }
            }
        }

        tracing::info!(
            ticks = stats.ticks,
            events = stats.events,
            "sync driver stopped"
        );
        stats
    }
}

impl Default for SyncDriver {
    fn default() -> Self {
        Self::from_config(&CrowdmapConfig::default())
    }
}

/// Waits for the pending request, or forever if there is none.
fn answer(
    pending: &mut Option<LocateRequest>,
) -> impl Future<Output = GeolocationResult<GeoPoint>> + '_ {
    async move {
        match pending {
            // A dropped sender means the provider gave up.
            Some(request) => request.await.unwrap_or(Err(GeolocationError::Unavailable)),
            None => std::future::pending().await,
        }
    }
}
