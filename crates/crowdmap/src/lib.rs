//! # CROWDMAP
//!
//! The map shell, integrating the engine and the render bridge.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                              CROWDMAP                               │
//! ├─────────────────────────────────────────────────────────────────────┤
//! │                                                                     │
//! │  ┌─────────────────┐     ┌─────────────────┐     ┌───────────────┐  │
//! │  │  crowdmap_core  │     │ crowdmap_render │     │   crowdmap    │  │
//! │  │                 │────>│                 │<────│               │  │
//! │  │  • GeoPoint     │     │  • SyncLoop     │     │  • MapShell   │  │
//! │  │  • Buffer view  │     │  • MarkerPool   │     │  • SyncDriver │  │
//! │  │  • Engine       │     │  • Styles       │     │  • Config     │  │
//! │  └─────────────────┘     └─────────────────┘     └───────────────┘  │
//! │                                                                     │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - `config`: TOML configuration with defaults
//! - `driver`: Fixed-period timer interleaved with input
//! - `geolocation`: Location providers
//! - `shell`: Locate button and map click handlers
//!
//! ## Example
//!
//! ```
//! use crowdmap::core::{EngineFacade, PeopleEngine};
//! use crowdmap::render::{RecordingSurface, SyncLoop};
//! use crowdmap::{CrowdmapConfig, DeniedGeolocator, MapShell, ShellEvent};
//!
//! let config = CrowdmapConfig::default();
//! let sync = SyncLoop::new(
//!     Some(PeopleEngine::new(config.movement)),
//!     RecordingSurface::new(),
//!     config.styles.clone(),
//! );
//! let mut shell = MapShell::new(sync, DeniedGeolocator, &config);
//!
//! shell.handle(ShellEvent::MapClicked { lat: 51.5, lon: -0.1 });
//! shell.tick();
//!
//! assert_eq!(shell.sync().pool().len(), 1);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod config;
pub mod driver;
pub mod error;
pub mod geolocation;
pub mod shell;

// Re-export the lower crates
pub use crowdmap_core as core;
pub use crowdmap_render as render;

pub use config::{CrowdmapConfig, TileConfig, ViewConfig, DEFAULT_TICK_INTERVAL_MS};
pub use driver::{stop_channel, DriverStats, StopHandle, StopSignal, SyncDriver};
pub use error::{ConfigError, ConfigResult, GeolocationError, GeolocationResult};
pub use geolocation::{
    DeniedGeolocator, FixedGeolocator, Geolocator, LocateRequest, ManualGeolocator,
    UnsupportedGeolocator,
};
pub use shell::{MapShell, ShellEvent, LOCATE_FAILED_MESSAGE, UNSUPPORTED_MESSAGE};
