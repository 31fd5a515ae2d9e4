//! # CROWDMAP Core Engine
//!
//! The simulation side of the map: it owns every tracked person and the
//! memory their coordinates live in.
//!
//! - Zero or one **user**, always at slot 0 when present
//! - Any number of **others**, appended in arrival order
//! - One contiguous buffer of interleaved `(lat, lon)` `f64` pairs
//!
//! ## Architecture Rules
//!
//! 1. **The engine is the only writer** - the renderer gets read-only views
//! 2. **Views are borrowed, never stored** - a [`CoordinateView`] borrows the
//!    engine, so it cannot survive a call that may grow (and relocate) the buffer
//! 3. **Movement is opaque** - callers only ever see "positions may change,
//!    the user does not"
//!
//! ## Example
//!
//! ```rust
//! use crowdmap_core::{EngineFacade, GeoPoint, PeopleEngine};
//!
//! let mut engine = PeopleEngine::default();
//! engine.set_user_location(GeoPoint::new(51.5, -0.09)?);
//! engine.add_other_person(GeoPoint::new(52.0, 0.1)?);
//! engine.advance_tick();
//!
//! let view = engine.coordinates();
//! assert_eq!(view.len(), 2 * engine.entity_count());
//! # Ok::<(), crowdmap_core::CoordinateError>(())
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod buffer;
pub mod engine;
pub mod error;
pub mod geo;

pub use buffer::{BufferHandle, CoordinateView};
pub use engine::{EngineFacade, MovementConfig, PeopleEngine, RandomWalk};
pub use error::{CoordinateError, CoreResult};
pub use geo::{EntityKind, GeoPoint};
