//! # CROWDMAP Render Bridge
//!
//! Pulls positions out of the engine's coordinate buffer and keeps one map
//! marker per entity in step with it.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                        DATA FLOW                             │
//! ├──────────────────────────────────────────────────────────────┤
//! │  SyncLoop ──► EngineFacade (advance + query)                 │
//! │     │              │                                         │
//! │     │              └──► CoordinateView (borrowed, read-only) │
//! │     ▼                                                        │
//! │  MarkerPool (append only) ──► MapSurface (position, style)   │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Rules
//!
//! - The engine is the only writer of the buffer; this crate only reads
//! - A view lives for one tick at most
//! - Slot `i` is bound to marker `i` for the rest of the session

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod pool;
pub mod style;
pub mod surface;
pub mod sync;

pub use pool::MarkerPool;
pub use style::{style_for_slot, MarkerStyle, StyleKind, StyleSet};
pub use surface::{MapSurface, MarkerId, RecordedMarker, RecordingSurface};
pub use sync::{SyncLoop, SyncStats, TickOutcome};
