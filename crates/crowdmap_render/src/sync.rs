//! Sync Loop - one reconciliation pass per timer tick
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                          ONE TICK                            │
//! ├──────────────────────────────────────────────────────────────┤
//! │  engine attached?        no  → EngineNotReady                │
//! │  advance_tick()                                              │
//! │  entity_count() == 0     yes → EmptyWorld (no buffer read)   │
//! │  coordinates()           fresh view, cut to 2 × count floats │
//! │  view shorter than count?    → BufferShortfall (no writes)   │
//! │  pool.ensure_len(count)  append only                         │
//! │  user_exists()           read ONCE for the whole tick        │
//! │  for slot in 0..count    set position, set style             │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! The loop keeps no positions of its own. Everything it draws comes out
//! of the engine in the same tick, so there is nothing to drift.

use crowdmap_core::{BufferHandle, EngineFacade};

use crate::pool::MarkerPool;
use crate::style::{style_for_slot, StyleSet};
use crate::surface::MapSurface;

/// What a single tick did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// No engine attached yet; nothing was touched.
    EngineNotReady,
    /// The engine advanced but holds no entities; the buffer was not read.
    EmptyWorld,
    /// The engine's buffer held fewer pairs than its reported count.
    /// No marker was created, moved or restyled.
    BufferShortfall {
        /// Count the engine reported.
        entities: usize,
        /// Pairs actually present in the buffer.
        pairs: usize,
    },
    /// Every slot was repositioned and restyled.
    Reconciled {
        /// Entities read this tick.
        entities: usize,
        /// Markers appended to the pool this tick.
        markers_created: usize,
        /// The single `user_exists()` answer used for every slot.
        user_present: bool,
    },
}

impl TickOutcome {
    /// True if markers were updated.
    #[must_use]
    pub const fn is_reconciled(&self) -> bool {
        matches!(self, Self::Reconciled { .. })
    }
}

/// Counters across the life of a loop.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SyncStats {
    /// Ticks run, skipped ones included.
    pub ticks: u64,
    /// Ticks skipped because no engine was attached.
    pub skipped_not_ready: u64,
    /// Ticks that stopped at an empty world.
    pub skipped_empty: u64,
    /// Ticks dropped because the buffer was shorter than the count.
    pub skipped_short: u64,
    /// Ticks that reconciled markers.
    pub reconciled: u64,
    /// Markers created in total.
    pub markers_created: u64,
    /// Times the buffer was found at a new address.
    pub buffer_relocations: u64,
    /// Entity count seen by the most recent tick.
    pub last_entity_count: usize,
}

/// Drives the engine and mirrors its buffer onto the map.
///
/// The engine starts out optional: a loop can be built and ticked before
/// the simulation is ready, and those ticks do nothing.
pub struct SyncLoop<E, S> {
    /// The simulation, once available.
    engine: Option<E>,
    /// The map markers are drawn on.
    surface: S,
    /// Slot-aligned marker handles.
    pool: MarkerPool,
    /// User and other presets.
    styles: StyleSet,
    /// Buffer location seen by the last reconciling tick.
    last_buffer: Option<BufferHandle>,
    /// Statistics.
    stats: SyncStats,
}

impl<E: EngineFacade, S: MapSurface> SyncLoop<E, S> {
    /// Creates a loop. Pass `None` if the engine is still initializing.
    #[must_use]
    pub fn new(engine: Option<E>, surface: S, styles: StyleSet) -> Self {
        Self {
            engine,
            surface,
            pool: MarkerPool::new(),
            styles,
            last_buffer: None,
            stats: SyncStats::default(),
        }
    }

    /// Hands over the engine once it is ready.
    ///
    /// Returns the previously attached engine, if any. Existing markers keep
    /// their slots, so swapping engines mid-session is only meaningful if the
    /// new one has at least as many entities.
    pub fn attach_engine(&mut self, engine: E) -> Option<E> {
        tracing::info!("engine attached");
        self.engine.replace(engine)
    }

    /// True once an engine is attached.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.engine.is_some()
    }

    /// Runs one reconciliation pass.
    pub fn tick(&mut self) -> TickOutcome {
        self.stats.ticks += 1;

        let Some(engine) = self.engine.as_mut() else {
            self.stats.skipped_not_ready += 1;
            tracing::trace!("tick skipped: engine not ready");
            return TickOutcome::EngineNotReady;
        };

        engine.advance_tick();

        let count = engine.entity_count();
        self.stats.last_entity_count = count;
        if count == 0 {
            self.stats.skipped_empty += 1;
            return TickOutcome::EmptyWorld;
        }

        // Fresh every tick: the previous address may be gone.
        let full = engine.coordinates();
        let Some(view) = full.bounded(count) else {
            self.stats.skipped_short += 1;
            tracing::error!(
                entities = count,
                pairs = full.pair_count(),
                "coordinate buffer shorter than entity count, tick dropped"
            );
            return TickOutcome::BufferShortfall {
                entities: count,
                pairs: full.pair_count(),
            };
        };

        let handle = view.handle();
        if let Some(previous) = self.last_buffer {
            if handle.relocated_from(&previous) {
                self.stats.buffer_relocations += 1;
                tracing::trace!(pairs = handle.pair_count, "coordinate buffer relocated");
            }
        }
        self.last_buffer = Some(handle);

        let created = self.pool.ensure_len(count, &mut self.surface);

        let user_present = engine.user_exists();

        for (slot, (point, &marker)) in view.iter().zip(self.pool.as_slice()).enumerate() {
            self.surface.set_marker_position(marker, point);
            let style = self.styles.get(style_for_slot(slot, user_present));
            self.surface.set_marker_style(marker, style);
        }

        self.stats.reconciled += 1;
        self.stats.markers_created += created as u64;
        tracing::trace!(entities = count, created, user_present, "tick reconciled");

        TickOutcome::Reconciled {
            entities: count,
            markers_created: created,
            user_present,
        }
    }

    /// The attached engine, if any.
    #[must_use]
    pub fn engine(&self) -> Option<&E> {
        self.engine.as_ref()
    }

    /// Mutable access for input handlers. `None` while not ready.
    pub fn engine_mut(&mut self) -> Option<&mut E> {
        self.engine.as_mut()
    }

    /// The map surface.
    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Mutable access to the map surface (view changes, alerts).
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// The marker pool.
    #[must_use]
    pub fn pool(&self) -> &MarkerPool {
        &self.pool
    }

    /// The style presets.
    #[must_use]
    pub fn styles(&self) -> &StyleSet {
        &self.styles
    }

    /// Statistics since creation.
    #[must_use]
    pub fn stats(&self) -> SyncStats {
        self.stats
    }
}
