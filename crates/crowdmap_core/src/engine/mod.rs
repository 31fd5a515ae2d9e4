//! # People Engine
//!
//! Owns the coordinate buffer and is the only thing that writes to it.
//!
//! ```text
//!   slot:   0        1        2        3
//!         ┌────────┬────────┬────────┬────────┐
//!         │ user?  │ other  │ other  │ other  │   Vec<GeoPoint>
//!         └────────┴────────┴────────┴────────┘
//!           lat lon  lat lon  lat lon  lat lon    viewed as [f64]
//! ```
//!
//! The renderer talks to the engine only through [`EngineFacade`].

mod movement;

pub use movement::{MovementConfig, RandomWalk};

use crate::buffer::{BufferHandle, CoordinateView};
use crate::geo::GeoPoint;

/// The call surface the sync loop and input handlers depend on.
///
/// Every call is synchronous and total over its argument types. A failure
/// inside (allocation on growth) aborts the process; there is nothing to
/// retry.
pub trait EngineFacade {
    /// Creates the user at slot 0, or moves it if it already exists.
    ///
    /// Never creates a second user.
    fn set_user_location(&mut self, point: GeoPoint);

    /// Appends a new "other" person at the next free slot.
    fn add_other_person(&mut self, point: GeoPoint);

    /// Moves every "other" person one simulation step. The user stays put.
    fn advance_tick(&mut self);

    /// Number of live entities, user included.
    fn entity_count(&self) -> usize;

    /// True iff slot 0 currently holds the user.
    fn user_exists(&self) -> bool;

    /// Read-only view of exactly `2 × entity_count()` floats.
    ///
    /// The view borrows the engine; it cannot be kept across a mutating call.
    fn coordinates(&self) -> CoordinateView<'_>;

    /// Current location and length of the coordinate buffer.
    ///
    /// May differ between calls whenever the entity count has grown.
    fn buffer_handle(&self) -> BufferHandle {
        self.coordinates().handle()
    }
}

/// The stand-in simulation: one optional user plus randomly walking others.
///
/// # Resource caveat
///
/// There is no upper bound on [`add_other_person`](EngineFacade::add_other_person).
/// Every call grows the buffer by 16 bytes and every tick walks all of it.
#[derive(Clone, Debug)]
pub struct PeopleEngine {
    /// Slot-ordered positions. Slot 0 is the user when `user_exists`.
    people: Vec<GeoPoint>,
    /// Whether slot 0 belongs to the user.
    user_exists: bool,
    /// Step generator for the others.
    walk: RandomWalk,
    /// Number of `advance_tick` calls so far.
    tick_count: u64,
}

impl PeopleEngine {
    /// Creates an empty engine.
    #[must_use]
    pub fn new(movement: MovementConfig) -> Self {
        Self {
            people: Vec::new(),
            user_exists: false,
            walk: RandomWalk::new(movement),
            tick_count: 0,
        }
    }

    /// Positions in slot order.
    #[inline]
    #[must_use]
    pub fn people(&self) -> &[GeoPoint] {
        &self.people
    }

    /// The user's position, if one has been placed.
    #[must_use]
    pub fn user_location(&self) -> Option<GeoPoint> {
        if self.user_exists {
            self.people.first().copied()
        } else {
            None
        }
    }

    /// Number of ticks advanced so far.
    #[inline]
    #[must_use]
    pub const fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// The movement parameters in use.
    #[must_use]
    pub const fn movement(&self) -> &MovementConfig {
        self.walk.config()
    }
}

impl Default for PeopleEngine {
    fn default() -> Self {
        Self::new(MovementConfig::default())
    }
}

impl EngineFacade for PeopleEngine {
    fn set_user_location(&mut self, point: GeoPoint) {
        if self.user_exists {
            self.people[0] = point;
        } else {
            // Everyone already present shifts up one slot.
            self.people.insert(0, point);
            self.user_exists = true;
            tracing::debug!(others = self.people.len() - 1, "user placed at slot 0");
        }
    }

    fn add_other_person(&mut self, point: GeoPoint) {
        self.people.push(point);
        tracing::trace!(slot = self.people.len() - 1, "other person added");
    }

    fn advance_tick(&mut self) {
        let start = usize::from(self.user_exists);
        for person in self.people.iter_mut().skip(start) {
            let dlat = self.walk.step();
            let dlon = self.walk.step();
            *person = person.offset(dlat, dlon);
        }
        self.tick_count += 1;
    }

    #[inline]
    fn entity_count(&self) -> usize {
        self.people.len()
    }

    #[inline]
    fn user_exists(&self) -> bool {
        self.user_exists
    }

    #[inline]
    fn coordinates(&self) -> CoordinateView<'_> {
        CoordinateView::from_points(&self.people)
    }
}
