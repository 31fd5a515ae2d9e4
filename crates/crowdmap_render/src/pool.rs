//! # Marker Pool
//!
//! Slot-indexed marker handles that only ever grow.

use crowdmap_core::GeoPoint;

use crate::surface::{MapSurface, MarkerId};

/// A growable, never-shrinking list of marker handles.
///
/// Index `i` holds the marker bound to buffer slot `i`. The binding is
/// permanent: growth only appends, nothing is removed or reordered.
///
/// # Example
///
/// ```rust
/// use crowdmap_render::{MarkerPool, RecordingSurface};
///
/// let mut surface = RecordingSurface::new();
/// let mut pool = MarkerPool::new();
///
/// assert_eq!(pool.ensure_len(3, &mut surface), 3);
/// assert_eq!(pool.ensure_len(2, &mut surface), 0); // never shrinks
/// assert_eq!(pool.len(), 3);
/// ```
#[derive(Clone, Debug, Default)]
pub struct MarkerPool {
    /// Handles in slot order.
    markers: Vec<MarkerId>,
}

impl MarkerPool {
    /// Creates an empty pool.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            markers: Vec::new(),
        }
    }

    /// Number of markers in the pool.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.markers.len()
    }

    /// True when no marker has been created yet.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    /// Appends markers until the pool holds at least `count`.
    ///
    /// New markers are placed at `(0, 0)`; the caller repositions them in
    /// the same tick.
    ///
    /// # Returns
    ///
    /// The number of markers created.
    pub fn ensure_len<S: MapSurface + ?Sized>(&mut self, count: usize, surface: &mut S) -> usize {
        let missing = count.saturating_sub(self.markers.len());
        if missing == 0 {
            return 0;
        }

        self.markers.reserve(missing);
        for _ in 0..missing {
            let marker = surface.add_circle_marker(GeoPoint::default());
            self.markers.push(marker);
        }

        tracing::debug!(created = missing, total = self.markers.len(), "marker pool grown");
        missing
    }

    /// Marker bound to `slot`.
    #[inline]
    #[must_use]
    pub fn get(&self, slot: usize) -> Option<MarkerId> {
        self.markers.get(slot).copied()
    }

    /// Handles in slot order.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[MarkerId] {
        &self.markers
    }

    /// Iterates over `(slot, marker)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (usize, MarkerId)> + '_ {
        self.markers.iter().copied().enumerate()
    }
}
