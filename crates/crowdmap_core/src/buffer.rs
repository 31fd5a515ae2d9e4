//! Zero-copy view into the engine's coordinate buffer.
//!
//! The renderer reads positions directly from the memory the engine writes
//! to. Nothing is copied; the only thing the renderer gets is a borrowed
//! slice plus its length.
//!
//! # Memory Layout
//!
//! ```text
//! [lat: f64, lon: f64] × entity_count
//!  slot 0 is the user when one exists
//! ```

use crate::error::{CoordinateError, CoreResult};
use crate::geo::GeoPoint;

/// Where the buffer lives and how many pairs it holds.
///
/// This is the address-plus-length pair the engine reports each tick. It is
/// plain data: comparing two handles tells you whether the engine relocated
/// its storage in between, but a handle can never be turned back into a view.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BufferHandle {
    /// Start of the buffer.
    pub address: *const f64,
    /// Number of `(lat, lon)` pairs behind `address`.
    pub pair_count: usize,
}

impl BufferHandle {
    /// Number of `f64` values behind `address`.
    #[inline]
    #[must_use]
    pub const fn float_count(&self) -> usize {
        self.pair_count * 2
    }

    /// True when `other` points at a different allocation.
    #[inline]
    #[must_use]
    pub fn relocated_from(&self, other: &Self) -> bool {
        !std::ptr::eq(self.address, other.address)
    }
}

/// Read-only view of exactly `2 × count` floats.
///
/// The view borrows the engine, so the borrow checker refuses any mutating
/// engine call while it is alive. Acquire a fresh one every tick.
#[derive(Clone, Copy, Debug)]
pub struct CoordinateView<'a> {
    data: &'a [f64],
}

impl<'a> CoordinateView<'a> {
    /// Wraps a raw interleaved buffer.
    ///
    /// # Errors
    ///
    /// Returns [`CoordinateError::OddBufferLength`] if `data` does not hold a
    /// whole number of pairs.
    pub fn new(data: &'a [f64]) -> CoreResult<Self> {
        if data.len() % 2 == 0 {
            Ok(Self { data })
        } else {
            Err(CoordinateError::OddBufferLength(data.len()))
        }
    }

    /// Views a slice of points as the interleaved float buffer.
    #[inline]
    #[must_use]
    pub fn from_points(points: &'a [GeoPoint]) -> Self {
        Self {
            data: bytemuck::cast_slice(points),
        }
    }

    /// Number of floats (`2 × pair_count`).
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.data.len()
    }

    /// Number of `(lat, lon)` pairs.
    #[inline]
    #[must_use]
    pub const fn pair_count(&self) -> usize {
        self.data.len() / 2
    }

    /// True when there is nothing to read.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Reads the pair at `slot`, or `None` past the end.
    #[inline]
    #[must_use]
    pub fn get(&self, slot: usize) -> Option<GeoPoint> {
        let base = slot.checked_mul(2)?;
        let end = base.checked_add(2)?;
        match self.data.get(base..end) {
            Some(&[lat, lon]) => Some(GeoPoint::from_buffer(lat, lon)),
            _ => None,
        }
    }

    /// The first `pairs` pairs, or `None` if the view holds fewer.
    ///
    /// Readers bound every view to the count the engine reported, so a
    /// buffer longer than the count is never read past it.
    #[must_use]
    pub fn bounded(&self, pairs: usize) -> Option<Self> {
        let floats = pairs.checked_mul(2)?;
        self.data.get(..floats).map(|data| Self { data })
    }

    /// Iterates over every pair in slot order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = GeoPoint> + 'a {
        self.data
            .chunks_exact(2)
            .map(|pair| GeoPoint::from_buffer(pair[0], pair[1]))
    }

    /// The raw interleaved floats.
    #[inline]
    #[must_use]
    pub const fn as_slice(&self) -> &'a [f64] {
        self.data
    }

    /// Address and length of the viewed memory.
    #[inline]
    #[must_use]
    pub fn handle(&self) -> BufferHandle {
        BufferHandle {
            address: self.data.as_ptr(),
            pair_count: self.pair_count(),
        }
    }
}
