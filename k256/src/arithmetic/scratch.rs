//! Index-based scratch arenas with stack-discipline checkpoints.
//!
//! Memory is reserved once, up front, and handed out as index ranges.
//! Callers take a [`Checkpoint`] before a group of allocations and restore it
//! afterwards, which releases everything allocated since in one step.

use super::{affine::AffinePoint, projective::ProjectivePoint, scalar::WNAF_LEN};
use crate::{Error, Result};
use alloc::vec::Vec;
use core::ops::Range;

/// Fixed-capacity bump allocator over a pre-reserved buffer.
#[derive(Clone, Debug)]
pub struct Arena<T> {
    buf: Vec<T>,
    used: usize,
}

/// Allocation watermark of an [`Arena`].
///
/// Only meaningful for the arena that produced it.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Checkpoint(usize);

impl<T: Clone + Default> Arena<T> {
    /// Reserves room for `capacity` elements.
    ///
    /// Returns [`Error::Allocation`] if the memory cannot be reserved.
    pub fn with_capacity(capacity: usize) -> Result<Self> {
        let mut buf = Vec::new();
        buf.try_reserve_exact(capacity)
            .map_err(|_| Error::Allocation)?;
        buf.resize(capacity, T::default());
        Ok(Self { buf, used: 0 })
    }

    /// Total number of elements this arena can hand out.
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// Number of elements not yet allocated.
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.used
    }

    /// Hands out the next `len` elements, reset to their default value.
    ///
    /// Returns [`Error::ScratchExhausted`] (and allocates nothing) if fewer
    /// than `len` elements remain.
    pub fn alloc(&mut self, len: usize) -> Result<Range<usize>> {
        if len > self.remaining() {
            return Err(Error::ScratchExhausted);
        }
        let range = self.used..self.used + len;
        for slot in &mut self.buf[range.clone()] {
            *slot = T::default();
        }
        self.used += len;
        Ok(range)
    }

    /// Records the current allocation watermark.
    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint(self.used)
    }

    /// Releases every allocation made after `checkpoint` was taken.
    pub fn restore(&mut self, checkpoint: Checkpoint) {
        debug_assert!(checkpoint.0 <= self.used, "checkpoint restored out of order");
        self.used = checkpoint.0.min(self.used);
    }

    /// Releases every allocation.
    pub fn clear(&mut self) {
        self.used = 0;
    }

    /// Elements handed out so far, in allocation order.
    pub fn allocated(&self) -> &[T] {
        &self.buf[..self.used]
    }

    /// Borrows an allocated range.
    ///
    /// # Panics
    ///
    /// Panics if `range` reaches past the allocated prefix.
    pub fn get(&self, range: Range<usize>) -> &[T] {
        assert!(range.end <= self.used);
        &self.buf[range]
    }

    /// Mutably borrows an allocated range.
    ///
    /// # Panics
    ///
    /// Panics if `range` reaches past the allocated prefix.
    pub fn get_mut(&mut self, range: Range<usize>) -> &mut [T] {
        assert!(range.end <= self.used);
        &mut self.buf[range]
    }
}

/// Number of odd multiples `P, 3P, …, 15P` kept per point (window width 5).
pub(crate) const TABLE_SIZE: usize = 8;

/// Working memory for [`lincomb_vartime`](crate::lincomb_vartime).
///
/// Sized for a maximum number of point terms; the generator term is
/// accounted for separately and never counts against that maximum.
#[derive(Clone, Debug)]
pub struct StraussScratch {
    pub(crate) multiples: Arena<ProjectivePoint>,
    pub(crate) tables: Arena<AffinePoint>,
    pub(crate) digits: Arena<i8>,
    max_points: usize,
}

/// Watermarks of all arenas in a [`StraussScratch`].
#[derive(Copy, Clone, Debug)]
pub(crate) struct StraussCheckpoint {
    multiples: Checkpoint,
    tables: Checkpoint,
    digits: Checkpoint,
}

impl StraussScratch {
    /// Reserves working memory for up to `max_points` points plus the
    /// generator.
    ///
    /// If any reservation fails, the ones already made are released and
    /// [`Error::Allocation`] is returned.
    pub fn new(max_points: usize) -> Result<Self> {
        let terms = max_points.checked_add(1).ok_or(Error::Allocation)?;
        let entries = terms.checked_mul(TABLE_SIZE).ok_or(Error::Allocation)?;
        let digits = terms.checked_mul(WNAF_LEN).ok_or(Error::Allocation)?;

        Ok(Self {
            multiples: Arena::with_capacity(entries)?,
            tables: Arena::with_capacity(entries)?,
            digits: Arena::with_capacity(digits)?,
            max_points,
        })
    }

    /// Maximum number of point terms (excluding the generator).
    pub fn max_points(&self) -> usize {
        self.max_points
    }

    pub(crate) fn checkpoint(&self) -> StraussCheckpoint {
        StraussCheckpoint {
            multiples: self.multiples.checkpoint(),
            tables: self.tables.checkpoint(),
            digits: self.digits.checkpoint(),
        }
    }

    pub(crate) fn restore(&mut self, checkpoint: StraussCheckpoint) {
        self.multiples.restore(checkpoint.multiples);
        self.tables.restore(checkpoint.tables);
        self.digits.restore(checkpoint.digits);
    }
}

#[cfg(test)]
mod tests {
    use super::{Arena, StraussScratch};
    use crate::{Error, Scalar};

    #[test]
    fn alloc_beyond_capacity_fails() {
        let mut arena = Arena::<u32>::with_capacity(4).unwrap();
        let a = arena.alloc(3).unwrap();
        assert_eq!(a, 0..3);
        assert_eq!(arena.alloc(2), Err(Error::ScratchExhausted));
        // The failed request left the arena untouched.
        assert_eq!(arena.remaining(), 1);
        assert_eq!(arena.alloc(1).unwrap(), 3..4);
    }

    #[test]
    fn checkpoints_release_in_stack_order() {
        let mut arena = Arena::<Scalar>::with_capacity(8).unwrap();
        let outer = arena.checkpoint();
        let first = arena.alloc(2).unwrap();
        arena.get_mut(first.clone())[0] = Scalar::ONE;

        let inner = arena.checkpoint();
        arena.alloc(5).unwrap();
        assert_eq!(arena.remaining(), 1);

        arena.restore(inner);
        assert_eq!(arena.remaining(), 6);
        assert_eq!(arena.get(first)[0], Scalar::ONE);

        arena.restore(outer);
        assert_eq!(arena.remaining(), 8);
        assert!(arena.allocated().is_empty());
    }

    #[test]
    fn reused_slots_are_reset() {
        let mut arena = Arena::<u8>::with_capacity(2).unwrap();
        let cp = arena.checkpoint();
        let r = arena.alloc(2).unwrap();
        arena.get_mut(r).copy_from_slice(&[7, 9]);
        arena.restore(cp);
        let r = arena.alloc(2).unwrap();
        assert_eq!(arena.get(r), &[0, 0]);
    }

    #[test]
    fn impossible_reservation_reports_allocation_error() {
        assert_eq!(
            Arena::<u64>::with_capacity(usize::MAX).unwrap_err(),
            Error::Allocation
        );
        assert_eq!(StraussScratch::new(usize::MAX).unwrap_err(), Error::Allocation);
    }
}
