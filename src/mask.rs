//! # Lane Mask
//!
//! `LaneMask` marks which lanes of a [`Batch`](crate::Batch) are covered by the
//! primitive being shaded. Bit `i` set means lane `i` is active.
//!
//! The rasterizer builds it from coverage tests; the pixel stage receives it
//! alongside the interpolated parameters. Output in inactive lanes is
//! discarded by the caller.

use core::ops::{BitAnd, BitOr, Not};

use crate::batch::LANES;

/// A bitmask with one bit per lane.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct LaneMask(u16);

const _: () = assert!(LANES <= u16::BITS as usize, "LaneMask holds at most 16 lanes");

impl LaneMask {
    /// No lanes active.
    pub const NONE: Self = Self(0);
    /// All lanes active.
    pub const ALL: Self = Self(u16::MAX);

    /// Creates a mask from raw bits.
    #[inline(always)]
    pub const fn from_bits(bits: u16) -> Self {
        Self(bits)
    }

    /// Returns the raw bits.
    #[inline(always)]
    pub const fn bits(self) -> u16 {
        self.0
    }

    /// Creates a mask with the first `count` lanes active.
    ///
    /// `count` larger than [`LANES`] saturates to all lanes.
    #[inline(always)]
    pub const fn first(count: usize) -> Self {
        if count >= LANES {
            Self::ALL
        } else {
            Self(((1u32 << count) - 1) as u16)
        }
    }

    /// Returns whether `lane` is active.
    #[inline(always)]
    pub const fn is_active(self, lane: usize) -> bool {
        lane < LANES && (self.0 >> lane) & 1 != 0
    }

    /// Returns a copy with `lane` set. Lanes at or beyond [`LANES`] are
    /// ignored, matching [`is_active`](Self::is_active).
    #[inline(always)]
    #[must_use]
    pub const fn with(self, lane: usize) -> Self {
        if lane < LANES {
            Self(self.0 | (1 << lane))
        } else {
            self
        }
    }

    /// Number of active lanes.
    #[inline(always)]
    pub const fn count(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Returns `true` if no lane is active.
    #[inline(always)]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns `true` if every lane is active.
    #[inline(always)]
    pub const fn is_full(self) -> bool {
        self.0 == u16::MAX
    }

    /// Iterates over the indices of active lanes in ascending order.
    pub fn iter(self) -> impl Iterator<Item = usize> {
        (0..LANES).filter(move |&lane| self.is_active(lane))
    }
}

impl BitAnd for LaneMask {
    type Output = Self;
    #[inline(always)]
    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

impl BitOr for LaneMask {
    type Output = Self;
    #[inline(always)]
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl Not for LaneMask {
    type Output = Self;
    #[inline(always)]
    fn not(self) -> Self {
        Self(!self.0)
    }
}

impl From<u16> for LaneMask {
    fn from(bits: u16) -> Self {
        Self(bits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_builds_prefix_masks() {
        assert_eq!(LaneMask::first(0), LaneMask::NONE);
        assert_eq!(LaneMask::first(1).bits(), 0b1);
        assert_eq!(LaneMask::first(5).bits(), 0b1_1111);
        assert_eq!(LaneMask::first(LANES), LaneMask::ALL);
        assert_eq!(LaneMask::first(100), LaneMask::ALL);
    }

    #[test]
    fn active_lanes_iterate_in_order() {
        let mask = LaneMask::NONE.with(3).with(0).with(15);
        assert_eq!(mask.iter().collect::<Vec<_>>(), vec![0, 3, 15]);
        assert_eq!(mask.count(), 3);
        assert!(!mask.is_active(16));
    }

    #[test]
    fn with_ignores_out_of_range_lanes() {
        let mask = LaneMask::first(2);
        assert_eq!(mask.with(LANES), mask);
        assert_eq!(mask.with(LANES + 7), mask);
        assert_eq!(LaneMask::NONE.with(usize::MAX), LaneMask::NONE);
    }

    #[test]
    fn bitwise_ops() {
        let a = LaneMask::from_bits(0b1100);
        let b = LaneMask::from_bits(0b1010);
        assert_eq!((a & b).bits(), 0b1000);
        assert_eq!((a | b).bits(), 0b1110);
        assert!((!LaneMask::ALL).is_empty());
        assert!(LaneMask::ALL.is_full());
    }
}
