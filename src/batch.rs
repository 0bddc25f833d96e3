//! The lane batch: one scalar quantity across [`LANES`] geometry elements.
//!
//! Every value flowing between the rasterizer and a shader is a `Batch`. A
//! vertex attribute, an interpolated parameter or an output color channel is
//! one `Batch` per quantity, with lane `i` belonging to vertex/pixel `i` of the
//! current group.
//!
//! Storage is a plain aligned `[f32; LANES]`. All operations are elementwise
//! loops over fixed-size arrays, which the compiler vectorizes on targets
//! with SIMD and runs lane by lane elsewhere. Results are identical either way.

use core::ops::{Add, AddAssign, Div, Mul, MulAssign, Neg, Sub, SubAssign};

use crate::mask::LaneMask;

/// The number of lanes in a batch.
pub const LANES: usize = 16;

/// A batch of [`LANES`] single-precision values.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[repr(C, align(64))]
pub struct Batch {
    lanes: [f32; LANES],
}

impl Batch {
    /// A batch with every lane set to zero.
    pub const ZERO: Self = Self::splat(0.0);
    /// A batch with every lane set to one.
    pub const ONE: Self = Self::splat(1.0);

    /// Creates a batch with all lanes set to `val`.
    #[inline(always)]
    #[must_use]
    pub const fn splat(val: f32) -> Self {
        Self {
            lanes: [val; LANES],
        }
    }

    /// Creates a batch from explicit per-lane values.
    #[inline(always)]
    #[must_use]
    pub const fn from_array(lanes: [f32; LANES]) -> Self {
        Self { lanes }
    }

    /// Creates a batch whose lane `i` holds `start + i`.
    #[inline(always)]
    #[must_use]
    pub fn sequential(start: f32) -> Self {
        Self::from_fn(|i| start + i as f32)
    }

    /// Creates a batch by evaluating `f` for each lane index.
    #[inline(always)]
    #[must_use]
    pub fn from_fn<F: FnMut(usize) -> f32>(f: F) -> Self {
        Self {
            lanes: core::array::from_fn(f),
        }
    }

    /// Returns the lanes as an array.
    #[inline(always)]
    pub const fn to_array(self) -> [f32; LANES] {
        self.lanes
    }

    /// Extracts a single lane.
    ///
    /// # Panics
    /// Panics if `index >= LANES`.
    #[inline(always)]
    pub fn lane(self, index: usize) -> f32 {
        self.lanes[index]
    }

    /// Loads a batch from a slice, handling boundary conditions.
    ///
    /// Slices shorter than [`LANES`] fill the remaining lanes with zero;
    /// extra elements are ignored.
    #[inline(always)]
    pub fn load_from_slice(data: &[f32]) -> Self {
        let mut lanes = [0.0; LANES];
        let n = data.len().min(LANES);
        lanes[..n].copy_from_slice(&data[..n]);
        Self { lanes }
    }

    /// Stores the batch into a slice, handling boundary conditions.
    ///
    /// Only `min(dest.len(), LANES)` lanes are written.
    #[inline(always)]
    pub fn store_into_slice(self, dest: &mut [f32]) {
        let n = dest.len().min(LANES);
        dest[..n].copy_from_slice(&self.lanes[..n]);
    }

    /// Applies `f` to every lane.
    #[inline(always)]
    #[must_use]
    pub fn map<F: Fn(f32) -> f32>(self, f: F) -> Self {
        Self::from_fn(|i| f(self.lanes[i]))
    }

    /// Combines two batches lane by lane.
    #[inline(always)]
    #[must_use]
    pub fn zip_with<F: Fn(f32, f32) -> f32>(self, other: Self, f: F) -> Self {
        Self::from_fn(|i| f(self.lanes[i], other.lanes[i]))
    }

    /// Computes the lane-wise minimum of two batches.
    #[inline(always)]
    #[must_use]
    pub fn min(self, other: Self) -> Self {
        self.zip_with(other, f32::min)
    }

    /// Computes the lane-wise maximum of two batches.
    #[inline(always)]
    #[must_use]
    pub fn max(self, other: Self) -> Self {
        self.zip_with(other, f32::max)
    }

    /// Clamps every lane to `[lo, hi]`.
    #[inline(always)]
    #[must_use]
    pub fn clamp(self, lo: f32, hi: f32) -> Self {
        self.max(Self::splat(lo)).min(Self::splat(hi))
    }

    /// Lane-wise square root.
    #[inline(always)]
    #[must_use]
    pub fn sqrt(self) -> Self {
        self.map(f32::sqrt)
    }

    /// Picks lanes from `if_true` where `mask` is set and from `if_false`
    /// everywhere else.
    #[inline(always)]
    #[must_use]
    pub fn select(mask: LaneMask, if_true: Self, if_false: Self) -> Self {
        Self::from_fn(|i| {
            if mask.is_active(i) {
                if_true.lanes[i]
            } else {
                if_false.lanes[i]
            }
        })
    }
}

impl From<f32> for Batch {
    #[inline(always)]
    fn from(val: f32) -> Self {
        Self::splat(val)
    }
}

impl From<[f32; LANES]> for Batch {
    #[inline(always)]
    fn from(lanes: [f32; LANES]) -> Self {
        Self::from_array(lanes)
    }
}

macro_rules! impl_binary_op {
    ($trait:ident, $method:ident, $assign_trait:ident, $assign_method:ident, $op:tt) => {
        impl $trait for Batch {
            type Output = Self;
            #[inline(always)]
            fn $method(self, rhs: Self) -> Self {
                Self::from_fn(|i| self.lanes[i] $op rhs.lanes[i])
            }
        }

        impl $trait<f32> for Batch {
            type Output = Self;
            #[inline(always)]
            fn $method(self, rhs: f32) -> Self {
                Self::from_fn(|i| self.lanes[i] $op rhs)
            }
        }

        impl $assign_trait for Batch {
            #[inline(always)]
            fn $assign_method(&mut self, rhs: Self) {
                *self = *self $op rhs;
            }
        }
    };
}

impl_binary_op!(Add, add, AddAssign, add_assign, +);
impl_binary_op!(Sub, sub, SubAssign, sub_assign, -);
impl_binary_op!(Mul, mul, MulAssign, mul_assign, *);

impl Div for Batch {
    type Output = Self;
    #[inline(always)]
    fn div(self, rhs: Self) -> Self {
        Self::from_fn(|i| self.lanes[i] / rhs.lanes[i])
    }
}

impl Div<f32> for Batch {
    type Output = Self;
    #[inline(always)]
    fn div(self, rhs: f32) -> Self {
        Self::from_fn(|i| self.lanes[i] / rhs)
    }
}

impl Neg for Batch {
    type Output = Self;
    #[inline(always)]
    fn neg(self) -> Self {
        self.map(|v| -v)
    }
}
