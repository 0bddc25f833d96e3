//! Uniform-side vector and matrix types.
//!
//! These are scalar values set up once per draw call. The `transform`
//! methods apply them to lane batches inside shaders. Matrices are
//! row-major: `m[row][col]`, with column vectors on the right.

use core::ops::{Mul, Neg};

use crate::batch::Batch;

/// A 3-component vector.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[allow(missing_docs)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    /// Creates a vector from its components.
    #[inline]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Dot product.
    #[inline]
    pub fn dot(self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Euclidean length.
    #[inline]
    pub fn length(self) -> f32 {
        self.dot(self).sqrt()
    }

    /// Returns a unit-length copy, or the zero vector unchanged.
    #[inline]
    pub fn normalized(self) -> Self {
        let len = self.length();
        if len == 0.0 {
            self
        } else {
            Self::new(self.x / len, self.y / len, self.z / len)
        }
    }
}

impl Neg for Vec3 {
    type Output = Self;
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}

/// A 3x3 matrix, used for normals.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Mat3 {
    /// Rows.
    pub m: [[f32; 3]; 3],
}

impl Default for Mat3 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mat3 {
    /// The identity matrix.
    pub const IDENTITY: Self = Self {
        m: [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
    };

    /// Multiplies a batch of column vectors by this matrix.
    #[inline]
    pub fn transform(&self, x: Batch, y: Batch, z: Batch) -> [Batch; 3] {
        core::array::from_fn(|row| {
            let r = self.m[row];
            x * r[0] + y * r[1] + z * r[2]
        })
    }
}

/// A 4x4 matrix for homogeneous transforms.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Mat4 {
    /// Rows.
    pub m: [[f32; 4]; 4],
}

impl Default for Mat4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mat4 {
    /// The identity matrix.
    pub const IDENTITY: Self = Self {
        m: [
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ],
    };

    /// A translation by `(x, y, z)`.
    pub fn translation(x: f32, y: f32, z: f32) -> Self {
        let mut out = Self::IDENTITY;
        out.m[0][3] = x;
        out.m[1][3] = y;
        out.m[2][3] = z;
        out
    }

    /// A scale by `(x, y, z)` along the axes.
    pub fn scale(x: f32, y: f32, z: f32) -> Self {
        let mut out = Self::IDENTITY;
        out.m[0][0] = x;
        out.m[1][1] = y;
        out.m[2][2] = z;
        out
    }

    /// The rotation/scale part, used as the normal matrix for rigid transforms.
    pub fn upper3x3(&self) -> Mat3 {
        Mat3 {
            m: core::array::from_fn(|row| core::array::from_fn(|col| self.m[row][col])),
        }
    }

    /// Multiplies a batch of homogeneous column vectors by this matrix.
    #[inline]
    pub fn transform(&self, x: Batch, y: Batch, z: Batch, w: Batch) -> [Batch; 4] {
        core::array::from_fn(|row| {
            let r = self.m[row];
            x * r[0] + y * r[1] + z * r[2] + w * r[3]
        })
    }
}

impl Mul for Mat4 {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        Self {
            m: core::array::from_fn(|row| {
                core::array::from_fn(|col| (0..4).map(|k| self.m[row][k] * rhs.m[k][col]).sum())
            }),
        }
    }
}
