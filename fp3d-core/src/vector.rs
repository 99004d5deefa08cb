/// 2-, 3- and 4-component vectors backed by nalgebra
///
/// Each type wraps the matching `nalgebra` vector and derefs to it, so the
/// components read as `v.x`, `v.y`, ... Division and normalization are
/// partial and return [`MathResult`].
use std::fmt;
use std::ops::{Add, Deref, DerefMut, Mul, Neg, Sub};

use nalgebra::{Vector2, Vector3, Vector4};

use crate::error::{MathError, MathResult};

/// Tolerance below which a length, `w` or dot product counts as zero
pub const EPSILON: f64 = 1e-9;

/// Writes `(a, b, ...)` honouring the caller's `{:.N}` precision (3 by default).
fn write_components(f: &mut fmt::Formatter<'_>, components: &[f64]) -> fmt::Result {
    let precision = f.precision().unwrap_or(3);
    write!(f, "(")?;
    for (i, c) in components.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{:.*}", precision, c)?;
    }
    write!(f, ")")
}

/// A 2D vector, used for pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vec2(Vector2<f64>);

impl Vec2 {
    pub const fn new(x: f64, y: f64) -> Self {
        Self(Vector2::new(x, y))
    }

    pub const fn zero() -> Self {
        Self::new(0.0, 0.0)
    }

    pub fn length(self) -> f64 {
        self.0.norm()
    }

    pub fn try_div(self, s: f64) -> MathResult<Self> {
        if s == 0.0 {
            return Err(MathError::DivideByZero);
        }
        Ok(Self(self.0 / s))
    }
}

/// A 3D vector: positions, directions and basis axes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vec3(Vector3<f64>);

impl Vec3 {
    pub const X: Self = Self::new(1.0, 0.0, 0.0);
    pub const Y: Self = Self::new(0.0, 1.0, 0.0);
    pub const Z: Self = Self::new(0.0, 0.0, 1.0);

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self(Vector3::new(x, y, z))
    }

    pub const fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    pub fn dot(self, other: Self) -> f64 {
        self.0.dot(&other.0)
    }

    pub fn cross(self, other: Self) -> Self {
        Self(self.0.cross(&other.0))
    }

    pub fn length_squared(self) -> f64 {
        self.0.norm_squared()
    }

    pub fn length(self) -> f64 {
        self.0.norm()
    }

    /// Divide every component by `s`; fails only for an exact zero divisor.
    pub fn try_div(self, s: f64) -> MathResult<Self> {
        if s == 0.0 {
            return Err(MathError::DivideByZero);
        }
        Ok(Self(self.0 / s))
    }

    /// Unit vector in the same direction.
    ///
    /// Fails with [`MathError::DegenerateVector`] when the length is not
    /// above [`EPSILON`].
    pub fn normalize(self) -> MathResult<Self> {
        self.0
            .try_normalize(EPSILON)
            .map(Self)
            .ok_or(MathError::DegenerateVector)
    }

    /// Append a homogeneous coordinate
    pub fn to_vec4(self, w: f64) -> Vec4 {
        Vec4(self.0.push(w))
    }

    /// Homogeneous point (`w = 1`)
    pub fn to_point(self) -> Vec4 {
        self.to_vec4(1.0)
    }

    pub fn approx_eq(self, other: Self, eps: f64) -> bool {
        (self.0 - other.0).amax() <= eps
    }

    pub fn to_array(self) -> [f64; 3] {
        self.0.into()
    }
}

/// A homogeneous 4D vector
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vec4(Vector4<f64>);

impl Vec4 {
    pub const fn new(x: f64, y: f64, z: f64, w: f64) -> Self {
        Self(Vector4::new(x, y, z, w))
    }

    pub const fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0)
    }

    /// Drop the homogeneous coordinate
    pub fn xyz(self) -> Vec3 {
        Vec3(self.0.xyz())
    }

    pub fn try_div(self, s: f64) -> MathResult<Self> {
        if s == 0.0 {
            return Err(MathError::DivideByZero);
        }
        Ok(Self(self.0 / s))
    }

    /// Divide `x, y, z` by `w` and return the point with `w = 1`.
    ///
    /// A `w` within [`EPSILON`] of zero is a point on the eye plane and has no
    /// projection.
    pub fn perspective_divide(self) -> MathResult<Self> {
        if self.w.abs() < EPSILON {
            return Err(MathError::DivideByZero);
        }
        Ok(Self((self.0.xyz() / self.w).push(1.0)))
    }

    pub fn approx_eq(self, other: Self, eps: f64) -> bool {
        (self.0 - other.0).amax() <= eps
    }

    pub fn to_array(self) -> [f64; 4] {
        self.0.into()
    }
}

macro_rules! impl_vector_ops {
    ($ty:ident, $inner:ident) => {
        impl Deref for $ty {
            type Target = $inner<f64>;
            fn deref(&self) -> &Self::Target {
                &self.0
            }
        }

        impl DerefMut for $ty {
            fn deref_mut(&mut self) -> &mut Self::Target {
                &mut self.0
            }
        }

        impl Default for $ty {
            fn default() -> Self {
                Self::zero()
            }
        }

        impl Add for $ty {
            type Output = Self;
            fn add(self, rhs: Self) -> Self {
                Self(self.0 + rhs.0)
            }
        }

        impl Sub for $ty {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self {
                Self(self.0 - rhs.0)
            }
        }

        impl Mul<f64> for $ty {
            type Output = Self;
            fn mul(self, s: f64) -> Self {
                Self(self.0 * s)
            }
        }

        impl Neg for $ty {
            type Output = Self;
            fn neg(self) -> Self {
                Self(-self.0)
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write_components(f, self.0.as_slice())
            }
        }

        impl From<$ty> for $inner<f64> {
            fn from(v: $ty) -> Self {
                v.0
            }
        }

        impl From<$inner<f64>> for $ty {
            fn from(v: $inner<f64>) -> Self {
                Self(v)
            }
        }
    };
}

impl_vector_ops!(Vec2, Vector2);
impl_vector_ops!(Vec3, Vector3);
impl_vector_ops!(Vec4, Vector4);
