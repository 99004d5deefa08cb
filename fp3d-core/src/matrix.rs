/// 4x4 homogeneous transformation matrices
///
/// `Matrix` wraps a `nalgebra::Matrix4<f64>`. Vectors are columns and a
/// matrix applies as `M * v`. Every operation returns a new matrix.
///
/// Composition reads left to right as nested application:
/// `a.compose(&b)` (or `a * b`) applied to `v` is `a(b(v))`, so `b` acts first.
use std::fmt;
use std::ops::Mul;

use nalgebra::{Matrix3, Matrix4, Unit, Vector3};

use crate::error::{MathError, MathResult};
use crate::vector::{Vec3, Vec4};

/// Determinants smaller than this are treated as singular
pub const SINGULAR_TOLERANCE: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix {
    m: Matrix4<f64>,
}

impl Matrix {
    /// Build from row-major elements
    pub fn from_rows(rows: [[f64; 4]; 4]) -> Self {
        Self {
            m: Matrix4::from_fn(|r, c| rows[r][c]),
        }
    }

    pub fn identity() -> Self {
        Self {
            m: Matrix4::identity(),
        }
    }

    pub fn zero() -> Self {
        Self { m: Matrix4::zeros() }
    }

    /// Every element set to `value`
    pub fn constant(value: f64) -> Self {
        Self {
            m: Matrix4::repeat(value),
        }
    }

    /// Affine matrix whose columns are the given basis axes
    pub fn from_columns(x: Vec3, y: Vec3, z: Vec3) -> Self {
        Self {
            m: Matrix3::from_columns(&[*x, *y, *z]).to_homogeneous(),
        }
    }

    /// Affine matrix whose rows are the given basis axes (the transpose of
    /// [`Matrix::from_columns`]); maps world directions into that basis.
    pub fn from_basis_rows(x: Vec3, y: Vec3, z: Vec3) -> Self {
        Self::from_columns(x, y, z).transpose()
    }

    pub fn scale(v: Vec3) -> Self {
        Self {
            m: Matrix4::new_nonuniform_scaling(&*v),
        }
    }

    pub fn translation(v: Vec3) -> Self {
        Self {
            m: Matrix4::new_translation(&*v),
        }
    }

    pub fn rotation_x(angle: f64) -> Self {
        Self {
            m: Matrix4::from_axis_angle(&Vector3::x_axis(), angle),
        }
    }

    pub fn rotation_y(angle: f64) -> Self {
        Self {
            m: Matrix4::from_axis_angle(&Vector3::y_axis(), angle),
        }
    }

    pub fn rotation_z(angle: f64) -> Self {
        Self {
            m: Matrix4::from_axis_angle(&Vector3::z_axis(), angle),
        }
    }

    pub fn rotation_x_inverse(angle: f64) -> Self {
        Self::rotation_x(-angle)
    }

    pub fn rotation_y_inverse(angle: f64) -> Self {
        Self::rotation_y(-angle)
    }

    /// `rotation_x(v.x) ∘ rotation_y(v.y) ∘ rotation_z(v.z)`.
    ///
    /// The order is fixed: Z acts first, X last.
    pub fn rotation_euler(v: Vec3) -> Self {
        Self::rotation_x(v.x)
            .compose(&Self::rotation_y(v.y))
            .compose(&Self::rotation_z(v.z))
    }

    /// Rodrigues rotation by `angle` radians about `axis` (normalized here).
    pub fn rotation_axis_angle(axis: Vec3, angle: f64) -> MathResult<Self> {
        let n = axis.normalize()?;
        Ok(Self {
            m: Matrix4::from_axis_angle(&Unit::new_unchecked(*n), angle),
        })
    }

    /// Perspective projection with the vertical field of view in degrees.
    ///
    /// The last row is `[0, 0, 1, 0]`, so the transformed `w` is the
    /// eye-space depth and the perspective divide maps `near..far` onto
    /// `0..1`.
    pub fn perspective_projection(fov_degrees: f64, aspect: f64, near: f64, far: f64) -> Self {
        let tan_half = (fov_degrees.to_radians() * 0.5).tan();
        let depth = far - near;
        Self::from_rows([
            [1.0 / (tan_half * aspect), 0.0, 0.0, 0.0],
            [0.0, 1.0 / tan_half, 0.0, 0.0],
            [0.0, 0.0, far / depth, -far * near / depth],
            [0.0, 0.0, 1.0, 0.0],
        ])
    }

    /// Closed-form inverse of [`Matrix::perspective_projection`]
    pub fn inverse_perspective_projection(
        fov_degrees: f64,
        aspect: f64,
        near: f64,
        far: f64,
    ) -> Self {
        let tan_half = (fov_degrees.to_radians() * 0.5).tan();
        Self::from_rows([
            [tan_half * aspect, 0.0, 0.0, 0.0],
            [0.0, tan_half, 0.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
            [0.0, 0.0, (near - far) / (far * near), 1.0 / near],
        ])
    }

    /// Maps normalized device coordinates in `[-1, 1]` onto pixels.
    ///
    /// NDC `+y` lands on row 0 (origin top-left). NDC `+x` lands on column 0
    /// because camera-space `+x` is the camera's left axis.
    pub fn screen_space(width: f64, height: f64) -> Self {
        Self::from_rows([
            [-0.5 * width, 0.0, 0.0, 0.5 * width],
            [0.0, -0.5 * height, 0.0, 0.5 * height],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Closed-form inverse of [`Matrix::screen_space`]
    pub fn inverse_screen_space(width: f64, height: f64) -> Self {
        Self::from_rows([
            [-2.0 / width, 0.0, 0.0, 1.0],
            [0.0, -2.0 / height, 0.0, 1.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Matrix product `self * other`
    pub fn multiply(&self, other: &Self) -> Self {
        Self { m: self.m * other.m }
    }

    /// `self ∘ other`: the result applies `other` first, then `self`.
    pub fn compose(&self, other: &Self) -> Self {
        self.multiply(other)
    }

    pub fn transpose(&self) -> Self {
        Self {
            m: self.m.transpose(),
        }
    }

    /// The same matrix with its translation column cleared
    pub fn without_translation(&self) -> Self {
        let mut m = self.m;
        m.fixed_view_mut::<3, 1>(0, 3).fill(0.0);
        Self { m }
    }

    /// Full homogeneous transform of a 4-component vector
    pub fn apply_to_point(&self, v: Vec4) -> Vec4 {
        Vec4::from(self.m * *v)
    }

    /// Transform a direction by the upper-left 3x3 block only.
    ///
    /// The translation column is ignored, so this is only meaningful for
    /// rotation/scale matrices or for the directional part of a rigid
    /// transform.
    pub fn apply_to_direction(&self, v: Vec3) -> Vec3 {
        Vec3::from(self.m.fixed_view::<3, 3>(0, 0) * *v)
    }

    /// First column: the local X axis
    pub fn column_x(&self) -> Vec3 {
        self.column(0)
    }

    /// Second column: the local Y axis
    pub fn column_y(&self) -> Vec3 {
        self.column(1)
    }

    /// Third column: the local Z axis
    pub fn column_z(&self) -> Vec3 {
        self.column(2)
    }

    /// Fourth column: the translation
    pub fn column_w(&self) -> Vec3 {
        self.column(3)
    }

    fn column(&self, j: usize) -> Vec3 {
        Vec3::from(self.m.fixed_view::<3, 1>(0, j).into_owned())
    }

    /// The 3x3 matrix left after deleting `row` and `col`
    pub fn minor(&self, row: usize, col: usize) -> Matrix3<f64> {
        self.m.remove_row(row).remove_column(col)
    }

    fn cofactor(&self, row: usize, col: usize) -> f64 {
        let sign = if (row + col) % 2 == 0 { 1.0 } else { -1.0 };
        sign * determinant3x3(&self.minor(row, col))
    }

    /// Cofactor expansion along the first row
    pub fn determinant(&self) -> f64 {
        (0..4).map(|j| self.m[(0, j)] * self.cofactor(0, j)).sum()
    }

    /// General inverse of the full 4x4 matrix.
    ///
    /// Fails with [`MathError::NonInvertible`] when `|det|` is below
    /// [`SINGULAR_TOLERANCE`].
    pub fn invert(&self) -> MathResult<Self> {
        let det = self.determinant();
        if det.abs() < SINGULAR_TOLERANCE {
            return Err(MathError::NonInvertible { determinant: det });
        }
        self.m
            .try_inverse()
            .map(|m| Self { m })
            .ok_or(MathError::NonInvertible { determinant: det })
    }

    /// Element-wise comparison within `eps`
    pub fn approx_eq(&self, other: &Self, eps: f64) -> bool {
        (self.m - other.m).amax() <= eps
    }
}

/// Determinant of a 3x3 matrix (rule of Sarrus)
pub fn determinant3x3(m: &Matrix3<f64>) -> f64 {
    m[(0, 0)] * (m[(1, 1)] * m[(2, 2)] - m[(1, 2)] * m[(2, 1)])
        - m[(0, 1)] * (m[(1, 0)] * m[(2, 2)] - m[(1, 2)] * m[(2, 0)])
        + m[(0, 2)] * (m[(1, 0)] * m[(2, 1)] - m[(1, 1)] * m[(2, 0)])
}

impl Default for Matrix {
    fn default() -> Self {
        Self::identity()
    }
}

impl Mul for Matrix {
    type Output = Matrix;

    fn mul(self, rhs: Matrix) -> Matrix {
        self.multiply(&rhs)
    }
}

impl Mul<Vec4> for Matrix {
    type Output = Vec4;

    fn mul(self, rhs: Vec4) -> Vec4 {
        self.apply_to_point(rhs)
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let precision = f.precision().unwrap_or(2);
        for (i, row) in self.m.row_iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(
                f,
                "[{:>8.*} {:>8.*} {:>8.*} {:>8.*}]",
                precision, row[0], precision, row[1], precision, row[2], precision, row[3]
            )?;
        }
        Ok(())
    }
}

impl From<Matrix> for Matrix4<f64> {
    fn from(m: Matrix) -> Self {
        m.m
    }
}

impl From<Matrix4<f64>> for Matrix {
    fn from(m: Matrix4<f64>) -> Self {
        Self { m }
    }
}
