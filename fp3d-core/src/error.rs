/// Error types for the math, camera and pipeline layers
use thiserror::Error;

use crate::projection::Plane;

/// Failures of partial arithmetic operations
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum MathError {
    /// Scalar division by zero, or a perspective divide with `w ≈ 0`
    #[error("division by zero")]
    DivideByZero,

    /// Normalizing a vector with no length
    #[error("degenerate vector: zero length has no direction")]
    DegenerateVector,

    /// Inverting a (numerically) singular matrix
    #[error("matrix is not invertible (determinant {determinant:e})")]
    NonInvertible { determinant: f64 },

    /// Intersecting a ray that runs parallel to the plane
    #[error("ray is parallel to the plane {plane}")]
    RayParallel { plane: Plane },
}

/// Result type for math operations
pub type MathResult<T> = Result<T, MathError>;

/// Camera lifecycle errors
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum CameraError {
    /// `rotate` was called before `init_camera`
    #[error("camera orientation used before init_camera")]
    Uninitialized,

    /// The view matrices were requested after a move or rotation without a rebuild
    #[error("view matrices are stale; call view_mat first")]
    StaleView,

    #[error(transparent)]
    Math(#[from] MathError),
}

/// Result type for camera operations
pub type CameraResult<T> = Result<T, CameraError>;
