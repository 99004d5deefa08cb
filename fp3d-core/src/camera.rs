/// First-person camera: eye position, orientation triad and view matrices
///
/// The camera has a single writer per tick. `move_by`/`rotate` mutate it,
/// then one `view_mat` call rebuilds the view matrices and hands out a
/// [`ViewSnapshot`] that renderers and the picking pipeline read for the rest
/// of the tick.
use std::f64::consts::TAU;

use log::{debug, trace};

use crate::error::{CameraError, CameraResult};
use crate::matrix::Matrix;
use crate::vector::{Vec3, Vec4};

/// Fixed optical parameters, set once at construction
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraIntrinsics {
    /// Vertical field of view in degrees
    pub fov: f64,
    pub near: f64,
    pub far: f64,
    /// Width over height
    pub aspect: f64,
}

impl CameraIntrinsics {
    pub fn new(fov: f64, near: f64, far: f64, aspect: f64) -> Self {
        Self {
            fov,
            near,
            far,
            aspect,
        }
    }

    pub fn projection(&self) -> Matrix {
        Matrix::perspective_projection(self.fov, self.aspect, self.near, self.far)
    }

    pub fn inverse_projection(&self) -> Matrix {
        Matrix::inverse_perspective_projection(self.fov, self.aspect, self.near, self.far)
    }
}

impl Default for CameraIntrinsics {
    fn default() -> Self {
        Self::new(90.0, 1.0, 3.0, 1.0)
    }
}

/// Orientation triad: three mutually orthonormal axes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Basis {
    pub left: Vec3,
    pub up: Vec3,
    pub at: Vec3,
}

impl Basis {
    /// Left = +X, Up = +Y, At = +Z
    pub const WORLD: Basis = Basis {
        left: Vec3::X,
        up: Vec3::Y,
        at: Vec3::Z,
    };
}

/// View matrices as of the last `view_mat` call
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewSnapshot {
    /// World space to camera space
    pub view: Matrix,
    /// Camera space to world space
    pub inverse_view: Matrix,
    pub eye: Vec3,
}

impl ViewSnapshot {
    pub fn world_to_camera(&self, p: Vec3) -> Vec4 {
        self.view.apply_to_point(p.to_point())
    }

    /// The eye recovered from the inverse view matrix
    pub fn camera_position(&self) -> Vec3 {
        self.inverse_view.apply_to_point(Vec4::new(0.0, 0.0, 0.0, 1.0)).xyz()
    }
}

/// Rows `[Left, -Left·E]`, `[Up, -Up·E]`, `[At, -At·E]`, `[0, 0, 0, 1]`.
///
/// Applied to a world point `p` this gives `R·(p - E)` where `R` has the
/// basis vectors as rows.
pub fn view_matrix(left: Vec3, up: Vec3, at: Vec3, eye: Vec3) -> Matrix {
    Matrix::from_rows([
        [left.x, left.y, left.z, -left.dot(eye)],
        [up.x, up.y, up.z, -up.dot(eye)],
        [at.x, at.y, at.z, -at.dot(eye)],
        [0.0, 0.0, 0.0, 1.0],
    ])
}

#[derive(Debug, Clone)]
pub struct Camera {
    eye: Vec3,
    home: Vec3,
    basis: Basis,
    /// Triad captured by `init_camera`; orientation is always re-derived from it
    initial: Option<Basis>,
    tilt: f64,
    angle: f64,
    vertical: Vec3,
    intrinsics: CameraIntrinsics,
    snapshot: Option<ViewSnapshot>,
    stale: bool,
}

impl Camera {
    pub fn new(eye: Vec3, basis: Basis, intrinsics: CameraIntrinsics) -> Self {
        Self {
            eye,
            home: eye,
            basis,
            initial: None,
            tilt: 0.0,
            angle: 0.0,
            vertical: basis.up,
            intrinsics,
            snapshot: None,
            stale: true,
        }
    }

    pub fn eye(&self) -> Vec3 {
        self.eye
    }

    pub fn basis(&self) -> Basis {
        self.basis
    }

    pub fn left(&self) -> Vec3 {
        self.basis.left
    }

    pub fn up(&self) -> Vec3 {
        self.basis.up
    }

    pub fn at(&self) -> Vec3 {
        self.basis.at
    }

    /// Accumulated pitch in `[0, 2π)`
    pub fn tilt(&self) -> f64 {
        self.tilt
    }

    /// Accumulated yaw in `[0, 2π)`
    pub fn angle(&self) -> f64 {
        self.angle
    }

    /// The world-relative vertical found by undoing the accumulated pitch
    pub fn vertical(&self) -> Vec3 {
        self.vertical
    }

    pub fn intrinsics(&self) -> &CameraIntrinsics {
        &self.intrinsics
    }

    pub fn is_initialized(&self) -> bool {
        self.initial.is_some()
    }

    /// Snapshot the current triad as the reference for all later rotations.
    ///
    /// Zeroes the tilt/angle accumulators, since they are measured from this
    /// triad.
    pub fn init_camera(&mut self) {
        self.initial = Some(self.basis);
        self.tilt = 0.0;
        self.angle = 0.0;
        self.vertical = self.basis.up;
        debug!(
            "camera initialised: eye={} left={} up={} at={}",
            self.eye, self.basis.left, self.basis.up, self.basis.at
        );
    }

    /// Translate the eye by `dv` in world coordinates.
    pub fn move_by(&mut self, dv: Vec3) {
        self.eye = self.eye + dv;
        self.stale = true;
    }

    /// Pitch by `tilt` about Left, then yaw by `angle` about the true vertical.
    pub fn rotate(&mut self, tilt: f64, angle: f64) -> CameraResult<()> {
        self.orient(self.tilt + tilt, self.angle + angle)
    }

    /// Jump to absolute tilt/angle values measured from the initial triad.
    pub fn set_orientation(&mut self, tilt: f64, angle: f64) -> CameraResult<()> {
        self.orient(tilt, angle)
    }

    /// Back to the construction eye and the initial triad
    pub fn reset(&mut self) {
        self.eye = self.home;
        if let Some(initial) = self.initial {
            self.basis = initial;
        }
        self.tilt = 0.0;
        self.angle = 0.0;
        self.vertical = self.basis.up;
        self.stale = true;
        debug!("camera reset to eye={}", self.eye);
    }

    fn orient(&mut self, tilt: f64, angle: f64) -> CameraResult<()> {
        let initial = self.initial.ok_or(CameraError::Uninitialized)?;

        let vertical = Matrix::rotation_axis_angle(self.basis.left, -self.tilt)?
            .apply_to_direction(self.basis.up)
            .normalize()?;
        let tilt = tilt.rem_euclid(TAU);
        let angle = angle.rem_euclid(TAU);

        let pitch = Matrix::rotation_axis_angle(initial.left, tilt)?;
        let yaw = Matrix::rotation_axis_angle(vertical, angle)?;
        let rotation = yaw.compose(&pitch);

        let basis = orthonormalize(Basis {
            left: rotation.apply_to_direction(initial.left),
            up: rotation.apply_to_direction(initial.up),
            at: rotation.apply_to_direction(initial.at),
        })?;

        // Nothing changes unless every step succeeded.
        self.vertical = vertical;
        self.tilt = tilt;
        self.angle = angle;
        self.basis = basis;
        self.stale = true;
        Ok(())
    }

    /// Rebuild the view matrix and its inverse from the current eye and triad.
    pub fn view_mat(&mut self) -> CameraResult<ViewSnapshot> {
        let view = view_matrix(self.basis.left, self.basis.up, self.basis.at, self.eye);
        let inverse_view = view.invert()?;
        let snapshot = ViewSnapshot {
            view,
            inverse_view,
            eye: self.eye,
        };
        self.snapshot = Some(snapshot);
        self.stale = false;
        trace!("view rebuilt at eye={}", self.eye);
        Ok(snapshot)
    }

    /// The last snapshot, unless the camera moved or turned since it was built.
    pub fn snapshot(&self) -> CameraResult<ViewSnapshot> {
        match self.snapshot {
            Some(snapshot) if !self.stale => Ok(snapshot),
            _ => Err(CameraError::StaleView),
        }
    }
}

/// Gram-Schmidt with At as the anchor axis, then Up, then Left.
fn orthonormalize(b: Basis) -> CameraResult<Basis> {
    let at = b.at.normalize()?;
    let up = (b.up - at * b.up.dot(at)).normalize()?;
    let left = (b.left - at * b.left.dot(at) - up * b.left.dot(up)).normalize()?;
    Ok(Basis { left, up, at })
}
