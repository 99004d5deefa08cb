/// Viewer configuration shared by the frontends
use crate::camera::{Basis, Camera, CameraIntrinsics};
use crate::vector::Vec3;

#[derive(Debug, Clone, PartialEq)]
pub struct ViewerConfig {
    /// Viewport width in pixels (or terminal cells)
    pub width: f64,
    /// Viewport height in pixels (or terminal cells)
    pub height: f64,
    /// Vertical field of view in degrees
    pub fov: f64,
    pub near: f64,
    pub far: f64,
    /// Eye position at start and after a reset
    pub eye: Vec3,
    /// World units moved per tick while a movement key is held
    pub move_step: f64,
    /// Radians turned per tick while a turn key is held
    pub turn_step: f64,
    pub zoom_in: f64,
    pub zoom_out: f64,
}

impl ViewerConfig {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    pub fn aspect(&self) -> f64 {
        self.width / self.height
    }

    pub fn intrinsics(&self) -> CameraIntrinsics {
        CameraIntrinsics::new(self.fov, self.near, self.far, self.aspect())
    }

    /// An initialised camera at `eye` looking down +Z
    pub fn camera(&self) -> Camera {
        let mut camera = Camera::new(self.eye, Basis::WORLD, self.intrinsics());
        camera.init_camera();
        camera
    }
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            width: 700.0,
            height: 700.0,
            fov: 90.0,
            near: 1.0,
            far: 3.0,
            eye: Vec3::zero(),
            move_step: 0.1,
            turn_step: 0.01,
            zoom_in: 1.1,
            zoom_out: 0.9,
        }
    }
}
