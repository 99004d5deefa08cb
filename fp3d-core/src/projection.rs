/// World ↔ pixel transform pipeline
///
/// Forward: `view → projection → perspective divide → screen space`.
/// Inverse: `pixel → NDC → view-space direction → world ray`, then the ray is
/// intersected with the three coordinate planes for picking.
///
/// The [`Projector`] only holds the matrices derived once from the viewport
/// and camera intrinsics; all per-tick state comes in through a
/// [`ViewSnapshot`].
use std::fmt;

use crate::camera::{CameraIntrinsics, ViewSnapshot};
use crate::config::ViewerConfig;
use crate::error::{MathError, MathResult};
use crate::matrix::Matrix;
use crate::vector::{Vec2, Vec3, Vec4, EPSILON};

/// Eye-space depth at which unprojected directions are taken
const REFERENCE_DEPTH: f64 = 1.0;

/// Coordinate plane through the world origin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Plane {
    /// The plane `x = 0`
    X,
    /// The plane `y = 0`
    Y,
    /// The plane `z = 0`
    Z,
}

impl Plane {
    pub const ALL: [Plane; 3] = [Plane::X, Plane::Y, Plane::Z];

    pub fn normal(self) -> Vec3 {
        match self {
            Plane::X => Vec3::X,
            Plane::Y => Vec3::Y,
            Plane::Z => Vec3::Z,
        }
    }
}

impl fmt::Display for Plane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Plane::X => write!(f, "x = 0"),
            Plane::Y => write!(f, "y = 0"),
            Plane::Z => write!(f, "z = 0"),
        }
    }
}

/// A half-line in world space with a unit direction
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    pub fn at(&self, t: f64) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Where the ray's line crosses `plane`: `t = -(origin·N) / (direction·N)`.
    ///
    /// The hit may lie behind the origin (`t < 0`); callers decide whether
    /// that is meaningful.
    pub fn intersect_plane(&self, plane: Plane) -> MathResult<Vec3> {
        let n = plane.normal();
        let denom = self.direction.dot(n);
        if denom.abs() < EPSILON {
            return Err(MathError::RayParallel { plane });
        }
        Ok(self.at(-self.origin.dot(n) / denom))
    }
}

/// One candidate pick point per coordinate plane
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaneHits {
    pub x: MathResult<Vec3>,
    pub y: MathResult<Vec3>,
    pub z: MathResult<Vec3>,
}

impl PlaneHits {
    pub fn of(ray: &Ray) -> Self {
        Self {
            x: ray.intersect_plane(Plane::X),
            y: ray.intersect_plane(Plane::Y),
            z: ray.intersect_plane(Plane::Z),
        }
    }

    pub fn on(&self, plane: Plane) -> MathResult<Vec3> {
        match plane {
            Plane::X => self.x,
            Plane::Y => self.y,
            Plane::Z => self.z,
        }
    }
}

/// A pixel unprojected into the world
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayCast {
    pub ray: Ray,
    pub hits: PlaneHits,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Projector {
    projection: Matrix,
    inverse_projection: Matrix,
    screen: Matrix,
    inverse_screen: Matrix,
    width: f64,
    height: f64,
}

impl Projector {
    pub fn new(intrinsics: &CameraIntrinsics, width: f64, height: f64) -> Self {
        Self {
            projection: intrinsics.projection(),
            inverse_projection: intrinsics.inverse_projection(),
            screen: Matrix::screen_space(width, height),
            inverse_screen: Matrix::inverse_screen_space(width, height),
            width,
            height,
        }
    }

    pub fn from_config(config: &ViewerConfig) -> Self {
        Self::new(&config.intrinsics(), config.width, config.height)
    }

    pub fn projection(&self) -> &Matrix {
        &self.projection
    }

    pub fn screen_space(&self) -> &Matrix {
        &self.screen
    }

    pub fn viewport(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    /// Project a world point to `(pixel x, pixel y, NDC depth, clip w)`.
    ///
    /// `w` is the eye-space depth of the point. Points on the eye plane
    /// (`w ≈ 0`) fail with [`MathError::DivideByZero`].
    pub fn project_to_screen(&self, view: &ViewSnapshot, world: Vec3) -> MathResult<Vec4> {
        let eye = view.view.apply_to_point(world.to_point());
        let clip = self.projection.apply_to_point(eye);
        let ndc = clip.perspective_divide()?;
        let pixel = self.screen.apply_to_point(ndc);
        Ok(Vec4::new(pixel.x, pixel.y, pixel.z, clip.w))
    }

    /// Pixel to normalized device coordinates
    pub fn pixel_to_ndc(&self, pixel: Vec2) -> Vec2 {
        let ndc = self
            .inverse_screen
            .apply_to_point(Vec4::new(pixel.x, pixel.y, 0.0, 1.0));
        Vec2::new(ndc.x, ndc.y)
    }

    /// Cast the ray through `pixel` and intersect it with the coordinate planes.
    pub fn screen_to_world_ray(&self, view: &ViewSnapshot, pixel: Vec2) -> MathResult<RayCast> {
        let ndc = self.pixel_to_ndc(pixel);
        let eye = self
            .inverse_projection
            .apply_to_point(Vec4::new(ndc.x, ndc.y, 0.0, 1.0));
        let eye_direction = Vec4::new(eye.x, eye.y, REFERENCE_DEPTH, 0.0);

        let direction = view
            .inverse_view
            .apply_to_direction(eye_direction.xyz())
            .normalize()?;
        let origin = view
            .inverse_view
            .apply_to_point(Vec4::new(0.0, 0.0, 0.0, 1.0))
            .xyz();

        let ray = Ray { origin, direction };
        Ok(RayCast {
            ray,
            hits: PlaneHits::of(&ray),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::{Basis, Camera};

    const EPS: f64 = 1e-9;

    fn setup(eye: Vec3) -> (Camera, Projector) {
        let config = ViewerConfig {
            eye,
            ..ViewerConfig::new(700.0, 500.0)
        };
        (config.camera(), Projector::from_config(&config))
    }

    #[test]
    fn test_center_projects_to_viewport_center() {
        let (mut camera, projector) = setup(Vec3::new(0.0, 0.0, -2.0));
        let view = camera.view_mat().unwrap();
        let p = projector.project_to_screen(&view, Vec3::zero()).unwrap();
        assert!((p.x - 350.0).abs() < EPS);
        assert!((p.y - 250.0).abs() < EPS);
        assert_eq!(p.w, 2.0);
        assert!(p.z > 0.0 && p.z < 1.0);
    }

    #[test]
    fn test_left_and_up_map_to_top_left() {
        let (mut camera, projector) = setup(Vec3::new(0.0, 0.0, -2.0));
        let view = camera.view_mat().unwrap();
        let p = projector
            .project_to_screen(&view, Vec3::new(0.5, 0.5, 0.0))
            .unwrap();
        assert!(p.x < 350.0);
        assert!(p.y < 250.0);
    }

    #[test]
    fn test_point_on_eye_plane_fails() {
        let (mut camera, projector) = setup(Vec3::zero());
        let view = camera.view_mat().unwrap();
        assert_eq!(
            projector.project_to_screen(&view, Vec3::new(1.0, 0.0, 0.0)),
            Err(MathError::DivideByZero)
        );
    }

    #[test]
    fn test_center_pixel_casts_along_at() {
        let (mut camera, projector) = setup(Vec3::new(1.0, 2.0, -3.0));
        camera.rotate(0.2, 0.5).unwrap();
        let view = camera.view_mat().unwrap();
        let cast = projector
            .screen_to_world_ray(&view, Vec2::new(350.0, 250.0))
            .unwrap();
        assert!(cast.ray.direction.approx_eq(camera.at(), EPS));
        assert!(cast.ray.origin.approx_eq(camera.eye(), EPS));
    }

    #[test]
    fn test_plane_hits_lie_on_their_planes() {
        let (mut camera, projector) = setup(Vec3::new(1.0, 2.0, -3.0));
        camera.rotate(0.3, 0.4).unwrap();
        let view = camera.view_mat().unwrap();
        let cast = projector
            .screen_to_world_ray(&view, Vec2::new(100.0, 400.0))
            .unwrap();
        for plane in Plane::ALL {
            let hit = cast.hits.on(plane).unwrap();
            assert!(hit.dot(plane.normal()).abs() < EPS, "{} missed {}", hit, plane);
        }
    }

    #[test]
    fn test_parallel_ray_is_reported() {
        let ray = Ray {
            origin: Vec3::new(0.0, 1.0, 0.0),
            direction: Vec3::X,
        };
        assert_eq!(
            ray.intersect_plane(Plane::Y),
            Err(MathError::RayParallel { plane: Plane::Y })
        );
        assert_eq!(ray.intersect_plane(Plane::X), Ok(Vec3::new(0.0, 1.0, 0.0)));
    }

    #[test]
    fn test_pixel_to_ndc_corners() {
        let (_, projector) = setup(Vec3::zero());
        for (pixel, ndc) in [
            (Vec2::new(0.0, 0.0), Vec2::new(1.0, 1.0)),
            (Vec2::new(350.0, 250.0), Vec2::new(0.0, 0.0)),
            (Vec2::new(700.0, 500.0), Vec2::new(-1.0, -1.0)),
        ] {
            let got = projector.pixel_to_ndc(pixel);
            assert!((got - ndc).length() < EPS, "{} -> {}", pixel, got);
        }
    }

    #[test]
    fn test_projection_matches_camera_intrinsics() {
        let camera = Camera::new(Vec3::zero(), Basis::WORLD, CameraIntrinsics::new(60.0, 0.5, 50.0, 1.6));
        let projector = Projector::new(camera.intrinsics(), 1600.0, 1000.0);
        assert_eq!(projector.projection(), &camera.intrinsics().projection());
        assert_eq!(projector.viewport(), (1600.0, 1000.0));
    }
}
