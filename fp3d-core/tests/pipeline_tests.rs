use fp3d_core::{
    Basis, Camera, CameraIntrinsics, Matrix, Plane, Projector, Vec2, Vec3, Vec4, ViewerConfig,
};

const EPS: f64 = 1e-9;

fn viewer(eye: Vec3, width: f64, height: f64) -> (Camera, Projector) {
    let config = ViewerConfig {
        eye,
        ..ViewerConfig::new(width, height)
    };
    (config.camera(), Projector::from_config(&config))
}

#[cfg(test)]
mod forward_tests {
    use super::*;

    #[test]
    fn test_identity_camera_keeps_origin() {
        let mut camera = Camera::new(Vec3::zero(), Basis::WORLD, CameraIntrinsics::default());
        camera.init_camera();
        let view = camera.view_mat().unwrap();
        assert_eq!(
            view.view.apply_to_point(Vec4::new(0.0, 0.0, 0.0, 1.0)),
            Vec4::new(0.0, 0.0, 0.0, 1.0)
        );
    }

    #[test]
    fn test_projection_depth_between_near_and_far() {
        let p = Matrix::perspective_projection(90.0, 1.0, 1.0, 3.0);
        let ndc = p
            .apply_to_point(Vec4::new(0.3, -0.2, 2.0, 1.0))
            .perspective_divide()
            .unwrap();
        assert!(ndc.z > 0.0 && ndc.z < 1.0, "depth {} out of range", ndc.z);
    }

    #[test]
    fn test_stage_order_matches_manual_composition() {
        let (mut camera, projector) = viewer(Vec3::new(0.5, 0.5, -4.0), 640.0, 480.0);
        camera.rotate(0.1, -0.2).unwrap();
        let view = camera.view_mat().unwrap();

        let world = Vec3::new(0.4, -0.3, 0.2);
        let clip = projector
            .projection()
            .apply_to_point(view.view.apply_to_point(world.to_point()));
        let ndc = clip.perspective_divide().unwrap();
        let manual = projector.screen_space().apply_to_point(ndc);

        let got = projector.project_to_screen(&view, world).unwrap();
        assert!((got.x - manual.x).abs() < EPS);
        assert!((got.y - manual.y).abs() < EPS);
        assert!((got.z - manual.z).abs() < EPS);
        assert!((got.w - clip.w).abs() < EPS);
    }

    #[test]
    fn test_farther_points_are_deeper() {
        let (mut camera, projector) = viewer(Vec3::new(0.0, 0.0, -1.0), 700.0, 700.0);
        let view = camera.view_mat().unwrap();
        let near = projector.project_to_screen(&view, Vec3::new(0.0, 0.0, 0.5)).unwrap();
        let far = projector.project_to_screen(&view, Vec3::new(0.0, 0.0, 1.5)).unwrap();
        assert!(near.z < far.z);
        assert!(near.w < far.w);
    }
}

#[cfg(test)]
mod round_trip_tests {
    use super::*;

    fn assert_recovers(camera: &mut Camera, projector: &Projector, world: Vec3) {
        let view = camera.view_mat().unwrap();
        let pixel = projector.project_to_screen(&view, world).unwrap();
        let cast = projector
            .screen_to_world_ray(&view, Vec2::new(pixel.x, pixel.y))
            .unwrap();
        let hit = cast.hits.on(Plane::Z).unwrap();
        assert!(
            hit.approx_eq(world, 1e-8),
            "picked {} for {} (pixel {})",
            hit,
            world,
            pixel
        );
    }

    #[test]
    fn test_round_trip_straight_on() {
        let (mut camera, projector) = viewer(Vec3::new(0.0, 0.0, -2.0), 700.0, 700.0);
        for world in [
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, -1.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(-0.75, 0.3, 0.0),
        ] {
            assert_recovers(&mut camera, &projector, world);
        }
    }

    #[test]
    fn test_round_trip_turned_camera_wide_viewport() {
        let (mut camera, projector) = viewer(Vec3::new(1.5, 2.0, -3.0), 1280.0, 720.0);
        camera.rotate(-0.35, 0.25).unwrap();
        camera.move_by(Vec3::new(-0.5, 0.0, 0.25));
        for world in [Vec3::new(0.2, 0.4, 0.0), Vec3::new(1.0, 1.0, 0.0), Vec3::new(2.5, 0.0, 0.0)] {
            assert_recovers(&mut camera, &projector, world);
        }
    }

    #[test]
    fn test_ray_hits_other_planes_consistently() {
        let (mut camera, projector) = viewer(Vec3::new(2.0, 3.0, -4.0), 800.0, 600.0);
        camera.rotate(-0.4, 0.3).unwrap();
        let view = camera.view_mat().unwrap();
        let cast = projector
            .screen_to_world_ray(&view, Vec2::new(420.0, 260.0))
            .unwrap();
        assert!((cast.ray.direction.length() - 1.0).abs() < EPS);
        for plane in Plane::ALL {
            let hit = cast.hits.on(plane).unwrap();
            // Every candidate lies on the ray's line.
            let offset = hit - cast.ray.origin;
            assert!(offset.cross(cast.ray.direction).length() < 1e-8);
        }
    }

    #[test]
    fn test_level_camera_cannot_pick_floor_at_horizon() {
        let (mut camera, projector) = viewer(Vec3::new(0.0, 1.0, -2.0), 700.0, 700.0);
        let view = camera.view_mat().unwrap();
        // The centre pixel looks straight along +Z, parallel to y = 0.
        let cast = projector
            .screen_to_world_ray(&view, Vec2::new(350.0, 350.0))
            .unwrap();
        assert!(cast.hits.on(Plane::Y).is_err());
        assert!(cast.hits.on(Plane::Z).is_ok());
    }
}
