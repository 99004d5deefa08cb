use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use fp3d_core::{Matrix, Projector, Vec2, Vec3, ViewerConfig};

/// Deterministic spread of points in front of the camera
fn sample_points(count: usize) -> Vec<Vec3> {
    (0..count)
        .map(|i| {
            let t = i as f64 * 0.618_034;
            Vec3::new((t * 3.1).sin() * 2.0, (t * 1.7).cos() * 2.0, (t % 1.0) * 4.0)
        })
        .collect()
}

fn bench_project_to_screen(c: &mut Criterion) {
    let config = ViewerConfig {
        eye: Vec3::new(0.0, 0.0, -3.0),
        ..ViewerConfig::default()
    };
    let mut camera = config.camera();
    let projector = Projector::from_config(&config);
    let Ok(view) = camera.view_mat() else {
        return;
    };

    let mut group = c.benchmark_group("project_to_screen");
    for count in [100, 10_000] {
        let points = sample_points(count);
        group.bench_with_input(BenchmarkId::from_parameter(count), &points, |b, points| {
            b.iter(|| {
                points
                    .iter()
                    .filter_map(|&p| projector.project_to_screen(&view, black_box(p)).ok())
                    .count()
            })
        });
    }
    group.finish();
}

fn bench_screen_to_world_ray(c: &mut Criterion) {
    let config = ViewerConfig {
        eye: Vec3::new(0.0, 1.0, -3.0),
        ..ViewerConfig::default()
    };
    let mut camera = config.camera();
    let projector = Projector::from_config(&config);
    let Ok(view) = camera.view_mat() else {
        return;
    };

    c.bench_function("screen_to_world_ray", |b| {
        b.iter(|| projector.screen_to_world_ray(&view, black_box(Vec2::new(123.0, 456.0))))
    });
}

fn bench_invert(c: &mut Criterion) {
    let m = Matrix::rotation_euler(Vec3::new(0.3, 0.2, 0.1))
        .compose(&Matrix::translation(Vec3::new(1.0, 2.0, 3.0)));
    c.bench_function("matrix_invert", |b| b.iter(|| black_box(m).invert()));
}

criterion_group!(
    benches,
    bench_project_to_screen,
    bench_screen_to_world_ray,
    bench_invert
);
criterion_main!(benches);
