/// Example: Render one frame of the demo scene to stdout without raw mode
///
/// Usage: cargo run --example snapshot -- [columns] [rows]

use std::env;
use fp3d_core::{Projector, Vec3, ViewerConfig};
use fp3d_terminal::{demo_scene, fit_to_terminal, AsciiRenderer};

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args: Vec<String> = env::args().collect();
    let columns: u16 = args.get(1).map(|s| s.parse()).transpose()?.unwrap_or(60);
    let rows: u16 = args.get(2).map(|s| s.parse()).transpose()?.unwrap_or(24);

    let config = ViewerConfig {
        eye: Vec3::new(0.5, 0.5, -2.0),
        ..fit_to_terminal(&ViewerConfig::default(), columns, rows)
    };
    let mut camera = config.camera();
    camera.rotate(0.1, -0.2)?;
    let view = camera.view_mat()?;

    let mut renderer = AsciiRenderer::new(columns as usize, rows as usize);
    let stats = demo_scene().draw(&Projector::from_config(&config), &view, &mut renderer);

    for line in renderer.to_lines() {
        println!("{}", line.trim_end());
    }
    println!("{} edges drawn, {} skipped", stats.drawn, stats.skipped);
    Ok(())
}
