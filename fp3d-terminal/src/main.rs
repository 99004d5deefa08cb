/// FP3D Terminal Viewer
///
/// Walks a first-person camera around a small wireframe scene.
/// Controls:
///   - W/S, A/D, Space/C: Move along the world axes
///   - Q/E: Yaw, Up/Down: Pitch
///   - 1/2: Snap pitch/yaw to a quarter turn
///   - Left click: Pick a point on the z = 0 plane
///   - Wheel: Zoom the triangle
///   - Enter: Reset, Esc: Quit
///
/// Logs go to stderr; set RUST_LOG and redirect stderr to keep them off the screen.

use anyhow::Context;
use clap::Parser;
use fp3d_terminal::{cli::Cli, TerminalApp};

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    let config = cli.viewer_config();

    println!("FP3D Terminal Viewer - Loading...");
    println!("Starting terminal viewer (press Esc to quit)...");
    std::thread::sleep(std::time::Duration::from_secs(1));

    let mut app = TerminalApp::new(&config, cli.fps).context("terminal size unavailable")?;
    app.run().context("terminal session failed")?;

    println!("Thank you for using FP3D Terminal Viewer!");
    Ok(())
}
