/// Command-line interface configuration
use clap::Parser;
use fp3d_core::{Vec3, ViewerConfig};

#[derive(Parser, Debug, Clone)]
#[command(name = "fp3d-terminal")]
#[command(about = "First-person wireframe viewer for the terminal", long_about = None)]
pub struct Cli {
    /// Vertical field of view in degrees
    #[arg(long, default_value_t = 90.0)]
    pub fov: f64,

    /// Near plane distance
    #[arg(long, default_value_t = 1.0)]
    pub near: f64,

    /// Far plane distance
    #[arg(long, default_value_t = 3.0)]
    pub far: f64,

    /// Start this far behind the origin, looking at it
    #[arg(long, default_value_t = 2.0)]
    pub distance: f64,

    /// World units moved per key event
    #[arg(long = "move-step", default_value_t = 0.1)]
    pub move_step: f64,

    /// Radians turned per key event
    #[arg(long = "turn-step", default_value_t = 0.05)]
    pub turn_step: f64,

    /// Target frames per second
    #[arg(long, default_value_t = 30)]
    pub fps: u32,
}

impl Cli {
    pub fn viewer_config(&self) -> ViewerConfig {
        ViewerConfig {
            fov: self.fov,
            near: self.near,
            far: self.far,
            eye: Vec3::new(0.0, 0.0, -self.distance),
            move_step: self.move_step,
            turn_step: self.turn_step,
            ..ViewerConfig::default()
        }
    }
}
