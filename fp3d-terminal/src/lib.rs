/// Terminal-based first-person wireframe viewer
use crossterm::{
    cursor,
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self, ClearType},
};
use fp3d_core::{
    Camera, CameraIntrinsics, Color as LineColor, DrawStats, FirstPersonController, Placed,
    Projector, Scene, SceneObject, Transformable, Vec2, Vec3, ViewSnapshot, ViewerConfig,
    Wireframe,
};
use log::{debug, warn};
use std::io::{self, stdout, Write};
use std::time::{Duration, Instant};

pub mod cli;
pub mod input;
pub mod renderer;

pub use input::TerminalInput;
pub use renderer::AsciiRenderer;

/// Index of the object the wheel zooms
const FOCUS: usize = 0;

/// Triangle at the origin, the world axes and a cube behind them
pub fn demo_scene() -> Scene {
    let mut scene = Scene::new();
    scene.add(Placed::new(
        SceneObject::new(),
        Wireframe::triangle(),
        LineColor::RED,
    ));
    scene.add(Placed::new(
        SceneObject::new(),
        Wireframe::axes(1.5),
        LineColor::YELLOW,
    ));
    scene.add(Placed::new(
        SceneObject::at(Vec3::new(0.0, 0.0, 2.0)),
        Wireframe::cube(1.0),
        LineColor::rgb(80, 160, 255),
    ));
    scene
}

/// Size the viewport to a terminal of `columns` x `rows` cells.
pub fn fit_to_terminal(config: &ViewerConfig, columns: u16, rows: u16) -> ViewerConfig {
    let (width, height) = AsciiRenderer::new(columns as usize, rows as usize).pixel_size();
    ViewerConfig {
        width,
        height,
        ..config.clone()
    }
}

/// Renderer and screen mapping for a terminal of `columns` x `rows` cells.
///
/// The camera keeps its aspect ratio; only the pixel mapping follows the terminal.
pub fn viewport(intrinsics: &CameraIntrinsics, columns: u16, rows: u16) -> (AsciiRenderer, Projector) {
    let renderer = AsciiRenderer::new(columns as usize, rows as usize);
    let (width, height) = renderer.pixel_size();
    (renderer, Projector::new(intrinsics, width, height))
}

/// Main application struct for the terminal viewer
pub struct TerminalApp {
    camera: Camera,
    controller: FirstPersonController,
    projector: Projector,
    scene: Scene,
    renderer: AsciiRenderer,
    input: TerminalInput,
    target_fps: u32,
    running: bool,
    last_frame: Instant,
    frame_count: u32,
    fps: f32,
    stats: DrawStats,
    pick_status: String,
}

impl TerminalApp {
    pub fn new(config: &ViewerConfig, target_fps: u32) -> io::Result<Self> {
        let (columns, rows) = terminal::size()?;
        let config = fit_to_terminal(config, columns, rows);
        debug!(
            "viewport {}x{} pixels on {}x{} cells",
            config.width, config.height, columns, rows
        );

        Ok(Self {
            camera: config.camera(),
            controller: FirstPersonController::new(&config),
            projector: Projector::from_config(&config),
            scene: demo_scene(),
            renderer: AsciiRenderer::new(columns as usize, rows as usize),
            input: TerminalInput::new(),
            target_fps: target_fps.max(1),
            running: true,
            last_frame: Instant::now(),
            frame_count: 0,
            fps: 0.0,
            stats: DrawStats::default(),
            pick_status: String::from("click to pick on z = 0"),
        })
    }

    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(
            stdout(),
            terminal::EnterAlternateScreen,
            EnableMouseCapture,
            cursor::Hide
        )?;

        let result = self.main_loop();

        // Cleanup
        execute!(
            stdout(),
            DisableMouseCapture,
            terminal::LeaveAlternateScreen,
            cursor::Show
        )?;
        terminal::disable_raw_mode()?;

        result
    }

    fn main_loop(&mut self) -> io::Result<()> {
        let target_frame_time = Duration::from_millis(1000 / self.target_fps as u64);

        while self.running {
            let frame_start = Instant::now();

            self.handle_input()?;

            if let Some(view) = self.update() {
                self.render(&view)?;
            }

            // Frame timing
            self.frame_count += 1;
            let elapsed = frame_start.elapsed();
            if elapsed < target_frame_time {
                std::thread::sleep(target_frame_time - elapsed);
            }

            // Update FPS counter
            let now = Instant::now();
            if (now - self.last_frame).as_secs() >= 1 {
                self.fps = self.frame_count as f32 / (now - self.last_frame).as_secs_f32();
                self.frame_count = 0;
                self.last_frame = now;
            }
        }

        Ok(())
    }

    /// Drain every pending event into this tick's input state.
    fn handle_input(&mut self) -> io::Result<()> {
        self.input.begin_tick();
        while event::poll(Duration::from_millis(0))? {
            let event = event::read()?;
            if let Event::Resize(columns, rows) = event {
                self.resize(columns, rows)?;
            }
            self.input.handle_event(&event);
        }
        if self.input.quit_requested() {
            self.running = false;
        }
        Ok(())
    }

    fn resize(&mut self, columns: u16, rows: u16) -> io::Result<()> {
        let (renderer, projector) = viewport(self.camera.intrinsics(), columns, rows);
        self.renderer = renderer;
        self.projector = projector;
        execute!(stdout(), terminal::Clear(ClearType::All))
    }

    /// Apply controls and rebuild the view once for this tick.
    fn update(&mut self) -> Option<ViewSnapshot> {
        let tick = match self.controller.update(&mut self.camera, &self.input) {
            Ok(tick) => tick,
            Err(err) => {
                warn!("input ignored: {}", err);
                return None;
            }
        };

        if tick.reset {
            self.scene = demo_scene();
            self.pick_status = String::from("reset");
        }
        if tick.zoom != 1.0 {
            if let Some(placed) = self.scene.get_mut(FOCUS) {
                placed.object.scale(Vec3::new(tick.zoom, tick.zoom, tick.zoom));
            }
        }

        let view = match self.camera.view_mat() {
            Ok(view) => view,
            Err(err) => {
                warn!("view not rebuilt: {}", err);
                return None;
            }
        };

        if let Some(cursor) = tick.pick {
            self.pick(&view, cursor);
        }
        Some(view)
    }

    fn pick(&mut self, view: &ViewSnapshot, cursor: Vec2) {
        let hit = self
            .projector
            .screen_to_world_ray(view, cursor)
            .and_then(|cast| cast.hits.z);
        self.pick_status = match hit {
            Ok(point) => format!("pick {:.2}", point),
            Err(err) => {
                warn!("pick at {} failed: {}", cursor, err);
                format!("pick failed: {}", err)
            }
        };
    }

    fn render(&mut self, view: &ViewSnapshot) -> io::Result<()> {
        self.renderer.clear();
        self.stats = self.scene.draw(&self.projector, view, &mut self.renderer);

        let mut stdout = stdout();
        queue!(stdout, cursor::MoveTo(0, 0))?;
        self.renderer.draw(&mut stdout)?;

        // Draw UI overlay
        let (_, rows) = terminal::size()?;
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            SetForegroundColor(Color::Yellow),
            Print(format!(
                "FP3D | FPS: {:.1} | eye {:.2} | tilt {:.2} angle {:.2} | zoom {:.2} | edges {}/{}",
                self.fps,
                self.camera.eye(),
                self.camera.tilt(),
                self.camera.angle(),
                self.controller.zoom(),
                self.stats.drawn,
                self.stats.drawn + self.stats.skipped,
            )),
            cursor::MoveTo(0, rows.saturating_sub(1)),
            Print(format!(
                "{} | WASD/Space/C=Move Q/E=Yaw Up/Down=Pitch 1/2=Snap Enter=Reset Wheel=Zoom Esc=Quit",
                self.pick_status
            )),
            ResetColor
        )?;

        stdout.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fp3d_core::LineCanvas;

    #[test]
    fn test_fit_doubles_rows() {
        let config = fit_to_terminal(&ViewerConfig::default(), 80, 24);
        assert_eq!(config.width, 80.0);
        assert_eq!(config.height, 48.0);
        assert_eq!(config.fov, 90.0);
    }

    #[test]
    fn test_demo_scene_renders_headless() {
        let config = ViewerConfig {
            eye: Vec3::new(0.0, 0.0, -2.0),
            ..fit_to_terminal(&ViewerConfig::default(), 40, 20)
        };
        let mut camera = config.camera();
        let view = camera.view_mat().unwrap();
        let mut renderer = AsciiRenderer::new(40, 20);
        let stats = demo_scene().draw(&Projector::from_config(&config), &view, &mut renderer);

        assert_eq!(stats.skipped, 0);
        assert_eq!(stats.drawn, 3 + 3 + 12);
        assert!(renderer.to_lines().iter().any(|line| !line.trim().is_empty()));
    }

    #[test]
    fn test_viewport_follows_terminal_size() {
        let intrinsics = ViewerConfig::default().intrinsics();
        let (renderer, projector) = viewport(&intrinsics, 100, 30);
        assert_eq!(renderer.pixel_size(), (100.0, 60.0));
        assert_eq!(projector.viewport(), (100.0, 60.0));
        assert_eq!(projector.projection(), &intrinsics.projection());
    }

    #[test]
    fn test_renderer_is_a_line_canvas() {
        fn takes_canvas<C: LineCanvas>(_: &C) {}
        takes_canvas(&AsciiRenderer::new(1, 1));
    }
}
