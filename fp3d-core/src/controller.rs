/// First-person controls: turns held keys into camera moves and turns
use std::f64::consts::FRAC_PI_2;

use log::debug;

use crate::camera::Camera;
use crate::config::ViewerConfig;
use crate::error::CameraResult;
use crate::input::{InputSource, Key};
use crate::vector::{Vec2, Vec3};

/// What the frontend has to act on after the camera update
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickInput {
    /// Cursor position if a pick was requested this tick
    pub pick: Option<Vec2>,
    /// Multiplicative zoom change this tick (1.0 when unchanged)
    pub zoom: f64,
    pub reset: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FirstPersonController {
    pub move_step: f64,
    pub turn_step: f64,
    pub zoom_in: f64,
    pub zoom_out: f64,
    zoom: f64,
}

const fn to_direction(positive: bool, negative: bool) -> f64 {
    match (positive, negative) {
        (true, false) => 1.0,
        (false, true) => -1.0,
        _ => 0.0,
    }
}

impl FirstPersonController {
    pub fn new(config: &ViewerConfig) -> Self {
        Self {
            move_step: config.move_step,
            turn_step: config.turn_step,
            zoom_in: config.zoom_in,
            zoom_out: config.zoom_out,
            zoom: 1.0,
        }
    }

    /// Accumulated wheel zoom since the last reset
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Apply one tick of input to the camera.
    ///
    /// Movement is along world axes. The caller rebuilds the view with
    /// `Camera::view_mat` afterwards.
    pub fn update<I: InputSource>(&mut self, camera: &mut Camera, input: &I) -> CameraResult<TickInput> {
        let mut tick = TickInput {
            pick: None,
            zoom: 1.0,
            reset: false,
        };

        if input.is_held(Key::Reset) {
            camera.reset();
            self.zoom = 1.0;
            tick.reset = true;
            debug!("controls reset");
        }

        let held = |key| input.is_held(key);
        let velocity = Vec3::new(
            to_direction(held(Key::StrafeLeft), held(Key::StrafeRight)),
            to_direction(held(Key::Rise), held(Key::Sink)),
            to_direction(held(Key::Forward), held(Key::Back)),
        );
        if velocity != Vec3::zero() {
            camera.move_by(velocity * self.move_step);
        }

        let yaw = to_direction(held(Key::YawLeft), held(Key::YawRight)) * self.turn_step;
        // Positive tilt pitches At towards -Up.
        let pitch = to_direction(held(Key::PitchDown), held(Key::PitchUp)) * self.turn_step;
        if yaw != 0.0 || pitch != 0.0 {
            camera.rotate(pitch, yaw)?;
        }

        if held(Key::SnapTilt) {
            camera.set_orientation(FRAC_PI_2, camera.angle())?;
        }
        if held(Key::SnapAngle) {
            camera.set_orientation(camera.tilt(), FRAC_PI_2)?;
        }

        let wheel = input.wheel_delta();
        if wheel > 0.0 {
            tick.zoom = self.zoom_in;
        } else if wheel < 0.0 {
            tick.zoom = self.zoom_out;
        }
        self.zoom *= tick.zoom;

        if input.just_pressed(Key::Pick) {
            tick.pick = Some(input.cursor());
        }

        Ok(tick)
    }
}
