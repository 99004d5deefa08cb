/// FP3D Web - WASM bindings for the first-person viewer
///
/// The page owns the canvas and the event handlers; this module owns the
/// camera and hands back projected line segments and pick results.
use fp3d_core::{
    Camera, Color, LineCanvas, Placed, Projector, Scene, SceneObject, Vec2, Vec3, Vec4,
    ViewSnapshot, ViewerConfig, Wireframe,
};
use std::fmt::Display;
use wasm_bindgen::prelude::*;
use web_sys::console;

/// Report an error on the browser console and hand it to the caller.
fn to_js<E: Display>(context: &str, err: E) -> JsValue {
    let message = JsValue::from_str(&format!("{}: {}", context, err));
    console::warn_1(&message);
    message
}

/// Flattens stroked lines into `[x0, y0, x1, y1, r, g, b, ...]`
#[derive(Default)]
struct SegmentBuffer {
    data: Vec<f64>,
}

impl LineCanvas for SegmentBuffer {
    fn stroke_line(&mut self, from: Vec4, to: Vec4, color: Color) {
        self.data.extend_from_slice(&[
            from.x,
            from.y,
            to.x,
            to.y,
            color.r as f64,
            color.g as f64,
            color.b as f64,
        ]);
    }
}

fn web_scene() -> Scene {
    let mut scene = Scene::new();
    scene.add(Placed::new(SceneObject::new(), Wireframe::triangle(), Color::RED));
    scene.add(Placed::new(SceneObject::new(), Wireframe::axes(1.0), Color::GREEN));
    scene
}

#[wasm_bindgen]
pub struct WebViewer {
    camera: Camera,
    projector: Projector,
    scene: Scene,
}

#[wasm_bindgen]
impl WebViewer {
    /// A viewer for a canvas of `width` x `height` pixels, eye two units
    /// behind the origin.
    #[wasm_bindgen(constructor)]
    pub fn new(width: f64, height: f64) -> WebViewer {
        let config = ViewerConfig {
            eye: Vec3::new(0.0, 0.0, -2.0),
            ..ViewerConfig::new(width, height)
        };
        WebViewer {
            camera: config.camera(),
            projector: Projector::from_config(&config),
            scene: web_scene(),
        }
    }

    pub fn move_by(&mut self, dx: f64, dy: f64, dz: f64) {
        self.camera.move_by(Vec3::new(dx, dy, dz));
    }

    /// Add to the pitch and yaw, in radians.
    pub fn rotate(&mut self, tilt: f64, angle: f64) -> Result<(), JsValue> {
        self.camera
            .rotate(tilt, angle)
            .map_err(|err| to_js("rotate", err))
    }

    pub fn reset(&mut self) {
        self.camera.reset();
    }

    pub fn eye(&self) -> Vec<f64> {
        self.camera.eye().to_array().to_vec()
    }

    pub fn tilt(&self) -> f64 {
        self.camera.tilt()
    }

    pub fn angle(&self) -> f64 {
        self.camera.angle()
    }

    /// `[px, py, depth, w]` for a world point
    pub fn project(&mut self, x: f64, y: f64, z: f64) -> Result<Vec<f64>, JsValue> {
        let view = self.view()?;
        self.projector
            .project_to_screen(&view, Vec3::new(x, y, z))
            .map(|p| p.to_array().to_vec())
            .map_err(|err| to_js("project", err))
    }

    /// World point on the z = 0 plane under a pixel
    pub fn pick(&mut self, px: f64, py: f64) -> Result<Vec<f64>, JsValue> {
        let view = self.view()?;
        self.projector
            .screen_to_world_ray(&view, Vec2::new(px, py))
            .and_then(|cast| cast.hits.z)
            .map(|hit| hit.to_array().to_vec())
            .map_err(|err| to_js("pick", err))
    }

    /// Line segments for this frame, seven numbers per segment:
    /// `x0, y0, x1, y1, r, g, b`.
    pub fn frame(&mut self) -> Result<Vec<f64>, JsValue> {
        let view = self.view()?;
        let mut buffer = SegmentBuffer::default();
        self.scene.draw(&self.projector, &view, &mut buffer);
        Ok(buffer.data)
    }
}

impl WebViewer {
    fn view(&mut self) -> Result<ViewSnapshot, JsValue> {
        self.camera.view_mat().map_err(|err| to_js("view", err))
    }
}

#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    console::log_1(&JsValue::from_str("fp3d-web ready"));
    Ok(())
}
