/// Placed wireframes and the per-tick draw pass
///
/// A point whose projection fails is skipped for the tick; the edges that
/// touch it are not drawn and the rest of the frame carries on.
use log::trace;

use crate::camera::ViewSnapshot;
use crate::error::MathResult;
use crate::geometry::Wireframe;
use crate::projection::Projector;
use crate::transform::SceneObject;
use crate::vector::Vec4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const GREEN: Color = Color::rgb(0, 255, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 255);
    pub const YELLOW: Color = Color::rgb(255, 255, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Receives projected primitives.
///
/// Points arrive as `(pixel x, pixel y, depth, w)` straight from
/// [`Projector::project_to_screen`].
pub trait LineCanvas {
    fn stroke_line(&mut self, from: Vec4, to: Vec4, color: Color);
}

#[derive(Debug, Clone, PartialEq)]
pub struct Placed {
    pub object: SceneObject,
    pub shape: Wireframe,
    pub color: Color,
}

impl Placed {
    pub fn new(object: SceneObject, shape: Wireframe, color: Color) -> Self {
        Self {
            object,
            shape,
            color,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DrawStats {
    pub drawn: usize,
    pub skipped: usize,
}

#[derive(Debug, Clone, Default)]
pub struct Scene {
    objects: Vec<Placed>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, placed: Placed) -> usize {
        self.objects.push(placed);
        self.objects.len() - 1
    }

    pub fn objects(&self) -> &[Placed] {
        &self.objects
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Placed> {
        self.objects.get_mut(index)
    }

    /// Project every edge against one view snapshot and stroke it.
    pub fn draw<C: LineCanvas>(
        &self,
        projector: &Projector,
        view: &ViewSnapshot,
        canvas: &mut C,
    ) -> DrawStats {
        let mut stats = DrawStats::default();

        for placed in &self.objects {
            let model = placed.object.model_matrix();
            let projected: Vec<MathResult<Vec4>> = placed
                .shape
                .vertices
                .iter()
                .map(|v| {
                    let world = model.apply_to_point(v.to_point()).xyz();
                    projector.project_to_screen(view, world)
                })
                .collect();

            for &[a, b] in &placed.shape.edges {
                let (Some(&from), Some(&to)) = (projected.get(a), projected.get(b)) else {
                    stats.skipped += 1;
                    continue;
                };
                match (from, to) {
                    (Ok(from), Ok(to)) => {
                        canvas.stroke_line(from, to, placed.color);
                        stats.drawn += 1;
                    }
                    (Err(err), _) | (_, Err(err)) => {
                        trace!("skipping edge {}-{}: {}", a, b, err);
                        stats.skipped += 1;
                    }
                }
            }
        }

        stats
    }
}
