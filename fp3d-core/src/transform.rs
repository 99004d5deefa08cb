/// Placed scene objects and the capability interface used to move them
use crate::error::MathResult;
use crate::matrix::Matrix;
use crate::vector::Vec3;

/// Anything with a position and an orientation that can be transformed.
///
/// `transform` applies a matrix in the world frame about the object's own
/// position; everything else is built on top of the three required methods.
pub trait Transformable {
    fn transform(&mut self, m: &Matrix);
    fn position(&self) -> Vec3;
    fn set_position(&mut self, position: Vec3);

    fn translate(&mut self, dv: Vec3) {
        self.set_position(self.position() + dv);
    }

    fn translate_to_point(&mut self, point: Vec3) {
        self.translate(point - self.position());
    }

    fn scale(&mut self, s: Vec3) {
        self.transform(&Matrix::scale(s));
    }

    fn rotate_euler(&mut self, angles: Vec3) {
        self.transform(&Matrix::rotation_euler(angles));
    }

    fn rotate_axis(&mut self, axis: Vec3, angle: f64) -> MathResult<()> {
        self.transform(&Matrix::rotation_axis_angle(axis, angle)?);
        Ok(())
    }

    /// Apply `m` as if `pivot` were the origin: the position orbits the pivot
    /// and the orientation turns with it.
    fn transform_relative_point(&mut self, pivot: Vec3, m: &Matrix) {
        let offset = m.apply_to_point((self.position() - pivot).to_point()).xyz();
        self.set_position(pivot + offset);
        self.transform(&m.without_translation());
    }

    fn rotate_relative_point(&mut self, pivot: Vec3, angles: Vec3) {
        self.transform_relative_point(pivot, &Matrix::rotation_euler(angles));
    }
}

/// An object placed in the world: orientation/scale matrix plus a position
#[derive(Debug, Clone, PartialEq)]
pub struct SceneObject {
    matrix: Matrix,
    position: Vec3,
    /// Sum of all Euler rotations applied
    euler: Vec3,
    /// Sum of rotations about the object's own left/up/look-at axes
    own_axes: Vec3,
}

impl SceneObject {
    pub fn new() -> Self {
        Self::at(Vec3::zero())
    }

    pub fn at(position: Vec3) -> Self {
        Self {
            matrix: Matrix::identity(),
            position,
            euler: Vec3::zero(),
            own_axes: Vec3::zero(),
        }
    }

    /// Orientation and scale, without the position
    pub fn matrix(&self) -> &Matrix {
        &self.matrix
    }

    /// `translation(position) ∘ matrix`: object space to world space
    pub fn model_matrix(&self) -> Matrix {
        Matrix::translation(self.position).compose(&self.matrix)
    }

    pub fn to_world(&self, local: Vec3) -> Vec3 {
        self.model_matrix().apply_to_point(local.to_point()).xyz()
    }

    pub fn left(&self) -> Vec3 {
        self.matrix.column_x()
    }

    pub fn up(&self) -> Vec3 {
        self.matrix.column_y()
    }

    pub fn look_at(&self) -> Vec3 {
        self.matrix.column_z()
    }

    pub fn euler_angles(&self) -> Vec3 {
        self.euler
    }

    pub fn own_axis_angles(&self) -> Vec3 {
        self.own_axes
    }

    pub fn rotate_left(&mut self, angle: f64) -> MathResult<()> {
        self.rotate_axis(self.left(), angle)?;
        self.own_axes.x += angle;
        Ok(())
    }

    pub fn rotate_up(&mut self, angle: f64) -> MathResult<()> {
        self.rotate_axis(self.up(), angle)?;
        self.own_axes.y += angle;
        Ok(())
    }

    pub fn rotate_look_at(&mut self, angle: f64) -> MathResult<()> {
        self.rotate_axis(self.look_at(), angle)?;
        self.own_axes.z += angle;
        Ok(())
    }
}

impl Default for SceneObject {
    fn default() -> Self {
        Self::new()
    }
}

impl Transformable for SceneObject {
    fn transform(&mut self, m: &Matrix) {
        self.matrix = m.compose(&self.matrix);
    }

    fn position(&self) -> Vec3 {
        self.position
    }

    fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    fn rotate_euler(&mut self, angles: Vec3) {
        self.euler = self.euler + angles;
        self.transform(&Matrix::rotation_euler(angles));
    }

    fn rotate_relative_point(&mut self, pivot: Vec3, angles: Vec3) {
        self.euler = self.euler + angles;
        self.transform_relative_point(pivot, &Matrix::rotation_euler(angles));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_translate_and_translate_to_point() {
        let mut object = SceneObject::at(Vec3::new(1.0, 1.0, 1.0));
        object.translate(Vec3::new(0.5, -1.0, 2.0));
        assert_eq!(object.position(), Vec3::new(1.5, 0.0, 3.0));
        object.translate_to_point(Vec3::new(-4.0, 2.0, 0.0));
        assert_eq!(object.position(), Vec3::new(-4.0, 2.0, 0.0));
    }

    #[test]
    fn test_scale_keeps_position() {
        let mut object = SceneObject::at(Vec3::new(0.0, 0.0, 5.0));
        object.scale(Vec3::new(2.0, 2.0, 2.0));
        assert_eq!(object.position(), Vec3::new(0.0, 0.0, 5.0));
        assert!(object.to_world(Vec3::X).approx_eq(Vec3::new(2.0, 0.0, 5.0), EPS));
    }

    #[test]
    fn test_rotate_about_pivot_orbits() {
        let mut object = SceneObject::at(Vec3::new(2.0, 0.0, 0.0));
        object.rotate_relative_point(Vec3::zero(), Vec3::new(0.0, 0.0, FRAC_PI_2));
        assert!(object.position().approx_eq(Vec3::new(0.0, 2.0, 0.0), EPS));
        assert!(object.left().approx_eq(Vec3::Y, EPS));
        assert_eq!(object.euler_angles(), Vec3::new(0.0, 0.0, FRAC_PI_2));
    }

    #[test]
    fn test_translation_in_pivot_transform_moves_position_once() {
        let mut object = SceneObject::at(Vec3::new(1.0, 0.0, 0.0));
        object.transform_relative_point(Vec3::zero(), &Matrix::translation(Vec3::new(0.0, 3.0, 0.0)));
        assert_eq!(object.position(), Vec3::new(1.0, 3.0, 0.0));
        assert_eq!(object.matrix(), &Matrix::identity());
    }

    #[test]
    fn test_own_axis_rotation() {
        let mut object = SceneObject::new();
        object.rotate_up(FRAC_PI_2).unwrap();
        assert!(object.look_at().approx_eq(Vec3::X, EPS));
        // Now spin about the turned look-at axis.
        object.rotate_look_at(FRAC_PI_2).unwrap();
        assert!(object.look_at().approx_eq(Vec3::X, EPS));
        assert!(object.up().approx_eq(Vec3::Z, EPS));
        assert_eq!(object.own_axis_angles(), Vec3::new(0.0, FRAC_PI_2, FRAC_PI_2));
    }

    #[test]
    fn test_model_matrix_translates_last() {
        let mut object = SceneObject::at(Vec3::new(0.0, 0.0, 10.0));
        object.rotate_euler(Vec3::new(0.0, FRAC_PI_2, 0.0));
        assert!(object.to_world(Vec3::Z).approx_eq(Vec3::new(1.0, 0.0, 10.0), EPS));
    }

    #[test]
    fn test_works_through_trait_object() {
        let mut objects: Vec<Box<dyn Transformable>> =
            vec![Box::new(SceneObject::new()), Box::new(SceneObject::at(Vec3::X))];
        for object in objects.iter_mut() {
            object.translate(Vec3::Y);
        }
        assert_eq!(objects[0].position(), Vec3::Y);
        assert_eq!(objects[1].position(), Vec3::new(1.0, 1.0, 0.0));
    }
}
