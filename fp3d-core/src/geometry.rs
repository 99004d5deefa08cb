/// Wireframe shapes drawn by the frontends
use crate::vector::Vec3;

/// Vertices in object space joined by straight edges
#[derive(Debug, Clone, PartialEq)]
pub struct Wireframe {
    pub vertices: Vec<Vec3>,
    pub edges: Vec<[usize; 2]>,
}

impl Wireframe {
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            edges: Vec::new(),
        }
    }

    pub fn with_capacity(vertices: usize, edges: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertices),
            edges: Vec::with_capacity(edges),
        }
    }

    /// Add a vertex and return its index
    pub fn add_vertex(&mut self, v: Vec3) -> usize {
        self.vertices.push(v);
        self.vertices.len() - 1
    }

    /// Join two existing vertices; out-of-range indices are ignored
    pub fn add_edge(&mut self, a: usize, b: usize) {
        if a < self.vertices.len() && b < self.vertices.len() {
            self.edges.push([a, b]);
        }
    }

    /// Edge endpoints in object space
    pub fn segments(&self) -> impl Iterator<Item = (Vec3, Vec3)> + '_ {
        self.edges
            .iter()
            .map(move |&[a, b]| (self.vertices[a], self.vertices[b]))
    }

    /// Closed loop through the given points
    pub fn polygon(points: &[Vec3]) -> Self {
        let mut shape = Self::with_capacity(points.len(), points.len());
        for &p in points {
            shape.add_vertex(p);
        }
        for i in 0..points.len() {
            shape.add_edge(i, (i + 1) % points.len());
        }
        shape
    }

    /// The upright triangle in the `z = 0` plane
    pub fn triangle() -> Self {
        Self::polygon(&[
            Vec3::new(1.0, -1.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(-1.0, -1.0, 0.0),
        ])
    }

    /// Three unit-direction segments of length `len` from the origin
    pub fn axes(len: f64) -> Self {
        let mut shape = Self::with_capacity(4, 3);
        let origin = shape.add_vertex(Vec3::zero());
        for axis in [Vec3::X, Vec3::Y, Vec3::Z] {
            let tip = shape.add_vertex(axis * len);
            shape.add_edge(origin, tip);
        }
        shape
    }

    /// Axis-aligned cube centred on the origin
    pub fn cube(size: f64) -> Self {
        let half = size / 2.0;
        let mut shape = Self::with_capacity(8, 12);

        // Corner index bits: x = bit 0, y = bit 1, z = bit 2
        for i in 0..8 {
            let pick = |bit: usize| if i & (1 << bit) != 0 { half } else { -half };
            shape.add_vertex(Vec3::new(pick(0), pick(1), pick(2)));
        }
        for i in 0..8 {
            for bit in 0..3 {
                let j = i | (1 << bit);
                if j != i {
                    shape.add_edge(i, j);
                }
            }
        }
        shape
    }
}

impl Default for Wireframe {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_triangle_is_closed() {
        let triangle = Wireframe::triangle();
        assert_eq!(triangle.vertices.len(), 3);
        assert_eq!(triangle.edges, vec![[0, 1], [1, 2], [2, 0]]);
        assert!(triangle.vertices.iter().all(|v| v.z == 0.0));
    }

    #[test]
    fn test_cube_has_twelve_unit_edges() {
        let cube = Wireframe::cube(2.0);
        assert_eq!(cube.vertices.len(), 8);
        assert_eq!(cube.edges.len(), 12);
        for (a, b) in cube.segments() {
            assert_eq!((b - a).length(), 2.0);
        }
    }

    #[test]
    fn test_axes_share_origin() {
        let axes = Wireframe::axes(3.0);
        let tips: Vec<Vec3> = axes.segments().map(|(_, tip)| tip).collect();
        assert_eq!(tips, vec![Vec3::new(3.0, 0.0, 0.0), Vec3::new(0.0, 3.0, 0.0), Vec3::new(0.0, 0.0, 3.0)]);
    }

    #[test]
    fn test_bad_edge_is_ignored() {
        let mut shape = Wireframe::new();
        let a = shape.add_vertex(Vec3::zero());
        shape.add_edge(a, 5);
        assert!(shape.edges.is_empty());
    }
}
