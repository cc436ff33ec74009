/// Geometry buffers handed to the rasterizer
use nalgebra::{Point3, Vector3};

/// A triangle defined by three vertex positions
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub vertices: [Point3<f32>; 3],
}

impl Triangle {
    pub fn new(v0: Point3<f32>, v1: Point3<f32>, v2: Point3<f32>) -> Self {
        Self {
            vertices: [v0, v1, v2],
        }
    }

    /// Calculate the (unnormalized) face normal from the vertex winding
    pub fn calculate_normal(&self) -> Vector3<f32> {
        let [v0, v1, v2] = self.vertices;

        let edge1 = v1 - v0;
        let edge2 = v2 - v0;

        edge1.cross(&edge2)
    }
}

/// Indexed triangle mesh: a position buffer and index triples into it.
///
/// Indices are not validated; triangles referencing missing positions are
/// skipped by [`Mesh::triangles`].
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    pub positions: Vec<Point3<f32>>,
    pub indices: Vec<[usize; 3]>,
}

impl Mesh {
    pub fn new(positions: Vec<Point3<f32>>, indices: Vec<[usize; 3]>) -> Self {
        Self { positions, indices }
    }

    /// Append a triangle, storing its three positions
    pub fn add_triangle(&mut self, triangle: Triangle) {
        let base = self.positions.len();
        self.positions.extend_from_slice(&triangle.vertices);
        self.indices.push([base, base + 1, base + 2]);
    }

    /// Resolve the index buffer into triangles
    pub fn triangles(&self) -> impl Iterator<Item = Triangle> + '_ {
        self.indices.iter().filter_map(|&[a, b, c]| {
            Some(Triangle::new(
                *self.positions.get(a)?,
                *self.positions.get(b)?,
                *self.positions.get(c)?,
            ))
        })
    }

    /// The single triangle behind the camera's default view
    pub fn demo_triangle() -> Self {
        Self::new(
            vec![
                Point3::new(2.0, 0.0, -2.0),
                Point3::new(0.0, 2.0, -2.0),
                Point3::new(-2.0, 0.0, -2.0),
            ],
            vec![[0, 1, 2]],
        )
    }
}
