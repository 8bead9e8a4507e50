//! Base polyhedra that subdivision starts from.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};
use terra_math::Xyz;

use crate::{FlatGeometry, Geometry, Triangle, TriangleMesh, Vertex};

const X: f32 = 0.525_731_1;
const Z: f32 = 0.850_650_8;

const ICOSAHEDRON_VERTICES: [[f32; 3]; 12] = [
    [-X, 0.0, Z],
    [X, 0.0, Z],
    [-X, 0.0, -Z],
    [X, 0.0, -Z],
    [0.0, Z, X],
    [0.0, Z, -X],
    [0.0, -Z, X],
    [0.0, -Z, -X],
    [Z, X, 0.0],
    [-Z, X, 0.0],
    [Z, -X, 0.0],
    [-Z, -X, 0.0],
];

const ICOSAHEDRON_FACES: [[u32; 3]; 20] = [
    [0, 4, 1],
    [0, 9, 4],
    [9, 5, 4],
    [4, 5, 8],
    [4, 8, 1],
    [8, 10, 1],
    [8, 3, 10],
    [5, 3, 8],
    [5, 2, 3],
    [2, 7, 3],
    [7, 10, 3],
    [7, 6, 10],
    [7, 11, 6],
    [11, 0, 6],
    [0, 1, 6],
    [6, 1, 10],
    [9, 0, 11],
    [9, 11, 2],
    [9, 2, 5],
    [7, 2, 11],
];

/// A regular icosahedron of the given circumradius.
///
/// Faces are wound so that their normals point outwards.
pub fn icosahedron(geometry: Box<dyn Geometry>, radius: f32) -> TriangleMesh {
    let mut mesh = TriangleMesh::new(geometry);
    for v in ICOSAHEDRON_VERTICES {
        mesh.add_vertex(Vertex::new(Xyz::from(v).normalised() * radius));
    }
    for [a, b, c] in ICOSAHEDRON_FACES {
        mesh.add_triangle(Triangle::new(c, b, a));
    }
    mesh
}

/// Outline of a flat terrain or cloud patch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlatShape {
    Triangle,
    Square,
    #[default]
    Hexagon,
}

impl FlatShape {
    /// Build the patch at altitude `z` on [`FlatGeometry`].
    ///
    /// The triangle is a single face through three points on the unit
    /// circle; the square and hexagon are fans around a centre vertex.
    pub fn build(self, z: f32) -> TriangleMesh {
        let mut mesh = TriangleMesh::new(Box::new(FlatGeometry));
        let on_circle = |angle: f64| Xyz::new(angle.cos() as f32, angle.sin() as f32, z);
        match self {
            FlatShape::Triangle => {
                for i in 0..3 {
                    mesh.add_vertex(Vertex::new(on_circle(f64::from(i) * 2.0 * PI / 3.0)));
                }
                mesh.add_triangle(Triangle::new(0, 1, 2));
            }
            FlatShape::Square | FlatShape::Hexagon => {
                let sides: u32 = if self == FlatShape::Square { 4 } else { 6 };
                mesh.add_vertex(Vertex::new(Xyz::new(0.0, 0.0, z)));
                for i in 0..sides {
                    let angle = f64::from(i) * 2.0 * PI / f64::from(sides);
                    mesh.add_vertex(Vertex::new(on_circle(angle)));
                }
                for i in 0..sides {
                    mesh.add_triangle(Triangle::new(0, 1 + i, 1 + (i + 1) % sides));
                }
            }
        }
        mesh
    }
}
