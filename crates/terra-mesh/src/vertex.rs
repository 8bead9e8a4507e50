use terra_math::Xyz;

use crate::ByteRgba;

/// A mesh vertex.
///
/// Slot 0 of `colour`/`emissive` is used by land triangles and slot 1 by
/// sea triangles; see [`TriangleMesh::switch_colour`](crate::TriangleMesh).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vertex {
    pub position: Xyz,
    pub normal: Xyz,
    pub colour: [ByteRgba; 2],
    pub emissive: [bool; 2],
}

impl Vertex {
    /// A black, non-emissive vertex with a zero normal.
    pub fn new(position: Xyz) -> Self {
        Self {
            position,
            normal: Xyz::zero(),
            colour: [ByteRgba::BLACK; 2],
            emissive: [false; 2],
        }
    }
}

impl Default for Vertex {
    fn default() -> Self {
        Self::new(Xyz::zero())
    }
}
