/// Three vertex indices into the owning mesh's vertex buffer.
///
/// Triangles carry no attributes of their own; colour and normals live on
/// the vertices so a whole mesh can be drawn in one call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Triangle {
    pub vertex: [u32; 3],
}

impl Triangle {
    pub const fn new(v0: u32, v1: u32, v2: u32) -> Self {
        Self {
            vertex: [v0, v1, v2],
        }
    }

    /// Index of corner `i` as a `usize`.
    pub fn index(&self, i: usize) -> usize {
        self.vertex[i] as usize
    }
}

/// An undirected edge, stored with the smaller index first so that both
/// windings of a shared edge compare equal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TriangleEdge {
    pub v0: u32,
    pub v1: u32,
}

impl TriangleEdge {
    pub fn new(a: u32, b: u32) -> Self {
        Self {
            v0: a.min(b),
            v1: a.max(b),
        }
    }
}
