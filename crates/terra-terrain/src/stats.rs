use std::fmt;

use terra_mesh::TriangleMesh;

/// Size summary of a generated mesh.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MeshStats {
    pub vertices: usize,
    pub triangles: usize,
    /// Triangles drawn with colour slot 0.
    pub land_triangles: usize,
    /// Triangles drawn with colour slot 1.
    pub sea_triangles: usize,
}

impl MeshStats {
    pub fn of(mesh: &TriangleMesh) -> Self {
        Self {
            vertices: mesh.vertex_count(),
            triangles: mesh.triangle_count(),
            land_triangles: mesh.colour0_triangle_count(),
            sea_triangles: mesh.colour1_triangle_count(),
        }
    }
}

impl fmt::Display for MeshStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} vertices, {} triangles ({} land, {} sea)",
            self.vertices, self.triangles, self.land_triangles, self.sea_triangles
        )
    }
}
