//! Entry points that build complete terrain and cloud meshes.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use terra_mesh::{FlatShape, Progress, SphericalGeometry, TriangleMesh, icosahedron};

use crate::cloud::{build_cloud_flat, build_cloud_planet};
use crate::params::{CloudParameters, TerrainParameters};
use crate::stats::MeshStats;
use crate::terrain::Terrain;

/// What a generated mesh represents.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MeshKind {
    Terrain,
    Cloud,
}

/// A finished mesh, tagged with its purpose.
#[derive(Debug)]
pub enum GeneratedMesh {
    Terrain(Terrain),
    Cloud(TriangleMesh),
}

impl GeneratedMesh {
    pub fn kind(&self) -> MeshKind {
        match self {
            GeneratedMesh::Terrain(_) => MeshKind::Terrain,
            GeneratedMesh::Cloud(_) => MeshKind::Cloud,
        }
    }

    pub fn mesh(&self) -> &TriangleMesh {
        match self {
            GeneratedMesh::Terrain(terrain) => terrain.mesh(),
            GeneratedMesh::Cloud(mesh) => mesh,
        }
    }

    pub fn stats(&self) -> MeshStats {
        MeshStats::of(self.mesh())
    }

    /// Re-run terrain colouring after a colour change. Clouds keep the
    /// colours they were built with.
    pub fn recolour(&mut self, params: &TerrainParameters, progress: &mut dyn Progress) {
        match self {
            GeneratedMesh::Terrain(terrain) => terrain.apply_colours(params, progress),
            GeneratedMesh::Cloud(_) => {}
        }
    }
}

/// Build a whole planet: a subdivided, perturbed icosahedron run through
/// the terrain pipeline.
pub fn build_planet(params: &TerrainParameters, progress: &mut dyn Progress) -> Terrain {
    let radius = 1.0 + params.variation.z * params.base_height;
    let mut mesh = icosahedron(Box::new(SphericalGeometry), radius);
    subdivide_base(&mut mesh, params, progress);
    let mut terrain = Terrain::new(mesh);
    terrain.generate(params, progress);
    terrain
}

/// Build a flat terrain patch in the given outline.
pub fn build_flat(
    shape: FlatShape,
    params: &TerrainParameters,
    progress: &mut dyn Progress,
) -> Terrain {
    let mut mesh = shape.build(params.variation.z * params.base_height);
    subdivide_base(&mut mesh, params, progress);
    let mut terrain = Terrain::new(mesh);
    terrain.generate(params, progress);
    terrain
}

fn subdivide_base(
    mesh: &mut TriangleMesh,
    params: &TerrainParameters,
    progress: &mut dyn Progress,
) {
    let mut rng = ChaCha8Rng::seed_from_u64(params.terrain_seed);
    mesh.multiple_subdivide(
        params.subdivisions,
        params.subdivisions_unperturbed,
        params.variation,
        &mut rng,
        progress,
    );
}

/// Build the terrain selected by `params.object_type`.
pub fn build_terrain(params: &TerrainParameters, progress: &mut dyn Progress) -> GeneratedMesh {
    let terrain = match params.object_type.flat_shape() {
        None => build_planet(params, progress),
        Some(shape) => build_flat(shape, params, progress),
    };
    tracing::info!("Built terrain: {}", MeshStats::of(terrain.mesh()));
    GeneratedMesh::Terrain(terrain)
}

/// Build the cloud layer matching the terrain type, or `None` when clouds
/// are disabled.
pub fn build_clouds(
    terrain: &TerrainParameters,
    cloud: &CloudParameters,
    progress: &mut dyn Progress,
) -> Option<GeneratedMesh> {
    if !cloud.enabled {
        return None;
    }
    let mesh = match terrain.object_type.flat_shape() {
        None => build_cloud_planet(terrain, cloud, progress),
        Some(_) => build_cloud_flat(terrain, cloud, progress),
    };
    tracing::info!("Built clouds: {}", MeshStats::of(&mesh));
    Some(GeneratedMesh::Cloud(mesh))
}
