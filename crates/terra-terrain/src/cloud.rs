//! Cloud layer meshes.
//!
//! A cloud layer is an unperturbed copy of the base shape raised above the
//! terrain. Its only interesting content is the per-vertex alpha, taken
//! from multiscale noise.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use terra_math::Xyz;
use terra_mesh::{ByteRgba, Progress, SphericalGeometry, TriangleMesh, icosahedron};

use crate::multiscale::MultiscaleNoise;
use crate::params::{CloudParameters, TerrainParameters};

const CLOUD_NOISE_TERMS: u32 = 6;
const CLOUD_NOISE_DECAY: f32 = 0.5;
const CLOUD_NOISE_FREQUENCY: f32 = 4.0;
/// Noise values below this are clear sky.
const V_MIN: f32 = 0.5;
/// Noise values above this are fully opaque cloud.
const V_MAX: f32 = 0.6;

/// Altitude of the cloud layer above the base surface.
pub fn cloud_altitude(cloud: &CloudParameters) -> f32 {
    cloud.height as f32 / 100.0
}

/// Spherical cloud layer around a planet.
pub fn build_cloud_planet(
    terrain: &TerrainParameters,
    cloud: &CloudParameters,
    progress: &mut dyn Progress,
) -> TriangleMesh {
    let subdivisions = cloud.effective_subdivisions(terrain);
    let mut rng = ChaCha8Rng::seed_from_u64(cloud.seed);
    let mut mesh = icosahedron(Box::new(SphericalGeometry), 1.0 + cloud_altitude(cloud));
    mesh.multiple_subdivide(subdivisions, subdivisions, Xyz::zero(), &mut rng, progress);
    colour_clouds(&mut mesh, cloud, progress);
    mesh
}

/// Flat cloud layer over a flat terrain patch.
///
/// The outline follows the terrain's object type, or the cloud's own
/// `flat_shape` when the terrain is a planet.
pub fn build_cloud_flat(
    terrain: &TerrainParameters,
    cloud: &CloudParameters,
    progress: &mut dyn Progress,
) -> TriangleMesh {
    let subdivisions = cloud.effective_subdivisions(terrain);
    let shape = terrain.object_type.flat_shape().unwrap_or(cloud.flat_shape);
    let mut rng = ChaCha8Rng::seed_from_u64(cloud.seed);
    let mut mesh = shape.build(cloud_altitude(cloud));
    mesh.multiple_subdivide(subdivisions, subdivisions, Xyz::zero(), &mut rng, progress);
    colour_clouds(&mut mesh, cloud, progress);
    mesh
}

/// Compute normals and paint cloud alpha into colour slot 0.
///
/// Slot 1 is a debug red that is never drawn: `switch_colour` covers every
/// triangle afterwards.
pub fn colour_clouds(mesh: &mut TriangleMesh, cloud: &CloudParameters, progress: &mut dyn Progress) {
    mesh.compute_vertex_normals(progress);
    progress.progress_start(100, "Cloud colouring");

    let base = ByteRgba::from(cloud.colour);
    let mut rng = ChaCha8Rng::seed_from_u64(cloud.seed);
    let noise = MultiscaleNoise::new(&mut rng, CLOUD_NOISE_TERMS, CLOUD_NOISE_DECAY);
    let count = mesh.vertex_count();
    for (i, vertex) in mesh.vertices.iter_mut().enumerate() {
        progress.progress_step((100 * i / count.max(1)) as u32);
        let v = 0.5 + 0.5 * noise.sample(vertex.position * CLOUD_NOISE_FREQUENCY);
        vertex.colour = [
            ByteRgba::new(base.r, base.g, base.b, cloud_alpha(v)),
            ByteRgba::RED,
        ];
    }

    progress.progress_complete("Cloud colouring completed");
    mesh.switch_colour = mesh.triangle_count();
}

/// Alpha for a noise value: clear below [`V_MIN`], opaque above [`V_MAX`].
fn cloud_alpha(v: f32) -> u8 {
    let vs = ((v - V_MIN) / (V_MAX - V_MIN)).clamp(0.0, 1.0);
    (f32::from(u8::MAX) * vs).round() as u8
}
