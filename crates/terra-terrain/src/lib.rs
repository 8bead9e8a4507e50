//! Procedural terrain: multiscale noise, sea level, power-law relief,
//! rivers and lakes, colouring, and cloud layers over the meshes built by
//! `terra-mesh`.

mod builder;
mod cloud;
mod colour_file;
mod error;
mod multiscale;
mod params;
mod rivers;
mod stats;
mod terrain;

pub use builder::{GeneratedMesh, MeshKind, build_clouds, build_flat, build_planet, build_terrain};
pub use cloud::{build_cloud_flat, build_cloud_planet, cloud_altitude, colour_clouds};
pub use colour_file::{
    TERRAIN_COLOUR_COUNT, format_colours, load_terrain_colours, parse_colours, read_colours,
    save_terrain_colours, write_colours,
};
pub use error::ColourFileError;
pub use multiscale::MultiscaleNoise;
pub use params::{CloudParameters, ObjectType, TerrainParameters};
pub use rivers::RiverOutcome;
pub use stats::MeshStats;
pub use terrain::{BEACHLINE, TREELINE, Terrain};
