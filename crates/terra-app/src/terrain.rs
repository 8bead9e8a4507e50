//! The `terrain` subcommand.

use terra_config::Config;
use terra_mesh::Progress;
use terra_terrain::{MeshStats, build_clouds, build_terrain, load_terrain_colours, save_terrain_colours};

use crate::error::AppError;

/// Sizes of the meshes one run produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerrainReport {
    pub terrain: MeshStats,
    pub clouds: Option<MeshStats>,
}

/// Build the configured terrain and cloud layer.
///
/// A colour file named in the output settings replaces the terrain colours
/// in `config` before the build; the colours are written out afterwards if
/// a save path is set.
pub fn run_terrain(config: &mut Config, progress: &mut dyn Progress) -> Result<TerrainReport, AppError> {
    if let Some(path) = &config.output.load_colours {
        load_terrain_colours(path, &mut config.terrain)?;
    }

    let terrain = build_terrain(&config.terrain, progress);
    let clouds = build_clouds(&config.terrain, &config.cloud, progress);

    let report = TerrainReport {
        terrain: terrain.stats(),
        clouds: clouds.as_ref().map(|c| c.stats()),
    };
    tracing::info!(
        object = ?config.terrain.object_type,
        seed = config.terrain.terrain_seed,
        "Terrain: {}",
        report.terrain
    );
    if let Some(stats) = report.clouds {
        tracing::info!("Clouds: {stats}");
    }

    if let Some(path) = &config.output.save_colours {
        save_terrain_colours(path, &config.terrain)?;
    }
    Ok(report)
}
