//! Command-line argument parsing for the `terra` binary.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use terra_terrain::ObjectType;

use crate::Config;

/// Terra command-line arguments.
///
/// CLI values override settings loaded from `config.ron`. Every option may
/// be given before or after the subcommand.
#[derive(Parser, Debug)]
#[command(name = "terra", about = "Procedural planets, terrain and star systems")]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Terrain seed.
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    /// Terrain subdivision passes.
    #[arg(long, global = true)]
    pub subdivisions: Option<u32>,

    /// Number of rivers to attempt.
    #[arg(long, global = true)]
    pub rivers: Option<u32>,

    /// Kind of terrain object to build.
    #[arg(long, value_enum, global = true)]
    pub object: Option<ObjectArg>,

    /// Build a cloud layer over the terrain.
    #[arg(long, global = true)]
    pub clouds: Option<bool>,

    /// Stellar system seed.
    #[arg(long, global = true)]
    pub star_seed: Option<u64>,

    /// Accrete moons around each planet.
    #[arg(long, global = true)]
    pub moons: Option<bool>,

    /// Number of stellar systems to generate.
    #[arg(long, global = true)]
    pub systems: Option<usize>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Colour file to load before building terrain.
    #[arg(long, global = true)]
    pub colours: Option<PathBuf>,

    /// Write the terrain colours to this file after building.
    #[arg(long, global = true)]
    pub save_colours: Option<PathBuf>,
}

/// What to generate.
#[derive(Subcommand, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Command {
    /// Build a terrain mesh and optional cloud layer.
    #[default]
    Terrain,
    /// Generate stellar systems and list their planets.
    Stargen,
}

/// Command-line spelling of [`ObjectType`].
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectArg {
    Planet,
    Terrain,
    TerrainHexagon,
    TerrainSquare,
    TerrainTriangle,
}

impl From<ObjectArg> for ObjectType {
    fn from(arg: ObjectArg) -> Self {
        match arg {
            ObjectArg::Planet => ObjectType::Planet,
            ObjectArg::Terrain => ObjectType::Terrain,
            ObjectArg::TerrainHexagon => ObjectType::TerrainHexagon,
            ObjectArg::TerrainSquare => ObjectType::TerrainSquare,
            ObjectArg::TerrainTriangle => ObjectType::TerrainTriangle,
        }
    }
}

impl CliArgs {
    /// The chosen subcommand, terrain when none was given.
    pub fn command(&self) -> Command {
        self.command.unwrap_or_default()
    }
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(seed) = args.seed {
            self.terrain.terrain_seed = seed;
        }
        if let Some(n) = args.subdivisions {
            self.terrain.subdivisions = n;
        }
        if let Some(n) = args.rivers {
            self.terrain.rivers = n;
        }
        if let Some(object) = args.object {
            self.terrain.object_type = object.into();
        }
        if let Some(clouds) = args.clouds {
            self.cloud.enabled = clouds;
        }
        if let Some(seed) = args.star_seed {
            self.stargen.seed = seed;
        }
        if let Some(moons) = args.moons {
            self.stargen.moons = moons;
        }
        if let Some(n) = args.systems {
            self.stargen.systems = n;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
        if let Some(ref path) = args.colours {
            self.output.load_colours = Some(path.clone());
        }
        if let Some(ref path) = args.save_colours {
            self.output.save_colours = Some(path.clone());
        }
    }
}
