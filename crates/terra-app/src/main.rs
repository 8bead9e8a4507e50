//! The `terra` binary: builds terrain meshes or generates star systems.

mod error;
mod platform;
mod stargen;
mod terrain;

use std::process::ExitCode;

use clap::Parser;
use terra_config::{CliArgs, Command, Config};
use terra_mesh::LogProgress;

use crate::error::AppError;
use crate::platform::PlatformDirs;

fn main() -> ExitCode {
    match run(CliArgs::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            eprintln!("terra: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: CliArgs) -> Result<(), AppError> {
    let dirs = PlatformDirs::resolve_and_create()?;
    let config_dir = args.config.clone().unwrap_or_else(|| dirs.config_dir.clone());

    // Load or create config, then apply CLI overrides
    let mut config = Config::load_or_create(&config_dir).unwrap_or_else(|e| {
        eprintln!("Failed to load config: {e}, using defaults");
        Config::default()
    });
    config.apply_cli_overrides(&args);

    terra_log::init_logging(Some(&dirs.log_dir), cfg!(debug_assertions), Some(&config));
    tracing::debug!(
        config = %config_dir.display(),
        logs = %dirs.log_dir.display(),
        "Resolved directories"
    );

    match args.command() {
        Command::Terrain => {
            terrain::run_terrain(&mut config, &mut LogProgress::default())?;
        }
        Command::Stargen => {
            let stdout = std::io::stdout();
            let count = stargen::run_stargen(&config, &mut stdout.lock())?;
            tracing::info!("Generated {count} systems");
        }
    }
    Ok(())
}
