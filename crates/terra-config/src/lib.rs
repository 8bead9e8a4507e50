//! Configuration for the terra tools.
//!
//! Terrain, cloud and stellar system settings persist to disk as a RON
//! file. Command-line arguments override whatever was loaded.

mod cli;
mod config;
mod error;

pub use cli::{CliArgs, Command, ObjectArg};
pub use config::{CONFIG_FILE, Config, DebugConfig, OutputConfig};
pub use error::ConfigError;
