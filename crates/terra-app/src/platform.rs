//! Where terra keeps its files on each OS.

use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum PlatformError {
    #[error("no configuration directory on this platform")]
    NoConfigDir,
    #[error("cannot create {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Per-user directories following the conventions `dirs` knows about (XDG
/// on Linux, Known Folders on Windows, Library on macOS).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformDirs {
    /// Holds `config.ron`.
    pub config_dir: PathBuf,
    /// JSON logs of debug builds.
    pub log_dir: PathBuf,
}

const APP_NAME: &str = "terra";

impl PlatformDirs {
    /// Resolve the directories without touching the disk. Logs go to the
    /// state directory where the OS has one, else next to the config.
    pub fn resolve() -> Result<Self, PlatformError> {
        let config_dir = dirs::config_dir()
            .ok_or(PlatformError::NoConfigDir)?
            .join(APP_NAME);
        let log_dir = dirs::state_dir()
            .map_or_else(|| config_dir.join("logs"), |state| state.join(APP_NAME).join("logs"));
        Ok(Self { config_dir, log_dir })
    }

    pub fn resolve_and_create() -> Result<Self, PlatformError> {
        let dirs = Self::resolve()?;
        dirs.create_dirs()?;
        Ok(dirs)
    }

    /// Same layout under `root`, for tests.
    #[cfg(test)]
    pub fn under(root: &std::path::Path) -> Self {
        let config_dir = root.join(APP_NAME);
        Self {
            log_dir: config_dir.join("logs"),
            config_dir,
        }
    }

    pub fn create_dirs(&self) -> Result<(), PlatformError> {
        for dir in [&self.config_dir, &self.log_dir] {
            std::fs::create_dir_all(dir).map_err(|source| PlatformError::CreateDir {
                path: dir.clone(),
                source,
            })?;
        }
        Ok(())
    }
}
