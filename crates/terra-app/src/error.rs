use terra_stargen::StargenError;
use terra_terrain::ColourFileError;

use crate::platform::PlatformError;

/// Anything that stops a `terra` run.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Platform(#[from] PlatformError),
    #[error(transparent)]
    Colours(#[from] ColourFileError),
    #[error(transparent)]
    Stargen(#[from] StargenError),
    #[error("failed to write output: {0}")]
    Output(#[from] std::io::Error),
}
