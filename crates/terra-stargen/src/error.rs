//! Stellar generation error types.

/// Errors that can occur while generating stars and planetary systems.
#[derive(Debug, thiserror::Error)]
pub enum StargenError {
    /// A spectral class name other than O, B, A, F, G, K or M.
    #[error("unknown spectral class: {0}")]
    UnknownSpectralClass(String),

    /// An orbital zone index outside 1..=3.
    #[error("orbital zone {0} is not one of 1, 2 or 3")]
    InvalidOrbitalZone(u8),

    /// A batch worker thread could not be started.
    #[error("failed to spawn stargen worker: {0}")]
    WorkerSpawn(#[source] std::io::Error),

    /// A batch worker exited before returning the system at `index`.
    #[error("stargen worker failed to return system {index}")]
    WorkerLost { index: usize },
}
