//! Stars and planetary systems.
//!
//! [`GenStar`] draws stars from an empirical census of the solar
//! neighbourhood, [`Accrete`] forms planets from a dust disc, and
//! [`Generator`] ties them together and works out each planet's
//! environment: temperature, atmosphere, type and breathability.

mod accrete;
mod batch;
mod chem;
pub mod constants;
pub mod enviro;
pub mod enviro_utils;
mod error;
mod generator;
mod genstar;
mod params;
mod planet;
mod primary;
pub mod random;

pub use accrete::{
    Accrete, DustBand, Protoplanet, critical_limit, farthest_planet, nearest_planet,
    stellar_dust_limit,
};
pub use batch::{generate_batch, generate_batch_with};
pub use chem::{ChemicalElement, GASES, find_by_number};
pub use error::StargenError;
pub use generator::Generator;
pub use genstar::{GenStar, MAX_MAGNITUDE, MIN_MAGNITUDE, luminosity_class_for};
pub use params::StargenParameters;
pub use planet::{Breathability, Gas, OrbitalZone, Planet, PlanetId, PlanetType, StellarSystem};
pub use primary::{LuminosityClass, Primary, SpectralClass};
