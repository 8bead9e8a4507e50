//! User-facing stellar system settings.

use serde::{Deserialize, Serialize};

use crate::constants::DUST_DENSITY_COEFF;
use crate::primary::{LuminosityClass, SpectralClass};

/// Settings for star and planetary system generation. Every `Option`
/// overrides the matching property of the randomly generated star.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StargenParameters {
    pub seed: u64,
    pub name: String,
    /// Solar masses.
    pub star_mass: Option<f64>,
    /// Solar luminosities.
    pub star_luminosity: Option<f64>,
    /// Draw the star from this class only.
    pub spectral_class: Option<SpectralClass>,
    pub spectral_subclass: Option<u32>,
    pub luminosity_class: Option<LuminosityClass>,
    /// Parsecs.
    pub distance: Option<f64>,
    /// Accrete moons around every planet.
    pub moons: bool,
    /// Smallest moon kept, in Earth masses.
    pub moon_min_mass: f64,
    /// Give planets a random axial tilt instead of none.
    pub random_tilt: bool,
    pub dust_density_coeff: f64,
    /// Outermost injection distance in AU; 0 derives it from the star mass.
    pub outer_planet_limit: f64,
    /// Systems generated per run.
    pub systems: usize,
}

impl StargenParameters {
    pub const DEFAULT_NAME: &'static str = "Stargen Planetary System";
    pub const DEFAULT_MOON_MIN_MASS: f64 = 0.0001;

    /// Restore every setting to its default.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Copy of these settings for the `index`th system of a batch.
    pub fn for_system(&self, index: usize) -> Self {
        Self {
            seed: self.seed.wrapping_add(index as u64),
            systems: 1,
            ..self.clone()
        }
    }
}

// --- Default implementations ---

impl Default for StargenParameters {
    fn default() -> Self {
        Self {
            seed: 0,
            name: String::from(Self::DEFAULT_NAME),
            star_mass: None,
            star_luminosity: None,
            spectral_class: None,
            spectral_subclass: None,
            luminosity_class: None,
            distance: None,
            moons: false,
            moon_min_mass: Self::DEFAULT_MOON_MIN_MASS,
            random_tilt: true,
            dust_density_coeff: DUST_DENSITY_COEFF,
            outer_planet_limit: 0.0,
            systems: 1,
        }
    }
}
