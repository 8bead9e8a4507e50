//! The central star of a generated system.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::StargenError;

/// Harvard spectral class, hottest first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SpectralClass {
    O,
    B,
    A,
    F,
    G,
    K,
    M,
}

impl SpectralClass {
    pub const ALL: [SpectralClass; 7] = [
        SpectralClass::O,
        SpectralClass::B,
        SpectralClass::A,
        SpectralClass::F,
        SpectralClass::G,
        SpectralClass::K,
        SpectralClass::M,
    ];

    /// Column of this class in the star tables.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            SpectralClass::O => "O",
            SpectralClass::B => "B",
            SpectralClass::A => "A",
            SpectralClass::F => "F",
            SpectralClass::G => "G",
            SpectralClass::K => "K",
            SpectralClass::M => "M",
        }
    }
}

impl fmt::Display for SpectralClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SpectralClass {
    type Err = StargenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SpectralClass::ALL
            .into_iter()
            .find(|c| c.name() == s)
            .ok_or_else(|| StargenError::UnknownSpectralClass(s.to_string()))
    }
}

/// Yerkes luminosity class, brightest first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum LuminosityClass {
    Ia,
    Ib,
    II,
    III,
    IV,
    V,
    VI,
    VII,
}

impl LuminosityClass {
    pub const ALL: [LuminosityClass; 8] = [
        LuminosityClass::Ia,
        LuminosityClass::Ib,
        LuminosityClass::II,
        LuminosityClass::III,
        LuminosityClass::IV,
        LuminosityClass::V,
        LuminosityClass::VI,
        LuminosityClass::VII,
    ];

    /// Row of this class in the magnitude threshold table.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            LuminosityClass::Ia => "Ia",
            LuminosityClass::Ib => "Ib",
            LuminosityClass::II => "II",
            LuminosityClass::III => "III",
            LuminosityClass::IV => "IV",
            LuminosityClass::V => "V",
            LuminosityClass::VI => "VI",
            LuminosityClass::VII => "VII",
        }
    }
}

impl fmt::Display for LuminosityClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A star. Masses and luminosities are solar ratios, distances in AU
/// except `distance`, which is in parsecs from the observer.
#[derive(Debug, Clone, PartialEq)]
pub struct Primary {
    pub name: String,
    pub mass: f64,
    /// Zero means "derive from mass" when a system is generated.
    pub luminosity: f64,
    /// Years. Zero means "pick at random" when a system is generated.
    pub age: f64,
    /// Main sequence lifetime in years.
    pub life: f64,
    pub r_ecosphere: f64,
    pub r_ecosphere_inner: f64,
    pub r_ecosphere_outer: f64,
    pub spectral_class: SpectralClass,
    pub spectral_subclass: u32,
    pub luminosity_class: LuminosityClass,
    pub absolute_magnitude: f64,
    /// Degrees.
    pub right_ascension: f64,
    /// Degrees.
    pub declination: f64,
    pub distance: f64,
}

impl Primary {
    /// Set the habitable zone from the current luminosity.
    pub fn set_ecosphere(&mut self) {
        self.r_ecosphere = self.luminosity.sqrt();
        self.r_ecosphere_inner = 0.93 * self.r_ecosphere;
        self.r_ecosphere_outer = 1.1 * self.r_ecosphere;
    }

    /// Full classification, e.g. `G2V`.
    pub fn classification(&self) -> String {
        format!(
            "{}{}{}",
            self.spectral_class, self.spectral_subclass, self.luminosity_class
        )
    }
}

impl Default for Primary {
    fn default() -> Self {
        Self {
            name: String::from("Stargen Planetary System"),
            mass: 1.0,
            luminosity: 0.0,
            age: 0.0,
            life: 0.0,
            r_ecosphere: 0.0,
            r_ecosphere_inner: 0.0,
            r_ecosphere_outer: 0.0,
            spectral_class: SpectralClass::G,
            spectral_subclass: 2,
            luminosity_class: LuminosityClass::V,
            absolute_magnitude: 0.0,
            right_ascension: 0.0,
            declination: 0.0,
            distance: 10.0,
        }
    }
}
