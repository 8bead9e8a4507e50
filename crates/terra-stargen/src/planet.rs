//! Planets, moons and the system arena that owns them.

use std::fmt;

use crate::chem::ChemicalElement;
use crate::error::StargenError;
use crate::primary::Primary;

/// Broad classification of a generated body.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PlanetType {
    #[default]
    Unknown,
    Rock,
    Venusian,
    Terrestrial,
    GasGiant,
    Martian,
    Water,
    Ice,
    SubGasGiant,
    SubSubGasGiant,
    Asteroids,
    OneFace,
}

impl PlanetType {
    pub fn is_gas_giant(self) -> bool {
        matches!(
            self,
            PlanetType::GasGiant | PlanetType::SubGasGiant | PlanetType::SubSubGasGiant
        )
    }

    /// Name shown in system listings.
    pub fn display_name(self) -> &'static str {
        match self {
            PlanetType::Unknown => "Unknown",
            PlanetType::Rock => "Rock",
            PlanetType::Venusian => "Venusian",
            PlanetType::Terrestrial => "Terrestrial",
            PlanetType::GasGiant => "Jovian",
            PlanetType::Martian => "Martian",
            PlanetType::Water => "Water",
            PlanetType::Ice => "Ice",
            PlanetType::SubGasGiant => "Sub-Jovian",
            PlanetType::SubSubGasGiant => "GasDwarf",
            PlanetType::Asteroids => "Asteroids",
            PlanetType::OneFace => "1Face",
        }
    }
}

impl fmt::Display for PlanetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Whether a human could breathe a planet's atmosphere.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Breathability {
    /// No atmosphere to speak of.
    #[default]
    None,
    Breathable,
    Unbreathable,
    Poisonous,
}

impl fmt::Display for Breathability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Breathability::None => "none",
            Breathability::Breathable => "breathable",
            Breathability::Unbreathable => "unbreathable",
            Breathability::Poisonous => "poisonous",
        })
    }
}

/// Coarse distance band around a star, scaled by its luminosity. Selects
/// composition constants for radius and volatile estimates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum OrbitalZone {
    #[default]
    Inner,
    Middle,
    Outer,
}

impl TryFrom<u8> for OrbitalZone {
    type Error = StargenError;

    fn try_from(zone: u8) -> Result<Self, Self::Error> {
        match zone {
            1 => Ok(OrbitalZone::Inner),
            2 => Ok(OrbitalZone::Middle),
            3 => Ok(OrbitalZone::Outer),
            other => Err(StargenError::InvalidOrbitalZone(other)),
        }
    }
}

impl From<OrbitalZone> for u8 {
    fn from(zone: OrbitalZone) -> u8 {
        match zone {
            OrbitalZone::Inner => 1,
            OrbitalZone::Middle => 2,
            OrbitalZone::Outer => 3,
        }
    }
}

/// One component of an atmosphere.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gas {
    pub element: &'static ChemicalElement,
    /// Partial pressure at the surface, in millibars.
    pub surface_pressure: f64,
}

/// Index of a body in its [`StellarSystem`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PlanetId(pub usize);

/// A planet or moon. Masses are in solar masses, `a` in AU, radii in km,
/// pressures in millibars and temperatures in kelvin.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Planet {
    /// 1-based position counted outwards from the star.
    pub number: u32,
    /// The body this one orbits, `None` for planets.
    pub parent: Option<PlanetId>,
    pub moons: Vec<PlanetId>,

    // Orbit.
    pub a: f64,
    pub e: f64,
    /// Degrees.
    pub axial_tilt: f64,

    // Composition.
    pub mass: f64,
    pub gas_giant: bool,
    pub dust_mass: f64,
    pub gas_mass: f64,

    // Physical properties.
    pub core_radius: f64,
    pub radius: f64,
    pub orbit_zone: OrbitalZone,
    /// g/cc
    pub density: f64,
    /// Days.
    pub orbital_period: f64,
    /// Hours.
    pub day: f64,
    pub resonant_period: bool,
    /// cm/sec
    pub escape_velocity: f64,
    /// cm/sec^2
    pub surface_acceleration: f64,
    /// Earth gravities.
    pub surface_gravity: f64,
    /// cm/sec
    pub rms_velocity: f64,
    /// Smallest molecular weight retained, in AMU.
    pub molecular_weight: f64,
    pub volatile_gas_inventory: f64,
    pub surface_pressure: f64,
    pub greenhouse_effect: bool,
    pub boiling_point: f64,
    pub albedo: f64,
    pub exospheric_temperature: f64,
    pub surface_temperature: f64,
    pub greenhouse_rise: f64,
    pub high_temperature: f64,
    pub low_temperature: f64,
    pub max_temperature: f64,
    pub min_temperature: f64,
    /// Fractions of the surface, 0..1.
    pub hydrosphere: f64,
    pub cloud_cover: f64,
    pub ice_cover: f64,

    /// Atmosphere, sorted by ascending partial pressure.
    pub gases: Vec<Gas>,
    pub planet_type: PlanetType,
    pub breathability: Breathability,
}

impl Planet {
    /// A bare body at `a` with eccentricity `e` and the given masses.
    pub fn with_orbit(a: f64, e: f64, mass: f64) -> Self {
        Self {
            a,
            e,
            mass,
            ..Default::default()
        }
    }

    pub fn is_moon(&self) -> bool {
        self.parent.is_some()
    }

    /// Fraction of the total mass that is gas.
    pub fn gas_fraction(&self) -> f64 {
        self.gas_mass / self.mass
    }

    pub fn earth_masses(&self) -> f64 {
        self.mass * crate::constants::SUN_MASS_IN_EARTH_MASSES
    }
}

/// A star and every body generated around it.
///
/// Bodies live in one arena. Planets are listed in `planets` in order of
/// increasing distance; each planet names its moons by id and each moon
/// names its parent.
#[derive(Debug, Clone, Default)]
pub struct StellarSystem {
    pub primary: Primary,
    bodies: Vec<Planet>,
    planets: Vec<PlanetId>,
}

impl StellarSystem {
    pub fn new(primary: Primary) -> Self {
        Self {
            primary,
            bodies: Vec::new(),
            planets: Vec::new(),
        }
    }

    /// Append a planet outside all existing ones.
    pub fn add_planet(&mut self, planet: Planet) -> PlanetId {
        let id = PlanetId(self.bodies.len());
        self.bodies.push(Planet {
            parent: None,
            ..planet
        });
        self.planets.push(id);
        id
    }

    /// Attach a moon to `parent`.
    pub fn add_moon(&mut self, parent: PlanetId, moon: Planet) -> PlanetId {
        let id = PlanetId(self.bodies.len());
        self.bodies.push(Planet {
            parent: Some(parent),
            ..moon
        });
        self.bodies[parent.0].moons.push(id);
        id
    }

    pub fn body(&self, id: PlanetId) -> &Planet {
        &self.bodies[id.0]
    }

    pub fn body_mut(&mut self, id: PlanetId) -> &mut Planet {
        &mut self.bodies[id.0]
    }

    /// Ids of the planets, innermost first.
    pub fn planet_ids(&self) -> &[PlanetId] {
        &self.planets
    }

    /// The planets, innermost first.
    pub fn planets(&self) -> impl Iterator<Item = &Planet> {
        self.planets.iter().map(|id| &self.bodies[id.0])
    }

    pub fn moons_of(&self, id: PlanetId) -> impl Iterator<Item = &Planet> {
        self.bodies[id.0].moons.iter().map(|m| &self.bodies[m.0])
    }

    pub fn planet_count(&self) -> usize {
        self.planets.len()
    }

    /// Planets and moons together.
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orbital_zone_from_index() {
        assert_eq!(OrbitalZone::try_from(2).unwrap(), OrbitalZone::Middle);
        assert!(matches!(
            OrbitalZone::try_from(0),
            Err(StargenError::InvalidOrbitalZone(0))
        ));
        assert_eq!(u8::from(OrbitalZone::Outer), 3);
    }

    #[test]
    fn test_gas_giant_types() {
        assert!(PlanetType::SubSubGasGiant.is_gas_giant());
        assert!(!PlanetType::Terrestrial.is_gas_giant());
        assert_eq!(PlanetType::GasGiant.to_string(), "Jovian");
    }

    #[test]
    fn test_arena_links_moons_to_parents() {
        let mut system = StellarSystem::new(Primary::default());
        let inner = system.add_planet(Planet::with_orbit(0.4, 0.0, 1e-7));
        let outer = system.add_planet(Planet::with_orbit(5.2, 0.05, 1e-3));
        let moon = system.add_moon(outer, Planet::with_orbit(0.003, 0.0, 1e-8));

        assert_eq!(system.planet_count(), 2);
        assert_eq!(system.body_count(), 3);
        assert_eq!(system.planet_ids(), &[inner, outer]);
        assert_eq!(system.body(moon).parent, Some(outer));
        assert!(system.body(moon).is_moon());
        assert_eq!(system.moons_of(outer).count(), 1);
        assert_eq!(system.moons_of(inner).count(), 0);
        let distances: Vec<f64> = system.planets().map(|p| p.a).collect();
        assert_eq!(distances, vec![0.4, 5.2]);

        system.body_mut(moon).radius = 1737.0;
        assert_eq!(system.moons_of(outer).map(|m| m.radius).sum::<f64>(), 1737.0);
    }
}
