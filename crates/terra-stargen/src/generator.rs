//! Whole-system generation: a star, its planets, their environments and
//! optionally their moons.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::accrete::{Accrete, Protoplanet, stellar_dust_limit};
use crate::chem::GASES;
use crate::constants::*;
use crate::enviro::{self, ACCRETED_GAS_FRACTION};
use crate::enviro_utils;
use crate::genstar::GenStar;
use crate::params::StargenParameters;
use crate::planet::{Gas, Planet, PlanetType, StellarSystem};
use crate::primary::Primary;
use crate::random::{about, random_number};

const MIN_STAR_MASS: f64 = 0.2;
const MAX_STAR_MASS: f64 = 1.5;
const MIN_AGE: f64 = 1.0e9;
const MAX_AGE: f64 = 6.0e9;

/// Gas fraction above which a heavy, light-gas-retaining body is a giant.
const GIANT_GAS_FRACTION: f64 = 0.05;
/// Gas fraction below which a giant is only a gas dwarf.
const DWARF_GAS_FRACTION: f64 = 0.20;
/// Earth masses below which a giant is a sub-giant.
const SUB_GIANT_EARTH_MASSES: f64 = 20.0;

/// Generates stellar systems from one seeded random stream.
#[derive(Debug, Clone)]
pub struct Generator {
    rng: ChaCha8Rng,
    genstar: GenStar,
    params: StargenParameters,
}

impl Generator {
    pub fn new(params: StargenParameters) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(params.seed),
            genstar: GenStar::new(),
            params,
        }
    }

    pub fn params(&self) -> &StargenParameters {
        &self.params
    }

    /// Draw a star and apply the configured overrides.
    pub fn generate_primary(&mut self) -> Primary {
        let mut sun = match self.params.spectral_class {
            Some(class) => self.genstar.generate_star_of_class(class, &mut self.rng),
            None => self.genstar.generate_star(&mut self.rng),
        };

        sun.name.clone_from(&self.params.name);
        if let Some(mass) = self.params.star_mass {
            sun.mass = mass;
        }
        if let Some(luminosity) = self.params.star_luminosity {
            sun.luminosity = luminosity;
            sun.set_ecosphere();
        }
        if let Some(subclass) = self.params.spectral_subclass {
            sun.spectral_subclass = subclass;
        }
        if let Some(class) = self.params.luminosity_class {
            sun.luminosity_class = class;
        }
        if let Some(distance) = self.params.distance {
            sun.distance = distance;
        }

        tracing::info!(
            "Generated {} star: {:.3} solar masses, {:.3} solar luminosities",
            sun.classification(),
            sun.mass,
            sun.luminosity
        );
        sun
    }

    /// Generate a star and everything around it.
    pub fn generate_system(&mut self) -> StellarSystem {
        let sun = self.generate_primary();
        self.generate_stellar_system(sun, &[])
    }

    /// Form planets around `sun` and compute their environments. Orbits in
    /// `seeds` are used for the first protoplanets, as `(a, e)` pairs.
    pub fn generate_stellar_system(&mut self, mut sun: Primary, seeds: &[(f64, f64)]) -> StellarSystem {
        if !(MIN_STAR_MASS..=MAX_STAR_MASS).contains(&sun.mass) {
            sun.mass = random_number(&mut self.rng, 0.7, 1.4);
        }
        let outer_dust_limit = stellar_dust_limit(sun.mass);

        if sun.luminosity == 0.0 {
            sun.luminosity = enviro_utils::luminosity(sun.mass);
        }
        sun.set_ecosphere();
        sun.life = 1.0e10 * (sun.mass / sun.luminosity);

        let mut accrete = Accrete::new();
        let protoplanets = accrete.dist_planetary_masses(
            &mut self.rng,
            sun.mass,
            sun.luminosity,
            0.0,
            outer_dust_limit,
            self.params.outer_planet_limit,
            self.params.dust_density_coeff,
            seeds,
        );

        if sun.age == 0.0 {
            let max_age = sun.life.min(MAX_AGE);
            sun.age = random_number(&mut self.rng, MIN_AGE, max_age);
        }

        tracing::info!(
            "Accreted {} planets around {} ({:.2e} years old)",
            protoplanets.len(),
            sun.name,
            sun.age
        );

        let mut system = StellarSystem::new(sun);
        for (index, protoplanet) in protoplanets.into_iter().enumerate() {
            let moons = if self.params.moons {
                self.generate_moons(&system.primary, &protoplanet)
            } else {
                Vec::new()
            };

            let mut planet = protoplanet.into_planet();
            planet.number = index as u32 + 1;
            self.generate_planet(&system.primary, &mut planet);

            let id = system.add_planet(planet);
            for (moon_index, moon) in moons.into_iter().enumerate() {
                system.add_moon(
                    id,
                    Planet {
                        number: moon_index as u32 + 1,
                        ..moon
                    },
                );
            }
        }
        system
    }

    /// Compute everything about one planet from its orbit and masses.
    fn generate_planet(&mut self, sun: &Primary, planet: &mut Planet) {
        self.init_orbit_velocity_radius(sun, planet);
        init_density_gravity(sun, planet);

        let (day, resonant) = enviro::day_length(planet, sun);
        planet.day = day;
        planet.resonant_period = resonant;
        planet.escape_velocity = enviro::escape_velocity(planet.mass, planet.radius);

        if planet.planet_type.is_gas_giant() {
            self.init_gas_giant(sun, planet);
        } else {
            init_gravity_pressure_temp(sun, planet);
            if planet.max_temperature >= FREEZING_POINT_OF_WATER
                && planet.min_temperature <= planet.boiling_point
            {
                planet.gases = atmosphere(sun, planet);
            }

            if planet.surface_pressure < 1.0 {
                planet.planet_type = if planet.earth_masses() < ASTEROID_MASS_LIMIT {
                    PlanetType::Asteroids
                } else {
                    PlanetType::Rock
                };
            } else {
                classify_surface(planet);
            }
        }

        planet.breathability = enviro::breathability(planet);
        tracing::debug!(
            "Planet {}: {:.3} AU, {:.3} Earth masses, {}",
            planet.number,
            planet.a,
            planet.earth_masses(),
            planet.planet_type
        );
    }

    fn init_orbit_velocity_radius(&mut self, sun: &Primary, planet: &mut Planet) {
        planet.orbit_zone = enviro_utils::orbital_zone(sun.luminosity, planet.a);
        planet.orbital_period = enviro::period(planet.a, planet.mass, sun.mass);
        if self.params.random_tilt {
            planet.axial_tilt = enviro::inclination(&mut self.rng, planet.a);
        }
        planet.exospheric_temperature = EARTH_EXOSPHERE_TEMP / (planet.a / sun.r_ecosphere).powi(2);
        planet.rms_velocity = enviro::rms_velocity(MOL_NITROGEN, planet.exospheric_temperature);
        planet.core_radius = enviro_utils::kothari_radius(planet.dust_mass, false, planet.orbit_zone);
    }

    fn init_gas_giant(&mut self, sun: &Primary, planet: &mut Planet) {
        planet.greenhouse_effect = false;
        planet.volatile_gas_inventory = INCREDIBLY_LARGE_NUMBER;
        planet.surface_pressure = INCREDIBLY_LARGE_NUMBER;
        planet.boiling_point = INCREDIBLY_LARGE_NUMBER;
        planet.surface_temperature = INCREDIBLY_LARGE_NUMBER;
        planet.greenhouse_rise = 0.0;
        planet.albedo = about(&mut self.rng, GAS_GIANT_ALBEDO, 0.1);
        planet.hydrosphere = INCREDIBLY_LARGE_NUMBER;
        planet.molecular_weight = enviro::min_molec_weight(planet, sun.age);
        planet.surface_gravity = INCREDIBLY_LARGE_NUMBER;
    }

    /// Accrete moons around a planet and keep those above the minimum mass.
    fn generate_moons(&mut self, sun: &Primary, planet: &Protoplanet) -> Vec<Planet> {
        let m1 = planet.mass;
        let mu = sun.mass / (m1 + sun.mass);
        let (a, e) = (planet.a, planet.e);
        let outer_limit = (0.464 - 0.380 * mu - 0.631 * e + 0.586 * mu * e + 0.150 * e * e
            - 0.198 * mu * e * e)
            * a;
        tracing::trace!("Moon region of planet at {a:.3} AU extends to {outer_limit:.4} AU");

        let min_mass = self.params.moon_min_mass;
        let mut accrete = Accrete::new();
        accrete
            .dist_moon_masses(
                &mut self.rng,
                m1,
                sun.luminosity,
                a,
                e,
                0.0,
                stellar_dust_limit(m1),
                1.0,
                outer_limit,
            )
            .into_iter()
            .filter(|moon| moon.earth_masses() >= min_mass)
            .map(Protoplanet::into_planet)
            .collect()
    }
}

/// Size the planet as a gas giant first and keep that if it is heavy,
/// gassy and holds on to helium; otherwise size it as a rock and boil off
/// light gases over the star's lifetime.
fn init_density_gravity(sun: &Primary, planet: &mut Planet) {
    planet.density = enviro_utils::empirical_density(planet.mass, planet.a, sun.r_ecosphere, true);
    planet.radius = enviro_utils::volume_radius(planet.mass, planet.density);
    planet.surface_acceleration = enviro::acceleration(planet.mass, planet.radius);
    planet.surface_gravity = enviro::gravity(planet.surface_acceleration);
    planet.molecular_weight = enviro::min_molec_weight(planet, sun.age);

    if planet.earth_masses() > 1.0
        && planet.gas_fraction() > GIANT_GAS_FRACTION
        && planet.molecular_weight <= HELIUM
    {
        planet.planet_type = if planet.gas_fraction() < DWARF_GAS_FRACTION {
            PlanetType::SubSubGasGiant
        } else if planet.earth_masses() < SUB_GIANT_EARTH_MASSES {
            PlanetType::SubGasGiant
        } else {
            PlanetType::GasGiant
        };
        planet.gas_giant = true;
        return;
    }

    planet.radius = enviro_utils::kothari_radius(planet.mass, false, planet.orbit_zone);
    planet.density = enviro_utils::volume_density(planet.mass, planet.radius);
    planet.surface_acceleration = enviro::acceleration(planet.mass, planet.radius);
    planet.surface_gravity = enviro::gravity(planet.surface_acceleration);

    if planet.gas_fraction() > ACCRETED_GAS_FRACTION {
        let h2_mass = planet.gas_mass * 0.85;
        let he_mass = (planet.gas_mass - h2_mass) * 0.999;
        let h2_life = enviro::gas_life(MOL_HYDROGEN, planet);
        let he_life = enviro::gas_life(HELIUM, planet);

        for (life, mass) in [(h2_life, h2_mass), (he_life, he_mass)] {
            if life < sun.age {
                let loss = (1.0 - 1.0 / (sun.age / life).exp()) * mass;
                planet.gas_mass -= loss;
                planet.mass -= loss;
                planet.surface_acceleration = enviro::acceleration(planet.mass, planet.radius);
                planet.surface_gravity = enviro::gravity(planet.surface_acceleration);
            }
        }
    }
}

fn init_gravity_pressure_temp(sun: &Primary, planet: &mut Planet) {
    planet.surface_gravity = enviro::gravity(planet.surface_acceleration);
    planet.molecular_weight = enviro::min_molec_weight(planet, sun.age);
    planet.greenhouse_effect = enviro::is_greenhouse(sun.r_ecosphere, planet.a);
    planet.volatile_gas_inventory = enviro::vol_inventory(
        planet.mass,
        planet.escape_velocity,
        planet.rms_velocity,
        sun.mass,
        planet.orbit_zone,
        planet.greenhouse_effect,
        planet.gas_fraction() > ACCRETED_GAS_FRACTION,
    );
    planet.surface_pressure = enviro::pressure(
        planet.volatile_gas_inventory,
        planet.radius,
        planet.surface_gravity,
    );
    planet.boiling_point = if planet.surface_pressure == 0.0 {
        0.0
    } else {
        enviro_utils::boiling_point(planet.surface_pressure)
    };

    let rounds = enviro::iterate_surface_temp(planet, sun);
    tracing::trace!("Planet {} surface temperature settled after {rounds} rounds", planet.number);
}

/// Atmospheric composition, sorted by ascending partial pressure. Empty
/// when no gas survives.
fn atmosphere(sun: &Primary, planet: &Planet) -> Vec<Gas> {
    if planet.surface_pressure <= 0.0 {
        return Vec::new();
    }

    let pressure = planet.surface_pressure / MILLIBARS_PER_BAR;
    let amounts: Vec<_> = GASES
        .iter()
        .filter_map(|element| {
            let bp = element.boiling_point
                / (373.0 * ((pressure + 0.001).ln() / -5050.5 + 1.0 / 373.0));
            if !(bp >= 0.0 && bp < planet.low_temperature)
                || element.weight < planet.molecular_weight
            {
                return None;
            }

            let vrms = enviro::rms_velocity(element.weight, planet.exospheric_temperature);
            let pvrms = (1.0 / (1.0 + vrms / planet.escape_velocity)).powf(sun.age / 1e9);
            let damping = 1.0 / (1.0 + element.reactivity);
            let warm = sun.age > 2e9
                && planet.surface_temperature > 270.0
                && planet.surface_temperature < 400.0;

            let react = if element.number == AN_AR {
                0.19 * sun.age / 4e9
            } else if element.number == AN_O && warm {
                let pres2 = 0.89 + pressure / 4.0;
                damping.powf((sun.age / 2e9).powf(0.25) * pres2)
            } else if element.number == AN_CO2 && warm {
                let pres2 = 0.75 + pressure;
                damping.powf((sun.age / 2e9).powf(0.5) * pres2) * 1.5
            } else {
                let pres2 = 0.75 + pressure;
                damping.powf(sun.age / 2e9 * pres2)
            };

            let fract = 1.0 - planet.molecular_weight / element.weight;
            let amount = element.abunds * pvrms * react * fract;
            (amount > 0.0).then_some((element, amount))
        })
        .collect();

    let total: f64 = amounts.iter().map(|(_, amount)| amount).sum();
    let mut gases: Vec<Gas> = amounts
        .into_iter()
        .map(|(element, amount)| Gas {
            element,
            surface_pressure: planet.surface_pressure * amount / total,
        })
        .collect();
    gases.sort_by(|a, b| a.surface_pressure.total_cmp(&b.surface_pressure));
    gases
}

/// Type of a rocky planet with a real atmosphere.
fn classify_surface(planet: &mut Planet) {
    planet.planet_type = if planet.hydrosphere >= 0.95 {
        PlanetType::Water
    } else if planet.ice_cover > 0.95 {
        PlanetType::Ice
    } else if planet.hydrosphere > 0.05 {
        PlanetType::Terrestrial
    } else if planet.surface_temperature > planet.boiling_point {
        PlanetType::Venusian
    } else if planet.gas_fraction() > 0.0001 {
        // Accreted gas without greenhouse or liquid water.
        planet.ice_cover = 1.0;
        PlanetType::Ice
    } else {
        PlanetType::Martian
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planet::Breathability;
    use crate::primary::SpectralClass;

    fn sun_like(seed: u64) -> StargenParameters {
        StargenParameters {
            seed,
            star_mass: Some(1.0),
            star_luminosity: Some(1.0),
            ..Default::default()
        }
    }

    #[test]
    fn test_generation_is_deterministic() {
        let a = Generator::new(sun_like(11)).generate_system();
        let b = Generator::new(sun_like(11)).generate_system();
        assert_eq!(a.planet_count(), b.planet_count());
        assert_eq!(a.primary, b.primary);
        for (pa, pb) in a.planets().zip(b.planets()) {
            assert_eq!(pa, pb);
        }
    }

    #[test]
    fn test_planets_are_numbered_outwards() {
        let system = Generator::new(sun_like(4)).generate_system();
        assert!(system.planet_count() > 0);
        let planets: Vec<&Planet> = system.planets().collect();
        for (i, planet) in planets.iter().enumerate() {
            assert_eq!(planet.number, i as u32 + 1);
            assert!(!planet.is_moon());
        }
        for pair in planets.windows(2) {
            assert!(pair[0].a <= pair[1].a, "{} before {}", pair[0].a, pair[1].a);
        }
    }

    #[test]
    fn test_every_planet_is_classified() {
        for seed in 0..4 {
            let system = Generator::new(sun_like(seed)).generate_system();
            for planet in system.planets() {
                assert_ne!(planet.planet_type, PlanetType::Unknown, "planet {planet:?}");
                assert!(planet.radius > 0.0 && planet.radius.is_finite());
                assert!(planet.orbital_period > 0.0);
                if planet.planet_type.is_gas_giant() {
                    assert!(planet.gas_giant);
                    assert!(planet.gases.is_empty());
                    assert_eq!(planet.breathability, Breathability::None);
                } else {
                    assert!(planet.surface_temperature.is_finite());
                    assert!(planet.min_temperature <= planet.max_temperature);
                }
            }
        }
    }

    #[test]
    fn test_atmospheres_sorted_and_sum_to_pressure() {
        for seed in 0..6 {
            let system = Generator::new(sun_like(seed)).generate_system();
            for planet in system.planets().filter(|p| !p.gases.is_empty()) {
                for pair in planet.gases.windows(2) {
                    assert!(pair[0].surface_pressure <= pair[1].surface_pressure);
                }
                let total: f64 = planet.gases.iter().map(|g| g.surface_pressure).sum();
                let relative = (total - planet.surface_pressure).abs() / planet.surface_pressure;
                assert!(relative < 1e-9, "gases {total} vs surface {}", planet.surface_pressure);
                assert_ne!(planet.breathability, Breathability::None);
            }
        }
    }

    #[test]
    fn test_some_system_has_a_gas_giant() {
        let giants: usize = (0..5)
            .map(|seed| {
                let system = Generator::new(sun_like(seed)).generate_system();
                system.planets().filter(|p| p.planet_type.is_gas_giant()).count()
            })
            .sum();
        assert!(giants > 0);
    }

    #[test]
    fn test_star_overrides_apply() {
        let params = StargenParameters {
            seed: 3,
            spectral_class: Some(SpectralClass::K),
            star_mass: Some(0.8),
            distance: Some(42.0),
            name: String::from("Test"),
            ..Default::default()
        };
        let sun = Generator::new(params).generate_primary();
        assert_eq!(sun.spectral_class, SpectralClass::K);
        assert_eq!(sun.mass, 0.8);
        assert_eq!(sun.distance, 42.0);
        assert_eq!(sun.name, "Test");
    }

    #[test]
    fn test_out_of_range_star_mass_is_replaced() {
        let mut generator = Generator::new(sun_like(1));
        let sun = Primary {
            mass: 3.0,
            ..Default::default()
        };
        let system = generator.generate_stellar_system(sun, &[]);
        let primary = &system.primary;
        assert!((0.7..1.4).contains(&primary.mass), "mass {}", primary.mass);
        assert!(primary.luminosity > 0.0);
        assert!((MIN_AGE..=MAX_AGE).contains(&primary.age), "age {}", primary.age);
        assert!((primary.life - 1.0e10 * primary.mass / primary.luminosity).abs() < 1.0);
    }

    #[test]
    fn test_moons_attach_to_planets() {
        let params = StargenParameters {
            moons: true,
            ..sun_like(8)
        };
        let system = Generator::new(params).generate_system();
        let mut moons = 0;
        for &id in system.planet_ids() {
            for moon in system.moons_of(id) {
                moons += 1;
                assert_eq!(moon.parent, Some(id));
                assert!(moon.earth_masses() >= StargenParameters::DEFAULT_MOON_MIN_MASS);
            }
        }
        assert_eq!(system.body_count(), system.planet_count() + moons);
    }

    #[test]
    fn test_surface_classification_rules() {
        let mut planet = Planet {
            mass: 3e-6,
            hydrosphere: 0.97,
            ..Default::default()
        };
        classify_surface(&mut planet);
        assert_eq!(planet.planet_type, PlanetType::Water);

        planet.hydrosphere = 0.5;
        classify_surface(&mut planet);
        assert_eq!(planet.planet_type, PlanetType::Terrestrial);

        planet.hydrosphere = 0.0;
        planet.surface_temperature = 700.0;
        planet.boiling_point = 500.0;
        classify_surface(&mut planet);
        assert_eq!(planet.planet_type, PlanetType::Venusian);

        planet.surface_temperature = 200.0;
        planet.gas_mass = 1e-9;
        classify_surface(&mut planet);
        assert_eq!(planet.planet_type, PlanetType::Ice);
        assert_eq!(planet.ice_cover, 1.0);

        planet.ice_cover = 0.0;
        planet.gas_mass = 0.0;
        classify_surface(&mut planet);
        assert_eq!(planet.planet_type, PlanetType::Martian);
    }
}
