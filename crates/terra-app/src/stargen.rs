//! The `stargen` subcommand.

use std::io::Write;

use terra_config::Config;
use terra_stargen::{Planet, StellarSystem, generate_batch};

use crate::error::AppError;

/// Generate the configured systems and write a summary of each to `out`.
/// Returns the number of systems written.
pub fn run_stargen(config: &Config, out: &mut dyn Write) -> Result<usize, AppError> {
    let systems = generate_batch(&config.stargen)?;
    for (index, system) in systems.iter().enumerate() {
        if index > 0 {
            writeln!(out)?;
        }
        write_system(system, config.output.list_moons, out)?;
    }
    Ok(systems.len())
}

fn write_system(system: &StellarSystem, list_moons: bool, out: &mut dyn Write) -> std::io::Result<()> {
    let star = &system.primary;
    writeln!(
        out,
        "{} ({}): {:.3} solar masses, {:.3} solar luminosities, {:.2} Gyr, {:.1} pc, {} planets",
        star.name,
        star.classification(),
        star.mass,
        star.luminosity,
        star.age / 1e9,
        star.distance,
        system.planet_count()
    )?;
    for &id in system.planet_ids() {
        writeln!(out, "{}", planet_line(system.body(id)))?;
        if list_moons {
            for moon in system.moons_of(id) {
                writeln!(out, "{}", moon_line(moon))?;
            }
        }
    }
    Ok(())
}

/// One summary line: distance, mass, radius, type, surface temperature and
/// breathability.
pub fn planet_line(planet: &Planet) -> String {
    format!(
        "{:>3} {:>9.3} AU {:>11.3} EM {:>9.0} km  {:<14} {:>7.1} K  {}",
        planet.number,
        planet.a,
        planet.earth_masses(),
        planet.radius,
        planet.planet_type.to_string(),
        planet.surface_temperature,
        planet.breathability
    )
}

fn moon_line(moon: &Planet) -> String {
    format!(
        "      moon {:>3} {:>9.5} AU {:>11.5} EM",
        moon.number,
        moon.a,
        moon.earth_masses()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use terra_stargen::{Breathability, PlanetType};

    fn stargen_config(systems: usize) -> Config {
        let mut config = Config::default();
        config.stargen.seed = 11;
        config.stargen.star_mass = Some(1.0);
        config.stargen.star_luminosity = Some(1.0);
        config.stargen.systems = systems;
        config
    }

    #[test]
    fn test_planet_line_fields() {
        let planet = Planet {
            number: 3,
            radius: 6378.0,
            surface_temperature: 288.2,
            planet_type: PlanetType::Terrestrial,
            breathability: Breathability::Breathable,
            ..Planet::with_orbit(1.0, 0.02, 3.0e-6)
        };
        let line = planet_line(&planet);
        assert!(line.starts_with("  3     1.000 AU"), "{line}");
        assert!(line.contains("6378 km"), "{line}");
        assert!(line.contains("288.2 K"), "{line}");
        assert!(line.ends_with("breathable"), "{line}");
    }

    #[test]
    fn test_one_line_per_planet() {
        let mut config = stargen_config(1);
        config.output.list_moons = false;
        let mut out = Vec::new();
        assert_eq!(run_stargen(&config, &mut out).unwrap(), 1);

        let text = String::from_utf8(out).unwrap();
        let expected = terra_stargen::Generator::new(config.stargen.clone())
            .generate_system()
            .planet_count();
        assert_eq!(text.lines().count(), expected + 1);
        assert!(text.starts_with("Stargen Planetary System ("), "{text}");
    }

    #[test]
    fn test_systems_separated_by_blank_line() {
        let config = stargen_config(2);
        let mut out = Vec::new();
        assert_eq!(run_stargen(&config, &mut out).unwrap(), 2);
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().filter(|l| l.is_empty()).count(), 1);
    }

    #[test]
    fn test_moons_listed_under_planets() {
        let mut config = stargen_config(1);
        config.stargen.moons = true;
        let mut out = Vec::new();
        run_stargen(&config, &mut out).unwrap();

        let system = terra_stargen::Generator::new(config.stargen.clone()).generate_system();
        let moons = system.body_count() - system.planet_count();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().filter(|l| l.trim_start().starts_with("moon")).count(), moons);
    }
}
