//! Planetary environment model.
//!
//! Orbital and rotational properties, atmospheric retention, and the
//! surface temperature relaxation that couples hydrosphere, clouds, ice
//! and albedo.

use std::f64::consts::PI;

use rand::Rng;

use crate::constants::*;
use crate::enviro_utils;
use crate::planet::{Breathability, OrbitalZone, Planet};
use crate::primary::Primary;
use crate::random::about;

/// Cap on search and relaxation rounds.
const LOOP_LIMIT: usize = 25;
/// Surface temperature change, in kelvin, below which relaxation stops.
const CONVERGENCE_LIMIT: f64 = 0.25;
/// Gas fraction above which a body counts as having accreted gas.
pub(crate) const ACCRETED_GAS_FRACTION: f64 = 0.000001;

/// Orbital period in days of two bodies `separation` AU apart.
pub fn period(separation: f64, small_mass: f64, large_mass: f64) -> f64 {
    let years = (separation.powi(3) / (small_mass + large_mass)).sqrt();
    years * DAYS_IN_A_YEAR
}

/// Length of a day in hours, and whether the spin is locked in a
/// resonance with the orbit.
///
/// Tidal braking slows the initial spin over the star's age. A body that
/// stops, or would spin slower than it orbits, is tidally locked: its day
/// equals its year, or a resonant fraction of it on an eccentric orbit.
pub fn day_length(planet: &Planet, primary: &Primary) -> (f64, bool) {
    let mass_in_grams = planet.mass * SOLAR_MASS_IN_GRAMS;
    let radius_in_cm = planet.radius * CM_PER_KM;
    let year_in_hours = planet.orbital_period * 24.0;
    let k2 = if planet.planet_type.is_gas_giant() { 0.24 } else { 0.33 };

    let base_angular_velocity = (2.0 * J * mass_in_grams / (k2 * radius_in_cm.powi(2))).sqrt();
    let change_in_angular_velocity = CHANGE_IN_EARTH_ANG_VEL
        * (planet.density / EARTH_DENSITY)
        * (radius_in_cm / EARTH_RADIUS)
        * (EARTH_MASS_IN_GRAMS / mass_in_grams)
        * primary.mass.powi(2)
        * (1.0 / planet.a.powi(6));
    let ang_velocity = base_angular_velocity + change_in_angular_velocity * primary.age;

    let stopped = ang_velocity <= 0.0;
    let day_in_hours = if stopped {
        INCREDIBLY_LARGE_NUMBER
    } else {
        RADIANS_PER_ROTATION / (SECONDS_PER_HOUR * ang_velocity)
    };

    if day_in_hours >= year_in_hours || stopped {
        if planet.e > 0.1 {
            let spin_resonance_factor = (1.0 - planet.e) / (1.0 + planet.e);
            return (spin_resonance_factor * year_in_hours, true);
        }
        return (year_in_hours, false);
    }
    (day_in_hours, false)
}

/// Random axial tilt in whole degrees, larger further out.
pub fn inclination<R: Rng + ?Sized>(rng: &mut R, orb_radius: f64) -> f64 {
    let tilt = (orb_radius.powf(0.2) * about(rng, EARTH_AXIAL_TILT, 0.4)) as i32;
    f64::from(tilt % 360)
}

/// Escape velocity in cm/sec.
pub fn escape_velocity(mass: f64, radius: f64) -> f64 {
    let mass_in_grams = mass * SOLAR_MASS_IN_GRAMS;
    let radius_in_cm = radius * CM_PER_KM;
    (2.0 * GRAV_CONSTANT * mass_in_grams / radius_in_cm).sqrt()
}

/// Root-mean-square molecular velocity in cm/sec.
pub fn rms_velocity(molecular_weight: f64, exospheric_temp: f64) -> f64 {
    (3.0 * MOLAR_GAS_CONST * exospheric_temp / molecular_weight).sqrt() * CM_PER_METER
}

/// Smallest molecular weight a body can hold on to.
pub fn molecule_limit(mass: f64, equat_radius: f64, exospheric_temp: f64) -> f64 {
    let esc_velocity = escape_velocity(mass, equat_radius);
    3.0 * MOLAR_GAS_CONST * exospheric_temp
        / (esc_velocity / GAS_RETENTION_THRESHOLD / CM_PER_METER).powi(2)
}

/// Surface acceleration in cm/sec^2.
pub fn acceleration(mass: f64, radius: f64) -> f64 {
    GRAV_CONSTANT * (mass * SOLAR_MASS_IN_GRAMS) / (radius * CM_PER_KM).powi(2)
}

/// Surface gravity in Earth gravities.
pub fn gravity(acceleration: f64) -> f64 {
    acceleration / EARTH_ACCELERATION
}

/// Unitless volatile gas inventory. Zero unless the body retains gases.
pub fn vol_inventory(
    mass: f64,
    escape_vel: f64,
    rms_vel: f64,
    stellar_mass: f64,
    zone: OrbitalZone,
    greenhouse_effect: bool,
    accreted_gas: bool,
) -> f64 {
    if escape_vel / rms_vel < GAS_RETENTION_THRESHOLD {
        return 0.0;
    }
    let proportion_const = match zone {
        OrbitalZone::Inner => 140_000.0,
        OrbitalZone::Middle => 75_000.0,
        OrbitalZone::Outer => 250.0,
    };
    let earth_units = mass * SUN_MASS_IN_EARTH_MASSES;
    let inventory = proportion_const * earth_units / stellar_mass;
    if greenhouse_effect || accreted_gas {
        inventory
    } else {
        inventory / 140.0
    }
}

/// Surface pressure in millibars.
pub fn pressure(volatile_gas_inventory: f64, equat_radius: f64, gravity: f64) -> f64 {
    let radius_ratio = KM_EARTH_RADIUS / equat_radius;
    volatile_gas_inventory * gravity * (EARTH_SURF_PRES_IN_MILLIBARS / 1000.0)
        / radius_ratio.powi(2)
}

/// Fraction of the surface covered by water.
pub fn hydro_fraction(volatile_gas_inventory: f64, planet_radius: f64) -> f64 {
    let fraction =
        0.71 * volatile_gas_inventory / 1000.0 * (KM_EARTH_RADIUS / planet_radius).powi(2);
    fraction.min(1.0)
}

/// Fraction of the surface covered by cloud.
pub fn cloud_fraction(
    surf_temp: f64,
    smallest_mw_retained: f64,
    equat_radius: f64,
    hydro_fraction: f64,
) -> f64 {
    if smallest_mw_retained > WATER_VAPOR {
        return 0.0;
    }
    let surf_area = 4.0 * PI * equat_radius.powi(2);
    let hydro_mass = hydro_fraction * surf_area * EARTH_WATER_MASS_PER_AREA;
    let water_vapor_in_kg =
        0.000_000_01 * hydro_mass * (Q2_36 * (surf_temp - EARTH_AVERAGE_KELVIN)).exp();
    let fraction = CLOUD_COVERAGE_FACTOR * water_vapor_in_kg / surf_area;
    fraction.min(1.0)
}

/// Fraction of the surface covered by ice.
pub fn ice_fraction(hydro_fraction: f64, surf_temp: f64) -> f64 {
    let surf_temp = surf_temp.min(328.0);
    let fraction = ((328.0 - surf_temp) / 90.0).powi(5);
    fraction.min(1.5 * hydro_fraction).min(1.0)
}

/// Effective radiating temperature in kelvin.
pub fn eff_temp(ecosphere_radius: f64, orb_radius: f64, albedo: f64) -> f64 {
    (ecosphere_radius / orb_radius).sqrt()
        * ((1.0 - albedo) / (1.0 - EARTH_ALBEDO)).sqrt().sqrt()
        * EARTH_EFFECTIVE_TEMP
}

/// Estimated average surface temperature in kelvin.
pub fn est_temp(ecosphere_radius: f64, orb_radius: f64, albedo: f64) -> f64 {
    (ecosphere_radius / orb_radius).sqrt()
        * ((1.0 - albedo) / (1.0 - EARTH_ALBEDO)).sqrt().sqrt()
        * EARTH_AVERAGE_KELVIN
}

/// Whether an orbit is warm enough for a runaway greenhouse.
pub fn is_greenhouse(r_ecosphere: f64, orb_radius: f64) -> bool {
    eff_temp(r_ecosphere, orb_radius, GREENHOUSE_TRIGGER_ALBEDO) > FREEZING_POINT_OF_WATER
}

/// Temperature rise in kelvin from the greenhouse effect.
pub fn green_rise(optical_depth: f64, effective_temp: f64, surf_pressure: f64) -> f64 {
    let convection_factor =
        EARTH_CONVECTION_FACTOR * (surf_pressure / EARTH_SURF_PRES_IN_MILLIBARS).powf(0.4);
    ((1.0 + 0.75 * optical_depth).sqrt().sqrt() - 1.0) * effective_temp * convection_factor
}

/// Bond albedo from surface cover. Cloud hides an equal share of each
/// surface component that is present.
pub fn planet_albedo(
    water_fraction: f64,
    cloud_fraction: f64,
    ice_fraction: f64,
    surf_pressure: f64,
) -> f64 {
    let rock_fraction = 1.0 - water_fraction - ice_fraction;
    let components = [water_fraction, ice_fraction, rock_fraction]
        .iter()
        .filter(|f| **f > 0.0)
        .count();
    let cloud_adjustment = cloud_fraction / components as f64;

    let rock_fraction = if rock_fraction >= cloud_adjustment {
        rock_fraction - cloud_adjustment
    } else {
        0.0
    };
    let water_fraction = if water_fraction > cloud_adjustment {
        water_fraction - cloud_adjustment
    } else {
        0.0
    };
    let ice_fraction = if ice_fraction > cloud_adjustment {
        ice_fraction - cloud_adjustment
    } else {
        0.0
    };

    let cloud_part = cloud_fraction * CLOUD_ALBEDO;
    let (rock_part, water_part, ice_part) = if surf_pressure == 0.0 {
        (
            rock_fraction * ROCKY_AIRLESS_ALBEDO,
            0.0,
            ice_fraction * AIRLESS_ICE_ALBEDO,
        )
    } else {
        (
            rock_fraction * ROCKY_ALBEDO,
            water_fraction * WATER_ALBEDO,
            ice_fraction * ICE_ALBEDO,
        )
    };
    cloud_part + rock_part + water_part + ice_part
}

/// Dimensionless optical depth of an atmosphere.
pub fn opacity(molecular_weight: f64, surf_pressure: f64) -> f64 {
    let optical_depth = match molecular_weight {
        w if (0.0..10.0).contains(&w) => 3.0,
        w if (10.0..20.0).contains(&w) => 2.34,
        w if (20.0..30.0).contains(&w) => 1.0,
        w if (30.0..45.0).contains(&w) => 0.15,
        w if (45.0..100.0).contains(&w) => 0.05,
        _ => 0.0,
    };

    let atmospheres = surf_pressure / EARTH_SURF_PRES_IN_MILLIBARS;
    let scale = if atmospheres >= 70.0 {
        8.333
    } else if atmospheres >= 50.0 {
        6.666
    } else if atmospheres >= 30.0 {
        3.333
    } else if atmospheres >= 10.0 {
        2.0
    } else if atmospheres >= 5.0 {
        1.5
    } else {
        1.0
    };
    optical_depth * scale
}

/// Years for a body to lose a gas of the given molecular weight.
pub fn gas_life(molecular_weight: f64, planet: &Planet) -> f64 {
    let v = rms_velocity(molecular_weight, planet.exospheric_temperature);
    let g = planet.surface_gravity * EARTH_ACCELERATION;
    let r = planet.radius * CM_PER_KM;
    let t = v.powi(3) / (2.0 * g.powi(2) * r) * ((3.0 * g * r) / v.powi(2)).exp();
    let years = t / (SECONDS_PER_HOUR * 24.0 * DAYS_IN_A_YEAR);
    if years > 2.0e10 {
        INCREDIBLY_LARGE_NUMBER
    } else {
        years
    }
}

/// Smallest molecular weight retained over `star_age` years.
///
/// Brackets the weight whose gas lifetime equals the age by halving or
/// doubling from the escape-velocity limit, then bisects the bracket.
/// Both phases stop silently after a fixed number of rounds.
pub fn min_molec_weight(planet: &Planet, star_age: f64) -> f64 {
    let target = star_age;
    let mut guess1 = molecule_limit(planet.mass, planet.radius, planet.exospheric_temperature);
    let mut guess2 = guess1;
    let mut life = gas_life(guess1, planet);

    if life > target {
        for _ in 1..LOOP_LIMIT {
            if life <= target {
                break;
            }
            guess1 /= 2.0;
            life = gas_life(guess1, planet);
        }
    } else {
        for _ in 1..LOOP_LIMIT {
            if life >= target {
                break;
            }
            guess2 *= 2.0;
            life = gas_life(guess2, planet);
        }
    }

    for _ in 1..LOOP_LIMIT {
        if guess2 - guess1 <= 0.1 {
            break;
        }
        let guess3 = (guess1 + guess2) / 2.0;
        if gas_life(guess3, planet) < target {
            guess1 = guess3;
        } else {
            guess2 = guess3;
        }
    }
    guess2
}

/// The quantities relaxed between surface temperature rounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceState {
    pub hydrosphere: f64,
    pub cloud_cover: f64,
    pub ice_cover: f64,
    pub surface_temperature: f64,
    pub albedo: f64,
}

impl SurfaceState {
    pub fn of(planet: &Planet) -> Self {
        Self {
            hydrosphere: planet.hydrosphere,
            cloud_cover: planet.cloud_cover,
            ice_cover: planet.ice_cover,
            surface_temperature: planet.surface_temperature,
            albedo: planet.albedo,
        }
    }
}

/// Weighted mean with two parts `last` to one part `new`: `(new + 2 * last) / 3`.
fn relax(new: f64, last: f64) -> f64 {
    (new + 2.0 * last) / 3.0
}

/// One round of the surface temperature model.
///
/// `previous` is `None` on the first round, which seeds the temperature
/// from an Earth-like albedo and takes raw values. Later rounds blend each
/// new value with the previous one.
pub fn calculate_surface_temp(planet: &mut Planet, primary: &Primary, previous: Option<SurfaceState>) {
    let first = previous.is_none();
    let mut boil_off = false;

    if first {
        planet.albedo = EARTH_ALBEDO;
        let effective_temp = eff_temp(primary.r_ecosphere, planet.a, planet.albedo);
        let greenhouse_temp = green_rise(
            opacity(planet.molecular_weight, planet.surface_pressure),
            effective_temp,
            planet.surface_pressure,
        );
        planet.surface_temperature = effective_temp + greenhouse_temp;
        set_temp_range(planet);
    }

    if planet.greenhouse_effect && planet.max_temperature < planet.boiling_point {
        tracing::debug!(
            "Deluge: planet {} max ({:.1}) < boil ({:.1})",
            planet.number,
            planet.max_temperature,
            planet.boiling_point
        );
        planet.greenhouse_effect = false;
        planet.volatile_gas_inventory = vol_inventory(
            planet.mass,
            planet.escape_velocity,
            planet.rms_velocity,
            primary.mass,
            planet.orbit_zone,
            planet.greenhouse_effect,
            planet.gas_fraction() > ACCRETED_GAS_FRACTION,
        );
        planet.surface_pressure = pressure(
            planet.volatile_gas_inventory,
            planet.radius,
            planet.surface_gravity,
        );
        planet.boiling_point = enviro_utils::boiling_point(planet.surface_pressure);
    }

    planet.hydrosphere = hydro_fraction(planet.volatile_gas_inventory, planet.radius);
    planet.cloud_cover = cloud_fraction(
        planet.surface_temperature,
        planet.molecular_weight,
        planet.radius,
        planet.hydrosphere,
    );
    planet.ice_cover = ice_fraction(planet.hydrosphere, planet.surface_temperature);

    if planet.greenhouse_effect && planet.surface_pressure > 0.0 {
        planet.cloud_cover = 1.0;
    }

    if planet.max_temperature >= planet.boiling_point && !first {
        planet.hydrosphere = 0.0;
        boil_off = true;
        planet.cloud_cover = if planet.molecular_weight > WATER_VAPOR {
            0.0
        } else {
            1.0
        };
    }

    if planet.surface_temperature < FREEZING_POINT_OF_WATER - 3.0 {
        planet.hydrosphere = 0.0;
    }

    planet.albedo = planet_albedo(
        planet.hydrosphere,
        planet.cloud_cover,
        planet.ice_cover,
        planet.surface_pressure,
    );
    let effective_temp = eff_temp(primary.r_ecosphere, planet.a, planet.albedo);
    let greenhouse_temp = green_rise(
        opacity(planet.molecular_weight, planet.surface_pressure),
        effective_temp,
        planet.surface_pressure,
    );
    planet.surface_temperature = effective_temp + greenhouse_temp;

    if let Some(last) = previous {
        if !boil_off {
            planet.hydrosphere = relax(planet.hydrosphere, last.hydrosphere);
        }
        planet.cloud_cover = relax(planet.cloud_cover, last.cloud_cover);
        planet.ice_cover = relax(planet.ice_cover, last.ice_cover);
        planet.albedo = relax(planet.albedo, last.albedo);
        planet.surface_temperature = relax(planet.surface_temperature, last.surface_temperature);
    }

    set_temp_range(planet);
}

/// Relax the surface temperature model to a fixed point and record the
/// greenhouse rise. Returns the number of rounds run after the first;
/// at most 25, stopping early once the temperature moves by less than a
/// quarter kelvin.
pub fn iterate_surface_temp(planet: &mut Planet, primary: &Primary) -> usize {
    relax_surface_temp(planet, primary, LOOP_LIMIT, CONVERGENCE_LIMIT)
}

fn relax_surface_temp(
    planet: &mut Planet,
    primary: &Primary,
    max_rounds: usize,
    tolerance: f64,
) -> usize {
    let initial_temp = est_temp(primary.r_ecosphere, planet.a, planet.albedo);

    tracing::debug!(
        "Gas lifetimes: H2: {:.3e} H2O: {:.3e} N: {:.3e} N2: {:.3e}",
        gas_life(MOL_HYDROGEN, planet),
        gas_life(WATER_VAPOR, planet),
        gas_life(ATOMIC_NITROGEN, planet),
        gas_life(MOL_NITROGEN, planet)
    );

    calculate_surface_temp(planet, primary, None);

    let mut rounds = 0;
    while rounds < max_rounds {
        rounds += 1;
        let last = SurfaceState::of(planet);
        calculate_surface_temp(planet, primary, Some(last));
        if (planet.surface_temperature - last.surface_temperature).abs() < tolerance {
            break;
        }
    }
    if rounds == max_rounds {
        tracing::debug!("Surface temperature still moving after {rounds} rounds");
    }

    planet.greenhouse_rise = planet.surface_temperature - initial_temp;
    rounds
}

/// Partial pressure of a gas as inspired, after lung water vapour.
pub fn inspired_partial_pressure(surf_pressure: f64, gas_pressure: f64) -> f64 {
    let fraction = gas_pressure / surf_pressure;
    (surf_pressure - H20_ASSUMED_PRESSURE) * fraction
}

/// Whether a human could breathe the planet's atmosphere. Any gas above
/// its tolerated pressure makes the air poisonous, whatever the oxygen.
pub fn breathability(planet: &Planet) -> Breathability {
    if planet.gases.is_empty() {
        return Breathability::None;
    }

    let mut oxygen_ok = false;
    for gas in &planet.gases {
        let ipp = inspired_partial_pressure(planet.surface_pressure, gas.surface_pressure);
        if ipp > gas.element.max_ipp {
            return Breathability::Poisonous;
        }
        if gas.element.number == AN_O {
            oxygen_ok = (MIN_O2_IPP..=MAX_O2_IPP).contains(&ipp);
        }
    }

    if oxygen_ok {
        Breathability::Breathable
    } else {
        Breathability::Unbreathable
    }
}

fn lim(x: f64) -> f64 {
    x / (1.0 + x.powi(4)).sqrt().sqrt()
}

/// Squash `v` smoothly into `[min, max]`.
fn soft(v: f64, max: f64, min: f64) -> f64 {
    let dv = v - min;
    let dm = max - min;
    (lim(2.0 * dv / dm - 1.0) + 1.0) / 2.0 * dm + min
}

/// Day/night and seasonal extremes around the mean surface temperature.
fn set_temp_range(planet: &mut Planet) {
    let pressmod = 1.0 / (1.0 + 20.0 * planet.surface_pressure / 1000.0).sqrt();
    let ppmod = 1.0 / (10.0 + 5.0 * planet.surface_pressure / 1000.0).sqrt();
    let tiltmod = ((planet.axial_tilt * PI / 180.0).cos() * (1.0 + planet.e).powi(2)).abs();
    let daymod = 1.0 / (200.0 / planet.day + 1.0);
    let mh = (1.0 + daymod).powf(pressmod);
    let ml = (1.0 - daymod).powf(pressmod);
    let hi = mh * planet.surface_temperature;
    let lo = ml * planet.surface_temperature;
    let sh = hi + ((100.0 + hi) * tiltmod).powf(ppmod.sqrt());
    let wl = lo - ((150.0 + lo) * tiltmod).powf(ppmod.sqrt());
    let max = planet.surface_temperature + planet.surface_temperature.sqrt() * 10.0;
    let min = planet.surface_temperature / (planet.day + 24.0).sqrt();

    let lo = lo.max(min);
    let wl = wl.max(0.0);

    planet.high_temperature = soft(hi, max, min);
    planet.low_temperature = soft(lo, max, min);
    planet.max_temperature = soft(sh, max, min);
    planet.min_temperature = soft(wl, max, min);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chem::find_by_number;
    use crate::planet::{Gas, PlanetType};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    const EPSILON: f64 = 1e-9;

    fn assert_close(actual: f64, expected: f64) {
        let tolerance = EPSILON * expected.abs().max(1.0);
        assert!(
            (actual - expected).abs() < tolerance,
            "expected {expected}, got {actual}"
        );
    }

    fn sun() -> Primary {
        let mut sun = Primary {
            mass: 1.0,
            luminosity: 1.0,
            age: 5e9,
            ..Default::default()
        };
        sun.set_ecosphere();
        sun
    }

    fn earth(radius: f64, gravity: f64) -> Planet {
        Planet {
            number: 3,
            planet_type: PlanetType::Terrestrial,
            mass: 3e-6,
            radius,
            a: 1.0,
            e: 0.017,
            orbital_period: 365.25,
            density: EARTH_DENSITY,
            exospheric_temperature: 287.0,
            surface_gravity: gravity,
            ..Default::default()
        }
    }

    #[test]
    fn test_period_of_earth() {
        assert_close(period(1.0, 3e-6, 1.0), 365.255452117233);
    }

    #[test]
    fn test_day_length_of_earth() {
        let (day, resonant) = day_length(&earth(6900.0, 1.0), &sun());
        assert_close(day, 17.761504374454);
        assert!(!resonant);
    }

    #[test]
    fn test_day_length_locked_close_in() {
        let mut planet = earth(6900.0, 1.0);
        planet.a = 0.05;
        planet.orbital_period = period(0.05, planet.mass, 1.0);
        let (day, resonant) = day_length(&planet, &sun());
        assert_close(day, planet.orbital_period * 24.0);
        assert!(!resonant);

        planet.e = 0.3;
        let (day, resonant) = day_length(&planet, &sun());
        assert_close(day, planet.orbital_period * 24.0 * 0.7 / 1.3);
        assert!(resonant);
    }

    #[test]
    fn test_inclination_in_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        for _ in 0..100 {
            let tilt = inclination(&mut rng, 1.0);
            assert!((14.0..=33.0).contains(&tilt), "tilt {tilt}");
            assert_eq!(tilt, tilt.trunc());
        }
    }

    #[test]
    fn test_velocities() {
        assert_close(escape_velocity(3e-6, 6900.0), 1074228.054485395813);
        assert_close(rms_velocity(28.0, 200.0), 42209.706060505631);
        assert_close(molecule_limit(3e-6, 6900.0, 273.0), 2.124344070038);
    }

    #[test]
    fn test_acceleration_and_gravity() {
        assert_close(acceleration(3e-6, 6900.0), 836.207183364839);
        assert_close(gravity(836.207183364839), 0.852663590665);
    }

    #[test]
    fn test_vol_inventory_and_pressure() {
        let inventory = vol_inventory(
            3e-6,
            1074228.054485395813,
            42209.706060505631,
            1.0,
            OrbitalZone::Inner,
            false,
            false,
        );
        assert_close(inventory, 998.32692);
        assert_close(pressure(998.32692, 6900.0, 1.0), 1183.909610892002);
    }

    #[test]
    fn test_vol_inventory_without_retention() {
        assert_eq!(
            vol_inventory(3e-6, 1.0, 1.0, 1.0, OrbitalZone::Inner, true, true),
            0.0
        );
    }

    #[test]
    fn test_surface_fractions() {
        assert_close(hydro_fraction(998.32692, 6900.0), 0.605622468613);
        assert_close(cloud_fraction(280.0, 2.2, 6900.0, 0.6), 0.256559680750);
        assert_eq!(cloud_fraction(280.0, 20.0, 6900.0, 0.6), 0.0);
        assert_close(ice_fraction(0.6, 280.0), 0.043151275720);
    }

    #[test]
    fn test_temperatures() {
        assert_close(eff_temp(2.0, 1.0, 0.39), 341.596140542606);
        assert_close(est_temp(2.0, 1.0, 0.39), 392.357327027237);
        assert!(is_greenhouse(3.0, 1.0));
        assert!(!is_greenhouse(3.0, 20.0));
        assert_close(green_rise(0.5, 341.0, 1183.0), 12.927631505053);
    }

    #[test]
    fn test_planet_albedo() {
        assert_close(planet_albedo(0.6, 0.4, 0.05, 1183.0), 0.259166666667);
    }

    #[test]
    fn test_opacity() {
        assert_close(opacity(3.0, 1183.0), 3.0);
        assert_close(opacity(80.0, 1183.0), 0.05);
        assert_close(opacity(90.0, 10000.0), 0.075);
        assert_eq!(opacity(120.0, 1183.0), 0.0);
    }

    #[test]
    fn test_gas_life_and_min_molec_weight() {
        let planet = earth(1000.0, 0.1);
        assert_close(gas_life(MOL_HYDROGEN, &planet), 0.000253786142);
        let weight = min_molec_weight(&planet, 5e9);
        assert!(
            (weight - 90.449677667528).abs() < 1e-6,
            "expected 90.449677667528, got {weight}"
        );
    }

    #[test]
    fn test_min_molec_weight_stops_doubling_at_round_limit() {
        // No gas lifetime ever reaches an infinite age.
        let planet = earth(1000.0, 0.1);
        let limit = molecule_limit(planet.mass, planet.radius, planet.exospheric_temperature);
        let weight = min_molec_weight(&planet, f64::INFINITY);
        let doublings = (1..LOOP_LIMIT).count() as i32;
        assert_eq!(weight, limit * 2.0_f64.powi(doublings), "limit {limit}");
    }

    #[test]
    fn test_min_molec_weight_stops_halving_at_round_limit() {
        // Every gas lifetime exceeds a negative age.
        let planet = earth(1000.0, 0.1);
        let limit = molecule_limit(planet.mass, planet.radius, planet.exospheric_temperature);
        let weight = min_molec_weight(&planet, -1.0);
        let floor = limit / 2.0_f64.powi((1..LOOP_LIMIT).count() as i32);
        assert!(
            weight.is_finite() && weight >= floor && weight <= floor + 0.1,
            "weight {weight} outside [{floor}, {}]",
            floor + 0.1
        );
    }

    #[test]
    fn test_inspired_partial_pressure() {
        assert_close(inspired_partial_pressure(1183.0, 1100.0), 1041.734856742448);
    }

    fn earth_like() -> (Planet, Primary) {
        let sun = sun();
        let mut planet = earth(6378.0, 1.0);
        planet.axial_tilt = 23.4;
        planet.day = 24.0;
        planet.exospheric_temperature = EARTH_EXOSPHERE_TEMP;
        planet.orbit_zone = OrbitalZone::Inner;
        planet.escape_velocity = escape_velocity(planet.mass, planet.radius);
        planet.rms_velocity = rms_velocity(MOL_NITROGEN, planet.exospheric_temperature);
        planet.molecular_weight = min_molec_weight(&planet, sun.age);
        planet.greenhouse_effect = is_greenhouse(sun.r_ecosphere, planet.a);
        planet.volatile_gas_inventory = vol_inventory(
            planet.mass,
            planet.escape_velocity,
            planet.rms_velocity,
            sun.mass,
            planet.orbit_zone,
            planet.greenhouse_effect,
            false,
        );
        planet.surface_pressure =
            pressure(planet.volatile_gas_inventory, planet.radius, planet.surface_gravity);
        planet.boiling_point = enviro_utils::boiling_point(planet.surface_pressure);
        planet.albedo = EARTH_ALBEDO;
        (planet, sun)
    }

    #[test]
    fn test_earth_like_surface_temperature_converges() {
        let (mut planet, sun) = earth_like();
        let rounds = iterate_surface_temp(&mut planet, &sun);
        assert!(rounds < LOOP_LIMIT, "did not converge in {rounds} rounds");
        let t = planet.surface_temperature;
        assert!((250.0..=320.0).contains(&t), "surface temperature {t}");
        assert!(planet.min_temperature <= planet.low_temperature);
        assert!(planet.low_temperature <= planet.high_temperature);
        assert!(planet.high_temperature <= planet.max_temperature);
    }

    #[test]
    fn test_surface_temperature_stops_at_round_limit() {
        // A zero tolerance is never met, so every round runs.
        let (mut planet, sun) = earth_like();
        let rounds = relax_surface_temp(&mut planet, &sun, LOOP_LIMIT, 0.0);
        assert_eq!(rounds, LOOP_LIMIT);
        let t = planet.surface_temperature;
        assert!((250.0..=320.0).contains(&t), "surface temperature {t}");
        assert_close(
            planet.greenhouse_rise,
            t - est_temp(sun.r_ecosphere, planet.a, EARTH_ALBEDO),
        );
    }

    #[test]
    fn test_relaxation_weights_previous_value() {
        assert_close(relax(3.0, 0.0), 1.0);
        assert_close(relax(0.0, 3.0), 2.0);
        assert_close(relax(5.0, 5.0), 5.0);
    }

    fn atmosphere(gases: &[(u32, f64)]) -> Planet {
        let gases: Vec<Gas> = gases
            .iter()
            .map(|&(number, surface_pressure)| Gas {
                element: find_by_number(number).unwrap(),
                surface_pressure,
            })
            .collect();
        Planet {
            surface_pressure: gases.iter().map(|g| g.surface_pressure).sum(),
            gases,
            ..Default::default()
        }
    }

    #[test]
    fn test_breathability() {
        assert_eq!(breathability(&Planet::default()), Breathability::None);

        let air = atmosphere(&[(AN_AR, 9.0), (AN_O, 212.0), (AN_N, 790.0)]);
        assert_eq!(breathability(&air), Breathability::Breathable);

        let thin = atmosphere(&[(AN_O, 20.0), (AN_N, 790.0)]);
        assert_eq!(breathability(&thin), Breathability::Unbreathable);
    }

    #[test]
    fn test_poison_takes_precedence_over_oxygen() {
        // CO2 well above its limit, oxygen comfortably breathable.
        let planet = atmosphere(&[(AN_CO2, 60.0), (AN_O, 212.0), (AN_N, 740.0)]);
        let o2 = inspired_partial_pressure(planet.surface_pressure, 212.0);
        assert!((MIN_O2_IPP..=MAX_O2_IPP).contains(&o2), "oxygen ipp {o2}");
        assert_eq!(breathability(&planet), Breathability::Poisonous);

        let planet = atmosphere(&[(AN_O, 212.0), (AN_N, 740.0), (AN_CO2, 60.0)]);
        assert_eq!(breathability(&planet), Breathability::Poisonous);
    }
}
