//! Closed-form helpers for stellar and planetary bulk properties.

use std::f64::consts::PI;

use crate::constants::*;
use crate::planet::OrbitalZone;

/// Luminosity of a main sequence star from its mass ratio.
pub fn luminosity(mass_ratio: f64) -> f64 {
    let n = if mass_ratio < 1.0 {
        1.75 * (mass_ratio - 0.1) + 3.325
    } else {
        0.5 * (2.0 - mass_ratio) + 4.4
    };
    mass_ratio.powf(n)
}

/// Zone of an orbit at `orb_radius` AU around a star of `luminosity`.
pub fn orbital_zone(luminosity: f64, orb_radius: f64) -> OrbitalZone {
    let scale = luminosity.sqrt();
    if orb_radius < 4.0 * scale {
        OrbitalZone::Inner
    } else if orb_radius < 15.0 * scale {
        OrbitalZone::Middle
    } else {
        OrbitalZone::Outer
    }
}

/// Radius in km of a sphere of `mass` solar masses at `density` g/cc.
pub fn volume_radius(mass: f64, density: f64) -> f64 {
    let volume = mass * SOLAR_MASS_IN_GRAMS / density;
    ((3.0 * volume) / (4.0 * PI)).powf(1.0 / 3.0) / CM_PER_KM
}

/// Equatorial radius in km from Kothari's mass-radius relation.
pub fn kothari_radius(mass: f64, giant: bool, zone: OrbitalZone) -> f64 {
    let (atomic_weight, atomic_num): (f64, f64) = match (zone, giant) {
        (OrbitalZone::Inner, true) => (9.5, 4.5),
        (OrbitalZone::Inner, false) => (15.0, 8.0),
        (OrbitalZone::Middle, true) => (2.47, 2.0),
        (OrbitalZone::Middle, false) => (10.0, 5.0),
        (OrbitalZone::Outer, true) => (7.0, 4.0),
        (OrbitalZone::Outer, false) => (10.0, 5.0),
    };

    let temp1 = atomic_weight * atomic_num;
    let mut temp = (2.0 * BETA_20 * SOLAR_MASS_IN_GRAMS.powf(1.0 / 3.0))
        / (A1_20 * temp1.powf(1.0 / 3.0));

    let mut temp2 = A2_20 * atomic_weight.powf(4.0 / 3.0) * SOLAR_MASS_IN_GRAMS.powf(2.0 / 3.0);
    temp2 *= mass.powf(2.0 / 3.0);
    temp2 /= A1_20 * atomic_num * atomic_num;
    temp2 += 1.0;

    temp /= temp2;
    temp = temp * mass.powf(1.0 / 3.0) / CM_PER_KM;
    temp / JIMS_FUDGE
}

/// Density in g/cc from an empirical fit on mass and distance.
pub fn empirical_density(mass: f64, orb_radius: f64, r_ecosphere: f64, gas_giant: bool) -> f64 {
    let temp = (mass * SUN_MASS_IN_EARTH_MASSES).powf(1.0 / 8.0)
        * (r_ecosphere / orb_radius).sqrt().sqrt();
    if gas_giant { temp * 1.2 } else { temp * 5.5 }
}

/// Density in g/cc of `mass` solar masses in a sphere of the given radius.
pub fn volume_density(mass: f64, equatorial_radius: f64) -> f64 {
    let radius_cm = equatorial_radius * CM_PER_KM;
    let volume = 4.0 * PI * radius_cm.powi(3) / 3.0;
    mass * SOLAR_MASS_IN_GRAMS / volume
}

/// Boiling point of water in kelvin at `surf_pressure` millibars.
pub fn boiling_point(surf_pressure: f64) -> f64 {
    let bars = surf_pressure / MILLIBARS_PER_BAR;
    1.0 / (bars.ln() / -5050.5 + 1.0 / 373.0)
}
