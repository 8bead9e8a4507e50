//! Random draws shared by star, accretion and environment code.

use rand::Rng;

use crate::constants::ECCENTRICITY_COEFF;

const MAX_ECCENTRICITY: f64 = 0.99;

/// Uniform value in `[inner, outer)`.
pub fn random_number<R: Rng + ?Sized>(rng: &mut R, inner: f64, outer: f64) -> f64 {
    rng.random::<f64>() * (outer - inner) + inner
}

/// `value` varied by up to `variation` of itself in either direction.
pub fn about<R: Rng + ?Sized>(rng: &mut R, value: f64, variation: f64) -> f64 {
    value + value * random_number(rng, -variation, variation)
}

/// Orbital eccentricity skewed strongly towards circular orbits.
pub fn random_eccentricity<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    let e = 1.0 - random_number(rng, 0.0, 1.0).powf(ECCENTRICITY_COEFF);
    e.min(MAX_ECCENTRICITY)
}
