//! Random stars drawn from an empirical census of the solar neighbourhood.

use rand::Rng;

use crate::error::StargenError;
use crate::primary::{LuminosityClass, Primary, SpectralClass};

/// Absolute magnitude of the brightest magnitude class.
pub const MIN_MAGNITUDE: i32 = -7;
/// Absolute magnitude of the faintest magnitude class.
pub const MAX_MAGNITUDE: i32 = 16;
pub const N_SPC_CLASS: usize = 7;
pub const N_MAG_CLASS: usize = (MAX_MAGNITUDE - MIN_MAGNITUDE + 1) as usize;
pub const N_LUM_CLASS: usize = 8;

/// Relative star counts by absolute magnitude (rows, -7 to +16) and
/// spectral class (columns, O to M).
#[rustfmt::skip]
const STAR_COUNTS: [[f64; N_SPC_CLASS]; N_MAG_CLASS] = [
    [0.0002, 0.0005, 0.0003, 0.0003, 0.00003, 0.0, 0.0],      // -7
    [0.0005, 0.0025, 0.001, 0.001, 0.0001, 0.0004, 0.0004],   // -6
    [0.001, 0.025, 0.01, 0.006, 0.008, 0.004, 0.01],          // -5
    [0.003, 0.16, 0.01, 0.016, 0.025, 0.012, 0.012],          // -4
    [0.01, 0.5, 0.05, 0.08, 0.08, 0.1, 0.06],                 // -3
    [0.01, 2.5, 0.08, 0.2, 0.3, 0.6, 0.4],                    // -2
    [0.01, 12.5, 1.0, 1.6, 1.0, 2.5, 3.0],                    // -1
    [0.001, 20.0, 20.0, 2.0, 8.0, 25.0, 10.0],                // +0
    [0.0, 30.0, 100.0, 30.0, 30.0, 120.0, 10.0],              // +1
    [0.0, 20.0, 200.0, 160.0, 50.0, 110.0, 0.0],              // +2
    [0.0, 10.0, 80.0, 700.0, 150.0, 100.0, 0.0],              // +3
    [0.0, 0.0, 30.0, 1200.0, 700.0, 100.0, 0.0],              // +4
    [0.0, 0.0, 0.0, 600.0, 2000.0, 300.0, 0.0],               // +5
    [0.0, 0.0, 0.0, 200.0, 1500.0, 1500.0, 10.0],             // +6
    [0.0, 0.0, 0.0, 100.0, 800.0, 3000.0, 100.0],             // +7
    [0.0, 0.0, 0.0, 10.0, 400.0, 2500.0, 1000.0],             // +8
    [0.0, 0.0, 0.0, 0.0, 200.0, 1500.0, 3000.0],              // +9
    [0.0, 10.0, 0.0, 0.0, 0.0, 400.0, 8000.0],                // +10
    [0.0, 100.0, 30.0, 10.0, 0.0, 200.0, 9000.0],             // +11
    [0.0, 200.0, 400.0, 100.0, 0.0, 100.0, 10000.0],          // +12
    [0.0, 400.0, 600.0, 300.0, 100.0, 400.0, 10000.0],        // +13
    [0.0, 800.0, 1000.0, 1000.0, 600.0, 800.0, 10000.0],      // +14
    [0.0, 1500.0, 2000.0, 1000.0, 1500.0, 1200.0, 8000.0],    // +15
    [0.0, 3000.0, 5000.0, 3000.0, 3000.0, 0.0, 6000.0],       // +16
];

/// Faintest absolute magnitude of each luminosity class (rows, Ia to VII)
/// per spectral class (columns, O to M).
#[rustfmt::skip]
const LUMINOSITY_CLASS_MAGNITUDE: [[f64; N_SPC_CLASS]; N_LUM_CLASS] = [
    [-6.5, -6.5, -6.5, -6.5, -6.5, -6.5, -6.5],   // Ia
    [-6.0, -6.0, -5.0, -5.0, -5.0, -5.0, -5.0],   // Ib
    [-5.0, -3.5, -3.0, -2.0, -2.0, -2.5, -2.5],   // II
    [-4.0, -3.0, -0.5, 1.5, 2.5, 3.0, 2.0],       // III
    [-3.0, -2.0, 0.5, 2.5, 3.5, 5.5, 2.0],        // IV
    [-1.0, 2.0, 2.5, 5.0, 7.0, 10.0, 14.0],       // V
    [1.0, 4.0, 5.0, 9.0, 10.0, 20.0, 20.0],       // VI
    [20.0, 20.0, 20.0, 20.0, 20.0, 20.0, 20.0],   // VII
];

/// The luminosity class a star of `spectral_class` falls into at
/// `absolute_magnitude`: the brightest class whose threshold is not
/// brighter than the star.
pub fn luminosity_class_for(spectral_class: SpectralClass, absolute_magnitude: f64) -> LuminosityClass {
    let column = spectral_class.index();
    LuminosityClass::ALL
        .into_iter()
        .find(|class| LUMINOSITY_CLASS_MAGNITUDE[class.index()][column] >= absolute_magnitude)
        .unwrap_or(LuminosityClass::VII)
}

/// Star generator holding the cumulative probability tables.
#[derive(Debug, Clone)]
pub struct GenStar {
    /// Cumulative over the whole table, magnitude-major.
    star_counts: [[f64; N_SPC_CLASS]; N_MAG_CLASS],
    /// Cumulative down each spectral class column.
    star_counts_class: [[f64; N_SPC_CLASS]; N_MAG_CLASS],
}

impl GenStar {
    pub fn new() -> Self {
        Self {
            star_counts: cumulative_joint(&STAR_COUNTS),
            star_counts_class: cumulative_by_class(&STAR_COUNTS),
        }
    }

    /// A star of any class, drawn from the joint distribution.
    pub fn generate_star<R: Rng + ?Sized>(&self, rng: &mut R) -> Primary {
        let rnd: f64 = rng.random();
        let (mag_class, spec_class) = self
            .star_counts
            .iter()
            .enumerate()
            .flat_map(|(i, row)| row.iter().enumerate().map(move |(j, p)| (i, j, *p)))
            .find(|&(_, _, p)| p >= rnd)
            .map(|(i, j, _)| (i, j))
            .unwrap_or((N_MAG_CLASS - 1, N_SPC_CLASS - 1));
        self.generate_star_in(mag_class, SpectralClass::ALL[spec_class], rng)
    }

    /// A star of the given spectral class with a magnitude drawn from that
    /// class's distribution.
    pub fn generate_star_of_class<R: Rng + ?Sized>(&self, spectral_class: SpectralClass, rng: &mut R) -> Primary {
        let rnd: f64 = rng.random();
        let column = spectral_class.index();
        let mag_class = (0..N_MAG_CLASS)
            .find(|&i| self.star_counts_class[i][column] >= rnd)
            .unwrap_or(N_MAG_CLASS - 1);
        self.generate_star_in(mag_class, spectral_class, rng)
    }

    /// Like [`generate_star_of_class`](Self::generate_star_of_class) with
    /// the class given by name, e.g. `"G"`.
    pub fn generate_star_named<R: Rng + ?Sized>(&self, name: &str, rng: &mut R) -> Result<Primary, StargenError> {
        let spectral_class = name.parse::<SpectralClass>().inspect_err(|_| {
            tracing::error!("Unknown spectral class requested: {name}");
        })?;
        Ok(self.generate_star_of_class(spectral_class, rng))
    }

    /// Build the star in magnitude class `mag_class` (0 is magnitude -7).
    pub fn generate_star_in<R: Rng + ?Sized>(
        &self,
        mag_class: usize,
        spectral_class: SpectralClass,
        rng: &mut R,
    ) -> Primary {
        let t: f64 = rng.random();
        let absolute_magnitude = f64::from(MIN_MAGNITUDE) + mag_class as f64 + t;
        let luminosity = 2.5118_f64.powf(4.7 - absolute_magnitude);
        let luminosity_class = luminosity_class_for(spectral_class, absolute_magnitude);

        let mass = match luminosity_class {
            LuminosityClass::Ia | LuminosityClass::Ib | LuminosityClass::II | LuminosityClass::III => {
                let t = luminosity.ln() + rng.random::<f64>() / 5.0;
                (t / 3.0).exp()
            }
            LuminosityClass::IV | LuminosityClass::V | LuminosityClass::VI => {
                let t = luminosity.ln() + 0.1 + (rng.random::<f64>() / 5.0 - 0.1);
                (t / 4.1).exp()
            }
            LuminosityClass::VII => 0.7 * rng.random::<f64>() + 0.6,
        };

        let mut sun = Primary {
            mass,
            luminosity,
            spectral_class,
            spectral_subclass: (t * 10.0) as u32,
            luminosity_class,
            absolute_magnitude,
            ..Default::default()
        };
        sun.set_ecosphere();
        sun.right_ascension = rng.random::<f64>() * 360.0;
        sun.declination = rng.random::<f64>() * 180.0 - 90.0;
        sun.distance = rng.random::<f64>() * 500.0 + 10.0;
        sun
    }
}

impl Default for GenStar {
    fn default() -> Self {
        Self::new()
    }
}

fn cumulative_joint(counts: &[[f64; N_SPC_CLASS]; N_MAG_CLASS]) -> [[f64; N_SPC_CLASS]; N_MAG_CLASS] {
    let total: f64 = counts.iter().flatten().sum();
    let mut out = [[0.0; N_SPC_CLASS]; N_MAG_CLASS];
    let mut t = 0.0;
    for (i, row) in counts.iter().enumerate() {
        for (j, count) in row.iter().enumerate() {
            t += count;
            out[i][j] = t / total;
        }
    }
    out
}

fn cumulative_by_class(counts: &[[f64; N_SPC_CLASS]; N_MAG_CLASS]) -> [[f64; N_SPC_CLASS]; N_MAG_CLASS] {
    let mut out = [[0.0; N_SPC_CLASS]; N_MAG_CLASS];
    for j in 0..N_SPC_CLASS {
        let total: f64 = counts.iter().map(|row| row[j]).sum();
        let mut t = 0.0;
        for i in 0..N_MAG_CLASS {
            t += counts[i][j];
            out[i][j] = t / total;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    const EPSILON: f64 = 1e-12;

    #[test]
    fn test_tables_end_at_one() {
        let genstar = GenStar::new();
        let last = genstar.star_counts[N_MAG_CLASS - 1][N_SPC_CLASS - 1];
        assert!((last - 1.0).abs() < EPSILON, "joint total {last}");
        for j in 0..N_SPC_CLASS {
            let last = genstar.star_counts_class[N_MAG_CLASS - 1][j];
            assert!((last - 1.0).abs() < EPSILON, "class {j} total {last}");
        }
    }

    #[test]
    fn test_generation_is_deterministic() {
        let genstar = GenStar::new();
        let mut a = ChaCha8Rng::seed_from_u64(17);
        let mut b = ChaCha8Rng::seed_from_u64(17);
        for _ in 0..50 {
            assert_eq!(genstar.generate_star(&mut a), genstar.generate_star(&mut b));
        }
    }

    #[test]
    fn test_luminosity_class_matches_magnitude() {
        let genstar = GenStar::new();
        let mut rng = ChaCha8Rng::seed_from_u64(23);
        for _ in 0..500 {
            let star = genstar.generate_star(&mut rng);
            let column = star.spectral_class.index();
            let row = star.luminosity_class.index();
            let mag = star.absolute_magnitude;
            assert!(
                LUMINOSITY_CLASS_MAGNITUDE[row][column] >= mag,
                "{} at magnitude {mag}",
                star.classification()
            );
            for brighter in 0..row {
                assert!(
                    LUMINOSITY_CLASS_MAGNITUDE[brighter][column] < mag,
                    "{} should be class {brighter} at magnitude {mag}",
                    star.classification()
                );
            }
            assert!(star.spectral_subclass < 10);
            assert!(star.mass > 0.0);
        }
    }

    #[test]
    fn test_luminosity_from_magnitude() {
        let genstar = GenStar::new();
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let star = genstar.generate_star_in(11, SpectralClass::G, &mut rng);
        assert!((4.0..5.0).contains(&star.absolute_magnitude));
        let expected = 2.5118_f64.powf(4.7 - star.absolute_magnitude);
        assert!((star.luminosity - expected).abs() < EPSILON);
        assert!((star.r_ecosphere - star.luminosity.sqrt()).abs() < EPSILON);
        assert!((0.0..360.0).contains(&star.right_ascension));
        assert!((-90.0..90.0).contains(&star.declination));
        assert!((10.0..510.0).contains(&star.distance));
    }

    #[test]
    fn test_white_dwarf_mass_range() {
        assert_eq!(luminosity_class_for(SpectralClass::K, 16.5), LuminosityClass::VI);
        assert_eq!(luminosity_class_for(SpectralClass::G, 16.5), LuminosityClass::VII);
        let genstar = GenStar::new();
        let mut rng = ChaCha8Rng::seed_from_u64(8);
        let star = genstar.generate_star_in(23, SpectralClass::G, &mut rng);
        assert_eq!(star.luminosity_class, LuminosityClass::VII);
        assert!((0.6..1.3).contains(&star.mass), "mass {}", star.mass);
    }

    #[test]
    fn test_generate_star_of_class_keeps_class() {
        let genstar = GenStar::new();
        let mut rng = ChaCha8Rng::seed_from_u64(31);
        for class in SpectralClass::ALL {
            let star = genstar.generate_star_of_class(class, &mut rng);
            assert_eq!(star.spectral_class, class);
        }
        let star = genstar.generate_star_named("M", &mut rng).unwrap();
        assert_eq!(star.spectral_class, SpectralClass::M);
    }

    #[test]
    fn test_unknown_class_name_is_error() {
        let genstar = GenStar::new();
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let err = genstar.generate_star_named("X", &mut rng).unwrap_err();
        assert!(matches!(err, StargenError::UnknownSpectralClass(ref s) if s == "X"));
    }

    #[test]
    fn test_red_dwarfs_dominate() {
        let genstar = GenStar::new();
        let mut rng = ChaCha8Rng::seed_from_u64(99);
        let stars: Vec<Primary> = (0..1000).map(|_| genstar.generate_star(&mut rng)).collect();
        let m = stars.iter().filter(|s| s.spectral_class == SpectralClass::M).count();
        let k = stars.iter().filter(|s| s.spectral_class == SpectralClass::K).count();
        assert!(m > k, "{m} M stars, {k} K stars");
    }

    #[test]
    fn test_magnitudes_within_table_range() {
        assert_eq!(STAR_COUNTS.len() as i32, MAX_MAGNITUDE - MIN_MAGNITUDE + 1);
        let genstar = GenStar::new();
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let lowest = f64::from(MIN_MAGNITUDE);
        let highest = f64::from(MAX_MAGNITUDE) + 1.0;
        for _ in 0..500 {
            let mag = genstar.generate_star(&mut rng).absolute_magnitude;
            assert!((lowest..highest).contains(&mag), "magnitude {mag}");
        }
        let faintest = genstar.generate_star_in(N_MAG_CLASS - 1, SpectralClass::M, &mut rng);
        assert!(faintest.absolute_magnitude >= f64::from(MAX_MAGNITUDE));
    }
}
