//! The table of atmospheric gases.

use crate::constants::*;

/// Physical data for one atmospheric gas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChemicalElement {
    /// Atomic number, or a made-up number above 900 for molecules.
    pub number: u32,
    pub symbol: &'static str,
    pub name: &'static str,
    /// Molecular weight in AMU.
    pub weight: f64,
    /// Kelvin.
    pub melting_point: f64,
    /// Kelvin at one bar.
    pub boiling_point: f64,
    pub density: f64,
    /// Abundance on Earth.
    pub abunde: f64,
    /// Abundance in the sun.
    pub abunds: f64,
    pub reactivity: f64,
    /// Maximum inspired partial pressure a human tolerates, in millibars.
    pub max_ipp: f64,
}

const fn gas(
    number: u32,
    symbol: &'static str,
    name: &'static str,
    [weight, melting_point, boiling_point, density]: [f64; 4],
    [abunde, abunds, reactivity, max_ipp]: [f64; 4],
) -> ChemicalElement {
    ChemicalElement {
        number,
        symbol,
        name,
        weight,
        melting_point,
        boiling_point,
        density,
        abunde,
        abunds,
        reactivity,
        max_ipp,
    }
}

/// Every gas the atmosphere model knows about, in table order.
pub static GASES: [ChemicalElement; 13] = [
    gas(AN_H, "H", "Hydrogen", [1.0079, 14.06, 20.40, 8.99e-05], [0.00125893, 27925.4, 1.0, 0.0]),
    gas(AN_HE, "He", "Helium", [4.0026, 3.46, 4.20, 0.0001787], [7.94328e-09, 2722.7, 0.0, MAX_HE_IPP]),
    gas(AN_N, "N", "Nitrogen", [14.0067, 63.34, 77.40, 0.0012506], [1.99526e-05, 3.13329, 0.0, MAX_N2_IPP]),
    gas(AN_O, "O", "Oxygen", [15.9994, 54.80, 90.20, 0.001429], [0.501187, 23.8232, 10.0, MAX_O2_IPP]),
    gas(AN_NE, "Ne", "Neon", [20.1700, 24.53, 27.10, 0.0009], [5.01187e-09, 3.4435e-5, 0.0, MAX_NE_IPP]),
    gas(AN_AR, "Ar", "Argon", [39.9480, 84.00, 87.30, 0.0017824], [3.16228e-06, 0.100925, 0.0, MAX_AR_IPP]),
    gas(AN_KR, "Kr", "Krypton", [83.8000, 116.60, 119.70, 0.003708], [1e-10, 4.4978e-05, 0.0, MAX_KR_IPP]),
    gas(AN_XE, "Xe", "Xenon", [131.3000, 161.30, 165.00, 0.00588], [3.16228e-11, 4.69894e-06, 0.0, MAX_XE_IPP]),
    gas(AN_NH3, "NH3", "Ammonia", [17.0000, 195.46, 239.66, 0.001], [0.002, 0.0001, 1.0, MAX_NH3_IPP]),
    gas(AN_H2O, "H2O", "Water", [18.0000, 273.16, 373.16, 1.000], [0.03, 0.001, 0.0, 0.0]),
    gas(AN_CO2, "CO2", "CarbonDioxide", [44.0000, 194.66, 194.66, 0.001], [0.01, 0.0005, 0.0, MAX_CO2_IPP]),
    gas(AN_O3, "O3", "Ozone", [48.0000, 80.16, 161.16, 0.001], [0.001, 0.000001, 2.0, MAX_O3_IPP]),
    gas(AN_CH4, "CH4", "Methane", [16.0000, 90.16, 109.16, 0.010], [0.005, 0.0001, 1.0, MAX_CH4_IPP]),
];

/// Look a gas up by its atomic number.
pub fn find_by_number(number: u32) -> Option<&'static ChemicalElement> {
    GASES.iter().find(|g| g.number == number)
}
