//! Physical and empirical constants for star system generation.
//!
//! Units follow the accretion model: masses in solar masses, distances in
//! AU, radii in km, pressures in millibars and temperatures in kelvin
//! unless a name says otherwise.

pub const RADIANS_PER_ROTATION: f64 = 2.0 * std::f64::consts::PI;
pub const ECCENTRICITY_COEFF: f64 = 0.077;
/// Starting mass of an injected planetesimal.
pub const PROTOPLANET_MASS: f64 = 1.0e-15;
/// Change in Earth's angular velocity, in radians/sec per year.
pub const CHANGE_IN_EARTH_ANG_VEL: f64 = -1.3e-15;
pub const SOLAR_MASS_IN_GRAMS: f64 = 1.989e33;
pub const EARTH_MASS_IN_GRAMS: f64 = 5.977e27;
/// Earth radius in cm.
pub const EARTH_RADIUS: f64 = 6.378e8;
pub const EARTH_DENSITY: f64 = 5.52;
pub const KM_EARTH_RADIUS: f64 = 6378.0;
/// cm/sec^2
pub const EARTH_ACCELERATION: f64 = 980.7;
pub const EARTH_AXIAL_TILT: f64 = 23.4;
pub const EARTH_EXOSPHERE_TEMP: f64 = 1273.0;
pub const SUN_MASS_IN_EARTH_MASSES: f64 = 332_775.64;
/// Bodies below this many Earth masses are asteroid belts.
pub const ASTEROID_MASS_LIMIT: f64 = 0.001;
pub const EARTH_EFFECTIVE_TEMP: f64 = 250.0;
pub const CLOUD_COVERAGE_FACTOR: f64 = 1.839e-8;
/// grams per square km
pub const EARTH_WATER_MASS_PER_AREA: f64 = 3.83e15;
pub const EARTH_SURF_PRES_IN_MILLIBARS: f64 = 1013.25;
pub const EARTH_SURF_PRES_IN_MMHG: f64 = 760.0;
pub const EARTH_SURF_PRES_IN_PSI: f64 = 14.696;
pub const MMHG_TO_MILLIBARS: f64 = EARTH_SURF_PRES_IN_MILLIBARS / EARTH_SURF_PRES_IN_MMHG;
pub const PSI_TO_MILLIBARS: f64 = EARTH_SURF_PRES_IN_MILLIBARS / EARTH_SURF_PRES_IN_PSI;
/// Water vapour partial pressure in the lungs.
pub const H20_ASSUMED_PRESSURE: f64 = 47.0 * MMHG_TO_MILLIBARS;
pub const MIN_O2_IPP: f64 = 72.0 * MMHG_TO_MILLIBARS;
pub const MAX_O2_IPP: f64 = 400.0 * MMHG_TO_MILLIBARS;
pub const MAX_HE_IPP: f64 = 61000.0 * MMHG_TO_MILLIBARS;
pub const MAX_NE_IPP: f64 = 3900.0 * MMHG_TO_MILLIBARS;
pub const MAX_N2_IPP: f64 = 2330.0 * MMHG_TO_MILLIBARS;
pub const MAX_AR_IPP: f64 = 1220.0 * MMHG_TO_MILLIBARS;
pub const MAX_KR_IPP: f64 = 350.0 * MMHG_TO_MILLIBARS;
pub const MAX_XE_IPP: f64 = 160.0 * MMHG_TO_MILLIBARS;
pub const MAX_CO2_IPP: f64 = 7.0 * MMHG_TO_MILLIBARS;
pub const MAX_HABITABLE_PRESSURE: f64 = 118.0 * PSI_TO_MILLIBARS;
/// One part per million of Earth's surface pressure.
pub const PPM_PRESSURE: f64 = EARTH_SURF_PRES_IN_MILLIBARS / 1_000_000.0;
pub const MAX_NH3_IPP: f64 = 100.0 * PPM_PRESSURE;
pub const MAX_O3_IPP: f64 = 0.1 * PPM_PRESSURE;
pub const MAX_CH4_IPP: f64 = 50000.0 * PPM_PRESSURE;
pub const EARTH_CONVECTION_FACTOR: f64 = 0.43;
pub const FREEZING_POINT_OF_WATER: f64 = 273.15;
pub const EARTH_AVERAGE_CELSIUS: f64 = 14.0;
pub const EARTH_AVERAGE_KELVIN: f64 = EARTH_AVERAGE_CELSIUS + FREEZING_POINT_OF_WATER;
pub const DAYS_IN_A_YEAR: f64 = 365.256;
/// Escape/RMS velocity ratio above which a gas is retained.
pub const GAS_RETENTION_THRESHOLD: f64 = 6.0;

pub const ICE_ALBEDO: f64 = 0.7;
pub const CLOUD_ALBEDO: f64 = 0.52;
pub const GAS_GIANT_ALBEDO: f64 = 0.5;
pub const AIRLESS_ICE_ALBEDO: f64 = 0.5;
pub const EARTH_ALBEDO: f64 = 0.3;
pub const GREENHOUSE_TRIGGER_ALBEDO: f64 = 0.20;
pub const ROCKY_ALBEDO: f64 = 0.15;
pub const ROCKY_AIRLESS_ALBEDO: f64 = 0.07;
pub const WATER_ALBEDO: f64 = 0.04;

pub const SECONDS_PER_HOUR: f64 = 3600.0;
pub const CM_PER_AU: f64 = 1.495_978_707e13;
pub const CM_PER_KM: f64 = 1.0e5;
pub const KM_PER_AU: f64 = CM_PER_AU / CM_PER_KM;
pub const CM_PER_METER: f64 = 100.0;
pub const MILLIBARS_PER_BAR: f64 = 1000.0;

/// Gravitational constant in dyne cm^2 / g^2.
pub const GRAV_CONSTANT: f64 = 6.672e-8;
/// Molar gas constant in g m^2 / (s^2 K mol).
pub const MOLAR_GAS_CONST: f64 = 8314.41;
/// Gas/dust ratio of the nebula.
pub const K: f64 = 50.0;
/// Critical mass coefficient.
pub const B: f64 = 1.2e-5;
pub const DUST_DENSITY_COEFF: f64 = 2.0e-3;
pub const ALPHA: f64 = 5.0;
pub const N: f64 = 3.0;
/// Spin-down constant for day length.
pub const J: f64 = 1.46e-19;
/// Stand-in for "effectively infinite" quantities on gas giants and
/// tidally locked bodies.
pub const INCREDIBLY_LARGE_NUMBER: f64 = 9.9999e37;

// Molecular weights, in AMU.
pub const ATOMIC_HYDROGEN: f64 = 1.0;
pub const MOL_HYDROGEN: f64 = 2.0;
pub const HELIUM: f64 = 4.0;
pub const ATOMIC_NITROGEN: f64 = 14.0;
pub const ATOMIC_OXYGEN: f64 = 16.0;
pub const METHANE: f64 = 16.0;
pub const AMMONIA: f64 = 17.0;
pub const WATER_VAPOR: f64 = 18.0;
pub const NEON: f64 = 20.2;
pub const MOL_NITROGEN: f64 = 28.0;
pub const CARBON_MONOXIDE: f64 = 28.0;
pub const NITRIC_OXIDE: f64 = 30.0;
pub const MOL_OXYGEN: f64 = 32.0;
pub const ARGON: f64 = 39.9;
pub const CARBON_DIOXIDE: f64 = 44.0;
pub const OZONE: f64 = 48.0;
pub const KRYPTON: f64 = 83.8;
pub const XENON: f64 = 131.3;

// Atomic numbers, with made-up numbers for molecules.
pub const AN_H: u32 = 1;
pub const AN_HE: u32 = 2;
pub const AN_N: u32 = 7;
pub const AN_O: u32 = 8;
pub const AN_NE: u32 = 10;
pub const AN_AR: u32 = 18;
pub const AN_KR: u32 = 36;
pub const AN_XE: u32 = 54;
pub const AN_NH3: u32 = 900;
pub const AN_H2O: u32 = 901;
pub const AN_CO2: u32 = 902;
pub const AN_O3: u32 = 903;
pub const AN_CH4: u32 = 904;

// Kothari radius coefficients.
pub const A1_20: f64 = 6.485e12;
pub const A2_20: f64 = 4.0032e-8;
pub const BETA_20: f64 = 5.71e12;
pub const JIMS_FUDGE: f64 = 1.004;

// Cloud fraction coefficients.
pub const Q1_36: f64 = 1.258e19;
pub const Q2_36: f64 = 0.0698;
