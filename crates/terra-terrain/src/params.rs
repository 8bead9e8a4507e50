//! User-facing terrain and cloud settings.

use serde::{Deserialize, Serialize};
use terra_math::Xyz;
use terra_mesh::{FlatShape, FloatRgba};

/// What kind of object the terrain generator builds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObjectType {
    /// A whole planet built on a subdivided icosahedron.
    #[default]
    Planet,
    /// A flat hexagonal patch.
    Terrain,
    TerrainHexagon,
    TerrainSquare,
    TerrainTriangle,
}

impl ObjectType {
    /// Outline used for flat objects, `None` for a planet.
    pub fn flat_shape(self) -> Option<FlatShape> {
        match self {
            ObjectType::Planet => None,
            ObjectType::Terrain | ObjectType::TerrainHexagon => Some(FlatShape::Hexagon),
            ObjectType::TerrainSquare => Some(FlatShape::Square),
            ObjectType::TerrainTriangle => Some(FlatShape::Triangle),
        }
    }
}

/// Settings for the terrain pipeline.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TerrainParameters {
    pub object_type: ObjectType,
    /// Seed for subdivision perturbation and noise.
    pub terrain_seed: u64,
    /// Total subdivision passes.
    pub subdivisions: u32,
    /// Leading passes that refine topology without perturbing.
    pub subdivisions_unperturbed: u32,
    /// Perturbation box for the first perturbed pass, in east/north/up terms.
    pub variation: Xyz,
    /// Octave count of the height noise; 0 disables it.
    pub noise_terms: u32,
    pub noise_frequency: f32,
    pub noise_amplitude: f32,
    /// Amplitude ratio between successive octaves.
    pub noise_amplitude_decay: f32,
    /// Starting altitude of the base shape, in units of `variation.z`.
    pub base_height: f32,
    /// Exponent applied to normalised land heights.
    pub power_law: f32,
    pub snowline_equator: f32,
    pub snowline_pole: f32,
    pub snowline_power_law: f32,
    pub snowline_slope_effect: f32,
    /// How far the snowline drops over river vertices.
    pub snowline_glacier_effect: f32,
    /// Number of rivers to attempt.
    pub rivers: u32,
    pub rivers_seed: u64,
    /// Fraction of all vertices at which a lake is treated as an inland sea.
    pub lake_becomes_sea: f32,
    pub oceans_and_rivers_emissive: f32,
    pub colour_ocean: FloatRgba,
    pub colour_river: FloatRgba,
    pub colour_shoreline: FloatRgba,
    pub colour_low: FloatRgba,
    pub colour_high: FloatRgba,
    pub colour_snow: FloatRgba,
    /// Paint every vertex with the high/low colours instead of classifying.
    pub debug_disable_colours: bool,
}

impl TerrainParameters {
    pub const DEFAULT_POWER_LAW: f32 = 1.5;
    pub const DEFAULT_SUBDIVISIONS: u32 = 6;
    pub const DEFAULT_Z_VARIATION: f32 = 0.12;
    pub const DEFAULT_NOISE_AMPLITUDE: f32 = 0.12;
    pub const DEFAULT_SNOWLINE_EQUATOR: f32 = 0.8;
    pub const DEFAULT_SNOWLINE_POLE: f32 = -0.1;
    pub const DEFAULT_SNOWLINE_GLACIER_EFFECT: f32 = 0.1;
    pub const DEFAULT_LAKE_BECOMES_SEA: f32 = 0.05;

    /// Restore every setting to its default.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// The six terrain colours in colour-file order: low, high, ocean,
    /// river, shoreline, snow.
    pub fn colours(&self) -> [FloatRgba; 6] {
        [
            self.colour_low,
            self.colour_high,
            self.colour_ocean,
            self.colour_river,
            self.colour_shoreline,
            self.colour_snow,
        ]
    }

    /// Inverse of [`colours`](Self::colours).
    pub fn set_colours(&mut self, colours: [FloatRgba; 6]) {
        let [low, high, ocean, river, shoreline, snow] = colours;
        self.colour_low = low;
        self.colour_high = high;
        self.colour_ocean = ocean;
        self.colour_river = river;
        self.colour_shoreline = shoreline;
        self.colour_snow = snow;
    }
}

/// Settings for the optional cloud layer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CloudParameters {
    pub enabled: bool,
    pub colour: FloatRgba,
    /// Use `subdivisions` below instead of the terrain's count.
    pub use_own_subdivisions: bool,
    pub subdivisions: u32,
    /// Altitude of the layer in hundredths of the planet radius.
    pub height: u32,
    pub seed: u64,
    /// Outline of a flat cloud layer when the terrain type does not imply one.
    pub flat_shape: FlatShape,
}

impl CloudParameters {
    /// Restore every setting to its default.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Subdivision passes for the cloud mesh.
    pub fn effective_subdivisions(&self, terrain: &TerrainParameters) -> u32 {
        if self.use_own_subdivisions {
            self.subdivisions
        } else {
            terrain.subdivisions
        }
    }
}

// --- Default implementations ---

impl Default for TerrainParameters {
    fn default() -> Self {
        Self {
            object_type: ObjectType::Planet,
            terrain_seed: 0,
            subdivisions: Self::DEFAULT_SUBDIVISIONS,
            subdivisions_unperturbed: 1,
            variation: Xyz::new(0.0, 0.0, Self::DEFAULT_Z_VARIATION),
            noise_terms: 0,
            noise_frequency: 1.0,
            noise_amplitude: Self::DEFAULT_NOISE_AMPLITUDE,
            noise_amplitude_decay: 0.5,
            base_height: 0.0,
            power_law: Self::DEFAULT_POWER_LAW,
            snowline_equator: Self::DEFAULT_SNOWLINE_EQUATOR,
            snowline_pole: Self::DEFAULT_SNOWLINE_POLE,
            snowline_power_law: 1.0,
            snowline_slope_effect: 1.0,
            snowline_glacier_effect: Self::DEFAULT_SNOWLINE_GLACIER_EFFECT,
            rivers: 0,
            rivers_seed: 0,
            lake_becomes_sea: Self::DEFAULT_LAKE_BECOMES_SEA,
            oceans_and_rivers_emissive: 0.0,
            colour_ocean: FloatRgba::rgb(0.0, 0.0, 1.0),
            colour_river: FloatRgba::rgb(0.0, 0.0, 1.0),
            colour_shoreline: FloatRgba::rgb(1.0, 1.0, 0.0),
            colour_low: FloatRgba::rgb(0.0, 1.0, 0.0),
            colour_high: FloatRgba::rgb(1.0, 0.5, 0.0),
            colour_snow: FloatRgba::rgb(1.0, 1.0, 1.0),
            debug_disable_colours: false,
        }
    }
}

impl Default for CloudParameters {
    fn default() -> Self {
        Self {
            enabled: false,
            colour: FloatRgba::rgb(1.0, 1.0, 1.0),
            use_own_subdivisions: false,
            subdivisions: 5,
            height: 10,
            seed: 0,
            flat_shape: FlatShape::Hexagon,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reset_restores_defaults() {
        let mut params = TerrainParameters {
            rivers: 12,
            power_law: 3.0,
            object_type: ObjectType::TerrainSquare,
            ..Default::default()
        };
        params.reset();
        assert_eq!(params, TerrainParameters::default());

        let mut cloud = CloudParameters {
            enabled: true,
            height: 40,
            ..Default::default()
        };
        cloud.reset();
        assert_eq!(cloud, CloudParameters::default());
    }

    #[test]
    fn test_colours_roundtrip_order() {
        let mut params = TerrainParameters::default();
        let mut colours = params.colours();
        assert_eq!(colours[0], params.colour_low);
        assert_eq!(colours[5], params.colour_snow);
        colours.reverse();
        params.set_colours(colours);
        assert_eq!(params.colour_low, FloatRgba::rgb(1.0, 1.0, 1.0));
        assert_eq!(params.colour_high, FloatRgba::rgb(1.0, 1.0, 0.0));
    }

    #[test]
    fn test_flat_shape_mapping() {
        assert_eq!(ObjectType::Planet.flat_shape(), None);
        assert_eq!(ObjectType::Terrain.flat_shape(), Some(FlatShape::Hexagon));
        assert_eq!(ObjectType::TerrainTriangle.flat_shape(), Some(FlatShape::Triangle));
    }

    #[test]
    fn test_cloud_subdivisions() {
        let terrain = TerrainParameters::default();
        let mut cloud = CloudParameters::default();
        assert_eq!(cloud.effective_subdivisions(&terrain), 6);
        cloud.use_own_subdivisions = true;
        assert_eq!(cloud.effective_subdivisions(&terrain), 5);
    }

    #[test]
    fn test_partial_ron_uses_defaults() {
        let params: TerrainParameters = ron::from_str("(rivers: 4)").unwrap();
        assert_eq!(params.rivers, 4);
        assert_eq!(params.subdivisions, TerrainParameters::DEFAULT_SUBDIVISIONS);
    }
}
