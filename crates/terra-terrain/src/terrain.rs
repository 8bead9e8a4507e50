//! The terrain pipeline: noise, sea level, power law, rivers and colouring.
//!
//! Passes run in a fixed order over one mesh and each depends on the state
//! the previous one left behind. [`Terrain::generate`] runs them all.

use std::collections::BTreeSet;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use terra_mesh::{ByteRgba, FloatRgba, Progress, ProgressCounter, TriangleMesh};

use crate::multiscale::MultiscaleNoise;
use crate::params::TerrainParameters;

/// Normalised height below which land is coloured as shoreline.
pub const BEACHLINE: f32 = 0.01;
/// Normalised height at which the low/high colour blend reaches pure high.
pub const TREELINE: f32 = 0.25;

/// A terrain mesh together with the state the pipeline accumulates.
#[derive(Debug)]
pub struct Terrain {
    pub(crate) mesh: TriangleMesh,
    pub(crate) river_vertices: BTreeSet<u32>,
    pub(crate) max_height: f32,
}

impl Terrain {
    /// Wrap a freshly subdivided mesh. No pass has run yet.
    pub fn new(mesh: TriangleMesh) -> Self {
        Self {
            mesh,
            river_vertices: BTreeSet::new(),
            max_height: 0.0,
        }
    }

    pub fn mesh(&self) -> &TriangleMesh {
        &self.mesh
    }

    pub fn into_mesh(self) -> TriangleMesh {
        self.mesh
    }

    /// Highest land height seen by the sea level pass.
    pub fn max_height(&self) -> f32 {
        self.max_height
    }

    /// Vertices claimed by any river or lake.
    pub fn river_vertices(&self) -> &BTreeSet<u32> {
        &self.river_vertices
    }

    /// Run every pass in order.
    pub fn generate(&mut self, params: &TerrainParameters, progress: &mut dyn Progress) {
        self.apply_noise(params, progress);
        self.apply_sea_level(progress);
        self.apply_power_law(params, progress);
        self.apply_rivers(params, progress);
        self.mesh.compute_vertex_normals(progress);
        self.apply_colours(params, progress);
    }

    /// Add multiscale noise to every vertex height.
    ///
    /// Skipped when there are no noise terms or the amplitude is zero.
    pub fn apply_noise(&mut self, params: &TerrainParameters, progress: &mut dyn Progress) {
        if params.noise_terms == 0 || params.noise_amplitude == 0.0 {
            return;
        }
        let mut counter = ProgressCounter::new(self.mesh.vertex_count());
        progress.progress_start(ProgressCounter::HUNDRED_PERCENT, "Noise");

        let mut rng = ChaCha8Rng::seed_from_u64(params.terrain_seed);
        let noise = MultiscaleNoise::new(
            &mut rng,
            params.noise_terms,
            params.noise_amplitude_decay,
        );
        tracing::debug!(
            "Noise: {} octaves, amplitude {}, frequency {}",
            noise.terms(),
            params.noise_amplitude,
            params.noise_frequency
        );
        for i in 0..self.mesh.vertex_count() {
            counter.step(progress);
            let h = self.mesh.vertex_height(i);
            let p = self.mesh.vertices[i].position * params.noise_frequency;
            self.mesh
                .set_vertex_height(i, h + params.noise_amplitude * noise.sample(p));
        }

        progress.progress_complete("Noise complete");
    }

    /// Clamp submerged vertices to zero and order triangles land first.
    ///
    /// A triangle is sea only when all three of its vertices are at or
    /// below zero. Afterwards `switch_colour` is the number of land
    /// triangles; both groups keep their relative order.
    pub fn apply_sea_level(&mut self, progress: &mut dyn Progress) {
        let mut counter =
            ProgressCounter::new(self.mesh.vertex_count() + self.mesh.triangle_count());
        progress.progress_start(ProgressCounter::HUNDRED_PERCENT, "Sea level");

        let mut sea_vertices = vec![false; self.mesh.vertex_count()];
        for (i, is_sea) in sea_vertices.iter_mut().enumerate() {
            counter.step(progress);
            let m = self.mesh.vertex_height(i);
            if m <= 0.0 {
                self.mesh.set_vertex_height(i, 0.0);
                *is_sea = true;
            } else if m > self.max_height {
                self.max_height = m;
            }
        }

        let triangles = std::mem::take(&mut self.mesh.triangles);
        let mut land = Vec::with_capacity(triangles.len());
        let mut sea = Vec::new();
        for t in triangles {
            counter.step(progress);
            if t.vertex.iter().all(|&v| sea_vertices[v as usize]) {
                sea.push(t);
            } else {
                land.push(t);
            }
        }
        self.mesh.switch_colour = land.len();
        tracing::debug!("Sea level: {} sea triangles, {} land", sea.len(), land.len());
        land.append(&mut sea);
        self.mesh.triangles = land;

        progress.progress_complete("Sea level completed");
    }

    /// Remap land heights with `max * (h / max)^power_law`.
    pub fn apply_power_law(&mut self, params: &TerrainParameters, progress: &mut dyn Progress) {
        let mut counter = ProgressCounter::new(self.mesh.vertex_count());
        progress.progress_start(ProgressCounter::HUNDRED_PERCENT, "Power law");

        let epsilon = self.mesh.geometry().epsilon();
        for i in 0..self.mesh.vertex_count() {
            counter.step(progress);
            let h = self.mesh.vertex_height(i);
            if h > epsilon {
                let remapped = self.max_height * (h / self.max_height).powf(params.power_law);
                self.mesh.set_vertex_height(i, remapped);
            }
        }

        progress.progress_complete("Power law completed");
    }

    /// Paint every vertex with the high colour in slot 0 and the low colour
    /// in slot 1. Used to inspect geometry without classification.
    pub fn apply_debug_colours(&mut self, params: &TerrainParameters) {
        let high = ByteRgba::from(params.colour_high);
        let low = ByteRgba::from(params.colour_low);
        for v in &mut self.mesh.vertices {
            v.colour = [high, low];
        }
    }

    /// Colour the mesh from heights, slopes, latitude and river membership.
    ///
    /// Honours `debug_disable_colours`, and sets the mesh emissive strength
    /// from `oceans_and_rivers_emissive`. Needs vertex normals.
    pub fn apply_colours(&mut self, params: &TerrainParameters, progress: &mut dyn Progress) {
        if params.debug_disable_colours {
            self.apply_debug_colours(params);
        } else {
            self.classify_colours(params, progress);
        }
        self.mesh.emissive = params.oceans_and_rivers_emissive;
    }

    fn classify_colours(&mut self, params: &TerrainParameters, progress: &mut dyn Progress) {
        let mut counter =
            ProgressCounter::new(self.mesh.colour1_triangle_count() + self.mesh.vertex_count());
        progress.progress_start(ProgressCounter::HUNDRED_PERCENT, "Colouring");

        let ocean = ByteRgba::from(params.colour_ocean);
        let ocean_emissive = params.oceans_and_rivers_emissive > 0.0;
        for t in self.mesh.colour0_triangle_count()..self.mesh.triangle_count() {
            counter.step(progress);
            for v in self.mesh.triangles[t].vertex {
                let vertex = &mut self.mesh.vertices[v as usize];
                vertex.colour = [ByteRgba::RED, ocean];
                if ocean_emissive {
                    vertex.emissive[1] = true;
                }
            }
        }

        for i in 0..self.mesh.vertex_count() {
            counter.step(progress);
            let (colour, emissive) = self.land_colour(i, params);
            let vertex = &mut self.mesh.vertices[i];
            vertex.colour[0] = colour;
            if emissive {
                vertex.emissive[0] = true;
            }
        }

        progress.progress_complete("Colouring completed");
    }

    /// Snowline threshold at vertex `i`, before comparison with the
    /// normalised height.
    fn snowline(&self, i: usize, params: &TerrainParameters) -> f32 {
        let geometry = self.mesh.geometry();
        let v = &self.mesh.vertices[i];
        let average_slope = 1.0 - geometry.up(v.position).dot(v.normal);
        let glacier = if self.river_vertices.contains(&(i as u32)) {
            params.snowline_glacier_effect
        } else {
            0.0
        };
        let latitude = geometry.normalised_latitude(v.position).abs();
        let snowline = params.snowline_equator
            + latitude * (params.snowline_pole - params.snowline_equator)
            + params.snowline_slope_effect * average_slope
            - glacier;
        if snowline > 0.0 {
            snowline.powf(params.snowline_power_law)
        } else {
            snowline
        }
    }

    /// Slot 0 colour of vertex `i`, and whether it glows as river water.
    fn land_colour(&self, i: usize, params: &TerrainParameters) -> (ByteRgba, bool) {
        let normalised_height = if self.max_height > 0.0 {
            self.mesh.vertex_height(i) / self.max_height
        } else {
            0.0
        };
        let is_river = self.river_vertices.contains(&(i as u32));

        let colour: FloatRgba = if normalised_height > self.snowline(i, params) {
            params.colour_snow
        } else if is_river {
            return (ByteRgba::from(params.colour_river), true);
        } else if normalised_height < BEACHLINE {
            params.colour_shoreline
        } else if normalised_height < TREELINE {
            params
                .colour_low
                .lerp(params.colour_high, normalised_height / TREELINE)
        } else {
            params.colour_high
        };
        (ByteRgba::from(colour), false)
    }
}
