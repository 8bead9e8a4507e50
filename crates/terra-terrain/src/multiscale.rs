//! Multi-octave gradient noise over 3D positions.
//!
//! Each octave is an independently seeded Perlin field. Octave `i` samples
//! at `2^i` times the input position with an amplitude that decays by a
//! constant ratio per octave; amplitudes are normalised to sum to one so the
//! overall range does not depend on the octave count.

use noise::{NoiseFn, Perlin};
use rand::RngCore;
use terra_math::Xyz;

/// Offset keeping samples away from the lattice origin.
const SAMPLE_OFFSET: f64 = 10000.0;
/// Gain bringing a single octave closer to the `[-1, 1]` range.
const OCTAVE_GAIN: f32 = 1.5;

/// Sum of several Perlin octaves with geometrically decaying amplitude.
pub struct MultiscaleNoise {
    octaves: Vec<Perlin>,
    amplitudes: Vec<f32>,
}

impl MultiscaleNoise {
    /// Build `terms` octaves seeded from `rng`.
    ///
    /// The first octave has relative amplitude 1, each following one
    /// `decay` times the previous.
    pub fn new(rng: &mut dyn RngCore, terms: u32, decay: f32) -> Self {
        let mut octaves = Vec::with_capacity(terms as usize);
        let mut amplitudes = Vec::with_capacity(terms as usize);
        let mut k = 1.0_f32;
        let mut total = 0.0_f32;
        for _ in 0..terms {
            octaves.push(Perlin::new(rng.next_u32()));
            amplitudes.push(k);
            total += k;
            k *= decay;
        }
        if total != 0.0 {
            for a in &mut amplitudes {
                *a /= total;
            }
        }
        Self { octaves, amplitudes }
    }

    /// Number of octaves summed by [`sample`](Self::sample).
    pub fn terms(&self) -> usize {
        self.octaves.len()
    }

    /// Noise value at `p`, roughly within `[-1, 1]`.
    pub fn sample(&self, p: Xyz) -> f32 {
        self.octaves
            .iter()
            .zip(&self.amplitudes)
            .enumerate()
            .map(|(i, (octave, amplitude))| {
                let scale = (1u64 << i.min(63)) as f32;
                amplitude * octave_sample(octave, p * scale)
            })
            .sum()
    }
}

impl std::fmt::Debug for MultiscaleNoise {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MultiscaleNoise")
            .field("amplitudes", &self.amplitudes)
            .finish()
    }
}

fn octave_sample(octave: &Perlin, p: Xyz) -> f32 {
    let q = [
        2.0 * f64::from(p.x) + SAMPLE_OFFSET,
        2.0 * f64::from(p.y) + SAMPLE_OFFSET,
        2.0 * f64::from(p.z) + SAMPLE_OFFSET,
    ];
    OCTAVE_GAIN * octave.get(q) as f32
}
