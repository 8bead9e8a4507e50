//! Geometry strategies: how "height" and "up" are derived from a position.
//!
//! Flat geometry treats `z` as altitude over the XY plane. Spherical geometry
//! treats the distance from the origin minus one as altitude over the unit
//! sphere. The subdivision and terrain passes only ever talk to the
//! [`Geometry`] trait.

use std::fmt;

use rand::{Rng, RngCore};
use terra_math::Xyz;

/// Tolerance used for height equality on spherical meshes.
pub const SPHERICAL_EPSILON: f32 = 0.000_001;

/// Height mapping, interpolation and local frame of a manifold.
pub trait Geometry: fmt::Debug + Send + Sync {
    /// Altitude of `p` above the reference surface.
    fn height(&self, p: Xyz) -> f32;

    /// Move `p` so that its altitude becomes `h`.
    fn set_height(&self, p: &mut Xyz, h: f32);

    /// Point between `v0` and `v1` used when splitting an edge.
    fn midpoint(&self, v0: Xyz, v1: Xyz) -> Xyz;

    /// Latitude in `[-1, 1]`, 0 at the equator.
    fn normalised_latitude(&self, p: Xyz) -> f32;

    fn up(&self, p: Xyz) -> Xyz;
    fn north(&self, p: Xyz) -> Xyz;
    fn east(&self, p: Xyz) -> Xyz;

    /// Random offset of `p`, with `variation` expressed in the local
    /// east/north/up frame.
    fn perturb(&self, p: Xyz, variation: Xyz, rng: &mut dyn RngCore) -> Xyz;

    /// Tolerance for comparing heights produced by this geometry.
    fn epsilon(&self) -> f32;
}

/// A uniformly random point in the box `[-v, v]` on each axis.
pub fn random_in_box(variation: Xyz, rng: &mut dyn RngCore) -> Xyz {
    let mut component = |v: f32| (rng.random::<f32>() * 2.0 - 1.0) * v;
    let x = component(variation.x);
    let y = component(variation.y);
    let z = component(variation.z);
    Xyz::new(x, y, z)
}

/// Terrain over the XY plane with `z` as altitude.
#[derive(Clone, Copy, Debug, Default)]
pub struct FlatGeometry;

impl Geometry for FlatGeometry {
    fn height(&self, p: Xyz) -> f32 {
        p.z
    }

    fn set_height(&self, p: &mut Xyz, h: f32) {
        p.z = h;
    }

    fn midpoint(&self, v0: Xyz, v1: Xyz) -> Xyz {
        (v0 + v1) * 0.5
    }

    fn normalised_latitude(&self, _p: Xyz) -> f32 {
        0.0
    }

    fn up(&self, _p: Xyz) -> Xyz {
        Xyz::unit_z()
    }

    fn north(&self, _p: Xyz) -> Xyz {
        Xyz::unit_y()
    }

    fn east(&self, _p: Xyz) -> Xyz {
        Xyz::unit_x()
    }

    fn perturb(&self, p: Xyz, variation: Xyz, rng: &mut dyn RngCore) -> Xyz {
        p + random_in_box(variation, rng)
    }

    fn epsilon(&self) -> f32 {
        0.0
    }
}

/// Planet surface around the unit sphere with `|p| - 1` as altitude.
#[derive(Clone, Copy, Debug, Default)]
pub struct SphericalGeometry;

impl SphericalGeometry {
    fn at_pole(p: Xyz) -> bool {
        p.x == 0.0 && p.y == 0.0
    }
}

impl Geometry for SphericalGeometry {
    fn height(&self, p: Xyz) -> f32 {
        p.magnitude() - 1.0
    }

    fn set_height(&self, p: &mut Xyz, h: f32) {
        let m = p.magnitude();
        if m > 0.0 {
            *p *= (1.0 + h) / m;
        } else {
            *p = Xyz::new(0.0, 0.0, 1.0 + h);
        }
    }

    /// Direction of the chord midpoint, at the average radius of the ends.
    ///
    /// Plain averaging would pull every new vertex inside the sphere and
    /// flatten raised terrain on each subdivision.
    fn midpoint(&self, v0: Xyz, v1: Xyz) -> Xyz {
        let radius = 0.5 * (v0.magnitude() + v1.magnitude());
        let m = (v0 + v1) * 0.5;
        match m.try_normalised() {
            Some(dir) => dir * radius,
            None => m,
        }
    }

    fn normalised_latitude(&self, p: Xyz) -> f32 {
        p.z
    }

    fn up(&self, p: Xyz) -> Xyz {
        p.normalised()
    }

    fn north(&self, p: Xyz) -> Xyz {
        if Self::at_pole(p) {
            Xyz::zero()
        } else {
            self.up(p).cross(self.east(p)).normalised()
        }
    }

    fn east(&self, p: Xyz) -> Xyz {
        if Self::at_pole(p) {
            Xyz::zero()
        } else {
            Xyz::unit_z().cross(self.up(p)).normalised()
        }
    }

    fn perturb(&self, p: Xyz, variation: Xyz, rng: &mut dyn RngCore) -> Xyz {
        let v = random_in_box(variation, rng);
        p + self.east(p) * v.x + self.north(p) * v.y + self.up(p) * v.z
    }

    fn epsilon(&self) -> f32 {
        SPHERICAL_EPSILON
    }
}
