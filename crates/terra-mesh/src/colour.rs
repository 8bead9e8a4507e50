//! Byte and float RGBA colours.

use std::ops::{Add, Mul};

use serde::{Deserialize, Serialize};

/// An 8-bit-per-channel colour as stored on mesh vertices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct ByteRgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl ByteRgba {
    pub const BLACK: ByteRgba = ByteRgba::rgb(0, 0, 0);
    pub const RED: ByteRgba = ByteRgba::rgb(255, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque colour.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl From<FloatRgba> for ByteRgba {
    fn from(c: FloatRgba) -> Self {
        let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        ByteRgba::new(channel(c.r), channel(c.g), channel(c.b), channel(c.a))
    }
}

/// A floating point colour with channels nominally in `[0, 1]`.
///
/// Used for user-facing colour settings and for blending; converted to
/// [`ByteRgba`] when written to vertices.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FloatRgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    #[serde(default = "opaque")]
    pub a: f32,
}

fn opaque() -> f32 {
    1.0
}

impl FloatRgba {
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque colour.
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::new(r, g, b, 1.0)
    }

    /// Linear interpolation: `t = 0` gives `self`, `t = 1` gives `other`.
    pub fn lerp(self, other: FloatRgba, t: f32) -> FloatRgba {
        self * (1.0 - t) + other * t
    }
}

impl Default for FloatRgba {
    fn default() -> Self {
        Self::rgb(0.0, 0.0, 0.0)
    }
}

impl Add for FloatRgba {
    type Output = FloatRgba;
    fn add(self, rhs: FloatRgba) -> FloatRgba {
        FloatRgba::new(self.r + rhs.r, self.g + rhs.g, self.b + rhs.b, self.a + rhs.a)
    }
}

impl Mul<f32> for FloatRgba {
    type Output = FloatRgba;
    fn mul(self, k: f32) -> FloatRgba {
        FloatRgba::new(self.r * k, self.g * k, self.b * k, self.a * k)
    }
}
