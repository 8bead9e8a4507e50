use std::fmt;
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use serde::{Deserialize, Serialize};

/// A 3D point or direction with `f32` components.
///
/// `Xyz` is a plain value: every operation either returns a new value or
/// mutates through an explicit `&mut self` assigning operator, so there is
/// no aliasing between vertices that happen to share coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Xyz {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Xyz {
    /// Create a vector from its components.
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// The zero vector.
    pub const fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    pub const fn unit_x() -> Self {
        Self::new(1.0, 0.0, 0.0)
    }

    pub const fn unit_y() -> Self {
        Self::new(0.0, 1.0, 0.0)
    }

    pub const fn unit_z() -> Self {
        Self::new(0.0, 0.0, 1.0)
    }

    /// Dot product.
    pub fn dot(self, rhs: Xyz) -> f32 {
        self.x * rhs.x + self.y * rhs.y + self.z * rhs.z
    }

    /// Cross product `self × rhs`.
    pub fn cross(self, rhs: Xyz) -> Xyz {
        Xyz::new(
            self.y * rhs.z - self.z * rhs.y,
            self.z * rhs.x - self.x * rhs.z,
            self.x * rhs.y - self.y * rhs.x,
        )
    }

    /// Squared length.
    pub fn magnitude2(self) -> f32 {
        self.dot(self)
    }

    /// Euclidean length.
    pub fn magnitude(self) -> f32 {
        self.magnitude2().sqrt()
    }

    /// Unit vector in the same direction, or `None` for a zero-length vector.
    pub fn try_normalised(self) -> Option<Xyz> {
        let m = self.magnitude();
        if m > 0.0 && m.is_finite() {
            Some(self / m)
        } else {
            None
        }
    }

    /// Unit vector in the same direction.
    ///
    /// A zero-length input yields the zero vector instead of NaNs.
    pub fn normalised(self) -> Xyz {
        self.try_normalised().unwrap_or_default()
    }

    /// Component-wise product.
    pub fn scaled(self, rhs: Xyz) -> Xyz {
        Xyz::new(self.x * rhs.x, self.y * rhs.y, self.z * rhs.z)
    }

    /// Returns `true` if every component differs from `rhs` by at most `tolerance`.
    pub fn approx_eq(self, rhs: Xyz, tolerance: f32) -> bool {
        (self.x - rhs.x).abs() <= tolerance
            && (self.y - rhs.y).abs() <= tolerance
            && (self.z - rhs.z).abs() <= tolerance
    }
}

impl Add for Xyz {
    type Output = Xyz;
    fn add(self, rhs: Xyz) -> Xyz {
        Xyz::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Xyz {
    type Output = Xyz;
    fn sub(self, rhs: Xyz) -> Xyz {
        Xyz::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Neg for Xyz {
    type Output = Xyz;
    fn neg(self) -> Xyz {
        Xyz::new(-self.x, -self.y, -self.z)
    }
}

impl Mul<f32> for Xyz {
    type Output = Xyz;
    fn mul(self, rhs: f32) -> Xyz {
        Xyz::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl Mul<Xyz> for f32 {
    type Output = Xyz;
    fn mul(self, rhs: Xyz) -> Xyz {
        rhs * self
    }
}

impl Div<f32> for Xyz {
    type Output = Xyz;
    fn div(self, rhs: f32) -> Xyz {
        Xyz::new(self.x / rhs, self.y / rhs, self.z / rhs)
    }
}

impl AddAssign for Xyz {
    fn add_assign(&mut self, rhs: Xyz) {
        self.x += rhs.x;
        self.y += rhs.y;
        self.z += rhs.z;
    }
}

impl SubAssign for Xyz {
    fn sub_assign(&mut self, rhs: Xyz) {
        self.x -= rhs.x;
        self.y -= rhs.y;
        self.z -= rhs.z;
    }
}

impl MulAssign<f32> for Xyz {
    fn mul_assign(&mut self, rhs: f32) {
        self.x *= rhs;
        self.y *= rhs;
        self.z *= rhs;
    }
}

impl DivAssign<f32> for Xyz {
    fn div_assign(&mut self, rhs: f32) {
        self.x /= rhs;
        self.y /= rhs;
        self.z /= rhs;
    }
}

impl fmt::Display for Xyz {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{},{})", self.x, self.y, self.z)
    }
}

impl From<glam::Vec3> for Xyz {
    fn from(v: glam::Vec3) -> Self {
        Xyz::new(v.x, v.y, v.z)
    }
}

impl From<Xyz> for glam::Vec3 {
    fn from(v: Xyz) -> Self {
        glam::Vec3::new(v.x, v.y, v.z)
    }
}

impl From<[f32; 3]> for Xyz {
    fn from(a: [f32; 3]) -> Self {
        Xyz::new(a[0], a[1], a[2])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-6;

    #[test]
    fn test_cross_of_axes() {
        let z = Xyz::unit_x().cross(Xyz::unit_y());
        assert_eq!(z, Xyz::unit_z());
        let x = Xyz::unit_y().cross(Xyz::unit_z());
        assert_eq!(x, Xyz::unit_x());
    }

    #[test]
    fn test_dot_and_magnitude() {
        let v = Xyz::new(1.0, 2.0, 2.0);
        assert_eq!(v.dot(v), 9.0);
        assert!((v.magnitude() - 3.0).abs() < EPSILON);
    }

    #[test]
    fn test_normalised_has_unit_length() {
        let v = Xyz::new(3.0, -4.0, 12.0).normalised();
        assert!(
            (v.magnitude() - 1.0).abs() < EPSILON,
            "normalised length: {}",
            v.magnitude()
        );
    }

    #[test]
    fn test_normalise_zero_vector_is_zero() {
        assert_eq!(Xyz::zero().try_normalised(), None);
        assert_eq!(Xyz::zero().normalised(), Xyz::zero());
    }

    #[test]
    fn test_assigning_operators() {
        let mut v = Xyz::new(1.0, 1.0, 1.0);
        v += Xyz::new(1.0, 2.0, 3.0);
        v -= Xyz::new(0.5, 0.5, 0.5);
        v *= 2.0;
        v /= 4.0;
        assert!(v.approx_eq(Xyz::new(0.75, 1.25, 1.75), EPSILON), "{v}");
    }

    #[test]
    fn test_display_format() {
        assert_eq!(Xyz::new(1.0, 2.5, -3.0).to_string(), "(1,2.5,-3)");
    }

    #[test]
    fn test_glam_conversion() {
        let v = Xyz::new(0.25, -1.0, 8.0);
        let g: glam::Vec3 = v.into();
        assert_eq!(Xyz::from(g), v);
    }
}
