//! 3×3 rotation/basis matrices and 3×4 affine transforms.

use std::ops::Mul;

use crate::Xyz;

/// A 3×3 matrix stored as three basis columns.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Matrix33 {
    pub basis: [Xyz; 3],
}

impl Matrix33 {
    /// Build a matrix from its three columns.
    pub const fn from_columns(rx: Xyz, ry: Xyz, rz: Xyz) -> Self {
        Self {
            basis: [rx, ry, rz],
        }
    }

    pub const fn identity() -> Self {
        Self::from_columns(Xyz::unit_x(), Xyz::unit_y(), Xyz::unit_z())
    }

    /// Element at `row`, `col`.
    pub fn element(&self, row: usize, col: usize) -> f32 {
        let c = self.basis[col];
        match row {
            0 => c.x,
            1 => c.y,
            _ => c.z,
        }
    }

    fn set_element(&mut self, row: usize, col: usize, value: f32) {
        let c = &mut self.basis[col];
        match row {
            0 => c.x = value,
            1 => c.y = value,
            _ => c.z = value,
        }
    }

    pub fn row0(&self) -> Xyz {
        Xyz::new(self.basis[0].x, self.basis[1].x, self.basis[2].x)
    }

    pub fn row1(&self) -> Xyz {
        Xyz::new(self.basis[0].y, self.basis[1].y, self.basis[2].y)
    }

    pub fn row2(&self) -> Xyz {
        Xyz::new(self.basis[0].z, self.basis[1].z, self.basis[2].z)
    }

    /// Determinant of the 2×2 minor obtained by deleting `row` and `col`.
    pub fn cofactor(&self, row: usize, col: usize) -> f32 {
        let row0 = if row == 0 { 1 } else { 0 };
        let col0 = if col == 0 { 1 } else { 0 };
        let row1 = if row == 2 { 1 } else { 2 };
        let col1 = if col == 2 { 1 } else { 2 };
        self.element(row0, col0) * self.element(row1, col1)
            - self.element(row0, col1) * self.element(row1, col0)
    }

    pub fn determinant(&self) -> f32 {
        self.element(0, 0) * self.cofactor(0, 0) - self.element(0, 1) * self.cofactor(0, 1)
            + self.element(0, 2) * self.cofactor(0, 2)
    }

    /// Inverse via the adjugate, or `None` when the matrix is singular.
    pub fn inverted(&self) -> Option<Matrix33> {
        let det = self.determinant();
        if det == 0.0 || !det.is_finite() {
            return None;
        }
        let mut ret = Matrix33::from_columns(Xyz::zero(), Xyz::zero(), Xyz::zero());
        for row in 0..3 {
            for col in 0..3 {
                let cf = self.cofactor(row, col);
                let signed = if (row + col) & 1 != 0 { -cf } else { cf };
                ret.set_element(col, row, signed / det);
            }
        }
        Some(ret)
    }

    pub fn rotate_about_x(angle: f32) -> Self {
        let (sa, ca) = angle.sin_cos();
        Self::from_columns(
            Xyz::unit_x(),
            Xyz::new(0.0, ca, sa),
            Xyz::new(0.0, -sa, ca),
        )
    }

    pub fn rotate_about_y(angle: f32) -> Self {
        let (sa, ca) = angle.sin_cos();
        Self::from_columns(
            Xyz::new(ca, 0.0, -sa),
            Xyz::unit_y(),
            Xyz::new(sa, 0.0, ca),
        )
    }

    pub fn rotate_about_z(angle: f32) -> Self {
        let (sa, ca) = angle.sin_cos();
        Self::from_columns(
            Xyz::new(ca, sa, 0.0),
            Xyz::new(-sa, ca, 0.0),
            Xyz::unit_z(),
        )
    }

    /// Rotation by `angle` radians about an arbitrary `axis`.
    ///
    /// Builds an orthonormal frame whose third column is the axis, rotates
    /// about Z in that frame and maps back. A zero axis gives the identity.
    pub fn rotate_about_axis(axis: Xyz, angle: f32) -> Self {
        let Some(axis) = axis.try_normalised() else {
            return Self::identity();
        };
        let ortho0 = axis
            .cross(Xyz::unit_x())
            .try_normalised()
            .unwrap_or_else(|| axis.cross(Xyz::unit_y()).normalised());
        let ortho1 = axis.cross(ortho0);
        let axis_to_xyz = Matrix33::from_columns(ortho0, ortho1, axis);
        // The frame is orthonormal, so its inverse is its transpose.
        let xyz_to_axis = Matrix33::from_columns(
            axis_to_xyz.row0(),
            axis_to_xyz.row1(),
            axis_to_xyz.row2(),
        );
        axis_to_xyz * Self::rotate_about_z(angle) * xyz_to_axis
    }
}

impl Default for Matrix33 {
    fn default() -> Self {
        Self::identity()
    }
}

impl Mul<Xyz> for Matrix33 {
    type Output = Xyz;
    fn mul(self, v: Xyz) -> Xyz {
        Xyz::new(self.row0().dot(v), self.row1().dot(v), self.row2().dot(v))
    }
}

impl Mul for Matrix33 {
    type Output = Matrix33;
    fn mul(self, b: Matrix33) -> Matrix33 {
        Matrix33::from_columns(self * b.basis[0], self * b.basis[1], self * b.basis[2])
    }
}

impl Mul<f32> for Matrix33 {
    type Output = Matrix33;
    fn mul(self, k: f32) -> Matrix33 {
        Matrix33::from_columns(self.basis[0] * k, self.basis[1] * k, self.basis[2] * k)
    }
}

/// An affine transform: a [`Matrix33`] followed by a translation.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Matrix34 {
    pub rotate: Matrix33,
    pub translate: Xyz,
}

impl Matrix34 {
    pub const fn new(rotate: Matrix33, translate: Xyz) -> Self {
        Self { rotate, translate }
    }

    pub const fn identity() -> Self {
        Self::new(Matrix33::identity(), Xyz::zero())
    }

    pub const fn translation(t: Xyz) -> Self {
        Self::new(Matrix33::identity(), t)
    }

    /// Rotation by `angle` about `axis` passing through the point `pt`.
    pub fn rotate_about_axis_through(axis: Xyz, angle: f32, pt: Xyz) -> Self {
        let to_origin = Self::translation(-pt);
        let rotation = Self::new(Matrix33::rotate_about_axis(axis, angle), Xyz::zero());
        Self::translation(pt) * rotation * to_origin
    }

    /// Rotation about `axis` through `pt` by an angle equal to the axis length.
    pub fn rotate_by_axis_length_through(axis: Xyz, pt: Xyz) -> Self {
        let magnitude = axis.magnitude();
        if magnitude == 0.0 {
            return Self::identity();
        }
        Self::rotate_about_axis_through(axis / magnitude, magnitude, pt)
    }
}

impl Mul<Xyz> for Matrix34 {
    type Output = Xyz;
    fn mul(self, v: Xyz) -> Xyz {
        self.rotate * v + self.translate
    }
}

impl Mul for Matrix34 {
    type Output = Matrix34;
    fn mul(self, b: Matrix34) -> Matrix34 {
        Matrix34::new(self.rotate * b.rotate, self.rotate * b.translate + self.translate)
    }
}
