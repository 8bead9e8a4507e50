//! Vector and matrix value types shared by the mesh, terrain and viewer code.

mod matrix;
mod xyz;

pub use matrix::{Matrix33, Matrix34};
pub use xyz::Xyz;
