//! Adaptive triangle meshes over pluggable geometries.
//!
//! A [`TriangleMesh`] owns a vertex buffer and a triangle buffer. All height,
//! midpoint and perturbation logic is delegated to a [`Geometry`] strategy so
//! the same subdivision code drives flat terrain patches and whole planets.

mod colour;
mod geometry;
mod mesh;
mod progress;
mod shapes;
mod triangle;
mod vertex;

pub use colour::{ByteRgba, FloatRgba};
pub use geometry::{FlatGeometry, Geometry, SPHERICAL_EPSILON, SphericalGeometry, random_in_box};
pub use mesh::TriangleMesh;
pub use progress::{LogProgress, NullProgress, Progress, ProgressCounter};
pub use shapes::{FlatShape, icosahedron};
pub use triangle::{Triangle, TriangleEdge};
pub use vertex::Vertex;
