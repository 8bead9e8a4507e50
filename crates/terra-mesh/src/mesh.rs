//! Triangle mesh storage, subdivision and normal computation.

use rand::RngCore;
use rustc_hash::FxHashMap;
use terra_math::Xyz;

use crate::progress::{Progress, ProgressCounter};
use crate::{ByteRgba, Geometry, Triangle, TriangleEdge, Vertex};

/// A vertex buffer, a triangle buffer and the geometry they live on.
///
/// Triangles with index below [`switch_colour`](Self::switch_colour) are
/// drawn with vertex colour slot 0, the rest with slot 1. Terrain meshes use
/// this to give coastal vertices a land colour and a sea colour at once.
#[derive(Debug)]
pub struct TriangleMesh {
    pub vertices: Vec<Vertex>,
    pub triangles: Vec<Triangle>,
    pub switch_colour: usize,
    /// Strength of emissive lighting for vertices flagged emissive.
    pub emissive: f32,
    geometry: Box<dyn Geometry>,
}

impl TriangleMesh {
    pub fn new(geometry: Box<dyn Geometry>) -> Self {
        Self {
            vertices: Vec::new(),
            triangles: Vec::new(),
            switch_colour: 0,
            emissive: 0.0,
            geometry,
        }
    }

    pub fn geometry(&self) -> &dyn Geometry {
        self.geometry.as_ref()
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Append a vertex and return its index.
    pub fn add_vertex(&mut self, v: Vertex) -> u32 {
        let index = self.vertices.len() as u32;
        self.vertices.push(v);
        index
    }

    pub fn add_triangle(&mut self, t: Triangle) {
        debug_assert!(
            t.vertex.iter().all(|&i| (i as usize) < self.vertices.len()),
            "triangle {t:?} references a missing vertex"
        );
        self.triangles.push(t);
    }

    pub fn vertex_height(&self, i: usize) -> f32 {
        self.geometry.height(self.vertices[i].position)
    }

    pub fn set_vertex_height(&mut self, i: usize, h: f32) {
        let mut p = self.vertices[i].position;
        self.geometry.set_height(&mut p, h);
        self.vertices[i].position = p;
    }

    pub fn set_vertex_colour(&mut self, i: usize, slot: usize, colour: ByteRgba) {
        self.vertices[i].colour[slot] = colour;
    }

    pub fn set_vertex_emissive(&mut self, i: usize, slot: usize, emissive: bool) {
        self.vertices[i].emissive[slot] = emissive;
    }

    /// Colour slot used when drawing triangle `t`.
    pub fn colour_slot_for_triangle(&self, t: usize) -> usize {
        usize::from(t >= self.switch_colour)
    }

    /// Number of triangles drawn with colour slot 0.
    pub fn colour0_triangle_count(&self) -> usize {
        self.switch_colour.min(self.triangles.len())
    }

    /// Number of triangles drawn with colour slot 1.
    pub fn colour1_triangle_count(&self) -> usize {
        self.triangles.len() - self.colour0_triangle_count()
    }

    /// Unit normal of triangle `i`, zero for a degenerate triangle.
    pub fn triangle_normal(&self, i: usize) -> Xyz {
        let t = &self.triangles[i];
        let v0 = self.vertices[t.index(0)].position;
        let v1 = self.vertices[t.index(1)].position;
        let v2 = self.vertices[t.index(2)].position;
        (v1 - v0).cross(v2 - v0).normalised()
    }

    /// Set every vertex normal to the normalised mean of the normals of the
    /// triangles that use it.
    pub fn compute_vertex_normals(&mut self, progress: &mut dyn Progress) {
        let mut counter = ProgressCounter::new(self.triangles.len() + self.vertices.len());
        progress.progress_start(ProgressCounter::HUNDRED_PERCENT, "Compute normals");

        let mut vertex_triangles: Vec<Vec<u32>> = vec![Vec::new(); self.vertices.len()];
        for (i, t) in self.triangles.iter().enumerate() {
            counter.step(progress);
            for &v in &t.vertex {
                vertex_triangles[v as usize].push(i as u32);
            }
        }

        let triangle_normals: Vec<Xyz> = (0..self.triangles.len())
            .map(|i| self.triangle_normal(i))
            .collect();

        for (vertex, incident) in self.vertices.iter_mut().zip(&vertex_triangles) {
            counter.step(progress);
            let mut n = Xyz::zero();
            for &t in incident {
                n += triangle_normals[t as usize];
            }
            if !incident.is_empty() {
                n /= incident.len() as f32;
            }
            vertex.normal = n.normalised();
        }

        progress.progress_complete("Normals computed");
    }

    /// One subdivision pass: each triangle becomes four.
    ///
    /// Existing vertices are perturbed first; each edge then gets exactly one
    /// new (perturbed) midpoint vertex, shared by both triangles on that edge.
    /// `level` and `levels` only label the progress report.
    pub fn subdivide(
        &mut self,
        variation: Xyz,
        level: u32,
        levels: u32,
        rng: &mut dyn RngCore,
        progress: &mut dyn Progress,
    ) {
        let mut counter = ProgressCounter::new(self.vertices.len() + self.triangles.len());
        progress.progress_start(
            ProgressCounter::HUNDRED_PERCENT,
            &format!("Subdivision level {} of {levels}", level + 1),
        );

        for vertex in &mut self.vertices {
            counter.step(progress);
            vertex.position = self.geometry.perturb(vertex.position, variation, rng);
        }

        let old_triangles = std::mem::take(&mut self.triangles);
        self.triangles.reserve(old_triangles.len() * 4);
        let mut edge_map: FxHashMap<TriangleEdge, u32> = FxHashMap::default();

        for t in &old_triangles {
            counter.step(progress);
            let [i0, i1, i2] = t.vertex;
            let e01 = self.edge_midpoint(&mut edge_map, i0, i1, variation, rng);
            let e12 = self.edge_midpoint(&mut edge_map, i1, i2, variation, rng);
            let e20 = self.edge_midpoint(&mut edge_map, i2, i0, variation, rng);

            self.triangles.push(Triangle::new(i0, e01, e20));
            self.triangles.push(Triangle::new(e01, i1, e12));
            self.triangles.push(Triangle::new(e20, e12, i2));
            self.triangles.push(Triangle::new(e01, e12, e20));
        }

        progress.progress_complete("Subdivision completed");
    }

    fn edge_midpoint(
        &mut self,
        edge_map: &mut FxHashMap<TriangleEdge, u32>,
        a: u32,
        b: u32,
        variation: Xyz,
        rng: &mut dyn RngCore,
    ) -> u32 {
        let edge = TriangleEdge::new(a, b);
        if let Some(&index) = edge_map.get(&edge) {
            return index;
        }
        let mid = self.geometry.midpoint(
            self.vertices[a as usize].position,
            self.vertices[b as usize].position,
        );
        let position = self.geometry.perturb(mid, variation, rng);
        let index = self.add_vertex(Vertex::new(position));
        edge_map.insert(edge, index);
        index
    }

    /// Run `subdivisions` passes. The first `flat_subdivisions` passes use no
    /// perturbation; pass `s` after that uses `variation / 2^s`.
    pub fn multiple_subdivide(
        &mut self,
        subdivisions: u32,
        flat_subdivisions: u32,
        variation: Xyz,
        rng: &mut dyn RngCore,
        progress: &mut dyn Progress,
    ) {
        for s in 0..subdivisions {
            let v = if s < flat_subdivisions {
                Xyz::zero()
            } else {
                variation / (1u64 << s.min(63)) as f32
            };
            self.subdivide(v, s, subdivisions, rng, progress);
        }
    }

    /// Vertex positions as `glam` vectors, for renderers and exporters.
    pub fn positions(&self) -> Vec<glam::Vec3> {
        self.vertices.iter().map(|v| v.position.into()).collect()
    }

    /// Flat triangle index list.
    pub fn indices(&self) -> Vec<u32> {
        self.triangles.iter().flat_map(|t| t.vertex).collect()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;
    use crate::{FlatGeometry, NullProgress, SphericalGeometry};

    fn single_triangle() -> TriangleMesh {
        let mut mesh = TriangleMesh::new(Box::new(FlatGeometry));
        mesh.add_vertex(Vertex::new(Xyz::new(0.0, 0.0, 0.0)));
        mesh.add_vertex(Vertex::new(Xyz::new(1.0, 0.0, 0.0)));
        mesh.add_vertex(Vertex::new(Xyz::new(0.0, 1.0, 0.0)));
        mesh.add_triangle(Triangle::new(0, 1, 2));
        mesh
    }

    fn two_triangles() -> TriangleMesh {
        let mut mesh = single_triangle();
        mesh.add_vertex(Vertex::new(Xyz::new(1.0, 1.0, 0.0)));
        mesh.add_triangle(Triangle::new(2, 1, 3));
        mesh
    }

    fn edge_use_counts(mesh: &TriangleMesh) -> HashMap<TriangleEdge, usize> {
        let mut counts = HashMap::new();
        for t in &mesh.triangles {
            for k in 0..3 {
                let e = TriangleEdge::new(t.vertex[k], t.vertex[(k + 1) % 3]);
                *counts.entry(e).or_insert(0) += 1;
            }
        }
        counts
    }

    #[test]
    fn test_single_subdivision_counts() {
        let mut mesh = single_triangle();
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        mesh.subdivide(Xyz::zero(), 0, 1, &mut rng, &mut NullProgress);
        assert_eq!(mesh.vertex_count(), 6);
        assert_eq!(mesh.triangle_count(), 4);
    }

    #[test]
    fn test_subdivision_child_order() {
        let mut mesh = single_triangle();
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        mesh.subdivide(Xyz::zero(), 0, 1, &mut rng, &mut NullProgress);
        // Midpoints are created in edge order 01, 12, 20.
        assert_eq!(mesh.triangles[0], Triangle::new(0, 3, 5));
        assert_eq!(mesh.triangles[1], Triangle::new(3, 1, 4));
        assert_eq!(mesh.triangles[2], Triangle::new(5, 4, 2));
        assert_eq!(mesh.triangles[3], Triangle::new(3, 4, 5));
        assert_eq!(mesh.vertices[3].position, Xyz::new(0.5, 0.0, 0.0));
    }

    #[test]
    fn test_shared_edge_gets_one_midpoint() {
        let mut mesh = two_triangles();
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        mesh.subdivide(Xyz::zero(), 0, 1, &mut rng, &mut NullProgress);
        // 4 original + 5 distinct edges.
        assert_eq!(mesh.vertex_count(), 9);
        assert_eq!(mesh.triangle_count(), 8);
    }

    #[test]
    fn test_subdivision_is_watertight() {
        let mut mesh = two_triangles();
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        mesh.multiple_subdivide(3, 1, Xyz::new(0.0, 0.0, 0.1), &mut rng, &mut NullProgress);
        for (edge, count) in edge_use_counts(&mesh) {
            assert!(count <= 2, "edge {edge:?} used by {count} triangles");
        }
        let n = mesh.vertex_count() as u32;
        assert!(mesh.indices().iter().all(|&i| i < n));
    }

    #[test]
    fn test_flat_subdivisions_do_not_perturb() {
        let mut mesh = single_triangle();
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        mesh.multiple_subdivide(2, 2, Xyz::new(0.0, 0.0, 1.0), &mut rng, &mut NullProgress);
        assert!(mesh.vertices.iter().all(|v| v.position.z == 0.0));
    }

    #[test]
    fn test_perturbed_subdivision_is_deterministic() {
        let build = || {
            let mut mesh = single_triangle();
            let mut rng = ChaCha8Rng::seed_from_u64(99);
            mesh.multiple_subdivide(3, 0, Xyz::new(0.0, 0.0, 0.2), &mut rng, &mut NullProgress);
            mesh.positions()
        };
        assert_eq!(build(), build());
    }

    #[test]
    fn test_vertex_normals_of_flat_mesh_point_up() {
        let mut mesh = two_triangles();
        mesh.compute_vertex_normals(&mut NullProgress);
        for v in &mesh.vertices {
            assert!(v.normal.approx_eq(Xyz::unit_z(), 1e-6), "normal {}", v.normal);
        }
    }

    #[test]
    fn test_unused_vertex_has_zero_normal() {
        let mut mesh = single_triangle();
        mesh.add_vertex(Vertex::new(Xyz::new(5.0, 5.0, 5.0)));
        mesh.compute_vertex_normals(&mut NullProgress);
        assert_eq!(mesh.vertices[3].normal, Xyz::zero());
    }

    #[test]
    fn test_vertex_height_uses_geometry() {
        let mut mesh = TriangleMesh::new(Box::new(SphericalGeometry));
        mesh.add_vertex(Vertex::new(Xyz::new(2.0, 0.0, 0.0)));
        assert!((mesh.vertex_height(0) - 1.0).abs() < 1e-6);
        mesh.set_vertex_height(0, 0.25);
        assert!((mesh.vertices[0].position.x - 1.25).abs() < 1e-6);
    }

    #[test]
    fn test_colour_slot_switch() {
        let mut mesh = two_triangles();
        mesh.switch_colour = 1;
        assert_eq!(mesh.colour_slot_for_triangle(0), 0);
        assert_eq!(mesh.colour_slot_for_triangle(1), 1);
        assert_eq!(mesh.colour0_triangle_count(), 1);
        assert_eq!(mesh.colour1_triangle_count(), 1);
    }

    #[test]
    fn test_vertex_colour_slots_are_independent() {
        let mut mesh = single_triangle();
        let red = ByteRgba::rgb(255, 0, 0);
        mesh.set_vertex_colour(1, 1, red);
        mesh.set_vertex_emissive(1, 0, true);
        assert_eq!(mesh.vertices[1].colour[1], red);
        assert_ne!(mesh.vertices[1].colour[0], red);
        assert_eq!(mesh.vertices[1].emissive, [true, false]);
        assert_eq!(mesh.vertices[0].emissive, [false, false]);
    }
}
