//! River and lake generation by flooding over mesh topology.
//!
//! Each river starts at a random land vertex and grows a set of "current"
//! vertices that all share one water level. At each step the lowest
//! neighbour of the set decides what happens:
//!
//! - strictly lower than the level: the water flows there and the set
//!   collapses to that single vertex;
//! - level within the geometry epsilon: neighbours on that shelf join the
//!   set (a lake spreads);
//! - higher: the level rises to just above that neighbour, which joins the
//!   set, and every earlier river vertex below the new level is flooded
//!   back into the lake.
//!
//! A river stops when it reaches the sea, grows into an inland sea, runs out
//! of neighbours, or runs into an earlier river. Rivers are generated one at
//! a time, in order, so which river wins a merge is deterministic.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use terra_mesh::{Progress, ProgressCounter};

use crate::params::TerrainParameters;
use crate::terrain::Terrain;

/// Lake growth, in vertices, between two stall reports.
const PROGRESS_STALL: usize = 100;

/// A vertex height usable as an ordered map key.
#[derive(Clone, Copy, Debug)]
struct HeightKey(f32);

impl PartialEq for HeightKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for HeightKey {}

impl PartialOrd for HeightKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HeightKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

/// Vertices bucketed by height, in insertion order within a bucket.
#[derive(Debug, Default)]
struct HeightBuckets {
    map: BTreeMap<HeightKey, Vec<u32>>,
}

impl HeightBuckets {
    fn insert(&mut self, height: f32, vertex: u32) {
        self.map.entry(HeightKey(height)).or_default().push(vertex);
    }

    /// Lowest height and the first vertex stored under it.
    fn first(&self) -> Option<(f32, Option<u32>)> {
        self.map
            .first_key_value()
            .map(|(k, list)| (k.0, list.first().copied()))
    }

    /// Buckets strictly below `height`.
    fn below(&self, height: f32) -> impl Iterator<Item = &Vec<u32>> {
        self.map.range(..HeightKey(height)).map(|(_, list)| list)
    }

    /// Empty every bucket strictly below `height`, returning their contents.
    fn drain_below(&mut self, height: f32) -> Vec<u32> {
        let mut drained = Vec::new();
        for (_, list) in self.map.range_mut(..HeightKey(height)) {
            drained.append(list);
        }
        drained
    }
}

/// Why a single river stopped growing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RiverOutcome {
    /// The start vertex was already sea; nothing was generated.
    StartedInSea,
    ReachedSea,
    /// The lake grew to the inland-sea size limit.
    InlandSea,
    /// Joined a river generated earlier.
    MergedWithRiver,
    /// No unvisited neighbours were left.
    DeadEnd,
}

/// Per-pass topology shared by every river.
struct RiverContext {
    neighbours: Vec<BTreeSet<u32>>,
    is_sea: Vec<bool>,
    max_lake_size: usize,
    epsilon: f32,
}

impl Terrain {
    /// Generate `params.rivers` rivers in order from `params.rivers_seed`.
    ///
    /// Only land triangles contribute to the neighbour graph; any vertex of
    /// a sea triangle counts as sea.
    pub fn apply_rivers(&mut self, params: &TerrainParameters, progress: &mut dyn Progress) {
        if params.rivers == 0 {
            return;
        }
        let mut rng = ChaCha8Rng::seed_from_u64(params.rivers_seed);

        let mut counter = ProgressCounter::new(self.mesh.triangle_count());
        progress.progress_start(ProgressCounter::HUNDRED_PERCENT, "River preparation");
        let context = RiverContext {
            neighbours: self.river_neighbours(&mut counter, progress),
            is_sea: self.river_sea_vertices(&mut counter, progress),
            max_lake_size: (self.mesh.vertex_count() as f32 * params.lake_becomes_sea) as usize,
            epsilon: self.mesh.geometry().epsilon(),
        };
        progress.progress_complete("River preparation completed");

        let mut counter = ProgressCounter::new(params.rivers as usize);
        progress.progress_start(ProgressCounter::HUNDRED_PERCENT, "Rivers");
        for r in 0..params.rivers {
            counter.step(progress);
            let outcome = self.grow_river(r, &mut rng, &context, progress);
            tracing::trace!("River {r}: {outcome:?}");
        }
        progress.progress_complete("Rivers completed");
    }

    fn river_neighbours(
        &self,
        counter: &mut ProgressCounter,
        progress: &mut dyn Progress,
    ) -> Vec<BTreeSet<u32>> {
        let mut neighbours = vec![BTreeSet::new(); self.mesh.vertex_count()];
        for t in &self.mesh.triangles[..self.mesh.colour0_triangle_count()] {
            counter.step(progress);
            let [a, b, c] = t.vertex;
            for (v, n0, n1) in [(a, b, c), (b, a, c), (c, a, b)] {
                let set = &mut neighbours[v as usize];
                set.insert(n0);
                set.insert(n1);
            }
        }
        neighbours
    }

    fn river_sea_vertices(
        &self,
        counter: &mut ProgressCounter,
        progress: &mut dyn Progress,
    ) -> Vec<bool> {
        let mut is_sea = vec![false; self.mesh.vertex_count()];
        for t in &self.mesh.triangles[self.mesh.colour0_triangle_count()..] {
            counter.step(progress);
            for v in t.vertex {
                is_sea[v as usize] = true;
            }
        }
        is_sea
    }

    fn grow_river(
        &mut self,
        r: u32,
        rng: &mut ChaCha8Rng,
        context: &RiverContext,
        progress: &mut dyn Progress,
    ) -> RiverOutcome {
        let vertex_count = self.mesh.vertex_count();
        if vertex_count == 0 {
            return RiverOutcome::DeadEnd;
        }
        let source = rng.random_range(0..vertex_count) as u32;
        if context.is_sea[source as usize] {
            return RiverOutcome::StartedInSea;
        }
        self.flood_from(r, source, context, progress)
    }

    fn flood_from(
        &mut self,
        r: u32,
        source: u32,
        context: &RiverContext,
        progress: &mut dyn Progress,
    ) -> RiverOutcome {
        let epsilon = context.epsilon;
        let mut last_stall_warning = 0;
        let mut visited = BTreeSet::new();
        let mut visited_by_height = HeightBuckets::default();
        let mut current = BTreeSet::from([source]);
        let mut current_height = self.mesh.vertex_height(source as usize);

        let outcome = loop {
            let mut reached_sea = false;
            let mut frontier = BTreeSet::new();
            for &v in &current {
                visited.insert(v);
                visited_by_height.insert(current_height, v);
                reached_sea |= context.is_sea[v as usize];
                frontier.extend(
                    context.neighbours[v as usize]
                        .iter()
                        .filter(|n| !current.contains(*n)),
                );
            }

            let mut candidates = HeightBuckets::default();
            for &v in &frontier {
                candidates.insert(self.mesh.vertex_height(v as usize), v);
            }

            if reached_sea {
                break RiverOutcome::ReachedSea;
            }
            if current.len() >= context.max_lake_size {
                tracing::debug!("River {r} is now an inland sea");
                break RiverOutcome::InlandSea;
            }
            if current.iter().any(|v| self.river_vertices.contains(v)) {
                break RiverOutcome::MergedWithRiver;
            }

            let Some((lowest, Some(lowest_vertex))) = candidates.first() else {
                tracing::debug!("River {r} filled an enclosed island with no outlet");
                break RiverOutcome::DeadEnd;
            };

            let lake_size = if lowest < current_height - epsilon {
                // Downhill: the water leaves the current pool.
                current.clear();
                current.insert(lowest_vertex);
                current_height = lowest;
                1
            } else if lowest < current_height + epsilon {
                // Flat shelf: spread over every neighbour at this level.
                for list in candidates.below(current_height + epsilon) {
                    current.extend(list.iter().copied());
                }
                current.len()
            } else {
                // Enclosed: raise the level over the lowest neighbour.
                current_height = lowest + epsilon;
                current.insert(lowest_vertex);
                for v in visited_by_height.drain_below(current_height) {
                    current.insert(v);
                }
                for &v in &current {
                    self.mesh.set_vertex_height(v as usize, current_height);
                }
                current.len()
            };

            if lake_size >= last_stall_warning + PROGRESS_STALL {
                progress.progress_stall(&format!("Rivers (delay: {lake_size} vertex lake)"));
                last_stall_warning = lake_size;
            } else if lake_size + PROGRESS_STALL <= last_stall_warning {
                progress.progress_stall("Rivers: lake complete");
                last_stall_warning = lake_size;
            }
        };

        self.river_vertices.extend(visited);
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use terra_math::Xyz;
    use terra_mesh::{
        FlatGeometry, NullProgress, SphericalGeometry, Triangle, TriangleMesh, Vertex, icosahedron,
    };

    fn planet(seed: u64, subdivisions: u32) -> Terrain {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut mesh = icosahedron(Box::new(SphericalGeometry), 1.0);
        mesh.multiple_subdivide(
            subdivisions,
            1,
            Xyz::new(0.0, 0.0, 0.12),
            &mut rng,
            &mut NullProgress,
        );
        let mut terrain = Terrain::new(mesh);
        terrain.apply_sea_level(&mut NullProgress);
        terrain
    }

    /// A valley on flat geometry: a floor of even vertices at the given
    /// heights, walled by odd vertices 5 units higher. The last floor
    /// vertex and its wall are sea.
    fn valley(heights: &[f32], max_lake_size: usize) -> (Terrain, RiverContext) {
        let mut mesh = TriangleMesh::new(Box::new(FlatGeometry));
        for (i, &h) in heights.iter().enumerate() {
            mesh.add_vertex(Vertex::new(Xyz::new(i as f32, 0.0, h)));
            mesh.add_vertex(Vertex::new(Xyz::new(i as f32, 1.0, h + 5.0)));
        }
        for i in 0..heights.len() as u32 - 1 {
            let (a, b, c, d) = (2 * i, 2 * i + 1, 2 * i + 2, 2 * i + 3);
            mesh.add_triangle(Triangle::new(a, c, b));
            mesh.add_triangle(Triangle::new(b, c, d));
        }
        let mut terrain = Terrain::new(mesh);
        terrain.apply_sea_level(&mut NullProgress);

        let vertex_count = terrain.mesh().vertex_count();
        let mut is_sea = vec![false; vertex_count];
        is_sea[vertex_count - 2] = true;
        is_sea[vertex_count - 1] = true;
        let mut counter = ProgressCounter::new(terrain.mesh().triangle_count());
        let context = RiverContext {
            neighbours: terrain.river_neighbours(&mut counter, &mut NullProgress),
            is_sea,
            max_lake_size,
            epsilon: 0.0,
        };
        (terrain, context)
    }

    #[test]
    fn test_height_buckets_order_and_drain() {
        let mut buckets = HeightBuckets::default();
        buckets.insert(0.5, 1);
        buckets.insert(0.2, 7);
        buckets.insert(0.2, 3);
        buckets.insert(0.9, 4);
        assert_eq!(buckets.first(), Some((0.2, Some(7))));
        assert_eq!(buckets.below(0.5).count(), 1);
        let drained = buckets.drain_below(0.6);
        assert_eq!(drained, vec![7, 3, 1]);
        // Emptied buckets keep their keys.
        assert_eq!(buckets.first(), Some((0.2, None)));
    }

    #[test]
    fn test_rivers_terminate_for_many_seeds() {
        for seed in 0..12 {
            let mut terrain = planet(seed, 3);
            let params = TerrainParameters {
                rivers: 20,
                rivers_seed: seed,
                ..Default::default()
            };
            terrain.apply_rivers(&params, &mut NullProgress);
            let n = terrain.mesh().vertex_count() as u32;
            assert!(terrain.river_vertices().iter().all(|&v| v < n));
        }
    }

    #[test]
    fn test_rivers_are_deterministic() {
        let params = TerrainParameters {
            rivers: 15,
            rivers_seed: 42,
            ..Default::default()
        };
        let run = || {
            let mut terrain = planet(5, 3);
            terrain.apply_rivers(&params, &mut NullProgress);
            (terrain.river_vertices().clone(), terrain.mesh().positions())
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn test_rivers_do_not_touch_partition() {
        let mut terrain = planet(2, 3);
        let switch_colour = terrain.mesh().switch_colour;
        let triangles = terrain.mesh().triangles.clone();
        let params = TerrainParameters {
            rivers: 25,
            rivers_seed: 8,
            ..Default::default()
        };
        terrain.apply_rivers(&params, &mut NullProgress);
        assert_eq!(switch_colour, terrain.mesh().switch_colour);
        assert_eq!(triangles, terrain.mesh().triangles);
    }

    #[test]
    fn test_downhill_river_reaches_sea() {
        let (mut terrain, context) = valley(&[0.4, 0.3, 0.2, 0.1, 0.0], 10);
        let outcome = terrain.flood_from(0, 0, &context, &mut NullProgress);
        assert_eq!(outcome, RiverOutcome::ReachedSea);
        let expected: BTreeSet<u32> = [0, 2, 4, 6, 8].into();
        assert_eq!(terrain.river_vertices(), &expected);
    }

    #[test]
    fn test_pit_fills_into_lake() {
        // Floor vertex 4 is a pit; the lake must rise to spill towards 8.
        let (mut terrain, context) = valley(&[0.5, 0.3, 0.1, 0.35, 0.2, 0.0], 12);
        let outcome = terrain.flood_from(0, 0, &context, &mut NullProgress);
        assert_eq!(outcome, RiverOutcome::ReachedSea);
        let pit = terrain.mesh().vertex_height(4);
        assert!(pit >= 0.35, "pit height {pit}");
        assert_eq!(terrain.mesh().vertex_height(2), pit);
        assert!(terrain.river_vertices().contains(&6));
    }

    #[test]
    fn test_second_river_merges() {
        let (mut terrain, context) = valley(&[0.5, 0.4, 0.3, 0.2, 0.1, 0.0], 12);
        terrain.river_vertices.extend([4, 6, 8]);
        let outcome = terrain.flood_from(1, 0, &context, &mut NullProgress);
        assert_eq!(outcome, RiverOutcome::MergedWithRiver);
        assert!(terrain.river_vertices().contains(&2));
    }

    #[test]
    fn test_lake_becomes_inland_sea() {
        let (mut terrain, context) = valley(&[0.5, 0.3, 0.1, 0.35, 0.2, 0.0], 3);
        let outcome = terrain.flood_from(0, 0, &context, &mut NullProgress);
        assert_eq!(outcome, RiverOutcome::InlandSea);
        for v in [0, 2, 4, 6] {
            assert!(terrain.river_vertices().contains(&v), "lake vertex {v} missing");
        }
    }

    #[test]
    fn test_isolated_island_is_dead_end() {
        let mut mesh = TriangleMesh::new(Box::new(FlatGeometry));
        for (i, h) in [0.3, 0.2, 0.1].into_iter().enumerate() {
            mesh.add_vertex(Vertex::new(Xyz::new(i as f32, (i % 2) as f32, h)));
        }
        mesh.add_triangle(Triangle::new(0, 1, 2));
        let mut terrain = Terrain::new(mesh);
        terrain.apply_sea_level(&mut NullProgress);
        let mut counter = ProgressCounter::new(terrain.mesh().triangle_count());
        let context = RiverContext {
            neighbours: terrain.river_neighbours(&mut counter, &mut NullProgress),
            is_sea: vec![false; 3],
            max_lake_size: 100,
            epsilon: 0.0,
        };

        let outcome = terrain.flood_from(0, 0, &context, &mut NullProgress);
        assert_eq!(outcome, RiverOutcome::DeadEnd);
        let expected: BTreeSet<u32> = [0, 1, 2].into();
        assert_eq!(terrain.river_vertices(), &expected);
        // The lake filled the whole island up to its highest vertex.
        for v in 0..3 {
            let h = terrain.mesh().vertex_height(v);
            assert_eq!(h, 0.3, "vertex {v} height {h}");
        }
    }

    #[test]
    fn test_sea_start_generates_nothing() {
        // Half of the four vertices are sea.
        let (mut terrain, context) = valley(&[0.4, 0.0], 10);
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let outcomes: Vec<RiverOutcome> = (0..32)
            .map(|r| terrain.grow_river(r, &mut rng, &context, &mut NullProgress))
            .collect();
        assert!(outcomes.contains(&RiverOutcome::StartedInSea));
        assert!(!outcomes.contains(&RiverOutcome::DeadEnd));
    }
}
