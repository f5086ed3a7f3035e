//! Seeded point-cloud generation and sparse nearest-neighbor graph construction.

use rayon::prelude::*;
use smallvec::SmallVec;

use crate::{
    foundation::error::{WireError, WireResult},
    foundation::math::map_range,
    foundation::rng::Rng64,
    linalg::vector::Vector3F,
    scene::config::{BoundingBox, SceneConfig},
};

/// Undirected connection between two vertex indices.
///
/// A pair with `a == b` is a collapsed edge and is never drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct EdgeRef {
    pub a: usize,
    pub b: usize,
}

impl EdgeRef {
    pub const fn new(a: usize, b: usize) -> Self {
        Self { a, b }
    }

    /// Self-pair on the first endpoint.
    pub fn collapsed(self) -> Self {
        Self::new(self.a, self.a)
    }

    pub fn is_collapsed(self) -> bool {
        self.a == self.b
    }

    pub fn touches(self, v: usize) -> bool {
        self.a == v || self.b == v
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CloudParams {
    pub point_count: usize,
    pub bounds: BoundingBox,
    pub seed: u64,
    pub neighbor_count: usize,
    pub max_connect_distance: f32,
}

impl From<&SceneConfig> for CloudParams {
    fn from(cfg: &SceneConfig) -> Self {
        Self {
            point_count: cfg.point_count,
            bounds: cfg.bounds,
            seed: cfg.seed,
            neighbor_count: cfg.neighbor_count,
            max_connect_distance: cfg.max_connect_distance,
        }
    }
}

/// Immutable vertex set plus edge table, built once per run.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PointCloud {
    vertices: Vec<Vector3F>,
    edges: Vec<EdgeRef>,
}

impl PointCloud {
    #[tracing::instrument(skip(params), fields(points = params.point_count, k = params.neighbor_count))]
    pub fn generate(params: &CloudParams) -> Self {
        let mut rng = Rng64::new(params.seed);
        let vertices = sample_vertices(&mut rng, params.point_count, &params.bounds);

        let neighbor_lists: Vec<SmallVec<[usize; 8]>> = (0..vertices.len())
            .into_par_iter()
            .map(|i| nearest_neighbors(&vertices, i, params.neighbor_count))
            .collect();

        let per_vertex = params.neighbor_count.min(vertices.len().saturating_sub(1));
        let mut edges = Vec::with_capacity(vertices.len().saturating_mul(per_vertex));
        for (i, neighbors) in neighbor_lists.iter().enumerate() {
            for &j in neighbors {
                if vertices[i].distance(vertices[j]) < params.max_connect_distance {
                    edges.push(EdgeRef::new(i, j));
                }
            }
        }

        tracing::debug!(vertices = vertices.len(), edges = edges.len(), "point cloud built");
        Self { vertices, edges }
    }

    /// Build from explicit parts; every edge must reference an existing vertex.
    pub fn from_parts(vertices: Vec<Vector3F>, edges: Vec<EdgeRef>) -> WireResult<Self> {
        if let Some(bad) = edges
            .iter()
            .find(|e| e.a >= vertices.len() || e.b >= vertices.len())
        {
            return Err(WireError::validation(format!(
                "edge ({}, {}) references a vertex outside 0..{}",
                bad.a,
                bad.b,
                vertices.len()
            )));
        }
        Ok(Self { vertices, edges })
    }

    pub fn vertices(&self) -> &[Vector3F] {
        &self.vertices
    }

    pub fn edges(&self) -> &[EdgeRef] {
        &self.edges
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Neighbor lists in edge-table order. A pair listed twice yields the neighbor twice.
    pub fn adjacency(&self) -> Vec<Vec<usize>> {
        let mut adj = vec![Vec::new(); self.vertices.len()];
        for e in &self.edges {
            if e.is_collapsed() {
                adj[e.a].push(e.a);
                continue;
            }
            adj[e.a].push(e.b);
            adj[e.b].push(e.a);
        }
        adj
    }
}

fn sample_vertices(rng: &mut Rng64, count: usize, bounds: &BoundingBox) -> Vec<Vector3F> {
    let mut axis = |min: f32, max: f32| {
        let g = rng.gaussian_within_one_sigma();
        // keep rounding inside the box
        map_range(g, -1.0, 1.0, min, max).clamp(min, max)
    };

    (0..count)
        .map(|_| {
            let x = axis(bounds.min.x, bounds.max.x);
            let y = axis(bounds.min.y, bounds.max.y);
            let z = axis(bounds.min.z, bounds.max.z);
            Vector3F::new(x, y, z)
        })
        .collect()
}

/// Indices of the `k` vertices closest to `vertices[i]`, nearest first.
///
/// Each round scans for the closest candidate not yet taken; ties go to the lower index.
/// Fewer than `k` are returned when the cloud runs out of other vertices.
fn nearest_neighbors(vertices: &[Vector3F], i: usize, k: usize) -> SmallVec<[usize; 8]> {
    let origin = vertices[i];
    let mut taken: SmallVec<[usize; 8]> = SmallVec::new();

    while taken.len() < k {
        let mut best: Option<(usize, f32)> = None;
        for (j, v) in vertices.iter().enumerate() {
            if j == i || taken.contains(&j) {
                continue;
            }
            let d = origin.distance(*v);
            if best.is_none_or(|(_, bd)| d < bd) {
                best = Some((j, d));
            }
        }
        match best {
            Some((j, _)) => taken.push(j),
            None => break,
        }
    }
    taken
}

#[cfg(test)]
#[path = "../../tests/unit/cloud/builder.rs"]
mod tests;
