//! Assigns every cloud vertex a destination on the pattern silhouette.
//!
//! The silhouette is resampled to one candidate point per vertex. A walk over the cloud graph
//! from vertex 0 then hands each newly reached neighbor the globally nearest unclaimed
//! candidate to its parent's candidate, so graph neighbors end up near each other on the
//! silhouette. The walk runs on an explicit stack: the first unvisited neighbor of a branch
//! continues that branch in place, every other neighbor opens a sub-branch that completes
//! before the parent looks at its next neighbor.

use crate::{
    cloud::builder::{EdgeRef, PointCloud},
    foundation::error::WireResult,
    linalg::matrix::Matrix,
    linalg::vector::{Vector2F, Vector3F},
    pattern::silhouette::Silhouette,
    scene::config::PatternTarget,
};

/// Result of one correspondence solve.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Correspondence {
    /// Destination per vertex; `None` for vertices unreachable from vertex 0.
    pub destinations: Vec<Option<Vector3F>>,
    /// Index into the condensed candidate list claimed by each vertex.
    pub assignments: Vec<Option<usize>>,
    /// Edge table with implausibly long destination edges collapsed to self-pairs.
    pub dest_edges: Vec<EdgeRef>,
}

/// Maps normalized silhouette coordinates into world space in front of the camera.
#[derive(Clone, Copy, Debug)]
pub struct PatternProjector<'a> {
    pub centroid: Vector2F,
    pub inv_rotate: &'a Matrix,
    pub dimensions: f32,
    pub offset: Vector3F,
}

impl<'a> PatternProjector<'a> {
    pub fn new(centroid: Vector2F, inv_rotate: &'a Matrix, target: &PatternTarget) -> Self {
        Self {
            centroid,
            inv_rotate,
            dimensions: target.dimensions,
            offset: target.offset,
        }
    }

    /// Recenter on the centroid, flip Y (image rows grow downward), rotate, scale, translate.
    pub fn to_world(&self, uv: Vector2F) -> WireResult<Vector3F> {
        let p = uv - self.centroid;
        let v = self.inv_rotate.transform_row4([p.x, -p.y, 0.0, 1.0])?;
        Ok(Vector3F::from_homogeneous_xyz(v) * self.dimensions + self.offset)
    }
}

#[tracing::instrument(skip_all, fields(vertices = cloud.len(), pattern_points = silhouette.len()))]
pub fn solve(
    cloud: &PointCloud,
    silhouette: &Silhouette,
    projector: &PatternProjector<'_>,
    max_connect_distance: f32,
) -> WireResult<Correspondence> {
    if silhouette.is_empty() || cloud.is_empty() {
        return Ok(Correspondence {
            destinations: cloud.vertices().iter().copied().map(Some).collect(),
            assignments: vec![None; cloud.len()],
            dest_edges: cloud.edges().to_vec(),
        });
    }

    let condensed = condense(silhouette.points(), cloud.len());
    let adjacency = cloud.adjacency();
    let mut walker = Walker::new(&adjacency, &condensed);
    walker.walk(0, 0);

    let destinations = walker
        .assignment
        .iter()
        .map(|slot| slot.map(|pt| projector.to_world(condensed[pt])).transpose())
        .collect::<WireResult<Vec<_>>>()?;

    let dest_edges = prune_edges(cloud.edges(), &destinations, max_connect_distance);

    let unreached = destinations.iter().filter(|d| d.is_none()).count();
    let severed = dest_edges.iter().filter(|e| e.is_collapsed()).count();
    tracing::debug!(unreached, severed, "correspondence solved");

    Ok(Correspondence {
        destinations,
        assignments: walker.assignment,
        dest_edges,
    })
}

/// Resample `points` to exactly `count` candidates at a uniform stride (at least 1).
///
/// A silhouette with fewer points than `count` wraps around.
pub fn condense(points: &[Vector2F], count: usize) -> Vec<Vector2F> {
    if points.is_empty() {
        return Vec::new();
    }
    let stride = (points.len() as f32 / count as f32).max(1.0);
    let mut f = 0.0f32;
    (0..count)
        .map(|_| {
            let idx = (f as usize) % points.len();
            f += stride;
            points[idx]
        })
        .collect()
}

/// Collapse edges whose destination endpoints are farther apart than `max_distance`.
pub fn prune_edges(
    edges: &[EdgeRef],
    destinations: &[Option<Vector3F>],
    max_distance: f32,
) -> Vec<EdgeRef> {
    edges
        .iter()
        .map(|&e| match (destinations[e.a], destinations[e.b]) {
            (Some(a), Some(b)) if a.distance(b) > max_distance => e.collapsed(),
            _ => e,
        })
        .collect()
}

struct Branch {
    vertex: usize,
    /// Candidate the neighbors of `vertex` are matched against.
    target: usize,
    cursor: usize,
    first_slot: Option<usize>,
    /// Neighbor slot and candidate the branch continues with once its neighbors are done.
    continuation: Option<(usize, usize)>,
    claimed_any: bool,
}

impl Branch {
    fn new(vertex: usize, target: usize) -> Self {
        Self {
            vertex,
            target,
            cursor: 0,
            first_slot: None,
            continuation: None,
            claimed_any: false,
        }
    }
}

enum Step {
    Stay,
    Descend(Branch),
    Done,
}

struct Walker<'a> {
    adjacency: &'a [Vec<usize>],
    condensed: &'a [Vector2F],
    visited: Vec<bool>,
    claimed: Vec<bool>,
    assignment: Vec<Option<usize>>,
}

impl<'a> Walker<'a> {
    fn new(adjacency: &'a [Vec<usize>], condensed: &'a [Vector2F]) -> Self {
        Self {
            adjacency,
            condensed,
            visited: vec![false; adjacency.len()],
            claimed: vec![false; condensed.len()],
            assignment: vec![None; adjacency.len()],
        }
    }

    fn walk(&mut self, root: usize, root_target: usize) {
        self.claim(root, root_target);
        let mut stack = vec![Branch::new(root, root_target)];
        while let Some(branch) = stack.last_mut() {
            match self.step(branch) {
                Step::Stay => {}
                Step::Descend(sub) => stack.push(sub),
                Step::Done => {
                    stack.pop();
                }
            }
        }
    }

    fn step(&mut self, branch: &mut Branch) -> Step {
        let adjacency = self.adjacency;
        let neighbors = &adjacency[branch.vertex];

        let Some(&n) = neighbors.get(branch.cursor) else {
            return match (branch.claimed_any, branch.continuation) {
                (true, Some((slot, target))) => {
                    *branch = Branch::new(neighbors[slot], target);
                    Step::Stay
                }
                _ => Step::Done,
            };
        };

        let slot = branch.cursor;
        branch.cursor += 1;
        if self.visited[n] {
            return Step::Stay;
        }

        let first = *branch.first_slot.get_or_insert(slot);
        let Some(pt) = self.nearest_unclaimed(self.condensed[branch.target]) else {
            return Step::Stay;
        };
        self.claim(n, pt);
        branch.claimed_any = true;

        if slot == first {
            branch.continuation = Some((slot, pt));
            Step::Stay
        } else {
            Step::Descend(Branch::new(n, pt))
        }
    }

    fn claim(&mut self, vertex: usize, pt: usize) {
        self.visited[vertex] = true;
        self.claimed[pt] = true;
        self.assignment[vertex] = Some(pt);
    }

    /// First unclaimed candidate at minimal distance from `from`.
    fn nearest_unclaimed(&self, from: Vector2F) -> Option<usize> {
        let mut best: Option<(usize, f32)> = None;
        for (i, p) in self.condensed.iter().enumerate() {
            if self.claimed[i] {
                continue;
            }
            let d = p.distance(from);
            if best.is_none_or(|(_, bd)| d < bd) {
                best = Some((i, d));
            }
        }
        best.map(|(i, _)| i)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/morph/correspondence.rs"]
mod tests;
