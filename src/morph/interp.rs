use crate::{
    cloud::builder::{EdgeRef, PointCloud},
    linalg::edge::Edge,
    linalg::vector::Vector3F,
    morph::correspondence::Correspondence,
};

/// Per-frame morph state between the source cloud and its silhouette destinations.
///
/// `None` marks a vertex without a destination; edges touching one are `None` too and are
/// skipped by the renderer.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MorphState {
    destinations: Vec<Option<Vector3F>>,
    dest_edges: Vec<EdgeRef>,
    current: Vec<Option<Vector3F>>,
    current_edges: Vec<Option<Edge>>,
}

impl MorphState {
    /// Every destination equals its source; current geometry is the source geometry.
    pub fn identity(cloud: &PointCloud) -> Self {
        let destinations: Vec<_> = cloud.vertices().iter().copied().map(Some).collect();
        let current_edges = cloud
            .edges()
            .iter()
            .map(|&e| edge_at(&destinations, e))
            .collect();
        Self {
            current: destinations.clone(),
            destinations,
            dest_edges: cloud.edges().to_vec(),
            current_edges,
        }
    }

    pub fn apply(&mut self, c: Correspondence) {
        self.destinations = c.destinations;
        self.dest_edges = c.dest_edges;
    }

    /// Copy the source geometry into the current buffers unchanged.
    pub fn reset_to_source(&mut self, cloud: &PointCloud) {
        let src = cloud.vertices();
        self.current.clear();
        self.current.extend(src.iter().copied().map(Some));
        self.current_edges.clear();
        self.current_edges
            .extend(cloud.edges().iter().map(|e| Some(Edge::new(src[e.a], src[e.b]))));
    }

    /// Interpolate vertices by `vertex_fraction` and edges by `edge_fraction`, both clamped to
    /// `[0, 1]`.
    ///
    /// Both the source-table and the destination-table edge are read from the interpolated
    /// positions, then blended by the edge fraction. A collapsed destination entry therefore
    /// shrinks its edge to a point instead of dropping it.
    pub fn lerp(&mut self, cloud: &PointCloud, vertex_fraction: f32, edge_fraction: f32) {
        let vf = vertex_fraction.clamp(0.0, 1.0);
        let ef = edge_fraction.clamp(0.0, 1.0);
        let src = cloud.vertices();

        self.current.clear();
        self.current.extend(
            src.iter()
                .zip(&self.destinations)
                .map(|(&s, d)| d.map(|d| s.lerp(d, vf))),
        );

        self.current_edges.clear();
        for (&from, &to) in cloud.edges().iter().zip(&self.dest_edges) {
            let edge = edge_at(&self.current, from)
                .zip(edge_at(&self.current, to))
                .map(|(a, b)| a.lerp(b, ef));
            self.current_edges.push(edge);
        }
    }

    pub fn destinations(&self) -> &[Option<Vector3F>] {
        &self.destinations
    }

    pub fn dest_edges(&self) -> &[EdgeRef] {
        &self.dest_edges
    }

    pub fn current(&self) -> &[Option<Vector3F>] {
        &self.current
    }

    pub fn current_edges(&self) -> &[Option<Edge>] {
        &self.current_edges
    }
}

fn edge_at(positions: &[Option<Vector3F>], e: EdgeRef) -> Option<Edge> {
    Some(Edge::new(positions[e.a]?, positions[e.b]?))
}

#[cfg(test)]
#[path = "../../tests/unit/morph/interp.rs"]
mod tests;
