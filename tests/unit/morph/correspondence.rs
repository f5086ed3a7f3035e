use super::*;
use crate::cloud::builder::CloudParams;
use crate::pattern::mask::PatternMask;
use crate::scene::config::BoundingBox;

fn projector(centroid: Vector2F, inv: &Matrix) -> PatternProjector<'_> {
    PatternProjector {
        centroid,
        inv_rotate: inv,
        dimensions: 1.0,
        offset: Vector3F::ZERO,
    }
}

fn line_cloud(n: usize, edges: &[(usize, usize)]) -> PointCloud {
    let vertices = (0..n).map(|i| Vector3F::new(i as f32, 0.0, 0.0)).collect();
    let edges = edges.iter().map(|&(a, b)| EdgeRef::new(a, b)).collect();
    PointCloud::from_parts(vertices, edges).unwrap()
}

fn bar(len: usize) -> Silhouette {
    let row = "#".repeat(len);
    Silhouette::from_mask(&PatternMask::from_ascii(&[row.as_str()]).unwrap())
}

#[test]
fn condense_strides_through_larger_silhouettes() {
    let pts: Vec<_> = (0..10).map(|i| Vector2F::new(i as f32, 0.0)).collect();
    let xs: Vec<f32> = condense(&pts, 5).iter().map(|p| p.x).collect();
    assert_eq!(xs, vec![0.0, 2.0, 4.0, 6.0, 8.0]);
}

#[test]
fn condense_wraps_short_silhouettes() {
    let pts: Vec<_> = (0..3).map(|i| Vector2F::new(i as f32, 0.0)).collect();
    let xs: Vec<f32> = condense(&pts, 5).iter().map(|p| p.x).collect();
    assert_eq!(xs, vec![0.0, 1.0, 2.0, 0.0, 1.0]);
    assert!(condense(&[], 4).is_empty());
}

#[test]
fn chain_walks_candidates_in_order() {
    let cloud = line_cloud(3, &[(0, 1), (1, 2)]);
    let sil = bar(3);
    let inv = Matrix::identity(4);
    let c = solve(&cloud, &sil, &projector(sil.centroid(), &inv), f32::MAX).unwrap();

    assert_eq!(c.assignments, vec![Some(0), Some(1), Some(2)]);
    let d0 = c.destinations[0].unwrap();
    assert!((d0.x + 1.0 / 3.0).abs() < 1e-6);
    assert_eq!(d0.y, 0.0);
    assert_eq!(d0.z, 0.0);
}

#[test]
fn star_leaves_take_nearest_candidates_in_adjacency_order() {
    let cloud = line_cloud(5, &[(0, 3), (0, 1), (0, 4), (0, 2)]);
    let sil = bar(5);
    let inv = Matrix::identity(4);
    let c = solve(&cloud, &sil, &projector(sil.centroid(), &inv), f32::MAX).unwrap();

    // neighbor order of vertex 0 is 3, 1, 4, 2
    assert_eq!(
        c.assignments,
        vec![Some(0), Some(2), Some(4), Some(1), Some(3)]
    );
}

#[test]
fn sub_branch_finishes_before_the_next_sibling() {
    // vertex 2's neighbors 4 and 5 claim candidates 3 and 4 before vertex 0 reaches vertex 3
    let cloud = line_cloud(6, &[(0, 1), (0, 2), (0, 3), (2, 4), (2, 5)]);
    let sil = bar(6);
    let inv = Matrix::identity(4);
    let c = solve(&cloud, &sil, &projector(sil.centroid(), &inv), f32::MAX).unwrap();

    assert_eq!(
        c.assignments,
        vec![Some(0), Some(1), Some(2), Some(5), Some(3), Some(4)]
    );
}

/// Depth-first walk written as plain recursion.
fn visit_recursive(w: &mut Walker<'_>, vertex: usize, target: usize) {
    let mut first_slot = None;
    let mut continuation = None;
    let mut claimed_any = false;
    let adjacency = w.adjacency;
    for (slot, &n) in adjacency[vertex].iter().enumerate() {
        if w.visited[n] {
            continue;
        }
        let first = *first_slot.get_or_insert(slot);
        let Some(pt) = w.nearest_unclaimed(w.condensed[target]) else {
            continue;
        };
        w.claim(n, pt);
        claimed_any = true;
        if slot == first {
            continuation = Some((n, pt));
        } else {
            visit_recursive(w, n, pt);
        }
    }
    if let (true, Some((n, pt))) = (claimed_any, continuation) {
        visit_recursive(w, n, pt);
    }
}

#[test]
fn stack_walk_matches_recursive_walk_on_generated_clouds() {
    let mask = PatternMask::from_fn(40, 30, |x, y| (x + y) % 3 != 0 && x > 4 && y < 26);
    let sil = Silhouette::from_mask(&mask);
    let inv = Matrix::identity(4);

    for seed in [1, 9, 23, 77, 512] {
        let cloud = PointCloud::generate(&CloudParams {
            point_count: 250,
            bounds: BoundingBox::default(),
            seed,
            neighbor_count: 3,
            max_connect_distance: 50.0,
        });
        let c = solve(&cloud, &sil, &projector(sil.centroid(), &inv), f32::MAX).unwrap();

        let condensed = condense(sil.points(), cloud.len());
        let adjacency = cloud.adjacency();
        let mut reference = Walker::new(&adjacency, &condensed);
        reference.claim(0, 0);
        visit_recursive(&mut reference, 0, 0);

        assert_eq!(c.assignments, reference.assignment, "seed {seed}");
    }
}

#[test]
fn unreachable_vertices_stay_unassigned() {
    let cloud = line_cloud(3, &[(0, 1)]);
    let sil = bar(3);
    let inv = Matrix::identity(4);
    let c = solve(&cloud, &sil, &projector(sil.centroid(), &inv), f32::MAX).unwrap();

    assert!(c.destinations[0].is_some());
    assert!(c.destinations[1].is_some());
    assert_eq!(c.destinations[2], None);
    assert_eq!(c.assignments[2], None);
}

#[test]
fn claims_are_unique_on_generated_clouds() {
    let cloud = PointCloud::generate(&CloudParams {
        point_count: 400,
        bounds: BoundingBox::default(),
        seed: 7,
        neighbor_count: 3,
        max_connect_distance: 50.0,
    });
    let mask = PatternMask::from_fn(48, 48, |x, y| {
        let dx = x as f32 - 24.0;
        let dy = y as f32 - 24.0;
        dx * dx + dy * dy < 400.0
    });
    let sil = Silhouette::from_mask(&mask);
    let inv = Matrix::identity(4);
    let c = solve(&cloud, &sil, &projector(sil.centroid(), &inv), 0.5).unwrap();

    let mut seen = std::collections::HashSet::new();
    for a in c.assignments.iter().flatten() {
        assert!(seen.insert(*a), "candidate {a} claimed twice");
    }
    assert!(!seen.is_empty());
    assert_eq!(c.dest_edges.len(), cloud.edges().len());
}

#[test]
fn empty_silhouette_keeps_the_source_layout() {
    let cloud = line_cloud(3, &[(0, 1), (1, 2)]);
    let inv = Matrix::identity(4);
    let sil = Silhouette::default();
    let c = solve(&cloud, &sil, &projector(Vector2F::ZERO, &inv), 0.0).unwrap();

    let src: Vec<_> = cloud.vertices().iter().copied().map(Some).collect();
    assert_eq!(c.destinations, src);
    assert_eq!(c.dest_edges, cloud.edges());
}

#[test]
fn long_destination_edges_collapse() {
    let edges = [EdgeRef::new(0, 1), EdgeRef::new(1, 2), EdgeRef::new(2, 3)];
    let dest = [
        Some(Vector3F::ZERO),
        Some(Vector3F::new(0.5, 0.0, 0.0)),
        Some(Vector3F::new(5.0, 0.0, 0.0)),
        None,
    ];
    let pruned = prune_edges(&edges, &dest, 1.0);
    assert_eq!(pruned[0], EdgeRef::new(0, 1));
    assert_eq!(pruned[1], EdgeRef::new(1, 1));
    assert_eq!(pruned[2], EdgeRef::new(2, 3));
}

#[test]
fn projector_flips_rows_and_applies_offset() {
    let inv = Matrix::identity(4);
    let p = PatternProjector {
        centroid: Vector2F::new(0.5, 0.5),
        inv_rotate: &inv,
        dimensions: 10.0,
        offset: Vector3F::new(0.0, 0.0, 30.0),
    };
    let w = p.to_world(Vector2F::new(0.5, 0.0)).unwrap();
    assert_eq!(w, Vector3F::new(0.0, 5.0, 30.0));
}
