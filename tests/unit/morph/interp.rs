use super::*;

fn cloud() -> PointCloud {
    PointCloud::from_parts(
        vec![
            Vector3F::new(0.0, 0.0, 0.0),
            Vector3F::new(2.0, 0.0, 0.0),
            Vector3F::new(4.0, 0.0, 0.0),
        ],
        vec![EdgeRef::new(0, 1), EdgeRef::new(1, 2)],
    )
    .unwrap()
}

fn correspondence() -> Correspondence {
    Correspondence {
        destinations: vec![
            Some(Vector3F::new(0.0, 10.0, 0.0)),
            Some(Vector3F::new(2.0, 10.0, 0.0)),
            None,
        ],
        assignments: vec![Some(0), Some(1), None],
        dest_edges: vec![EdgeRef::new(0, 0), EdgeRef::new(1, 2)],
    }
}

#[test]
fn identity_matches_source() {
    let c = cloud();
    let m = MorphState::identity(&c);
    assert_eq!(m.current()[1], Some(Vector3F::new(2.0, 0.0, 0.0)));
    assert_eq!(m.current_edges().len(), 2);
    assert_eq!(
        m.current_edges()[1],
        Some(Edge::new(Vector3F::new(2.0, 0.0, 0.0), Vector3F::new(4.0, 0.0, 0.0)))
    );
}

#[test]
fn endpoints_hit_source_and_destination() {
    let c = cloud();
    let mut m = MorphState::identity(&c);
    m.apply(correspondence());

    m.lerp(&c, 0.0, 0.0);
    assert_eq!(m.current()[0], Some(Vector3F::new(0.0, 0.0, 0.0)));

    m.lerp(&c, 1.0, 1.0);
    assert_eq!(m.current()[0], Some(Vector3F::new(0.0, 10.0, 0.0)));
    assert_eq!(m.current()[1], Some(Vector3F::new(2.0, 10.0, 0.0)));
    assert_eq!(m.current()[2], None);
}

#[test]
fn fractions_are_clamped() {
    let c = cloud();
    let mut m = MorphState::identity(&c);
    m.apply(correspondence());

    m.lerp(&c, 3.0, -1.0);
    assert_eq!(m.current()[1], Some(Vector3F::new(2.0, 10.0, 0.0)));
    // edge fraction 0 keeps the source-table pair, at the morphed positions
    assert_eq!(
        m.current_edges()[0],
        Some(Edge::new(Vector3F::new(0.0, 10.0, 0.0), Vector3F::new(2.0, 10.0, 0.0)))
    );
}

#[test]
fn collapsed_destination_edge_shrinks_to_a_point() {
    let c = cloud();
    let mut m = MorphState::identity(&c);
    m.apply(correspondence());

    m.lerp(&c, 1.0, 1.0);
    let e = m.current_edges()[0].unwrap();
    assert_eq!(e.a, Vector3F::new(0.0, 10.0, 0.0));
    assert_eq!(e.b, Vector3F::new(0.0, 10.0, 0.0));
    assert_eq!(e.length(), 0.0);

    m.lerp(&c, 0.5, 0.5);
    let e = m.current_edges()[0].unwrap();
    assert_eq!(e.a, Vector3F::new(0.0, 5.0, 0.0));
    assert_eq!(e.b, Vector3F::new(1.0, 5.0, 0.0));
}

#[test]
fn edges_touching_unassigned_vertices_are_skipped() {
    let c = cloud();
    let mut m = MorphState::identity(&c);
    m.apply(correspondence());
    m.lerp(&c, 0.3, 0.3);
    assert_eq!(m.current_edges()[1], None);
}

#[test]
fn reset_restores_source_geometry() {
    let c = cloud();
    let mut m = MorphState::identity(&c);
    m.apply(correspondence());
    m.lerp(&c, 1.0, 1.0);
    m.reset_to_source(&c);
    let src: Vec<_> = c.vertices().iter().copied().map(Some).collect();
    assert_eq!(m.current(), src.as_slice());
}
