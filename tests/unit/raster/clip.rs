use super::*;

fn v(x: f32, y: f32) -> Vector2F {
    Vector2F::new(x, y)
}

fn canvas() -> Canvas {
    Canvas::new(300, 300).unwrap()
}

#[test]
fn crossing_segments_meet() {
    let p = segment_intersection(v(0.0, 0.0), v(2.0, 2.0), v(0.0, 2.0), v(2.0, 0.0));
    assert_eq!(p, Some(v(1.0, 1.0)));
}

#[test]
fn parallel_and_disjoint_segments_do_not_meet() {
    assert_eq!(
        segment_intersection(v(0.0, 0.0), v(2.0, 0.0), v(0.0, 1.0), v(2.0, 1.0)),
        None
    );
    assert_eq!(
        segment_intersection(v(0.0, 0.0), v(2.0, 0.0), v(1.0, 0.0), v(3.0, 0.0)),
        None
    );
    assert_eq!(
        segment_intersection(v(0.0, 0.0), v(1.0, 1.0), v(3.0, 0.0), v(3.0, 5.0)),
        None
    );
}

#[test]
fn segment_on_the_bottom_border_hits_two_sides() {
    let hits = rect_intersections(v(-10.0, 300.0), v(310.0, 300.0), canvas());
    assert_eq!(hits.as_slice(), &[v(300.0, 300.0), v(0.0, 300.0)]);
}

#[test]
fn both_outside_without_crossings_is_dropped() {
    let c = clip_segment(v(-10.0, -10.0), v(-5.0, -20.0), canvas()).unwrap();
    assert_eq!(c, None);
    let c = clip_segment(v(310.0, 10.0), v(400.0, 290.0), canvas()).unwrap();
    assert_eq!(c, None);
}

#[test]
fn inside_segment_is_kept_unchanged() {
    let c = clip_segment(v(10.0, 10.0), v(20.0, 25.0), canvas()).unwrap();
    assert_eq!(c, Some((v(10.0, 10.0), v(20.0, 25.0))));
}

#[test]
fn one_crossing_runs_to_the_inside_endpoint() {
    let c = clip_segment(v(150.0, 150.0), v(450.0, 150.0), canvas()).unwrap();
    assert_eq!(c, Some((v(300.0, 150.0), v(150.0, 150.0))));

    let c = clip_segment(v(450.0, 150.0), v(150.0, 150.0), canvas()).unwrap();
    assert_eq!(c, Some((v(300.0, 150.0), v(150.0, 150.0))));
}

#[test]
fn two_crossings_keep_only_the_inner_part() {
    let c = clip_segment(v(-10.0, 150.0), v(310.0, 150.0), canvas()).unwrap();
    assert_eq!(c, Some((v(300.0, 150.0), v(0.0, 150.0))));
}

#[test]
fn near_max_endpoint_still_finds_its_crossing() {
    let c = clip_segment(v(150.0, 150.0), v(-3e38, 150.0), canvas()).unwrap();
    assert_eq!(c, Some((v(0.0, 150.0), v(150.0, 150.0))));

    let c = clip_segment(v(150.0, 150.0), v(150.0, f32::MAX), canvas()).unwrap();
    assert_eq!(c, Some((v(150.0, 300.0), v(150.0, 150.0))));
}

#[test]
fn non_finite_endpoints_are_dropped() {
    let c = clip_segment(v(f32::NAN, 10.0), v(20.0, 20.0), canvas()).unwrap();
    assert_eq!(c, None);
    let c = clip_segment(v(10.0, 10.0), v(f32::INFINITY, 20.0), canvas()).unwrap();
    assert_eq!(c, None);
}

#[test]
fn inside_test_excludes_the_far_borders() {
    assert!(inside(v(0.0, 0.0), canvas()));
    assert!(inside(v(299.9, 299.9), canvas()));
    assert!(!inside(v(300.0, 10.0), canvas()));
    assert!(!inside(v(10.0, 300.0), canvas()));
    assert!(!inside(v(-0.1, 10.0), canvas()));
}
