use super::*;

#[test]
fn empty_mask_has_no_points_and_zero_centroid() {
    let s = Silhouette::from_mask(&PatternMask::from_fn(8, 5, |_, _| false));
    assert!(s.is_empty());
    assert_eq!(s.centroid(), Vector2F::ZERO);

    let zero = Silhouette::from_mask(&PatternMask::from_fn(0, 0, |_, _| true));
    assert!(zero.is_empty());
}

#[test]
fn coordinates_are_normalized_by_larger_dimension() {
    let mask = PatternMask::from_ascii(&["...#", "....", "#..."]).unwrap();
    let s = Silhouette::from_mask(&mask);
    assert_eq!(s.len(), 2);
    // width 4 is the larger dimension
    assert_eq!(s.points()[0], Vector2F::new(0.75, 0.0));
    assert_eq!(s.points()[1], Vector2F::new(0.0, 0.5));
    assert_eq!(s.centroid(), Vector2F::new(0.375, 0.25));
}

#[test]
fn points_are_sorted_by_distance_to_first_scanned_point() {
    let mask = PatternMask::from_ascii(&["#...#", ".....", "..#..", ".....", "#...."]).unwrap();
    let s = Silhouette::from_mask(&mask);
    let anchor = s.points()[0];
    assert_eq!(anchor, Vector2F::ZERO);
    let d: Vec<f32> = s.points().iter().map(|p| p.distance(anchor)).collect();
    assert!(d.windows(2).all(|w| w[0] <= w[1]));
    // (0.8, 0) and (0, 0.8) tie; the sort is stable so scan order is kept
    assert_eq!(s.points()[1], Vector2F::new(0.4, 0.4));
    assert_eq!(s.points()[2], Vector2F::new(0.8, 0.0));
    assert_eq!(s.points()[3], Vector2F::new(0.0, 0.8));
}

#[test]
fn all_points_stay_in_unit_square() {
    let mask = PatternMask::from_fn(7, 3, |x, y| (x + y) % 2 == 0);
    let s = Silhouette::from_mask(&mask);
    assert_eq!(s.len(), mask.count_on());
    for p in s.points() {
        assert!((0.0..=1.0).contains(&p.x) && (0.0..=1.0).contains(&p.y));
    }
}
