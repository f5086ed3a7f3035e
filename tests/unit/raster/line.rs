use super::*;

fn collect(a: (f32, f32), b: (f32, f32)) -> Vec<(i32, i32)> {
    let mut out = Vec::new();
    bresenham(Vector2F::new(a.0, a.1), Vector2F::new(b.0, b.1), |x, y| {
        out.push((x, y))
    });
    out
}

#[test]
fn horizontal_and_vertical_runs_include_both_ends() {
    assert_eq!(collect((0.0, 0.0), (3.0, 0.0)), vec![(0, 0), (1, 0), (2, 0), (3, 0)]);
    assert_eq!(collect((0.0, 0.0), (0.0, 2.0)), vec![(0, 0), (0, 1), (0, 2)]);
}

#[test]
fn diagonal_steps_both_axes() {
    assert_eq!(
        collect((0.0, 0.0), (3.0, 3.0)),
        vec![(0, 0), (1, 1), (2, 2), (3, 3)]
    );
}

#[test]
fn shallow_reverse_line_ends_on_target() {
    assert_eq!(
        collect((3.0, 1.0), (0.0, 0.0)),
        vec![(3, 1), (2, 1), (1, 0), (0, 0)]
    );
}

#[test]
fn coordinates_truncate_towards_zero() {
    assert_eq!(collect((1.9, 2.7), (1.2, 2.1)), vec![(1, 2)]);
    assert_eq!(collect((-0.5, 0.0), (-0.5, 0.0)), vec![(0, 0)]);
}

#[test]
fn pixel_count_follows_the_longer_axis() {
    let px = collect((0.0, 0.0), (10.0, 4.0));
    assert_eq!(px.len(), 11);
    assert_eq!(px.first(), Some(&(0, 0)));
    assert_eq!(px.last(), Some(&(10, 4)));
    for w in px.windows(2) {
        assert_eq!(w[1].0 - w[0].0, 1);
        assert!((0..=1).contains(&(w[1].1 - w[0].1)));
    }
}

#[test]
fn far_endpoints_are_clamped_instead_of_overflowing() {
    let mut count = 0u64;
    let mut last = (0, 0);
    bresenham(Vector2F::new(150.0, 150.0), Vector2F::new(-3e38, 150.0), |x, y| {
        count += 1;
        last = (x, y);
    });
    assert_eq!(last, (-(1 << 24), 150));
    assert_eq!(count, (1u64 << 24) + 151);
}
