//! Segment-against-image-rectangle clipping.

use smallvec::SmallVec;

use crate::{
    foundation::core::Canvas,
    foundation::error::{WireError, WireResult},
    linalg::vector::Vector2F,
};

/// Intersection of segments `p0→p1` and `p2→p3`, if both parameters lie in `[0, 1]`.
///
/// Parallel and collinear segments report no intersection. The solve runs in `f64`: a projected
/// endpoint may sit near `f32::MAX`, where the `f32` cross products overflow.
pub fn segment_intersection(
    p0: Vector2F,
    p1: Vector2F,
    p2: Vector2F,
    p3: Vector2F,
) -> Option<Vector2F> {
    let wide = |p: Vector2F| (f64::from(p.x), f64::from(p.y));
    let ((x0, y0), (x1, y1)) = (wide(p0), wide(p1));
    let ((x2, y2), (x3, y3)) = (wide(p2), wide(p3));

    let (s1x, s1y) = (x1 - x0, y1 - y0);
    let (s2x, s2y) = (x3 - x2, y3 - y2);
    let denom = -s2x * s1y + s1x * s2y;
    if denom == 0.0 {
        return None;
    }

    let s = (-s1y * (x0 - x2) + s1x * (y0 - y2)) / denom;
    let t = (s2x * (y0 - y2) - s2y * (x0 - x2)) / denom;
    let unit = 0.0..=1.0;
    // point taken on p2→p3, the short side
    (unit.contains(&s) && unit.contains(&t))
        .then(|| Vector2F::new((x2 + s2x * s) as f32, (y2 + s2y * s) as f32))
}

/// Crossings of `a→b` with the image border, at most two.
///
/// Sides are tested top, right, bottom, left on the corners `(0,0) (W,0) (W,H) (0,H)`; the scan
/// stops at the second hit.
pub fn rect_intersections(a: Vector2F, b: Vector2F, canvas: Canvas) -> SmallVec<[Vector2F; 2]> {
    let (w, h) = (canvas.width as f32, canvas.height as f32);
    let corners = [
        Vector2F::new(0.0, 0.0),
        Vector2F::new(w, 0.0),
        Vector2F::new(w, h),
        Vector2F::new(0.0, h),
    ];

    let mut hits = SmallVec::new();
    for i in 0..corners.len() {
        let (r0, r1) = (corners[i], corners[(i + 1) % corners.len()]);
        if let Some(p) = segment_intersection(a, b, r0, r1) {
            hits.push(p);
            if hits.len() == 2 {
                break;
            }
        }
    }
    hits
}

/// `0 <= x < W` and `0 <= y < H`.
pub fn inside(p: Vector2F, canvas: Canvas) -> bool {
    p.x >= 0.0 && p.y >= 0.0 && p.x < canvas.width as f32 && p.y < canvas.height as f32
}

/// Visible part of the projected segment `a→b`, or `None` when nothing of it should be drawn.
///
/// | crossings | result |
/// |-----------|--------|
/// | 0, both endpoints outside | `None` |
/// | 0, otherwise | `a→b` unchanged |
/// | 1 | crossing → the inside endpoint |
/// | 2 | crossing → crossing |
pub fn clip_segment(
    a: Vector2F,
    b: Vector2F,
    canvas: Canvas,
) -> WireResult<Option<(Vector2F, Vector2F)>> {
    if !a.is_finite() || !b.is_finite() {
        return Ok(None);
    }

    let hits = rect_intersections(a, b, canvas);
    match hits.as_slice() {
        [] if !inside(a, canvas) && !inside(b, canvas) => Ok(None),
        [] => Ok(Some((a, b))),
        [p] => {
            let anchor = if inside(a, canvas) { a } else { b };
            Ok(Some((*p, anchor)))
        }
        [p, q] => Ok(Some((*p, *q))),
        more => Err(WireError::unreachable(format!(
            "segment crosses the image border {} times",
            more.len()
        ))),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/raster/clip.rs"]
mod tests;
