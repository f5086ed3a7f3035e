use crate::linalg::{bezier::Bezier, vector::Vector3F};

/// Camera offset along a piecewise cubic path, each segment taking an equal share of `[0, 1)`.
///
/// Returns `None` for an empty path.
pub fn path_offset(path: &[Bezier], t: f32) -> Option<Vector3F> {
    let n = path.len();
    if n == 0 {
        return None;
    }
    let scaled = t * n as f32;
    let idx = (scaled.max(0.0).floor() as usize).min(n - 1);
    Some(path[idx].point(scaled - idx as f32))
}
