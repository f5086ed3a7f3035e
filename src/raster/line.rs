use crate::linalg::vector::Vector2F;

/// Largest coordinate magnitude walked; beyond it `f32` no longer resolves single pixels.
const COORD_LIMIT: f32 = (1 << 24) as f32;

fn to_pixel(c: f32) -> i32 {
    c.clamp(-COORD_LIMIT, COORD_LIMIT) as i32
}

/// Integer line walk from `a` to `b`, both endpoints included.
///
/// Coordinates are truncated towards zero after clamping to `±2^24`. The walk always advances one
/// step along the longer axis and steps the shorter axis whenever the accumulated error reaches
/// the longer length.
pub fn bresenham(a: Vector2F, b: Vector2F, mut plot: impl FnMut(i32, i32)) {
    let (mut x, mut y) = (to_pixel(a.x), to_pixel(a.y));
    let (x2, y2) = (to_pixel(b.x), to_pixel(b.y));
    let w = x2 - x;
    let h = y2 - y;

    let dx1 = w.signum();
    let dy1 = h.signum();
    let (mut dx2, mut dy2) = (w.signum(), 0);

    let mut longest = w.abs();
    let mut shortest = h.abs();
    if longest <= shortest {
        longest = h.abs();
        shortest = w.abs();
        dy2 = h.signum();
        dx2 = 0;
    }

    let mut numerator = longest >> 1;
    for _ in 0..=longest {
        plot(x, y);
        numerator += shortest;
        if numerator >= longest {
            numerator -= longest;
            x += dx1;
            y += dy1;
        } else {
            x += dx2;
            y += dy2;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/raster/line.rs"]
mod tests;
