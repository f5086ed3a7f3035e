pub const DEG2RAD: f32 = std::f32::consts::PI / 180.0;

/// Linearly remap `x` from `[in_min, in_max]` onto `[out_min, out_max]`.
pub fn map_range(x: f32, in_min: f32, in_max: f32, out_min: f32, out_max: f32) -> f32 {
    (x - in_min) * (out_max - out_min) / (in_max - in_min) + out_min
}

/// Unclamped linear interpolation; exact at `t == 0` and `t == 1`.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a * (1.0 - t) + b * t
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
