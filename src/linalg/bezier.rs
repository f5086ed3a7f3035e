use crate::linalg::vector::Vector3F;

/// Cubic Bezier segment in 3D.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Bezier {
    pub a: Vector3F,
    pub b: Vector3F,
    pub c: Vector3F,
    pub d: Vector3F,
}

impl Bezier {
    pub const fn new(a: Vector3F, b: Vector3F, c: Vector3F, d: Vector3F) -> Self {
        Self { a, b, c, d }
    }

    /// De Casteljau evaluation with `t` clamped to `[0, 1]`.
    pub fn point(&self, t: f32) -> Vector3F {
        let t = t.clamp(0.0, 1.0);
        let ab = self.a.lerp(self.b, t);
        let bc = self.b.lerp(self.c, t);
        let cd = self.c.lerp(self.d, t);

        let abc = ab.lerp(bc, t);
        let bcd = bc.lerp(cd, t);

        abc.lerp(bcd, t)
    }
}
