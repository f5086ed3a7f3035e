use crate::linalg::vector::Vector3F;

/// Drawable segment between two world-space positions.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Edge {
    pub a: Vector3F,
    pub b: Vector3F,
}

impl Edge {
    pub const fn new(a: Vector3F, b: Vector3F) -> Self {
        Self { a, b }
    }

    /// Endpoint-wise interpolation towards `other`.
    pub fn lerp(self, other: Self, t: f32) -> Self {
        Self::new(self.a.lerp(other.a, t), self.b.lerp(other.b, t))
    }

    pub fn length(self) -> f32 {
        self.a.distance(self.b)
    }
}
