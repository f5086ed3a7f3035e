use crate::{
    foundation::error::{WireError, WireResult},
    scene::ease::Ease,
};

/// Maps animation time onto a morph fraction in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MorphWindow {
    /// Time at which the fraction starts leaving 0.
    pub start: f32,
    /// Time at which the fraction reaches 1.
    pub end: f32,
    #[serde(default)]
    pub ease: Ease,
}

impl MorphWindow {
    pub fn new(start: f32, end: f32, ease: Ease) -> Self {
        Self { start, end, ease }
    }

    pub fn validate(&self, field: &str) -> WireResult<()> {
        if !self.start.is_finite() || !self.end.is_finite() {
            return Err(WireError::validation(format!(
                "{field} start/end must be finite"
            )));
        }
        if self.end <= self.start {
            return Err(WireError::validation(format!(
                "{field} end must be > start"
            )));
        }
        Ok(())
    }

    pub fn fraction(&self, t: f32) -> f32 {
        let u = (t - self.start) / (self.end - self.start);
        self.ease.apply(u)
    }
}

/// Separate time windows for vertex positions and edge geometry.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MorphSchedule {
    pub vertex: MorphWindow,
    pub edge: MorphWindow,
}

impl Default for MorphSchedule {
    fn default() -> Self {
        Self {
            vertex: MorphWindow::new(0.1, 0.7, Ease::InOutCubic),
            edge: MorphWindow::new(0.2, 0.9, Ease::InOutCubic),
        }
    }
}

impl MorphSchedule {
    pub fn validate(&self) -> WireResult<()> {
        self.vertex.validate("morph.vertex")?;
        self.edge.validate("morph.edge")
    }

    /// `(vertex_fraction, edge_fraction)` at time `t`.
    pub fn fractions(&self, t: f32) -> (f32, f32) {
        (self.vertex.fraction(t), self.edge.fraction(t))
    }
}
