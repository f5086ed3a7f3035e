use std::io::Read;

use crate::{
    foundation::core::Color,
    foundation::error::{WireError, WireResult},
    linalg::bezier::Bezier,
    linalg::vector::Vector3F,
    scene::schedule::MorphSchedule,
};

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// Complete configuration surface of one animation run.
///
/// Every field has a default, so a JSON file only needs the values it overrides.
pub struct SceneConfig {
    /// Number of cloud vertices.
    pub point_count: usize,
    /// How many nearest neighbors each vertex tries to connect to.
    pub neighbor_count: usize,
    /// Neighbors at or beyond this world distance are not connected.
    pub max_connect_distance: f32,
    /// Box the cloud vertices are sampled in.
    pub bounds: BoundingBox,
    pub background: Color,
    pub line_color: Color,
    pub camera: CameraConfig,
    /// Where and how large the morphed silhouette appears.
    pub pattern: PatternTarget,
    pub morph: MorphSchedule,
    /// Seed for the point-cloud generator.
    pub seed: u64,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            point_count: 5000,
            neighbor_count: 3,
            max_connect_distance: 50.0,
            bounds: BoundingBox::default(),
            background: Color::BLACK,
            line_color: Color::RED,
            camera: CameraConfig::default(),
            pattern: PatternTarget::default(),
            morph: MorphSchedule::default(),
            seed: 133_769_420,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BoundingBox {
    pub min: Vector3F,
    pub max: Vector3F,
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self {
            min: Vector3F::new(-15.0, -5.0, -20.0),
            max: Vector3F::new(20.0, 3.0, 1000.0),
        }
    }
}

impl BoundingBox {
    pub fn contains(&self, p: Vector3F) -> bool {
        (self.min.x..=self.max.x).contains(&p.x)
            && (self.min.y..=self.max.y).contains(&p.y)
            && (self.min.z..=self.max.z).contains(&p.z)
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Base position; the path offset is added to it.
    pub position: Vector3F,
    /// Euler angles in degrees.
    pub rotation: Vector3F,
    /// Horizontal field of view in degrees.
    pub field_of_view: f32,
    pub near_clip: f32,
    pub far_clip: f32,
    /// Path segments traversed uniformly over `t ∈ [0, 1)`.
    pub path: Vec<Bezier>,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: Vector3F::ZERO,
            rotation: Vector3F::ZERO,
            field_of_view: 110.0,
            near_clip: 0.01,
            far_clip: 2000.0,
            path: vec![Bezier::new(
                Vector3F::new(1.00, -1.66, 2.66),
                Vector3F::new(0.33, -2.33, 0.33),
                Vector3F::new(1.66, -1.33, 0.66),
                Vector3F::new(0.66, -1.33, 1.66),
            )],
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PatternTarget {
    /// World-space size of the normalized silhouette.
    pub dimensions: f32,
    /// World-space translation applied after scaling.
    pub offset: Vector3F,
    /// Edges whose destination endpoints end up farther apart than this are severed.
    pub max_connect_distance: f32,
}

impl Default for PatternTarget {
    fn default() -> Self {
        Self {
            dimensions: 30.0,
            offset: Vector3F::new(0.0, 0.0, 30.0),
            max_connect_distance: 0.33,
        }
    }
}

impl SceneConfig {
    pub fn validate(&self) -> WireResult<()> {
        let b = &self.bounds;
        for (name, v) in [("bounds.min", b.min), ("bounds.max", b.max)] {
            finite_vec(name, v)?;
        }
        if b.min.x > b.max.x || b.min.y > b.max.y || b.min.z > b.max.z {
            return Err(WireError::validation(
                "bounds.min must be <= bounds.max on every axis",
            ));
        }
        if !self.max_connect_distance.is_finite() || self.max_connect_distance < 0.0 {
            return Err(WireError::validation(
                "max_connect_distance must be finite and >= 0",
            ));
        }

        let cam = &self.camera;
        finite_vec("camera.position", cam.position)?;
        finite_vec("camera.rotation", cam.rotation)?;
        if !cam.field_of_view.is_finite()
            || cam.field_of_view <= 0.0
            || cam.field_of_view >= 180.0
        {
            return Err(WireError::validation(
                "camera.field_of_view must be in (0, 180) degrees",
            ));
        }
        if !cam.near_clip.is_finite() || cam.near_clip <= 0.0 {
            return Err(WireError::validation("camera.near_clip must be > 0"));
        }
        if !cam.far_clip.is_finite() || cam.far_clip <= cam.near_clip {
            return Err(WireError::validation(
                "camera.far_clip must be > camera.near_clip",
            ));
        }
        if cam.path.is_empty() {
            return Err(WireError::validation(
                "camera.path must contain at least one segment",
            ));
        }
        for (i, seg) in cam.path.iter().enumerate() {
            for p in [seg.a, seg.b, seg.c, seg.d] {
                finite_vec(&format!("camera.path[{i}]"), p)?;
            }
        }

        let pat = &self.pattern;
        finite_vec("pattern.offset", pat.offset)?;
        if !pat.dimensions.is_finite() {
            return Err(WireError::validation("pattern.dimensions must be finite"));
        }
        if !pat.max_connect_distance.is_finite() || pat.max_connect_distance < 0.0 {
            return Err(WireError::validation(
                "pattern.max_connect_distance must be finite and >= 0",
            ));
        }

        self.morph.validate()
    }

    pub fn from_json_reader(r: impl Read) -> WireResult<Self> {
        let cfg: Self =
            serde_json::from_reader(r).map_err(|e| WireError::serde(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_json_str(s: &str) -> WireResult<Self> {
        Self::from_json_reader(s.as_bytes())
    }

    pub fn to_json_pretty(&self) -> WireResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| WireError::serde(e.to_string()))
    }
}

fn finite_vec(field: &str, v: Vector3F) -> WireResult<()> {
    if v.x.is_finite() && v.y.is_finite() && v.z.is_finite() {
        Ok(())
    } else {
        Err(WireError::validation(format!("{field} must be finite")))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/config.rs"]
mod tests;
