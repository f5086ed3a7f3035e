//! Pipeline state for one animation run and the per-sample control flow.
//!
//! Stage order: [`Generator::setup`] builds the cloud once, the pattern is set and processed
//! once, and every time sample then rebuilds the camera matrices, interpolates the morph and
//! rasterizes the current edges. The correspondence is solved at the first sample only.

use crate::{
    camera::projection::CameraFrame,
    cloud::builder::{CloudParams, PointCloud},
    foundation::error::{WireError, WireResult},
    morph::correspondence::{self, PatternProjector},
    morph::interp::MorphState,
    pattern::mask::PatternMask,
    pattern::silhouette::Silhouette,
    raster::draw::{RenderStats, draw_edges},
    raster::surface::PixelSurface,
    scene::config::SceneConfig,
};

#[derive(Clone, Debug)]
pub struct Generator {
    config: SceneConfig,
    cloud: Option<PointCloud>,
    morph: Option<MorphState>,
    pattern: Option<PatternMask>,
    silhouette: Option<Silhouette>,
    camera: Option<CameraFrame>,
    pattern_solved: bool,
}

impl Generator {
    pub fn new(config: SceneConfig) -> WireResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            cloud: None,
            morph: None,
            pattern: None,
            silhouette: None,
            camera: None,
            pattern_solved: false,
        })
    }

    /// Build the point cloud and its edge table. Current geometry starts at the source.
    #[tracing::instrument(skip(self), fields(points = self.config.point_count))]
    pub fn setup(&mut self) -> WireResult<()> {
        let cloud = PointCloud::generate(&CloudParams::from(&self.config));
        self.morph = Some(MorphState::identity(&cloud));
        self.cloud = Some(cloud);
        self.pattern_solved = false;
        Ok(())
    }

    /// Replace the pattern mask. The silhouette has to be processed again.
    pub fn set_pattern(&mut self, mask: PatternMask) {
        self.pattern = Some(mask);
        self.silhouette = None;
    }

    #[tracing::instrument(skip(self))]
    pub fn process_pattern(&mut self) -> WireResult<()> {
        let mask = self.pattern.as_ref().ok_or_else(|| {
            WireError::invalid_state("process_pattern() called without a pattern mask")
        })?;
        self.silhouette = Some(Silhouette::from_mask(mask));
        Ok(())
    }

    pub fn set_matrices(&mut self, time: f32, width: u32, height: u32) -> WireResult<()> {
        self.camera = Some(CameraFrame::build(&self.config.camera, time, width, height)?);
        Ok(())
    }

    /// Solve the vertex-to-silhouette correspondence. Runs once per animation.
    #[tracing::instrument(skip(self))]
    pub fn calc_pattern(&mut self) -> WireResult<()> {
        if self.pattern_solved {
            return Err(WireError::invalid_state(
                "calc_pattern() already ran for this animation",
            ));
        }
        let (Some(cloud), Some(morph)) = (self.cloud.as_ref(), self.morph.as_mut()) else {
            return Err(WireError::invalid_state("calc_pattern() called before setup()"));
        };
        let silhouette = self.silhouette.as_ref().ok_or_else(|| {
            WireError::invalid_state("calc_pattern() called before process_pattern()")
        })?;
        let camera = self.camera.as_ref().ok_or_else(|| {
            WireError::invalid_state("calc_pattern() called before set_matrices()")
        })?;

        let target = &self.config.pattern;
        let projector =
            PatternProjector::new(silhouette.centroid(), camera.inverse_rotation(), target);
        let solved =
            correspondence::solve(cloud, silhouette, &projector, target.max_connect_distance)?;
        morph.apply(solved);
        self.pattern_solved = true;
        Ok(())
    }

    /// Interpolate the current geometry. Without a pattern the source geometry is kept.
    pub fn lerp_pattern(&mut self, vertex_fraction: f32, edge_fraction: f32) -> WireResult<()> {
        let (Some(cloud), Some(morph)) = (self.cloud.as_ref(), self.morph.as_mut()) else {
            return Err(WireError::invalid_state("lerp_pattern() called before setup()"));
        };
        if self.pattern.is_none() {
            morph.reset_to_source(cloud);
        } else {
            morph.lerp(cloud, vertex_fraction, edge_fraction);
        }
        Ok(())
    }

    /// Clear `surface` to the background and draw the current edges.
    #[tracing::instrument(skip_all)]
    pub fn render_frame<S: PixelSurface + ?Sized>(
        &self,
        surface: &mut S,
    ) -> WireResult<RenderStats> {
        let morph = self
            .morph
            .as_ref()
            .ok_or_else(|| WireError::invalid_state("render_frame() called before setup()"))?;
        let camera = self.camera.as_ref().ok_or_else(|| {
            WireError::invalid_state("render_frame() called before set_matrices()")
        })?;

        surface.fill(self.config.background);
        let stats = draw_edges(surface, camera, morph.current_edges(), self.config.line_color)?;
        tracing::debug!(
            time = camera.time,
            edges = stats.edges_total,
            drawn = stats.edges_drawn,
            pixels = stats.pixels_set,
            "frame rendered"
        );
        Ok(stats)
    }

    /// One full time sample: matrices, correspondence on the first sample, morph, raster.
    pub fn render_at<S: PixelSurface + ?Sized>(
        &mut self,
        time: f32,
        surface: &mut S,
    ) -> WireResult<RenderStats> {
        self.set_matrices(time, surface.width(), surface.height())?;

        if self.pattern.is_some() && !self.pattern_solved {
            if self.silhouette.is_none() {
                self.process_pattern()?;
            }
            self.calc_pattern()?;
        }

        let (vertex, edge) = self.config.morph.fractions(time);
        self.lerp_pattern(vertex, edge)?;
        self.render_frame(surface)
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn cloud(&self) -> Option<&PointCloud> {
        self.cloud.as_ref()
    }

    pub fn morph(&self) -> Option<&MorphState> {
        self.morph.as_ref()
    }

    pub fn pattern(&self) -> Option<&PatternMask> {
        self.pattern.as_ref()
    }

    pub fn silhouette(&self) -> Option<&Silhouette> {
        self.silhouette.as_ref()
    }

    pub fn camera(&self) -> Option<&CameraFrame> {
        self.camera.as_ref()
    }

    pub fn is_pattern_solved(&self) -> bool {
        self.pattern_solved
    }
}

#[cfg(test)]
#[path = "../tests/unit/generator.rs"]
mod tests;
