//! Frame-sequence drivers on top of [`Generator`].

use std::path::PathBuf;

use crate::{
    encode::ffmpeg::{EncodeConfig, FfmpegEncoder},
    foundation::core::Canvas,
    foundation::error::{WireError, WireResult},
    generator::Generator,
    raster::draw::RenderStats,
    raster::surface::FrameRgb,
};

/// Uniform time sampling: frame `i` of `frames` renders at `t = i / frames`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameClock {
    pub frames: u32,
}

impl FrameClock {
    pub fn new(frames: u32) -> WireResult<Self> {
        if frames == 0 {
            return Err(WireError::validation("frame count must be > 0"));
        }
        Ok(Self { frames })
    }

    pub fn time_at(self, index: u32) -> f32 {
        index as f32 / self.frames as f32
    }

    pub fn times(self) -> impl Iterator<Item = (u32, f32)> {
        (0..self.frames).map(move |i| (i, self.time_at(i)))
    }
}

/// Render every frame of `clock` in increasing time order, handing each to `on_frame`.
///
/// The generator is set up here when it has not been set up yet.
#[tracing::instrument(skip(generator, on_frame), fields(frames = clock.frames))]
pub fn render_sequence(
    generator: &mut Generator,
    clock: FrameClock,
    width: u32,
    height: u32,
    mut on_frame: impl FnMut(u32, &FrameRgb) -> WireResult<()>,
) -> WireResult<RenderStats> {
    let canvas = Canvas::new(width, height)?;
    if generator.cloud().is_none() {
        generator.setup()?;
    }

    let mut total = RenderStats::default();
    let mut frame = FrameRgb::new(canvas, generator.config().background);
    for (i, t) in clock.times() {
        let stats = generator.render_at(t, &mut frame)?;
        total.accumulate(&stats);
        on_frame(i, &frame)?;
    }

    tracing::info!(
        frames = clock.frames,
        edges_drawn = total.edges_drawn,
        pixels = total.pixels_set,
        "sequence rendered"
    );
    Ok(total)
}

#[derive(Clone, Debug)]
pub struct RenderToMp4Opts {
    pub frames: u32,
    pub fps: u32,
    pub width: u32,
    pub height: u32,
    pub overwrite: bool,
}

impl Default for RenderToMp4Opts {
    fn default() -> Self {
        Self {
            frames: 300,
            fps: 30,
            width: 1280,
            height: 720,
            overwrite: true,
        }
    }
}

/// Render the whole sequence and stream it into an MP4 via the system `ffmpeg`.
pub fn render_to_mp4(
    generator: &mut Generator,
    out_path: impl Into<PathBuf>,
    opts: &RenderToMp4Opts,
) -> WireResult<RenderStats> {
    let clock = FrameClock::new(opts.frames)?;
    let mut cfg = EncodeConfig::new(out_path, opts.width, opts.height, opts.fps);
    cfg.overwrite = opts.overwrite;

    let mut enc = FfmpegEncoder::new(cfg)?;
    let stats = render_sequence(generator, clock, opts.width, opts.height, |_, frame| {
        enc.encode_frame(frame)
    })?;
    enc.finish()?;
    Ok(stats)
}
